//! Practice languages and the built-in phrase pool

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// The closed set of supported locales. Unknown codes fall back to the
/// default locale wherever a mapping is required.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum LanguageCode {
    PtBr,
    #[default]
    EnUs,
    EsEs,
    FrFr,
    ItIt,
    DeDe,
}

impl LanguageCode {
    pub const ALL: [LanguageCode; 6] = [
        LanguageCode::PtBr,
        LanguageCode::EnUs,
        LanguageCode::EsEs,
        LanguageCode::FrFr,
        LanguageCode::ItIt,
        LanguageCode::DeDe,
    ];

    /// Parse a BCP 47-style code, falling back to the default locale.
    pub fn from_code(code: &str) -> Self {
        match code {
            "pt-BR" => LanguageCode::PtBr,
            "en-US" => LanguageCode::EnUs,
            "es-ES" => LanguageCode::EsEs,
            "fr-FR" => LanguageCode::FrFr,
            "it-IT" => LanguageCode::ItIt,
            "de-DE" => LanguageCode::DeDe,
            _ => LanguageCode::default(),
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            LanguageCode::PtBr => "pt-BR",
            LanguageCode::EnUs => "en-US",
            LanguageCode::EsEs => "es-ES",
            LanguageCode::FrFr => "fr-FR",
            LanguageCode::ItIt => "it-IT",
            LanguageCode::DeDe => "de-DE",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            LanguageCode::PtBr => "Português",
            LanguageCode::EnUs => "English",
            LanguageCode::EsEs => "Español",
            LanguageCode::FrFr => "Français",
            LanguageCode::ItIt => "Italiano",
            LanguageCode::DeDe => "Deutsch",
        }
    }

    pub fn flag(self) -> &'static str {
        match self {
            LanguageCode::PtBr => "🇧🇷",
            LanguageCode::EnUs => "🇺🇸",
            LanguageCode::EsEs => "🇪🇸",
            LanguageCode::FrFr => "🇫🇷",
            LanguageCode::ItIt => "🇮🇹",
            LanguageCode::DeDe => "🇩🇪",
        }
    }

    /// Portuguese-language name of the locale, used in generation prompts.
    pub fn prompt_name(self) -> &'static str {
        match self {
            LanguageCode::PtBr => "português",
            LanguageCode::EnUs => "inglês",
            LanguageCode::EsEs => "espanhol",
            LanguageCode::FrFr => "francês",
            LanguageCode::ItIt => "italiano",
            LanguageCode::DeDe => "alemão",
        }
    }
}

impl From<String> for LanguageCode {
    fn from(code: String) -> Self {
        LanguageCode::from_code(&code)
    }
}

impl From<LanguageCode> for String {
    fn from(language: LanguageCode) -> Self {
        language.code().to_string()
    }
}

impl std::fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// A target phrase in a given language. Immutable once generated; replaced
/// wholesale on "new phrase" requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Phrase {
    pub text: String,
    pub language: LanguageCode,
}

/// Supplies practice phrases for a language.
pub trait PhraseSource {
    fn get_phrase(&mut self, language: LanguageCode) -> Result<String, CoreError>;
}

/// Built-in per-language phrase pool selected uniformly at random.
/// Always available as the fallback when an external source fails.
pub struct PhrasePool {
    rng: StdRng,
}

impl PhrasePool {
    pub fn new() -> Self {
        Self { rng: StdRng::from_entropy() }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self { rng: StdRng::seed_from_u64(seed) }
    }

    pub fn pick(&mut self, language: LanguageCode) -> String {
        let pool = phrase_pool(language);
        pool[self.rng.gen_range(0..pool.len())].to_string()
    }
}

impl Default for PhrasePool {
    fn default() -> Self {
        Self::new()
    }
}

impl PhraseSource for PhrasePool {
    fn get_phrase(&mut self, language: LanguageCode) -> Result<String, CoreError> {
        Ok(self.pick(language))
    }
}

fn phrase_pool(language: LanguageCode) -> &'static [&'static str] {
    match language {
        LanguageCode::PtBr => &[
            "O sol está brilhando hoje.",
            "Eu gosto de aprender novos idiomas.",
            "A comida brasileira é muito saborosa.",
            "O Brasil é um país maravilhoso.",
            "Vamos praticar português juntos?",
        ],
        LanguageCode::EnUs => &[
            "The sun is shining today.",
            "I like learning new languages.",
            "The weather is really nice outside.",
            "How are you doing today?",
            "Let's practice English together.",
        ],
        LanguageCode::EsEs => &[
            "El sol está brillando hoy.",
            "Me gusta aprender nuevos idiomas.",
            "La comida española es muy sabrosa.",
            "España es un país maravilloso.",
            "¿Vamos a practicar español juntos?",
        ],
        LanguageCode::FrFr => &[
            "Le soleil brille aujourd'hui.",
            "J'aime apprendre de nouvelles langues.",
            "La cuisine française est très savoureuse.",
            "La France est un pays merveilleux.",
            "Pratiquons le français ensemble.",
        ],
        LanguageCode::ItIt => &[
            "Il sole splende oggi.",
            "Mi piace imparare nuove lingue.",
            "La cucina italiana è molto gustosa.",
            "L'Italia è un paese meraviglioso.",
            "Pratichiamo l'italiano insieme.",
        ],
        LanguageCode::DeDe => &[
            "Die Sonne scheint heute.",
            "Ich lerne gerne neue Sprachen.",
            "Das deutsche Essen ist sehr lecker.",
            "Deutschland ist ein wunderbares Land.",
            "Lass uns zusammen Deutsch üben.",
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_code_falls_back_to_default() {
        assert_eq!(LanguageCode::from_code("xx-XX"), LanguageCode::EnUs);
        assert_eq!(LanguageCode::from_code(""), LanguageCode::EnUs);
    }

    #[test]
    fn code_round_trips_for_every_language() {
        for language in LanguageCode::ALL {
            assert_eq!(LanguageCode::from_code(language.code()), language);
        }
    }

    #[test]
    fn every_language_has_five_phrases() {
        for language in LanguageCode::ALL {
            assert_eq!(phrase_pool(language).len(), 5);
        }
    }

    #[test]
    fn seeded_pool_is_deterministic() {
        let mut a = PhrasePool::with_seed(7);
        let mut b = PhrasePool::with_seed(7);
        for _ in 0..10 {
            assert_eq!(a.pick(LanguageCode::FrFr), b.pick(LanguageCode::FrFr));
        }
    }

    #[test]
    fn pool_serves_phrases_from_the_requested_language() {
        let mut pool = PhrasePool::with_seed(1);
        let phrase = pool.pick(LanguageCode::DeDe);
        assert!(phrase_pool(LanguageCode::DeDe).contains(&phrase.as_str()));
    }
}
