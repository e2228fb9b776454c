//! Feedback selection: deterministic localized templates with an optional
//! text-generation collaborator

use std::time::Duration;

use serde::Deserialize;
use serde_json::json;
use tracing::warn;

use crate::error::CoreError;
use crate::phrases::LanguageCode;

/// External feedback generator. Implementations may fail; callers fall back
/// to [`select_feedback`] and never surface the error.
pub trait FeedbackGenerator {
    fn get_feedback(
        &self,
        score: u8,
        mismatches: &[String],
        original: &str,
        spoken: &str,
        language: LanguageCode,
    ) -> Result<String, CoreError>;
}

struct Templates {
    excellent: &'static str,
    good: &'static str,
    attention: &'static str,
    retry: &'static str,
}

/// Deterministic feedback for a scored attempt.
///
/// Tiers: above 90 congratulates, above 70 encourages and names the
/// mismatched words, everything else asks for a clearer retry.
pub fn select_feedback(score: u8, mismatches: &[String], language: LanguageCode) -> String {
    let t = templates(language);
    if score > 90 {
        t.excellent.to_string()
    } else if score > 70 {
        if mismatches.is_empty() {
            t.good.to_string()
        } else {
            format!("{} {} {}", t.good, t.attention, mismatches.join(", "))
        }
    } else {
        t.retry.to_string()
    }
}

fn templates(language: LanguageCode) -> Templates {
    match language {
        LanguageCode::PtBr => Templates {
            excellent: "Excelente pronúncia! Continue assim.",
            good: "Boa pronúncia, mas pode melhorar com mais prática.",
            attention: "Preste atenção em:",
            retry: "Tente novamente focando na pronúncia clara de cada palavra.",
        },
        LanguageCode::EnUs => Templates {
            excellent: "Excellent pronunciation! Keep it up.",
            good: "Good pronunciation, but it can be improved with more practice.",
            attention: "Pay attention to:",
            retry: "Try again focusing on clear pronunciation of each word.",
        },
        LanguageCode::EsEs => Templates {
            excellent: "¡Excelente pronunciación! Sigue así.",
            good: "Buena pronunciación, pero puede mejorar con más práctica.",
            attention: "Presta atención a:",
            retry: "Inténtalo de nuevo enfocándote en la pronunciación clara de cada palabra.",
        },
        LanguageCode::FrFr => Templates {
            excellent: "Excellente prononciation ! Continuez comme ça.",
            good: "Bonne prononciation, mais elle peut être améliorée avec plus de pratique.",
            attention: "Faites attention à :",
            retry: "Réessayez en vous concentrant sur la prononciation claire de chaque mot.",
        },
        LanguageCode::ItIt => Templates {
            excellent: "Pronuncia eccellente! Continua così.",
            good: "Buona pronuncia, ma può migliorare con più pratica.",
            attention: "Fai attenzione a:",
            retry: "Riprova concentrandoti sulla pronuncia chiara di ogni parola.",
        },
        LanguageCode::DeDe => Templates {
            excellent: "Ausgezeichnete Aussprache! Weiter so.",
            good: "Gute Aussprache, aber mit mehr Übung geht es noch besser.",
            attention: "Achte auf:",
            retry: "Versuche es noch einmal und achte auf eine klare Aussprache jedes Wortes.",
        },
    }
}

/// Resolve feedback through the generator when one is configured, falling
/// back to the deterministic templates on any failure. Never errors.
pub fn resolve_feedback(
    generator: Option<&dyn FeedbackGenerator>,
    score: u8,
    mismatches: &[String],
    original: &str,
    spoken: &str,
    language: LanguageCode,
) -> String {
    if let Some(generator) = generator {
        match generator.get_feedback(score, mismatches, original, spoken, language) {
            Ok(text) if !text.trim().is_empty() => return text,
            Ok(_) => warn!("generator returned empty feedback, using templates"),
            Err(err) => warn!(%err, "feedback generation failed, using templates"),
        }
    }
    select_feedback(score, mismatches, language)
}

const GROQ_ENDPOINT: &str = "https://api.groq.com/openai/v1/chat/completions";
const GROQ_MODEL: &str = "llama3-8b-8192";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Chat-completions feedback generator backed by the Groq API.
pub struct GroqGenerator {
    client: reqwest::blocking::Client,
    api_key: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Deserialize)]
struct ChatMessage {
    content: String,
}

impl GroqGenerator {
    pub fn new(api_key: impl Into<String>) -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_default();
        Self { client, api_key: api_key.into() }
    }

    fn prompt(
        score: u8,
        mismatches: &[String],
        original: &str,
        spoken: &str,
        language: LanguageCode,
    ) -> String {
        let mismatch_note = if mismatches.is_empty() {
            String::new()
        } else {
            format!(" Palavras provavelmente mal pronunciadas: {}.", mismatches.join(", "))
        };
        format!(
            "Você é um tutor de pronúncia. A frase alvo era \"{original}\" e o aluno disse \
             \"{spoken}\", com uma pontuação de {score}/100.{mismatch_note} Responda em {} com \
             uma única frase curta de feedback encorajador.",
            language.prompt_name()
        )
    }
}

impl FeedbackGenerator for GroqGenerator {
    fn get_feedback(
        &self,
        score: u8,
        mismatches: &[String],
        original: &str,
        spoken: &str,
        language: LanguageCode,
    ) -> Result<String, CoreError> {
        let body = json!({
            "model": GROQ_MODEL,
            "messages": [
                { "role": "user", "content": Self::prompt(score, mismatches, original, spoken, language) }
            ],
            "max_tokens": 120,
            "temperature": 0.7,
        });

        let response: ChatResponse = self
            .client
            .post(GROQ_ENDPOINT)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()?
            .error_for_status()?
            .json()?;

        response
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content.trim().to_string())
            .ok_or(CoreError::EmptyGeneration)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn top_tier_is_exclusive_above_90() {
        let praise = select_feedback(91, &[], LanguageCode::EnUs);
        assert_eq!(praise, "Excellent pronunciation! Keep it up.");
        let at_90 = select_feedback(90, &[], LanguageCode::EnUs);
        assert_ne!(at_90, praise);
    }

    #[test]
    fn middle_tier_names_the_mismatched_words() {
        let mismatches = vec!["new".to_string(), "languages".to_string()];
        let feedback = select_feedback(80, &mismatches, LanguageCode::EnUs);
        assert!(feedback.contains("new, languages"), "got {feedback}");
    }

    #[test]
    fn boundary_at_70_is_exclusive() {
        let retry = select_feedback(70, &[], LanguageCode::EnUs);
        assert_eq!(retry, "Try again focusing on clear pronunciation of each word.");
        let good = select_feedback(71, &[], LanguageCode::EnUs);
        assert_ne!(good, retry);
    }

    #[test]
    fn feedback_is_localized() {
        let pt = select_feedback(95, &[], LanguageCode::PtBr);
        assert_eq!(pt, "Excelente pronúncia! Continue assim.");
        let de = select_feedback(95, &[], LanguageCode::DeDe);
        assert_eq!(de, "Ausgezeichnete Aussprache! Weiter so.");
    }

    struct FailingGenerator;

    impl FeedbackGenerator for FailingGenerator {
        fn get_feedback(
            &self,
            _: u8,
            _: &[String],
            _: &str,
            _: &str,
            _: LanguageCode,
        ) -> Result<String, CoreError> {
            Err(CoreError::EmptyGeneration)
        }
    }

    #[test]
    fn generator_failure_falls_back_to_templates() {
        let feedback = resolve_feedback(Some(&FailingGenerator), 95, &[], "a", "b", LanguageCode::EnUs);
        assert_eq!(feedback, "Excellent pronunciation! Keep it up.");
    }

    #[test]
    fn no_generator_uses_templates_directly() {
        let feedback = resolve_feedback(None, 40, &[], "a", "b", LanguageCode::ItIt);
        assert_eq!(feedback, "Riprova concentrandoti sulla pronuncia chiara di ogni parola.");
    }
}
