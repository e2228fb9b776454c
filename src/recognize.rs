//! Speech recognition seam
//!
//! The core never touches audio; a recognizer turns a finished recording of
//! a target phrase into text. The simulated implementation stands in for a
//! real speech-to-text collaborator.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Supplies the spoken text once a recording completes.
pub trait Recognizer {
    fn recognize(&mut self, phrase: &str) -> String;
}

/// Chance that the simulator garbles one word of the phrase.
const ERROR_PROBABILITY: f64 = 0.3;

/// Echoes the target phrase back, occasionally dropping the first letter of
/// one word to mimic a recognition error.
pub struct SimulatedRecognizer {
    rng: StdRng,
}

impl SimulatedRecognizer {
    pub fn new() -> Self {
        Self { rng: StdRng::from_entropy() }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self { rng: StdRng::seed_from_u64(seed) }
    }
}

impl Default for SimulatedRecognizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Recognizer for SimulatedRecognizer {
    fn recognize(&mut self, phrase: &str) -> String {
        if self.rng.gen::<f64>() >= ERROR_PROBABILITY {
            return phrase.to_string();
        }
        let mut words: Vec<String> = phrase.split(' ').map(str::to_string).collect();
        if words.is_empty() {
            return phrase.to_string();
        }
        let target = self.rng.gen_range(0..words.len());
        let mut chars = words[target].chars();
        chars.next();
        words[target] = chars.as_str().to_string();
        words.join(" ")
    }
}
