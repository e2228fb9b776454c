//! EchoLingo Core - Rust engine for pronunciation practice
//!
//! Scores a spoken rendition of a target phrase, flags likely mispronounced
//! words, produces localized feedback, and tracks a gamified progression
//! (level/XP/streak) with persisted history.

mod error;
mod feedback;
mod history;
mod mismatch;
mod phrases;
mod progress;
mod recognize;
mod score;
mod session;
mod store;
mod text;

pub use error::CoreError;
pub use feedback::{resolve_feedback, select_feedback, FeedbackGenerator, GroqGenerator};
pub use history::{AttemptResult, History, HISTORY_CAPACITY};
pub use mismatch::find_mismatches;
pub use phrases::{LanguageCode, Phrase, PhrasePool, PhraseSource};
pub use progress::{xp_for_score, Progress, ProgressUpdate};
pub use recognize::{Recognizer, SimulatedRecognizer};
pub use score::{edit_distance, similarity};
pub use session::{AttemptOutcome, PracticeSession, RecordingState};
pub use store::KvStore;
pub use text::{normalize, tokenize};
