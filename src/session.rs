//! Practice session: owns all mutable state and drives the recording
//! lifecycle
//!
//! One session per user; operations are invoked sequentially in reaction to
//! user events. History, progress, and language selections are persisted on
//! every mutation and reloaded when the session is opened.

use chrono::{SecondsFormat, Utc};
use tracing::{info, warn};

use crate::error::CoreError;
use crate::feedback::{resolve_feedback, FeedbackGenerator, GroqGenerator};
use crate::history::{AttemptResult, History};
use crate::mismatch::find_mismatches;
use crate::phrases::{LanguageCode, Phrase, PhrasePool, PhraseSource};
use crate::progress::{Progress, ProgressUpdate};
use crate::recognize::{Recognizer, SimulatedRecognizer};
use crate::score::similarity;
use crate::store::{
    KvStore, KEY_FEEDBACK_LANGUAGE, KEY_GROQ_API_KEY, KEY_HISTORY, KEY_PRACTICE_LANGUAGE,
    KEY_PROGRESS,
};

/// Recording lifecycle. A new recording can only start from `Idle`;
/// `Processing` always completes to an attempt result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordingState {
    Idle,
    Recording,
    Processing,
}

/// Everything a completed attempt produced, for the presentation layer.
#[derive(Debug, Clone)]
pub struct AttemptOutcome {
    pub result: AttemptResult,
    pub update: ProgressUpdate,
}

pub struct PracticeSession {
    store: KvStore,
    practice_language: LanguageCode,
    feedback_language: LanguageCode,
    current_phrase: Option<Phrase>,
    history: History,
    progress: Progress,
    state: RecordingState,
    phrase_source: Box<dyn PhraseSource>,
    fallback_pool: PhrasePool,
    recognizer: Box<dyn Recognizer>,
    generator: Option<Box<dyn FeedbackGenerator>>,
}

impl PracticeSession {
    /// Open a session over the given store, reloading all persisted state.
    /// Corrupt stored values revert to defaults rather than failing.
    pub fn open(store: KvStore) -> Result<Self, CoreError> {
        let history = store.load_json(KEY_HISTORY)?;
        let mut progress: Progress = store.load_json(KEY_PROGRESS)?;
        if !progress.is_valid() {
            warn!("discarding stored progress with broken invariants");
            progress = Progress::default();
        }
        let practice_language = store
            .get(KEY_PRACTICE_LANGUAGE)?
            .map(|code| LanguageCode::from_code(&code))
            .unwrap_or_default();
        let feedback_language = store
            .get(KEY_FEEDBACK_LANGUAGE)?
            .map(|code| LanguageCode::from_code(&code))
            .unwrap_or_default();
        let generator: Option<Box<dyn FeedbackGenerator>> = store
            .get(KEY_GROQ_API_KEY)?
            .filter(|key| !key.trim().is_empty())
            .map(|key| Box::new(GroqGenerator::new(key)) as Box<dyn FeedbackGenerator>);

        Ok(Self {
            store,
            practice_language,
            feedback_language,
            current_phrase: None,
            history,
            progress,
            state: RecordingState::Idle,
            phrase_source: Box::new(PhrasePool::new()),
            fallback_pool: PhrasePool::new(),
            recognizer: Box::new(SimulatedRecognizer::new()),
            generator,
        })
    }

    pub fn with_phrase_source(mut self, source: Box<dyn PhraseSource>) -> Self {
        self.phrase_source = source;
        self
    }

    pub fn with_recognizer(mut self, recognizer: Box<dyn Recognizer>) -> Self {
        self.recognizer = recognizer;
        self
    }

    pub fn with_generator(mut self, generator: Box<dyn FeedbackGenerator>) -> Self {
        self.generator = Some(generator);
        self
    }

    pub fn state(&self) -> RecordingState {
        self.state
    }

    pub fn current_phrase(&self) -> Option<&Phrase> {
        self.current_phrase.as_ref()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn progress(&self) -> &Progress {
        &self.progress
    }

    pub fn practice_language(&self) -> LanguageCode {
        self.practice_language
    }

    pub fn feedback_language(&self) -> LanguageCode {
        self.feedback_language
    }

    /// Replace the current phrase with a fresh one in the practice language.
    /// An external source failure falls back to the built-in pool.
    pub fn new_phrase(&mut self) -> Result<&Phrase, CoreError> {
        self.ensure_idle()?;
        let text = match self.phrase_source.get_phrase(self.practice_language) {
            Ok(text) => text,
            Err(err) => {
                warn!(%err, "phrase source failed, using built-in pool");
                self.fallback_pool.pick(self.practice_language)
            }
        };
        let language = self.practice_language;
        Ok(self.current_phrase.insert(Phrase { text, language }))
    }

    /// Idle -> Recording. Rejected while an attempt is in flight or before
    /// any phrase has been selected.
    pub fn start_recording(&mut self) -> Result<(), CoreError> {
        self.ensure_idle()?;
        if self.current_phrase.is_none() {
            return Err(CoreError::NoPhrase);
        }
        self.state = RecordingState::Recording;
        info!("recording started");
        Ok(())
    }

    /// Recording -> Processing -> Idle, synchronously completing the attempt.
    /// Stopping while not recording is a no-op. Once processing begins it
    /// always completes to an [`AttemptOutcome`].
    pub fn stop_recording(&mut self) -> Result<Option<AttemptOutcome>, CoreError> {
        if self.state != RecordingState::Recording {
            return Ok(None);
        }
        self.state = RecordingState::Processing;

        // The phrase cannot change while an attempt is in flight.
        let phrase = match self.current_phrase.clone() {
            Some(phrase) => phrase,
            None => {
                self.state = RecordingState::Idle;
                return Err(CoreError::NoPhrase);
            }
        };
        let spoken = self.recognizer.recognize(&phrase.text);
        let outcome = self.finish_attempt(&phrase, spoken)?;
        self.state = RecordingState::Idle;
        Ok(Some(outcome))
    }

    fn finish_attempt(&mut self, phrase: &Phrase, spoken: String) -> Result<AttemptOutcome, CoreError> {
        let score = similarity(&phrase.text, &spoken);
        let mismatches = find_mismatches(&phrase.text, &spoken);
        let feedback = resolve_feedback(
            self.generator.as_deref(),
            score,
            &mismatches,
            &phrase.text,
            &spoken,
            self.feedback_language,
        );

        let result = AttemptResult {
            phrase: phrase.text.clone(),
            spoken,
            similarity: score,
            feedback,
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            language: phrase.language,
        };

        self.history.push(result.clone());
        self.store.save_json(KEY_HISTORY, &self.history)?;

        let update = self.progress.update(score);
        self.store.save_json(KEY_PROGRESS, &self.progress)?;

        info!(score, practiced = self.progress.practiced, "attempt completed");
        Ok(AttemptOutcome { result, update })
    }

    pub fn clear_history(&mut self) -> Result<(), CoreError> {
        self.ensure_idle()?;
        self.history.clear();
        self.store.save_json(KEY_HISTORY, &self.history)
    }

    /// Switch the practice language. The current phrase belongs to the old
    /// language, so it is dropped; callers request a new one.
    pub fn set_practice_language(&mut self, language: LanguageCode) -> Result<(), CoreError> {
        self.ensure_idle()?;
        self.practice_language = language;
        self.current_phrase = None;
        self.store.put(KEY_PRACTICE_LANGUAGE, language.code())
    }

    pub fn set_feedback_language(&mut self, language: LanguageCode) -> Result<(), CoreError> {
        self.ensure_idle()?;
        self.feedback_language = language;
        self.store.put(KEY_FEEDBACK_LANGUAGE, language.code())
    }

    /// Store or clear the generation credential; the external generator is
    /// only used while a credential is present.
    pub fn set_api_key(&mut self, key: Option<&str>) -> Result<(), CoreError> {
        self.ensure_idle()?;
        match key.map(str::trim).filter(|k| !k.is_empty()) {
            Some(key) => {
                self.store.put(KEY_GROQ_API_KEY, key)?;
                self.generator = Some(Box::new(GroqGenerator::new(key)));
            }
            None => {
                self.store.delete(KEY_GROQ_API_KEY)?;
                self.generator = None;
            }
        }
        Ok(())
    }

    fn ensure_idle(&self) -> Result<(), CoreError> {
        if self.state == RecordingState::Idle {
            Ok(())
        } else {
            Err(CoreError::RecorderBusy)
        }
    }
}
