//! Bounded, newest-first log of practice attempts

use serde::{Deserialize, Serialize};

use crate::phrases::LanguageCode;

/// Oldest entries beyond this are discarded.
pub const HISTORY_CAPACITY: usize = 20;

/// One completed recording-to-feedback cycle. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttemptResult {
    pub phrase: String,
    pub spoken: String,
    pub similarity: u8,
    pub feedback: String,
    /// ISO-8601 timestamp of when the attempt completed.
    pub timestamp: String,
    pub language: LanguageCode,
}

/// Practice history, most recent attempt first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct History {
    entries: Vec<AttemptResult>,
}

impl History {
    /// Insert at the front, dropping the oldest entry past capacity.
    pub fn push(&mut self, result: AttemptResult) {
        self.entries.insert(0, result);
        self.entries.truncate(HISTORY_CAPACITY);
    }

    pub fn iter(&self) -> impl Iterator<Item = &AttemptResult> {
        self.entries.iter()
    }

    pub fn latest(&self) -> Option<&AttemptResult> {
        self.entries.first()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
