//! Error taxonomy for the practice core
//!
//! Nothing here is fatal to a session: collaborator failures fall back to
//! deterministic paths, and corrupt persisted state reverts to defaults.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("generation request failed: {0}")]
    Generation(#[from] reqwest::Error),

    #[error("generation response carried no content")]
    EmptyGeneration,

    #[error("a recording is already in progress")]
    RecorderBusy,

    #[error("no phrase selected to practice")]
    NoPhrase,
}
