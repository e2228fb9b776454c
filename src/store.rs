//! Durable key-value storage over SQLite

use rusqlite::{params, Connection, OptionalExtension};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::warn;

use crate::error::CoreError;

pub const KEY_HISTORY: &str = "practice_history";
pub const KEY_PROGRESS: &str = "user_progress";
pub const KEY_PRACTICE_LANGUAGE: &str = "practice_language";
pub const KEY_FEEDBACK_LANGUAGE: &str = "feedback_language";
pub const KEY_GROQ_API_KEY: &str = "groq_api_key";

/// Single-table key-value store. Each value is rewritten whole whenever its
/// in-memory counterpart changes.
pub struct KvStore {
    conn: Connection,
}

impl KvStore {
    pub fn open(path: &str) -> Result<Self, CoreError> {
        Self::init(Connection::open(path)?)
    }

    /// Non-durable store for tests and throwaway sessions.
    pub fn open_in_memory() -> Result<Self, CoreError> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self, CoreError> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS kv (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            )",
            [],
        )?;
        Ok(Self { conn })
    }

    pub fn get(&self, key: &str) -> Result<Option<String>, CoreError> {
        let value = self
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| row.get(0))
            .optional()?;
        Ok(value)
    }

    pub fn put(&self, key: &str, value: &str) -> Result<(), CoreError> {
        self.conn.execute(
            "INSERT INTO kv (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, value],
        )?;
        Ok(())
    }

    pub fn delete(&self, key: &str) -> Result<(), CoreError> {
        self.conn.execute("DELETE FROM kv WHERE key = ?1", params![key])?;
        Ok(())
    }

    /// Load a JSON-serialized value, reverting to the default when the key
    /// is absent or the stored text no longer parses.
    pub fn load_json<T: DeserializeOwned + Default>(&self, key: &str) -> Result<T, CoreError> {
        match self.get(key)? {
            None => Ok(T::default()),
            Some(raw) => match serde_json::from_str(&raw) {
                Ok(value) => Ok(value),
                Err(err) => {
                    warn!(key, %err, "discarding unparsable stored value");
                    Ok(T::default())
                }
            },
        }
    }

    pub fn save_json<T: Serialize>(&self, key: &str, value: &T) -> Result<(), CoreError> {
        self.put(key, &serde_json::to_string(value)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::{AttemptResult, History};
    use crate::phrases::LanguageCode;
    use crate::progress::Progress;

    #[test]
    fn put_then_get_round_trips() {
        let store = KvStore::open_in_memory().unwrap();
        store.put("k", "v1").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v1"));
        store.put("k", "v2").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v2"));
    }

    #[test]
    fn missing_key_is_none() {
        let store = KvStore::open_in_memory().unwrap();
        assert_eq!(store.get("nope").unwrap(), None);
    }

    #[test]
    fn delete_removes_the_key() {
        let store = KvStore::open_in_memory().unwrap();
        store.put("k", "v").unwrap();
        store.delete("k").unwrap();
        assert_eq!(store.get("k").unwrap(), None);
    }

    #[test]
    fn progress_round_trips_losslessly() {
        let store = KvStore::open_in_memory().unwrap();
        let progress = Progress { level: 3, xp: 40, xp_to_next_level: 225, streak: 2, practiced: 31 };
        store.save_json(KEY_PROGRESS, &progress).unwrap();
        let restored: Progress = store.load_json(KEY_PROGRESS).unwrap();
        assert_eq!(restored, progress);
    }

    #[test]
    fn history_round_trips_losslessly() {
        let store = KvStore::open_in_memory().unwrap();
        let mut history = History::default();
        history.push(AttemptResult {
            phrase: "Le soleil brille aujourd'hui.".to_string(),
            spoken: "Le soleil brille aujourd'hui.".to_string(),
            similarity: 100,
            feedback: "Excellente prononciation ! Continuez comme ça.".to_string(),
            timestamp: "2025-06-01T10:00:00Z".to_string(),
            language: LanguageCode::FrFr,
        });
        store.save_json(KEY_HISTORY, &history).unwrap();
        let restored: History = store.load_json(KEY_HISTORY).unwrap();
        assert_eq!(restored, history);
    }

    #[test]
    fn corrupt_stored_value_reverts_to_default() {
        let store = KvStore::open_in_memory().unwrap();
        store.put(KEY_PROGRESS, "{not valid json").unwrap();
        let progress: Progress = store.load_json(KEY_PROGRESS).unwrap();
        assert_eq!(progress, Progress::default());
    }
}
