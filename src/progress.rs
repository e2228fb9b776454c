//! Gamified progression: XP accumulation, leveling, practice counters

use serde::{Deserialize, Serialize};
use tracing::info;

/// Persistent progression state. `streak` is stored but never mutated here;
/// a daily-cadence collaborator owns it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    pub level: u32,
    pub xp: u32,
    pub xp_to_next_level: u32,
    pub streak: u32,
    pub practiced: u32,
}

impl Default for Progress {
    fn default() -> Self {
        Self { level: 1, xp: 0, xp_to_next_level: 100, streak: 0, practiced: 0 }
    }
}

/// What a single [`Progress::update`] did, surfaced to the caller so the
/// presentation layer can announce level-ups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressUpdate {
    pub xp_gained: u32,
    pub new_level: Option<u32>,
}

/// XP awarded for an attempt score.
pub fn xp_for_score(score: u8) -> u32 {
    if score >= 90 {
        20
    } else if score >= 70 {
        10
    } else {
        5
    }
}

impl Progress {
    /// Whether the stored invariants hold: a positive threshold with the
    /// current XP strictly below it. Reloaded state that fails this is
    /// discarded in favor of the default.
    pub fn is_valid(&self) -> bool {
        self.xp_to_next_level > 0 && self.xp < self.xp_to_next_level
    }

    /// Apply one completed attempt.
    ///
    /// Levels up at most once per call, even when the gained XP would span
    /// multiple thresholds; the XP remainder is taken against the pre-update
    /// threshold. `0 <= xp < xp_to_next_level` holds afterwards.
    pub fn update(&mut self, score: u8) -> ProgressUpdate {
        let xp_gained = xp_for_score(score);
        let new_xp = self.xp + xp_gained;
        let old_threshold = self.xp_to_next_level;

        let mut new_level = None;
        if new_xp >= old_threshold {
            self.level += 1;
            self.xp_to_next_level = (old_threshold as f64 * 1.5).round() as u32;
            new_level = Some(self.level);
            info!(level = self.level, "level up");
        }

        self.xp = new_xp % old_threshold;
        self.practiced += 1;
        ProgressUpdate { xp_gained, new_level }
    }
}
