//! Score submission payload and daily-seed derivation.
//!
//! The payload is everything an external validator needs to re-simulate a
//! run: the seed, the ordered replay log, and the claimed outcome. The
//! digest binds the log so storage corruption is detectable before a full
//! re-simulation is attempted.

use super::log::ReplayRecorder;
use crate::core::rng::hash_seed_string;
use crate::items::types::Item;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreSubmission {
    pub seed: u32,
    /// The human-entered seed string, when the run was seeded from one.
    pub seed_string: Option<String>,
    /// Content version the run was played against; the validator rejects
    /// submissions from a different pack shape.
    pub version: String,
    pub daily: bool,
    pub score: i64,
    pub depth: u32,
    pub items: Vec<Item>,
    pub replay_log: String,
    pub replay_digest: String,
}

impl ScoreSubmission {
    pub fn from_run(
        seed: u32,
        seed_string: Option<String>,
        version: &str,
        daily: bool,
        score: i64,
        depth: u32,
        items: Vec<Item>,
        recorder: &ReplayRecorder,
    ) -> Result<Self, serde_json::Error> {
        Ok(Self {
            seed,
            seed_string,
            version: version.to_string(),
            daily,
            score,
            depth,
            items,
            replay_log: recorder.to_json()?,
            replay_digest: recorder.digest()?,
        })
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Derive the shared daily seed for a date: SHA-256 over `secret:YYYY-MM-DD`,
/// first 16 hex chars as the seed string, folded to a u32 like any other
/// seed string. Every client with the same secret and date plays the same
/// dungeon.
pub fn daily_seed(secret: &str, date: NaiveDate) -> (String, u32) {
    let input = format!("{}:{}", secret, date.format("%Y-%m-%d"));
    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    let hex = format!("{:x}", hasher.finalize());
    let seed_string: String = hex.chars().take(16).collect();
    let seed = hash_seed_string(&seed_string);
    (seed_string, seed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::replay::log::ReplayEntry;

    #[test]
    fn test_daily_seed_is_stable_per_date() {
        let date = NaiveDate::from_ymd_opt(2026, 8, 30).unwrap();
        let (a_string, a_seed) = daily_seed("secret", date);
        let (b_string, b_seed) = daily_seed("secret", date);
        assert_eq!(a_string, b_string);
        assert_eq!(a_seed, b_seed);
        assert_eq!(a_string.len(), 16);
    }

    #[test]
    fn test_daily_seed_changes_with_date_and_secret() {
        let monday = NaiveDate::from_ymd_opt(2026, 8, 31).unwrap();
        let tuesday = NaiveDate::from_ymd_opt(2026, 9, 1).unwrap();
        assert_ne!(daily_seed("secret", monday), daily_seed("secret", tuesday));
        assert_ne!(daily_seed("secret", monday), daily_seed("other", monday));
    }

    #[test]
    fn test_submission_embeds_log_and_digest() {
        let mut recorder = ReplayRecorder::new();
        recorder.record(ReplayEntry::Room {
            depth: 1,
            milestone: false,
        });
        recorder.record(ReplayEntry::Exit { depth: 1 });
        let submission = ScoreSubmission::from_run(
            42,
            Some("exit-or-die".to_string()),
            "1.0.0",
            false,
            360,
            1,
            Vec::new(),
            &recorder,
        )
        .unwrap();
        assert_eq!(submission.replay_log, recorder.to_json().unwrap());
        assert_eq!(submission.replay_digest, recorder.digest().unwrap());

        let json = submission.to_json().unwrap();
        let back: ScoreSubmission = serde_json::from_str(&json).unwrap();
        assert_eq!(back, submission);
    }
}
