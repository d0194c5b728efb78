//! Append-only replay log.
//!
//! Every RNG-consuming decision and every state transition that affects
//! score or survival appends exactly one entry before the next randomness
//! draw. A validator walks the entries in order against a re-seeded RNG to
//! reproduce the run.

use crate::core::run_state::{ConsumableKind, HazardKind, MilestoneChoice};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// One recorded decision or event, tagged by action kind. Each variant
/// carries only the fields relevant to that action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ReplayEntry {
    Room { depth: u32, milestone: bool },
    Continue { depth: u32 },
    Exit { depth: u32 },
    Hazard { depth: u32, kind: HazardKind },
    Milestone { depth: u32, choice: MilestoneChoice },
    Loot { depth: u32, rarity: String, identity: String, value: i64 },
    Equip { depth: u32, slot: usize, identity: String },
    Bank { depth: u32, identity: String },
    Consumable { depth: u32, kind: ConsumableKind },
    Revive { depth: u32 },
    Death { depth: u32 },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReplayRecorder {
    entries: Vec<ReplayEntry>,
}

impl ReplayRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, entry: ReplayEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[ReplayEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Canonical JSON rendering of the log. Field order is fixed by the
    /// type definitions, so identical runs serialize byte-identically.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.entries)
    }

    /// SHA-256 hex digest of the canonical JSON.
    pub fn digest(&self) -> Result<String, serde_json::Error> {
        let json = self.to_json()?;
        let mut hasher = Sha256::new();
        hasher.update(json.as_bytes());
        Ok(format!("{:x}", hasher.finalize()))
    }
}
