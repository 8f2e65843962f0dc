use serde::{Deserialize, Serialize};

use crate::game::{BoxContent, ClickRecord, GameState, Outcome};

/// Tallied outcomes for one round.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeCounts {
    pub found_golden: usize,
    pub found: usize,
    pub empty: usize,
}

impl OutcomeCounts {
    pub fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::FoundGolden => self.found_golden += 1,
            Outcome::Found => self.found += 1,
            Outcome::Empty => self.empty += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.found_golden + self.found + self.empty
    }
}

/// Read-only projection of a session for rendering. `reveal` carries
/// the per-box contents and is only present once the round has ended,
/// so an active round never leaks its layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub state: GameState,
    pub generation: u64,
    pub counts: OutcomeCounts,
    pub log: Vec<ClickRecord>,
    pub reveal: Option<Vec<(u8, BoxContent)>>,
}

/// Immutable end-of-round result handed to the rendering adapter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinalTally {
    pub generation: u64,
    pub counts: OutcomeCounts,
    pub log: Vec<ClickRecord>,
    pub reveal: Vec<(u8, BoxContent)>,
}
