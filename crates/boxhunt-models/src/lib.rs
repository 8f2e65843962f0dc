pub mod event;
pub mod game;
pub mod layout;
pub mod snapshot;

pub use event::{ChatKind, GameEvent};
pub use game::{BoxContent, ClickRecord, GameState, Outcome, Player, BOX_MAX, BOX_MIN};
pub use layout::{AssignmentConfig, BoxLayout, InvalidBounds};
pub use snapshot::{FinalTally, OutcomeCounts, Snapshot};
