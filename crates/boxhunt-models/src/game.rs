use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lowest valid box id on the keyboard.
pub const BOX_MIN: u8 = 1;
/// Highest valid box id on the keyboard.
pub const BOX_MAX: u8 = 9;

/// Lifecycle state of one round within a chat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameState {
    Idle,
    Active,
    Ended,
}

/// Per-player classification of their single click.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    FoundGolden,
    Found,
    Empty,
}

/// What a box turns out to hold, used for the end-of-round reveal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoxContent {
    Golden,
    Surprise,
    Empty,
}

/// A player as seen at the boundary. Identity is the numeric id;
/// the display name is carried only for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub user_id: i64,
    pub display_name: String,
}

impl Player {
    pub fn new(user_id: i64, display_name: impl Into<String>) -> Self {
        Self {
            user_id,
            display_name: display_name.into(),
        }
    }
}

/// One resolved click, in the order it was accepted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClickRecord {
    pub user_id: i64,
    pub display_name: String,
    pub box_id: u8,
    pub outcome: Outcome,
    pub at: DateTime<Utc>,
}
