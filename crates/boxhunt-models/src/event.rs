use serde::{Deserialize, Serialize};

use crate::game::Player;

/// Chat context a command arrived from, as reported by the transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatKind {
    Private,
    Group,
    Supergroup,
    Channel,
    #[serde(other)]
    Other,
}

impl ChatKind {
    /// The game is only playable in multi-member chats.
    pub fn is_group(&self) -> bool {
        matches!(self, ChatKind::Group | ChatKind::Supergroup)
    }
}

/// Boundary event produced by the transport adapter. The core never
/// sees adapter-specific update shapes, only these variants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    /// `/start` — informational, mutates nothing.
    Start { chat_id: i64, player: Player },
    /// `/start_game` or the play-again button.
    StartGame {
        chat_id: i64,
        player: Player,
        chat_kind: ChatKind,
    },
    /// A box button press; `token` is the raw callback payload.
    BoxClick {
        chat_id: i64,
        player: Player,
        token: String,
    },
    /// The end-game button press.
    EndGame { chat_id: i64, player: Player },
}
