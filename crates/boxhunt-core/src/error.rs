use thiserror::Error;

/// Every way a game operation can fail. All variants are user-facing
/// and non-fatal; the adapter renders them as chat messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("this game can only be played in a group chat")]
    NotAGroupChat,
    #[error("a round is already in progress")]
    AlreadyActive,
    #[error("no round is running in this chat")]
    NotActive,
    #[error("that is not a box on the board")]
    InvalidBoxId,
    #[error("each player only gets one click per round")]
    DuplicateParticipant,
    #[error("only someone who clicked a box can end the round")]
    RequesterNotParticipant,
}
