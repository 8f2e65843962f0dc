use boxhunt_models::{
    AssignmentConfig, BoxLayout, FinalTally, GameEvent, Outcome, Player, Snapshot, BOX_MAX,
    BOX_MIN,
};

use crate::error::GameError;
use crate::store::SessionStore;

/// What the adapter should render in response to an event.
#[derive(Debug, Clone)]
pub enum GameReply {
    /// `/start` — static usage hint, no game state involved.
    Help,
    RoundStarted(Snapshot),
    Clicked {
        player: Player,
        outcome: Outcome,
        snapshot: Snapshot,
    },
    RoundEnded(FinalTally),
}

/// Routes boundary events into the session store. This is the only
/// entry point the transport adapter calls; it owns the group-chat
/// guard, token parsing and layout sampling, so the store deals purely
/// in validated values.
pub struct GameService {
    store: SessionStore,
    assignment: AssignmentConfig,
}

impl GameService {
    pub fn new(assignment: AssignmentConfig) -> Self {
        Self {
            store: SessionStore::new(),
            assignment,
        }
    }

    pub fn handle(&self, event: GameEvent) -> Result<GameReply, GameError> {
        match event {
            GameEvent::Start { .. } => Ok(GameReply::Help),
            GameEvent::StartGame {
                chat_id, chat_kind, ..
            } => {
                if !chat_kind.is_group() {
                    return Err(GameError::NotAGroupChat);
                }
                let layout = BoxLayout::assign(&self.assignment, &mut rand::thread_rng());
                self.store
                    .start_new_round(chat_id, layout)
                    .map(GameReply::RoundStarted)
            }
            GameEvent::BoxClick {
                chat_id,
                player,
                token,
            } => {
                let box_id = parse_box_token(&token)?;
                self.store
                    .resolve_click(chat_id, &player, box_id)
                    .map(|(outcome, snapshot)| GameReply::Clicked {
                        player,
                        outcome,
                        snapshot,
                    })
            }
            GameEvent::EndGame { chat_id, player } => self
                .store
                .end_round(chat_id, player.user_id)
                .map(GameReply::RoundEnded),
        }
    }

    /// Current status of a chat's round, for re-rendering.
    pub fn status(&self, chat_id: i64) -> Option<Snapshot> {
        self.store.current(chat_id)
    }
}

/// Callback tokens come in as raw strings; anything that is not an
/// integer in `1..=9` is an invalid box, never a parse panic.
fn parse_box_token(token: &str) -> Result<u8, GameError> {
    token
        .trim()
        .parse::<u8>()
        .ok()
        .filter(|id| (BOX_MIN..=BOX_MAX).contains(id))
        .ok_or(GameError::InvalidBoxId)
}
