use dashmap::DashMap;

use boxhunt_models::{BoxLayout, FinalTally, Outcome, Player, Snapshot};

use crate::error::GameError;
use crate::session::GameSession;

/// Chat-keyed registry of game sessions. Each chat owns at most one
/// session (the latest generation); all validation and mutation for a
/// chat happens under that chat's map entry, so same-chat operations
/// serialize while different chats never contend on a shared lock.
///
/// Resolvers do no I/O and never block while holding an entry; callers
/// render and send from the returned snapshot afterwards.
pub struct SessionStore {
    sessions: DashMap<i64, GameSession>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self {
            sessions: DashMap::new(),
        }
    }

    /// Start a new round in a chat, replacing any ended or idle
    /// session. Fails with `AlreadyActive` while a round is running,
    /// leaving the running round untouched.
    pub fn start_new_round(&self, chat_id: i64, layout: BoxLayout) -> Result<Snapshot, GameError> {
        let surprises = layout.surprise.len();
        let mut entry = self
            .sessions
            .entry(chat_id)
            .or_insert_with(|| GameSession::idle(chat_id));
        let session = entry.value_mut();
        session.start(layout)?;
        tracing::info!(
            chat_id,
            generation = session.generation,
            surprises,
            "round started"
        );
        Ok(session.project())
    }

    /// Resolve one player's click against the chat's active session.
    /// A missing session reads as `NotActive`.
    pub fn resolve_click(
        &self,
        chat_id: i64,
        player: &Player,
        box_id: u8,
    ) -> Result<(Outcome, Snapshot), GameError> {
        let mut session = self.sessions.get_mut(&chat_id).ok_or(GameError::NotActive)?;
        let outcome = session.resolve_click(player, box_id)?;
        Ok((outcome, session.project()))
    }

    /// End the chat's active round on behalf of `requester_id`.
    pub fn end_round(&self, chat_id: i64, requester_id: i64) -> Result<FinalTally, GameError> {
        let mut session = self.sessions.get_mut(&chat_id).ok_or(GameError::NotActive)?;
        let tally = session.end(requester_id)?;
        tracing::info!(
            chat_id,
            generation = tally.generation,
            players = tally.counts.total(),
            "round ended"
        );
        Ok(tally)
    }

    /// Snapshot of the chat's current session, if it has ever played.
    pub fn current(&self, chat_id: i64) -> Option<Snapshot> {
        self.sessions.get(&chat_id).map(|s| s.project())
    }

    pub fn chat_count(&self) -> usize {
        self.sessions.len()
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use boxhunt_models::GameState;
    use std::sync::Arc;

    fn layout() -> BoxLayout {
        BoxLayout {
            surprise: [2, 5, 7].into_iter().collect(),
            golden: [5].into_iter().collect(),
        }
    }

    #[test]
    fn click_without_a_session_reads_as_not_active() {
        let store = SessionStore::new();
        let err = store
            .resolve_click(1, &Player::new(10, "A"), 3)
            .unwrap_err();
        assert_eq!(err, GameError::NotActive);
        assert_eq!(store.end_round(1, 10).unwrap_err(), GameError::NotActive);
        assert!(store.current(1).is_none());
    }

    #[test]
    fn start_twice_without_end_fails_second_time() {
        let store = SessionStore::new();
        let first = store.start_new_round(1, layout()).unwrap();
        assert_eq!(first.generation, 1);

        let err = store.start_new_round(1, layout()).unwrap_err();
        assert_eq!(err, GameError::AlreadyActive);
        assert_eq!(store.current(1).unwrap().generation, 1);
    }

    #[test]
    fn new_round_after_end_supersedes_the_old_log() {
        let store = SessionStore::new();
        store.start_new_round(1, layout()).unwrap();
        store.resolve_click(1, &Player::new(10, "A"), 5).unwrap();
        store.end_round(1, 10).unwrap();

        let snapshot = store.start_new_round(1, layout()).unwrap();
        assert_eq!(snapshot.generation, 2);
        assert_eq!(snapshot.state, GameState::Active);
        assert!(snapshot.log.is_empty());
    }

    #[test]
    fn chats_are_independent() {
        let store = SessionStore::new();
        store.start_new_round(1, layout()).unwrap();
        store.start_new_round(2, layout()).unwrap();
        store.resolve_click(1, &Player::new(10, "A"), 5).unwrap();

        assert_eq!(store.current(1).unwrap().log.len(), 1);
        assert!(store.current(2).unwrap().log.is_empty());
        assert_eq!(store.chat_count(), 2);
    }

    #[test]
    fn concurrent_distinct_players_are_all_recorded() {
        let store = Arc::new(SessionStore::new());
        store.start_new_round(1, layout()).unwrap();

        let handles: Vec<_> = (0..16)
            .map(|i| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    let player = Player::new(i, format!("p{i}"));
                    let box_id = (i % 9 + 1) as u8;
                    store.resolve_click(1, &player, box_id).unwrap()
                })
            })
            .collect();
        for handle in handles {
            let (outcome, _) = handle.join().unwrap();
            let _ = outcome;
        }

        let snapshot = store.current(1).unwrap();
        assert_eq!(snapshot.log.len(), 16);
        assert_eq!(snapshot.counts.total(), 16);
        // Every click classified against the layout fixed at start.
        for record in &snapshot.log {
            let expected = match record.box_id {
                5 => Outcome::FoundGolden,
                2 | 7 => Outcome::Found,
                _ => Outcome::Empty,
            };
            assert_eq!(record.outcome, expected);
        }
    }

    #[test]
    fn concurrent_same_player_is_accepted_exactly_once() {
        let store = Arc::new(SessionStore::new());
        store.start_new_round(1, layout()).unwrap();

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    store
                        .resolve_click(1, &Player::new(42, "dupe"), 3)
                        .is_ok()
                })
            })
            .collect();
        let accepted = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|ok| *ok)
            .count();

        assert_eq!(accepted, 1);
        assert_eq!(store.current(1).unwrap().log.len(), 1);
    }
}
