use std::collections::HashMap;

use chrono::{DateTime, Utc};

use boxhunt_models::{
    BoxContent, BoxLayout, ClickRecord, FinalTally, GameState, Outcome, OutcomeCounts, Player,
    Snapshot, BOX_MAX, BOX_MIN,
};

use crate::error::GameError;

/// One chat's game state. A session lives for as long as its chat has
/// an entry in the store; each `start` replaces the round's contents
/// and bumps the generation, so references into a prior round are
/// recognisably stale.
#[derive(Debug, Clone)]
pub struct GameSession {
    pub chat_id: i64,
    pub generation: u64,
    pub state: GameState,
    layout: BoxLayout,
    participants: HashMap<i64, Outcome>,
    log: Vec<ClickRecord>,
    pub started_at: Option<DateTime<Utc>>,
}

impl GameSession {
    /// A fresh idle session for a chat that has never played.
    pub fn idle(chat_id: i64) -> Self {
        Self {
            chat_id,
            generation: 0,
            state: GameState::Idle,
            layout: BoxLayout {
                surprise: Default::default(),
                golden: Default::default(),
            },
            participants: HashMap::new(),
            log: Vec::new(),
            started_at: None,
        }
    }

    /// Begin the next round. Fails while a round is active; from `Idle`
    /// or `Ended` it bumps the generation, installs the new layout and
    /// clears all per-round state.
    pub fn start(&mut self, layout: BoxLayout) -> Result<(), GameError> {
        if self.state == GameState::Active {
            return Err(GameError::AlreadyActive);
        }
        self.generation += 1;
        self.state = GameState::Active;
        self.layout = layout;
        self.participants.clear();
        self.log.clear();
        self.started_at = Some(Utc::now());
        Ok(())
    }

    /// Resolve one player's click. At most one click per player per
    /// generation; a rejected click leaves the session untouched.
    pub fn resolve_click(&mut self, player: &Player, box_id: u8) -> Result<Outcome, GameError> {
        if self.state != GameState::Active {
            return Err(GameError::NotActive);
        }
        if !(BOX_MIN..=BOX_MAX).contains(&box_id) {
            return Err(GameError::InvalidBoxId);
        }
        if self.participants.contains_key(&player.user_id) {
            return Err(GameError::DuplicateParticipant);
        }

        let outcome = match self.layout.classify(box_id) {
            BoxContent::Golden => Outcome::FoundGolden,
            BoxContent::Surprise => Outcome::Found,
            BoxContent::Empty => Outcome::Empty,
        };
        self.participants.insert(player.user_id, outcome);
        self.log.push(ClickRecord {
            user_id: player.user_id,
            display_name: player.display_name.clone(),
            box_id,
            outcome,
            at: Utc::now(),
        });
        Ok(outcome)
    }

    /// End the round. Only a player who clicked this generation may end
    /// it; afterwards the session is terminal until the next `start`.
    pub fn end(&mut self, requester_id: i64) -> Result<FinalTally, GameError> {
        if self.state != GameState::Active {
            return Err(GameError::NotActive);
        }
        if !self.participants.contains_key(&requester_id) {
            return Err(GameError::RequesterNotParticipant);
        }
        self.state = GameState::Ended;
        Ok(FinalTally {
            generation: self.generation,
            counts: self.counts(),
            log: self.log.clone(),
            reveal: self.reveal(),
        })
    }

    fn counts(&self) -> OutcomeCounts {
        let mut counts = OutcomeCounts::default();
        for outcome in self.participants.values() {
            counts.record(*outcome);
        }
        counts
    }

    fn reveal(&self) -> Vec<(u8, BoxContent)> {
        (BOX_MIN..=BOX_MAX)
            .map(|b| (b, self.layout.classify(b)))
            .collect()
    }

    /// Read-only projection for rendering. The layout reveal is only
    /// included once the round has ended.
    pub fn project(&self) -> Snapshot {
        Snapshot {
            state: self.state,
            generation: self.generation,
            counts: self.counts(),
            log: self.log.clone(),
            reveal: (self.state == GameState::Ended).then(|| self.reveal()),
        }
    }

    pub fn participant_count(&self) -> usize {
        self.participants.len()
    }

    pub fn outcome_of(&self, user_id: i64) -> Option<Outcome> {
        self.participants.get(&user_id).copied()
    }
}
