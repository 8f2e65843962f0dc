use boxhunt_core::GameError;
use boxhunt_models::{BoxContent, ClickRecord, FinalTally, Outcome, Snapshot, BOX_MAX, BOX_MIN};

use crate::telegram::{InlineKeyboardButton, InlineKeyboardMarkup};

pub const CB_END_GAME: &str = "end_game";
pub const CB_PLAY_AGAIN: &str = "play_again";

pub fn help_text() -> &'static str {
    "Send /start_game in a group chat to open a round of Find the Surprise."
}

pub fn game_text() -> &'static str {
    "Tap a box to find the surprise!"
}

/// The 3x3 box grid plus the end-game row.
pub fn game_keyboard() -> InlineKeyboardMarkup {
    let boxes: Vec<InlineKeyboardButton> = (BOX_MIN..=BOX_MAX)
        .map(|id| InlineKeyboardButton {
            text: "📦".into(),
            callback_data: id.to_string(),
        })
        .collect();
    let mut rows: Vec<Vec<InlineKeyboardButton>> =
        boxes.chunks(3).map(|row| row.to_vec()).collect();
    rows.push(vec![InlineKeyboardButton {
        text: "End game".into(),
        callback_data: CB_END_GAME.into(),
    }]);
    InlineKeyboardMarkup {
        inline_keyboard: rows,
    }
}

pub fn final_keyboard() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup {
        inline_keyboard: vec![vec![InlineKeyboardButton {
            text: "Play again".into(),
            callback_data: CB_PLAY_AGAIN.into(),
        }]],
    }
}

fn outcome_emoji(outcome: Outcome) -> &'static str {
    match outcome {
        Outcome::FoundGolden => "🏆",
        Outcome::Found => "🎁",
        Outcome::Empty => "❌",
    }
}

fn content_emoji(content: BoxContent) -> &'static str {
    match content {
        BoxContent::Golden => "🏆",
        BoxContent::Surprise => "🎁",
        BoxContent::Empty => "▫️",
    }
}

fn log_lines(log: &[ClickRecord]) -> String {
    log.iter()
        .map(|record| format!("{} {}", record.display_name, outcome_emoji(record.outcome)))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Game message body after an accepted click: the clicker's result on
/// top, then the running status in click order.
pub fn click_text(player_name: &str, outcome: Outcome, snapshot: &Snapshot) -> String {
    format!(
        "{} {}\n\nGame status:\n{}",
        player_name,
        outcome_emoji(outcome),
        log_lines(&snapshot.log)
    )
}

/// End-of-round message: counts, the full click log and the box reveal.
pub fn tally_text(tally: &FinalTally) -> String {
    let reveal_row = tally
        .reveal
        .iter()
        .map(|(id, content)| format!("{}{}", id, content_emoji(*content)))
        .collect::<Vec<_>>()
        .join("  ");
    let log = if tally.log.is_empty() {
        "Nobody clicked a box".to_string()
    } else {
        log_lines(&tally.log)
    };
    format!(
        "Game over!\n🏆 {}   🎁 {}   ❌ {}\n\n{}\n\nThe boxes held:\n{}",
        tally.counts.found_golden, tally.counts.found, tally.counts.empty, log, reveal_row
    )
}

pub fn error_text(err: &GameError) -> String {
    err.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use boxhunt_models::{GameState, OutcomeCounts};
    use chrono::Utc;

    fn record(name: &str, box_id: u8, outcome: Outcome) -> ClickRecord {
        ClickRecord {
            user_id: box_id as i64,
            display_name: name.into(),
            box_id,
            outcome,
            at: Utc::now(),
        }
    }

    #[test]
    fn game_keyboard_has_nine_boxes_and_an_end_row() {
        let markup = game_keyboard();
        assert_eq!(markup.inline_keyboard.len(), 4);
        let box_buttons: Vec<_> = markup.inline_keyboard[..3]
            .iter()
            .flatten()
            .collect();
        assert_eq!(box_buttons.len(), 9);
        let tokens: Vec<_> = box_buttons.iter().map(|b| b.callback_data.as_str()).collect();
        assert_eq!(tokens, ["1", "2", "3", "4", "5", "6", "7", "8", "9"]);
        assert_eq!(markup.inline_keyboard[3][0].callback_data, CB_END_GAME);
    }

    #[test]
    fn final_keyboard_offers_a_rematch() {
        let markup = final_keyboard();
        assert_eq!(markup.inline_keyboard.len(), 1);
        assert_eq!(markup.inline_keyboard[0][0].callback_data, CB_PLAY_AGAIN);
    }

    #[test]
    fn click_text_shows_result_and_running_status() {
        let snapshot = Snapshot {
            state: GameState::Active,
            generation: 1,
            counts: OutcomeCounts {
                found_golden: 1,
                found: 0,
                empty: 1,
            },
            log: vec![
                record("Alice", 5, Outcome::FoundGolden),
                record("Bob", 3, Outcome::Empty),
            ],
            reveal: None,
        };
        let text = click_text("Bob", Outcome::Empty, &snapshot);
        assert!(text.starts_with("Bob ❌"));
        assert!(text.contains("Alice 🏆"));
        assert!(text.contains("Bob ❌\n"));
    }

    #[test]
    fn tally_text_includes_counts_and_reveal() {
        let tally = FinalTally {
            generation: 1,
            counts: OutcomeCounts {
                found_golden: 1,
                found: 1,
                empty: 0,
            },
            log: vec![
                record("Alice", 5, Outcome::FoundGolden),
                record("Bob", 2, Outcome::Found),
            ],
            reveal: (1..=9u8)
                .map(|id| {
                    let content = match id {
                        5 => BoxContent::Golden,
                        2 | 7 => BoxContent::Surprise,
                        _ => BoxContent::Empty,
                    };
                    (id, content)
                })
                .collect(),
        };
        let text = tally_text(&tally);
        assert!(text.contains("🏆 1"));
        assert!(text.contains("🎁 1"));
        assert!(text.contains("5🏆"));
        assert!(text.contains("2🎁"));
        assert!(text.contains("Alice 🏆"));
    }
}
