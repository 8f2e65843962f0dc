use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use boxhunt_core::{GameReply, GameService};
use boxhunt_models::{ChatKind, GameEvent, Player};

use crate::render;
use crate::telegram::{BotApi, CallbackQuery, Message, Update};

const POLL_RETRY_DELAY: Duration = Duration::from_secs(5);

/// Long-polls Telegram and fans updates out to the game service. Each
/// update runs in its own task, so a burst of clicks in one chat is
/// serialized by the session store rather than by this loop.
pub struct Dispatcher {
    api: Arc<BotApi>,
    service: Arc<GameService>,
    poll_timeout_secs: u64,
}

impl Dispatcher {
    pub fn new(api: BotApi, service: GameService, poll_timeout_secs: u64) -> Self {
        Self {
            api: Arc::new(api),
            service: Arc::new(service),
            poll_timeout_secs,
        }
    }

    pub async fn run(&self) -> Result<()> {
        let mut offset = 0i64;
        tracing::info!("polling for updates");
        loop {
            let updates = match self.api.get_updates(offset, self.poll_timeout_secs).await {
                Ok(updates) => updates,
                Err(e) => {
                    tracing::warn!(error = %e, "getUpdates failed, backing off");
                    tokio::time::sleep(POLL_RETRY_DELAY).await;
                    continue;
                }
            };
            for update in updates {
                offset = offset.max(update.update_id + 1);
                let api = Arc::clone(&self.api);
                let service = Arc::clone(&self.service);
                tokio::spawn(async move {
                    if let Err(e) = handle_update(&api, &service, update).await {
                        tracing::warn!(error = %e, "failed to handle update");
                    }
                });
            }
        }
    }
}

async fn handle_update(api: &BotApi, service: &GameService, update: Update) -> Result<()> {
    if let Some(message) = update.message {
        handle_command(api, service, message).await
    } else if let Some(query) = update.callback_query {
        handle_callback(api, service, query).await
    } else {
        Ok(())
    }
}

async fn handle_command(api: &BotApi, service: &GameService, message: Message) -> Result<()> {
    let Some(text) = message.text.as_deref() else {
        return Ok(());
    };
    let Some(from) = message.from else {
        return Ok(());
    };
    let chat_id = message.chat.id;
    let player = Player::new(from.id, from.first_name);

    let event = match command_name(text) {
        Some("start") => GameEvent::Start { chat_id, player },
        Some("start_game") => GameEvent::StartGame {
            chat_id,
            player,
            chat_kind: message.chat.kind,
        },
        _ => return Ok(()),
    };
    deliver(api, service, chat_id, None, event).await
}

async fn handle_callback(api: &BotApi, service: &GameService, query: CallbackQuery) -> Result<()> {
    api.answer_callback_query(&query.id).await?;

    let Some(data) = query.data else {
        return Ok(());
    };
    let Some(message) = query.message else {
        // Originating message too old to act on; nothing to edit.
        return Ok(());
    };
    let chat_id = message.chat.id;
    let player = Player::new(query.from.id, query.from.first_name);
    let event = callback_event(data, chat_id, message.chat.kind, player);
    deliver(api, service, chat_id, Some(message.message_id), event).await
}

fn callback_event(data: String, chat_id: i64, chat_kind: ChatKind, player: Player) -> GameEvent {
    match data.as_str() {
        render::CB_END_GAME => GameEvent::EndGame { chat_id, player },
        render::CB_PLAY_AGAIN => GameEvent::StartGame {
            chat_id,
            player,
            chat_kind,
        },
        _ => GameEvent::BoxClick {
            chat_id,
            player,
            token: data,
        },
    }
}

/// Run the event through the core and render the reply. All outbound
/// I/O happens here, after the store has released the chat's entry.
async fn deliver(
    api: &BotApi,
    service: &GameService,
    chat_id: i64,
    edit_target: Option<i64>,
    event: GameEvent,
) -> Result<()> {
    match service.handle(event) {
        Ok(GameReply::Help) => {
            api.send_message(chat_id, render::help_text(), None).await?;
        }
        Ok(GameReply::RoundStarted(_)) => {
            api.send_message(chat_id, render::game_text(), Some(&render::game_keyboard()))
                .await?;
        }
        Ok(GameReply::Clicked {
            player,
            outcome,
            snapshot,
        }) => {
            let text = render::click_text(&player.display_name, outcome, &snapshot);
            let keyboard = render::game_keyboard();
            match edit_target {
                Some(message_id) => {
                    api.edit_message_text(chat_id, message_id, &text, Some(&keyboard))
                        .await?;
                }
                None => {
                    api.send_message(chat_id, &text, Some(&keyboard)).await?;
                }
            }
        }
        Ok(GameReply::RoundEnded(tally)) => {
            let text = render::tally_text(&tally);
            let keyboard = render::final_keyboard();
            match edit_target {
                Some(message_id) => {
                    api.edit_message_text(chat_id, message_id, &text, Some(&keyboard))
                        .await?;
                }
                None => {
                    api.send_message(chat_id, &text, Some(&keyboard)).await?;
                }
            }
        }
        // Failures get their own message; the game message and its
        // keyboard stay as they were.
        Err(err) => {
            api.send_message(chat_id, &render::error_text(&err), None)
                .await?;
        }
    }
    Ok(())
}

/// `/start_game@SomeBot arg` -> `start_game`.
fn command_name(text: &str) -> Option<&str> {
    let first = text.split_whitespace().next()?;
    let command = first.strip_prefix('/')?;
    command.split('@').next()
}
