use std::time::Duration;

use boxhunt_models::ChatKind;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
/// Slack on top of the long-poll wait so the HTTP timeout never fires
/// before Telegram's own.
const POLL_SLACK: Duration = Duration::from_secs(15);

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("encode error: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("telegram api error: {0}")]
    Api(String),
}

#[derive(Debug, Clone, Deserialize)]
pub struct Update {
    pub update_id: i64,
    #[serde(default)]
    pub message: Option<Message>,
    #[serde(default)]
    pub callback_query: Option<CallbackQuery>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Message {
    pub message_id: i64,
    #[serde(default)]
    pub from: Option<User>,
    pub chat: Chat,
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Chat {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: ChatKind,
}

#[derive(Debug, Clone, Deserialize)]
pub struct User {
    pub id: i64,
    pub first_name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CallbackQuery {
    pub id: String,
    pub from: User,
    /// Absent when the originating message is too old for Telegram to
    /// include it.
    #[serde(default)]
    pub message: Option<Message>,
    #[serde(default)]
    pub data: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct InlineKeyboardMarkup {
    pub inline_keyboard: Vec<Vec<InlineKeyboardButton>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct InlineKeyboardButton {
    pub text: String,
    pub callback_data: String,
}

#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
    ok: bool,
    result: Option<T>,
    description: Option<String>,
}

/// Minimal Telegram Bot API client: long-polling in, message edits out.
#[derive(Debug, Clone)]
pub struct BotApi {
    http: reqwest::Client,
    base: String,
}

impl BotApi {
    pub fn new(api_url: &str, token: &str, poll_timeout_secs: u64) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(Duration::from_secs(poll_timeout_secs) + POLL_SLACK)
            .user_agent("boxhunt-bot/0.3")
            .build()?;
        Ok(Self {
            http,
            base: format!("{}/bot{}", api_url.trim_end_matches('/'), token),
        })
    }

    async fn call<T: DeserializeOwned>(
        &self,
        method: &str,
        payload: &serde_json::Value,
    ) -> Result<T, ApiError> {
        let url = format!("{}/{}", self.base, method);
        let resp: ApiResponse<T> = self
            .http
            .post(&url)
            .json(payload)
            .send()
            .await?
            .json()
            .await?;
        if resp.ok {
            resp.result
                .ok_or_else(|| ApiError::Api(format!("{method}: response missing result")))
        } else {
            Err(ApiError::Api(
                resp.description
                    .unwrap_or_else(|| format!("{method} failed")),
            ))
        }
    }

    pub async fn get_updates(&self, offset: i64, timeout_secs: u64) -> Result<Vec<Update>, ApiError> {
        self.call(
            "getUpdates",
            &serde_json::json!({
                "offset": offset,
                "timeout": timeout_secs,
                "allowed_updates": ["message", "callback_query"],
            }),
        )
        .await
    }

    pub async fn send_message(
        &self,
        chat_id: i64,
        text: &str,
        reply_markup: Option<&InlineKeyboardMarkup>,
    ) -> Result<Message, ApiError> {
        let mut payload = serde_json::json!({ "chat_id": chat_id, "text": text });
        if let Some(markup) = reply_markup {
            payload["reply_markup"] = serde_json::to_value(markup)?;
        }
        self.call("sendMessage", &payload).await
    }

    pub async fn edit_message_text(
        &self,
        chat_id: i64,
        message_id: i64,
        text: &str,
        reply_markup: Option<&InlineKeyboardMarkup>,
    ) -> Result<(), ApiError> {
        let mut payload = serde_json::json!({
            "chat_id": chat_id,
            "message_id": message_id,
            "text": text,
        });
        if let Some(markup) = reply_markup {
            payload["reply_markup"] = serde_json::to_value(markup)?;
        }
        // Result is the edited Message or `true`; we need neither.
        self.call::<serde_json::Value>("editMessageText", &payload)
            .await
            .map(|_| ())
    }

    pub async fn answer_callback_query(&self, callback_query_id: &str) -> Result<(), ApiError> {
        self.call::<bool>(
            "answerCallbackQuery",
            &serde_json::json!({ "callback_query_id": callback_query_id }),
        )
        .await
        .map(|_| ())
    }
}
