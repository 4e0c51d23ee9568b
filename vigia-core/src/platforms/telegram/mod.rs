// File: src/platforms/telegram/mod.rs
//
// Telegram Bot API client. One long-lived reqwest client; API-level
// `ok=false` responses surface as Error::Telegram.

pub mod runtime;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;

use super::ChatTransport;
use crate::Error;

/// One item from `getUpdates` or a webhook push. Both delivery modes
/// deserialize into this same shape.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Update {
    pub update_id: i64,
    #[serde(default)]
    pub message: Option<Message>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Message {
    pub message_id: i64,
    #[serde(default)]
    pub from: Option<Sender>,
    pub chat: Chat,
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Chat {
    pub id: i64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Sender {
    pub id: i64,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
    ok: bool,
    result: Option<T>,
    #[serde(default)]
    description: Option<String>,
}

pub struct TelegramPlatform {
    client: reqwest::Client,
    base_url: String,
}

impl TelegramPlatform {
    pub fn new(bot_token: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: format!("https://api.telegram.org/bot{}", bot_token),
        }
    }

    async fn call<T: serde::de::DeserializeOwned>(
        &self,
        method: &str,
        body: serde_json::Value,
    ) -> Result<T, Error> {
        let url = format!("{}/{}", self.base_url, method);
        let resp = self.client.post(&url).json(&body).send().await?;
        let api: ApiResponse<T> = resp.json().await?;
        if !api.ok {
            let desc = api.description.unwrap_or_else(|| "no description".to_string());
            return Err(Error::Telegram(format!("{} failed: {}", method, desc)));
        }
        api.result
            .ok_or_else(|| Error::Telegram(format!("{} returned ok without a result", method)))
    }

    async fn send(&self, chat_id: i64, text: &str, markdown: bool) -> Result<(), Error> {
        let mut body = json!({
            "chat_id": chat_id,
            "text": text,
        });
        if markdown {
            body["parse_mode"] = json!("Markdown");
        }
        debug!("sendMessage to chat {} ({} chars)", chat_id, text.len());
        let _: Message = self.call("sendMessage", body).await?;
        Ok(())
    }

    /// Long-poll for new updates starting at `offset`.
    pub async fn get_updates(&self, offset: i64, timeout_secs: u64) -> Result<Vec<Update>, Error> {
        let body = json!({
            "offset": offset,
            "timeout": timeout_secs,
            "allowed_updates": ["message"],
        });
        self.call("getUpdates", body).await
    }
}

#[async_trait]
impl ChatTransport for TelegramPlatform {
    async fn send_message(&self, chat_id: i64, text: &str) -> Result<(), Error> {
        self.send(chat_id, text, false).await
    }

    async fn send_markdown(&self, chat_id: i64, text: &str) -> Result<(), Error> {
        self.send(chat_id, text, true).await
    }
}
