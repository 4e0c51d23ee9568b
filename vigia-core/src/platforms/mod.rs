// File: src/platforms/mod.rs

use async_trait::async_trait;

use crate::Error;

/// The outbound messaging collaborator. At-most-once semantics: a
/// failed send is logged by the caller and dropped, never retried.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChatTransport: Send + Sync {
    async fn send_message(&self, chat_id: i64, text: &str) -> Result<(), Error>;

    /// Rich-text (Markdown) mode, used for reports and status replies.
    async fn send_markdown(&self, chat_id: i64, text: &str) -> Result<(), Error>;
}

pub mod telegram;
