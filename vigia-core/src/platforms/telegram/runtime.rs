// File: src/platforms/telegram/runtime.rs

use std::sync::Arc;
use tokio::time::{sleep, Duration};
use tracing::{error, info, warn};

use super::TelegramPlatform;
use crate::services::message_service::MessageService;

const POLL_TIMEOUT_SECS: u64 = 30;
const POLL_ERROR_BACKOFF: Duration = Duration::from_secs(5);

/// Spawns the `getUpdates` long-poll loop. Every update is funneled
/// through the same `MessageService` entry point the webhook uses.
/// Transport errors back off briefly and the loop keeps running.
pub fn spawn_polling_loop(
    platform: Arc<TelegramPlatform>,
    message_service: Arc<MessageService>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        info!("Telegram polling loop started");
        let mut offset: i64 = 0;
        loop {
            match platform.get_updates(offset, POLL_TIMEOUT_SECS).await {
                Ok(updates) => {
                    for update in updates {
                        offset = offset.max(update.update_id + 1);
                        if let Err(e) = message_service.process_update(&update).await {
                            error!("Failed to process update {}: {:?}", update.update_id, e);
                        }
                    }
                }
                Err(e) => {
                    warn!("getUpdates failed: {:?}; backing off", e);
                    sleep(POLL_ERROR_BACKOFF).await;
                }
            }
        }
    })
}
