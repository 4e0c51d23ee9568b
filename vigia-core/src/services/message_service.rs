// File: vigia-core/src/services/message_service.rs

use std::sync::Arc;
use tracing::{debug, error, warn};

use vigia_common::models::user::{User, UserState};
use vigia_common::traits::repository_traits::{CompanyRepository, UserRepository};

use super::{OnboardingService, OperationService, Reply, UserService};
use crate::formatters::texts;
use crate::platforms::telegram::Update;
use crate::platforms::ChatTransport;
use crate::Error;

/// One inbound chat message, already stripped of transport framing.
/// Webhook and polling delivery both build this and go through
/// [`MessageService::process_incoming`].
#[derive(Debug, Clone)]
pub struct IncomingMessage {
    pub chat_id: i64,
    pub telegram_id: Option<i64>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub username: Option<String>,
    pub text: String,
}

/// The router: loads or creates the user, dispatches on its state and
/// sends the resulting replies. Stateless between invocations; all
/// conversation state lives in the storage collaborator.
pub struct MessageService {
    users: Arc<dyn UserRepository>,
    companies: Arc<dyn CompanyRepository>,
    user_service: Arc<UserService>,
    onboarding: Arc<OnboardingService>,
    operation: Arc<OperationService>,
    transport: Arc<dyn ChatTransport>,
}

impl MessageService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        companies: Arc<dyn CompanyRepository>,
        user_service: Arc<UserService>,
        onboarding: Arc<OnboardingService>,
        operation: Arc<OperationService>,
        transport: Arc<dyn ChatTransport>,
    ) -> Self {
        Self {
            users,
            companies,
            user_service,
            onboarding,
            operation,
            transport,
        }
    }

    /// Entry point for a Telegram update (either delivery mode).
    /// Updates without a text message are ignored.
    pub async fn process_update(&self, update: &Update) -> Result<(), Error> {
        let Some(message) = &update.message else {
            debug!("Update {} carries no message; ignoring", update.update_id);
            return Ok(());
        };
        let Some(text) = &message.text else {
            debug!("Message {} carries no text; ignoring", message.message_id);
            return Ok(());
        };

        let sender = message.from.as_ref();
        let incoming = IncomingMessage {
            chat_id: message.chat.id,
            telegram_id: sender.map(|s| s.id),
            first_name: sender.and_then(|s| s.first_name.clone()),
            last_name: sender.and_then(|s| s.last_name.clone()),
            username: sender.and_then(|s| s.username.clone()),
            text: text.clone(),
        };
        self.process_incoming(incoming).await
    }

    /// Handles one message end to end. Conversation-level failures are
    /// absorbed here: the user gets an error reply and the call still
    /// returns `Ok`. The one exception is a storage failure loading or
    /// creating the user itself; with no row there is no conversation
    /// state to answer from, so that error surfaces to the delivery
    /// layer (the webhook answers it with a 5xx).
    pub async fn process_incoming(&self, msg: IncomingMessage) -> Result<(), Error> {
        debug!("process_incoming() for chat {}", msg.chat_id);

        let user = match self
            .user_service
            .get_or_create(
                msg.chat_id,
                msg.telegram_id,
                msg.first_name.as_deref(),
                msg.last_name.as_deref(),
                msg.username.as_deref(),
            )
            .await
        {
            Ok(user) => user,
            Err(e) => {
                error!("Failed to load or create user for chat {}: {:?}", msg.chat_id, e);
                self.deliver(msg.chat_id, &Reply::plain(texts::technical_error())).await;
                return Err(e);
            }
        };

        if let Err(e) = self.users.touch_last_interaction(user.user_id).await {
            warn!("Failed to touch last interaction for {}: {:?}", user.user_id, e);
        }

        let replies = match self.dispatch(&user, &msg.text).await {
            Ok(replies) => replies,
            Err(Error::NotFound(what)) => {
                error!("Missing entity handling chat {}: {}", msg.chat_id, what);
                vec![Reply::plain(texts::company_not_found())]
            }
            Err(e) => {
                error!("Failed to handle message from chat {}: {:?}", msg.chat_id, e);
                vec![Reply::plain(texts::technical_error())]
            }
        };

        for reply in &replies {
            self.deliver(msg.chat_id, reply).await;
        }
        Ok(())
    }

    /// At-most-once delivery: a failed send is logged and dropped.
    async fn deliver(&self, chat_id: i64, reply: &Reply) {
        let sent = if reply.markdown {
            self.transport.send_markdown(chat_id, &reply.text).await
        } else {
            self.transport.send_message(chat_id, &reply.text).await
        };
        if let Err(e) = sent {
            error!("Failed to send reply to chat {}: {:?}", chat_id, e);
        }
    }

    async fn dispatch(&self, user: &User, text: &str) -> Result<Vec<Reply>, Error> {
        match user.state {
            UserState::New => self.handle_new(user, text).await,
            UserState::Onboarding => {
                let company = self.load_company(user).await?;
                self.onboarding.handle(user, &company, text).await
            }
            UserState::Active => {
                let company = self.load_company(user).await?;
                self.operation.handle(user, &company, text).await
            }
            UserState::Paused => Ok(vec![Reply::plain(texts::suspended_notice())]),
            UserState::Blocked => Ok(vec![Reply::plain(texts::cancelled_notice())]),
        }
    }

    async fn handle_new(&self, user: &User, text: &str) -> Result<Vec<Reply>, Error> {
        if text.trim().to_lowercase().starts_with("/start") {
            self.onboarding.begin(user).await
        } else {
            Ok(vec![Reply::plain(texts::welcome())])
        }
    }

    async fn load_company(
        &self,
        user: &User,
    ) -> Result<vigia_common::models::company::Company, Error> {
        self.companies
            .get(user.company_id)
            .await?
            .ok_or_else(|| Error::NotFound(format!("company {}", user.company_id)))
    }
}
