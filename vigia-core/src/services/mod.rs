// File: vigia-core/src/services/mod.rs

pub mod message_service;
pub mod onboarding_service;
pub mod operation_service;
pub mod user_service;

pub use message_service::MessageService;
pub use onboarding_service::OnboardingService;
pub use operation_service::OperationService;
pub use user_service::UserService;

/// One outbound reply produced by a handler. The message service owns
/// the actual sending.
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub text: String,
    pub markdown: bool,
}

impl Reply {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            markdown: false,
        }
    }

    pub fn markdown(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            markdown: true,
        }
    }
}
