// File: vigia-core/tests/router_tests.rs
//
// Router-level behavior with a mocked transport: outbound sends are
// at-most-once and their failures never surface to the caller.

mod helpers;

use std::sync::Arc;
use async_trait::async_trait;
use helpers::msg;
use mockall::mock;

use vigia_core::platforms::ChatTransport;
use vigia_core::services::{MessageService, OnboardingService, OperationService, UserService};
use vigia_core::test_utils::{
    MemoryCompanyRepository, MemoryEntryRepository, MemoryUserRepository,
};
use vigia_core::Error;

mock! {
    Transport {}
    #[async_trait]
    impl ChatTransport for Transport {
        async fn send_message(&self, chat_id: i64, text: &str) -> Result<(), Error>;
        async fn send_markdown(&self, chat_id: i64, text: &str) -> Result<(), Error>;
    }
}

fn service_with_transport(
    transport: MockTransport,
) -> (Arc<MessageService>, Arc<MemoryUserRepository>) {
    let users = MemoryUserRepository::new();
    let companies = MemoryCompanyRepository::new();
    let entries = MemoryEntryRepository::new();

    let user_service = Arc::new(UserService::new(users.clone(), companies.clone()));
    let onboarding = Arc::new(OnboardingService::new(users.clone(), companies.clone()));
    let operation = Arc::new(OperationService::new(entries));

    let service = Arc::new(MessageService::new(
        users.clone(),
        companies,
        user_service,
        onboarding,
        operation,
        Arc::new(transport),
    ));
    (service, users)
}

#[tokio::test]
async fn transport_failure_is_swallowed() {
    let mut transport = MockTransport::new();
    transport
        .expect_send_message()
        .returning(|_, _| Err(Error::Telegram("timeout".to_string())));

    let (service, _) = service_with_transport(transport);

    // The send fails; the handler still reports success to the
    // delivery layer (log-and-drop, no retry).
    let result = service.process_incoming(msg(100, "oi")).await;
    assert!(result.is_ok());
}

#[tokio::test]
async fn user_storage_failure_surfaces_to_the_delivery_layer() {
    let mut transport = MockTransport::new();
    // A best-effort error reply still goes out to the chat.
    transport
        .expect_send_message()
        .times(1)
        .returning(|_, _| Ok(()));

    let (service, users) = service_with_transport(transport);
    users.fail_next_create();

    // With no user row there is no conversation state, so the error
    // propagates and the webhook can answer with a 5xx.
    let result = service.process_incoming(msg(100, "oi")).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn welcome_reply_goes_out_exactly_once() {
    let mut transport = MockTransport::new();
    transport
        .expect_send_message()
        .times(1)
        .returning(|_, _| Ok(()));

    let (service, _) = service_with_transport(transport);
    service.process_incoming(msg(100, "oi")).await.unwrap();
}
