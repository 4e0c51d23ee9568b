// File: vigia-core/tests/helpers.rs
//
// Shared wiring for the scenario tests: in-memory collaborators plus
// a fully assembled message service.

#![allow(dead_code)]

use std::sync::Arc;

use vigia_common::models::company::{Company, CompanyStatus};
use vigia_common::models::user::{User, UserState};
use vigia_common::traits::repository_traits::UserRepository;
use vigia_core::services::message_service::IncomingMessage;
use vigia_core::services::{MessageService, OnboardingService, OperationService, UserService};
use vigia_core::test_utils::{
    MemoryCompanyRepository, MemoryEntryRepository, MemoryReceivableRepository,
    MemoryUserRepository, RecordingTransport,
};

pub struct Harness {
    pub users: Arc<MemoryUserRepository>,
    pub companies: Arc<MemoryCompanyRepository>,
    pub entries: Arc<MemoryEntryRepository>,
    pub receivables: Arc<MemoryReceivableRepository>,
    pub transport: Arc<RecordingTransport>,
    pub service: Arc<MessageService>,
}

pub fn harness() -> Harness {
    let users = MemoryUserRepository::new();
    let companies = MemoryCompanyRepository::new();
    let entries = MemoryEntryRepository::new();
    let receivables = MemoryReceivableRepository::new();
    let transport = RecordingTransport::new();

    let user_service = Arc::new(UserService::new(users.clone(), companies.clone()));
    let onboarding = Arc::new(OnboardingService::new(users.clone(), companies.clone()));
    let operation = Arc::new(OperationService::new(entries.clone()));
    let service = Arc::new(MessageService::new(
        users.clone(),
        companies.clone(),
        user_service,
        onboarding,
        operation,
        transport.clone(),
    ));

    Harness {
        users,
        companies,
        entries,
        receivables,
        transport,
        service,
    }
}

pub fn msg(chat_id: i64, text: &str) -> IncomingMessage {
    IncomingMessage {
        chat_id,
        telegram_id: Some(chat_id),
        first_name: Some("João".to_string()),
        last_name: None,
        username: Some("joao".to_string()),
        text: text.to_string(),
    }
}

/// Seeds a company and a user already past onboarding.
pub async fn seed_active_user(h: &Harness, chat_id: i64) -> (User, Company) {
    let mut company = Company::with_defaults("Padaria do João", chat_id);
    company.fixed_cost_avg = 3000.0;
    company.status = CompanyStatus::Active;
    h.companies.insert_existing(company.clone()).await;

    let mut user = User::first_contact(
        chat_id,
        Some(chat_id),
        Some("João"),
        None,
        Some("joao"),
        company.company_id,
    );
    user.state = UserState::Active;
    user.onboarding_step = 4;
    h.users.create(&user).await.unwrap();

    (user, company)
}

/// Seeds an active company without any user, for scheduler tests.
pub async fn seed_active_company(h: &Harness, name: &str, chat_id: Option<i64>) -> Company {
    let mut company = Company::with_defaults(name, chat_id.unwrap_or(0));
    company.chat_id = chat_id;
    company.fixed_cost_avg = 3000.0;
    company.status = CompanyStatus::Active;
    h.companies.insert_existing(company.clone()).await;
    company
}
