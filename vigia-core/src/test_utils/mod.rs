// File: vigia-core/src/test_utils/mod.rs
//
// In-memory fakes for the storage and messaging collaborators, shared
// by the integration tests under tests/.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use tokio::sync::Mutex;
use uuid::Uuid;

use vigia_common::models::company::Company;
use vigia_common::models::entry::{Entry, EntryType};
use vigia_common::models::user::{User, UserState};
use vigia_common::traits::repository_traits::{
    CompanyRepository, EntryRepository, ReceivableRepository, UserRepository,
};

use crate::platforms::ChatTransport;
use crate::Error;

#[derive(Default)]
pub struct MemoryUserRepository {
    users: Mutex<Vec<User>>,
    fail_next_create: AtomicBool,
}

impl MemoryUserRepository {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Makes the next `create` call fail, to simulate the secondary
    /// insert of the first-contact pair going wrong.
    pub fn fail_next_create(&self) {
        self.fail_next_create.store(true, Ordering::SeqCst);
    }

    pub async fn get(&self, user_id: Uuid) -> Option<User> {
        let users = self.users.lock().await;
        users.iter().find(|u| u.user_id == user_id).cloned()
    }

    pub async fn count(&self) -> usize {
        self.users.lock().await.len()
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn create(&self, user: &User) -> Result<(), Error> {
        if self.fail_next_create.swap(false, Ordering::SeqCst) {
            return Err(Error::Internal("simulated user insert failure".to_string()));
        }
        self.users.lock().await.push(user.clone());
        Ok(())
    }

    async fn get_by_chat_id(&self, chat_id: i64) -> Result<Option<User>, Error> {
        let users = self.users.lock().await;
        Ok(users.iter().find(|u| u.chat_id == chat_id).cloned())
    }

    async fn update_state(
        &self,
        user_id: Uuid,
        state: UserState,
        onboarding_step: i32,
    ) -> Result<(), Error> {
        let mut users = self.users.lock().await;
        if let Some(user) = users.iter_mut().find(|u| u.user_id == user_id) {
            user.state = state;
            // Mirrors the GREATEST clause in the Postgres repository.
            user.onboarding_step = user.onboarding_step.max(onboarding_step);
            user.updated_at = Utc::now();
        }
        Ok(())
    }

    async fn clear_current_action(&self, user_id: Uuid) -> Result<(), Error> {
        let mut users = self.users.lock().await;
        if let Some(user) = users.iter_mut().find(|u| u.user_id == user_id) {
            user.current_action = None;
        }
        Ok(())
    }

    async fn touch_last_interaction(&self, user_id: Uuid) -> Result<(), Error> {
        let mut users = self.users.lock().await;
        if let Some(user) = users.iter_mut().find(|u| u.user_id == user_id) {
            user.last_interaction_at = Some(Utc::now());
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryCompanyRepository {
    companies: Mutex<Vec<Company>>,
}

impl MemoryCompanyRepository {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub async fn insert_existing(&self, company: Company) {
        self.companies.lock().await.push(company);
    }

    pub async fn count(&self) -> usize {
        self.companies.lock().await.len()
    }
}

#[async_trait]
impl CompanyRepository for MemoryCompanyRepository {
    async fn create(&self, company: &Company) -> Result<(), Error> {
        self.companies.lock().await.push(company.clone());
        Ok(())
    }

    async fn get(&self, company_id: Uuid) -> Result<Option<Company>, Error> {
        let companies = self.companies.lock().await;
        Ok(companies.iter().find(|c| c.company_id == company_id).cloned())
    }

    async fn set_fixed_cost(&self, company_id: Uuid, fixed_cost_avg: f64) -> Result<(), Error> {
        let mut companies = self.companies.lock().await;
        if let Some(c) = companies.iter_mut().find(|c| c.company_id == company_id) {
            c.fixed_cost_avg = fixed_cost_avg;
            c.updated_at = Utc::now();
        }
        Ok(())
    }

    async fn set_variable_percent(
        &self,
        company_id: Uuid,
        variable_cost_percent: f64,
    ) -> Result<(), Error> {
        let mut companies = self.companies.lock().await;
        if let Some(c) = companies.iter_mut().find(|c| c.company_id == company_id) {
            c.variable_cost_percent = variable_cost_percent;
            c.updated_at = Utc::now();
        }
        Ok(())
    }

    async fn set_cash_minimum(&self, company_id: Uuid, cash_minimum: f64) -> Result<(), Error> {
        let mut companies = self.companies.lock().await;
        if let Some(c) = companies.iter_mut().find(|c| c.company_id == company_id) {
            c.cash_minimum = cash_minimum;
            c.updated_at = Utc::now();
        }
        Ok(())
    }

    async fn list_active(&self) -> Result<Vec<Company>, Error> {
        let companies = self.companies.lock().await;
        Ok(companies
            .iter()
            .filter(|c| c.status == vigia_common::models::company::CompanyStatus::Active)
            .cloned()
            .collect())
    }

    async fn mark_report_sent(&self, company_id: Uuid, at: DateTime<Utc>) -> Result<(), Error> {
        let mut companies = self.companies.lock().await;
        if let Some(c) = companies.iter_mut().find(|c| c.company_id == company_id) {
            c.last_report_sent_at = Some(at);
            c.updated_at = at;
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryEntryRepository {
    entries: Mutex<Vec<Entry>>,
}

impl MemoryEntryRepository {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub async fn insert_existing(&self, entry: Entry) {
        self.entries.lock().await.push(entry);
    }

    pub async fn all(&self) -> Vec<Entry> {
        self.entries.lock().await.clone()
    }
}

#[async_trait]
impl EntryRepository for MemoryEntryRepository {
    async fn insert(&self, entry: &Entry) -> Result<(), Error> {
        if !(entry.amount.is_finite() && entry.amount > 0.0) {
            return Err(Error::Parse(format!(
                "entry amount must be positive and finite, got {}",
                entry.amount
            )));
        }
        self.entries.lock().await.push(entry.clone());
        Ok(())
    }

    async fn sum_expenses_since(&self, company_id: Uuid, since: NaiveDate) -> Result<f64, Error> {
        let entries = self.entries.lock().await;
        Ok(entries
            .iter()
            .filter(|e| {
                e.company_id == company_id
                    && e.entry_type == EntryType::Expense
                    && e.entry_date >= since
            })
            .map(|e| e.amount)
            .sum())
    }

    async fn revenue_on(&self, company_id: Uuid, on: NaiveDate) -> Result<f64, Error> {
        let entries = self.entries.lock().await;
        Ok(entries
            .iter()
            .filter(|e| {
                e.company_id == company_id
                    && e.entry_type == EntryType::Revenue
                    && e.entry_date == on
            })
            .map(|e| e.amount)
            .sum())
    }

    async fn revenue_since(&self, company_id: Uuid, since: NaiveDate) -> Result<f64, Error> {
        let entries = self.entries.lock().await;
        Ok(entries
            .iter()
            .filter(|e| {
                e.company_id == company_id
                    && e.entry_type == EntryType::Revenue
                    && e.entry_date >= since
            })
            .map(|e| e.amount)
            .sum())
    }

    async fn cash_balance(&self, company_id: Uuid) -> Result<f64, Error> {
        let entries = self.entries.lock().await;
        Ok(entries
            .iter()
            .filter(|e| e.company_id == company_id)
            .map(|e| match e.entry_type {
                EntryType::Revenue => e.amount,
                EntryType::Expense => -e.amount,
            })
            .sum())
    }
}

#[derive(Default)]
pub struct MemoryReceivableRepository {
    totals: Mutex<Vec<(Uuid, f64)>>,
}

impl MemoryReceivableRepository {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub async fn set_outstanding(&self, company_id: Uuid, total: f64) {
        self.totals.lock().await.push((company_id, total));
    }
}

#[async_trait]
impl ReceivableRepository for MemoryReceivableRepository {
    async fn outstanding_total(&self, company_id: Uuid) -> Result<f64, Error> {
        let totals = self.totals.lock().await;
        Ok(totals
            .iter()
            .filter(|(id, _)| *id == company_id)
            .map(|(_, t)| t)
            .sum())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SentMessage {
    pub chat_id: i64,
    pub text: String,
    pub markdown: bool,
}

/// Transport fake that records every send and can be told to fail for
/// specific chat destinations.
#[derive(Default)]
pub struct RecordingTransport {
    sent: Mutex<Vec<SentMessage>>,
    fail_chats: Mutex<HashSet<i64>>,
}

impl RecordingTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub async fn fail_for_chat(&self, chat_id: i64) {
        self.fail_chats.lock().await.insert(chat_id);
    }

    pub async fn sent(&self) -> Vec<SentMessage> {
        self.sent.lock().await.clone()
    }

    async fn record(&self, chat_id: i64, text: &str, markdown: bool) -> Result<(), Error> {
        if self.fail_chats.lock().await.contains(&chat_id) {
            return Err(Error::Telegram(format!("simulated send failure to {}", chat_id)));
        }
        self.sent.lock().await.push(SentMessage {
            chat_id,
            text: text.to_string(),
            markdown,
        });
        Ok(())
    }
}

#[async_trait]
impl ChatTransport for RecordingTransport {
    async fn send_message(&self, chat_id: i64, text: &str) -> Result<(), Error> {
        self.record(chat_id, text, false).await
    }

    async fn send_markdown(&self, chat_id: i64, text: &str) -> Result<(), Error> {
        self.record(chat_id, text, true).await
    }
}
