// File: vigia-common/src/traits/repository_traits.rs

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use crate::error::Error;
use crate::models::company::Company;
use crate::models::entry::Entry;
use crate::models::user::{User, UserState};

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Requires the elevated credential (user creation).
    async fn create(&self, user: &User) -> Result<(), Error>;

    async fn get_by_chat_id(&self, chat_id: i64) -> Result<Option<User>, Error>;

    /// Writes the state and step together. The stored step never
    /// decreases: implementations must keep the larger of the stored
    /// and the given value.
    async fn update_state(
        &self,
        user_id: Uuid,
        state: UserState,
        onboarding_step: i32,
    ) -> Result<(), Error>;

    async fn clear_current_action(&self, user_id: Uuid) -> Result<(), Error>;

    async fn touch_last_interaction(&self, user_id: Uuid) -> Result<(), Error>;
}

#[async_trait]
pub trait CompanyRepository: Send + Sync {
    /// Requires the elevated credential (company creation).
    async fn create(&self, company: &Company) -> Result<(), Error>;

    async fn get(&self, company_id: Uuid) -> Result<Option<Company>, Error>;

    async fn set_fixed_cost(&self, company_id: Uuid, fixed_cost_avg: f64) -> Result<(), Error>;

    async fn set_variable_percent(
        &self,
        company_id: Uuid,
        variable_cost_percent: f64,
    ) -> Result<(), Error>;

    async fn set_cash_minimum(&self, company_id: Uuid, cash_minimum: f64) -> Result<(), Error>;

    async fn list_active(&self) -> Result<Vec<Company>, Error>;

    async fn mark_report_sent(&self, company_id: Uuid, at: DateTime<Utc>) -> Result<(), Error>;
}

#[async_trait]
pub trait EntryRepository: Send + Sync {
    /// Requires the elevated credential (ledger append).
    async fn insert(&self, entry: &Entry) -> Result<(), Error>;

    /// Sum of expense entries dated on or after `since`.
    async fn sum_expenses_since(&self, company_id: Uuid, since: NaiveDate) -> Result<f64, Error>;

    /// Sum of revenue entries dated exactly `on`.
    async fn revenue_on(&self, company_id: Uuid, on: NaiveDate) -> Result<f64, Error>;

    /// Sum of revenue entries dated on or after `since`.
    async fn revenue_since(&self, company_id: Uuid, since: NaiveDate) -> Result<f64, Error>;

    /// Full-history revenue minus expense sum. The ledger is the only
    /// source of truth for the running balance.
    async fn cash_balance(&self, company_id: Uuid) -> Result<f64, Error>;
}

#[async_trait]
pub trait ReceivableRepository: Send + Sync {
    /// Total owed across `pending` and `overdue` receivables.
    async fn outstanding_total(&self, company_id: Uuid) -> Result<f64, Error>;
}
