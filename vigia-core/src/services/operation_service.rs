// File: vigia-core/src/services/operation_service.rs

use std::sync::Arc;
use chrono::Utc;
use tracing::info;

use vigia_common::models::company::Company;
use vigia_common::models::entry::{Entry, EntryType};
use vigia_common::models::user::User;
use vigia_common::traits::repository_traits::EntryRepository;

use super::Reply;
use crate::formatters::{self, texts};
use crate::metrics;
use crate::utils::numbers::parse_money;
use crate::Error;

const BURN_WINDOW_DAYS: i64 = 30;

/// Command vocabulary for active users. Case-insensitive and
/// prefix-matched, with or without the leading slash.
pub struct OperationService {
    entries: Arc<dyn EntryRepository>,
}

impl OperationService {
    pub fn new(entries: Arc<dyn EntryRepository>) -> Self {
        Self { entries }
    }

    pub async fn handle(
        &self,
        user: &User,
        company: &Company,
        text: &str,
    ) -> Result<Vec<Reply>, Error> {
        let normalized = text.trim().to_lowercase();
        let command = normalized.trim_start_matches('/');

        if command.starts_with("entrada") {
            self.record(user, company, &normalized, EntryType::Revenue, "entrada")
                .await
        } else if command.starts_with("saida")
            || command.starts_with("saída")
            || command.starts_with("despesa")
        {
            self.record(user, company, &normalized, EntryType::Expense, "saida")
                .await
        } else if command.starts_with("status") {
            self.status(company).await
        } else if command.starts_with("ajuda") || command.starts_with("help") {
            Ok(vec![Reply::plain(texts::help_text())])
        } else {
            Ok(vec![Reply::plain(texts::help_text())])
        }
    }

    /// Appends one manual ledger entry dated today. A missing,
    /// unparseable or non-positive argument gets a usage hint and
    /// nothing is written.
    async fn record(
        &self,
        user: &User,
        company: &Company,
        normalized: &str,
        entry_type: EntryType,
        usage_name: &str,
    ) -> Result<Vec<Reply>, Error> {
        let mut parts = normalized.split_whitespace();
        let _command = parts.next();
        let arg = match parts.next() {
            Some(a) => a,
            None => return Ok(vec![Reply::plain(texts::usage_hint(usage_name))]),
        };

        let amount = match parse_money(arg) {
            Ok(v) if v > 0.0 => v,
            _ => return Ok(vec![Reply::plain(texts::usage_hint(usage_name))]),
        };

        let entry = Entry::manual(
            company.company_id,
            user.user_id,
            entry_type,
            amount,
            Utc::now().date_naive(),
        );
        self.entries.insert(&entry).await?;
        info!(
            "Recorded {} of {} for company {}",
            entry_type, amount, company.company_id
        );

        Ok(vec![Reply::plain(texts::entry_recorded(entry_type, amount))])
    }

    /// Cash health snapshot: ledger-derived balance, entry-driven
    /// monthly burn over the trailing 30 days, runway in months.
    async fn status(&self, company: &Company) -> Result<Vec<Reply>, Error> {
        let today = Utc::now().date_naive();
        let window_start = today - chrono::Duration::days(BURN_WINDOW_DAYS);

        let cash = self.entries.cash_balance(company.company_id).await?;
        let monthly_burn = self
            .entries
            .sum_expenses_since(company.company_id, window_start)
            .await?;
        let runway_months = metrics::runway(cash, monthly_burn);

        Ok(vec![Reply::markdown(formatters::format_company_status(
            &company.name,
            cash,
            monthly_burn,
            runway_months,
        ))])
    }
}
