// src/tasks/daily_report.rs
//
// The scheduled daily report job. One replace-on-start task instance;
// per-company failures are logged and the remaining companies still
// get their reports.

use std::sync::Arc;
use chrono::{DateTime, Duration as ChronoDuration, LocalResult, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use serde::Serialize;
use tokio::sync::Mutex;
use tokio::time::sleep;
use tracing::{debug, error, info, warn};

use vigia_common::models::company::Company;
use vigia_common::traits::repository_traits::{
    CompanyRepository, EntryRepository, ReceivableRepository,
};

use crate::formatters::format_daily_report;
use crate::metrics;
use crate::platforms::ChatTransport;
use crate::Error;

#[derive(Debug, Clone)]
pub struct ReportConfig {
    /// Local wall-clock hour of the daily trigger (deployments use 7
    /// or 9).
    pub hour: u32,
    pub timezone: Tz,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            hour: 9,
            timezone: chrono_tz::America::Sao_Paulo,
        }
    }
}

/// Diagnostics payload for the scheduler status endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct SchedulerStatus {
    pub running: bool,
    pub hour: u32,
    pub timezone: String,
    pub next_run: Option<DateTime<Utc>>,
}

/// Everything one report pass needs; cloned into the timer task.
#[derive(Clone)]
struct ReportDeps {
    companies: Arc<dyn CompanyRepository>,
    entries: Arc<dyn EntryRepository>,
    receivables: Arc<dyn ReceivableRepository>,
    transport: Arc<dyn ChatTransport>,
    config: ReportConfig,
}

pub struct ReportScheduler {
    deps: ReportDeps,
    handle: Mutex<Option<tokio::task::JoinHandle<()>>>,
}

impl ReportScheduler {
    pub fn new(
        companies: Arc<dyn CompanyRepository>,
        entries: Arc<dyn EntryRepository>,
        receivables: Arc<dyn ReceivableRepository>,
        transport: Arc<dyn ChatTransport>,
        config: ReportConfig,
    ) -> Self {
        Self {
            deps: ReportDeps {
                companies,
                entries,
                receivables,
                transport,
                config,
            },
            handle: Mutex::new(None),
        }
    }

    /// Starts the daily trigger. Replace-existing: a previous instance
    /// is aborted first, so at most one task ever runs.
    pub async fn start(&self) {
        let mut guard = self.handle.lock().await;
        if let Some(old) = guard.take() {
            warn!("Report scheduler already running; replacing the existing task");
            old.abort();
        }

        let deps = self.deps.clone();
        let task = tokio::spawn(async move {
            loop {
                let now = Utc::now();
                let next = deps.next_run_after(now);
                let wait = (next - now).to_std().unwrap_or_default();
                info!("Next daily report run at {}", next);
                sleep(wait).await;

                let report_date = Utc::now().with_timezone(&deps.config.timezone).date_naive();
                if let Err(e) = deps.send_daily_reports(report_date).await {
                    error!("Daily report run failed: {:?}", e);
                }
            }
        });
        *guard = Some(task);
        info!(
            "Report scheduler started (daily at {:02}:00 {})",
            self.deps.config.hour, self.deps.config.timezone
        );
    }

    pub async fn stop(&self) {
        let mut guard = self.handle.lock().await;
        if let Some(task) = guard.take() {
            task.abort();
            info!("Report scheduler stopped");
        }
    }

    pub async fn status(&self) -> SchedulerStatus {
        let running = {
            let guard = self.handle.lock().await;
            guard.as_ref().map(|h| !h.is_finished()).unwrap_or(false)
        };
        SchedulerStatus {
            running,
            hour: self.deps.config.hour,
            timezone: self.deps.config.timezone.to_string(),
            next_run: running.then(|| self.deps.next_run_after(Utc::now())),
        }
    }

    /// One full report pass over the active companies.
    pub async fn send_daily_reports(&self, report_date: NaiveDate) -> Result<(), Error> {
        self.deps.send_daily_reports(report_date).await
    }
}

impl ReportDeps {
    /// Next wall-clock occurrence of the configured hour, strictly
    /// after `now`. DST gaps advance hour by hour until the local time
    /// exists.
    fn next_run_after(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        let tz = self.config.timezone;
        let local_now = now.with_timezone(&tz);
        let target = NaiveTime::from_hms_opt(self.config.hour.min(23), 0, 0)
            .unwrap_or(NaiveTime::MIN);

        let mut date = local_now.date_naive();
        if local_now.time() >= target {
            date += ChronoDuration::days(1);
        }

        let mut candidate = date.and_time(target);
        loop {
            match tz.from_local_datetime(&candidate) {
                LocalResult::Single(t) => return t.with_timezone(&Utc),
                LocalResult::Ambiguous(earliest, _) => return earliest.with_timezone(&Utc),
                LocalResult::None => candidate += ChronoDuration::hours(1),
            }
        }
    }

    /// A failure for one company is logged and must not abort the
    /// rest.
    async fn send_daily_reports(&self, report_date: NaiveDate) -> Result<(), Error> {
        let companies = self.companies.list_active().await?;
        info!(
            "Sending daily reports for {} active companies ({})",
            companies.len(),
            report_date
        );

        for company in companies {
            if let Err(e) = self.send_company_report(&company, report_date).await {
                error!(
                    "Failed to send daily report for company '{}': {:?}",
                    company.name, e
                );
            }
        }
        Ok(())
    }

    async fn send_company_report(
        &self,
        company: &Company,
        report_date: NaiveDate,
    ) -> Result<(), Error> {
        if let Some(sent_at) = company.last_report_sent_at {
            let sent_date = sent_at.with_timezone(&self.config.timezone).date_naive();
            if sent_date == report_date {
                debug!(
                    "Company '{}' already reported on {}; skipping",
                    company.name, report_date
                );
                return Ok(());
            }
        }

        let Some(chat_id) = company.chat_id else {
            warn!("Company '{}' has no chat destination; skipping", company.name);
            return Ok(());
        };

        let yesterday = report_date - ChronoDuration::days(1);
        let week_start = report_date - ChronoDuration::days(7);

        let revenue_yesterday = self.entries.revenue_on(company.company_id, yesterday).await?;
        let revenue_week = self.entries.revenue_since(company.company_id, week_start).await?;
        let revenue_avg = revenue_week / 7.0;
        let cash_balance = self.entries.cash_balance(company.company_id).await?;
        let overdue_total = self
            .receivables
            .outstanding_total(company.company_id)
            .await?;

        let daily_burn = metrics::daily_burn(
            company.fixed_cost_avg,
            revenue_avg,
            company.variable_cost_percent,
        );
        let days_of_cash = metrics::runway(cash_balance, daily_burn);
        let days_whole = if days_of_cash.is_finite() {
            days_of_cash.floor() as i64
        } else {
            i64::MAX
        };
        let level = metrics::alert_level(days_whole);

        let message = format_daily_report(
            &company.name,
            revenue_yesterday,
            revenue_avg,
            cash_balance,
            days_of_cash,
            overdue_total,
            level,
        );

        self.transport.send_markdown(chat_id, &message).await?;

        if let Err(e) = self.companies.mark_report_sent(company.company_id, Utc::now()).await {
            warn!(
                "Report sent but failed to mark company '{}': {:?}",
                company.name, e
            );
        }
        Ok(())
    }
}
