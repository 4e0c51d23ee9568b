// File: vigia-common/src/models/company.rs

use std::fmt;
use std::str::FromStr;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, Eq, PartialEq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum CompanyStatus {
    Trial,
    Active,
    Suspended,
    Cancelled,
}

impl fmt::Display for CompanyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompanyStatus::Trial => write!(f, "trial"),
            CompanyStatus::Active => write!(f, "active"),
            CompanyStatus::Suspended => write!(f, "suspended"),
            CompanyStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

impl FromStr for CompanyStatus {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trial" => Ok(CompanyStatus::Trial),
            "active" => Ok(CompanyStatus::Active),
            "suspended" => Ok(CompanyStatus::Suspended),
            "cancelled" => Ok(CompanyStatus::Cancelled),
            _ => Err(format!("Unknown company status: {}", s)),
        }
    }
}

/// The financial entity being monitored. The cash balance is derived from
/// the entries ledger, never cached on this row.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Company {
    pub company_id: Uuid,
    pub name: String,
    /// Average monthly fixed costs.
    pub fixed_cost_avg: f64,
    /// Variable costs as a percentage of revenue, in [0, 100].
    pub variable_cost_percent: f64,
    /// Cash level below which the company wants to be alerted.
    pub cash_minimum: f64,
    pub alert_days_threshold: i32,
    pub status: CompanyStatus,
    pub plan: String,
    /// Chat destination for scheduled reports.
    pub chat_id: Option<i64>,
    pub last_report_sent_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Company {
    /// Stub created together with the owning user at first contact,
    /// before onboarding has collected the real cost parameters.
    pub fn with_defaults(name: &str, chat_id: i64) -> Self {
        let now = Utc::now();
        Self {
            company_id: Uuid::new_v4(),
            name: name.to_string(),
            fixed_cost_avg: 0.0,
            variable_cost_percent: 30.0,
            cash_minimum: 5000.0,
            alert_days_threshold: 10,
            status: CompanyStatus::Trial,
            plan: "early_adopter".to_string(),
            chat_id: Some(chat_id),
            last_report_sent_at: None,
            created_at: now,
            updated_at: now,
        }
    }
}
