// File: vigia-common/src/models/receivable.rs

use std::fmt;
use std::str::FromStr;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, Eq, PartialEq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ReceivableStatus {
    Pending,
    Overdue,
    Settled,
}

impl fmt::Display for ReceivableStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReceivableStatus::Pending => write!(f, "pending"),
            ReceivableStatus::Overdue => write!(f, "overdue"),
            ReceivableStatus::Settled => write!(f, "settled"),
        }
    }
}

impl FromStr for ReceivableStatus {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(ReceivableStatus::Pending),
            "overdue" => Ok(ReceivableStatus::Overdue),
            "settled" => Ok(ReceivableStatus::Settled),
            _ => Err(format!("Unknown receivable status: {}", s)),
        }
    }
}

/// Money owed by a customer. Read-only for this core: only the
/// outstanding total feeds into the daily report.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Receivable {
    pub receivable_id: Uuid,
    pub company_id: Uuid,
    pub customer_name: String,
    pub amount: f64,
    pub due_date: NaiveDate,
    pub status: ReceivableStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
