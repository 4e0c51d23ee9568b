// File: vigia-common/src/models/entry.rs

use std::fmt;
use std::str::FromStr;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, Eq, PartialEq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum EntryType {
    Revenue,
    Expense,
}

impl fmt::Display for EntryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryType::Revenue => write!(f, "revenue"),
            EntryType::Expense => write!(f, "expense"),
        }
    }
}

impl FromStr for EntryType {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "revenue" => Ok(EntryType::Revenue),
            // Legacy tag from the cached-cash lineage.
            "income" => Ok(EntryType::Revenue),
            "expense" => Ok(EntryType::Expense),
            _ => Err(format!("Unknown entry type: {}", s)),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, Eq, PartialEq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum EntrySource {
    Manual,
    Automated,
}

impl fmt::Display for EntrySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntrySource::Manual => write!(f, "manual"),
            EntrySource::Automated => write!(f, "automated"),
        }
    }
}

impl FromStr for EntrySource {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "manual" => Ok(EntrySource::Manual),
            "automated" => Ok(EntrySource::Automated),
            _ => Err(format!("Unknown entry source: {}", s)),
        }
    }
}

/// One dated ledger line. Entries are append-only: no update or delete
/// operation exists anywhere in the workspace.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Entry {
    pub entry_id: Uuid,
    pub company_id: Uuid,
    pub user_id: Option<Uuid>,
    pub entry_type: EntryType,
    /// Positive, finite currency amount. Validated before insert.
    pub amount: f64,
    pub description: Option<String>,
    pub entry_date: NaiveDate,
    pub source: EntrySource,
    pub created_at: DateTime<Utc>,
}

impl Entry {
    pub fn manual(
        company_id: Uuid,
        user_id: Uuid,
        entry_type: EntryType,
        amount: f64,
        entry_date: NaiveDate,
    ) -> Self {
        Self {
            entry_id: Uuid::new_v4(),
            company_id,
            user_id: Some(user_id),
            entry_type,
            amount,
            description: None,
            entry_date,
            source: EntrySource::Manual,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_type_round_trips_through_display() {
        assert_eq!("revenue".parse::<EntryType>(), Ok(EntryType::Revenue));
        assert_eq!("expense".parse::<EntryType>(), Ok(EntryType::Expense));
        assert_eq!(EntryType::Revenue.to_string(), "revenue");
        assert_eq!(EntryType::Expense.to_string(), "expense");
    }

    #[test]
    fn legacy_income_tag_maps_to_revenue() {
        assert_eq!("income".parse::<EntryType>(), Ok(EntryType::Revenue));
        assert_eq!("Income".parse::<EntryType>(), Ok(EntryType::Revenue));
    }

    #[test]
    fn unknown_entry_type_tag_is_rejected() {
        assert!("transfer".parse::<EntryType>().is_err());
    }
}
