// File: vigia-core/src/metrics/mod.rs
//
// Pure burn/runway/alert arithmetic. No I/O, never panics.

use vigia_common::models::entry::{Entry, EntryType};

/// Tag attached to a days-of-cash figure in reports.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum AlertLevel {
    Critical,
    Warning,
    Normal,
}

impl AlertLevel {
    pub fn emoji(&self) -> &'static str {
        match self {
            AlertLevel::Critical => "🔴",
            AlertLevel::Warning => "🟡",
            AlertLevel::Normal => "🟢",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AlertLevel::Critical => "CRÍTICO",
            AlertLevel::Warning => "ATENÇÃO",
            AlertLevel::Normal => "SAUDÁVEL",
        }
    }
}

/// Formula-based daily burn, assuming a 30-day month.
pub fn daily_burn(fixed_cost_avg: f64, avg_daily_revenue: f64, variable_cost_percent: f64) -> f64 {
    fixed_cost_avg / 30.0 + avg_daily_revenue * variable_cost_percent / 100.0
}

/// Formula-based monthly burn. Not interchangeable with
/// [`monthly_burn_from_entries`], which sums the actual ledger.
pub fn monthly_burn(fixed_cost_avg: f64, avg_daily_revenue: f64, variable_cost_percent: f64) -> f64 {
    daily_burn(fixed_cost_avg, avg_daily_revenue, variable_cost_percent) * 30.0
}

/// Entry-driven monthly burn: the sum of expense amounts in the given
/// entries. Callers pass the trailing-30-day window.
pub fn monthly_burn_from_entries(entries: &[Entry]) -> f64 {
    entries
        .iter()
        .filter(|e| e.entry_type == EntryType::Expense)
        .map(|e| e.amount)
        .sum()
}

/// Time until cash reaches zero, in whatever unit `burn` is expressed
/// in. Zero or negative burn yields `f64::INFINITY` (the documented
/// infinite-runway sentinel). Negative cash passes through: it means
/// the company is already burning into overdraft.
pub fn runway(cash_balance: f64, burn: f64) -> f64 {
    if burn <= 0.0 {
        return f64::INFINITY;
    }
    cash_balance / burn
}

/// Tiered alert thresholds over whole days of cash. Boundaries are
/// inclusive on the lower tier.
pub fn alert_level(days_of_cash: i64) -> AlertLevel {
    if days_of_cash <= 10 {
        AlertLevel::Critical
    } else if days_of_cash <= 20 {
        AlertLevel::Warning
    } else {
        AlertLevel::Normal
    }
}
