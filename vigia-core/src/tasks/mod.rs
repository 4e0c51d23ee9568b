pub mod daily_report;

pub use daily_report::{ReportConfig, ReportScheduler, SchedulerStatus};
