// File: vigia-common/src/models/mod.rs

pub mod company;
pub mod entry;
pub mod receivable;
pub mod user;

pub use company::{Company, CompanyStatus};
pub use entry::{Entry, EntrySource, EntryType};
pub use receivable::{Receivable, ReceivableStatus};
pub use user::{User, UserState};
