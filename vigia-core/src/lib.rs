// src/lib.rs

pub mod db;
pub mod formatters;
pub mod metrics;
pub mod platforms;
pub mod repositories;
pub mod services;
pub mod tasks;
pub mod test_utils;
pub mod utils;

pub use db::Database;
pub use vigia_common::error::Error;
