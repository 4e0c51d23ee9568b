pub mod postgres;

pub use postgres::company::PostgresCompanyRepository;
pub use postgres::entry::PostgresEntryRepository;
pub use postgres::receivable::PostgresReceivableRepository;
pub use postgres::user::PostgresUserRepository;
