//! vigia-server/src/context.rs
//!
//! Wires the whole object graph: pools, repositories, services,
//! the Telegram platform and the report scheduler.

use std::sync::Arc;
use tracing::info;

use vigia_common::traits::repository_traits::{
    CompanyRepository, EntryRepository, ReceivableRepository, UserRepository,
};
use vigia_core::db::Database;
use vigia_core::platforms::telegram::TelegramPlatform;
use vigia_core::platforms::ChatTransport;
use vigia_core::repositories::{
    PostgresCompanyRepository, PostgresEntryRepository, PostgresReceivableRepository,
    PostgresUserRepository,
};
use vigia_core::services::{MessageService, OnboardingService, OperationService, UserService};
use vigia_core::tasks::{ReportConfig, ReportScheduler};
use vigia_core::Error;

use crate::Args;

pub struct ServerContext {
    pub db: Database,
    pub message_service: Arc<MessageService>,
    pub platform: Arc<TelegramPlatform>,
    pub scheduler: Arc<ReportScheduler>,
}

impl ServerContext {
    pub async fn new(args: &Args) -> Result<Arc<Self>, Error> {
        let bot_token = std::env::var("TELEGRAM_BOT_TOKEN")
            .map_err(|_| Error::Config("TELEGRAM_BOT_TOKEN is not set".to_string()))?;

        let timezone: chrono_tz::Tz = args
            .report_timezone
            .parse()
            .map_err(|_| Error::Config(format!("Unknown timezone: {}", args.report_timezone)))?;
        if args.report_hour > 23 {
            return Err(Error::Config(format!(
                "report hour must be 0-23, got {}",
                args.report_hour
            )));
        }

        // 1) Connect to DB and migrate
        let db = Database::new(&args.db_url, &args.db_service_url).await?;
        db.migrate().await?;

        // 2) Repositories
        let users: Arc<dyn UserRepository> = Arc::new(PostgresUserRepository::new(&db));
        let companies: Arc<dyn CompanyRepository> = Arc::new(PostgresCompanyRepository::new(&db));
        let entries: Arc<dyn EntryRepository> = Arc::new(PostgresEntryRepository::new(&db));
        let receivables: Arc<dyn ReceivableRepository> =
            Arc::new(PostgresReceivableRepository::new(&db));

        // 3) Platform
        let platform = Arc::new(TelegramPlatform::new(&bot_token));
        let transport: Arc<dyn ChatTransport> = platform.clone();

        // 4) Services
        let user_service = Arc::new(UserService::new(users.clone(), companies.clone()));
        let onboarding = Arc::new(OnboardingService::new(users.clone(), companies.clone()));
        let operation = Arc::new(OperationService::new(entries.clone()));
        let message_service = Arc::new(MessageService::new(
            users,
            companies.clone(),
            user_service,
            onboarding,
            operation,
            transport.clone(),
        ));

        // 5) Report scheduler
        let scheduler = Arc::new(ReportScheduler::new(
            companies,
            entries,
            receivables,
            transport,
            ReportConfig {
                hour: args.report_hour,
                timezone,
            },
        ));

        info!("Server context initialized");
        Ok(Arc::new(Self {
            db,
            message_service,
            platform,
            scheduler,
        }))
    }
}
