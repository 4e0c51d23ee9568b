use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

mod context;
mod server;

use context::ServerContext;

#[derive(Parser, Debug, Clone)]
#[command(name = "vigia")]
#[command(author, version, about = "Vigia - conversational financial-monitoring assistant")]
pub struct Args {
    /// Address the HTTP surface binds to
    #[arg(long, default_value = "0.0.0.0:8000")]
    pub bind: String,

    /// Postgres connection URL (restricted credential)
    #[arg(long, default_value = "postgres://vigia@localhost:5432/vigia")]
    pub db_url: String,

    /// Postgres connection URL (elevated service credential, used for
    /// row creation and ledger appends)
    #[arg(long, default_value = "postgres://vigia_service@localhost:5432/vigia")]
    pub db_service_url: String,

    /// Local hour of the daily report trigger
    #[arg(long, default_value = "9")]
    pub report_hour: u32,

    /// IANA timezone of the daily report trigger
    #[arg(long, default_value = "America/Sao_Paulo")]
    pub report_timezone: String,

    /// Inbound update delivery: "polling" or "webhook"
    #[arg(long, default_value = "polling")]
    pub updates: String,
}

fn init_tracing() {
    let filter = EnvFilter::from_default_env()
        .add_directive("vigia=info".parse().unwrap_or_default());
    let sub = fmt().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(sub)
        .expect("Failed to set global subscriber");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    init_tracing();
    let args = Args::parse();
    info!(
        "Vigia starting. bind={}, updates={}, report at {:02}:00 {}",
        args.bind, args.updates, args.report_hour, args.report_timezone
    );

    let ctx = ServerContext::new(&args).await?;
    if let Err(e) = server::run(ctx, &args).await {
        error!("Server error: {:?}", e);
        return Err(e.into());
    }

    info!("Vigia finished. Goodbye!");
    Ok(())
}
