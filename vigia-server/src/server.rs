//! vigia-server/src/server.rs
//!
//! The HTTP surface: liveness probe, webhook ingestion and scheduler
//! diagnostics, plus startup/shutdown of the background pieces.

use std::sync::Arc;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Json;
use axum::routing::{get, post};
use axum::Router;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use vigia_core::platforms::telegram::runtime::spawn_polling_loop;
use vigia_core::platforms::telegram::Update;
use vigia_core::tasks::SchedulerStatus;
use vigia_core::Error;

use crate::context::ServerContext;
use crate::Args;

pub async fn run(ctx: Arc<ServerContext>, args: &Args) -> Result<(), Error> {
    ctx.scheduler.start().await;

    let polling = args.updates == "polling";
    let poll_handle = if polling {
        Some(spawn_polling_loop(
            ctx.platform.clone(),
            ctx.message_service.clone(),
        ))
    } else {
        info!("Webhook delivery mode; not starting the polling loop");
        None
    };

    let app = Router::new()
        .route("/health", get(health))
        .route("/webhook", post(webhook))
        .route("/scheduler/status", get(scheduler_status))
        .with_state(ctx.clone())
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()));

    let listener = tokio::net::TcpListener::bind(&args.bind).await?;
    info!("HTTP surface listening on http://{}", args.bind);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(handle) = poll_handle {
        handle.abort();
    }
    ctx.scheduler.stop().await;
    info!("Server shut down.");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for ctrl-c: {:?}", e);
    }
    info!("Shutdown signal received");
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "healthy" }))
}

/// Inbound message ingestion. Conversation-level problems are replies
/// to the user, not HTTP failures; only internal errors return 5xx.
async fn webhook(
    State(ctx): State<Arc<ServerContext>>,
    Json(update): Json<Update>,
) -> StatusCode {
    match ctx.message_service.process_update(&update).await {
        Ok(()) => StatusCode::OK,
        Err(e) => {
            error!("Webhook processing failed: {:?}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

async fn scheduler_status(State(ctx): State<Arc<ServerContext>>) -> Json<SchedulerStatus> {
    Json(ctx.scheduler.status().await)
}
