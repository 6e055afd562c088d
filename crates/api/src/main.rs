use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mowwatch_api::config::{Secrets, ServerConfig};
use mowwatch_api::router::build_app_router;
use mowwatch_api::state::AppState;
use mowwatch_core::{EventLog, Notifier, TokenCache};
use mowwatch_events::{DiscordWebhook, LogNotifier, DISCORD_WEBHOOK_BASE_URL};
use mowwatch_husqvarna::{AuthClient, MowerApi};
use mowwatch_pipeline::{PollCycle, Scheduler};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        "mowwatch_api=debug,mowwatch_pipeline=info,mowwatch_husqvarna=info,tower_http=debug"
            .into()
    });
    let json_logs = std::env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));
    let registry = tracing_subscriber::registry().with(filter);
    if json_logs {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    // --- Configuration ---
    let config = ServerConfig::from_env();
    let secrets = Secrets::from_env();
    tracing::info!(
        host = %config.host,
        port = %config.port,
        poll_interval_secs = config.poll_interval_secs,
        event_log_capacity = config.event_log_capacity.get(),
        "Loaded server configuration"
    );

    // --- Upstream clients ---
    let upstream_timeout = Duration::from_secs(config.upstream_timeout_secs);
    let http = mowwatch_husqvarna::http_client(upstream_timeout);

    let identity = Arc::new(AuthClient::with_client(
        http.clone(),
        config.husqvarna_auth_url.clone(),
    ));
    let tokens = Arc::new(TokenCache::new(identity).with_auth_timeout(upstream_timeout));
    let mower_api = Arc::new(MowerApi::with_client(
        http.clone(),
        config.husqvarna_api_url.clone(),
        secrets.credentials.api_key.clone(),
    ));

    // --- Notifications ---
    let notifier: Arc<dyn Notifier> = match &secrets.discord {
        Some(keys) => {
            tracing::info!(webhook_id = %keys.webhook_id, "Discord notifications enabled");
            Arc::new(DiscordWebhook::with_client(
                http,
                DISCORD_WEBHOOK_BASE_URL,
                keys,
            ))
        }
        None => {
            tracing::info!("No Discord webhook configured, notifications go to the log");
            Arc::new(LogNotifier)
        }
    };

    // --- Poller ---
    let event_log = Arc::new(EventLog::new(config.event_log_capacity));
    let cycle = PollCycle::new(
        secrets.credentials.clone(),
        Arc::clone(&tokens),
        mower_api.clone(),
        Arc::clone(&notifier),
        Arc::clone(&event_log),
    )
    .with_fetch_timeout(upstream_timeout);

    let scheduler = Scheduler::new(cycle, Duration::from_secs(config.poll_interval_secs));
    let poller = scheduler.status();
    let poller_cancel = CancellationToken::new();
    let poller_handle = scheduler.spawn(poller_cancel.clone());

    // --- App state ---
    let state = AppState {
        config: Arc::new(config.clone()),
        event_log,
        tokens,
        credentials: Arc::new(secrets.credentials),
        mower_api,
        notifier,
        poller,
    };

    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    // --- Post-shutdown cleanup ---
    tracing::info!("Server stopped accepting connections, cleaning up");

    poller_cancel.cancel();
    if tokio::time::timeout(Duration::from_secs(5), poller_handle)
        .await
        .is_err()
    {
        tracing::warn!("Mower poller did not stop within 5s");
    }
    tracing::info!("Graceful shutdown complete");
}

/// Wait for SIGINT (Ctrl-C) or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
