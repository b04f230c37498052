mod app;
mod auth;
mod config;
mod error;
mod ping;
mod state;
mod users;

use crate::{config::AppConfig, ping::Pinger, state::AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let env_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "argentbank=debug,axum=info,tower_http=info".to_string());
    let json_logs = std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false);

    if json_logs {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }

    let config = AppConfig::from_env()?;
    tracing::info!(environment = ?config.environment, "configuration loaded");

    let app_state = AppState::init(config).await?;
    let config = app_state.config.clone();

    let pinger = if config.environment.is_production() {
        Some(Pinger::new(app_state.users.clone(), config.ping_interval()).start())
    } else {
        tracing::debug!("liveness pinger disabled outside production");
        None
    };

    let app = app::build_app(app_state)?;
    let served = app::serve(app, &config.host, config.port).await;

    if let Some(pinger) = pinger {
        pinger.stop().await;
    }
    served
}
