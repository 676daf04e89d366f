use std::sync::Arc;

use league_notify_slack::SlackWebhookNotifier;
use league_persistence_sqlite::{
    accounts::SqliteAccountRepository, create_db_pool, games::SqliteGameRepository,
    players::SqlitePlayerRepository, settings::SqliteSettingsRepository,
};
use league_server_api::jwt::JwtKeys;
use league_server_app::build_application;
use log::{error, info};

use crate::config::ServerConfig;

mod config;
mod logs;

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received. Preparing graceful exit...");
}

#[tokio::main]
async fn main() {
    // A missing .env is fine, the environment may already be populated.
    let _ = dotenvy::dotenv();

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    logs::init_logger(config.log.as_ref());

    let pool = create_db_pool(&config.db_path)
        .await
        .expect("Failed to open league database");

    let account_repo = Arc::new(SqliteAccountRepository::new(pool.clone()));
    let player_repo = Arc::new(SqlitePlayerRepository::new(pool.clone()));
    let game_repo = Arc::new(SqliteGameRepository::new(pool.clone()));
    let settings_repo = Arc::new(SqliteSettingsRepository::new(pool));
    let notifier = Arc::new(SlackWebhookNotifier::new(config.chat.clone()));

    let app = Arc::new(build_application(
        config.application_settings(),
        account_repo,
        player_repo,
        game_repo,
        settings_repo,
        notifier,
    ));

    if let Err(e) = app
        .account_ensure_root_use_case
        .ensure_root_account(&config.root_password)
        .await
    {
        error!("Failed to ensure root account: {}", e);
        std::process::exit(1);
    }

    if let Err(e) = app.settings_load_use_case.load_chat_settings().await {
        error!("Failed to load chat settings: {}", e);
        std::process::exit(1);
    }

    let keys = Arc::new(JwtKeys::from_secret_or_random(config.jwt_secret.as_deref()));

    info!("Starting application");

    if let Err(e) =
        league_server_api::run(app, keys, &config.http_host, config.http_port, shutdown_signal())
            .await
    {
        error!("HTTP server failed: {}", e);
        std::process::exit(1);
    }

    info!("Application shut down");
}
