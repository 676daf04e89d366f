use std::sync::Arc;

use axum::{
    Router,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use league_server_app::{
    Application,
    workflow::{FieldErrors, WorkflowError},
};
use log::info;

use crate::jwt::JwtKeys;

mod accounts;
mod auth;
mod extract;
mod games;
pub mod jwt;
mod players;
mod reports;
mod settings;
mod stats;

#[derive(Clone)]
pub struct AppState {
    pub app: Arc<Application>,
    pub keys: Arc<JwtKeys>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .nest(
            "/v1",
            Router::new()
                .route("/login", post(accounts::login))
                .route(
                    "/accounts",
                    get(accounts::list_accounts)
                        .post(accounts::create_account)
                        .delete(accounts::delete_accounts),
                )
                .route(
                    "/players",
                    get(players::list_players).post(players::create_player),
                )
                .route(
                    "/players/{id}",
                    get(players::get_player).delete(players::delete_player),
                )
                .route("/games", get(games::list_games).post(games::create_game))
                .route("/games/choices", get(games::get_choices))
                .route(
                    "/games/{id}",
                    get(games::get_game)
                        .patch(games::update_game)
                        .delete(games::delete_game),
                )
                .route("/stats/periods", get(stats::get_periods))
                .route("/stats/episode", get(stats::get_episode_leaderboard))
                .route("/reports", get(reports::get_report))
                .route(
                    "/settings/slack",
                    get(settings::get_chat_settings).put(settings::update_chat_settings),
                )
                .route("/settings/slack/test", post(settings::send_test_message)),
        )
        .with_state(state)
}

pub async fn run(
    app: Arc<Application>,
    keys: Arc<JwtKeys>,
    host: &str,
    port: u16,
    shutdown_signal: impl std::future::Future<Output = ()> + Send + 'static,
) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(format!("{}:{}", host, port)).await?;

    info!("API server listening on {}:{}", host, port);
    axum::serve(listener, router(AppState { app, keys }))
        .with_graceful_shutdown(shutdown_signal)
        .await?;

    info!("HTTP API shut down gracefully");
    Ok(())
}

#[derive(Debug)]
pub enum ServiceError {
    Validation(FieldErrors),
    NotFound(String),
    Unauthorized(String),
    Internal(String),
    Forbidden(String),
}

impl std::fmt::Display for ServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ServiceError::Validation(errors) => write!(f, "Invalid input: {}", errors),
            ServiceError::NotFound(msg) => write!(f, "Not found: {}", msg),
            ServiceError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            ServiceError::Internal(msg) => write!(f, "Internal error: {}", msg),
            ServiceError::Forbidden(msg) => write!(f, "Forbidden: {}", msg),
        }
    }
}

impl From<WorkflowError> for ServiceError {
    fn from(e: WorkflowError) -> Self {
        match e {
            WorkflowError::Validation(errors) => ServiceError::Validation(errors),
            WorkflowError::NotFound(msg) => ServiceError::NotFound(msg),
            WorkflowError::Unauthorized(msg) => ServiceError::Unauthorized(msg),
            WorkflowError::Forbidden(msg) => ServiceError::Forbidden(msg),
            WorkflowError::Internal(msg) => ServiceError::Internal(msg),
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> axum::http::Response<axum::body::Body> {
        let (status, msg) = match self {
            ServiceError::Validation(errors) => {
                let errors: serde_json::Map<String, serde_json::Value> = errors
                    .iter()
                    .map(|(field, msgs)| (field.to_string(), serde_json::json!(msgs)))
                    .collect();
                let body = serde_json::json!({ "errors": errors });
                return (StatusCode::BAD_REQUEST, axum::Json(body)).into_response();
            }
            ServiceError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ServiceError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            ServiceError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            ServiceError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
        };
        let body = serde_json::json!({ "error": msg });
        (status, axum::Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_codes() {
        let mut errors = FieldErrors::new();
        errors.add("black_id", "Players cannot play themselves");
        let cases = [
            (ServiceError::Validation(errors), StatusCode::BAD_REQUEST),
            (ServiceError::NotFound("x".into()), StatusCode::NOT_FOUND),
            (ServiceError::Unauthorized("x".into()), StatusCode::UNAUTHORIZED),
            (ServiceError::Forbidden("x".into()), StatusCode::FORBIDDEN),
            (
                ServiceError::Internal("x".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (error, status) in cases {
            assert_eq!(error.into_response().status(), status);
        }
    }

    #[test]
    fn test_workflow_error_mapping() {
        assert!(matches!(
            ServiceError::from(WorkflowError::invalid("komi", "Not a valid choice")),
            ServiceError::Validation(e) if e.has("komi")
        ));
        assert!(matches!(
            ServiceError::from(WorkflowError::not_found("Game 1 does not exist")),
            ServiceError::NotFound(msg) if msg == "Game 1 does not exist"
        ));
    }
}
