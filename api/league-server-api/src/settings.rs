use axum::{Json, extract::State, http::StatusCode};
use league_server_app::{
    domain::settings::{ChatSettings, DEFAULT_CHAT_ICON_EMOJI, DEFAULT_CHAT_USERNAME},
    workflow::settings::update::ChatSettingsInput,
};
use serde::{Deserialize, Serialize};

use crate::{AppState, ServiceError, auth::AdminAuth, extract::JsonBody};

#[derive(Serialize, Debug, PartialEq, Eq)]
pub struct JsonChatSettings {
    enabled: bool,
    webhook: Option<String>,
    channel: Option<String>,
    username: String,
    icon_emoji: String,
}

impl From<ChatSettings> for JsonChatSettings {
    fn from(settings: ChatSettings) -> Self {
        Self {
            enabled: settings.enabled,
            webhook: settings.webhook,
            channel: settings.channel,
            username: settings.username,
            icon_emoji: settings.icon_emoji,
        }
    }
}

fn default_username() -> String {
    DEFAULT_CHAT_USERNAME.to_string()
}

fn default_icon_emoji() -> String {
    DEFAULT_CHAT_ICON_EMOJI.to_string()
}

#[derive(Deserialize)]
pub struct JsonUpdateChatSettings {
    enabled: bool,
    #[serde(default)]
    webhook: Option<String>,
    #[serde(default)]
    channel: Option<String>,
    #[serde(default = "default_username")]
    username: String,
    #[serde(default = "default_icon_emoji")]
    icon_emoji: String,
}

pub async fn get_chat_settings(
    AdminAuth(_): AdminAuth,
    State(app_state): State<AppState>,
) -> Result<Json<JsonChatSettings>, ServiceError> {
    let settings = app_state.app.settings_get_use_case.get_chat_settings().await?;
    Ok(Json(JsonChatSettings::from(settings)))
}

pub async fn update_chat_settings(
    AdminAuth(account): AdminAuth,
    State(app_state): State<AppState>,
    JsonBody(payload): JsonBody<JsonUpdateChatSettings>,
) -> Result<Json<JsonChatSettings>, ServiceError> {
    let settings = app_state
        .app
        .settings_update_use_case
        .update_chat_settings(ChatSettingsInput {
            enabled: payload.enabled,
            webhook: payload.webhook,
            channel: payload.channel,
            username: payload.username,
            icon_emoji: payload.icon_emoji,
        })
        .await?;
    log::info!("Chat settings changed by {}", account.username);
    Ok(Json(JsonChatSettings::from(settings)))
}

pub async fn send_test_message(
    AdminAuth(_): AdminAuth,
    State(app_state): State<AppState>,
) -> Result<StatusCode, ServiceError> {
    app_state
        .app
        .settings_test_message_use_case
        .send_test_message()
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
