use axum::{Json, extract::State, http::StatusCode};
use league_server_app::{
    domain::account::{Account, AccountId},
    workflow::account::create::CreateAccountInput,
};
use serde::{Deserialize, Serialize};

use crate::{AppState, ServiceError, auth::AdminAuth, extract::JsonBody};

#[derive(Deserialize)]
pub struct JsonLoginRequest {
    username: String,
    password: String,
}

#[derive(Serialize)]
pub struct AuthBody {
    pub token: String,
}

#[derive(Serialize, Debug, PartialEq, Eq)]
pub struct JsonAccount {
    id: i64,
    username: String,
    email: String,
    first_name: Option<String>,
    last_name: Option<String>,
    active: bool,
    is_admin: bool,
    created_at: String,
}

impl From<Account> for JsonAccount {
    fn from(account: Account) -> Self {
        Self {
            id: account.id.0,
            username: account.username,
            email: account.email,
            first_name: account.first_name,
            last_name: account.last_name,
            active: account.active,
            is_admin: account.is_admin,
            created_at: account.created_at.to_rfc3339(),
        }
    }
}

#[derive(Deserialize)]
pub struct JsonCreateAccount {
    username: String,
    email: String,
    password: String,
    first_name: String,
    last_name: String,
    #[serde(default)]
    is_admin: bool,
}

#[derive(Deserialize)]
pub struct JsonDeleteAccounts {
    #[serde(default)]
    ids: Vec<i64>,
}

pub async fn login(
    State(app_state): State<AppState>,
    JsonBody(payload): JsonBody<JsonLoginRequest>,
) -> Result<Json<AuthBody>, ServiceError> {
    let account = app_state
        .app
        .account_login_use_case
        .login(&payload.username, &payload.password)
        .await?;
    let token = app_state.keys.generate_jwt(account.id).map_err(|e| {
        log::error!("Failed to sign token for {}: {}", account.username, e);
        ServiceError::Internal("Failed to create token".to_string())
    })?;
    Ok(Json(AuthBody { token }))
}

pub async fn list_accounts(
    AdminAuth(_): AdminAuth,
    State(app_state): State<AppState>,
) -> Result<Json<Vec<JsonAccount>>, ServiceError> {
    let accounts = app_state.app.account_get_use_case.list_accounts().await?;
    Ok(Json(accounts.into_iter().map(JsonAccount::from).collect()))
}

pub async fn create_account(
    AdminAuth(_): AdminAuth,
    State(app_state): State<AppState>,
    JsonBody(payload): JsonBody<JsonCreateAccount>,
) -> Result<(StatusCode, Json<JsonAccount>), ServiceError> {
    let account = app_state
        .app
        .account_create_use_case
        .create_account(CreateAccountInput {
            first_name: payload.first_name,
            last_name: payload.last_name,
            username: payload.username,
            email: payload.email,
            password: payload.password,
            is_admin: payload.is_admin,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(JsonAccount::from(account))))
}

pub async fn delete_accounts(
    AdminAuth(acting): AdminAuth,
    State(app_state): State<AppState>,
    JsonBody(payload): JsonBody<JsonDeleteAccounts>,
) -> Result<StatusCode, ServiceError> {
    app_state
        .app
        .account_delete_use_case
        .delete_accounts(
            acting.id,
            payload.ids.into_iter().map(AccountId).collect(),
        )
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    #[test]
    fn test_account_json_hides_password() {
        let json = serde_json::to_value(JsonAccount::from(Account {
            id: AccountId(3),
            username: "ada".into(),
            email: "ada@example.com".into(),
            password_hash: Some("$2b$12$secret".into()),
            first_name: Some("Ada".into()),
            last_name: None,
            active: true,
            is_admin: false,
            created_at: Utc::now(),
        }))
        .unwrap();
        assert_eq!(json["username"], "ada");
        assert!(json.get("password_hash").is_none());
        assert!(!json.to_string().contains("secret"));
    }
}
