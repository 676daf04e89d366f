use axum::{RequestPartsExt, extract::FromRequestParts, http::request::Parts};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
};
use league_server_app::{domain::account::Account, workflow::WorkflowError};

use crate::{AppState, ServiceError};

/// An active account identified by the bearer token of the request.
pub struct Auth(pub Account);

/// Like [`Auth`], but the account must be an administrator.
pub struct AdminAuth(pub Account);

impl FromRequestParts<AppState> for Auth {
    type Rejection = ServiceError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) = parts
            .extract::<TypedHeader<Authorization<Bearer>>>()
            .await
            .map_err(|_| ServiceError::Unauthorized("Missing bearer token".to_string()))?;
        let Some(account_id) = state.keys.validate_jwt(bearer.token()) else {
            return Err(ServiceError::Unauthorized("Invalid token".to_string()));
        };
        let account = match state
            .app
            .account_get_use_case
            .get_account(account_id)
            .await
        {
            Ok(account) => account,
            Err(WorkflowError::NotFound(_)) => {
                return Err(ServiceError::Unauthorized(
                    "Account no longer exists".to_string(),
                ));
            }
            Err(e) => return Err(e.into()),
        };
        if !account.active {
            return Err(ServiceError::Unauthorized(
                "Account is not active".to_string(),
            ));
        }
        Ok(Auth(account))
    }
}

impl FromRequestParts<AppState> for AdminAuth {
    type Rejection = ServiceError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Auth(account) = Auth::from_request_parts(parts, state).await?;
        if !account.is_admin {
            log::info!("Denied admin access to {}", account.username);
            return Err(ServiceError::Forbidden(
                "Administrator access required".to_string(),
            ));
        }
        Ok(AdminAuth(account))
    }
}
