use axum::{
    Json,
    extract::{
        FromRequest, FromRequestParts, Query, Request,
        rejection::{JsonRejection, QueryRejection},
    },
    http::request::Parts,
};
use league_server_app::workflow::FieldErrors;
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::ServiceError;

const JSON_DATA_PREFIX: &str = "Failed to deserialize the JSON body into the target type: ";
const QUERY_PREFIX: &str = "Failed to deserialize query string: ";

/// [`Json`] whose rejections are reported as field errors.
pub struct JsonBody<T>(pub T);

/// [`Query`] whose rejections are reported as field errors.
pub struct QueryParams<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ServiceError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(JsonBody(value)),
            Err(rejection) => Err(ServiceError::Validation(json_errors(&rejection))),
        }
    }
}

impl<S, T> FromRequestParts<S> for QueryParams<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ServiceError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Query::<T>::from_request_parts(parts, state).await {
            Ok(Query(value)) => Ok(QueryParams(value)),
            Err(rejection) => Err(ServiceError::Validation(query_errors(&rejection))),
        }
    }
}

/// Runs the `validator` rules of an extracted value.
pub fn validated<T: Validate>(value: T) -> Result<T, ServiceError> {
    value
        .validate()
        .map_err(|e| ServiceError::Validation(FieldErrors::from(e)))?;
    Ok(value)
}

fn json_errors(rejection: &JsonRejection) -> FieldErrors {
    let text = rejection.body_text();
    match rejection {
        JsonRejection::JsonDataError(_) => match text.strip_prefix(JSON_DATA_PREFIX) {
            Some(detail) => deserialize_errors(detail, "body"),
            None => single("body", text),
        },
        _ => single("body", text),
    }
}

fn query_errors(rejection: &QueryRejection) -> FieldErrors {
    let text = rejection.body_text();
    match text.strip_prefix(QUERY_PREFIX) {
        Some(detail) => deserialize_errors(detail, "query"),
        None => single("query", text),
    }
}

fn single(field: &str, message: String) -> FieldErrors {
    let mut errors = FieldErrors::new();
    errors.add(field, message);
    errors
}

/// Splits a serde error such as ``rank: invalid type: string "x", expected i64``
/// or ``missing field `komi` at line 1 column 2`` into a field and a message.
fn deserialize_errors(detail: &str, fallback: &str) -> FieldErrors {
    let detail = match detail.find(" at line ") {
        Some(pos) => &detail[..pos],
        None => detail,
    };
    let (path, message) = match detail.split_once(": ") {
        Some((path, message)) if !path.is_empty() && !path.contains(' ') => (Some(path), message),
        _ => (None, detail),
    };
    if let Some(missing) = message
        .strip_prefix("missing field `")
        .and_then(|rest| rest.strip_suffix('`'))
    {
        let field = match path {
            Some(path) => format!("{}.{}", path, missing),
            None => missing.to_string(),
        };
        return single(&field, "This field is required.".to_string());
    }
    single(path.unwrap_or(fallback), message.to_string())
}
