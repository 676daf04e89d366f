use std::{collections::BTreeMap, fmt};

use thiserror::Error;
use validator::ValidationErrors;

use crate::domain::{RepoCreateError, RepoError, RepoRetrieveError, RepoUpdateError};

pub mod account;
pub mod game;
pub mod player;
pub mod report;
pub mod settings;
pub mod stats;

pub const NOT_A_VALID_CHOICE: &str = "Not a valid choice";

/// Validation messages keyed by input field.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn has(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn into_result(self) -> Result<(), WorkflowError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(WorkflowError::Validation(self))
        }
    }
}

impl From<ValidationErrors> for FieldErrors {
    fn from(errors: ValidationErrors) -> Self {
        let mut out = FieldErrors::new();
        for (field, errs) in errors.field_errors() {
            for err in errs.iter() {
                let message = err
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| err.code.to_string());
                out.add(&field, message);
            }
        }
        out
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .iter()
            .flat_map(|(field, msgs)| msgs.iter().map(move |m| format!("{} - {}", field, m)))
            .collect();
        f.write_str(&parts.join("; "))
    }
}

#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("validation failed: {0}")]
    Validation(FieldErrors),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("unauthorized: {0}")]
    Unauthorized(String),
    #[error("forbidden: {0}")]
    Forbidden(String),
    #[error("internal error: {0}")]
    Internal(String),
}

impl WorkflowError {
    pub fn invalid(field: &str, message: impl Into<String>) -> Self {
        let mut errors = FieldErrors::new();
        errors.add(field, message);
        WorkflowError::Validation(errors)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        WorkflowError::NotFound(message.into())
    }

    fn storage(e: impl fmt::Display) -> Self {
        log::error!("Storage failure: {}", e);
        WorkflowError::Internal("storage failure".to_string())
    }
}

impl From<RepoError> for WorkflowError {
    fn from(e: RepoError) -> Self {
        WorkflowError::storage(e)
    }
}

impl From<RepoRetrieveError> for WorkflowError {
    fn from(e: RepoRetrieveError) -> Self {
        match e {
            RepoRetrieveError::NotFound => WorkflowError::not_found("resource not found"),
            RepoRetrieveError::StorageError(e) => WorkflowError::storage(e),
        }
    }
}

impl From<RepoCreateError> for WorkflowError {
    fn from(e: RepoCreateError) -> Self {
        WorkflowError::storage(e)
    }
}

impl From<RepoUpdateError> for WorkflowError {
    fn from(e: RepoUpdateError) -> Self {
        match e {
            RepoUpdateError::NotFound => WorkflowError::not_found("resource not found"),
            e => WorkflowError::storage(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use validator::Validate;

    use super::*;

    #[derive(Validate)]
    struct Sample {
        #[validate(range(min = 1, max = 3, message = "out of range"))]
        value: i32,
        #[validate(length(min = 3))]
        name: String,
    }

    #[test]
    fn test_field_errors_from_validator() {
        let errors = Sample {
            value: 9,
            name: "a".into(),
        }
        .validate()
        .unwrap_err();
        let errors = FieldErrors::from(errors);
        assert_eq!(errors.get("value"), Some(&["out of range".to_string()][..]));
        assert_eq!(errors.get("name"), Some(&["length".to_string()][..]));
    }

    #[test]
    fn test_into_result() {
        assert!(FieldErrors::new().into_result().is_ok());
        let mut errors = FieldErrors::new();
        errors.add("black_id", "Players cannot play themselves");
        assert_eq!(errors.to_string(), "black_id - Players cannot play themselves");
        assert!(matches!(
            errors.into_result(),
            Err(WorkflowError::Validation(e)) if e.has("black_id")
        ));
    }
}
