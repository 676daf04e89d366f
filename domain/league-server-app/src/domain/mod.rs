use thiserror::Error;

pub mod account;
pub mod announcement;
pub mod game;
pub mod player;
pub mod settings;

pub use league_core::{GameId, PlayerId};

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("storage error: {0}")]
    StorageError(String),
}

#[derive(Debug, Error)]
pub enum RepoRetrieveError {
    #[error("resource not found")]
    NotFound,
    #[error("storage error: {0}")]
    StorageError(String),
}

#[derive(Debug, Error)]
pub enum RepoCreateError {
    #[error("resource conflict")]
    Conflict,
    #[error("storage error: {0}")]
    StorageError(String),
}

#[derive(Debug, Error)]
pub enum RepoUpdateError {
    #[error("resource not found")]
    NotFound,
    #[error("resource conflict")]
    Conflict,
    #[error("storage error: {0}")]
    StorageError(String),
}
