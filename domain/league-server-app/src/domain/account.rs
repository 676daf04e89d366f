use chrono::{DateTime, Utc};

use crate::domain::{RepoCreateError, RepoError, RepoRetrieveError};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AccountId(pub i64);

impl std::fmt::Display for AccountId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Account {
    pub id: AccountId,
    pub username: String,
    pub email: String,
    pub password_hash: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub active: bool,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Clone, Debug)]
pub struct NewAccount {
    pub username: String,
    pub email: String,
    pub password_hash: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub active: bool,
    pub is_admin: bool,
}

#[async_trait::async_trait]
pub trait AccountRepository {
    /// Fails with `Conflict` when the username or email is taken.
    async fn create_account(&self, account: NewAccount) -> Result<Account, RepoCreateError>;
    async fn get_account(&self, id: AccountId) -> Result<Account, RepoRetrieveError>;
    async fn get_account_by_username(&self, username: &str) -> Result<Account, RepoRetrieveError>;
    async fn get_account_by_email(&self, email: &str) -> Result<Account, RepoRetrieveError>;
    async fn get_accounts(&self) -> Result<Vec<Account>, RepoError>;
    async fn delete_accounts(&self, ids: &[AccountId]) -> Result<(), RepoError>;
}
