use std::sync::Arc;

use crate::{
    domain::{
        RepoRetrieveError,
        account::{AccountRepository, NewAccount},
    },
    workflow::{
        WorkflowError,
        account::{ROOT_EMAIL, ROOT_USERNAME},
    },
};

#[async_trait::async_trait]
pub trait EnsureRootAccountUseCase {
    /// Creates the `root` administrator when it is missing. Returns whether
    /// an account was created.
    async fn ensure_root_account(&self, password: &str) -> Result<bool, WorkflowError>;
}

pub struct EnsureRootAccountUseCaseImpl<A: AccountRepository> {
    account_repository: Arc<A>,
    bcrypt_cost: u32,
}

impl<A: AccountRepository> EnsureRootAccountUseCaseImpl<A> {
    pub fn new(account_repository: Arc<A>, bcrypt_cost: u32) -> Self {
        Self {
            account_repository,
            bcrypt_cost,
        }
    }
}

#[async_trait::async_trait]
impl<A: AccountRepository + Send + Sync + 'static> EnsureRootAccountUseCase
    for EnsureRootAccountUseCaseImpl<A>
{
    async fn ensure_root_account(&self, password: &str) -> Result<bool, WorkflowError> {
        match self
            .account_repository
            .get_account_by_username(ROOT_USERNAME)
            .await
        {
            Ok(_) => return Ok(false),
            Err(RepoRetrieveError::NotFound) => {}
            Err(e) => return Err(e.into()),
        }
        let password_hash = bcrypt::hash(password, self.bcrypt_cost).map_err(|e| {
            log::error!("Failed to hash root password: {}", e);
            WorkflowError::Internal("failed to hash password".to_string())
        })?;
        self.account_repository
            .create_account(NewAccount {
                username: ROOT_USERNAME.to_string(),
                email: ROOT_EMAIL.to_string(),
                password_hash: Some(password_hash),
                first_name: None,
                last_name: None,
                active: true,
                is_admin: true,
            })
            .await?;
        log::warn!("Created missing root account");
        Ok(true)
    }
}
