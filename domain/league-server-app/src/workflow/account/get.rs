use std::sync::Arc;

use crate::{
    domain::{
        RepoRetrieveError,
        account::{Account, AccountId, AccountRepository},
    },
    workflow::WorkflowError,
};

#[async_trait::async_trait]
pub trait GetAccountUseCase {
    async fn get_account(&self, id: AccountId) -> Result<Account, WorkflowError>;
    async fn list_accounts(&self) -> Result<Vec<Account>, WorkflowError>;
}

pub struct GetAccountUseCaseImpl<A: AccountRepository> {
    account_repository: Arc<A>,
}

impl<A: AccountRepository> GetAccountUseCaseImpl<A> {
    pub fn new(account_repository: Arc<A>) -> Self {
        Self { account_repository }
    }
}

#[async_trait::async_trait]
impl<A: AccountRepository + Send + Sync + 'static> GetAccountUseCase for GetAccountUseCaseImpl<A> {
    async fn get_account(&self, id: AccountId) -> Result<Account, WorkflowError> {
        match self.account_repository.get_account(id).await {
            Ok(account) => Ok(account),
            Err(RepoRetrieveError::NotFound) => Err(WorkflowError::not_found(format!(
                "User with id {} does not exist",
                id
            ))),
            Err(e) => Err(e.into()),
        }
    }

    async fn list_accounts(&self) -> Result<Vec<Account>, WorkflowError> {
        let mut accounts = self.account_repository.get_accounts().await?;
        accounts.sort_by(|a, b| a.username.cmp(&b.username));
        Ok(accounts)
    }
}
