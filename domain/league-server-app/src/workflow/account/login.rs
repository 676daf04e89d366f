use std::sync::Arc;

use crate::{
    domain::{
        RepoRetrieveError,
        account::{Account, AccountRepository},
    },
    workflow::WorkflowError,
};

const INVALID_CREDENTIALS: &str = "Invalid username or password";

#[async_trait::async_trait]
pub trait LoginUseCase {
    async fn login(&self, username: &str, password: &str) -> Result<Account, WorkflowError>;
}

pub struct LoginUseCaseImpl<A: AccountRepository> {
    account_repository: Arc<A>,
}

impl<A: AccountRepository> LoginUseCaseImpl<A> {
    pub fn new(account_repository: Arc<A>) -> Self {
        Self { account_repository }
    }
}

#[async_trait::async_trait]
impl<A: AccountRepository + Send + Sync + 'static> LoginUseCase for LoginUseCaseImpl<A> {
    async fn login(&self, username: &str, password: &str) -> Result<Account, WorkflowError> {
        let account = match self
            .account_repository
            .get_account_by_username(username.trim())
            .await
        {
            Ok(account) => account,
            Err(RepoRetrieveError::NotFound) => {
                log::info!("Login attempt for unknown user {}", username);
                return Err(WorkflowError::Unauthorized(INVALID_CREDENTIALS.to_string()));
            }
            Err(e) => return Err(e.into()),
        };

        let Some(hash) = account.password_hash.as_deref() else {
            return Err(WorkflowError::Unauthorized(INVALID_CREDENTIALS.to_string()));
        };
        let valid = bcrypt::verify(password, hash).map_err(|e| {
            log::error!("Failed to verify password hash of {}: {}", account.username, e);
            WorkflowError::Internal("failed to verify password".to_string())
        })?;
        if !valid {
            log::info!("Failed login for {}", account.username);
            return Err(WorkflowError::Unauthorized(INVALID_CREDENTIALS.to_string()));
        }
        if !account.active {
            return Err(WorkflowError::Unauthorized(
                "Account is not active".to_string(),
            ));
        }
        log::info!("User {} logged in", account.username);
        Ok(account)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{domain::account::NewAccount, testing::InMemoryLeague};

    async fn seed(repo: &InMemoryLeague, active: bool) {
        repo.create_account(NewAccount {
            username: "ada".into(),
            email: "ada@example.com".into(),
            password_hash: Some(bcrypt::hash("hunter22", 4).unwrap()),
            first_name: None,
            last_name: None,
            active,
            is_admin: true,
        })
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn test_login() {
        let repo = InMemoryLeague::new();
        seed(&repo, true).await;
        let use_case = LoginUseCaseImpl::new(repo);
        let account = use_case.login("ada", "hunter22").await.unwrap();
        assert!(account.is_admin);
        assert!(matches!(
            use_case.login("ada", "wrong").await,
            Err(WorkflowError::Unauthorized(_))
        ));
        assert!(matches!(
            use_case.login("bob", "hunter22").await,
            Err(WorkflowError::Unauthorized(_))
        ));
    }

    #[tokio::test]
    async fn test_inactive_account() {
        let repo = InMemoryLeague::new();
        seed(&repo, false).await;
        let use_case = LoginUseCaseImpl::new(repo);
        assert!(matches!(
            use_case.login("ada", "hunter22").await,
            Err(WorkflowError::Unauthorized(msg)) if msg == "Account is not active"
        ));
    }
}
