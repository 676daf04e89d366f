use std::sync::Arc;

use crate::{
    domain::{
        RepoRetrieveError,
        account::{AccountId, AccountRepository},
    },
    workflow::{FieldErrors, WorkflowError},
};

#[async_trait::async_trait]
pub trait DeleteAccountsUseCase {
    /// Deletes every listed account, or none of them if any id is rejected.
    async fn delete_accounts(
        &self,
        acting: AccountId,
        ids: Vec<AccountId>,
    ) -> Result<(), WorkflowError>;
}

pub struct DeleteAccountsUseCaseImpl<A: AccountRepository> {
    account_repository: Arc<A>,
}

impl<A: AccountRepository> DeleteAccountsUseCaseImpl<A> {
    pub fn new(account_repository: Arc<A>) -> Self {
        Self { account_repository }
    }
}

#[async_trait::async_trait]
impl<A: AccountRepository + Send + Sync + 'static> DeleteAccountsUseCase
    for DeleteAccountsUseCaseImpl<A>
{
    async fn delete_accounts(
        &self,
        acting: AccountId,
        ids: Vec<AccountId>,
    ) -> Result<(), WorkflowError> {
        if ids.is_empty() {
            return Err(WorkflowError::invalid("ids", "This field is required."));
        }
        let mut errors = FieldErrors::new();
        for &id in &ids {
            if id == acting {
                errors.add("ids", "You cannot delete yourself!");
                continue;
            }
            match self.account_repository.get_account(id).await {
                Ok(_) => {}
                Err(RepoRetrieveError::NotFound) => {
                    errors.add("ids", format!("User with id {} does not exist", id));
                }
                Err(e) => return Err(e.into()),
            }
        }
        errors.into_result()?;

        self.account_repository.delete_accounts(&ids).await?;
        log::info!("Account {} deleted accounts {:?}", acting, ids);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::account::NewAccount,
        testing::InMemoryLeague,
    };

    async fn account(repo: &InMemoryLeague, username: &str) -> AccountId {
        repo.create_account(NewAccount {
            username: username.into(),
            email: format!("{}@example.com", username),
            password_hash: None,
            first_name: None,
            last_name: None,
            active: true,
            is_admin: false,
        })
        .await
        .unwrap()
        .id
    }

    #[tokio::test]
    async fn test_delete_accounts() {
        let repo = InMemoryLeague::new();
        let root = account(&repo, "root").await;
        let other = account(&repo, "other").await;
        let use_case = DeleteAccountsUseCaseImpl::new(repo.clone());
        use_case.delete_accounts(root, vec![other]).await.unwrap();
        assert_eq!(repo.account_count(), 1);
    }

    #[tokio::test]
    async fn test_cannot_delete_self_or_missing() {
        let repo = InMemoryLeague::new();
        let root = account(&repo, "root").await;
        let other = account(&repo, "other").await;
        let use_case = DeleteAccountsUseCaseImpl::new(repo.clone());
        let err = use_case
            .delete_accounts(root, vec![root, other, AccountId(99)])
            .await
            .unwrap_err();
        let WorkflowError::Validation(errors) = err else {
            panic!("expected validation error");
        };
        assert_eq!(
            errors.get("ids"),
            Some(
                &[
                    "You cannot delete yourself!".to_string(),
                    "User with id 99 does not exist".to_string()
                ][..]
            )
        );
        assert_eq!(repo.account_count(), 2);
    }

    #[tokio::test]
    async fn test_empty_selection() {
        let repo = InMemoryLeague::new();
        let use_case = DeleteAccountsUseCaseImpl::new(repo);
        assert!(matches!(
            use_case.delete_accounts(AccountId(1), vec![]).await,
            Err(WorkflowError::Validation(e)) if e.has("ids")
        ));
    }
}
