use std::sync::Arc;

use validator::Validate;

use crate::{
    domain::{
        RepoCreateError, RepoRetrieveError,
        account::{Account, AccountRepository, NewAccount},
    },
    workflow::{FieldErrors, WorkflowError},
};

#[derive(Clone, Debug, Validate)]
pub struct CreateAccountInput {
    #[validate(length(min = 3, max = 25, message = "Field must be between 3 and 25 characters long."))]
    pub first_name: String,
    #[validate(length(min = 3, max = 25, message = "Field must be between 3 and 25 characters long."))]
    pub last_name: String,
    #[validate(length(min = 3, max = 25, message = "Field must be between 3 and 25 characters long."))]
    pub username: String,
    #[validate(
        email(message = "Invalid email address."),
        length(min = 6, max = 40, message = "Field must be between 6 and 40 characters long.")
    )]
    pub email: String,
    #[validate(length(min = 6, max = 40, message = "Field must be between 6 and 40 characters long."))]
    pub password: String,
    pub is_admin: bool,
}

impl CreateAccountInput {
    fn trimmed(self) -> Self {
        Self {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            username: self.username.trim().to_string(),
            email: self.email.trim().to_string(),
            ..self
        }
    }
}

#[async_trait::async_trait]
pub trait CreateAccountUseCase {
    async fn create_account(&self, input: CreateAccountInput) -> Result<Account, WorkflowError>;
}

pub struct CreateAccountUseCaseImpl<A: AccountRepository> {
    account_repository: Arc<A>,
    bcrypt_cost: u32,
}

impl<A: AccountRepository> CreateAccountUseCaseImpl<A> {
    pub fn new(account_repository: Arc<A>, bcrypt_cost: u32) -> Self {
        Self {
            account_repository,
            bcrypt_cost,
        }
    }
}

const USERNAME_TAKEN: &str = "Username already in use";
const EMAIL_TAKEN: &str = "Email already in use";

fn is_taken(lookup: Result<Account, RepoRetrieveError>) -> Result<bool, WorkflowError> {
    match lookup {
        Ok(_) => Ok(true),
        Err(RepoRetrieveError::NotFound) => Ok(false),
        Err(e) => Err(e.into()),
    }
}

impl<A: AccountRepository + Send + Sync + 'static> CreateAccountUseCaseImpl<A> {
    async fn identity_conflicts(
        &self,
        username: &str,
        email: &str,
    ) -> Result<FieldErrors, WorkflowError> {
        let mut errors = FieldErrors::new();
        if is_taken(self.account_repository.get_account_by_username(username).await)? {
            errors.add("username", USERNAME_TAKEN);
        }
        if is_taken(self.account_repository.get_account_by_email(email).await)? {
            errors.add("email", EMAIL_TAKEN);
        }
        Ok(errors)
    }
}

#[async_trait::async_trait]
impl<A: AccountRepository + Send + Sync + 'static> CreateAccountUseCase
    for CreateAccountUseCaseImpl<A>
{
    async fn create_account(&self, input: CreateAccountInput) -> Result<Account, WorkflowError> {
        let input = input.trimmed();
        let mut errors = match input.validate() {
            Ok(()) => FieldErrors::new(),
            Err(e) => FieldErrors::from(e),
        };
        let conflicts = self.identity_conflicts(&input.username, &input.email).await?;
        for (field, messages) in conflicts.iter() {
            if !errors.has(field) {
                for message in messages {
                    errors.add(field, message.clone());
                }
            }
        }
        errors.into_result()?;

        let password_hash = bcrypt::hash(&input.password, self.bcrypt_cost).map_err(|e| {
            log::error!("Failed to hash password: {}", e);
            WorkflowError::Internal("failed to hash password".to_string())
        })?;

        let (username, email) = (input.username.clone(), input.email.clone());
        let account = NewAccount {
            username: input.username,
            email: input.email,
            password_hash: Some(password_hash),
            first_name: Some(input.first_name),
            last_name: Some(input.last_name),
            active: true,
            is_admin: input.is_admin,
        };
        let account = match self.account_repository.create_account(account).await {
            Ok(account) => account,
            Err(RepoCreateError::Conflict) => {
                // Lost a race with another insert; find out which field collided.
                let mut errors = self.identity_conflicts(&username, &email).await?;
                if errors.is_empty() {
                    errors.add("username", USERNAME_TAKEN);
                    errors.add("email", EMAIL_TAKEN);
                }
                return Err(WorkflowError::Validation(errors));
            }
            Err(e) => return Err(e.into()),
        };
        log::info!(
            "Created account {} ({}), admin: {}",
            account.username,
            account.id,
            account.is_admin
        );
        Ok(account)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{RepoError, account::AccountId},
        testing::InMemoryLeague,
    };

    fn input(username: &str, email: &str) -> CreateAccountInput {
        CreateAccountInput {
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            username: username.into(),
            email: email.into(),
            password: "hunter22".into(),
            is_admin: false,
        }
    }

    #[tokio::test]
    async fn test_create_account_hashes_password() {
        let repo = InMemoryLeague::new();
        let use_case = CreateAccountUseCaseImpl::new(repo.clone(), 4);
        let account = use_case
            .create_account(input(" ada ", "ada@example.com"))
            .await
            .unwrap();
        assert_eq!(account.username, "ada");
        assert!(account.active);
        let hash = account.password_hash.unwrap();
        assert_ne!(hash, "hunter22");
        assert!(bcrypt::verify("hunter22", &hash).unwrap());
    }

    #[tokio::test]
    async fn test_duplicate_username_and_email() {
        let repo = InMemoryLeague::new();
        let use_case = CreateAccountUseCaseImpl::new(repo.clone(), 4);
        use_case
            .create_account(input("ada", "ada@example.com"))
            .await
            .unwrap();
        let err = use_case
            .create_account(input("ada", "ada@example.com"))
            .await
            .unwrap_err();
        let WorkflowError::Validation(errors) = err else {
            panic!("expected validation error");
        };
        assert_eq!(
            errors.get("username"),
            Some(&["Username already in use".to_string()][..])
        );
        assert_eq!(
            errors.get("email"),
            Some(&["Email already in use".to_string()][..])
        );
        assert_eq!(repo.account_count(), 1);
    }

    #[tokio::test]
    async fn test_field_lengths() {
        let repo = InMemoryLeague::new();
        let use_case = CreateAccountUseCaseImpl::new(repo.clone(), 4);
        let mut bad = input("ab", "not-an-email");
        bad.password = "123".into();
        let WorkflowError::Validation(errors) = use_case.create_account(bad).await.unwrap_err()
        else {
            panic!("expected validation error");
        };
        assert!(errors.has("username"));
        assert!(errors.has("email"));
        assert!(errors.has("password"));
        assert_eq!(repo.account_count(), 0);
    }

    /// Account store whose lookups miss everything until the first insert,
    /// as if another request had written the row in between.
    struct StaleLookups {
        inner: Arc<InMemoryLeague>,
        stale: std::sync::atomic::AtomicBool,
    }

    impl StaleLookups {
        fn is_stale(&self) -> bool {
            self.stale.load(std::sync::atomic::Ordering::SeqCst)
        }
    }

    #[async_trait::async_trait]
    impl AccountRepository for StaleLookups {
        async fn create_account(&self, account: NewAccount) -> Result<Account, RepoCreateError> {
            self.stale.store(false, std::sync::atomic::Ordering::SeqCst);
            self.inner.create_account(account).await
        }

        async fn get_account(&self, id: AccountId) -> Result<Account, RepoRetrieveError> {
            self.inner.get_account(id).await
        }

        async fn get_account_by_username(
            &self,
            username: &str,
        ) -> Result<Account, RepoRetrieveError> {
            if self.is_stale() {
                return Err(RepoRetrieveError::NotFound);
            }
            self.inner.get_account_by_username(username).await
        }

        async fn get_account_by_email(&self, email: &str) -> Result<Account, RepoRetrieveError> {
            if self.is_stale() {
                return Err(RepoRetrieveError::NotFound);
            }
            self.inner.get_account_by_email(email).await
        }

        async fn get_accounts(&self) -> Result<Vec<Account>, RepoError> {
            self.inner.get_accounts().await
        }

        async fn delete_accounts(&self, ids: &[AccountId]) -> Result<(), RepoError> {
            self.inner.delete_accounts(ids).await
        }
    }

    #[tokio::test]
    async fn test_racing_insert_reports_colliding_field() {
        let inner = InMemoryLeague::new();
        CreateAccountUseCaseImpl::new(inner.clone(), 4)
            .create_account(input("ada", "ada@example.com"))
            .await
            .unwrap();
        let repo = Arc::new(StaleLookups {
            inner: inner.clone(),
            stale: std::sync::atomic::AtomicBool::new(true),
        });
        let use_case = CreateAccountUseCaseImpl::new(repo, 4);
        let WorkflowError::Validation(errors) = use_case
            .create_account(input("grace", "ada@example.com"))
            .await
            .unwrap_err()
        else {
            panic!("expected validation error");
        };
        assert!(!errors.has("username"));
        assert_eq!(errors.get("email"), Some(&[EMAIL_TAKEN.to_string()][..]));
        assert_eq!(inner.account_count(), 1);
    }
}
