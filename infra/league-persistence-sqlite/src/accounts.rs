use chrono::Utc;
use league_server_app::domain::{
    RepoCreateError, RepoError, RepoRetrieveError,
    account::{Account, AccountId, AccountRepository, NewAccount},
};
use sqlx::{Pool, Row, Sqlite, sqlite::SqliteRow};

use crate::{from_db_time, is_unique_violation, to_db_time};

pub struct SqliteAccountRepository {
    pool: Pool<Sqlite>,
}

impl SqliteAccountRepository {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    fn account_from_row(row: &SqliteRow) -> sqlx::Result<Account> {
        Ok(Account {
            id: AccountId(row.try_get("id")?),
            username: row.try_get("username")?,
            email: row.try_get("email")?,
            password_hash: row.try_get("password")?,
            first_name: row.try_get("first_name")?,
            last_name: row.try_get("last_name")?,
            active: row.try_get("active")?,
            is_admin: row.try_get("is_admin")?,
            created_at: from_db_time(row.try_get("created_at")?)?,
        })
    }

    async fn get_account_where(
        &self,
        column: &str,
        value: &str,
    ) -> Result<Account, RepoRetrieveError> {
        let row = match sqlx::query(&format!("SELECT * FROM accounts WHERE {} = ?", column))
            .bind(value)
            .fetch_one(&self.pool)
            .await
        {
            Ok(row) => row,
            Err(sqlx::Error::RowNotFound) => return Err(RepoRetrieveError::NotFound),
            Err(e) => return Err(RepoRetrieveError::StorageError(e.to_string())),
        };
        Self::account_from_row(&row).map_err(|e| RepoRetrieveError::StorageError(e.to_string()))
    }
}

#[async_trait::async_trait]
impl AccountRepository for SqliteAccountRepository {
    async fn create_account(&self, account: NewAccount) -> Result<Account, RepoCreateError> {
        let created_at = Utc::now();
        let res = sqlx::query(
            "INSERT INTO accounts (username, email, password, first_name, last_name, active, is_admin, created_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&account.username)
        .bind(&account.email)
        .bind(&account.password_hash)
        .bind(&account.first_name)
        .bind(&account.last_name)
        .bind(account.active)
        .bind(account.is_admin)
        .bind(to_db_time(created_at))
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                RepoCreateError::Conflict
            } else {
                RepoCreateError::StorageError(e.to_string())
            }
        })?;

        let id = AccountId(res.last_insert_rowid());
        self.get_account(id).await.map_err(|e| match e {
            RepoRetrieveError::NotFound => {
                RepoCreateError::StorageError(format!("account {} vanished after insert", id))
            }
            RepoRetrieveError::StorageError(e) => RepoCreateError::StorageError(e),
        })
    }

    async fn get_account(&self, id: AccountId) -> Result<Account, RepoRetrieveError> {
        let row = match sqlx::query("SELECT * FROM accounts WHERE id = ?")
            .bind(id.0)
            .fetch_one(&self.pool)
            .await
        {
            Ok(row) => row,
            Err(sqlx::Error::RowNotFound) => return Err(RepoRetrieveError::NotFound),
            Err(e) => return Err(RepoRetrieveError::StorageError(e.to_string())),
        };
        Self::account_from_row(&row).map_err(|e| RepoRetrieveError::StorageError(e.to_string()))
    }

    async fn get_account_by_username(&self, username: &str) -> Result<Account, RepoRetrieveError> {
        self.get_account_where("username", username).await
    }

    async fn get_account_by_email(&self, email: &str) -> Result<Account, RepoRetrieveError> {
        self.get_account_where("email", email).await
    }

    async fn get_accounts(&self) -> Result<Vec<Account>, RepoError> {
        let rows = sqlx::query("SELECT * FROM accounts ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| RepoError::StorageError(e.to_string()))?;
        rows.iter()
            .map(|row| {
                Self::account_from_row(row).map_err(|e| RepoError::StorageError(e.to_string()))
            })
            .collect()
    }

    async fn delete_accounts(&self, ids: &[AccountId]) -> Result<(), RepoError> {
        if ids.is_empty() {
            return Ok(());
        }
        let query = format!(
            "DELETE FROM accounts WHERE id IN ({})",
            ids.iter().map(|_| "?").collect::<Vec<_>>().join(", ")
        );
        let mut query = sqlx::query(&query);
        for id in ids {
            query = query.bind(id.0);
        }
        query
            .execute(&self.pool)
            .await
            .map_err(|e| RepoError::StorageError(e.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory_pool;

    fn new_account(username: &str, email: &str) -> NewAccount {
        NewAccount {
            username: username.into(),
            email: email.into(),
            password_hash: Some("$2b$04$hash".into()),
            first_name: Some("Ada".into()),
            last_name: None,
            active: true,
            is_admin: false,
        }
    }

    #[tokio::test]
    async fn test_account_lifecycle() {
        let repo = SqliteAccountRepository::new(memory_pool().await);
        let ada = repo
            .create_account(new_account("ada", "ada@example.com"))
            .await
            .unwrap();
        assert_eq!(repo.get_account(ada.id).await.unwrap(), ada);
        assert_eq!(repo.get_account_by_username("ada").await.unwrap(), ada);
        assert_eq!(
            repo.get_account_by_email("ada@example.com").await.unwrap(),
            ada
        );
        assert_eq!(ada.last_name, None);

        assert!(matches!(
            repo.create_account(new_account("ada", "other@example.com"))
                .await,
            Err(RepoCreateError::Conflict)
        ));
        assert!(matches!(
            repo.create_account(new_account("bob", "ada@example.com"))
                .await,
            Err(RepoCreateError::Conflict)
        ));

        let bob = repo
            .create_account(new_account("bob", "bob@example.com"))
            .await
            .unwrap();
        repo.delete_accounts(&[ada.id]).await.unwrap();
        let remaining = repo.get_accounts().await.unwrap();
        assert_eq!(remaining, vec![bob]);
        assert!(matches!(
            repo.get_account_by_username("ada").await,
            Err(RepoRetrieveError::NotFound)
        ));
    }
}
