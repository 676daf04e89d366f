use league_server_app::domain::{RepoError, settings::SettingsRepository};
use sqlx::{Pool, Row, Sqlite};

pub struct SqliteSettingsRepository {
    pool: Pool<Sqlite>,
}

impl SqliteSettingsRepository {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }
}

fn storage_error(e: sqlx::Error) -> RepoError {
    RepoError::StorageError(e.to_string())
}

#[async_trait::async_trait]
impl SettingsRepository for SqliteSettingsRepository {
    async fn get_settings(&self, prefix: &str) -> Result<Vec<(String, String)>, RepoError> {
        // instr instead of LIKE: `_` in the prefix must match literally.
        let rows = sqlx::query("SELECT key, value FROM config_data WHERE instr(key, ?) = 1")
            .bind(prefix)
            .fetch_all(&self.pool)
            .await
            .map_err(storage_error)?;
        rows.iter()
            .map(|row| -> sqlx::Result<(String, String)> {
                Ok((row.try_get("key")?, row.try_get("value")?))
            })
            .collect::<sqlx::Result<Vec<_>>>()
            .map_err(storage_error)
    }

    async fn save_settings(&self, entries: &[(String, String)]) -> Result<(), RepoError> {
        let mut tx = self.pool.begin().await.map_err(storage_error)?;
        for (key, value) in entries {
            sqlx::query(
                "INSERT INTO config_data (key, value) VALUES (?, ?) \
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            )
            .bind(key)
            .bind(value)
            .execute(&mut *tx)
            .await
            .map_err(storage_error)?;
        }
        tx.commit().await.map_err(storage_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory_pool;

    fn entry(key: &str, value: &str) -> (String, String) {
        (key.to_string(), value.to_string())
    }

    #[tokio::test]
    async fn test_save_replaces_and_filters_by_prefix() {
        let repo = SqliteSettingsRepository::new(memory_pool().await);
        assert!(repo.get_settings("slack_").await.unwrap().is_empty());

        repo.save_settings(&[entry("slack_url", "a"), entry("slackXother", "b")])
            .await
            .unwrap();
        repo.save_settings(&[entry("slack_url", "c")]).await.unwrap();

        assert_eq!(
            repo.get_settings("slack_").await.unwrap(),
            vec![entry("slack_url", "c")]
        );
    }
}
