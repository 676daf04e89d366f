use league_core::{Player, PlayerId};
use league_server_app::domain::{
    RepoCreateError, RepoError, RepoRetrieveError, RepoUpdateError,
    player::{NewPlayer, PlayerRepository},
};
use sqlx::{
    Pool, Row, Sqlite,
    query::Query,
    sqlite::{SqliteArguments, SqliteRow},
};

use crate::{is_foreign_key_violation, is_unique_violation};

pub struct SqlitePlayerRepository {
    pool: Pool<Sqlite>,
}

impl SqlitePlayerRepository {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    fn player_from_row(row: &SqliteRow) -> sqlx::Result<Player> {
        Ok(Player {
            id: PlayerId(row.try_get("id")?),
            first_name: row.try_get("first_name")?,
            last_name: row.try_get("last_name")?,
            aga_id: row.try_get("aga_id")?,
            rank: row.try_get("rank")?,
        })
    }

    async fn fetch_one<'q>(
        &self,
        query: Query<'q, Sqlite, SqliteArguments<'q>>,
    ) -> Result<Player, RepoRetrieveError> {
        let row = match query.fetch_one(&self.pool).await {
            Ok(row) => row,
            Err(sqlx::Error::RowNotFound) => return Err(RepoRetrieveError::NotFound),
            Err(e) => return Err(RepoRetrieveError::StorageError(e.to_string())),
        };
        Self::player_from_row(&row).map_err(|e| RepoRetrieveError::StorageError(e.to_string()))
    }
}

#[async_trait::async_trait]
impl PlayerRepository for SqlitePlayerRepository {
    async fn create_player(&self, player: NewPlayer) -> Result<Player, RepoCreateError> {
        // Id is auto-incremented
        let res = sqlx::query(
            "INSERT INTO players (first_name, last_name, aga_id, rank) VALUES (?, ?, ?, ?)",
        )
        .bind(&player.first_name)
        .bind(&player.last_name)
        .bind(player.aga_id)
        .bind(player.rank)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                RepoCreateError::Conflict
            } else {
                RepoCreateError::StorageError(e.to_string())
            }
        })?;

        Ok(Player {
            id: PlayerId(res.last_insert_rowid()),
            first_name: player.first_name,
            last_name: player.last_name,
            aga_id: player.aga_id,
            rank: player.rank,
        })
    }

    async fn get_player(&self, id: PlayerId) -> Result<Player, RepoRetrieveError> {
        self.fetch_one(sqlx::query("SELECT * FROM players WHERE id = ?").bind(id.0))
            .await
    }

    async fn get_player_by_aga_id(&self, aga_id: i32) -> Result<Player, RepoRetrieveError> {
        self.fetch_one(sqlx::query("SELECT * FROM players WHERE aga_id = ?").bind(aga_id))
            .await
    }

    async fn get_players(&self) -> Result<Vec<Player>, RepoError> {
        let rows = sqlx::query("SELECT * FROM players ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| RepoError::StorageError(e.to_string()))?;
        rows.iter()
            .map(|row| {
                Self::player_from_row(row).map_err(|e| RepoError::StorageError(e.to_string()))
            })
            .collect()
    }

    async fn delete_player(&self, id: PlayerId) -> Result<(), RepoUpdateError> {
        let referenced: bool = sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM games WHERE white_id = ? OR black_id = ?)",
        )
        .bind(id.0)
        .bind(id.0)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| RepoUpdateError::StorageError(e.to_string()))?;
        if referenced {
            return Err(RepoUpdateError::Conflict);
        }

        let res = sqlx::query("DELETE FROM players WHERE id = ?")
            .bind(id.0)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if is_foreign_key_violation(&e) {
                    RepoUpdateError::Conflict
                } else {
                    RepoUpdateError::StorageError(e.to_string())
                }
            })?;
        if res.rows_affected() == 0 {
            return Err(RepoUpdateError::NotFound);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory_pool;

    fn new_player(aga_id: i32) -> NewPlayer {
        NewPlayer {
            first_name: "Go".into(),
            last_name: "Seigen".into(),
            aga_id,
            rank: 9,
        }
    }

    #[tokio::test]
    async fn test_create_and_fetch() {
        let repo = SqlitePlayerRepository::new(memory_pool().await);
        let created = repo.create_player(new_player(100)).await.unwrap();
        assert_eq!(repo.get_player(created.id).await.unwrap(), created);
        assert_eq!(repo.get_player_by_aga_id(100).await.unwrap(), created);
        assert!(matches!(
            repo.get_player(PlayerId(999)).await,
            Err(RepoRetrieveError::NotFound)
        ));
        assert!(matches!(
            repo.create_player(new_player(100)).await,
            Err(RepoCreateError::Conflict)
        ));
        assert_eq!(repo.get_players().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_delete() {
        let repo = SqlitePlayerRepository::new(memory_pool().await);
        let created = repo.create_player(new_player(100)).await.unwrap();
        repo.delete_player(created.id).await.unwrap();
        assert!(matches!(
            repo.delete_player(created.id).await,
            Err(RepoUpdateError::NotFound)
        ));
    }
}
