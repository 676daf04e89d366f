use chrono::Utc;
use league_core::{Color, Game, GameId, PlayerId};
use league_server_app::domain::{
    RepoCreateError, RepoError, RepoRetrieveError, RepoUpdateError,
    game::{GameQuery, GameRepository, NewGame},
};
use sqlx::{Pool, Row, Sqlite, sqlite::SqliteRow};

use crate::{from_db_time, to_db_time};

pub struct SqliteGameRepository {
    pool: Pool<Sqlite>,
}

impl SqliteGameRepository {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    fn game_from_row(row: &SqliteRow) -> sqlx::Result<Game> {
        let winner: String = row.try_get("winner")?;
        let winner = winner
            .parse::<Color>()
            .map_err(|e| sqlx::Error::Decode(Box::new(e)))?;
        Ok(Game {
            id: GameId(row.try_get("id")?),
            white: PlayerId(row.try_get("white_id")?),
            black: PlayerId(row.try_get("black_id")?),
            winner,
            handicap: row.try_get("handicap")?,
            komi: row.try_get("komi")?,
            season: row.try_get("season")?,
            episode: row.try_get("episode")?,
            created_at: from_db_time(row.try_get("created_at")?)?,
            played_at: from_db_time(row.try_get("played_at")?)?,
            last_modified_at: from_db_time(row.try_get("last_modified_at")?)?,
        })
    }
}

#[async_trait::async_trait]
impl GameRepository for SqliteGameRepository {
    async fn create_game(&self, game: NewGame) -> Result<Game, RepoCreateError> {
        let now = Utc::now();
        let played_at = game.played_at.unwrap_or(now);
        // Id is auto-incremented
        let res = sqlx::query(
            "INSERT INTO games (white_id, black_id, winner, handicap, komi, season, episode, created_at, played_at, last_modified_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(game.white.0)
        .bind(game.black.0)
        .bind(game.winner.name())
        .bind(game.handicap)
        .bind(game.komi)
        .bind(game.season)
        .bind(game.episode)
        .bind(to_db_time(now))
        .bind(to_db_time(played_at))
        .bind(to_db_time(now))
        .execute(&self.pool)
        .await
        .map_err(|e| RepoCreateError::StorageError(e.to_string()))?;

        let id = GameId(res.last_insert_rowid());
        self.get_game(id).await.map_err(|e| match e {
            RepoRetrieveError::NotFound => {
                RepoCreateError::StorageError(format!("game {} vanished after insert", id))
            }
            RepoRetrieveError::StorageError(e) => RepoCreateError::StorageError(e),
        })
    }

    async fn get_game(&self, id: GameId) -> Result<Game, RepoRetrieveError> {
        let row = match sqlx::query("SELECT * FROM games WHERE id = ?")
            .bind(id.0)
            .fetch_one(&self.pool)
            .await
        {
            Ok(row) => row,
            Err(sqlx::Error::RowNotFound) => return Err(RepoRetrieveError::NotFound),
            Err(e) => return Err(RepoRetrieveError::StorageError(e.to_string())),
        };
        Self::game_from_row(&row).map_err(|e| RepoRetrieveError::StorageError(e.to_string()))
    }

    async fn query_games(&self, filter: GameQuery) -> Result<Vec<Game>, RepoError> {
        let mut query = "SELECT * FROM games".to_string();
        let mut conditions = Vec::new();
        let mut params: Vec<i64> = Vec::new();

        if let Some(season) = filter.season {
            conditions.push("season = ?");
            params.push(season as i64);
        }
        if let Some(episode) = filter.episode {
            conditions.push("episode = ?");
            params.push(episode as i64);
        }
        if let Some(player) = filter.player {
            conditions.push("(white_id = ? OR black_id = ?)");
            params.push(player.0);
            params.push(player.0);
        }

        if !conditions.is_empty() {
            query.push_str(" WHERE ");
            query.push_str(&conditions.join(" AND "));
        }
        query.push_str(" ORDER BY id");

        let mut query = sqlx::query(&query);
        for param in params {
            query = query.bind(param);
        }
        let rows = query
            .fetch_all(&self.pool)
            .await
            .map_err(|e| RepoError::StorageError(e.to_string()))?;
        rows.iter()
            .map(|row| Self::game_from_row(row).map_err(|e| RepoError::StorageError(e.to_string())))
            .collect()
    }

    async fn update_game(&self, id: GameId, game: NewGame) -> Result<Game, RepoUpdateError> {
        let res = sqlx::query(
            "UPDATE games SET white_id = ?, black_id = ?, winner = ?, handicap = ?, komi = ?, season = ?, episode = ?, played_at = COALESCE(?, played_at), last_modified_at = ? WHERE id = ?",
        )
        .bind(game.white.0)
        .bind(game.black.0)
        .bind(game.winner.name())
        .bind(game.handicap)
        .bind(game.komi)
        .bind(game.season)
        .bind(game.episode)
        .bind(game.played_at.map(to_db_time))
        .bind(to_db_time(Utc::now()))
        .bind(id.0)
        .execute(&self.pool)
        .await
        .map_err(|e| RepoUpdateError::StorageError(e.to_string()))?;
        if res.rows_affected() == 0 {
            return Err(RepoUpdateError::NotFound);
        }

        self.get_game(id).await.map_err(|e| match e {
            RepoRetrieveError::NotFound => RepoUpdateError::NotFound,
            RepoRetrieveError::StorageError(e) => RepoUpdateError::StorageError(e),
        })
    }

    async fn delete_games(&self, ids: &[GameId]) -> Result<(), RepoError> {
        if ids.is_empty() {
            return Ok(());
        }
        let query = format!(
            "DELETE FROM games WHERE id IN ({})",
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
