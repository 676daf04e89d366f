use chrono::{DateTime, Utc};
use league_core::{Color, Game, GameId, PlayerId};

use crate::domain::{RepoCreateError, RepoError, RepoRetrieveError, RepoUpdateError};

/// Field values of a game as written by an administrator. On update a
/// missing `played_at` keeps the stored value; on create it defaults to now.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewGame {
    pub white: PlayerId,
    pub black: PlayerId,
    pub winner: Color,
    pub handicap: u8,
    pub komi: u8,
    pub season: u32,
    pub episode: u32,
    pub played_at: Option<DateTime<Utc>>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GameQuery {
    pub season: Option<u32>,
    pub episode: Option<u32>,
    pub player: Option<PlayerId>,
}

impl GameQuery {
    pub fn all() -> Self {
        Self::default()
    }

    /// Episode 0 selects the whole season.
    pub fn for_period(season: u32, episode: u32) -> Self {
        Self {
            season: Some(season),
            episode: (episode > 0).then_some(episode),
            player: None,
        }
    }

    pub fn for_player(player: PlayerId) -> Self {
        Self {
            player: Some(player),
            ..Self::default()
        }
    }

    pub fn matches(&self, game: &Game) -> bool {
        self.season.is_none_or(|s| game.season == s)
            && self.episode.is_none_or(|e| game.episode == e)
            && self.player.is_none_or(|p| game.involves(p))
    }
}

/// Storage of the game ledger. Queries return games in ascending id order.
#[async_trait::async_trait]
pub trait GameRepository {
    async fn create_game(&self, game: NewGame) -> Result<Game, RepoCreateError>;
    async fn get_game(&self, id: GameId) -> Result<Game, RepoRetrieveError>;
    async fn query_games(&self, query: GameQuery) -> Result<Vec<Game>, RepoError>;
    /// Refreshes `last_modified_at`.
    async fn update_game(&self, id: GameId, game: NewGame) -> Result<Game, RepoUpdateError>;
    async fn delete_games(&self, ids: &[GameId]) -> Result<(), RepoError>;
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn game(white: i64, black: i64, season: u32, episode: u32) -> Game {
        let now = Utc::now();
        Game {
            id: GameId(1),
            white: PlayerId(white),
            black: PlayerId(black),
            winner: Color::White,
            handicap: 0,
            komi: 7,
            season,
            episode,
            created_at: now,
            played_at: now,
            last_modified_at: now,
        }
    }

    #[test]
    fn test_query_matching() {
        let g = game(1, 2, 3, 4);
        assert!(GameQuery::all().matches(&g));
        assert!(GameQuery::for_period(3, 4).matches(&g));
        assert!(GameQuery::for_period(3, 0).matches(&g));
        assert!(!GameQuery::for_period(3, 5).matches(&g));
        assert!(GameQuery::for_player(PlayerId(2)).matches(&g));
        assert!(!GameQuery::for_player(PlayerId(5)).matches(&g));
    }
}
