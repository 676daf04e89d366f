use std::sync::Arc;

use league_core::{
    Player, SeasonEpisode,
    leaderboard::{DEFAULT_LEADERBOARD_LIMIT, episode_leaderboard},
    stats::latest_season_episode,
};
use validator::Validate;

use crate::{
    domain::{
        game::{GameQuery, GameRepository},
        player::PlayerRepository,
    },
    workflow::{FieldErrors, WorkflowError, stats::resolve_counts},
};

#[derive(Clone, Debug, Default, Validate)]
pub struct LeaderboardQuery {
    #[validate(range(min = 0, max = 10000, message = "Number must be between 0 and 10000."))]
    pub season: Option<i64>,
    #[validate(range(min = 0, max = 10000, message = "Number must be between 0 and 10000."))]
    pub episode: Option<i64>,
    #[validate(range(min = 1, max = 100, message = "Number must be between 1 and 100."))]
    pub limit: Option<i64>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LeaderboardView {
    pub period: SeasonEpisode,
    pub wins: Vec<(Player, u32)>,
    pub games_played: Vec<(Player, u32)>,
    pub stones_given: Vec<(Player, u32)>,
}

#[async_trait::async_trait]
pub trait EpisodeLeaderboardUseCase {
    /// Missing `season` or `episode` fall back to the latest period in the
    /// ledger.
    async fn episode_leaderboard(
        &self,
        query: LeaderboardQuery,
    ) -> Result<LeaderboardView, WorkflowError>;
}

pub struct EpisodeLeaderboardUseCaseImpl<P: PlayerRepository, G: GameRepository> {
    player_repository: Arc<P>,
    game_repository: Arc<G>,
}

impl<P: PlayerRepository, G: GameRepository> EpisodeLeaderboardUseCaseImpl<P, G> {
    pub fn new(player_repository: Arc<P>, game_repository: Arc<G>) -> Self {
        Self {
            player_repository,
            game_repository,
        }
    }
}

#[async_trait::async_trait]
impl<P, G> EpisodeLeaderboardUseCase for EpisodeLeaderboardUseCaseImpl<P, G>
where
    P: PlayerRepository + Send + Sync + 'static,
    G: GameRepository + Send + Sync + 'static,
{
    async fn episode_leaderboard(
        &self,
        query: LeaderboardQuery,
    ) -> Result<LeaderboardView, WorkflowError> {
        if let Err(e) = query.validate() {
            return Err(WorkflowError::Validation(FieldErrors::from(e)));
        }
        let games = self.game_repository.query_games(GameQuery::all()).await?;
        let latest = latest_season_episode(&games);
        // Ranges were checked above.
        let period = SeasonEpisode::new(
            query.season.map_or(latest.season, |s| s as u32),
            query.episode.map_or(latest.episode, |e| e as u32),
        );
        let limit = query
            .limit
            .map_or(DEFAULT_LEADERBOARD_LIMIT, |l| l as usize);

        let board = episode_leaderboard(&games, period, limit);
        let mut columns = resolve_counts(
            self.player_repository.as_ref(),
            &[board.wins, board.games_played, board.stones_given],
        )
        .await?
        .into_iter();
        Ok(LeaderboardView {
            period,
            wins: columns.next().unwrap_or_default(),
            games_played: columns.next().unwrap_or_default(),
            stones_given: columns.next().unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use league_core::Color;

    use super::*;
    use crate::testing::InMemoryLeague;

    #[tokio::test]
    async fn test_leaderboard_for_latest_episode() {
        let repo = InMemoryLeague::new();
        let a = repo.add_player("Go", "Seigen", 1);
        let b = repo.add_player("Kitani", "Minoru", 2);
        let c = repo.add_player("Honinbo", "Shusaku", 3);
        repo.add_game(a.id, b.id, Color::White, 1, 1);
        repo.add_game(b.id, c.id, Color::Black, 1, 2);
        repo.add_game(a.id, c.id, Color::Black, 1, 2);
        let use_case = EpisodeLeaderboardUseCaseImpl::new(repo.clone(), repo.clone());

        let view = use_case
            .episode_leaderboard(LeaderboardQuery::default())
            .await
            .unwrap();
        assert_eq!(view.period, SeasonEpisode::new(1, 2));
        assert_eq!(view.wins, vec![(c.clone(), 2)]);
        assert_eq!(
            view.games_played,
            vec![(c.clone(), 2), (b.clone(), 1), (a.clone(), 1)]
        );
        assert!(view.stones_given.is_empty());

        let view = use_case
            .episode_leaderboard(LeaderboardQuery {
                season: Some(1),
                episode: Some(1),
                limit: Some(1),
            })
            .await
            .unwrap();
        assert_eq!(view.wins, vec![(a, 1)]);
        assert_eq!(view.games_played.len(), 1);
    }

    #[tokio::test]
    async fn test_negative_episode_rejected() {
        let repo = InMemoryLeague::new();
        let use_case = EpisodeLeaderboardUseCaseImpl::new(repo.clone(), repo.clone());
        let result = use_case
            .episode_leaderboard(LeaderboardQuery {
                episode: Some(-1),
                ..LeaderboardQuery::default()
            })
            .await;
        assert!(matches!(result, Err(WorkflowError::Validation(e)) if e.has("episode")));
    }
}
