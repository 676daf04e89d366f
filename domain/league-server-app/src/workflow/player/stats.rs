use std::sync::Arc;

use league_core::{
    Game, PlayerId, SeasonEpisode,
    stats::{latest_season_episode, player_stats},
};

use crate::{
    domain::{
        game::{GameQuery, GameRepository},
        player::PlayerRepository,
    },
    workflow::{WorkflowError, player::{PlayerStatsView, get::find_player}},
};

#[async_trait::async_trait]
pub trait GetPlayerStatsUseCase {
    /// Without a `season` the latest season of the ledger is used. Without an
    /// `episode` the latest episode of the chosen season is used (0 when that
    /// season has no games).
    async fn get_stats(
        &self,
        id: PlayerId,
        season: Option<u32>,
        episode: Option<u32>,
    ) -> Result<PlayerStatsView, WorkflowError>;
}

pub struct GetPlayerStatsUseCaseImpl<P: PlayerRepository, G: GameRepository> {
    player_repository: Arc<P>,
    game_repository: Arc<G>,
}

impl<P: PlayerRepository, G: GameRepository> GetPlayerStatsUseCaseImpl<P, G> {
    pub fn new(player_repository: Arc<P>, game_repository: Arc<G>) -> Self {
        Self {
            player_repository,
            game_repository,
        }
    }
}

fn latest_episode_of(games: &[Game], season: u32) -> u32 {
    games
        .iter()
        .filter(|g| g.season == season)
        .map(|g| g.episode)
        .max()
        .unwrap_or(0)
}

#[async_trait::async_trait]
impl<P, G> GetPlayerStatsUseCase for GetPlayerStatsUseCaseImpl<P, G>
where
    P: PlayerRepository + Send + Sync + 'static,
    G: GameRepository + Send + Sync + 'static,
{
    async fn get_stats(
        &self,
        id: PlayerId,
        season: Option<u32>,
        episode: Option<u32>,
    ) -> Result<PlayerStatsView, WorkflowError> {
        let player = find_player(self.player_repository.as_ref(), id).await?;
        let games = self.game_repository.query_games(GameQuery::all()).await?;
        let season = season.unwrap_or_else(|| latest_season_episode(&games).season);
        let episode = episode.unwrap_or_else(|| latest_episode_of(&games, season));
        let period = SeasonEpisode::new(season, episode);
        Ok(PlayerStatsView {
            stats: player_stats(&games, player.id, period),
            player,
        })
    }
}

#[cfg(test)]
mod tests {
    use league_core::{Color, stats::WinLoss};

    use super::*;
    use crate::testing::InMemoryLeague;

    #[tokio::test]
    async fn test_stats_default_to_latest_period() {
        let repo = InMemoryLeague::new();
        let a = repo.add_player("Go", "Seigen", 1);
        let b = repo.add_player("Kitani", "Minoru", 2);
        repo.add_game(a.id, b.id, Color::White, 1, 1);
        repo.add_game(a.id, b.id, Color::Black, 1, 2);
        repo.add_game(b.id, a.id, Color::Black, 2, 1);
        let use_case = GetPlayerStatsUseCaseImpl::new(repo.clone(), repo.clone());

        let view = use_case.get_stats(a.id, None, None).await.unwrap();
        assert_eq!(view.stats.period, SeasonEpisode::new(2, 1));
        assert_eq!(view.stats.episode, WinLoss { wins: 1, losses: 0 });
        assert_eq!(view.stats.league, WinLoss { wins: 2, losses: 1 });

        let view = use_case.get_stats(b.id, Some(1), Some(2)).await.unwrap();
        assert_eq!(view.stats.episode, WinLoss { wins: 1, losses: 0 });
        assert_eq!(view.stats.season, WinLoss { wins: 1, losses: 1 });
    }

    #[tokio::test]
    async fn test_player_without_games() {
        let repo = InMemoryLeague::new();
        let a = repo.add_player("Go", "Seigen", 1);
        let use_case = GetPlayerStatsUseCaseImpl::new(repo.clone(), repo.clone());
        let view = use_case.get_stats(a.id, None, None).await.unwrap();
        assert_eq!(view.stats.period, SeasonEpisode::ZERO);
        assert_eq!(view.stats.league, WinLoss::default());
    }

    #[tokio::test]
    async fn test_season_only_uses_latest_episode_of_that_season() {
        let repo = InMemoryLeague::new();
        let a = repo.add_player("Go", "Seigen", 1);
        let b = repo.add_player("Kitani", "Minoru", 2);
        repo.add_game(a.id, b.id, Color::White, 1, 3);
        repo.add_game(a.id, b.id, Color::Black, 1, 2);
        repo.add_game(a.id, b.id, Color::White, 2, 1);
        let use_case = GetPlayerStatsUseCaseImpl::new(repo.clone(), repo.clone());

        let view = use_case.get_stats(a.id, Some(1), None).await.unwrap();
        assert_eq!(view.stats.period, SeasonEpisode::new(1, 3));
        assert_eq!(view.stats.episode, WinLoss { wins: 1, losses: 0 });

        let view = use_case.get_stats(a.id, Some(5), None).await.unwrap();
        assert_eq!(view.stats.period, SeasonEpisode::new(5, 0));
        assert_eq!(view.stats.season, WinLoss::default());
    }
}
