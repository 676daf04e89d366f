use std::sync::Arc;

use league_core::{
    SeasonEpisode,
    stats::{latest_season_episode, max_season_and_episode},
};

use crate::{
    domain::game::{GameQuery, GameRepository},
    workflow::WorkflowError,
};

/// Bounds of the current ledger: the per-field maxima, which drive the game
/// choices, and the latest period played.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LeaguePeriods {
    pub max: SeasonEpisode,
    pub latest: SeasonEpisode,
}

#[async_trait::async_trait]
pub trait LeaguePeriodsUseCase {
    async fn league_periods(&self) -> Result<LeaguePeriods, WorkflowError>;
}

pub struct LeaguePeriodsUseCaseImpl<G: GameRepository> {
    game_repository: Arc<G>,
}

impl<G: GameRepository> LeaguePeriodsUseCaseImpl<G> {
    pub fn new(game_repository: Arc<G>) -> Self {
        Self { game_repository }
    }
}

#[async_trait::async_trait]
impl<G: GameRepository + Send + Sync + 'static> LeaguePeriodsUseCase
    for LeaguePeriodsUseCaseImpl<G>
{
    async fn league_periods(&self) -> Result<LeaguePeriods, WorkflowError> {
        let games = self.game_repository.query_games(GameQuery::all()).await?;
        Ok(LeaguePeriods {
            max: max_season_and_episode(&games),
            latest: latest_season_episode(&games),
        })
    }
}

#[cfg(test)]
mod tests {
    use league_core::Color;

    use super::*;
    use crate::testing::InMemoryLeague;

    #[tokio::test]
    async fn test_periods() {
        let repo = InMemoryLeague::new();
        let use_case = LeaguePeriodsUseCaseImpl::new(repo.clone());
        let empty = use_case.league_periods().await.unwrap();
        assert_eq!(empty.max, SeasonEpisode::ZERO);
        assert_eq!(empty.latest, SeasonEpisode::ZERO);

        let a = repo.add_player("Go", "Seigen", 1);
        let b = repo.add_player("Kitani", "Minoru", 2);
        for (season, episode) in [(1, 1), (1, 2), (2, 1)] {
            repo.add_game(a.id, b.id, Color::White, season, episode);
        }
        let periods = use_case.league_periods().await.unwrap();
        assert_eq!(periods.max, SeasonEpisode::new(2, 2));
        assert_eq!(periods.latest, SeasonEpisode::new(2, 1));
    }
}
