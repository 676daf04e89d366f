use std::sync::Arc;

use league_core::{Game, Player, report::Report};
use validator::Validate;

use crate::{
    domain::{
        RepoRetrieveError,
        game::{GameQuery, GameRepository},
        player::PlayerRepository,
    },
    workflow::{FieldErrors, WorkflowError},
};

#[derive(Clone, Debug, Validate)]
pub struct ReportQuery {
    #[validate(range(min = 1, max = 10000, message = "Number must be between 1 and 10000."))]
    pub season: i64,
    #[validate(range(min = 0, max = 10000, message = "Number must be between 0 and 10000."))]
    pub episode: i64,
}

/// Games of one season, or one episode of it, with the players who took
/// part, ordered by id.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReportView {
    pub season: u32,
    pub episode: u32,
    pub games: Vec<Game>,
    pub players: Vec<Player>,
}

#[async_trait::async_trait]
pub trait GenerateReportUseCase {
    async fn generate_report(&self, query: ReportQuery) -> Result<ReportView, WorkflowError>;
}

pub struct GenerateReportUseCaseImpl<P: PlayerRepository, G: GameRepository> {
    player_repository: Arc<P>,
    game_repository: Arc<G>,
}

impl<P: PlayerRepository, G: GameRepository> GenerateReportUseCaseImpl<P, G> {
    pub fn new(player_repository: Arc<P>, game_repository: Arc<G>) -> Self {
        Self {
            player_repository,
            game_repository,
        }
    }
}

#[async_trait::async_trait]
impl<P, G> GenerateReportUseCase for GenerateReportUseCaseImpl<P, G>
where
    P: PlayerRepository + Send + Sync + 'static,
    G: GameRepository + Send + Sync + 'static,
{
    async fn generate_report(&self, query: ReportQuery) -> Result<ReportView, WorkflowError> {
        if let Err(e) = query.validate() {
            return Err(WorkflowError::Validation(FieldErrors::from(e)));
        }
        let (season, episode) = (query.season as u32, query.episode as u32);
        let games = self
            .game_repository
            .query_games(GameQuery::for_period(season, episode))
            .await?;
        let report = Report::new(season, episode, &games);

        let mut players = Vec::with_capacity(report.players.len());
        for id in &report.players {
            match self.player_repository.get_player(*id).await {
                Ok(player) => players.push(player),
                Err(RepoRetrieveError::NotFound) => {
                    log::warn!("Report game references unknown player {}", id);
                }
                Err(e) => return Err(e.into()),
            }
        }
        log::debug!(
            "Generated report for season {} episode {}: {} games, {} players",
            season,
            episode,
            report.games.len(),
            players.len()
        );
        Ok(ReportView {
            season,
            episode,
            games: report.games,
            players,
        })
    }
}
