use std::sync::Arc;

use league_core::{
    Color, HANDICAP_CHOICES, KOMI_CHOICES, PlayerId,
    stats::{max_season_and_episode, next_period_choices},
};

use crate::{
    domain::{
        game::{GameQuery, GameRepository},
        player::PlayerRepository,
    },
    workflow::WorkflowError,
};

/// Values accepted by the game create and update operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameChoices {
    pub seasons: Vec<u32>,
    pub episodes: Vec<u32>,
    pub players: Vec<(PlayerId, String)>,
    pub winners: Vec<Color>,
    pub handicaps: Vec<u8>,
    pub komis: Vec<u8>,
}

#[async_trait::async_trait]
pub trait GameChoicesUseCase {
    async fn game_choices(&self) -> Result<GameChoices, WorkflowError>;
}

pub struct GameChoicesUseCaseImpl<P: PlayerRepository, G: GameRepository> {
    player_repository: Arc<P>,
    game_repository: Arc<G>,
}

impl<P: PlayerRepository, G: GameRepository> GameChoicesUseCaseImpl<P, G> {
    pub fn new(player_repository: Arc<P>, game_repository: Arc<G>) -> Self {
        Self {
            player_repository,
            game_repository,
        }
    }
}

#[async_trait::async_trait]
impl<P, G> GameChoicesUseCase for GameChoicesUseCaseImpl<P, G>
where
    P: PlayerRepository + Send + Sync + 'static,
    G: GameRepository + Send + Sync + 'static,
{
    async fn game_choices(&self) -> Result<GameChoices, WorkflowError> {
        let games = self.game_repository.query_games(GameQuery::all()).await?;
        let max = max_season_and_episode(&games);
        let mut players = self.player_repository.get_players().await?;
        players.sort_by(|a, b| (&a.last_name, &a.first_name).cmp(&(&b.last_name, &b.first_name)));
        Ok(GameChoices {
            seasons: next_period_choices(max.season).collect(),
            episodes: next_period_choices(max.episode).collect(),
            players: players
                .iter()
                .map(|p| (p.id, format!("{} ({})", p.full_name(), p.aga_id)))
                .collect(),
            winners: Color::ALL.to_vec(),
            handicaps: HANDICAP_CHOICES.to_vec(),
            komis: KOMI_CHOICES.to_vec(),
        })
    }
}
