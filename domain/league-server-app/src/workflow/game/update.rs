use std::sync::Arc;

use league_core::{Game, GameId};

use crate::{
    domain::{RepoUpdateError, game::GameRepository, player::PlayerRepository},
    workflow::{
        WorkflowError,
        game::{GameInput, find_game, validate_game},
    },
};

#[async_trait::async_trait]
pub trait UpdateGameUseCase {
    /// Replaces every field of a recorded game. Without `played_at` the
    /// stored time is kept.
    async fn update_game(&self, id: GameId, input: GameInput) -> Result<Game, WorkflowError>;
}

pub struct UpdateGameUseCaseImpl<P: PlayerRepository, G: GameRepository> {
    player_repository: Arc<P>,
    game_repository: Arc<G>,
}

impl<P: PlayerRepository, G: GameRepository> UpdateGameUseCaseImpl<P, G> {
    pub fn new(player_repository: Arc<P>, game_repository: Arc<G>) -> Self {
        Self {
            player_repository,
            game_repository,
        }
    }
}

#[async_trait::async_trait]
impl<P, G> UpdateGameUseCase for UpdateGameUseCaseImpl<P, G>
where
    P: PlayerRepository + Send + Sync + 'static,
    G: GameRepository + Send + Sync + 'static,
{
    async fn update_game(&self, id: GameId, input: GameInput) -> Result<Game, WorkflowError> {
        find_game(self.game_repository.as_ref(), id).await?;
        let validated = validate_game(
            self.player_repository.as_ref(),
            self.game_repository.as_ref(),
            &input,
        )
        .await?;
        match self.game_repository.update_game(id, validated.game).await {
            Ok(game) => {
                log::info!("Updated game {}", game.id);
                Ok(game)
            }
            Err(RepoUpdateError::NotFound) => Err(WorkflowError::not_found(format!(
                "Game {} does not exist",
                id
            ))),
            Err(e) => Err(e.into()),
        }
    }
}
