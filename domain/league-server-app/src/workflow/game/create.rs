use std::sync::Arc;

use league_core::Game;

use crate::{
    domain::{announcement::game_result_message, game::GameRepository, player::PlayerRepository},
    ports::notification::{NotificationError, NotificationPort},
    workflow::{
        WorkflowError,
        game::{GameInput, validate_game},
    },
};

#[async_trait::async_trait]
pub trait CreateGameUseCase {
    /// Records a game and announces the result. A failed announcement is
    /// logged and does not affect the outcome.
    async fn create_game(&self, input: GameInput) -> Result<Game, WorkflowError>;
}

pub struct CreateGameUseCaseImpl<P: PlayerRepository, G: GameRepository, N: NotificationPort> {
    player_repository: Arc<P>,
    game_repository: Arc<G>,
    notifier: Arc<N>,
    player_link_base_url: String,
}

impl<P: PlayerRepository, G: GameRepository, N: NotificationPort> CreateGameUseCaseImpl<P, G, N> {
    pub fn new(
        player_repository: Arc<P>,
        game_repository: Arc<G>,
        notifier: Arc<N>,
        player_link_base_url: String,
    ) -> Self {
        Self {
            player_repository,
            game_repository,
            notifier,
            player_link_base_url,
        }
    }
}

#[async_trait::async_trait]
impl<P, G, N> CreateGameUseCase for CreateGameUseCaseImpl<P, G, N>
where
    P: PlayerRepository + Send + Sync + 'static,
    G: GameRepository + Send + Sync + 'static,
    N: NotificationPort + Send + Sync + 'static,
{
    async fn create_game(&self, input: GameInput) -> Result<Game, WorkflowError> {
        let validated = validate_game(
            self.player_repository.as_ref(),
            self.game_repository.as_ref(),
            &input,
        )
        .await?;
        let game = self.game_repository.create_game(validated.game).await?;
        log::info!(
            "Recorded game {} ({}): {} vs {}, {} won",
            game.id,
            game.period(),
            validated.white.full_name(),
            validated.black.full_name(),
            game.winner
        );

        let message = game_result_message(
            &game,
            &validated.white,
            &validated.black,
            &self.player_link_base_url,
        );
        match self.notifier.notify(&message).await {
            Ok(()) => {}
            Err(NotificationError::NotConfigured(reason)) => {
                log::debug!("Game {} not announced: {}", game.id, reason);
            }
            Err(e) => log::warn!("Failed to announce game {}: {}", game.id, e),
        }
        Ok(game)
    }
}
