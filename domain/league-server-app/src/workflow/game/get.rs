use std::sync::Arc;

use league_core::{Game, GameId};

use crate::{
    domain::game::{GameQuery, GameRepository},
    workflow::{WorkflowError, game::find_game},
};

#[async_trait::async_trait]
pub trait GetGameUseCase {
    async fn get_game(&self, id: GameId) -> Result<Game, WorkflowError>;
    async fn list_games(&self, query: GameQuery) -> Result<Vec<Game>, WorkflowError>;
}

pub struct GetGameUseCaseImpl<G: GameRepository> {
    game_repository: Arc<G>,
}

impl<G: GameRepository> GetGameUseCaseImpl<G> {
    pub fn new(game_repository: Arc<G>) -> Self {
        Self { game_repository }
    }
}

#[async_trait::async_trait]
impl<G: GameRepository + Send + Sync + 'static> GetGameUseCase for GetGameUseCaseImpl<G> {
    async fn get_game(&self, id: GameId) -> Result<Game, WorkflowError> {
        find_game(self.game_repository.as_ref(), id).await
    }

    async fn list_games(&self, query: GameQuery) -> Result<Vec<Game>, WorkflowError> {
        Ok(self.game_repository.query_games(query).await?)
    }
}
