use std::sync::Arc;

use league_core::GameId;

use crate::{
    domain::game::GameRepository,
    workflow::{WorkflowError, game::find_game},
};

#[async_trait::async_trait]
pub trait DeleteGameUseCase {
    async fn delete_game(&self, id: GameId) -> Result<(), WorkflowError>;
}

pub struct DeleteGameUseCaseImpl<G: GameRepository> {
    game_repository: Arc<G>,
}

impl<G: GameRepository> DeleteGameUseCaseImpl<G> {
    pub fn new(game_repository: Arc<G>) -> Self {
        Self { game_repository }
    }
}

#[async_trait::async_trait]
impl<G: GameRepository + Send + Sync + 'static> DeleteGameUseCase for DeleteGameUseCaseImpl<G> {
    async fn delete_game(&self, id: GameId) -> Result<(), WorkflowError> {
        find_game(self.game_repository.as_ref(), id).await?;
        self.game_repository.delete_games(&[id]).await?;
        log::info!("Deleted game {}", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use league_core::Color;

    use super::*;
    use crate::{domain::player::PlayerRepository, testing::InMemoryLeague};

    #[tokio::test]
    async fn test_delete_game_keeps_players() {
        let repo = InMemoryLeague::new();
        let a = repo.add_player("Go", "Seigen", 1);
        let b = repo.add_player("Kitani", "Minoru", 2);
        let game = repo.add_game(a.id, b.id, Color::White, 1, 1);
        let use_case = DeleteGameUseCaseImpl::new(repo.clone());
        use_case.delete_game(game.id).await.unwrap();
        assert_eq!(repo.game_count(), 0);
        assert!(repo.get_player(a.id).await.is_ok());
        assert!(matches!(
            use_case.delete_game(game.id).await,
            Err(WorkflowError::NotFound(_))
        ));
    }
}
