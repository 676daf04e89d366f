use std::sync::Arc;

use league_core::PlayerId;

use crate::{
    domain::{RepoUpdateError, player::PlayerRepository},
    workflow::WorkflowError,
};

#[async_trait::async_trait]
pub trait DeletePlayerUseCase {
    async fn delete_player(&self, id: PlayerId) -> Result<(), WorkflowError>;
}

pub struct DeletePlayerUseCaseImpl<P: PlayerRepository> {
    player_repository: Arc<P>,
}

impl<P: PlayerRepository> DeletePlayerUseCaseImpl<P> {
    pub fn new(player_repository: Arc<P>) -> Self {
        Self { player_repository }
    }
}

#[async_trait::async_trait]
impl<P: PlayerRepository + Send + Sync + 'static> DeletePlayerUseCase
    for DeletePlayerUseCaseImpl<P>
{
    async fn delete_player(&self, id: PlayerId) -> Result<(), WorkflowError> {
        match self.player_repository.delete_player(id).await {
            Ok(()) => {
                log::info!("Deleted player {}", id);
                Ok(())
            }
            Err(RepoUpdateError::NotFound) => Err(WorkflowError::not_found(format!(
                "Player {} does not exist",
                id
            ))),
            Err(RepoUpdateError::Conflict) => Err(WorkflowError::invalid(
                "player_id",
                "Players with extant games cannot be deleted",
            )),
            Err(e) => Err(e.into()),
        }
    }
}
