use std::sync::Arc;

use league_core::{Player, PlayerId};

use crate::{
    domain::{RepoRetrieveError, player::PlayerRepository},
    workflow::WorkflowError,
};

#[async_trait::async_trait]
pub trait GetPlayerUseCase {
    async fn get_player(&self, id: PlayerId) -> Result<Player, WorkflowError>;
    /// All players, by last then first name.
    async fn list_players(&self) -> Result<Vec<Player>, WorkflowError>;
}

pub struct GetPlayerUseCaseImpl<P: PlayerRepository> {
    player_repository: Arc<P>,
}

impl<P: PlayerRepository> GetPlayerUseCaseImpl<P> {
    pub fn new(player_repository: Arc<P>) -> Self {
        Self { player_repository }
    }
}

pub(crate) async fn find_player<P: PlayerRepository + Send + Sync>(
    player_repository: &P,
    id: PlayerId,
) -> Result<Player, WorkflowError> {
    match player_repository.get_player(id).await {
        Ok(player) => Ok(player),
        Err(RepoRetrieveError::NotFound) => Err(WorkflowError::not_found(format!(
            "Player {} does not exist",
            id
        ))),
        Err(e) => Err(e.into()),
    }
}

#[async_trait::async_trait]
impl<P: PlayerRepository + Send + Sync + 'static> GetPlayerUseCase for GetPlayerUseCaseImpl<P> {
    async fn get_player(&self, id: PlayerId) -> Result<Player, WorkflowError> {
        find_player(self.player_repository.as_ref(), id).await
    }

    async fn list_players(&self) -> Result<Vec<Player>, WorkflowError> {
        let mut players = self.player_repository.get_players().await?;
        players.sort_by(|a, b| {
            (&a.last_name, &a.first_name, a.id).cmp(&(&b.last_name, &b.first_name, b.id))
        });
        Ok(players)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::InMemoryLeague;

    #[tokio::test]
    async fn test_list_sorted_by_name() {
        let repo = InMemoryLeague::new();
        repo.add_player("Minoru", "Kitani", 2);
        repo.add_player("Seigen", "Go", 1);
        let use_case = GetPlayerUseCaseImpl::new(repo);
        let names: Vec<String> = use_case
            .list_players()
            .await
            .unwrap()
            .iter()
            .map(Player::full_name)
            .collect();
        assert_eq!(names, vec!["Seigen Go", "Minoru Kitani"]);
        assert!(matches!(
            use_case.get_player(PlayerId(42)).await,
            Err(WorkflowError::NotFound(msg)) if msg == "Player 42 does not exist"
        ));
    }
}
