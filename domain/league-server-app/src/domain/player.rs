use league_core::{Player, PlayerId};

use crate::domain::{RepoCreateError, RepoError, RepoRetrieveError, RepoUpdateError};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewPlayer {
    pub first_name: String,
    pub last_name: String,
    pub aga_id: i32,
    pub rank: i32,
}

#[async_trait::async_trait]
pub trait PlayerRepository {
    /// Fails with `Conflict` when the AGA id is taken.
    async fn create_player(&self, player: NewPlayer) -> Result<Player, RepoCreateError>;
    async fn get_player(&self, id: PlayerId) -> Result<Player, RepoRetrieveError>;
    async fn get_player_by_aga_id(&self, aga_id: i32) -> Result<Player, RepoRetrieveError>;
    async fn get_players(&self) -> Result<Vec<Player>, RepoError>;
    /// Fails with `Conflict` when games still reference the player.
    async fn delete_player(&self, id: PlayerId) -> Result<(), RepoUpdateError>;
}
