use std::sync::Arc;

use league_core::Player;
use validator::Validate;

use crate::{
    domain::{
        RepoCreateError, RepoRetrieveError,
        player::{NewPlayer, PlayerRepository},
    },
    workflow::{FieldErrors, WorkflowError},
};

const AGA_ID_TAKEN: &str = "AGA ID already in use";

#[derive(Clone, Debug, Validate)]
pub struct CreatePlayerInput {
    #[validate(length(min = 1, max = 30, message = "Field must be between 1 and 30 characters long."))]
    pub first_name: String,
    #[validate(length(min = 1, max = 30, message = "Field must be between 1 and 30 characters long."))]
    pub last_name: String,
    #[validate(range(min = 0, max = 50000, message = "Number must be between 0 and 50000."))]
    pub aga_id: i64,
    #[validate(range(min = -30, max = 9, message = "Number must be between -30 and 9."))]
    pub rank: i64,
}

#[async_trait::async_trait]
pub trait CreatePlayerUseCase {
    async fn create_player(&self, input: CreatePlayerInput) -> Result<Player, WorkflowError>;
}

pub struct CreatePlayerUseCaseImpl<P: PlayerRepository> {
    player_repository: Arc<P>,
}

impl<P: PlayerRepository> CreatePlayerUseCaseImpl<P> {
    pub fn new(player_repository: Arc<P>) -> Self {
        Self { player_repository }
    }
}

#[async_trait::async_trait]
impl<P: PlayerRepository + Send + Sync + 'static> CreatePlayerUseCase
    for CreatePlayerUseCaseImpl<P>
{
    async fn create_player(&self, input: CreatePlayerInput) -> Result<Player, WorkflowError> {
        let input = CreatePlayerInput {
            first_name: input.first_name.trim().to_string(),
            last_name: input.last_name.trim().to_string(),
            ..input
        };
        if let Err(e) = input.validate() {
            return Err(WorkflowError::Validation(FieldErrors::from(e)));
        }
        // Both ranges fit in i32 once validated.
        let aga_id = input.aga_id as i32;
        match self.player_repository.get_player_by_aga_id(aga_id).await {
            Ok(_) => return Err(WorkflowError::invalid("aga_id", AGA_ID_TAKEN)),
            Err(RepoRetrieveError::NotFound) => {}
            Err(e) => return Err(e.into()),
        }

        let player = NewPlayer {
            first_name: input.first_name,
            last_name: input.last_name,
            aga_id,
            rank: input.rank as i32,
        };
        let player = match self.player_repository.create_player(player).await {
            Ok(player) => player,
            Err(RepoCreateError::Conflict) => {
                return Err(WorkflowError::invalid("aga_id", AGA_ID_TAKEN));
            }
            Err(e) => return Err(e.into()),
        };
        log::info!("Created player {} ({})", player.full_name(), player.id);
        Ok(player)
    }
}
