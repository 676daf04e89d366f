use std::collections::HashMap;

use league_core::{Player, PlayerId};

use crate::{domain::player::PlayerRepository, workflow::WorkflowError};

pub mod leaderboard;
pub mod periods;

/// Replaces counted player ids with player records. Ids without a record are
/// dropped with a warning.
pub(crate) async fn resolve_counts<P: PlayerRepository + Send + Sync>(
    player_repository: &P,
    counts: &[Vec<(PlayerId, u32)>],
) -> Result<Vec<Vec<(Player, u32)>>, WorkflowError> {
    let players: HashMap<PlayerId, Player> = player_repository
        .get_players()
        .await?
        .into_iter()
        .map(|p| (p.id, p))
        .collect();
    Ok(counts
        .iter()
        .map(|column| {
            column
                .iter()
                .filter_map(|(id, count)| match players.get(id) {
                    Some(player) => Some((player.clone(), *count)),
                    None => {
                        log::warn!("Game references unknown player {}", id);
                        None
                    }
                })
                .collect()
        })
        .collect())
}
