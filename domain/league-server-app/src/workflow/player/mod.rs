use league_core::{Player, stats::PlayerStats};

pub mod create;
pub mod delete;
pub mod get;
pub mod stats;

/// A player together with their records for one period, the period's
/// season and the whole league.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlayerStatsView {
    pub player: Player,
    pub stats: PlayerStats,
}
