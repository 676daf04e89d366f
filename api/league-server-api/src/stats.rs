use axum::{Json, extract::State};
use league_core::Player;
use league_server_app::workflow::stats::leaderboard::{LeaderboardQuery, LeaderboardView};
use serde::{Deserialize, Serialize};

use crate::{AppState, ServiceError, extract::QueryParams, players::JsonPeriod};

#[derive(Serialize)]
pub struct JsonPeriods {
    max: JsonPeriod,
    latest: JsonPeriod,
}

#[derive(Serialize, Debug, PartialEq, Eq)]
pub struct JsonRankedPlayer {
    player_id: i64,
    name: String,
    count: u32,
}

#[derive(Serialize)]
pub struct JsonLeaderboard {
    period: JsonPeriod,
    wins: Vec<JsonRankedPlayer>,
    games_played: Vec<JsonRankedPlayer>,
    stones_given: Vec<JsonRankedPlayer>,
}

fn ranked(column: Vec<(Player, u32)>) -> Vec<JsonRankedPlayer> {
    column
        .into_iter()
        .map(|(player, count)| JsonRankedPlayer {
            player_id: player.id.0,
            name: player.full_name(),
            count,
        })
        .collect()
}

impl From<LeaderboardView> for JsonLeaderboard {
    fn from(view: LeaderboardView) -> Self {
        Self {
            period: view.period.into(),
            wins: ranked(view.wins),
            games_played: ranked(view.games_played),
            stones_given: ranked(view.stones_given),
        }
    }
}

#[derive(Deserialize)]
pub struct JsonLeaderboardQuery {
    season: Option<i64>,
    episode: Option<i64>,
    limit: Option<i64>,
}

pub async fn get_periods(
    State(app_state): State<AppState>,
) -> Result<Json<JsonPeriods>, ServiceError> {
    let periods = app_state.app.stats_periods_use_case.league_periods().await?;
    Ok(Json(JsonPeriods {
        max: periods.max.into(),
        latest: periods.latest.into(),
    }))
}

pub async fn get_episode_leaderboard(
    QueryParams(query): QueryParams<JsonLeaderboardQuery>,
    State(app_state): State<AppState>,
) -> Result<Json<JsonLeaderboard>, ServiceError> {
    let view = app_state
        .app
        .stats_leaderboard_use_case
        .episode_leaderboard(LeaderboardQuery {
            season: query.season,
            episode: query.episode,
            limit: query.limit,
        })
        .await?;
    Ok(Json(JsonLeaderboard::from(view)))
}
