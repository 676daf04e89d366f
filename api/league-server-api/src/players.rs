use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use league_core::{Player, PlayerId, SeasonEpisode, stats::WinLoss};
use league_server_app::workflow::player::{PlayerStatsView, create::CreatePlayerInput};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{
    AppState, ServiceError,
    auth::AdminAuth,
    extract::{JsonBody, QueryParams, validated},
};

#[derive(Serialize, Debug, PartialEq, Eq)]
pub struct JsonPlayer {
    id: i64,
    first_name: String,
    last_name: String,
    full_name: String,
    aga_id: i32,
    rank: i32,
}

impl From<Player> for JsonPlayer {
    fn from(player: Player) -> Self {
        Self {
            id: player.id.0,
            full_name: player.full_name(),
            first_name: player.first_name,
            last_name: player.last_name,
            aga_id: player.aga_id,
            rank: player.rank,
        }
    }
}

#[derive(Serialize, Debug, PartialEq, Eq)]
pub struct JsonWinLoss {
    wins: u32,
    losses: u32,
}

impl From<WinLoss> for JsonWinLoss {
    fn from(record: WinLoss) -> Self {
        Self {
            wins: record.wins,
            losses: record.losses,
        }
    }
}

#[derive(Serialize, Debug, PartialEq, Eq)]
pub struct JsonPeriod {
    pub season: u32,
    pub episode: u32,
}

impl From<SeasonEpisode> for JsonPeriod {
    fn from(period: SeasonEpisode) -> Self {
        Self {
            season: period.season,
            episode: period.episode,
        }
    }
}

#[derive(Serialize)]
pub struct JsonPlayerDetail {
    player: JsonPlayer,
    period: JsonPeriod,
    season_stats: JsonWinLoss,
    episode_stats: JsonWinLoss,
    league_stats: JsonWinLoss,
}

impl From<PlayerStatsView> for JsonPlayerDetail {
    fn from(view: PlayerStatsView) -> Self {
        Self {
            player: JsonPlayer::from(view.player),
            period: JsonPeriod::from(view.stats.period),
            season_stats: view.stats.season.into(),
            episode_stats: view.stats.episode.into(),
            league_stats: view.stats.league.into(),
        }
    }
}

#[derive(Deserialize)]
pub struct JsonCreatePlayer {
    first_name: String,
    last_name: String,
    aga_id: i64,
    rank: i64,
}

#[derive(Deserialize, Validate)]
pub struct JsonPeriodQuery {
    #[validate(range(min = 0, max = 10000, message = "Number must be between 0 and 10000."))]
    season: Option<i64>,
    #[validate(range(min = 0, max = 10000, message = "Number must be between 0 and 10000."))]
    episode: Option<i64>,
}

/// Converts an already range-checked period number.
pub(crate) fn period_number(value: Option<i64>) -> Option<u32> {
    value.and_then(|v| u32::try_from(v).ok())
}

pub async fn list_players(
    State(app_state): State<AppState>,
) -> Result<Json<Vec<JsonPlayer>>, ServiceError> {
    let players = app_state.app.player_get_use_case.list_players().await?;
    Ok(Json(players.into_iter().map(JsonPlayer::from).collect()))
}

pub async fn get_player(
    Path(id): Path<i64>,
    QueryParams(query): QueryParams<JsonPeriodQuery>,
    State(app_state): State<AppState>,
) -> Result<Json<JsonPlayerDetail>, ServiceError> {
    let query = validated(query)?;
    let view = app_state
        .app
        .player_stats_use_case
        .get_stats(
            PlayerId(id),
            period_number(query.season),
            period_number(query.episode),
        )
        .await?;
    Ok(Json(JsonPlayerDetail::from(view)))
}

pub async fn create_player(
    AdminAuth(_): AdminAuth,
    State(app_state): State<AppState>,
    JsonBody(payload): JsonBody<JsonCreatePlayer>,
) -> Result<(StatusCode, Json<JsonPlayer>), ServiceError> {
    let player = app_state
        .app
        .player_create_use_case
        .create_player(CreatePlayerInput {
            first_name: payload.first_name,
            last_name: payload.last_name,
            aga_id: payload.aga_id,
            rank: payload.rank,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(JsonPlayer::from(player))))
}

pub async fn delete_player(
    AdminAuth(_): AdminAuth,
    Path(id): Path<i64>,
    State(app_state): State<AppState>,
) -> Result<StatusCode, ServiceError> {
    app_state
        .app
        .player_delete_use_case
        .delete_player(PlayerId(id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
