use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use league_core::{Game, GameId, PlayerId};
use league_server_app::{
    domain::game::GameQuery,
    workflow::{FieldErrors, game::{GameInput, choices::GameChoices}},
};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{
    AppState, ServiceError,
    auth::AdminAuth,
    extract::{JsonBody, QueryParams, validated},
    players::period_number,
};

#[derive(Serialize, Debug, PartialEq, Eq)]
pub struct JsonGame {
    id: i64,
    white_id: i64,
    black_id: i64,
    winner: &'static str,
    handicap: u8,
    komi: u8,
    season: u32,
    episode: u32,
    created_at: String,
    played_at: String,
    last_modified_at: String,
}

impl From<Game> for JsonGame {
    fn from(game: Game) -> Self {
        Self {
            id: game.id.0,
            white_id: game.white.0,
            black_id: game.black.0,
            winner: game.winner.name(),
            handicap: game.handicap,
            komi: game.komi,
            season: game.season,
            episode: game.episode,
            created_at: game.created_at.to_rfc3339(),
            played_at: game.played_at.to_rfc3339(),
            last_modified_at: game.last_modified_at.to_rfc3339(),
        }
    }
}

#[derive(Deserialize, Debug)]
pub struct JsonGameRequest {
    white_id: i64,
    black_id: i64,
    winner: String,
    handicap: i64,
    komi: i64,
    season: i64,
    episode: i64,
    played_at: Option<String>,
}

impl JsonGameRequest {
    fn into_input(self) -> Result<GameInput, ServiceError> {
        let played_at = match self.played_at.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => match DateTime::parse_from_rfc3339(raw) {
                Ok(at) => Some(at.with_timezone(&Utc)),
                Err(_) => {
                    let mut errors = FieldErrors::new();
                    errors.add("played_at", "Not a valid datetime value");
                    return Err(ServiceError::Validation(errors));
                }
            },
        };
        Ok(GameInput {
            white_id: self.white_id,
            black_id: self.black_id,
            winner: self.winner,
            handicap: self.handicap,
            komi: self.komi,
            season: self.season,
            episode: self.episode,
            played_at,
        })
    }
}

#[derive(Deserialize, Validate)]
pub struct JsonGamesFilter {
    #[validate(range(min = 0, max = 10000, message = "Number must be between 0 and 10000."))]
    season: Option<i64>,
    #[validate(range(min = 0, max = 10000, message = "Number must be between 0 and 10000."))]
    episode: Option<i64>,
    #[validate(range(min = 1, message = "Not a valid player id."))]
    player_id: Option<i64>,
}

#[derive(Serialize)]
pub struct JsonPlayerChoice {
    id: i64,
    label: String,
}

#[derive(Serialize)]
pub struct JsonGameChoices {
    seasons: Vec<u32>,
    episodes: Vec<u32>,
    players: Vec<JsonPlayerChoice>,
    winners: Vec<&'static str>,
    handicaps: Vec<u8>,
    komis: Vec<u8>,
}

impl From<GameChoices> for JsonGameChoices {
    fn from(choices: GameChoices) -> Self {
        Self {
            seasons: choices.seasons,
            episodes: choices.episodes,
            players: choices
                .players
                .into_iter()
                .map(|(id, label)| JsonPlayerChoice { id: id.0, label })
                .collect(),
            winners: choices.winners.iter().map(|c| c.name()).collect(),
            handicaps: choices.handicaps,
            komis: choices.komis,
        }
    }
}

pub async fn list_games(
    QueryParams(filter): QueryParams<JsonGamesFilter>,
    State(app_state): State<AppState>,
) -> Result<Json<Vec<JsonGame>>, ServiceError> {
    let filter = validated(filter)?;
    // Episode 0 selects the whole season, as it does for reports.
    let query = GameQuery {
        season: period_number(filter.season),
        episode: period_number(filter.episode).filter(|&e| e > 0),
        player: filter.player_id.map(PlayerId),
    };
    let games = app_state.app.game_get_use_case.list_games(query).await?;
    Ok(Json(games.into_iter().map(JsonGame::from).collect()))
}

pub async fn get_game(
    Path(id): Path<i64>,
    State(app_state): State<AppState>,
) -> Result<Json<JsonGame>, ServiceError> {
    let game = app_state.app.game_get_use_case.get_game(GameId(id)).await?;
    Ok(Json(JsonGame::from(game)))
}

pub async fn get_choices(
    State(app_state): State<AppState>,
) -> Result<Json<JsonGameChoices>, ServiceError> {
    let choices = app_state.app.game_choices_use_case.game_choices().await?;
    Ok(Json(JsonGameChoices::from(choices)))
}

pub async fn create_game(
    AdminAuth(account): AdminAuth,
    State(app_state): State<AppState>,
    JsonBody(payload): JsonBody<JsonGameRequest>,
) -> Result<(StatusCode, Json<JsonGame>), ServiceError> {
    let game = app_state
        .app
        .game_create_use_case
        .create_game(payload.into_input()?)
        .await?;
    log::debug!("Game {} submitted by {}", game.id, account.username);
    Ok((StatusCode::CREATED, Json(JsonGame::from(game))))
}

pub async fn update_game(
    AdminAuth(_): AdminAuth,
    Path(id): Path<i64>,
    State(app_state): State<AppState>,
    JsonBody(payload): JsonBody<JsonGameRequest>,
) -> Result<Json<JsonGame>, ServiceError> {
    let game = app_state
        .app
        .game_update_use_case
        .update_game(GameId(id), payload.into_input()?)
        .await?;
    Ok(Json(JsonGame::from(game)))
}

pub async fn delete_game(
    AdminAuth(_): AdminAuth,
    Path(id): Path<i64>,
    State(app_state): State<AppState>,
) -> Result<StatusCode, ServiceError> {
    app_state
        .app
        .game_delete_use_case
        .delete_game(GameId(id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
