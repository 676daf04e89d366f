use std::collections::HashMap;

use axum::{Json, extract::State};
use league_core::{Game, Player, PlayerId, color_abbreviation};
use league_server_app::workflow::report::generate::{ReportQuery, ReportView};
use serde::{Deserialize, Serialize};

use crate::{
    AppState, ServiceError, extract::QueryParams, games::JsonGame, players::JsonPlayer,
};

#[derive(Deserialize)]
pub struct JsonReportQuery {
    season: i64,
    #[serde(default)]
    episode: i64,
}

#[derive(Serialize)]
pub struct JsonReport {
    season: u32,
    episode: u32,
    whole_season: bool,
    games: Vec<JsonGame>,
    players: Vec<JsonPlayer>,
    /// One `white black result handicap komi` line per game, players given by AGA id.
    results: Vec<String>,
}

fn result_line(game: &Game, aga_ids: &HashMap<PlayerId, i32>) -> Option<String> {
    Some(format!(
        "{} {} {} {} {}",
        aga_ids.get(&game.white)?,
        aga_ids.get(&game.black)?,
        color_abbreviation(game.winner),
        game.handicap,
        game.komi
    ))
}

fn result_lines(games: &[Game], players: &[Player]) -> Vec<String> {
    let aga_ids: HashMap<PlayerId, i32> = players.iter().map(|p| (p.id, p.aga_id)).collect();
    games
        .iter()
        .filter_map(|game| result_line(game, &aga_ids))
        .collect()
}

impl From<ReportView> for JsonReport {
    fn from(view: ReportView) -> Self {
        let results = result_lines(&view.games, &view.players);
        Self {
            season: view.season,
            episode: view.episode,
            whole_season: view.episode == 0,
            games: view.games.into_iter().map(JsonGame::from).collect(),
            players: view.players.into_iter().map(JsonPlayer::from).collect(),
            results,
        }
    }
}

pub async fn get_report(
    QueryParams(query): QueryParams<JsonReportQuery>,
    State(app_state): State<AppState>,
) -> Result<Json<JsonReport>, ServiceError> {
    let report = app_state
        .app
        .report_generate_use_case
        .generate_report(ReportQuery {
            season: query.season,
            episode: query.episode,
        })
        .await?;
    Ok(Json(JsonReport::from(report)))
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use league_core::{Color, GameId};

    use super::*;

    fn player(id: i64, aga_id: i32) -> Player {
        Player {
            id: PlayerId(id),
            first_name: "A".into(),
            last_name: "B".into(),
            aga_id,
            rank: 1,
        }
    }

    #[test]
    fn test_result_lines() {
        let now = Utc::now();
        let game = Game {
            id: GameId(1),
            white: PlayerId(1),
            black: PlayerId(2),
            winner: Color::Black,
            handicap: 2,
            komi: 0,
            season: 1,
            episode: 1,
            created_at: now,
            played_at: now,
            last_modified_at: now,
        };
        let players = [player(1, 1234), player(2, 5678)];
        assert_eq!(result_lines(&[game.clone()], &players), vec!["1234 5678 b 2 0"]);
        // games with an unresolved player are left out
        assert!(result_lines(&[game], &players[..1]).is_empty());
    }
}
