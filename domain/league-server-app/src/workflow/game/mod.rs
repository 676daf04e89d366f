use chrono::{DateTime, Utc};
use league_core::{
    Color, Game, GameId, HANDICAP_CHOICES, KOMI_CHOICES, Player, PlayerId,
    stats::{max_season_and_episode, next_period_choices},
};

use crate::{
    domain::{
        RepoRetrieveError,
        game::{GameQuery, GameRepository, NewGame},
        player::PlayerRepository,
    },
    workflow::{FieldErrors, NOT_A_VALID_CHOICE, WorkflowError},
};

pub mod choices;
pub mod create;
pub mod delete;
pub mod get;
pub mod update;

/// Game fields as submitted by a client, before any checks. Numbers are kept
/// wide so that out-of-range values are reported rather than truncated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameInput {
    pub white_id: i64,
    pub black_id: i64,
    pub winner: String,
    pub handicap: i64,
    pub komi: i64,
    pub season: i64,
    pub episode: i64,
    pub played_at: Option<DateTime<Utc>>,
}

pub(crate) struct ValidatedGame {
    pub game: NewGame,
    pub white: Player,
    pub black: Player,
}

fn choice<T: TryFrom<i64> + PartialEq>(value: i64, allowed: &[T]) -> Option<T> {
    T::try_from(value).ok().filter(|v| allowed.contains(v))
}

fn period_choice(value: i64, max: u32) -> Option<u32> {
    u32::try_from(value)
        .ok()
        .filter(|v| next_period_choices(max).contains(v))
}

async fn resolve_player<P: PlayerRepository + Send + Sync>(
    player_repository: &P,
    errors: &mut FieldErrors,
    field: &str,
    id: i64,
) -> Result<Option<Player>, WorkflowError> {
    match player_repository.get_player(PlayerId(id)).await {
        Ok(player) => Ok(Some(player)),
        Err(RepoRetrieveError::NotFound) => {
            errors.add(field, format!("Player {} does not exist", id));
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}

/// Checks every field of `input` against the current ledger and player list,
/// collecting all failures before reporting them.
pub(crate) async fn validate_game<P, G>(
    player_repository: &P,
    game_repository: &G,
    input: &GameInput,
) -> Result<ValidatedGame, WorkflowError>
where
    P: PlayerRepository + Send + Sync,
    G: GameRepository + Send + Sync,
{
    let games = game_repository.query_games(GameQuery::all()).await?;
    let max = max_season_and_episode(&games);
    let mut errors = FieldErrors::new();

    let white =
        resolve_player(player_repository, &mut errors, "white_id", input.white_id).await?;
    let black =
        resolve_player(player_repository, &mut errors, "black_id", input.black_id).await?;
    if input.white_id == input.black_id {
        errors.add("black_id", "Players cannot play themselves");
    }

    let winner = input.winner.parse::<Color>().ok();
    let handicap = choice(input.handicap, &HANDICAP_CHOICES);
    let komi = choice(input.komi, &KOMI_CHOICES);
    let season = period_choice(input.season, max.season);
    let episode = period_choice(input.episode, max.episode);
    for (field, ok) in [
        ("winner", winner.is_some()),
        ("handicap", handicap.is_some()),
        ("komi", komi.is_some()),
        ("season", season.is_some()),
        ("episode", episode.is_some()),
    ] {
        if !ok {
            errors.add(field, NOT_A_VALID_CHOICE);
        }
    }

    match (white, black, winner, handicap, komi, season, episode) {
        (
            Some(white),
            Some(black),
            Some(winner),
            Some(handicap),
            Some(komi),
            Some(season),
            Some(episode),
        ) if errors.is_empty() => Ok(ValidatedGame {
            game: NewGame {
                white: white.id,
                black: black.id,
                winner,
                handicap,
                komi,
                season,
                episode,
                played_at: input.played_at,
            },
            white,
            black,
        }),
        _ => Err(WorkflowError::Validation(errors)),
    }
}

pub(crate) async fn find_game<G: GameRepository + Send + Sync>(
    game_repository: &G,
    id: GameId,
) -> Result<Game, WorkflowError> {
    match game_repository.get_game(id).await {
        Ok(game) => Ok(game),
        Err(RepoRetrieveError::NotFound) => Err(WorkflowError::not_found(format!(
            "Game {} does not exist",
            id
        ))),
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
pub(crate) mod test_util {
    use super::GameInput;

    pub fn input(white_id: i64, black_id: i64) -> GameInput {
        GameInput {
            white_id,
            black_id,
            winner: "white".into(),
            handicap: 0,
            komi: 7,
            season: 1,
            episode: 1,
            played_at: None,
        }
    }
}
