use league_core::{Color, Game, Player, PlayerId};

pub fn player_link(base_url: &str, player_id: PlayerId) -> String {
    format!("{}/v1/players/{}", base_url.trim_end_matches('/'), player_id)
}

/// Chat message announcing a recorded game, in Slack mrkdwn with a
/// `<!date^...>` token so clients render `played_at` in their own time zone.
pub fn game_result_message(game: &Game, white: &Player, black: &Player, base_url: &str) -> String {
    let white_ref = format!("<{}|{}>", player_link(base_url, white.id), white.full_name());
    let black_ref = format!("<{}|{}>", player_link(base_url, black.id), black.full_name());
    let headline = match game.winner {
        Color::White => format!("{} (W) defeated {} (B)", white_ref, black_ref),
        Color::Black => format!("{} (B) defeated {} (W)", black_ref, white_ref),
    };
    format!(
        "{} at {} stones, {}.5 komi at <!date^{}^{{time}} on {{date_num}}|{}> ({})",
        headline,
        game.handicap,
        game.komi,
        game.played_at.timestamp(),
        game.played_at.format("%Y-%m-%d %H:%M:%S"),
        game.period()
    )
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use league_core::GameId;

    use super::*;

    fn player(id: i64, first: &str, last: &str) -> Player {
        Player {
            id: PlayerId(id),
            first_name: first.into(),
            last_name: last.into(),
            aga_id: id as i32,
            rank: 1,
        }
    }

    #[test]
    fn test_black_win_message() {
        let at = Utc.with_ymd_and_hms(2017, 1, 1, 1, 1, 1).unwrap();
        let game = Game {
            id: GameId(1),
            white: PlayerId(1),
            black: PlayerId(2),
            winner: Color::Black,
            handicap: 3,
            komi: 0,
            season: 2,
            episode: 11,
            created_at: at,
            played_at: at,
            last_modified_at: at,
        };
        let msg = game_result_message(
            &game,
            &player(1, "Ann", "White"),
            &player(2, "Bob", "Black"),
            "https://league.example/",
        );
        assert_eq!(
            msg,
            format!(
                "<https://league.example/v1/players/2|Bob Black> (B) defeated \
                 <https://league.example/v1/players/1|Ann White> (W) at 3 stones, 0.5 komi at \
                 <!date^{}^{{time}} on {{date_num}}|2017-01-01 01:01:01> (S02E11)",
                at.timestamp()
            )
        );
    }

    #[test]
    fn test_player_link_without_base() {
        assert_eq!(player_link("", PlayerId(7)), "/v1/players/7");
    }
}
