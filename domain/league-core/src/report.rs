use std::collections::BTreeSet;

use crate::{Game, PeriodFilter, PlayerId};

/// Results of one period, as submitted to the federation. `episode == 0`
/// covers the whole season.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Report {
    pub season: u32,
    pub episode: u32,
    pub games: Vec<Game>,
    pub players: Vec<PlayerId>,
}

impl Report {
    pub fn new(season: u32, episode: u32, ledger: &[Game]) -> Self {
        let filter = PeriodFilter::from_season_episode(season, episode);
        let games: Vec<Game> = ledger
            .iter()
            .filter(|g| filter.matches(g))
            .cloned()
            .collect();
        let players = games
            .iter()
            .flat_map(Game::players)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        Self {
            season,
            episode,
            games,
            players,
        }
    }

    pub fn is_whole_season(&self) -> bool {
        self.episode == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Color, test_util::game};

    #[test]
    fn test_generate_report() {
        let ledger = vec![
            game(1, 1, 2, Color::White, 1, 1),
            game(2, 3, 4, Color::Black, 1, 1),
            game(3, 1, 3, Color::Black, 1, 2),
        ];
        let report = Report::new(1, 1, &ledger);
        assert_eq!(report.season, 1);
        assert_eq!(report.episode, 1);
        assert_eq!(report.games.len(), 2);
        assert_eq!(report.players.len(), 4);
    }

    #[test]
    fn test_repeated_players_are_listed_once() {
        let ledger = vec![
            game(1, 1, 2, Color::White, 1, 1),
            game(2, 2, 1, Color::Black, 1, 1),
        ];
        let report = Report::new(1, 1, &ledger);
        assert_eq!(report.games.len(), 2);
        assert_eq!(report.players, vec![PlayerId(1), PlayerId(2)]);
    }

    #[test]
    fn test_whole_season_report() {
        let ledger = vec![
            game(1, 1, 2, Color::White, 1, 1),
            game(2, 3, 4, Color::Black, 1, 2),
            game(3, 5, 6, Color::Black, 2, 1),
        ];
        let report = Report::new(1, 0, &ledger);
        assert!(report.is_whole_season());
        assert_eq!(report.games.len(), 2);
        assert_eq!(report.players.len(), 4);
    }

    #[test]
    fn test_empty_period() {
        let report = Report::new(4, 2, &[]);
        assert!(report.games.is_empty());
        assert!(report.players.is_empty());
    }
}
