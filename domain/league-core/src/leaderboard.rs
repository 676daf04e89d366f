use std::collections::HashMap;

use crate::{Color, Game, PlayerId, SeasonEpisode};

pub const DEFAULT_LEADERBOARD_LIMIT: usize = 5;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EpisodeLeaderboard {
    pub period: SeasonEpisode,
    pub wins: Vec<(PlayerId, u32)>,
    pub games_played: Vec<(PlayerId, u32)>,
    pub stones_given: Vec<(PlayerId, u32)>,
}

/// Counter that remembers the order in which players were first seen, so
/// that equal counts rank in encounter order after a stable sort.
#[derive(Default)]
struct Tally {
    index: HashMap<PlayerId, usize>,
    entries: Vec<(PlayerId, u32)>,
}

impl Tally {
    fn add(&mut self, player: PlayerId, amount: u32) {
        match self.index.get(&player) {
            Some(&i) => self.entries[i].1 += amount,
            None => {
                self.index.insert(player, self.entries.len());
                self.entries.push((player, amount));
            }
        }
    }

    fn ranked(mut self, limit: usize) -> Vec<(PlayerId, u32)> {
        self.entries.sort_by(|a, b| b.1.cmp(&a.1));
        self.entries.truncate(limit);
        self.entries
    }
}

/// Ranks the players of one episode by wins, games played and handicap
/// stones given. Games outside `period` are ignored.
///
/// Stones are credited to white, and only for games white won.
pub fn episode_leaderboard(
    games: &[Game],
    period: SeasonEpisode,
    limit: usize,
) -> EpisodeLeaderboard {
    let mut wins = Tally::default();
    let mut games_played = Tally::default();
    let mut stones_given = Tally::default();

    for game in games.iter().filter(|g| g.period() == period) {
        wins.add(game.winner_id(), 1);
        games_played.add(game.white, 1);
        games_played.add(game.black, 1);
        if game.winner == Color::White && game.handicap > 0 {
            stones_given.add(game.white, game.handicap as u32);
        }
    }

    EpisodeLeaderboard {
        period,
        wins: wins.ranked(limit),
        games_played: games_played.ranked(limit),
        stones_given: stones_given.ranked(limit),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::game;

    fn handicap_game(id: i64, white: i64, black: i64, winner: Color, handicap: u8) -> Game {
        let mut g = game(id, white, black, winner, 1, 1);
        g.handicap = handicap;
        g
    }

    #[test]
    fn test_empty_episode() {
        let board = episode_leaderboard(&[], SeasonEpisode::new(1, 1), 5);
        assert!(board.wins.is_empty());
        assert!(board.games_played.is_empty());
        assert!(board.stones_given.is_empty());
    }

    #[test]
    fn test_counts_and_order() {
        let games = vec![
            handicap_game(1, 1, 2, Color::White, 0),
            handicap_game(2, 3, 2, Color::Black, 0),
            handicap_game(3, 2, 1, Color::White, 0),
            handicap_game(4, 4, 1, Color::Black, 0),
        ];
        let board = episode_leaderboard(&games, SeasonEpisode::new(1, 1), 5);
        // players 1 and 2 both have two wins; 1 was seen first
        assert_eq!(board.wins, vec![(PlayerId(1), 2), (PlayerId(2), 2)]);
        assert_eq!(
            board.games_played,
            vec![
                (PlayerId(1), 3),
                (PlayerId(2), 3),
                (PlayerId(3), 1),
                (PlayerId(4), 1)
            ]
        );
    }

    #[test]
    fn test_stones_given_credit_white_winner() {
        let games = vec![
            handicap_game(1, 1, 2, Color::White, 3),
            handicap_game(2, 1, 3, Color::Black, 4),
            handicap_game(3, 2, 3, Color::White, 5),
            handicap_game(4, 1, 3, Color::White, 2),
        ];
        let board = episode_leaderboard(&games, SeasonEpisode::new(1, 1), 5);
        assert_eq!(board.stones_given, vec![(PlayerId(1), 5), (PlayerId(2), 5)]);
    }

    #[test]
    fn test_limit_and_period_filter() {
        let mut games: Vec<Game> = (0..8)
            .map(|i| handicap_game(i, i * 2 + 1, i * 2 + 2, Color::White, 0))
            .collect();
        games.push(game(100, 1, 2, Color::White, 2, 1));
        let board = episode_leaderboard(&games, SeasonEpisode::new(1, 1), 3);
        assert_eq!(board.wins.len(), 3);
        assert_eq!(board.wins[0], (PlayerId(1), 1));
        assert_eq!(board.games_played.len(), 3);

        let board = episode_leaderboard(&games, SeasonEpisode::new(2, 1), 5);
        assert_eq!(board.wins, vec![(PlayerId(1), 1)]);
    }
}
