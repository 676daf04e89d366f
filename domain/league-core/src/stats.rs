use std::ops::RangeInclusive;

use crate::{Game, PlayerId, SeasonEpisode};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WinLoss {
    pub wins: u32,
    pub losses: u32,
}

impl WinLoss {
    pub fn games(&self) -> u32 {
        self.wins + self.losses
    }

    fn record(&mut self, won: bool) {
        if won {
            self.wins += 1;
        } else {
            self.losses += 1;
        }
    }
}

/// Tallies the games `player` took part in. Games without the player are skipped.
pub fn win_loss<'a>(games: impl IntoIterator<Item = &'a Game>, player: PlayerId) -> WinLoss {
    let mut record = WinLoss::default();
    for game in games.into_iter().filter(|g| g.involves(player)) {
        record.record(game.is_won_by(player));
    }
    record
}

pub fn season_stats(games: &[Game], player: PlayerId, season: u32) -> WinLoss {
    win_loss(games.iter().filter(|g| g.season == season), player)
}

pub fn episode_stats(games: &[Game], player: PlayerId, period: SeasonEpisode) -> WinLoss {
    win_loss(games.iter().filter(|g| g.period() == period), player)
}

pub fn league_stats(games: &[Game], player: PlayerId) -> WinLoss {
    win_loss(games, player)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlayerStats {
    pub period: SeasonEpisode,
    pub season: WinLoss,
    pub episode: WinLoss,
    pub league: WinLoss,
}

pub fn player_stats(games: &[Game], player: PlayerId, period: SeasonEpisode) -> PlayerStats {
    PlayerStats {
        period,
        season: season_stats(games, player, period.season),
        episode: episode_stats(games, player, period),
        league: league_stats(games, player),
    }
}

/// Largest season and largest episode, each taken on its own. The pair need
/// not belong to a single game.
pub fn max_season_and_episode(games: &[Game]) -> SeasonEpisode {
    games
        .iter()
        .fold(SeasonEpisode::ZERO, |acc, game| SeasonEpisode {
            season: acc.season.max(game.season),
            episode: acc.episode.max(game.episode),
        })
}

/// Greatest `(season, episode)` pair present in the ledger.
pub fn latest_season_episode(games: &[Game]) -> SeasonEpisode {
    games
        .iter()
        .map(Game::period)
        .max()
        .unwrap_or(SeasonEpisode::ZERO)
}

/// Values selectable when recording a game: everything up to one past the current maximum.
pub fn next_period_choices(max: u32) -> RangeInclusive<u32> {
    1..=max + 1
}
