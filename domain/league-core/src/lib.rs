pub mod leaderboard;
pub mod report;
pub mod stats;

use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};

/// Handicap stones a game may be played with. One stone is never given.
pub const HANDICAP_CHOICES: [u8; 9] = [0, 2, 3, 4, 5, 6, 7, 8, 9];

/// Whole part of the komi; the half point is implied.
pub const KOMI_CHOICES: [u8; 4] = [0, 5, 6, 7];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlayerId(pub i64);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GameId(pub i64);

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub const ALL: [Color; 2] = [Color::White, Color::Black];

    pub fn opposite(&self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Color::White => "white",
            Color::Black => "black",
        }
    }
}

/// Single letter used for a color in result listings.
pub fn color_abbreviation(color: Color) -> char {
    match color {
        Color::White => 'w',
        Color::Black => 'b',
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseColorError(String);

impl fmt::Display for ParseColorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}' is not a color", self.0)
    }
}

impl std::error::Error for ParseColorError {}

impl FromStr for Color {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "white" => Ok(Color::White),
            "black" => Ok(Color::Black),
            other => Err(ParseColorError(other.to_string())),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A competition period. Ordering is lexicographic: season first, then episode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SeasonEpisode {
    pub season: u32,
    pub episode: u32,
}

impl SeasonEpisode {
    pub const ZERO: SeasonEpisode = SeasonEpisode {
        season: 0,
        episode: 0,
    };

    pub fn new(season: u32, episode: u32) -> Self {
        Self { season, episode }
    }
}

impl fmt::Display for SeasonEpisode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "S{:0>2}E{:0>2}", self.season, self.episode)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Player {
    pub id: PlayerId,
    pub first_name: String,
    pub last_name: String,
    pub aga_id: i32,
    pub rank: i32,
}

impl Player {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Game {
    pub id: GameId,
    pub white: PlayerId,
    pub black: PlayerId,
    pub winner: Color,
    pub handicap: u8,
    pub komi: u8,
    pub season: u32,
    pub episode: u32,
    pub created_at: DateTime<Utc>,
    pub played_at: DateTime<Utc>,
    pub last_modified_at: DateTime<Utc>,
}

impl Game {
    pub fn player(&self, color: Color) -> PlayerId {
        match color {
            Color::White => self.white,
            Color::Black => self.black,
        }
    }

    pub fn players(&self) -> [PlayerId; 2] {
        [self.white, self.black]
    }

    pub fn winner_id(&self) -> PlayerId {
        self.player(self.winner)
    }

    pub fn loser_id(&self) -> PlayerId {
        self.player(self.winner.opposite())
    }

    pub fn involves(&self, player: PlayerId) -> bool {
        self.white == player || self.black == player
    }

    pub fn is_won_by(&self, player: PlayerId) -> bool {
        self.winner_id() == player
    }

    pub fn period(&self) -> SeasonEpisode {
        SeasonEpisode::new(self.season, self.episode)
    }
}

/// Which games a season/episode selection covers. Episode 0 selects the whole season.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PeriodFilter {
    Season(u32),
    Episode(SeasonEpisode),
}

impl PeriodFilter {
    pub fn from_season_episode(season: u32, episode: u32) -> Self {
        if episode == 0 {
            PeriodFilter::Season(season)
        } else {
            PeriodFilter::Episode(SeasonEpisode::new(season, episode))
        }
    }

    pub fn matches(&self, game: &Game) -> bool {
        match self {
            PeriodFilter::Season(season) => game.season == *season,
            PeriodFilter::Episode(period) => game.period() == *period,
        }
    }
}

#[cfg(test)]
pub(crate) mod test_util {
    use chrono::{TimeZone, Utc};

    use super::*;

    pub fn game(id: i64, white: i64, black: i64, winner: Color, season: u32, episode: u32) -> Game {
        let at = Utc.with_ymd_and_hms(2017, 1, 1, 1, 1, 1).unwrap();
        Game {
            id: GameId(id),
            white: PlayerId(white),
            black: PlayerId(black),
            winner,
            handicap: 0,
            komi: 7,
            season,
            episode,
            created_at: at,
            played_at: at,
            last_modified_at: at,
        }
    }
}
