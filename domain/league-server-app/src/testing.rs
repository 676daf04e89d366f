use std::{
    collections::BTreeMap,
    sync::{Arc, Mutex},
};

use chrono::Utc;
use league_core::{Color, Game, GameId, Player, PlayerId};

use crate::{
    domain::{
        RepoCreateError, RepoError, RepoRetrieveError, RepoUpdateError,
        account::{Account, AccountId, AccountRepository, NewAccount},
        game::{GameQuery, GameRepository, NewGame},
        player::{NewPlayer, PlayerRepository},
        settings::{ChatSettings, SettingsRepository},
    },
    ports::notification::{NotificationError, NotificationPort},
};

#[derive(Default)]
struct LeagueState {
    next_id: i64,
    players: BTreeMap<i64, Player>,
    games: BTreeMap<i64, Game>,
    accounts: BTreeMap<i64, Account>,
    settings: BTreeMap<String, String>,
}

impl LeagueState {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

/// All three repositories over one shared map, so that referential checks
/// between players and games behave like the database.
#[derive(Default)]
pub struct InMemoryLeague {
    state: Mutex<LeagueState>,
}

impl InMemoryLeague {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn add_player(&self, first_name: &str, last_name: &str, aga_id: i32) -> Player {
        let mut state = self.state.lock().unwrap();
        let id = PlayerId(state.next_id());
        let player = Player {
            id,
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            aga_id,
            rank: 1,
        };
        state.players.insert(id.0, player.clone());
        player
    }

    pub fn add_game(
        &self,
        white: PlayerId,
        black: PlayerId,
        winner: Color,
        season: u32,
        episode: u32,
    ) -> Game {
        let mut state = self.state.lock().unwrap();
        let id = GameId(state.next_id());
        let now = Utc::now();
        let game = Game {
            id,
            white,
            black,
            winner,
            handicap: 0,
            komi: 7,
            season,
            episode,
            created_at: now,
            played_at: now,
            last_modified_at: now,
        };
        state.games.insert(id.0, game.clone());
        game
    }

    pub fn game_count(&self) -> usize {
        self.state.lock().unwrap().games.len()
    }

    pub fn account_count(&self) -> usize {
        self.state.lock().unwrap().accounts.len()
    }
}

#[async_trait::async_trait]
impl PlayerRepository for InMemoryLeague {
    async fn create_player(&self, player: NewPlayer) -> Result<Player, RepoCreateError> {
        let mut state = self.state.lock().unwrap();
        if state.players.values().any(|p| p.aga_id == player.aga_id) {
            return Err(RepoCreateError::Conflict);
        }
        let id = PlayerId(state.next_id());
        let player = Player {
            id,
            first_name: player.first_name,
            last_name: player.last_name,
            aga_id: player.aga_id,
            rank: player.rank,
        };
        state.players.insert(id.0, player.clone());
        Ok(player)
    }

    async fn get_player(&self, id: PlayerId) -> Result<Player, RepoRetrieveError> {
        let state = self.state.lock().unwrap();
        state
            .players
            .get(&id.0)
            .cloned()
            .ok_or(RepoRetrieveError::NotFound)
    }

    async fn get_player_by_aga_id(&self, aga_id: i32) -> Result<Player, RepoRetrieveError> {
        let state = self.state.lock().unwrap();
        state
            .players
            .values()
            .find(|p| p.aga_id == aga_id)
            .cloned()
            .ok_or(RepoRetrieveError::NotFound)
    }

    async fn get_players(&self) -> Result<Vec<Player>, RepoError> {
        Ok(self.state.lock().unwrap().players.values().cloned().collect())
    }

    async fn delete_player(&self, id: PlayerId) -> Result<(), RepoUpdateError> {
        let mut state = self.state.lock().unwrap();
        if state.games.values().any(|g| g.involves(id)) {
            return Err(RepoUpdateError::Conflict);
        }
        state
            .players
            .remove(&id.0)
            .map(|_| ())
            .ok_or(RepoUpdateError::NotFound)
    }
}

#[async_trait::async_trait]
impl GameRepository for InMemoryLeague {
    async fn create_game(&self, game: NewGame) -> Result<Game, RepoCreateError> {
        let mut state = self.state.lock().unwrap();
        let id = GameId(state.next_id());
        let now = Utc::now();
        let game = Game {
            id,
            white: game.white,
            black: game.black,
            winner: game.winner,
            handicap: game.handicap,
            komi: game.komi,
            season: game.season,
            episode: game.episode,
            created_at: now,
            played_at: game.played_at.unwrap_or(now),
            last_modified_at: now,
        };
        state.games.insert(id.0, game.clone());
        Ok(game)
    }

    async fn get_game(&self, id: GameId) -> Result<Game, RepoRetrieveError> {
        let state = self.state.lock().unwrap();
        state
            .games
            .get(&id.0)
            .cloned()
            .ok_or(RepoRetrieveError::NotFound)
    }

    async fn query_games(&self, query: GameQuery) -> Result<Vec<Game>, RepoError> {
        let state = self.state.lock().unwrap();
        Ok(state
            .games
            .values()
            .filter(|g| query.matches(g))
            .cloned()
            .collect())
    }

    async fn update_game(&self, id: GameId, update: NewGame) -> Result<Game, RepoUpdateError> {
        let mut state = self.state.lock().unwrap();
        let Some(game) = state.games.get_mut(&id.0) else {
            return Err(RepoUpdateError::NotFound);
        };
        game.white = update.white;
        game.black = update.black;
        game.winner = update.winner;
        game.handicap = update.handicap;
        game.komi = update.komi;
        game.season = update.season;
        game.episode = update.episode;
        if let Some(played_at) = update.played_at {
            game.played_at = played_at;
        }
        game.last_modified_at = Utc::now();
        Ok(game.clone())
    }

    async fn delete_games(&self, ids: &[GameId]) -> Result<(), RepoError> {
        let mut state = self.state.lock().unwrap();
        for id in ids {
            state.games.remove(&id.0);
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl AccountRepository for InMemoryLeague {
    async fn create_account(&self, account: NewAccount) -> Result<Account, RepoCreateError> {
        let mut state = self.state.lock().unwrap();
        if state
            .accounts
            .values()
            .any(|a| a.username == account.username || a.email == account.email)
        {
            return Err(RepoCreateError::Conflict);
        }
        let id = AccountId(state.next_id());
        let account = Account {
            id,
            username: account.username,
            email: account.email,
            password_hash: account.password_hash,
            first_name: account.first_name,
            last_name: account.last_name,
            active: account.active,
            is_admin: account.is_admin,
            created_at: Utc::now(),
        };
        state.accounts.insert(id.0, account.clone());
        Ok(account)
    }

    async fn get_account(&self, id: AccountId) -> Result<Account, RepoRetrieveError> {
        let state = self.state.lock().unwrap();
        state
            .accounts
            .get(&id.0)
            .cloned()
            .ok_or(RepoRetrieveError::NotFound)
    }

    async fn get_account_by_username(&self, username: &str) -> Result<Account, RepoRetrieveError> {
        let state = self.state.lock().unwrap();
        state
            .accounts
            .values()
            .find(|a| a.username == username)
            .cloned()
            .ok_or(RepoRetrieveError::NotFound)
    }

    async fn get_account_by_email(&self, email: &str) -> Result<Account, RepoRetrieveError> {
        let state = self.state.lock().unwrap();
        state
            .accounts
            .values()
            .find(|a| a.email == email)
            .cloned()
            .ok_or(RepoRetrieveError::NotFound)
    }

    async fn get_accounts(&self) -> Result<Vec<Account>, RepoError> {
        Ok(self.state.lock().unwrap().accounts.values().cloned().collect())
    }

    async fn delete_accounts(&self, ids: &[AccountId]) -> Result<(), RepoError> {
        let mut state = self.state.lock().unwrap();
        for id in ids {
            state.accounts.remove(&id.0);
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl SettingsRepository for InMemoryLeague {
    async fn get_settings(&self, prefix: &str) -> Result<Vec<(String, String)>, RepoError> {
        let state = self.state.lock().unwrap();
        Ok(state
            .settings
            .iter()
            .filter(|(k, _)| k.starts_with(prefix))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect())
    }

    async fn save_settings(&self, entries: &[(String, String)]) -> Result<(), RepoError> {
        let mut state = self.state.lock().unwrap();
        for (key, value) in entries {
            state.settings.insert(key.clone(), value.clone());
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    pub messages: Mutex<Vec<String>>,
    pub fail: bool,
    pub applied: Mutex<Option<ChatSettings>>,
}

impl RecordingNotifier {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }

    pub fn applied(&self) -> Option<ChatSettings> {
        self.applied.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl NotificationPort for RecordingNotifier {
    async fn notify(&self, message: &str) -> Result<(), NotificationError> {
        if self.fail {
            return Err(NotificationError::Delivery("webhook unreachable".into()));
        }
        self.messages.lock().unwrap().push(message.to_string());
        Ok(())
    }

    fn apply_settings(&self, settings: ChatSettings) {
        *self.applied.lock().unwrap() = Some(settings);
    }
}
