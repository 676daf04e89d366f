use std::sync::Arc;

use crate::{
    domain::{
        account::AccountRepository,
        game::GameRepository,
        player::PlayerRepository,
        settings::{ChatSettings, SettingsRepository},
    },
    ports::notification::NotificationPort,
    workflow::{
        account::{
            bootstrap::{EnsureRootAccountUseCase, EnsureRootAccountUseCaseImpl},
            create::{CreateAccountUseCase, CreateAccountUseCaseImpl},
            delete::{DeleteAccountsUseCase, DeleteAccountsUseCaseImpl},
            get::{GetAccountUseCase, GetAccountUseCaseImpl},
            login::{LoginUseCase, LoginUseCaseImpl},
        },
        game::{
            choices::{GameChoicesUseCase, GameChoicesUseCaseImpl},
            create::{CreateGameUseCase, CreateGameUseCaseImpl},
            delete::{DeleteGameUseCase, DeleteGameUseCaseImpl},
            get::{GetGameUseCase, GetGameUseCaseImpl},
            update::{UpdateGameUseCase, UpdateGameUseCaseImpl},
        },
        player::{
            create::{CreatePlayerUseCase, CreatePlayerUseCaseImpl},
            delete::{DeletePlayerUseCase, DeletePlayerUseCaseImpl},
            get::{GetPlayerUseCase, GetPlayerUseCaseImpl},
            stats::{GetPlayerStatsUseCase, GetPlayerStatsUseCaseImpl},
        },
        report::generate::{GenerateReportUseCase, GenerateReportUseCaseImpl},
        settings::{
            get::{GetChatSettingsUseCase, GetChatSettingsUseCaseImpl},
            load::{LoadChatSettingsUseCase, LoadChatSettingsUseCaseImpl},
            test_message::{SendTestMessageUseCase, SendTestMessageUseCaseImpl},
            update::{UpdateChatSettingsUseCase, UpdateChatSettingsUseCaseImpl},
        },
        stats::{
            leaderboard::{EpisodeLeaderboardUseCase, EpisodeLeaderboardUseCaseImpl},
            periods::{LeaguePeriodsUseCase, LeaguePeriodsUseCaseImpl},
        },
    },
};

pub mod domain;
pub mod ports;
pub mod workflow;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

#[derive(Clone, Debug)]
pub struct ApplicationSettings {
    pub bcrypt_cost: u32,
    /// Prefix of the player links in game announcements.
    pub player_link_base_url: String,
    /// Chat settings stored on first start.
    pub chat_defaults: ChatSettings,
}

pub struct Application {
    pub account_create_use_case: Box<dyn CreateAccountUseCase + Send + Sync + 'static>,
    pub account_delete_use_case: Box<dyn DeleteAccountsUseCase + Send + Sync + 'static>,
    pub account_get_use_case: Box<dyn GetAccountUseCase + Send + Sync + 'static>,
    pub account_login_use_case: Box<dyn LoginUseCase + Send + Sync + 'static>,
    pub account_ensure_root_use_case: Box<dyn EnsureRootAccountUseCase + Send + Sync + 'static>,

    pub player_create_use_case: Box<dyn CreatePlayerUseCase + Send + Sync + 'static>,
    pub player_delete_use_case: Box<dyn DeletePlayerUseCase + Send + Sync + 'static>,
    pub player_get_use_case: Box<dyn GetPlayerUseCase + Send + Sync + 'static>,
    pub player_stats_use_case: Box<dyn GetPlayerStatsUseCase + Send + Sync + 'static>,

    pub game_create_use_case: Box<dyn CreateGameUseCase + Send + Sync + 'static>,
    pub game_update_use_case: Box<dyn UpdateGameUseCase + Send + Sync + 'static>,
    pub game_delete_use_case: Box<dyn DeleteGameUseCase + Send + Sync + 'static>,
    pub game_get_use_case: Box<dyn GetGameUseCase + Send + Sync + 'static>,
    pub game_choices_use_case: Box<dyn GameChoicesUseCase + Send + Sync + 'static>,

    pub stats_leaderboard_use_case: Box<dyn EpisodeLeaderboardUseCase + Send + Sync + 'static>,
    pub stats_periods_use_case: Box<dyn LeaguePeriodsUseCase + Send + Sync + 'static>,

    pub report_generate_use_case: Box<dyn GenerateReportUseCase + Send + Sync + 'static>,

    pub settings_get_use_case: Box<dyn GetChatSettingsUseCase + Send + Sync + 'static>,
    pub settings_update_use_case: Box<dyn UpdateChatSettingsUseCase + Send + Sync + 'static>,
    pub settings_load_use_case: Box<dyn LoadChatSettingsUseCase + Send + Sync + 'static>,
    pub settings_test_message_use_case: Box<dyn SendTestMessageUseCase + Send + Sync + 'static>,
}

pub fn build_application<
    A: AccountRepository + Send + Sync + 'static,
    P: PlayerRepository + Send + Sync + 'static,
    G: GameRepository + Send + Sync + 'static,
    S: SettingsRepository + Send + Sync + 'static,
    N: NotificationPort + Send + Sync + 'static,
>(
    settings: ApplicationSettings,
    account_repository: Arc<A>,
    player_repository: Arc<P>,
    game_repository: Arc<G>,
    settings_repository: Arc<S>,
    notification_port: Arc<N>,
) -> Application {
    Application {
        account_create_use_case: Box::new(CreateAccountUseCaseImpl::new(
            account_repository.clone(),
            settings.bcrypt_cost,
        )),
        account_delete_use_case: Box::new(DeleteAccountsUseCaseImpl::new(
            account_repository.clone(),
        )),
        account_get_use_case: Box::new(GetAccountUseCaseImpl::new(account_repository.clone())),
        account_login_use_case: Box::new(LoginUseCaseImpl::new(account_repository.clone())),
        account_ensure_root_use_case: Box::new(EnsureRootAccountUseCaseImpl::new(
            account_repository.clone(),
            settings.bcrypt_cost,
        )),

        player_create_use_case: Box::new(CreatePlayerUseCaseImpl::new(player_repository.clone())),
        player_delete_use_case: Box::new(DeletePlayerUseCaseImpl::new(player_repository.clone())),
        player_get_use_case: Box::new(GetPlayerUseCaseImpl::new(player_repository.clone())),
        player_stats_use_case: Box::new(GetPlayerStatsUseCaseImpl::new(
            player_repository.clone(),
            game_repository.clone(),
        )),

        game_create_use_case: Box::new(CreateGameUseCaseImpl::new(
            player_repository.clone(),
            game_repository.clone(),
            notification_port.clone(),
            settings.player_link_base_url.clone(),
        )),
        game_update_use_case: Box::new(UpdateGameUseCaseImpl::new(
            player_repository.clone(),
            game_repository.clone(),
        )),
        game_delete_use_case: Box::new(DeleteGameUseCaseImpl::new(game_repository.clone())),
        game_get_use_case: Box::new(GetGameUseCaseImpl::new(game_repository.clone())),
        game_choices_use_case: Box::new(GameChoicesUseCaseImpl::new(
            player_repository.clone(),
            game_repository.clone(),
        )),

        stats_leaderboard_use_case: Box::new(EpisodeLeaderboardUseCaseImpl::new(
            player_repository.clone(),
            game_repository.clone(),
        )),
        stats_periods_use_case: Box::new(LeaguePeriodsUseCaseImpl::new(game_repository.clone())),

        report_generate_use_case: Box::new(GenerateReportUseCaseImpl::new(
            player_repository.clone(),
            game_repository.clone(),
        )),

        settings_get_use_case: Box::new(GetChatSettingsUseCaseImpl::new(
            settings_repository.clone(),
            settings.chat_defaults.clone(),
        )),
        settings_update_use_case: Box::new(UpdateChatSettingsUseCaseImpl::new(
            settings_repository.clone(),
            notification_port.clone(),
        )),
        settings_load_use_case: Box::new(LoadChatSettingsUseCaseImpl::new(
            settings_repository.clone(),
            notification_port.clone(),
            settings.chat_defaults.clone(),
        )),
        settings_test_message_use_case: Box::new(SendTestMessageUseCaseImpl::new(
            notification_port.clone(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use league_core::Color;

    use super::*;
    use crate::{
        testing::{InMemoryLeague, RecordingNotifier},
        workflow::game::GameInput,
    };

    #[tokio::test]
    async fn test_application_wiring() {
        let repo = InMemoryLeague::new();
        let notifier = Arc::new(RecordingNotifier::default());
        let app = build_application(
            ApplicationSettings {
                bcrypt_cost: 4,
                player_link_base_url: "http://localhost:5000".into(),
                chat_defaults: ChatSettings::default(),
            },
            repo.clone(),
            repo.clone(),
            repo.clone(),
            repo.clone(),
            notifier.clone(),
        );

        assert!(
            app.account_ensure_root_use_case
                .ensure_root_account("root")
                .await
                .unwrap()
        );
        app.account_login_use_case
            .login("root", "root")
            .await
            .unwrap();

        let a = repo.add_player("Go", "Seigen", 1);
        let b = repo.add_player("Kitani", "Minoru", 2);
        let game = app
            .game_create_use_case
            .create_game(GameInput {
                white_id: a.id.0,
                black_id: b.id.0,
                winner: "white".into(),
                handicap: 0,
                komi: 7,
                season: 1,
                episode: 1,
                played_at: None,
            })
            .await
            .unwrap();
        assert_eq!(game.winner, Color::White);
        assert_eq!(notifier.messages().len(), 1);

        let stats = app
            .player_stats_use_case
            .get_stats(a.id, None, None)
            .await
            .unwrap();
        assert_eq!(stats.stats.league.wins, 1);

        let loaded = app.settings_load_use_case.load_chat_settings().await.unwrap();
        assert!(!loaded.enabled);
        assert_eq!(
            app.settings_get_use_case.get_chat_settings().await.unwrap(),
            loaded
        );
    }
}
