use league_server_app::{ApplicationSettings, domain::settings::ChatSettings};

const DEFAULT_HTTP_HOST: &str = "127.0.0.1";
const DEFAULT_HTTP_PORT: u16 = 5000;
const DEFAULT_ROOT_PASSWORD: &str = "root";
const DEFAULT_BCRYPT_COST: u32 = 12;
const BCRYPT_COSTS: std::ops::RangeInclusive<u32> = 4..=31;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{name} has an invalid value: {value}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct LogSettings {
    pub file_path: String,
    pub archive_pattern: String,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub db_path: String,
    pub http_host: String,
    pub http_port: u16,
    pub root_password: String,
    pub jwt_secret: Option<String>,
    pub bcrypt_cost: u32,
    /// Chat settings stored on first start; later edits go through the API.
    pub chat: ChatSettings,
    pub player_link_base_url: String,
    pub log: Option<LogSettings>,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        // Blank values count as unset.
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let db_path = var("LEAGUE_DB_PATH").ok_or(ConfigError::Missing("LEAGUE_DB_PATH"))?;
        let http_host = var("LEAGUE_HTTP_HOST").unwrap_or_else(|| DEFAULT_HTTP_HOST.to_string());
        let http_port = match var("LEAGUE_HTTP_PORT") {
            Some(value) => value.trim().parse().map_err(|_| ConfigError::Invalid {
                name: "LEAGUE_HTTP_PORT",
                value,
            })?,
            None => DEFAULT_HTTP_PORT,
        };
        let bcrypt_cost = match var("LEAGUE_BCRYPT_COST") {
            Some(value) => match value.trim().parse::<u32>() {
                Ok(cost) if BCRYPT_COSTS.contains(&cost) => cost,
                _ => {
                    return Err(ConfigError::Invalid {
                        name: "LEAGUE_BCRYPT_COST",
                        value,
                    });
                }
            },
            None => DEFAULT_BCRYPT_COST,
        };

        let defaults = ChatSettings::default();
        let webhook = var("SLACK_WEBHOOK");
        let enabled = match var("SLACK_ENABLED") {
            Some(value) => match value.trim().to_ascii_lowercase().as_str() {
                "true" | "1" | "yes" => true,
                "false" | "0" | "no" => false,
                _ => {
                    return Err(ConfigError::Invalid {
                        name: "SLACK_ENABLED",
                        value,
                    });
                }
            },
            None => webhook.is_some(),
        };
        let chat = ChatSettings {
            enabled,
            webhook,
            channel: var("SLACK_CHANNEL"),
            username: var("SLACK_USERNAME").unwrap_or(defaults.username),
            icon_emoji: var("SLACK_ICON_EMOJI").unwrap_or(defaults.icon_emoji),
        };
        let player_link_base_url = var("SLACK_BASE_URL")
            .unwrap_or_else(|| format!("http://{}:{}", http_host, http_port))
            .trim_end_matches('/')
            .to_string();

        let log = match (var("LOG_FILE_PATH"), var("LOG_ARCHIVE_PATTERN")) {
            (Some(file_path), Some(archive_pattern)) => Some(LogSettings {
                file_path,
                archive_pattern,
            }),
            _ => None,
        };

        Ok(Self {
            db_path,
            http_host,
            http_port,
            root_password: var("LEAGUE_ROOT_PASS")
                .unwrap_or_else(|| DEFAULT_ROOT_PASSWORD.to_string()),
            jwt_secret: var("LEAGUE_JWT_SECRET"),
            bcrypt_cost,
            chat,
            player_link_base_url,
            log,
        })
    }

    pub fn application_settings(&self) -> ApplicationSettings {
        ApplicationSettings {
            bcrypt_cost: self.bcrypt_cost,
            player_link_base_url: self.player_link_base_url.clone(),
            chat_defaults: self.chat.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config(vars: &[(&str, &str)]) -> Result<ServerConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config(&[("LEAGUE_DB_PATH", "league.db")]).unwrap();
        assert_eq!(config.http_host, "127.0.0.1");
        assert_eq!(config.http_port, 5000);
        assert_eq!(config.root_password, "root");
        assert_eq!(config.bcrypt_cost, 12);
        assert_eq!(config.jwt_secret, None);
        assert!(!config.chat.enabled);
        assert_eq!(config.chat.webhook, None);
        assert_eq!(config.chat.username, "leaguebot");
        assert_eq!(config.chat.icon_emoji, ":robot_face:");
        assert_eq!(config.player_link_base_url, "http://127.0.0.1:5000");
        assert!(config.log.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = config(&[
            ("LEAGUE_DB_PATH", "league.db"),
            ("LEAGUE_HTTP_PORT", "8080"),
            ("LEAGUE_BCRYPT_COST", "4"),
            ("SLACK_WEBHOOK", "https://hooks.example.com/x"),
            ("SLACK_CHANNEL", "#league"),
            ("SLACK_BASE_URL", "https://league.example.com/"),
            ("LOG_FILE_PATH", "league.log"),
            ("LOG_ARCHIVE_PATTERN", "league.{}.log.gz"),
        ])
        .unwrap();
        assert_eq!(config.http_port, 8080);
        assert_eq!(config.application_settings().bcrypt_cost, 4);
        assert!(config.chat.enabled);
        assert_eq!(config.chat.channel.as_deref(), Some("#league"));
        assert_eq!(config.application_settings().chat_defaults, config.chat);
        assert_eq!(config.player_link_base_url, "https://league.example.com");
        assert_eq!(config.log.unwrap().file_path, "league.log");
    }

    #[test]
    fn test_invalid_values() {
        assert_eq!(
            config(&[]).unwrap_err(),
            ConfigError::Missing("LEAGUE_DB_PATH")
        );
        assert!(matches!(
            config(&[("LEAGUE_DB_PATH", "x"), ("LEAGUE_HTTP_PORT", "http")]),
            Err(ConfigError::Invalid { name: "LEAGUE_HTTP_PORT", .. })
        ));
        assert!(matches!(
            config(&[("LEAGUE_DB_PATH", "x"), ("LEAGUE_BCRYPT_COST", "99")]),
            Err(ConfigError::Invalid { name: "LEAGUE_BCRYPT_COST", .. })
        ));
        assert!(matches!(
            config(&[("LEAGUE_DB_PATH", "x"), ("SLACK_ENABLED", "maybe")]),
            Err(ConfigError::Invalid { name: "SLACK_ENABLED", .. })
        ));
    }

    #[test]
    fn test_webhook_can_start_disabled() {
        let config = config(&[
            ("LEAGUE_DB_PATH", "league.db"),
            ("SLACK_WEBHOOK", "https://hooks.example.com/x"),
            ("SLACK_ENABLED", "false"),
        ])
        .unwrap();
        assert!(!config.chat.enabled);
        assert!(config.chat.webhook.is_some());
    }
}
