use crate::domain::RepoError;

pub const DEFAULT_CHAT_USERNAME: &str = "leaguebot";
pub const DEFAULT_CHAT_ICON_EMOJI: &str = ":robot_face:";

const KEY_ENABLED: &str = "slack_enabled";
const KEY_WEBHOOK: &str = "slack_url";
const KEY_CHANNEL: &str = "slack_channel";
const KEY_USERNAME: &str = "slack_username";
const KEY_ICON_EMOJI: &str = "slack_icon_emoji";

/// How game announcements are posted to the chat webhook.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChatSettings {
    pub enabled: bool,
    pub webhook: Option<String>,
    pub channel: Option<String>,
    pub username: String,
    pub icon_emoji: String,
}

impl Default for ChatSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            webhook: None,
            channel: None,
            username: DEFAULT_CHAT_USERNAME.to_string(),
            icon_emoji: DEFAULT_CHAT_ICON_EMOJI.to_string(),
        }
    }
}

impl ChatSettings {
    /// Flattens into the key/value rows kept by [`SettingsRepository`].
    /// Unset optional values are stored as empty strings.
    pub fn to_entries(&self) -> Vec<(String, String)> {
        vec![
            (KEY_ENABLED.to_string(), self.enabled.to_string()),
            (KEY_WEBHOOK.to_string(), self.webhook.clone().unwrap_or_default()),
            (KEY_CHANNEL.to_string(), self.channel.clone().unwrap_or_default()),
            (KEY_USERNAME.to_string(), self.username.clone()),
            (KEY_ICON_EMOJI.to_string(), self.icon_emoji.clone()),
        ]
    }

    /// Rebuilds settings from stored rows, or `None` when they were never saved.
    pub fn from_entries(entries: &[(String, String)]) -> Option<Self> {
        let get = |key: &str| {
            entries
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.clone())
        };
        let non_empty = |key: &str| get(key).filter(|v| !v.is_empty());
        let enabled = get(KEY_ENABLED)?;
        Some(Self {
            enabled: enabled == "true",
            webhook: non_empty(KEY_WEBHOOK),
            channel: non_empty(KEY_CHANNEL),
            username: non_empty(KEY_USERNAME)
                .unwrap_or_else(|| DEFAULT_CHAT_USERNAME.to_string()),
            icon_emoji: non_empty(KEY_ICON_EMOJI)
                .unwrap_or_else(|| DEFAULT_CHAT_ICON_EMOJI.to_string()),
        })
    }
}

/// Key/value store for settings editable at runtime.
#[async_trait::async_trait]
pub trait SettingsRepository {
    async fn get_settings(&self, prefix: &str) -> Result<Vec<(String, String)>, RepoError>;
    /// Inserts or replaces every entry.
    async fn save_settings(&self, entries: &[(String, String)]) -> Result<(), RepoError>;
}

pub const CHAT_SETTINGS_PREFIX: &str = "slack_";
