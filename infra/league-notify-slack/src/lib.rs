use league_server_app::{
    domain::settings::ChatSettings,
    ports::notification::{NotificationError, NotificationPort},
};
use parking_lot::RwLock;
use serde::Serialize;

#[derive(Serialize, Debug, PartialEq, Eq)]
struct WebhookPayload<'a> {
    username: &'a str,
    icon_emoji: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    channel: Option<&'a str>,
    text: &'a str,
}

fn payload<'a>(settings: &'a ChatSettings, text: &'a str) -> WebhookPayload<'a> {
    WebhookPayload {
        username: &settings.username,
        icon_emoji: &settings.icon_emoji,
        channel: settings.channel.as_deref(),
        text,
    }
}

/// Posts announcements to a Slack-compatible incoming webhook. The settings
/// can be swapped at runtime; each notification reads the current ones.
pub struct SlackWebhookNotifier {
    http_client: reqwest::Client,
    settings: RwLock<ChatSettings>,
}

impl SlackWebhookNotifier {
    pub fn new(settings: ChatSettings) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            settings: RwLock::new(settings),
        }
    }

    pub fn settings(&self) -> ChatSettings {
        self.settings.read().clone()
    }
}

#[async_trait::async_trait]
impl NotificationPort for SlackWebhookNotifier {
    async fn notify(&self, message: &str) -> Result<(), NotificationError> {
        // Snapshot so the lock is not held across the request.
        let settings = self.settings();
        if !settings.enabled {
            log::debug!("Skipping announcement, chat disabled: {}", message);
            return Err(NotificationError::NotConfigured(
                "chat announcements are disabled".to_string(),
            ));
        }
        let Some(webhook) = settings.webhook.as_deref() else {
            log::debug!("Skipping announcement, no webhook: {}", message);
            return Err(NotificationError::NotConfigured(
                "no webhook URL set".to_string(),
            ));
        };
        let resp = self
            .http_client
            .post(webhook)
            .json(&payload(&settings, message))
            .send()
            .await
            .map_err(|e| NotificationError::Delivery(e.to_string()))?;
        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(NotificationError::Delivery(format!(
                "webhook answered {}: {}",
                status, body
            )));
        }
        log::debug!("Posted announcement to chat webhook");
        Ok(())
    }

    fn apply_settings(&self, settings: ChatSettings) {
        *self.settings.write() = settings;
    }
}
