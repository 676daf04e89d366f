use std::sync::Arc;

use validator::Validate;

use crate::{
    domain::settings::{ChatSettings, SettingsRepository},
    ports::notification::NotificationPort,
    workflow::{FieldErrors, WorkflowError},
};

#[derive(Clone, Debug, Default, Validate)]
pub struct ChatSettingsInput {
    pub enabled: bool,
    #[validate(
        url(message = "Invalid URL."),
        length(max = 80, message = "Field cannot be longer than 80 characters.")
    )]
    pub webhook: Option<String>,
    #[validate(length(max = 80, message = "Field cannot be longer than 80 characters."))]
    pub channel: Option<String>,
    #[validate(length(min = 1, max = 80, message = "Field must be between 1 and 80 characters long."))]
    pub username: String,
    #[validate(length(min = 1, max = 80, message = "Field must be between 1 and 80 characters long."))]
    pub icon_emoji: String,
}

fn blank_to_none(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl ChatSettingsInput {
    fn trimmed(self) -> Self {
        Self {
            enabled: self.enabled,
            webhook: blank_to_none(self.webhook),
            channel: blank_to_none(self.channel),
            username: self.username.trim().to_string(),
            icon_emoji: self.icon_emoji.trim().to_string(),
        }
    }
}

#[async_trait::async_trait]
pub trait UpdateChatSettingsUseCase {
    /// Stores the settings and applies them to the notifier right away.
    async fn update_chat_settings(
        &self,
        input: ChatSettingsInput,
    ) -> Result<ChatSettings, WorkflowError>;
}

pub struct UpdateChatSettingsUseCaseImpl<S: SettingsRepository, N: NotificationPort> {
    settings_repository: Arc<S>,
    notifier: Arc<N>,
}

impl<S: SettingsRepository, N: NotificationPort> UpdateChatSettingsUseCaseImpl<S, N> {
    pub fn new(settings_repository: Arc<S>, notifier: Arc<N>) -> Self {
        Self {
            settings_repository,
            notifier,
        }
    }
}

#[async_trait::async_trait]
impl<S, N> UpdateChatSettingsUseCase for UpdateChatSettingsUseCaseImpl<S, N>
where
    S: SettingsRepository + Send + Sync + 'static,
    N: NotificationPort + Send + Sync + 'static,
{
    async fn update_chat_settings(
        &self,
        input: ChatSettingsInput,
    ) -> Result<ChatSettings, WorkflowError> {
        let input = input.trimmed();
        let mut errors = match input.validate() {
            Ok(()) => FieldErrors::new(),
            Err(e) => FieldErrors::from(e),
        };
        if input.enabled && input.webhook.is_none() && !errors.has("webhook") {
            errors.add("webhook", "A webhook URL is required to enable announcements.");
        }
        errors.into_result()?;

        let settings = ChatSettings {
            enabled: input.enabled,
            webhook: input.webhook,
            channel: input.channel,
            username: input.username,
            icon_emoji: input.icon_emoji,
        };
        self.settings_repository
            .save_settings(&settings.to_entries())
            .await?;
        self.notifier.apply_settings(settings.clone());
        log::info!("Chat settings updated, enabled: {}", settings.enabled);
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::settings::CHAT_SETTINGS_PREFIX,
        testing::{InMemoryLeague, RecordingNotifier},
    };

    fn input(enabled: bool, webhook: Option<&str>) -> ChatSettingsInput {
        ChatSettingsInput {
            enabled,
            webhook: webhook.map(str::to_string),
            channel: Some("  ".into()),
            username: " leaguebot ".into(),
            icon_emoji: ":go:".into(),
        }
    }

    #[tokio::test]
    async fn test_update_persists_and_applies() {
        let repo = InMemoryLeague::new();
        let notifier = Arc::new(RecordingNotifier::default());
        let use_case = UpdateChatSettingsUseCaseImpl::new(repo.clone(), notifier.clone());
        let settings = use_case
            .update_chat_settings(input(true, Some("https://hooks.example.com/a")))
            .await
            .unwrap();
        assert_eq!(settings.channel, None);
        assert_eq!(settings.username, "leaguebot");
        assert_eq!(notifier.applied(), Some(settings.clone()));
        let stored = repo.get_settings(CHAT_SETTINGS_PREFIX).await.unwrap();
        assert_eq!(ChatSettings::from_entries(&stored), Some(settings));
    }

    #[tokio::test]
    async fn test_enabling_requires_webhook() {
        let repo = InMemoryLeague::new();
        let notifier = Arc::new(RecordingNotifier::default());
        let use_case = UpdateChatSettingsUseCaseImpl::new(repo.clone(), notifier.clone());
        assert!(matches!(
            use_case.update_chat_settings(input(true, None)).await,
            Err(WorkflowError::Validation(e)) if e.has("webhook")
        ));
        assert!(matches!(
            use_case.update_chat_settings(input(false, Some("not a url"))).await,
            Err(WorkflowError::Validation(e)) if e.has("webhook")
        ));
        assert_eq!(notifier.applied(), None);
        assert!(repo.get_settings(CHAT_SETTINGS_PREFIX).await.unwrap().is_empty());

        use_case.update_chat_settings(input(false, None)).await.unwrap();
        assert_eq!(notifier.applied().map(|s| s.enabled), Some(false));
    }
}
