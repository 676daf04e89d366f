use std::sync::Arc;

use crate::{
    domain::settings::{CHAT_SETTINGS_PREFIX, ChatSettings, SettingsRepository},
    ports::notification::NotificationPort,
    workflow::WorkflowError,
};

#[async_trait::async_trait]
pub trait LoadChatSettingsUseCase {
    /// Hands the stored chat settings to the notifier. On first start the
    /// configured defaults are stored instead; afterwards the stored values
    /// take precedence over the configuration.
    async fn load_chat_settings(&self) -> Result<ChatSettings, WorkflowError>;
}

pub struct LoadChatSettingsUseCaseImpl<S: SettingsRepository, N: NotificationPort> {
    settings_repository: Arc<S>,
    notifier: Arc<N>,
    defaults: ChatSettings,
}

impl<S: SettingsRepository, N: NotificationPort> LoadChatSettingsUseCaseImpl<S, N> {
    pub fn new(settings_repository: Arc<S>, notifier: Arc<N>, defaults: ChatSettings) -> Self {
        Self {
            settings_repository,
            notifier,
            defaults,
        }
    }
}

#[async_trait::async_trait]
impl<S, N> LoadChatSettingsUseCase for LoadChatSettingsUseCaseImpl<S, N>
where
    S: SettingsRepository + Send + Sync + 'static,
    N: NotificationPort + Send + Sync + 'static,
{
    async fn load_chat_settings(&self) -> Result<ChatSettings, WorkflowError> {
        let entries = self
            .settings_repository
            .get_settings(CHAT_SETTINGS_PREFIX)
            .await?;
        let settings = match ChatSettings::from_entries(&entries) {
            Some(settings) => settings,
            None => {
                self.settings_repository
                    .save_settings(&self.defaults.to_entries())
                    .await?;
                log::info!("Stored initial chat settings");
                self.defaults.clone()
            }
        };
        self.notifier.apply_settings(settings.clone());
        log::info!(
            "Chat announcements {}",
            if settings.enabled { "enabled" } else { "disabled" }
        );
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{InMemoryLeague, RecordingNotifier};

    fn defaults() -> ChatSettings {
        ChatSettings {
            enabled: true,
            webhook: Some("https://hooks.example.com/env".into()),
            ..ChatSettings::default()
        }
    }

    #[tokio::test]
    async fn test_first_load_stores_defaults() {
        let repo = InMemoryLeague::new();
        let notifier = Arc::new(RecordingNotifier::default());
        let use_case = LoadChatSettingsUseCaseImpl::new(repo.clone(), notifier.clone(), defaults());
        assert_eq!(use_case.load_chat_settings().await.unwrap(), defaults());
        assert_eq!(notifier.applied(), Some(defaults()));
        assert!(!repo.get_settings(CHAT_SETTINGS_PREFIX).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_stored_settings_win() {
        let repo = InMemoryLeague::new();
        let stored = ChatSettings {
            channel: Some("#league".into()),
            ..ChatSettings::default()
        };
        repo.save_settings(&stored.to_entries()).await.unwrap();
        let notifier = Arc::new(RecordingNotifier::default());
        let use_case = LoadChatSettingsUseCaseImpl::new(repo, notifier.clone(), defaults());
        assert_eq!(use_case.load_chat_settings().await.unwrap(), stored);
        assert_eq!(notifier.applied(), Some(stored));
    }
}
