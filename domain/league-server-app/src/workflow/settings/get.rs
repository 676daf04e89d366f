use std::sync::Arc;

use crate::{
    domain::settings::{ChatSettings, SettingsRepository},
    workflow::{WorkflowError, settings::current_chat_settings},
};

#[async_trait::async_trait]
pub trait GetChatSettingsUseCase {
    async fn get_chat_settings(&self) -> Result<ChatSettings, WorkflowError>;
}

pub struct GetChatSettingsUseCaseImpl<S: SettingsRepository> {
    settings_repository: Arc<S>,
    defaults: ChatSettings,
}

impl<S: SettingsRepository> GetChatSettingsUseCaseImpl<S> {
    pub fn new(settings_repository: Arc<S>, defaults: ChatSettings) -> Self {
        Self {
            settings_repository,
            defaults,
        }
    }
}

#[async_trait::async_trait]
impl<S: SettingsRepository + Send + Sync + 'static> GetChatSettingsUseCase
    for GetChatSettingsUseCaseImpl<S>
{
    async fn get_chat_settings(&self) -> Result<ChatSettings, WorkflowError> {
        current_chat_settings(self.settings_repository.as_ref(), &self.defaults).await
    }
}
