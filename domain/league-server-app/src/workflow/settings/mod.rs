use crate::{
    domain::settings::{CHAT_SETTINGS_PREFIX, ChatSettings, SettingsRepository},
    workflow::WorkflowError,
};

pub mod get;
pub mod load;
pub mod test_message;
pub mod update;

/// Stored chat settings, or `defaults` when none were saved yet.
pub(crate) async fn current_chat_settings<S: SettingsRepository>(
    settings_repository: &S,
    defaults: &ChatSettings,
) -> Result<ChatSettings, WorkflowError> {
    let entries = settings_repository
        .get_settings(CHAT_SETTINGS_PREFIX)
        .await?;
    Ok(ChatSettings::from_entries(&entries).unwrap_or_else(|| defaults.clone()))
}
