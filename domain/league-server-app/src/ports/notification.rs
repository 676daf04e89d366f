use thiserror::Error;

use crate::domain::settings::ChatSettings;

#[async_trait::async_trait]
pub trait NotificationPort {
    async fn notify(&self, message: &str) -> Result<(), NotificationError>;
    /// Replaces the delivery settings used by later notifications.
    fn apply_settings(&self, settings: ChatSettings);
}

#[derive(Debug, Clone, Error)]
pub enum NotificationError {
    #[error("notifications are not configured: {0}")]
    NotConfigured(String),
    #[error("failed to deliver notification: {0}")]
    Delivery(String),
}
