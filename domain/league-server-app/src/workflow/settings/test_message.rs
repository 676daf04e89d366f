use std::sync::Arc;

use crate::{
    ports::notification::{NotificationError, NotificationPort},
    workflow::WorkflowError,
};

pub const TEST_MESSAGE: &str = "Test message sent.";

#[async_trait::async_trait]
pub trait SendTestMessageUseCase {
    async fn send_test_message(&self) -> Result<(), WorkflowError>;
}

pub struct SendTestMessageUseCaseImpl<N: NotificationPort> {
    notifier: Arc<N>,
}

impl<N: NotificationPort> SendTestMessageUseCaseImpl<N> {
    pub fn new(notifier: Arc<N>) -> Self {
        Self { notifier }
    }
}

#[async_trait::async_trait]
impl<N: NotificationPort + Send + Sync + 'static> SendTestMessageUseCase
    for SendTestMessageUseCaseImpl<N>
{
    async fn send_test_message(&self) -> Result<(), WorkflowError> {
        match self.notifier.notify(TEST_MESSAGE).await {
            Ok(()) => Ok(()),
            Err(NotificationError::NotConfigured(reason)) => {
                log::info!("Test message not sent: {}", reason);
                Err(WorkflowError::invalid(
                    "enabled",
                    "Announcements are disabled or have no webhook.",
                ))
            }
            Err(e) => {
                log::warn!("Test message failed: {}", e);
                Err(WorkflowError::Internal(
                    "Failed to deliver test message".to_string(),
                ))
            }
        }
    }
}
