//! Confirmation and alert dialogs.

/// User-facing prompts.
///
/// `confirm` is always awaited before a mutating request is sent.
#[async_trait::async_trait]
pub trait Dialogs: Send + Sync {
    /// Ask a yes/no question.
    async fn confirm(&self, message: &str) -> bool;

    /// Show a blocking error message.
    async fn alert(&self, message: &str);
}

/// Headless dialogs: confirms everything, logs alerts.
#[derive(Debug, Clone, Copy, Default)]
pub struct AutoConfirm;

#[async_trait::async_trait]
impl Dialogs for AutoConfirm {
    async fn confirm(&self, message: &str) -> bool {
        tracing::info!(message, "Auto-confirming");
        true
    }

    async fn alert(&self, message: &str) {
        tracing::warn!(message, "Alert");
    }
}
