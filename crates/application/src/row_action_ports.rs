use async_trait::async_trait;
use estatedesk_core::AppResult;
use estatedesk_domain::{AdminResource, RowAction};

/// Service-layer port for row mutations (publish, unpublish, move-to-top, delete).
#[async_trait]
pub trait RowActionGateway: Send + Sync {
    /// Performs `action` on one row.
    async fn perform_action(
        &self,
        resource: AdminResource,
        row_id: &str,
        action: RowAction,
    ) -> AppResult<()>;
}

/// Toast severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    /// Confirmation of a completed action.
    Success,
    /// Report of a failed action.
    Error,
}

/// Transient user notification. Delivery is up to the [`Notifier`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    /// Severity.
    pub kind: ToastKind,
    /// i18n key of the message.
    pub message_key: String,
}

impl Toast {
    /// Creates a success toast.
    #[must_use]
    pub fn success(message_key: impl Into<String>) -> Self {
        Self {
            kind: ToastKind::Success,
            message_key: message_key.into(),
        }
    }

    /// Creates an error toast.
    #[must_use]
    pub fn error(message_key: impl Into<String>) -> Self {
        Self {
            kind: ToastKind::Error,
            message_key: message_key.into(),
        }
    }
}

/// Toast delivery port.
pub trait Notifier: Send + Sync {
    /// Shows one toast.
    fn notify(&self, toast: Toast);
}

/// Callback invoked after a row action succeeds so the owning list can refresh.
#[async_trait]
pub trait InteractionListener: Send + Sync {
    /// Reacts to a confirmed mutation.
    async fn on_interaction(&self);
}
