use estatedesk_application::{Notifier, Toast, ToastKind};
use tracing::{info, warn};

/// Notifier that turns toasts into log events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl TracingNotifier {
    /// Creates the notifier.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Notifier for TracingNotifier {
    fn notify(&self, toast: Toast) {
        match toast.kind {
            ToastKind::Success => info!(message_key = %toast.message_key, "toast"),
            ToastKind::Error => warn!(message_key = %toast.message_key, "toast"),
        }
    }
}
