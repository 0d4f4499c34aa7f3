//! Row action execution.
//!
//! Every remote action follows the same sequence: claim the row, run the gateway
//! call, show one toast, and on success only tell the owner to refresh. Failures
//! end at the toast and are never returned to the caller.

use std::sync::Arc;

use tracing::{info, warn};

use estatedesk_core::{AppError, AppResult};
use estatedesk_domain::{AdminResource, PublicationStatus, RowAction, is_action_permitted};

use crate::row_action_ports::{InteractionListener, Notifier, RowActionGateway, Toast};

mod confirmation;
mod in_flight;

pub use confirmation::{ConfirmationFlow, ConfirmationPrompt};
pub use in_flight::{InFlightToken, RowActionTracker};

/// One user request to act on a row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowActionRequest {
    /// Resource the row belongs to.
    pub resource: AdminResource,
    /// Row identifier used in item paths.
    pub row_id: String,
    /// Row status at the time of the click; `None` for resources without one.
    pub status: Option<PublicationStatus>,
    /// Requested action.
    pub action: RowAction,
}

impl RowActionRequest {
    /// Creates a request. The status is dropped for resources without one.
    #[must_use]
    pub fn new(
        resource: AdminResource,
        row_id: impl Into<String>,
        status: Option<PublicationStatus>,
        action: RowAction,
    ) -> Self {
        Self {
            resource,
            row_id: row_id.into(),
            status: status.filter(|_| resource.is_publishable()),
            action,
        }
    }

    /// Checks the action against the row's status and the resource's endpoints.
    pub fn validate(&self) -> AppResult<()> {
        if !self.resource.supports(self.action) {
            return Err(AppError::Validation(format!(
                "{} rows do not support '{}'",
                self.resource.as_str(),
                self.action.as_str()
            )));
        }

        if self.resource.is_publishable() {
            let status = self.status.ok_or_else(|| {
                AppError::Validation(format!(
                    "{} row '{}' has no status",
                    self.resource.as_str(),
                    self.row_id
                ))
            })?;

            if !is_action_permitted(status, self.action) {
                return Err(AppError::Validation(format!(
                    "'{}' is not available for {} rows",
                    self.action.as_str(),
                    status.as_str()
                )));
            }
        }

        Ok(())
    }
}

/// How a row action ended. Never an error: failures were already reported by toast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowActionOutcome {
    /// The backend confirmed the mutation and the owner was asked to refresh.
    Completed,
    /// The backend call failed; an error toast was shown.
    Failed,
    /// Another action on the row is still running; nothing was sent.
    AlreadyInFlight,
    /// The response arrived after the row's request was discarded; nothing was shown.
    Stale,
    /// The action is not valid for the row; nothing was sent.
    Rejected(String),
    /// Edit was chosen; the owner opens the modification form.
    OpenEditor,
}

/// Application service executing row actions with toast feedback.
#[derive(Clone)]
pub struct RowActionService {
    gateway: Arc<dyn RowActionGateway>,
    notifier: Arc<dyn Notifier>,
    tracker: Arc<RowActionTracker>,
}

impl RowActionService {
    /// Creates a service from its ports.
    #[must_use]
    pub fn new(gateway: Arc<dyn RowActionGateway>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            gateway,
            notifier,
            tracker: Arc::new(RowActionTracker::new()),
        }
    }

    /// Returns the in-flight registry, for renderers that disable busy rows.
    #[must_use]
    pub fn tracker(&self) -> &RowActionTracker {
        &self.tracker
    }

    /// Runs one row action.
    pub async fn execute(
        &self,
        request: RowActionRequest,
        listener: &dyn InteractionListener,
    ) -> RowActionOutcome {
        if let Err(error) = request.validate() {
            warn!(
                resource = %request.resource,
                row_id = %request.row_id,
                action = %request.action,
                error = %error,
                "row action rejected"
            );
            return RowActionOutcome::Rejected(error.to_string());
        }

        if !request.action.is_remote() {
            return RowActionOutcome::OpenEditor;
        }

        let Some(token) = self
            .tracker
            .begin(request.resource, request.row_id.as_str())
            .await
        else {
            return RowActionOutcome::AlreadyInFlight;
        };

        let result = self
            .gateway
            .perform_action(request.resource, request.row_id.as_str(), request.action)
            .await;

        if !self.tracker.finish(&token).await {
            info!(
                resource = %request.resource,
                row_id = %request.row_id,
                action = %request.action,
                request_id = %token.request_id(),
                "discarding stale row action response"
            );
            return RowActionOutcome::Stale;
        }

        let (success_key, failure_key) = request.action.notification_keys();
        match result {
            Ok(()) => {
                self.notifier.notify(Toast::success(success_key));
                listener.on_interaction().await;
                RowActionOutcome::Completed
            }
            Err(error) => {
                warn!(
                    resource = %request.resource,
                    row_id = %request.row_id,
                    action = %request.action,
                    error = %error,
                    "row action failed"
                );
                self.notifier.notify(Toast::error(failure_key));
                RowActionOutcome::Failed
            }
        }
    }
}
