use tokio::sync::Mutex;

use estatedesk_core::{AppError, AppResult};
use estatedesk_domain::{DeleteConfirmation, RowAction};

use super::{RowActionOutcome, RowActionRequest, RowActionService};
use crate::row_action_ports::InteractionListener;

/// Modal content for an action awaiting confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmationPrompt {
    /// Action that runs on confirm.
    pub request: RowActionRequest,
    /// i18n key of the modal title.
    pub title_key: &'static str,
    /// i18n key of the modal message.
    pub message_key: &'static str,
    /// Delete flow variant, for delete prompts.
    pub delete_flow: Option<DeleteConfirmation>,
}

impl ConfirmationPrompt {
    fn for_request(request: RowActionRequest) -> AppResult<Self> {
        let (title_key, message_key, delete_flow) = match request.action {
            RowAction::Publish => ("publication.title.publish", "publication.message.publish", None),
            RowAction::Unpublish => (
                "publication.title.unPublish",
                "publication.message.unPublish",
                None,
            ),
            RowAction::Delete => {
                let flow = request
                    .status
                    .map_or(DeleteConfirmation::Completed, DeleteConfirmation::for_status);
                (flow.title_key(), "deletion.message", Some(flow))
            }
            RowAction::MoveToTop | RowAction::Edit => {
                return Err(AppError::Validation(format!(
                    "'{}' runs without confirmation",
                    request.action.as_str()
                )));
            }
        };

        Ok(Self {
            request,
            title_key,
            message_key,
            delete_flow,
        })
    }
}

/// The single confirmation modal of a list table.
///
/// Selecting a row opens the modal; confirming runs the action and closes it
/// whatever the outcome; cancelling just closes it.
#[derive(Debug, Default)]
pub struct ConfirmationFlow {
    pending: Mutex<Option<ConfirmationPrompt>>,
}

impl ConfirmationFlow {
    /// Creates a closed modal.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens the modal for `request`, replacing any prompt already open.
    pub async fn request(&self, request: RowActionRequest) -> AppResult<ConfirmationPrompt> {
        request.validate()?;
        let prompt = ConfirmationPrompt::for_request(request)?;
        *self.pending.lock().await = Some(prompt.clone());
        Ok(prompt)
    }

    /// Returns the open prompt.
    pub async fn pending(&self) -> Option<ConfirmationPrompt> {
        self.pending.lock().await.clone()
    }

    /// Closes the modal without acting.
    pub async fn cancel(&self) {
        self.pending.lock().await.take();
    }

    /// Runs the pending action and closes the modal. Returns `None` when nothing was open.
    pub async fn confirm(
        &self,
        service: &RowActionService,
        listener: &dyn InteractionListener,
    ) -> Option<RowActionOutcome> {
        let prompt = self.pending.lock().await.take()?;
        Some(service.execute(prompt.request, listener).await)
    }
}
