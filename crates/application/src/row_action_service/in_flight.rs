use std::collections::HashMap;

use estatedesk_domain::AdminResource;
use tokio::sync::Mutex;
use uuid::Uuid;

/// Proof that the holder started the current action on a row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InFlightToken {
    resource: AdminResource,
    row_id: String,
    request_id: Uuid,
}

impl InFlightToken {
    /// Returns the row the token guards.
    #[must_use]
    pub fn row_id(&self) -> &str {
        self.row_id.as_str()
    }

    /// Returns the unique id of the guarded request.
    #[must_use]
    pub fn request_id(&self) -> Uuid {
        self.request_id
    }
}

/// Per-row in-flight request registry.
///
/// Replaces a per-row loading flag: a completion only counts when its token is
/// still the current one for the row.
#[derive(Debug, Default)]
pub struct RowActionTracker {
    rows: Mutex<HashMap<(AdminResource, String), Uuid>>,
}

impl RowActionTracker {
    /// Creates an empty tracker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims a row. Returns `None` while another action on it is outstanding.
    pub async fn begin(&self, resource: AdminResource, row_id: &str) -> Option<InFlightToken> {
        let mut rows = self.rows.lock().await;
        let key = (resource, row_id.to_owned());
        if rows.contains_key(&key) {
            return None;
        }

        let request_id = Uuid::new_v4();
        rows.insert(key, request_id);

        Some(InFlightToken {
            resource,
            row_id: row_id.to_owned(),
            request_id,
        })
    }

    /// Releases a row. Returns `false` when the token was discarded meanwhile.
    pub async fn finish(&self, token: &InFlightToken) -> bool {
        let mut rows = self.rows.lock().await;
        let key = (token.resource, token.row_id.clone());
        match rows.get(&key) {
            Some(current) if *current == token.request_id => {
                rows.remove(&key);
                true
            }
            _ => false,
        }
    }

    /// Forgets every outstanding action of `resource`, e.g. after the list was reloaded.
    ///
    /// Responses that arrive later are reported as stale.
    pub async fn discard(&self, resource: AdminResource) {
        self.rows
            .lock()
            .await
            .retain(|(tracked_resource, _), _| *tracked_resource != resource);
    }

    /// Returns whether an action on the row is outstanding.
    pub async fn is_in_flight(&self, resource: AdminResource, row_id: &str) -> bool {
        self.rows
            .lock()
            .await
            .contains_key(&(resource, row_id.to_owned()))
    }

    /// Returns the ids of rows of `resource` with an outstanding action.
    pub async fn in_flight_rows(&self, resource: AdminResource) -> Vec<String> {
        let mut rows: Vec<String> = self
            .rows
            .lock()
            .await
            .keys()
            .filter(|(tracked_resource, _)| *tracked_resource == resource)
            .map(|(_, row_id)| row_id.clone())
            .collect();
        rows.sort();
        rows
    }
}
