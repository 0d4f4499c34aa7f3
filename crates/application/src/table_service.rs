//! List table orchestration.
//!
//! The table owns pagination, sorting and column-filter state, turns every
//! change into one [`QueryParams`] value, and hands refetching transitions to its
//! [`QueryParamsSubscriber`]. It never performs network I/O itself.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use estatedesk_core::AppResult;
use estatedesk_domain::{ColumnFilterMap, Pagination, QueryParams, reduce_column_filters};

use crate::row_action_ports::InteractionListener;
use crate::table_ports::QueryParamsSubscriber;

mod body;
mod reducer;

pub use body::{RowView, TableBodyProps, TableBodyRenderer, TableView};
pub use reducer::{FilterPagePolicy, TableEvent, TableOptions, TableState, TableTransition};

/// Snapshot of the pieces of table state a body renderer receives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSnapshot {
    /// Current page window.
    pub pagination: Pagination,
    /// Flattened active filters.
    pub filters: ColumnFilterMap,
    /// Current request params.
    pub query_params: QueryParams,
}

/// Event-driven table state shared by the UI and its owner.
pub struct TableOrchestrator {
    state: Mutex<TableState>,
    subscriber: Arc<dyn QueryParamsSubscriber>,
}

impl TableOrchestrator {
    /// Creates a table with mount-time options.
    pub fn new(
        options: TableOptions,
        subscriber: Arc<dyn QueryParamsSubscriber>,
    ) -> AppResult<Self> {
        Ok(Self {
            state: Mutex::new(TableState::new(options)?),
            subscriber,
        })
    }

    /// Announces the mount-time params so the owner loads the first page.
    pub async fn mount(&self) -> QueryParams {
        let params = self.state.lock().await.query_params().clone();
        self.subscriber.query_params_changed(&params).await;
        params
    }

    /// Applies one event and notifies the owner when a refetch is due.
    pub async fn dispatch(&self, event: TableEvent) -> AppResult<TableTransition> {
        let transition = {
            let mut state = self.state.lock().await;
            state.apply(event)?
        };

        debug!(
            should_refetch = transition.should_refetch,
            params = ?transition.query_params,
            "table transition"
        );

        if transition.should_refetch {
            self.subscriber
                .query_params_changed(&transition.query_params)
                .await;
        }

        Ok(transition)
    }

    /// Returns the current request params.
    pub async fn query_params(&self) -> QueryParams {
        self.state.lock().await.query_params().clone()
    }

    /// Returns what a body renderer needs from the table state.
    pub async fn snapshot(&self) -> TableSnapshot {
        let state = self.state.lock().await;
        TableSnapshot {
            pagination: state.pagination(),
            filters: reduce_column_filters(state.column_filters()),
            query_params: state.query_params().clone(),
        }
    }
}

#[async_trait]
impl InteractionListener for TableOrchestrator {
    async fn on_interaction(&self) {
        if let Err(error) = self.dispatch(TableEvent::Refresh).await {
            warn!(error = %error, "table refresh failed");
        }
    }
}
