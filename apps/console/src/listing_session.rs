use std::sync::Arc;

use async_trait::async_trait;
use estatedesk_application::{
    AdminListGateway, QueryParamsSubscriber, RowActionTracker, TableOrchestrator, TableView,
};
use estatedesk_core::AppResult;
use estatedesk_domain::{AdminResource, QueryParams};
use tokio::sync::Mutex;
use tracing::debug;

use crate::text_renderer::TextTableRenderer;

/// Subscriber that keeps only the newest params until the session fetches them.
#[derive(Default)]
pub struct PendingFetch {
    params: Mutex<Option<QueryParams>>,
}

impl PendingFetch {
    async fn take(&self) -> Option<QueryParams> {
        self.params.lock().await.take()
    }
}

#[async_trait]
impl QueryParamsSubscriber for PendingFetch {
    async fn query_params_changed(&self, params: &QueryParams) {
        *self.params.lock().await = Some(params.clone());
    }
}

/// One resource table driven from the command line.
pub struct ListingSession {
    resource: AdminResource,
    gateway: Arc<dyn AdminListGateway>,
    pending: Arc<PendingFetch>,
    view: Mutex<TableView>,
}

impl ListingSession {
    pub fn new(
        resource: AdminResource,
        gateway: Arc<dyn AdminListGateway>,
        pending: Arc<PendingFetch>,
        view: TableView,
    ) -> Self {
        Self {
            resource,
            gateway,
            pending,
            view: Mutex::new(view),
        }
    }

    /// Fetches the newest announced params, if any. Returns whether a page was loaded.
    pub async fn fetch_pending(&self) -> AppResult<bool> {
        let Some(params) = self.pending.take().await else {
            return Ok(false);
        };

        debug!(resource = %self.resource, params = ?params, "fetching list page");
        self.view.lock().await.begin_loading();
        match self.gateway.list_records(self.resource, &params).await {
            Ok(page) => {
                self.view.lock().await.finish_loading(page);
                Ok(true)
            }
            Err(error) => {
                self.view.lock().await.abort_loading();
                Err(error)
            }
        }
    }

    /// Renders the loaded page as text.
    pub async fn render(
        &self,
        table: &TableOrchestrator,
        tracker: &RowActionTracker,
    ) -> AppResult<String> {
        let snapshot = table.snapshot().await;
        let in_flight = tracker.in_flight_rows(self.resource).await;
        self.view.lock().await.render(
            &TextTableRenderer,
            snapshot.pagination,
            &snapshot.filters,
            &in_flight,
        )
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use estatedesk_application::{
        AdminListGateway, RowActionTracker, TableEvent, TableOptions, TableOrchestrator, TableView,
    };
    use estatedesk_core::{AppError, AppResult};
    use estatedesk_domain::{
        AdminResource, ColumnFilterState, ListPage, PublicationStatus, QueryParams,
    };
    use serde_json::{Value, json};
    use tokio::sync::Mutex;

    use super::{ListingSession, PendingFetch};

    #[derive(Default)]
    struct FakeGateway {
        fail: bool,
        requests: Mutex<Vec<QueryParams>>,
    }

    #[async_trait]
    impl AdminListGateway for FakeGateway {
        async fn list_records(
            &self,
            _resource: AdminResource,
            params: &QueryParams,
        ) -> AppResult<ListPage<Value>> {
            self.requests.lock().await.push(params.clone());
            if self.fail {
                return Err(AppError::Internal("backend down".to_owned()));
            }

            Ok(ListPage {
                data: vec![json!({"id": "e-1", "title": "Villa", "status": "draft"})],
                meta: None,
            })
        }
    }

    fn session(gateway: Arc<FakeGateway>) -> (ListingSession, TableOrchestrator) {
        let pending = Arc::new(PendingFetch::default());
        let table = TableOrchestrator::new(
            TableOptions {
                status: Some(PublicationStatus::Draft),
                ..TableOptions::default()
            },
            pending.clone(),
        )
        .unwrap_or_else(|_| unreachable!());
        let session = ListingSession::new(
            AdminResource::Estate,
            gateway,
            pending,
            TableView::new(AdminResource::Estate, Vec::new()),
        );
        (session, table)
    }

    #[tokio::test]
    async fn coalesces_setup_events_into_one_request() {
        let gateway = Arc::new(FakeGateway::default());
        let (session, table) = session(gateway.clone());

        table.mount().await;
        let _ = table
            .dispatch(TableEvent::FiltersChanged(vec![
                ColumnFilterState::new("provinceCode", ["01"]).unwrap_or_else(|_| unreachable!()),
            ]))
            .await;
        let _ = table.dispatch(TableEvent::PageChanged(2)).await;

        assert!(session.fetch_pending().await.unwrap_or_else(|_| unreachable!()));
        assert!(!session.fetch_pending().await.unwrap_or_else(|_| unreachable!()));

        let requests = gateway.requests.lock().await;
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].pagination().map(|p| p.page()), Some(2));

        let output = session
            .render(&table, &RowActionTracker::new())
            .await
            .unwrap_or_else(|_| unreachable!());
        assert!(output.contains("Villa"));
    }

    #[tokio::test]
    async fn failed_fetch_clears_loading_and_propagates() {
        let gateway = Arc::new(FakeGateway {
            fail: true,
            ..FakeGateway::default()
        });
        let (session, table) = session(gateway);

        table.mount().await;
        let result = session.fetch_pending().await;

        assert!(matches!(result, Err(AppError::Internal(_))));
        assert!(!session.view.lock().await.is_loading());
    }
}
