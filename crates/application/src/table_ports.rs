use async_trait::async_trait;
use estatedesk_core::AppResult;
use estatedesk_domain::{AdminResource, ListPage, QueryParams};
use serde_json::Value;

/// Service-layer port for list endpoints.
#[async_trait]
pub trait AdminListGateway: Send + Sync {
    /// Fetches one page of `resource` rows matching `params`.
    async fn list_records(
        &self,
        resource: AdminResource,
        params: &QueryParams,
    ) -> AppResult<ListPage<Value>>;
}

/// Owner of a table, told whenever the table's request parameters change.
///
/// The table never fetches by itself; the subscriber issues the list request.
#[async_trait]
pub trait QueryParamsSubscriber: Send + Sync {
    /// Receives the new parameters of a refetching transition.
    async fn query_params_changed(&self, params: &QueryParams);
}
