//! reqwest adapter for the admin backend.
//!
//! Every request carries the stored bearer token. Every non-success response goes
//! through the configured [`ResponseErrorHandler`], which may ask for one replay.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use estatedesk_application::{
    AccessTokenStore, AdminListGateway, FailedResponse, ResponseDisposition,
    ResponseErrorHandler, RowActionGateway,
};
use estatedesk_core::{AppError, AppResult};
use estatedesk_domain::{ActionMethod, AdminResource, ListPage, QueryParams, RowAction};
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Method, Response};
use serde_json::Value;
use tracing::debug;
use url::Url;

/// Request timeout applied when none is configured.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP implementation of the list and row-action gateways.
pub struct HttpAdminClient {
    http_client: reqwest::Client,
    base_url: Url,
    tokens: Arc<dyn AccessTokenStore>,
    error_handler: Arc<dyn ResponseErrorHandler>,
}

impl HttpAdminClient {
    /// Creates a client for the backend rooted at `base_url`.
    pub fn new(
        http_client: reqwest::Client,
        base_url: Url,
        tokens: Arc<dyn AccessTokenStore>,
        error_handler: Arc<dyn ResponseErrorHandler>,
    ) -> AppResult<Self> {
        if base_url.cannot_be_a_base() {
            return Err(AppError::Validation(format!(
                "backend url '{base_url}' cannot be used as a base"
            )));
        }

        Ok(Self {
            http_client,
            base_url,
            tokens,
            error_handler,
        })
    }

    /// Builds the underlying reqwest client with JSON default headers and `timeout`.
    pub fn build_http_client(timeout: Duration) -> AppResult<reqwest::Client> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        reqwest::Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()
            .map_err(|error| AppError::Internal(format!("failed to build http client: {error}")))
    }

    fn endpoint_url(&self, path: &str, query: &[(String, String)]) -> AppResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| {
                AppError::Validation(format!(
                    "backend url '{}' cannot be used as a base",
                    self.base_url
                ))
            })?
            .pop_if_empty()
            .extend(path.split('/').filter(|segment| !segment.is_empty()));

        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }

        Ok(url)
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        query: &[(String, String)],
    ) -> AppResult<Response> {
        let url = self.endpoint_url(path, query)?;
        let mut replayed = false;

        loop {
            let mut request = self.http_client.request(method.clone(), url.clone());
            if let Some(tokens) = self.tokens.current().await {
                request = request.header(AUTHORIZATION, tokens.bearer_header());
            }

            let response = request.send().await.map_err(|error| {
                AppError::Internal(format!("{method} {path} transport error: {error}"))
            })?;
            let status = response.status();
            debug!(method = %method, path, status = status.as_u16(), replayed, "backend response");

            if status.is_success() {
                return Ok(response);
            }

            let failed = FailedResponse {
                method: method.to_string(),
                path: path.to_owned(),
                status: status.as_u16(),
                body: response.text().await.unwrap_or_default(),
            };

            match self.error_handler.handle(&failed, replayed).await {
                ResponseDisposition::Replay if !replayed => replayed = true,
                ResponseDisposition::Replay => {
                    return Err(AppError::Internal(format!(
                        "{method} {path} failed with status {} after replay",
                        failed.status
                    )));
                }
                ResponseDisposition::Fail(error) => return Err(error),
            }
        }
    }
}

#[async_trait]
impl AdminListGateway for HttpAdminClient {
    async fn list_records(
        &self,
        resource: AdminResource,
        params: &QueryParams,
    ) -> AppResult<ListPage<Value>> {
        let path = resource.collection_path();
        let response = self
            .send(Method::GET, path.as_str(), &params.to_query_pairs())
            .await?;

        response.json::<ListPage<Value>>().await.map_err(|error| {
            AppError::Internal(format!("invalid list response from '{path}': {error}"))
        })
    }
}

#[async_trait]
impl RowActionGateway for HttpAdminClient {
    async fn perform_action(
        &self,
        resource: AdminResource,
        row_id: &str,
        action: RowAction,
    ) -> AppResult<()> {
        let endpoint = resource.action_endpoint(action, row_id)?;
        let method = match endpoint.method {
            ActionMethod::Post => Method::POST,
            ActionMethod::Delete => Method::DELETE,
        };

        self.send(method, endpoint.path.as_str(), &[]).await?;
        Ok(())
    }
}
