use async_trait::async_trait;
use estatedesk_core::{AppError, AppResult, AuthTokens};

/// Source of the bearer token attached to every backend request.
#[async_trait]
pub trait AccessTokenStore: Send + Sync {
    /// Returns the current tokens, if signed in.
    async fn current(&self) -> Option<AuthTokens>;

    /// Replaces the stored tokens.
    async fn store(&self, tokens: AuthTokens) -> AppResult<()>;

    /// Forgets the stored tokens.
    async fn clear(&self);
}

/// A backend response with a non-success status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedResponse {
    /// HTTP method of the request.
    pub method: String,
    /// Request path relative to the API base.
    pub path: String,
    /// HTTP status code.
    pub status: u16,
    /// Raw response body; empty when unreadable.
    pub body: String,
}

/// What the HTTP client does with a failed response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseDisposition {
    /// Send the same request once more, e.g. after refreshing credentials.
    Replay,
    /// Give up with this error.
    Fail(AppError),
}

/// Central normalization of failed backend responses.
#[async_trait]
pub trait ResponseErrorHandler: Send + Sync {
    /// Decides the fate of `response`. `replayed` is true when the request was already replayed.
    async fn handle(&self, response: &FailedResponse, replayed: bool) -> ResponseDisposition;
}
