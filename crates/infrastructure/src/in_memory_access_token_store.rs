use async_trait::async_trait;
use estatedesk_application::AccessTokenStore;
use estatedesk_core::{AppError, AppResult, AuthTokens};
use tokio::sync::RwLock;

/// Process-local token store.
#[derive(Debug, Default)]
pub struct InMemoryAccessTokenStore {
    tokens: RwLock<Option<AuthTokens>>,
}

impl InMemoryAccessTokenStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store already holding `tokens`.
    #[must_use]
    pub fn with_tokens(tokens: AuthTokens) -> Self {
        Self {
            tokens: RwLock::new(Some(tokens)),
        }
    }
}

#[async_trait]
impl AccessTokenStore for InMemoryAccessTokenStore {
    async fn current(&self) -> Option<AuthTokens> {
        self.tokens.read().await.clone()
    }

    async fn store(&self, tokens: AuthTokens) -> AppResult<()> {
        if tokens.access_token().trim().is_empty() {
            return Err(AppError::Validation(
                "access token must not be empty".to_owned(),
            ));
        }

        *self.tokens.write().await = Some(tokens);
        Ok(())
    }

    async fn clear(&self) {
        self.tokens.write().await.take();
    }
}
