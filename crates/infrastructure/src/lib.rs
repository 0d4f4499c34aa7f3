//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod http_admin_client;
mod in_memory_access_token_store;
mod status_response_error_handler;
mod tracing_notifier;

pub use http_admin_client::{DEFAULT_REQUEST_TIMEOUT, HttpAdminClient};
pub use in_memory_access_token_store::InMemoryAccessTokenStore;
pub use status_response_error_handler::StatusResponseErrorHandler;
pub use tracing_notifier::TracingNotifier;
