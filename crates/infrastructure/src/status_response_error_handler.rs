use async_trait::async_trait;
use estatedesk_application::{FailedResponse, ResponseDisposition, ResponseErrorHandler};
use estatedesk_core::AppError;
use serde::Deserialize;

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<serde_json::Value>,
}

/// Default response handler: maps HTTP status to [`AppError`] and never replays.
#[derive(Debug, Clone, Copy, Default)]
pub struct StatusResponseErrorHandler;

impl StatusResponseErrorHandler {
    /// Creates the handler.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Maps one failed response to the error taxonomy.
    #[must_use]
    pub fn map_response(response: &FailedResponse) -> AppError {
        let detail = backend_message(response.body.as_str()).unwrap_or_else(|| {
            format!(
                "{} {} failed with status {}",
                response.method, response.path, response.status
            )
        });

        match response.status {
            400 | 422 => AppError::Validation(detail),
            401 => AppError::Unauthorized(detail),
            403 => AppError::Forbidden(detail),
            404 => AppError::NotFound(detail),
            409 => AppError::Conflict(detail),
            _ => AppError::Internal(detail),
        }
    }
}

/// Extracts `message` from a JSON error body. Validation errors may carry a list.
fn backend_message(body: &str) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_str(body).ok()?;
    match parsed.message? {
        serde_json::Value::String(message) if !message.trim().is_empty() => Some(message),
        serde_json::Value::Array(messages) => {
            let joined = messages
                .iter()
                .filter_map(serde_json::Value::as_str)
                .collect::<Vec<_>>()
                .join("; ");
            (!joined.is_empty()).then_some(joined)
        }
        _ => None,
    }
}

#[async_trait]
impl ResponseErrorHandler for StatusResponseErrorHandler {
    async fn handle(&self, response: &FailedResponse, _replayed: bool) -> ResponseDisposition {
        ResponseDisposition::Fail(Self::map_response(response))
    }
}

#[cfg(test)]
mod tests {
    use estatedesk_application::{FailedResponse, ResponseDisposition, ResponseErrorHandler};
    use estatedesk_core::AppError;

    use super::StatusResponseErrorHandler;

    fn failed(status: u16, body: &str) -> FailedResponse {
        FailedResponse {
            method: "POST".to_owned(),
            path: "v1/admin/estates/1/up-top".to_owned(),
            status,
            body: body.to_owned(),
        }
    }

    #[test]
    fn statuses_map_to_error_taxonomy() {
        let cases = [
            (400, "validation"),
            (401, "unauthorized"),
            (403, "forbidden"),
            (404, "not_found"),
            (409, "conflict"),
            (422, "validation"),
            (500, "internal"),
            (502, "internal"),
        ];

        for (status, expected) in cases {
            let kind = match StatusResponseErrorHandler::map_response(&failed(status, "")) {
                AppError::Validation(_) => "validation",
                AppError::Unauthorized(_) => "unauthorized",
                AppError::Forbidden(_) => "forbidden",
                AppError::NotFound(_) => "not_found",
                AppError::Conflict(_) => "conflict",
                AppError::Internal(_) => "internal",
            };
            assert_eq!(kind, expected, "status {status}");
        }
    }

    #[test]
    fn backend_message_is_preferred_over_generic_detail() {
        let error = StatusResponseErrorHandler::map_response(&failed(
            422,
            r#"{"message":["title is required","price must be positive"]}"#,
        ));
        assert_eq!(
            error,
            AppError::Validation("title is required; price must be positive".to_owned())
        );

        let error =
            StatusResponseErrorHandler::map_response(&failed(404, r#"{"message":"Estate not found"}"#));
        assert_eq!(error, AppError::NotFound("Estate not found".to_owned()));

        let error = StatusResponseErrorHandler::map_response(&failed(500, "<html>"));
        assert_eq!(
            error,
            AppError::Internal("POST v1/admin/estates/1/up-top failed with status 500".to_owned())
        );
    }

    #[tokio::test]
    async fn never_requests_a_replay() {
        let disposition = StatusResponseErrorHandler::new()
            .handle(&failed(401, ""), false)
            .await;

        assert!(matches!(
            disposition,
            ResponseDisposition::Fail(AppError::Unauthorized(_))
        ));
    }
}
