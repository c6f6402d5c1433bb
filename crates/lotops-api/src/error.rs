//! HTTP rendering for [`AppError`].
//!
//! Handlers return `Result<impl IntoResponse, HttpAppError>`; domain and
//! infrastructure errors convert in via `?` and come out as a consistent
//! status + JSON body + log line.

use axum::{
    extract::rejection::JsonRejection,
    extract::{FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use lotops_core::{AppError, ErrorMetadata, LogLevel};
use serde::{de::DeserializeOwned, Serialize};
use utoipa::ToSchema;

/// Wire shape of every error body this API returns.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_type: Option<String>,
    /// Stable machine-readable code, independent of the message text.
    pub code: String,
    /// Whether retrying the same request can succeed.
    pub recoverable: bool,
    /// Hint for the client (e.g. "Retry the import once the feed store is reachable").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_action: Option<String>,
}

/// Newtype carrying [`AppError`] across the orphan rule so the HTTP
/// rendering can live here instead of in lotops-core.
#[derive(Debug)]
pub struct HttpAppError(pub AppError);

impl From<AppError> for HttpAppError {
    fn from(err: AppError) -> Self {
        HttpAppError(err)
    }
}

impl From<anyhow::Error> for HttpAppError {
    fn from(err: anyhow::Error) -> Self {
        HttpAppError(AppError::InternalWithSource {
            message: err.to_string(),
            source: err,
        })
    }
}

impl From<JsonRejection> for HttpAppError {
    fn from(rejection: JsonRejection) -> Self {
        let body_text = rejection.body_text();
        // serde's type errors read poorly; the usual culprit is a numeric
        // employee_id where a UUID string belongs.
        let message = if body_text.contains("expected a formatted UUID")
            || body_text.contains("invalid type")
        {
            "Invalid request body: check that fields like employee_id are UUID strings, not numbers."
                .to_string()
        } else {
            format!("Invalid request body: {}", body_text)
        };
        HttpAppError(AppError::InvalidInput(message))
    }
}

/// JSON extractor whose rejection renders as our [`ErrorResponse`] shape
/// instead of axum's plain-text 400/422.
#[derive(Debug, Clone, Copy)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = HttpAppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(inner) = Json::<T>::from_request(req, state)
            .await
            .map_err(HttpAppError::from)?;
        Ok(ValidatedJson(inner))
    }
}

/// Deployment flag mirrored from ENVIRONMENT, falling back to APP_ENV.
fn is_production_env() -> bool {
    std::env::var("ENVIRONMENT")
        .or_else(|_| std::env::var("APP_ENV"))
        .map(|value| matches!(value.to_lowercase().as_str(), "production" | "prod"))
        .unwrap_or(false)
}

fn render(error: &AppError, expose_details: bool) -> ErrorResponse {
    ErrorResponse {
        error: error.client_message(),
        details: expose_details.then(|| error.detailed_message()),
        error_type: expose_details.then(|| error.error_type().to_string()),
        code: error.error_code().to_string(),
        recoverable: error.is_recoverable(),
        suggested_action: error.suggested_action().map(String::from),
    }
}

impl IntoResponse for HttpAppError {
    fn into_response(self) -> Response {
        let error = &self.0;
        let status = StatusCode::from_u16(error.http_status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        match error.log_level() {
            LogLevel::Debug => {
                tracing::debug!(%error, error_type = error.error_type(), "Request failed")
            }
            LogLevel::Warn => {
                tracing::warn!(%error, error_type = error.error_type(), "Request failed")
            }
            LogLevel::Error => {
                tracing::error!(%error, error_type = error.error_type(), "Request failed")
            }
        }

        // Details never leave the server in production; sensitive errors are
        // stripped everywhere.
        let expose_details = !is_production_env() && !error.is_sensitive();
        (status, Json(render(error, expose_details))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_from_anyhow_error() {
        let HttpAppError(app_err) = anyhow::anyhow!("pool exhausted").into();
        match app_err {
            AppError::InternalWithSource { message, .. } => {
                assert_eq!(message, "pool exhausted")
            }
            _ => panic!("Expected InternalWithSource variant"),
        }
    }

    #[test]
    fn test_status_codes_preserved_through_response() {
        let not_found = HttpAppError(AppError::NotFound("no such import".to_string()));
        assert_eq!(not_found.into_response().status(), StatusCode::NOT_FOUND);

        let conflict = HttpAppError(AppError::ScheduleConflict(
            "Shift overlaps an existing shift for this employee".to_string(),
        ));
        assert_eq!(conflict.into_response().status(), StatusCode::CONFLICT);

        let store = HttpAppError(AppError::InventoryStore(
            "deadlock detected".to_string(),
        ));
        assert_eq!(store.into_response().status(), StatusCode::BAD_GATEWAY);

        let retry = HttpAppError(AppError::ImportNotRetryable {
            id: Uuid::nil(),
            status: "pending".to_string(),
        });
        assert_eq!(retry.into_response().status(), StatusCode::CONFLICT);
    }

    /// Serialized ErrorResponse always carries "error", "code" and
    /// "recoverable"; "details", "error_type" and "suggested_action" appear
    /// only when set.
    #[test]
    fn test_error_response_shape() {
        let response = render(
            &AppError::NotFound("Import abc not found".to_string()),
            true,
        );
        let json = serde_json::to_value(&response).expect("serialize");
        assert!(json.get("error").and_then(|v| v.as_str()).is_some());
        assert!(json.get("details").and_then(|v| v.as_str()).is_some());
        assert!(json.get("recoverable").and_then(|v| v.as_bool()).is_some());
        assert_eq!(json.get("code").and_then(|v| v.as_str()), Some("NOT_FOUND"));
    }

    #[test]
    fn test_details_withheld_when_not_exposed() {
        let response = render(
            &AppError::NotFound("Import abc not found".to_string()),
            false,
        );
        assert!(response.details.is_none());
        assert!(response.error_type.is_none());
        let json = serde_json::to_value(&response).expect("serialize");
        assert!(json.get("details").is_none());
        assert!(json.get("error_type").is_none());
    }
}
