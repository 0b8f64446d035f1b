use crate::utils::error::ServiceError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

/// HTTP 錯誤回應。`context` 有值時 500 錯誤回傳 `{"error": context, "details": ...}`
#[derive(Debug)]
pub struct ApiError {
    error: ServiceError,
    context: Option<&'static str>,
}

impl ApiError {
    pub fn detailed(context: &'static str, error: ServiceError) -> Self {
        Self {
            error,
            context: Some(context),
        }
    }
}

impl From<ServiceError> for ApiError {
    fn from(error: ServiceError) -> Self {
        Self {
            error,
            context: None,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.error.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if status.is_client_error() {
            tracing::warn!("⚠️ Rejected request: {}", self.error);
        } else {
            tracing::error!(
                "❌ Request failed: {} (Category: {:?})",
                self.error,
                self.error.category()
            );
            tracing::debug!("💡 Suggestion: {}", self.error.recovery_suggestion());
        }

        let body = match (&self.error, self.context) {
            (ServiceError::ScriptFailed { details }, _) => {
                json!({"error": "Bash script failed", "details": details})
            }
            (ServiceError::ScriptLaunchError { details }, _) => json!({
                "error": "An error occurred while running the script",
                "details": details
            }),
            (error, Some(context)) if status.is_server_error() => {
                json!({"error": context, "details": error.to_string()})
            }
            (error, _) => json!({"error": error.to_string()}),
        };

        (status, Json(body)).into_response()
    }
}
