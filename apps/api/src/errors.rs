use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use thiserror::Error;

use crate::llm_client::ProviderError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
/// Every variant renders as `{ ok: false, error, detail? }`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Method Not Allowed")]
    MethodNotAllowed,

    #[error("Invalid JSON body")]
    MalformedBody,

    #[error("category must be one of 1, 2, 3, 4, 5")]
    InvalidCategory,

    #[error("major is required")]
    MissingMajor,

    #[error("fields must be an object")]
    MissingFields,

    #[error("API key not configured")]
    ProviderNotConfigured,

    #[error("OpenAI API error")]
    ProviderError { detail: Value },

    #[error("Empty output from model")]
    EmptyProviderOutput { detail: Value },

    #[error("Model output was not valid JSON")]
    MalformedProviderOutput { text: String },

    #[error("Server error")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            AppError::MalformedBody
            | AppError::InvalidCategory
            | AppError::MissingMajor
            | AppError::MissingFields => StatusCode::BAD_REQUEST,
            AppError::ProviderNotConfigured
            | AppError::ProviderError { .. }
            | AppError::EmptyProviderOutput { .. }
            | AppError::MalformedProviderOutput { .. }
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn detail(&self) -> Option<Value> {
        match self {
            AppError::ProviderError { detail } | AppError::EmptyProviderOutput { detail } => {
                Some(detail.clone())
            }
            AppError::MalformedProviderOutput { text } => Some(Value::String(text.clone())),
            _ => None,
        }
    }
}

impl From<ProviderError> for AppError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::Transport(e) => AppError::ProviderError {
                detail: Value::String(e.to_string()),
            },
            ProviderError::Status { body, .. } => AppError::ProviderError { detail: body },
            ProviderError::Empty { raw } => AppError::EmptyProviderOutput { detail: raw },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let detail = self.detail();

        match &self {
            AppError::Internal(e) => tracing::error!("Internal error: {e:?}"),
            AppError::ProviderNotConfigured => tracing::error!("OPENAI_API_KEY is not set"),
            _ if status.is_server_error() => {
                let logged = detail.clone().unwrap_or(serde_json::Value::Null);
                tracing::error!("{}: {}", self, logged)
            }
            _ => tracing::warn!("Rejected request: {}", self),
        }

        let mut body = json!({
            "ok": false,
            "error": self.to_string(),
        });
        if let Some(detail) = detail {
            body["detail"] = detail;
        }

        (status, Json(body)).into_response()
    }
}
