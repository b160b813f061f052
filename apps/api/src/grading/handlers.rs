//! Axum route handler for the grading endpoint.

use axum::{body::Bytes, extract::State, http::Method, Json};
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::errors::AppError;
use crate::grading::prompts::build_user_payload;
use crate::grading::request::GradingRequest;
use crate::grading::schema::schema_for_category;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct GradeResponse {
    pub ok: bool,
    /// `{ scores, comment }` exactly as the model returned it.
    pub result: Value,
}

/// ANY /api/gpt-grade
///
/// Only POST is served; other methods get the JSON 405 envelope.
/// Validation happens before any provider call.
pub async fn handle_grade(
    State(state): State<AppState>,
    method: Method,
    body: Bytes,
) -> Result<Json<GradeResponse>, AppError> {
    if method != Method::POST {
        return Err(AppError::MethodNotAllowed);
    }

    let body: Value = if body.iter().all(u8::is_ascii_whitespace) {
        Value::Null
    } else {
        serde_json::from_slice(&body).map_err(|_| AppError::MalformedBody)?
    };

    let request = GradingRequest::from_body(&body)?;
    let provider = state
        .provider
        .as_ref()
        .ok_or(AppError::ProviderNotConfigured)?;

    debug!(
        "Grading request: category={}, major_chars={}, fields={}",
        request.category as u8,
        request.major.chars().count(),
        request.fields.len()
    );

    let schema = schema_for_category(request.category);
    let payload = build_user_payload(&request).map_err(|e| AppError::Internal(e.into()))?;

    let text = provider
        .complete(&state.instructions, &payload, schema)
        .await?;

    let result: Value = serde_json::from_str(&text)
        .map_err(|_| AppError::MalformedProviderOutput { text: text.clone() })?;

    Ok(Json(GradeResponse { ok: true, result }))
}
