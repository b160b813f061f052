pub mod health;

use axum::{
    routing::{any, get},
    Router,
};

use crate::grading::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Method check lives in the handler so a 405 still gets the JSON envelope.
        .route("/api/gpt-grade", any(handlers::handle_grade))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use axum::{body::Body, http::Request, http::StatusCode};
    use serde_json::Value;
    use tower::ServiceExt;

    use super::*;
    use crate::config::CommentStyle;

    #[tokio::test]
    async fn test_health() {
        let app = build_router(AppState::new(None, CommentStyle::Summary));
        let response = app
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "gpt-grade-api");
    }
}
