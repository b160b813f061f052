use std::sync::Arc;

use crate::config::CommentStyle;
use crate::grading::prompts::build_instructions;
use crate::llm_client::GradingProvider;

/// Shared application state injected into all route handlers via Axum extractors.
/// Holds no per-request data.
#[derive(Clone)]
pub struct AppState {
    /// `None` when no provider credential is configured.
    pub provider: Option<Arc<dyn GradingProvider>>,
    /// Developer prompt, built once per process.
    pub instructions: Arc<str>,
}

impl AppState {
    pub fn new(provider: Option<Arc<dyn GradingProvider>>, style: CommentStyle) -> Self {
        Self {
            provider,
            instructions: build_instructions(style).into(),
        }
    }
}
