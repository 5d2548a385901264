use std::sync::Arc;

use crate::llm_client::CompletionClient;

/// Shared application state injected into all route handlers via Axum extractors.
/// Built once in `main`; nothing in it is mutated per request.
#[derive(Clone)]
pub struct AppState {
    /// Completion backend. `OpenAiClient` in production, a stub in tests.
    pub completion: Arc<dyn CompletionClient>,
    pub max_upload_bytes: usize,
}
