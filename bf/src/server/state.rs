//! Shared application state for the HTTP server

use std::sync::Arc;

use crate::genai::GenerationClient;

/// State handed to every route handler
///
/// The server is stateless beyond the shared client: wizard state lives with
/// the caller (the front-end), which posts back the milestone it wants
/// expanded.
#[derive(Clone)]
pub struct AppState {
    pub client: Arc<dyn GenerationClient>,
}
