//! Generation client module for BoosterForge
//!
//! Wraps the external multimodal generation capability behind a small trait:
//! ordered prompt parts in, ordered response parts out.

use std::sync::Arc;

use tracing::debug;

pub mod client;
mod error;
mod gemini;
mod types;

pub use client::GenerationClient;
pub use error::GenError;
pub use gemini::GeminiClient;
pub use types::{ContentPart, InlineImage};

use crate::config::GenaiConfig;

/// Create a generation client from configuration
pub fn create_client(config: &GenaiConfig) -> Result<Arc<dyn GenerationClient>, GenError> {
    debug!(model = %config.model, "create_client: called");
    Ok(Arc::new(GeminiClient::from_config(config)?))
}
