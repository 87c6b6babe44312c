//! GenerationClient trait definition

use async_trait::async_trait;

use super::{ContentPart, GenError};

/// Stateless multimodal generation client - each call is independent
///
/// One invocation is one network round trip: the ordered prompt parts go
/// out, the ordered response parts come back. No streaming, no retries.
/// The client never reorders or interprets the returned parts; assembling
/// records out of them is the parser's job.
#[async_trait]
pub trait GenerationClient: Send + Sync {
    /// Send one generation request (blocking until complete)
    ///
    /// Fails with [`GenError::EmptyResponse`] if the service returned zero
    /// usable content parts, which usually signals a refused topic.
    async fn generate(&self, parts: Vec<ContentPart>) -> Result<Vec<ContentPart>, GenError>;
}
