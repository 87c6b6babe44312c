//! Content-part types shared between prompts and responses
//!
//! These mirror the generation API's `Part` wire shape: a part is either a
//! text block or an inline base64 image. Externally-tagged serde gives the
//! exact `{"text": ...}` / `{"inlineData": {...}}` JSON the API expects.

use serde::{Deserialize, Serialize};

/// One atomic unit of a prompt or a generation response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContentPart {
    #[serde(rename = "text")]
    Text(String),

    #[serde(rename = "inlineData")]
    InlineImage(InlineImage),
}

impl ContentPart {
    /// Convenience constructor for a text part
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::InlineImage(_) => None,
        }
    }
}

/// Base64-encoded image payload with its declared mime type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineImage {
    /// Base64 payload, as received from (or sent to) the API
    pub data: String,
    pub mime_type: String,
}

impl InlineImage {
    pub fn new(data: impl Into<String>, mime_type: impl Into<String>) -> Self {
        Self {
            data: data.into(),
            mime_type: mime_type.into(),
        }
    }

    /// Render as a `data:` URI for direct embedding in the UI
    pub fn data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.data)
    }
}
