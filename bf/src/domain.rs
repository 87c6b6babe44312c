//! Domain records for a generated plan
//!
//! A goal expands into a Series of 3 Boosters (milestones), and each Booster
//! lazily expands into 3 Cards (tasks). These structs are wire-compatible
//! with the HTTP API, so serde renames follow the JSON contract
//! (`imageUrl`, `isCompleted`, `rawParts`).

use serde::{Deserialize, Serialize};

use crate::genai::ContentPart;

/// A Booster: one of the 3 major steps toward the goal.
///
/// `tasks` stays `None` until the booster is opened for the first time, then
/// holds the generated cards for the rest of the session. It is set exactly
/// once and never regenerated.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Milestone {
    pub title: String,
    pub description: String,
    /// Data URI (`data:<mime>;base64,<payload>`) for the booster wrapper art.
    pub image_url: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tasks: Option<Vec<Task>>,

    #[serde(default, skip_serializing_if = "is_false")]
    pub is_completed: bool,

    /// Diagnostic payload attached only to the parse-failure placeholder.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_parts: Option<Vec<ContentPart>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_text: Option<String>,
}

impl Milestone {
    /// Create a milestone with no cached tasks
    pub fn new(title: impl Into<String>, description: impl Into<String>, image_url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            image_url: image_url.into(),
            tasks: None,
            is_completed: false,
            raw_parts: None,
            last_text: None,
        }
    }

    /// Placeholder record returned when milestone parsing produced nothing.
    ///
    /// Carries the raw response parts and the last text block seen so the
    /// caller can still render something and the failure can be diagnosed.
    pub fn parse_failure(raw_parts: Vec<ContentPart>, last_text: Option<String>) -> Self {
        Self {
            title: "Parsing Error".to_string(),
            description: "Could not parse the plan from the model. See server logs for details.".to_string(),
            image_url: String::new(),
            tasks: None,
            is_completed: false,
            raw_parts: Some(raw_parts),
            last_text,
        }
    }
}

/// A Card: one actionable sub-step inside a Booster.
///
/// Only complete records exist: title, at least one detail line, and art are
/// all guaranteed present by the parser.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub title: String,
    pub details: Vec<String>,
    pub image_url: String,
}

/// An uploaded reference image attached to the milestone prompt
#[derive(Debug, Clone)]
pub struct ReferenceImage {
    pub data: Vec<u8>,
    pub mime_type: String,
}

fn is_false(value: &bool) -> bool {
    !*value
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_milestone_serializes_without_empty_optionals() {
        let milestone = Milestone::new("Forge Ahead", "First steps", "data:image/png;base64,AA==");
        let json = serde_json::to_value(&milestone).unwrap();

        assert_eq!(json["title"], "Forge Ahead");
        assert_eq!(json["imageUrl"], "data:image/png;base64,AA==");
        assert!(json.get("tasks").is_none());
        assert!(json.get("isCompleted").is_none());
        assert!(json.get("rawParts").is_none());
    }

    #[test]
    fn test_milestone_deserializes_with_defaults() {
        let json = r#"{"title":"T","description":"D","imageUrl":"data:image/png;base64,AA=="}"#;
        let milestone: Milestone = serde_json::from_str(json).unwrap();

        assert!(milestone.tasks.is_none());
        assert!(!milestone.is_completed);
    }

    #[test]
    fn test_task_round_trips_camel_case() {
        let json = r#"{"title":"Gather Components","details":["Do X"],"imageUrl":"data:image/png;base64,AA=="}"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.title, "Gather Components");

        let back = serde_json::to_value(&task).unwrap();
        assert_eq!(back["imageUrl"], "data:image/png;base64,AA==");
    }

    #[test]
    fn test_parse_failure_placeholder() {
        let placeholder = Milestone::parse_failure(vec![], Some("garbage".to_string()));
        assert_eq!(placeholder.title, "Parsing Error");
        assert!(placeholder.image_url.is_empty());
        assert_eq!(placeholder.last_text.as_deref(), Some("garbage"));
    }
}
