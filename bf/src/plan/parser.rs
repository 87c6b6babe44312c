//! Response parsing: interleaved content parts into typed records
//!
//! The model answers a structured prompt with a loosely-delimited stream of
//! alternating text and image parts. Parsing is a single pass over that
//! stream with exactly one in-progress record at a time: each part is folded
//! into the accumulator, and whenever the accumulator satisfies its record's
//! completeness predicate it is flushed to the output and reset. Field order
//! within a record is tolerated (image before title is fine); records' parts
//! are assumed contiguous, which is how the model is instructed to answer.
//!
//! No backtracking: a marker that fails to yield a value leaves the
//! previously-captured field untouched, so a malformed text block never
//! wipes data already collected for the current record.

use tracing::{debug, error};

use super::PlanError;
use crate::domain::{Milestone, Task};
use crate::genai::{ContentPart, InlineImage};

/// Fallback description when a milestone flushes without one
const MISSING_DESCRIPTION: &str = "(No description provided)";

/// One in-progress record, specialized by target shape
trait Draft: Default {
    type Record;

    /// Fold a trimmed text part into the accumulator
    fn ingest_text(&mut self, text: &str);

    /// Fold an image part into the accumulator (last write wins)
    fn ingest_image(&mut self, image: &InlineImage);

    /// If the completeness predicate holds, emit the record and reset
    fn take_complete(&mut self) -> Option<Self::Record>;
}

/// Single-pass streaming reducer over the ordered part sequence
fn reduce<D: Draft>(parts: &[ContentPart]) -> Vec<D::Record> {
    let mut records = Vec::new();
    let mut draft = D::default();

    for part in parts {
        match part {
            ContentPart::Text(text) => draft.ingest_text(text.trim()),
            ContentPart::InlineImage(image) => draft.ingest_image(image),
        }

        if let Some(record) = draft.take_complete() {
            records.push(record);
        }
    }

    records
}

/// Extract the value between `marker` and the nearest of `terminators`
/// (or end of block). Returns `None` when the marker is absent or the
/// value trims to nothing, so callers never overwrite with emptiness.
fn field_after<'a>(text: &'a str, marker: &str, terminators: &[&str]) -> Option<&'a str> {
    let start = text.find(marker)? + marker.len();
    let rest = &text[start..];

    let end = terminators
        .iter()
        .filter_map(|t| rest.find(t))
        .min()
        .unwrap_or(rest.len());

    let value = rest[..end].trim();
    if value.is_empty() { None } else { Some(value) }
}

/// Strip a leading `N. ` numbering token from a detail line
fn strip_numbering(line: &str) -> &str {
    let trimmed = line.trim();
    let digits = trimmed.chars().take_while(|c| c.is_ascii_digit()).count();
    if digits > 0 && trimmed[digits..].starts_with('.') {
        trimmed[digits + 1..].trim()
    } else {
        trimmed
    }
}

#[derive(Default)]
struct MilestoneDraft {
    title: Option<String>,
    description: Option<String>,
    image_url: Option<String>,
}

impl Draft for MilestoneDraft {
    type Record = Milestone;

    fn ingest_text(&mut self, text: &str) {
        if let Some(title) = field_after(text, "Title:", &["Description:"]) {
            self.title = Some(title.to_string());
        }
        if let Some(description) = field_after(text, "Description:", &[]) {
            self.description = Some(description.to_string());
        }
    }

    fn ingest_image(&mut self, image: &InlineImage) {
        self.image_url = Some(image.data_uri());
    }

    fn take_complete(&mut self) -> Option<Milestone> {
        // Title and image are required; a missing description gets a
        // placeholder at flush time.
        if self.title.is_none() || self.image_url.is_none() {
            return None;
        }

        let draft = std::mem::take(self);
        Some(Milestone::new(
            draft.title.unwrap_or_default(),
            draft.description.unwrap_or_else(|| MISSING_DESCRIPTION.to_string()),
            draft.image_url.unwrap_or_default(),
        ))
    }
}

#[derive(Default)]
struct TaskDraft {
    title: Option<String>,
    details: Option<Vec<String>>,
    image_url: Option<String>,
}

impl Draft for TaskDraft {
    type Record = Task;

    fn ingest_text(&mut self, text: &str) {
        if let Some(title) = field_after(text, "Title:", &["Details:"]) {
            let title = title.strip_prefix("Card:").map(str::trim_start).unwrap_or(title);
            self.title = Some(title.to_string());
        }
        if let Some(details) = field_after(text, "Details:", &[]) {
            let lines: Vec<String> = details
                .lines()
                .map(strip_numbering)
                .filter(|line| !line.is_empty())
                .map(str::to_string)
                .collect();
            if !lines.is_empty() {
                self.details = Some(lines);
            }
        }
    }

    fn ingest_image(&mut self, image: &InlineImage) {
        self.image_url = Some(image.data_uri());
    }

    fn take_complete(&mut self) -> Option<Task> {
        // Partial records are never emitted: title, at least one detail
        // line, and art must all be present.
        let complete = self.title.is_some()
            && self.details.as_ref().is_some_and(|d| !d.is_empty())
            && self.image_url.is_some();
        if !complete {
            return None;
        }

        let draft = std::mem::take(self);
        Some(Task {
            title: draft.title.unwrap_or_default(),
            details: draft.details.unwrap_or_default(),
            image_url: draft.image_url.unwrap_or_default(),
        })
    }
}

/// Parse milestones from a generation response
///
/// Never fails: if no complete record could be assembled, returns one
/// "Parsing Error" placeholder carrying the raw parts and the last text
/// block seen, so the caller can still render something. The raw parts are
/// also logged at error level.
pub fn parse_milestones(parts: &[ContentPart]) -> Vec<Milestone> {
    let milestones = reduce::<MilestoneDraft>(parts);
    debug!(milestone_count = %milestones.len(), "parse_milestones: parsed");

    if milestones.is_empty() {
        error!(
            raw_parts = %serde_json::to_string(parts).unwrap_or_default(),
            "parse_milestones: no complete milestone in response"
        );
        let last_text = parts.iter().rev().find_map(|p| p.as_text()).map(|t| t.trim().to_string());
        return vec![Milestone::parse_failure(parts.to_vec(), last_text)];
    }

    milestones
}

/// Parse tasks from a generation response
///
/// Unlike milestone parsing, zero complete records is a hard failure.
pub fn parse_tasks(parts: &[ContentPart]) -> Result<Vec<Task>, PlanError> {
    let tasks = reduce::<TaskDraft>(parts);
    debug!(task_count = %tasks.len(), "parse_tasks: parsed");

    if tasks.is_empty() {
        error!(
            raw_parts = %serde_json::to_string(parts).unwrap_or_default(),
            "parse_tasks: no complete task in response"
        );
        return Err(PlanError::Breakdown);
    }

    Ok(tasks)
}
