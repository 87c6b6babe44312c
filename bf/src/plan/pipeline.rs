//! Pipeline composition: prompt -> generation client -> parser
//!
//! Stateless entry points used both by the HTTP routes and by
//! [`PlanSession`](super::PlanSession). One network call per invocation.

use tracing::{debug, info};

use super::{PlanError, parser, prompt};
use crate::domain::{Milestone, ReferenceImage, Task};
use crate::genai::GenerationClient;

/// Expand a goal into the series' 3 milestones
///
/// Rejects an empty or whitespace-only goal before any network activity.
pub async fn generate_milestones(
    client: &dyn GenerationClient,
    goal: &str,
    reference_image: Option<&ReferenceImage>,
) -> Result<Vec<Milestone>, PlanError> {
    if goal.trim().is_empty() {
        return Err(PlanError::EmptyGoal);
    }

    debug!(goal_len = %goal.len(), has_image = %reference_image.is_some(), "generate_milestones: called");
    let parts = prompt::milestone_prompt(goal, reference_image);
    let response = client.generate(parts).await?;
    let milestones = parser::parse_milestones(&response);

    info!(milestone_count = %milestones.len(), "generate_milestones: done");
    Ok(milestones)
}

/// Expand one milestone into its tasks
pub async fn generate_tasks(
    client: &dyn GenerationClient,
    milestone: &Milestone,
    series_theme: &str,
) -> Result<Vec<Task>, PlanError> {
    debug!(milestone = %milestone.title, "generate_tasks: called");
    let parts = prompt::task_prompt(milestone, series_theme);
    let response = client.generate(parts).await?;
    let tasks = parser::parse_tasks(&response)?;

    info!(task_count = %tasks.len(), milestone = %milestone.title, "generate_tasks: done");
    Ok(tasks)
}
