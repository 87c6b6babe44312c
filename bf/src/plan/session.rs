//! PlanSession - wizard state for one goal-to-boosters session
//!
//! Sequences the pipeline for the two request kinds and owns the session's
//! only mutable state: the milestone list, the lazy per-milestone task
//! cache, and completion flags. Everything is in-memory and discarded on
//! reset; nothing persists across sessions.

use std::io::{self, BufRead, Write as IoWrite};
use std::path::Path;
use std::sync::Arc;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use eyre::{Context, Result};
use tracing::{debug, info, warn};

use super::{PlanError, pipeline};
use crate::domain::{Milestone, ReferenceImage, Task};
use crate::genai::GenerationClient;

/// State of the wizard session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No plan yet
    Idle,
    /// Milestone generation in flight
    MilestonesLoading,
    /// Milestones available; boosters can be opened
    MilestonesReady,
    /// Task generation in flight for the milestone at this index
    TasksLoading(usize),
}

/// PlanSession orchestrates the goal -> boosters -> cards wizard
pub struct PlanSession {
    client: Arc<dyn GenerationClient>,

    /// The goal text, doubling as the series theme for task prompts
    goal: String,

    milestones: Vec<Milestone>,

    state: SessionState,
}

impl PlanSession {
    /// Create a new idle session
    pub fn new(client: Arc<dyn GenerationClient>) -> Self {
        Self {
            client,
            goal: String::new(),
            milestones: Vec::new(),
            state: SessionState::Idle,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn milestones(&self) -> &[Milestone] {
        &self.milestones
    }

    /// The series theme is the goal the plan was generated from
    pub fn series_theme(&self) -> &str {
        &self.goal
    }

    fn is_busy(&self) -> bool {
        matches!(
            self.state,
            SessionState::MilestonesLoading | SessionState::TasksLoading(_)
        )
    }

    /// Generate the 3-booster plan for a goal
    ///
    /// An empty goal fails synchronously before any network activity. A call
    /// while another generation is in flight is rejected with
    /// [`PlanError::Busy`] rather than queued.
    pub async fn generate_plan(
        &mut self,
        goal: &str,
        reference_image: Option<&ReferenceImage>,
    ) -> Result<&[Milestone], PlanError> {
        debug!(goal_len = %goal.len(), "generate_plan: called");
        if goal.trim().is_empty() {
            return Err(PlanError::EmptyGoal);
        }
        if self.is_busy() {
            return Err(PlanError::Busy);
        }

        let previous = self.state;
        self.state = SessionState::MilestonesLoading;

        match pipeline::generate_milestones(self.client.as_ref(), goal, reference_image).await {
            Ok(milestones) => {
                info!(milestone_count = %milestones.len(), "generate_plan: plan ready");
                self.goal = goal.to_string();
                self.milestones = milestones;
                self.state = SessionState::MilestonesReady;
                Ok(&self.milestones)
            }
            Err(e) => {
                // The session stays usable; the caller may retry.
                warn!(error = %e, "generate_plan: failed");
                self.state = previous;
                Err(e)
            }
        }
    }

    /// Open the booster at `index`, generating its cards on first open
    ///
    /// Cached tasks are returned without a network call. A completed booster
    /// is not re-openable: selection is a no-op that returns whatever was
    /// already cached. The generated result is written back to the milestone
    /// it was requested for, by index, and only if that slot is still empty.
    pub async fn select_milestone(&mut self, index: usize) -> Result<&[Task], PlanError> {
        debug!(%index, "select_milestone: called");
        if index >= self.milestones.len() {
            return Err(PlanError::MilestoneOutOfRange(index));
        }
        if self.milestones[index].is_completed || self.milestones[index].tasks.is_some() {
            debug!(%index, "select_milestone: cached or completed, no generation");
            return Ok(self.milestones[index].tasks.as_deref().unwrap_or_default());
        }
        if self.is_busy() {
            return Err(PlanError::Busy);
        }

        self.state = SessionState::TasksLoading(index);
        let milestone = self.milestones[index].clone();
        let result = pipeline::generate_tasks(self.client.as_ref(), &milestone, &self.goal).await;
        self.state = SessionState::MilestonesReady;

        let tasks = result?;
        let slot = &mut self.milestones[index];
        if slot.tasks.is_none() && !slot.is_completed {
            slot.tasks = Some(tasks);
        }
        Ok(slot.tasks.as_deref().unwrap_or_default())
    }

    /// Idempotently mark the booster at `index` as collected
    pub fn complete_milestone(&mut self, index: usize) -> Result<(), PlanError> {
        debug!(%index, "complete_milestone: called");
        if index >= self.milestones.len() {
            return Err(PlanError::MilestoneOutOfRange(index));
        }
        self.milestones[index].is_completed = true;
        Ok(())
    }

    /// Discard all state and return to idle
    pub fn reset(&mut self) {
        info!("reset: discarding session state");
        self.goal.clear();
        self.milestones.clear();
        self.state = SessionState::Idle;
    }

    /// Run the wizard interactively (reads stdin, writes stdout)
    ///
    /// Generates the plan, then loops: list boosters, open one by number,
    /// show its cards, optionally mark it collected. Art is decoded from the
    /// data URIs and written under `art_dir`.
    pub async fn run_interactive(
        &mut self,
        goal: &str,
        reference_image: Option<&ReferenceImage>,
        art_dir: &Path,
    ) -> Result<()> {
        info!(%goal, "Starting interactive wizard");
        std::fs::create_dir_all(art_dir).context("Failed to create art directory")?;

        println!("\nDesigning a new Series for: \"{goal}\" ...");
        self.generate_plan(goal, reference_image).await?;

        for (idx, milestone) in self.milestones.iter().enumerate() {
            if let Some(path) = save_data_uri(&milestone.image_url, art_dir, &format!("booster-{}", idx + 1))? {
                println!("  saved booster art: {}", path.display());
            }
        }

        let stdin = io::stdin();
        loop {
            println!();
            for (idx, milestone) in self.milestones.iter().enumerate() {
                let marker = if milestone.is_completed { " [COLLECTED]" } else { "" };
                println!("  {}. {}{}", idx + 1, milestone.title, marker);
                println!("     {}", milestone.description);
            }
            print!("\nOpen a booster (1-{}), or 'q' to quit: ", self.milestones.len());
            io::stdout().flush()?;

            let mut line = String::new();
            if stdin.lock().read_line(&mut line)? == 0 {
                break;
            }
            let input = line.trim();

            if input.eq_ignore_ascii_case("q") {
                break;
            }
            let Ok(number) = input.parse::<usize>() else {
                println!("Please enter a booster number or 'q'.");
                continue;
            };
            if number == 0 || number > self.milestones.len() {
                println!("No such booster.");
                continue;
            }
            let index = number - 1;

            if self.milestones[index].is_completed {
                println!("That booster is already collected.");
                continue;
            }

            println!("\nOpening \"{}\" ...", self.milestones[index].title);
            let tasks = match self.select_milestone(index).await {
                Ok(tasks) => tasks.to_vec(),
                Err(e) => {
                    // Non-fatal: the user can go back and retry.
                    println!("{e}");
                    continue;
                }
            };

            for (card_idx, task) in tasks.iter().enumerate() {
                println!("\n  Card {}: {}", card_idx + 1, task.title);
                for detail in &task.details {
                    println!("    - {detail}");
                }
                let name = format!("card-{}-{}", index + 1, card_idx + 1);
                if let Some(path) = save_data_uri(&task.image_url, art_dir, &name)? {
                    println!("    art: {}", path.display());
                }
            }

            print!("\nMark this booster as collected? (y/N): ");
            io::stdout().flush()?;
            let mut answer = String::new();
            stdin.lock().read_line(&mut answer)?;
            if answer.trim().eq_ignore_ascii_case("y") {
                self.complete_milestone(index)?;
                println!("Collected!");
            }
        }

        Ok(())
    }
}

/// Decode a `data:` URI and write it under `dir` with an extension derived
/// from the mime type. Returns `None` for empty or non-data URLs.
fn save_data_uri(uri: &str, dir: &Path, stem: &str) -> Result<Option<std::path::PathBuf>> {
    let Some(rest) = uri.strip_prefix("data:") else {
        return Ok(None);
    };
    let Some((mime_type, payload)) = rest.split_once(";base64,") else {
        return Ok(None);
    };

    let bytes = BASE64.decode(payload).context("Failed to decode image payload")?;
    let extension = match mime_type {
        "image/png" => "png",
        "image/jpeg" => "jpg",
        "image/webp" => "webp",
        _ => "img",
    };

    let path = dir.join(format!("{stem}.{extension}"));
    std::fs::write(&path, bytes).context("Failed to write image file")?;
    Ok(Some(path))
}
