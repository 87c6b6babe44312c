//! Plan pipeline error types

use thiserror::Error;

use crate::genai::GenError;

/// Errors surfaced by the plan pipeline and the wizard session
#[derive(Debug, Error)]
pub enum PlanError {
    /// Empty or whitespace-only goal, caught before any network activity
    #[error("Please enter your goal.")]
    EmptyGoal,

    /// Task parsing yielded zero complete records
    #[error("Could not break down the milestone. Please try again.")]
    Breakdown,

    #[error("milestone index {0} is out of range")]
    MilestoneOutOfRange(usize),

    /// A generation request is already in flight on this session
    #[error("A generation request is already in progress. Please wait for it to finish.")]
    Busy,

    #[error(transparent)]
    Gen(#[from] GenError),
}

impl PlanError {
    /// True for errors caused by the caller rather than the pipeline
    pub fn is_caller_error(&self) -> bool {
        matches!(
            self,
            PlanError::EmptyGoal | PlanError::MilestoneOutOfRange(_) | PlanError::Busy
        )
    }
}
