//! Plan pipeline: prompt construction, response parsing, wizard state
//!
//! The flow for one session: a goal enters [`PlanSession::generate_plan`],
//! which builds the milestone prompt, invokes the generation client once,
//! and parses the interleaved response into milestones. Opening a booster
//! runs the same pipeline for tasks, lazily and at most once per milestone.

mod error;
pub mod parser;
pub mod pipeline;
pub mod prompt;
mod session;

pub use error::PlanError;
pub use pipeline::{generate_milestones, generate_tasks};
pub use session::{PlanSession, SessionState};
