//! BoosterForge - goal-to-booster plan generator
//!
//! BoosterForge turns a free-text personal goal into a themed Series of 3
//! "Boosters" (milestones) and, per booster, 3 "Cards" (tasks), each with
//! generated art. The core is a prompt-construction and response-parsing
//! pipeline over a multimodal generation model that answers with a
//! loosely-delimited stream of interleaved text and image parts.
//!
//! # Modules
//!
//! - [`genai`] - generation client trait and Gemini implementation
//! - [`plan`] - prompt builder, response parser, pipeline, wizard session
//! - [`server`] - HTTP boundary (axum)
//! - [`domain`] - Milestone and Task records
//! - [`config`] - configuration types and loading
//! - [`cli`] - command-line interface

pub mod cli;
pub mod config;
pub mod domain;
pub mod genai;
pub mod plan;
pub mod server;

// Re-export commonly used types
pub use config::{Config, GenaiConfig, ServerConfig};
pub use domain::{Milestone, ReferenceImage, Task};
pub use genai::{ContentPart, GenError, GenerationClient, InlineImage, create_client};
pub use plan::{PlanError, PlanSession, SessionState};
pub use server::{ApiError, AppState};
