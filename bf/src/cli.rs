//! CLI command definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// BoosterForge - goal-to-booster plan generator
#[derive(Parser)]
#[command(
    name = "bf",
    about = "Turn a goal into a collectible booster-pack plan with generated art",
    version
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, help = "Path to config file")]
    pub config: Option<PathBuf>,

    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    #[arg(
        short = 'l',
        long = "log-level",
        global = true,
        help = "Log level (TRACE, DEBUG, INFO, WARN, ERROR)"
    )]
    pub log_level: Option<String>,

    /// Subcommand to execute (defaults to `serve`)
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// CLI subcommands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the HTTP API server
    Serve {
        /// Port to listen on (overrides config)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Run the wizard interactively in the terminal
    Plan {
        /// The goal to build a booster series for
        goal: String,

        /// Optional reference image to include in the prompt
        #[arg(long)]
        image: Option<PathBuf>,

        /// Directory for the generated art
        #[arg(short, long, default_value = "booster-art")]
        out_dir: PathBuf,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_serve_with_port() {
        let cli = Cli::try_parse_from(["bf", "serve", "--port", "8080"]).unwrap();
        match cli.command {
            Some(Command::Serve { port }) => assert_eq!(port, Some(8080)),
            other => panic!("expected serve command, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_plan_with_defaults() {
        let cli = Cli::try_parse_from(["bf", "plan", "Learn to Juggle"]).unwrap();
        match cli.command {
            Some(Command::Plan { goal, image, out_dir }) => {
                assert_eq!(goal, "Learn to Juggle");
                assert!(image.is_none());
                assert_eq!(out_dir, PathBuf::from("booster-art"));
            }
            other => panic!("expected plan command, got {other:?}"),
        }
    }

    #[test]
    fn test_no_subcommand_is_allowed() {
        let cli = Cli::try_parse_from(["bf"]).unwrap();
        assert!(cli.command.is_none());
    }
}
