//! BoosterForge CLI entry point

use clap::Parser;
use eyre::{Context, Result};
use tracing::debug;

use boosterforge::cli::{Cli, Command};
use boosterforge::config::Config;
use boosterforge::domain::ReferenceImage;
use boosterforge::genai::create_client;
use boosterforge::plan::PlanSession;
use boosterforge::server;

fn setup_logging(cli_log_level: Option<&str>) -> Result<()> {
    // Level priority: CLI --log-level > RUST_LOG > INFO
    let level = match cli_log_level.map(str::to_uppercase).as_deref() {
        Some("TRACE") => tracing::Level::TRACE,
        Some("DEBUG") => tracing::Level::DEBUG,
        Some("INFO") | None => tracing::Level::INFO,
        Some("WARN") | Some("WARNING") => tracing::Level::WARN,
        Some("ERROR") => tracing::Level::ERROR,
        Some(other) => {
            eprintln!("Warning: Unknown log-level '{other}', defaulting to INFO");
            tracing::Level::INFO
        }
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    Ok(())
}

/// Guess a mime type from a file extension for uploaded reference images
fn mime_for_path(path: &std::path::Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("webp") => "image/webp",
        _ => "image/png",
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.log_level.as_deref())?;

    let config = Config::load(cli.config.as_ref())?;
    config.validate()?;
    debug!(model = %config.genai.model, "main: config loaded");

    let client = create_client(&config.genai)?;

    match cli.command {
        Some(Command::Plan { goal, image, out_dir }) => {
            let reference_image = match image {
                Some(path) => {
                    let data = std::fs::read(&path).context(format!("Failed to read image {}", path.display()))?;
                    Some(ReferenceImage {
                        mime_type: mime_for_path(&path).to_string(),
                        data,
                    })
                }
                None => None,
            };

            let mut session = PlanSession::new(client);
            session.run_interactive(&goal, reference_image.as_ref(), &out_dir).await
        }
        Some(Command::Serve { port }) => {
            let mut server_config = config.server.clone();
            if let Some(port) = port {
                server_config.port = port;
            }
            server::serve(&server_config, client).await
        }
        None => server::serve(&config.server, client).await,
    }
}
