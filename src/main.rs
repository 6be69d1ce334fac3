//! board-minutes - Draft board meeting minutes from an agenda and a transcript
//!
//! Entry point for the board-minutes CLI application.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use board_minutes::cli::commands::{self, GenerateOptions};
use board_minutes::cli::{Cli, Commands};
use board_minutes::config::Settings;
use board_minutes::pipeline::RunRequest;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // A broken config file only matters to commands that use it.
    let settings = Settings::load();

    // Initialize logging
    let default_filter = match &settings {
        Ok(settings) => settings.log_filter(cli.verbose),
        Err(_) if cli.verbose => "debug",
        Err(_) => "info",
    };
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .or_else(|_| EnvFilter::try_new(default_filter))
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    match cli.command {
        Commands::Completions { shell } => {
            board_minutes::cli::completions::print(shell);
        }
        Commands::Extract(extract_cmd) => {
            commands::extract_command(extract_cmd)?;
        }
        command => {
            let settings = settings?;

            match command {
                Commands::Generate {
                    agenda,
                    transcript,
                    output_dir,
                    template,
                    examples,
                    model,
                } => {
                    let request = RunRequest {
                        agenda,
                        transcript,
                        output_dir,
                    };
                    let options = GenerateOptions {
                        template,
                        examples,
                        model,
                    };
                    commands::generate(&settings, request, options).await?;
                }
                Commands::Render {
                    input,
                    output,
                    template,
                } => {
                    commands::render_file(&settings, &input, &output, template)?;
                }
                Commands::Doctor { json } => {
                    commands::run_doctor(&settings, json)?;
                }
                Commands::Config(config_cmd) => {
                    commands::config_command(&settings, config_cmd)?;
                }
                Commands::Completions { .. } | Commands::Extract(_) => unreachable!(),
            }
        }
    }

    Ok(())
}
