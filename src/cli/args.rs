//! CLI argument definitions using clap

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// board-minutes - Draft board meeting minutes from an agenda and a transcript
#[derive(Parser, Debug)]
#[command(name = "board-minutes")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate minutes from an agenda (.docx) and a transcript (.vtt)
    Generate {
        /// Meeting agenda (.docx)
        #[arg(short, long)]
        agenda: Option<PathBuf>,

        /// Meeting transcript (.vtt)
        #[arg(short, long)]
        transcript: Option<PathBuf>,

        /// Directory for the generated document (defaults to paths.output_dir, then home)
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Word template (.dotx or .docx) overriding paths.template
        #[arg(long)]
        template: Option<PathBuf>,

        /// Example library (.jsonl) overriding paths.examples
        #[arg(long)]
        examples: Option<PathBuf>,

        /// Model name overriding llm.model
        #[arg(short, long)]
        model: Option<String>,
    },

    /// Render already-generated minutes text into a Word document
    Render {
        /// Text file with the generated minutes
        input: PathBuf,

        /// Output document path
        #[arg(short, long)]
        output: PathBuf,

        /// Word template (.dotx or .docx) overriding paths.template
        #[arg(long)]
        template: Option<PathBuf>,
    },

    /// Print the text extracted from an input file
    #[command(subcommand)]
    Extract(ExtractCommand),

    /// Check configuration, credentials and side files
    Doctor {
        /// Emit the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Configuration management
    #[command(subcommand)]
    Config(ConfigCommand),

    /// Generate shell completion scripts
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ExtractCommand {
    /// Agenda text with '#' heading markers
    Agenda {
        /// Agenda document (.docx)
        path: PathBuf,
    },

    /// Transcript speech as a single line
    Transcript {
        /// Transcript file (.vtt)
        path: PathBuf,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,

    /// Initialize default configuration
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },

    /// Set a configuration value
    Set {
        /// Configuration key (e.g., llm.model)
        key: String,

        /// Value to set
        value: String,
    },
}
