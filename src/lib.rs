//! board-minutes - Draft board meeting minutes from an agenda and a transcript
//!
//! The agenda (.docx) and transcript (.vtt) are flattened to text, sent to a
//! chat-completion model with an optional worked example, and the reply is
//! rendered into a styled Word document.

pub mod cli;
pub mod config;
pub mod extract;
pub mod llm;
pub mod pipeline;
pub mod render;

use thiserror::Error;

use crate::llm::CompletionError;

/// Main error type for board-minutes
#[derive(Error, Debug)]
pub enum MinutesError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    MissingInput(&'static str),

    #[error("Extraction error: {0}")]
    Extraction(String),

    #[error("Example library error: {0}")]
    Examples(String),

    #[error("Completion error: {0}")]
    Completion(#[from] CompletionError),

    #[error("Render error: {0}")]
    Render(String),

    #[error("A minutes run is already in progress")]
    Busy,

    #[error("Worker task failed: {0}")]
    Worker(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, MinutesError>;

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = "board-minutes";
