//! Configuration module for board-minutes
//!
//! Handles loading, saving and locating application settings and side files.

mod settings;

pub use settings::{
    find_first, search_dirs, Settings, API_KEY_ENV, EXAMPLES_FILE_NAME, TEMPLATE_FILE_NAMES,
};
