//! Application settings management

use anyhow::{Context, Result};
use directories::{ProjectDirs, UserDirs};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File name searched for when no example library is configured
pub const EXAMPLES_FILE_NAME: &str = "example.jsonl";

/// File names searched for when no template is configured, in priority order
pub const TEMPLATE_FILE_NAMES: [&str; 2] = ["minutes_msword.dotx", "minutes_msword.docx"];

/// Environment variable consulted when `llm.api_key` is blank
pub const API_KEY_ENV: &str = "BOARD_MINUTES_API_KEY";

/// Main application settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    /// General settings
    #[serde(default)]
    pub general: GeneralSettings,

    /// Chat completion settings
    #[serde(default)]
    pub llm: LlmSettings,

    /// Input and output locations
    #[serde(default)]
    pub paths: PathSettings,

    /// Output document settings
    #[serde(default)]
    pub document: DocumentSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralSettings {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmSettings {
    /// Completion provider (openai, gemini)
    #[serde(default = "default_llm_provider")]
    pub provider: String,

    /// API key for the provider
    #[serde(default)]
    pub api_key: String,

    /// Model identifier
    #[serde(default = "default_llm_model")]
    pub model: String,

    /// API base URL (empty = provider default)
    #[serde(default)]
    pub endpoint: String,

    /// Maximum output tokens requested
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Sampling temperature
    #[serde(default = "default_temperature")]
    pub temperature: f32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathSettings {
    /// Word template (.docx or .dotx); empty = search common locations
    #[serde(default)]
    pub template: String,

    /// JSON-Lines example library; empty = search common locations
    #[serde(default)]
    pub examples: String,

    /// Default directory for generated minutes (empty = home directory)
    #[serde(default)]
    pub output_dir: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentSettings {
    /// Title heading placed at the top of documents created from scratch
    #[serde(default = "default_title")]
    pub title: String,

    /// Organisation line used in place of the title for .dotx templates
    #[serde(default)]
    pub letterhead: String,
}

// Default value functions

fn default_log_level() -> String {
    "info".to_string()
}

fn default_llm_provider() -> String {
    "openai".to_string()
}

fn default_llm_model() -> String {
    "gpt-4.1".to_string()
}

fn default_max_tokens() -> u32 {
    6500
}

fn default_temperature() -> f32 {
    0.3
}

fn default_title() -> String {
    "Meeting Minutes".to_string()
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            provider: default_llm_provider(),
            api_key: String::new(),
            model: default_llm_model(),
            endpoint: String::new(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
        }
    }
}

impl Default for DocumentSettings {
    fn default() -> Self {
        Self {
            title: default_title(),
            letterhead: String::new(),
        }
    }
}

impl Settings {
    /// Load settings from the configuration file
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;
        Self::load_from(&config_path)
    }

    /// Load settings from an explicit path, falling back to defaults when absent
    pub fn load_from(config_path: &Path) -> Result<Self> {
        let mut settings = Self::read_file(config_path)?;
        settings.apply_env_overrides();
        Ok(settings)
    }

    /// Read the file as written, without environment overrides
    pub fn read_file(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            tracing::debug!("No config file found, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", config_path.display()))
    }

    /// Apply environment variable overrides.
    fn apply_env_overrides(&mut self) {
        if self.llm.api_key.trim().is_empty() {
            if let Ok(key) = std::env::var(API_KEY_ENV) {
                if !key.trim().is_empty() {
                    self.llm.api_key = key;
                }
            }
        }
    }

    /// Get the path to the configuration file
    pub fn config_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("com", "board-minutes", "board-minutes")
            .context("Could not determine config directory")?;

        let config_dir = dirs.config_dir();
        Ok(config_dir.join("config.toml"))
    }

    /// Write default configuration to a file
    pub fn write_default(path: &Path) -> Result<()> {
        Self::default().save_to(path)
    }

    /// Persist these settings to a file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;
        Ok(())
    }

    /// Update a single dotted key (e.g. `llm.model`)
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "general.log_level" => self.general.log_level = value.to_string(),
            "llm.provider" => self.llm.provider = value.to_string(),
            "llm.api_key" => self.llm.api_key = value.to_string(),
            "llm.model" => self.llm.model = value.to_string(),
            "llm.endpoint" => self.llm.endpoint = value.to_string(),
            "llm.max_tokens" => {
                self.llm.max_tokens = value
                    .parse()
                    .with_context(|| format!("llm.max_tokens must be an integer, got '{}'", value))?
            }
            "llm.temperature" => {
                self.llm.temperature = value
                    .parse()
                    .with_context(|| format!("llm.temperature must be a number, got '{}'", value))?
            }
            "paths.template" => self.paths.template = value.to_string(),
            "paths.examples" => self.paths.examples = value.to_string(),
            "paths.output_dir" => self.paths.output_dir = value.to_string(),
            "document.title" => self.document.title = value.to_string(),
            "document.letterhead" => self.document.letterhead = value.to_string(),
            other => anyhow::bail!("Unknown configuration key '{}'", other),
        }
        Ok(())
    }

    /// Default tracing filter when `RUST_LOG` is unset; `--verbose` forces debug
    pub fn log_filter(&self, verbose: bool) -> &str {
        if verbose {
            return "debug";
        }
        match self.general.log_level.trim() {
            "" => "info",
            level => level,
        }
    }

    /// Copy of these settings that is safe to print
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        if !copy.llm.api_key.is_empty() {
            copy.llm.api_key = "********".to_string();
        }
        copy
    }

    /// Whether an API credential is available
    pub fn has_api_key(&self) -> bool {
        !self.llm.api_key.trim().is_empty()
    }

    /// Directory minutes are written to when none is given on the command line
    pub fn default_output_dir(&self) -> Option<PathBuf> {
        let configured = self.paths.output_dir.trim();
        if !configured.is_empty() {
            return Some(PathBuf::from(configured));
        }
        UserDirs::new().map(|dirs| dirs.home_dir().to_path_buf())
    }

    /// Resolve the example library: configured path if it exists, else search
    pub fn resolve_examples_path(&self) -> Option<PathBuf> {
        existing(&self.paths.examples).or_else(|| find_in_search_dirs(&[EXAMPLES_FILE_NAME]))
    }

    /// Resolve the Word template: configured path if it exists, else search
    pub fn resolve_template_path(&self) -> Option<PathBuf> {
        existing(&self.paths.template).or_else(|| find_in_search_dirs(&TEMPLATE_FILE_NAMES))
    }
}

fn existing(configured: &str) -> Option<PathBuf> {
    let configured = configured.trim();
    if configured.is_empty() {
        return None;
    }
    let path = PathBuf::from(configured);
    path.exists().then_some(path)
}

/// Directories searched for side files: the executable's directory, the
/// working directory, the home directory and `~/Documents`.
pub fn search_dirs() -> Vec<PathBuf> {
    let mut dirs = Vec::new();
    if let Some(exe_dir) = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
    {
        dirs.push(exe_dir);
    }
    if let Ok(cwd) = std::env::current_dir() {
        dirs.push(cwd);
    }
    if let Some(user) = UserDirs::new() {
        dirs.push(user.home_dir().to_path_buf());
        dirs.push(user.home_dir().join("Documents"));
    }
    dirs
}

fn find_in_search_dirs(names: &[&str]) -> Option<PathBuf> {
    find_first(&search_dirs(), names)
}

/// First `dir/name` that exists, trying every name in a directory before the next directory
pub fn find_first(dirs: &[PathBuf], names: &[&str]) -> Option<PathBuf> {
    dirs.iter()
        .flat_map(|dir| names.iter().map(move |name| dir.join(name)))
        .find(|candidate| candidate.exists())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_openai_gpt_41() {
        let settings = Settings::default();
        assert_eq!(settings.llm.provider, "openai");
        assert_eq!(settings.llm.model, "gpt-4.1");
        assert_eq!(settings.llm.max_tokens, 6500);
        assert!((settings.llm.temperature - 0.3).abs() < f32::EPSILON);
    }

    #[test]
    fn set_updates_known_keys_and_rejects_unknown() {
        let mut settings = Settings::default();
        settings.set("llm.model", "gpt-4o").unwrap();
        settings.set("llm.max_tokens", "4000").unwrap();
        settings.set("paths.template", "/tmp/minutes.docx").unwrap();

        assert_eq!(settings.llm.model, "gpt-4o");
        assert_eq!(settings.llm.max_tokens, 4000);
        assert_eq!(settings.paths.template, "/tmp/minutes.docx");

        assert!(settings.set("llm.max_tokens", "lots").is_err());
        assert!(settings.set("llm.colour", "blue").is_err());
    }

    #[test]
    fn save_and_load_preserve_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut settings = Settings::default();
        settings.llm.api_key = "sk-test".to_string();
        settings.document.letterhead = "REGIONAL TRANSIT BOARD".to_string();
        settings.save_to(&path).unwrap();

        let loaded = Settings::load_from(&path).unwrap();
        assert_eq!(loaded.llm.api_key, "sk-test");
        assert_eq!(loaded.document.letterhead, "REGIONAL TRANSIT BOARD");
        assert_eq!(loaded.document.title, "Meeting Minutes");
    }

    #[test]
    fn partial_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[llm]\nmodel = \"gpt-4o-mini\"\n").unwrap();

        let loaded = Settings::load_from(&path).unwrap();
        assert_eq!(loaded.llm.model, "gpt-4o-mini");
        assert_eq!(loaded.llm.provider, "openai");
        assert_eq!(loaded.general.log_level, "info");
    }

    #[test]
    fn log_filter_follows_setting_unless_verbose() {
        let mut settings = Settings::default();
        assert_eq!(settings.log_filter(false), "info");

        settings.general.log_level = "warn".to_string();
        assert_eq!(settings.log_filter(false), "warn");
        assert_eq!(settings.log_filter(true), "debug");

        settings.general.log_level = "  ".to_string();
        assert_eq!(settings.log_filter(false), "info");
    }

    #[test]
    fn redacted_masks_api_key() {
        let mut settings = Settings::default();
        assert_eq!(settings.redacted().llm.api_key, "");

        settings.llm.api_key = "sk-secret".to_string();
        assert_eq!(settings.redacted().llm.api_key, "********");
    }

    #[test]
    fn find_first_prefers_earlier_directory_then_name_order() {
        let first = tempfile::tempdir().unwrap();
        let second = tempfile::tempdir().unwrap();
        std::fs::write(second.path().join("minutes_msword.dotx"), b"").unwrap();
        std::fs::write(first.path().join("minutes_msword.docx"), b"").unwrap();

        let dirs = vec![first.path().to_path_buf(), second.path().to_path_buf()];
        let found = find_first(&dirs, &TEMPLATE_FILE_NAMES).unwrap();
        assert_eq!(found, first.path().join("minutes_msword.docx"));

        assert!(find_first(&dirs, &[EXAMPLES_FILE_NAME]).is_none());
    }

    #[test]
    fn configured_examples_path_wins_when_present() {
        let dir = tempfile::tempdir().unwrap();
        let library = dir.path().join("library.jsonl");
        std::fs::write(&library, "").unwrap();

        let mut settings = Settings::default();
        settings.paths.examples = library.to_string_lossy().to_string();
        assert_eq!(settings.resolve_examples_path(), Some(library));
    }
}
