//! CLI command implementations

use anyhow::{Context, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::cli::args::{ConfigCommand, ExtractCommand};
use crate::config::Settings;
use crate::extract::{extract_agenda, extract_transcript};
use crate::llm::ExampleLibrary;
use crate::pipeline::{LogLevel, Pipeline, RunRequest};
use crate::render::{render_minutes, RenderMode};

/// Options for `generate` beyond the three input paths
#[derive(Debug, Default)]
pub struct GenerateOptions {
    pub template: Option<PathBuf>,
    pub examples: Option<PathBuf>,
    pub model: Option<String>,
}

impl GenerateOptions {
    fn apply(&self, settings: &mut Settings) {
        if let Some(template) = &self.template {
            settings.paths.template = template.display().to_string();
        }
        if let Some(examples) = &self.examples {
            settings.paths.examples = examples.display().to_string();
        }
        if let Some(model) = &self.model {
            settings.llm.model = model.clone();
        }
    }
}

/// Generate minutes on the background worker, streaming its progress log
pub async fn generate(
    settings: &Settings,
    request: RunRequest,
    options: GenerateOptions,
) -> Result<()> {
    let mut settings = settings.clone();
    options.apply(&mut settings);

    let pipeline = Pipeline::new(settings);
    let mut handle = pipeline.spawn(request)?;

    while let Some(entry) = handle.next_entry().await {
        match entry.level {
            LogLevel::Info => println!("{}", entry),
            LogLevel::Warn | LogLevel::Error => eprintln!("{}", entry),
        }
    }

    let report = handle.finish().await?;
    println!();
    println!("Minutes saved to: {}", report.output_path.display());

    Ok(())
}

/// Render a text file of generated minutes into a Word document
pub fn render_file(
    settings: &Settings,
    input: &Path,
    output: &Path,
    template: Option<PathBuf>,
) -> Result<()> {
    let text = std::fs::read_to_string(input)
        .with_context(|| format!("Failed to read minutes text: {}", input.display()))?;

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let template = template.or_else(|| settings.resolve_template_path());
    let outcome = render_minutes(&text, template.as_deref(), settings, output)?;

    for note in &outcome.notes {
        println!("{}", note);
    }
    for warning in &outcome.warnings {
        eprintln!("warning: {}", warning);
    }
    if outcome.mode == RenderMode::Fallback {
        eprintln!("warning: styled rendering failed; wrote a plain document");
    }
    println!("Minutes saved to: {}", outcome.output_path.display());

    Ok(())
}

/// Handle extract subcommands
pub fn extract_command(cmd: ExtractCommand) -> Result<()> {
    match cmd {
        ExtractCommand::Agenda { path } => {
            let document = extract_agenda(&path)?;
            println!("{}", document.to_text());
        }
        ExtractCommand::Transcript { path } => {
            let text = extract_transcript(&path)?;
            println!("{}", text);
        }
    }
    Ok(())
}

/// Handle config subcommands
pub fn config_command(settings: &Settings, cmd: ConfigCommand) -> Result<()> {
    match cmd {
        ConfigCommand::Show => {
            let toml = toml::to_string_pretty(&settings.redacted())?;
            println!("{}", toml);
        }
        ConfigCommand::Path => {
            let path = Settings::config_path()?;
            println!("{}", path.display());
        }
        ConfigCommand::Init { force } => {
            let path = Settings::config_path()?;
            if path.exists() && !force {
                anyhow::bail!(
                    "Config file already exists at {}. Use --force to overwrite.",
                    path.display()
                );
            }
            Settings::write_default(&path)?;
            println!("Configuration initialized at: {}", path.display());
        }
        ConfigCommand::Set { key, value } => {
            let path = Settings::config_path()?;
            let mut stored = Settings::read_file(&path)?;
            stored.set(&key, &value)?;
            stored.save_to(&path)?;
            let shown = if key == "llm.api_key" { "********" } else { value.as_str() };
            println!("Set {} = {} in {}", key, shown, path.display());
        }
    }

    Ok(())
}

#[derive(Debug, Serialize)]
struct DoctorCheck {
    name: &'static str,
    status: &'static str,
    detail: String,
}

#[derive(Debug, Serialize)]
struct DoctorReport {
    config_path: String,
    provider: String,
    model: String,
    checks: Vec<DoctorCheck>,
    notes: Vec<String>,
}

/// Run diagnostic checks to help troubleshoot local setup issues.
pub fn run_doctor(settings: &Settings, json: bool) -> Result<()> {
    let config_path = Settings::config_path()?;
    let report = collect_doctor_report(settings, &config_path);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("board-minutes doctor");
    println!("config: {}", report.config_path);
    println!("provider: {} ({})", report.provider, report.model);
    println!();

    for check in &report.checks {
        println!("{:<10} {:<8} {}", check.name, check.status, check.detail);
    }

    if !report.notes.is_empty() {
        println!();
        for note in &report.notes {
            println!("{}", note);
        }
    }

    Ok(())
}

fn collect_doctor_report(settings: &Settings, config_path: &Path) -> DoctorReport {
    let mut checks = Vec::new();
    let mut notes = Vec::new();

    checks.push(DoctorCheck {
        name: "config",
        status: if config_path.exists() { "ok" } else { "default" },
        detail: if config_path.exists() {
            "loaded from file".to_string()
        } else {
            "no config file; built-in defaults in use".to_string()
        },
    });

    let provider_known = matches!(
        settings.llm.provider.to_lowercase().as_str(),
        "openai" | "gemini"
    );
    checks.push(DoctorCheck {
        name: "provider",
        status: if provider_known { "ok" } else { "error" },
        detail: if provider_known {
            format!("{} / {}", settings.llm.provider, settings.llm.model)
        } else {
            format!("unsupported provider '{}'", settings.llm.provider)
        },
    });

    checks.push(DoctorCheck {
        name: "api-key",
        status: if settings.has_api_key() { "ok" } else { "missing" },
        detail: if settings.has_api_key() {
            "credential configured".to_string()
        } else {
            format!("set llm.api_key or {}", crate::config::API_KEY_ENV)
        },
    });

    match settings.resolve_examples_path() {
        Some(path) => match ExampleLibrary::load(&path) {
            Ok(library) => {
                checks.push(DoctorCheck {
                    name: "examples",
                    status: if library.is_empty() { "empty" } else { "ok" },
                    detail: format!("{} usable in {}", library.len(), path.display()),
                });
                notes.extend(library.warnings.iter().map(|w| format!("warning: {}", w)));
            }
            Err(e) => checks.push(DoctorCheck {
                name: "examples",
                status: "error",
                detail: e.to_string(),
            }),
        },
        None => checks.push(DoctorCheck {
            name: "examples",
            status: "missing",
            detail: "zero-shot prompting will be used".to_string(),
        }),
    }

    checks.push(match settings.resolve_template_path() {
        Some(path) => DoctorCheck {
            name: "template",
            status: "ok",
            detail: path.display().to_string(),
        },
        None => DoctorCheck {
            name: "template",
            status: "missing",
            detail: "built-in styles will be used".to_string(),
        },
    });

    checks.push(match settings.default_output_dir() {
        Some(dir) => DoctorCheck {
            name: "output",
            status: "ok",
            detail: dir.display().to_string(),
        },
        None => DoctorCheck {
            name: "output",
            status: "missing",
            detail: "pass --output-dir or set paths.output_dir".to_string(),
        },
    });

    if !settings.has_api_key() {
        notes.push("hint: `board-minutes config set llm.api_key <key>`".to_string());
    }

    DoctorReport {
        config_path: config_path.display().to_string(),
        provider: settings.llm.provider.clone(),
        model: settings.llm.model.clone(),
        checks,
        notes,
    }
}
