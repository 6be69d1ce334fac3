//! Minutes generation run: extract, prompt, complete, render, save

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::task::JoinHandle;

use crate::config::Settings;
use crate::extract::{extract_agenda, extract_transcript};
use crate::llm::{
    build_conversation, build_provider, CompletionProvider, CompletionRequest, ExampleLibrary,
};
use crate::pipeline::log::{LogEntry, LogReceiver, LogSink};
use crate::render::{render_minutes, RenderMode, RenderOutcome};
use crate::{MinutesError, Result};

/// Inputs chosen for one run
#[derive(Debug, Clone, Default)]
pub struct RunRequest {
    pub agenda: Option<PathBuf>,
    pub transcript: Option<PathBuf>,
    /// Falls back to `paths.output_dir`, then the home directory
    pub output_dir: Option<PathBuf>,
}

/// Output file name for an agenda: `<stem>_minutes.docx`
pub fn output_file_name(agenda: &Path) -> String {
    let stem = agenda
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("agenda");
    format!("{}_minutes.docx", stem)
}

/// Result of a successful run
#[derive(Debug, Clone)]
pub struct RunReport {
    pub output_path: PathBuf,
    /// Whether a worked example was included in the prompt
    pub one_shot: bool,
    pub render: RenderOutcome,
}

struct ValidatedRun {
    agenda: PathBuf,
    transcript: PathBuf,
    output_dir: PathBuf,
}

fn non_empty(path: Option<&PathBuf>) -> Option<PathBuf> {
    path.filter(|p| !p.as_os_str().is_empty()).cloned()
}

/// Clears the busy flag when the worker finishes or is dropped
struct BusyGuard(Arc<AtomicBool>);

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// A running worker: its progress log and final result
pub struct RunHandle {
    pub log: LogReceiver,
    join: JoinHandle<Result<RunReport>>,
}

impl RunHandle {
    /// Next progress entry; `None` once the worker has finished
    pub async fn next_entry(&mut self) -> Option<LogEntry> {
        self.log.recv().await
    }

    /// Wait for the worker's result
    pub async fn finish(self) -> Result<RunReport> {
        self.join
            .await
            .map_err(|e| MinutesError::Worker(e.to_string()))?
    }
}

/// Runs the minutes pipeline on a single background worker.
#[derive(Clone)]
pub struct Pipeline {
    settings: Arc<Settings>,
    provider: Option<Arc<dyn CompletionProvider>>,
    busy: Arc<AtomicBool>,
}

impl Pipeline {
    /// Pipeline whose provider is built from `settings` on each run
    pub fn new(settings: Settings) -> Self {
        Self {
            settings: Arc::new(settings),
            provider: None,
            busy: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Pipeline that always uses `provider`
    pub fn with_provider(settings: Settings, provider: Arc<dyn CompletionProvider>) -> Self {
        Self {
            provider: Some(provider),
            ..Self::new(settings)
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Whether a spawned run has not finished yet
    pub fn is_running(&self) -> bool {
        self.busy.load(Ordering::SeqCst)
    }

    /// Start a run on the background worker.
    ///
    /// Fails with [`MinutesError::Busy`] while a previous run is active.
    pub fn spawn(&self, request: RunRequest) -> Result<RunHandle> {
        if self
            .busy
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(MinutesError::Busy);
        }

        let guard = BusyGuard(self.busy.clone());
        let (log, rx) = LogSink::channel();
        let pipeline = self.clone();

        let join = tokio::spawn(async move {
            let _guard = guard;
            pipeline.run(request, &log).await
        });

        Ok(RunHandle { log: rx, join })
    }

    /// Run to completion on the current task, reporting progress to `log`.
    pub async fn run(&self, request: RunRequest, log: &LogSink) -> Result<RunReport> {
        let result = self.execute(request, log).await;
        if let Err(e) = &result {
            log.error(e.to_string());
        }
        result
    }

    fn validate(&self, request: &RunRequest) -> Result<ValidatedRun> {
        let agenda = non_empty(request.agenda.as_ref())
            .ok_or(MinutesError::MissingInput("Please select an agenda file."))?;
        let transcript = non_empty(request.transcript.as_ref())
            .ok_or(MinutesError::MissingInput("Please select a transcript file."))?;
        let output_dir = non_empty(request.output_dir.as_ref())
            .or_else(|| self.settings.default_output_dir())
            .ok_or(MinutesError::MissingInput("Please select an output directory."))?;

        if !self.settings.has_api_key() {
            return Err(MinutesError::MissingInput(
                "Please set your API key (llm.api_key or BOARD_MINUTES_API_KEY).",
            ));
        }

        Ok(ValidatedRun {
            agenda,
            transcript,
            output_dir,
        })
    }

    fn provider(&self) -> Result<Arc<dyn CompletionProvider>> {
        match &self.provider {
            Some(provider) => Ok(provider.clone()),
            None => build_provider(&self.settings)
                .map(Arc::from)
                .map_err(|e| MinutesError::Config(e.to_string())),
        }
    }

    fn load_examples(&self, log: &LogSink) -> ExampleLibrary {
        let Some(path) = self.settings.resolve_examples_path() else {
            log.info("No examples file found. Using zero-shot approach.");
            return ExampleLibrary::default();
        };

        match ExampleLibrary::load(&path) {
            Ok(library) => {
                for warning in &library.warnings {
                    log.warn(format!("Warning: {}", warning));
                }
                log.info(format!("Loaded {} examples from JSONL file", library.len()));
                log.info(format!("Using examples from: {}", path.display()));
                library
            }
            Err(e) => {
                log.warn(format!("{}; using zero-shot approach.", e));
                ExampleLibrary::default()
            }
        }
    }

    async fn execute(&self, request: RunRequest, log: &LogSink) -> Result<RunReport> {
        let run = self.validate(&request)?;
        let provider = self.provider()?;

        log.info("Starting minutes generation...");

        log.info("Extracting text from agenda...");
        let agenda = extract_agenda(&run.agenda)?;
        if agenda.is_empty() {
            return Err(MinutesError::Extraction(
                "Failed to extract agenda text.".to_string(),
            ));
        }

        log.info("Extracting text from transcript...");
        let transcript = extract_transcript(&run.transcript)?;
        if transcript.is_empty() {
            return Err(MinutesError::Extraction(
                "Failed to extract transcript text.".to_string(),
            ));
        }

        let library = self.load_examples(log);
        let conversation = build_conversation(&agenda.to_text(), &transcript, library.select());
        let one_shot = conversation.is_one_shot();
        if one_shot {
            log.info("Using one-shot learning with example");
        }

        log.info(format!("Sending request to {}...", provider.name()));
        let minutes = provider
            .complete(CompletionRequest {
                conversation: &conversation,
                max_tokens: self.settings.llm.max_tokens,
                temperature: self.settings.llm.temperature,
            })
            .await?;
        log.info("Minutes generated successfully!");

        std::fs::create_dir_all(&run.output_dir)?;
        let output_path = run.output_dir.join(output_file_name(&run.agenda));

        log.info("Creating Word document...");
        let template = self.settings.resolve_template_path();
        let render = render_minutes(&minutes, template.as_deref(), &self.settings, &output_path)?;

        for note in &render.notes {
            log.info(note.clone());
        }
        for warning in &render.warnings {
            log.warn(warning.clone());
        }
        match render.mode {
            RenderMode::Styled => log.info(format!("Document saved to: {}", output_path.display())),
            RenderMode::Fallback => log.warn(format!(
                "Fallback document saved to: {}",
                output_path.display()
            )),
        }

        log.info("Minutes generation completed successfully!");

        Ok(RunReport {
            output_path,
            one_shot,
            render,
        })
    }
}
