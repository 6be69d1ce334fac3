use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use docx_rs::{Docx, Paragraph, Run};
use tempfile::TempDir;

pub fn run_board_minutes(args: &[&str]) -> Output {
    TestEnv::new().run(args)
}

pub struct TestEnv {
    home: TempDir,
    config: TempDir,
    data: TempDir,
}

impl TestEnv {
    pub fn new() -> Self {
        Self {
            home: tempfile::tempdir().expect("create temporary HOME dir"),
            config: tempfile::tempdir().expect("create temporary XDG config dir"),
            data: tempfile::tempdir().expect("create temporary XDG data dir"),
        }
    }

    #[allow(dead_code)]
    pub fn home(&self) -> &Path {
        self.home.path()
    }

    pub fn run(&self, args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_board-minutes"))
            .args(args)
            .current_dir(self.home.path())
            .env("HOME", self.home.path())
            .env("XDG_CONFIG_HOME", self.config.path())
            .env("XDG_DATA_HOME", self.data.path())
            .env_remove("BOARD_MINUTES_API_KEY")
            .env_remove("RUST_LOG")
            .output()
            .expect("failed to execute board-minutes binary")
    }

    #[allow(dead_code)]
    pub fn config_path(&self) -> PathBuf {
        let output = self.run(&["config", "path"]);
        assert!(
            output.status.success(),
            "config path should succeed\nstdout:\n{}\nstderr:\n{}",
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr),
        );

        let path = String::from_utf8_lossy(&output.stdout);
        PathBuf::from(path.trim())
    }

    #[allow(dead_code)]
    pub fn write_config(&self, contents: &str) {
        let config_path = self.config_path();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).expect("create config parent directory");
        }
        std::fs::write(&config_path, contents).expect("write config file");
    }
}

/// Write a small agenda with two heading levels and body text
#[allow(dead_code)]
pub fn write_agenda(path: &Path) {
    let docx = Docx::new()
        .add_paragraph(
            Paragraph::new()
                .style("Heading1")
                .add_run(Run::new().add_text("Board of Directors Meeting")),
        )
        .add_paragraph(Paragraph::new().add_run(Run::new().add_text("Call to order at 6:00 PM")))
        .add_paragraph(Paragraph::new())
        .add_paragraph(
            Paragraph::new()
                .style("Heading2")
                .add_run(Run::new().add_text("Financial Report")),
        )
        .add_paragraph(
            Paragraph::new().add_run(Run::new().add_text("Treasurer   presents Q3 results")),
        );

    let file = std::fs::File::create(path).expect("create agenda fixture");
    docx.build().pack(file).expect("write agenda fixture");
}

#[allow(dead_code)]
pub const TRANSCRIPT_VTT: &str = "WEBVTT

1
00:00:01.000 --> 00:00:04.000
Good evening, I call this meeting to order.

2
00:00:05.000 --> 00:00:09.500
The treasurer will now present the   quarterly results.
";

/// Every paragraph's text in a written document, in order
#[allow(dead_code)]
pub fn read_paragraphs(path: &Path) -> Vec<(Option<String>, String)> {
    use docx_rs::{DocumentChild, ParagraphChild, RunChild};

    let bytes = std::fs::read(path).expect("read generated document");
    let docx = docx_rs::read_docx(&bytes).expect("parse generated document");

    docx.document
        .children
        .iter()
        .filter_map(|child| match child {
            DocumentChild::Paragraph(para) => {
                let mut text = String::new();
                for child in &para.children {
                    if let ParagraphChild::Run(run) = child {
                        for rc in &run.children {
                            if let RunChild::Text(t) = rc {
                                text.push_str(&t.text);
                            }
                        }
                    }
                }
                let style = para.property.style.as_ref().map(|s| s.val.clone());
                Some((style, text))
            }
            _ => None,
        })
        .collect()
}
