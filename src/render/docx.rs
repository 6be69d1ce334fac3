//! Word document output

use docx_rs::{read_docx, AlignmentType, Docx, Paragraph, Run, Style, StyleType};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use crate::config::Settings;
use crate::render::classify::{classify, LineKind, RenderLine};
use crate::render::inline::{parse_inline, InlineSpan, SpanStyle};
use crate::{MinutesError, Result};

static PARAGRAPH_BREAK_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n\s*\n").unwrap());

const BULLET: &str = "\u{2022} ";

/// Which path produced the document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    Styled,
    Fallback,
}

/// Summary of a finished render
#[derive(Debug, Clone)]
pub struct RenderOutcome {
    pub mode: RenderMode,
    pub output_path: PathBuf,
    /// Paragraphs written for the minutes body
    pub paragraphs: usize,
    pub notes: Vec<String>,
    pub warnings: Vec<String>,
}

impl RenderOutcome {
    fn new(mode: RenderMode, output_path: &Path) -> Self {
        Self {
            mode,
            output_path: output_path.to_path_buf(),
            paragraphs: 0,
            notes: Vec::new(),
            warnings: Vec::new(),
        }
    }
}

/// Paragraph styles the renderer relies on
fn standard_styles() -> Vec<Style> {
    vec![
        Style::new("Title", StyleType::Paragraph)
            .name("Title")
            .size(48)
            .bold(),
        Style::new("Heading1", StyleType::Paragraph)
            .name("Heading 1")
            .size(32)
            .bold()
            .color("1F3864"),
        Style::new("Heading2", StyleType::Paragraph)
            .name("Heading 2")
            .size(28)
            .bold()
            .color("2F5496"),
        Style::new("Heading3", StyleType::Paragraph)
            .name("Heading 3")
            .size(24)
            .bold()
            .color("2F5496"),
        Style::new("Quote", StyleType::Paragraph)
            .name("Quote")
            .italic()
            .color("404040"),
        Style::new("ListBullet", StyleType::Paragraph).name("List Bullet"),
    ]
}

/// A Word document being filled with minutes
pub struct MinutesDocument {
    docx: Docx,
    paragraphs: usize,
    /// List items get a literal bullet run unless `ListBullet` came from a template
    manual_bullets: bool,
}

impl MinutesDocument {
    /// Fresh document headed by `title`
    pub fn new(title: &str) -> Self {
        let mut document = Self::blank();
        if !title.trim().is_empty() {
            document.docx = document.docx.add_paragraph(
                Paragraph::new()
                    .style("Title")
                    .add_run(Run::new().add_text(title.trim())),
            );
        }
        document
    }

    /// Fresh document headed by a centered, bold organisation line
    pub fn with_letterhead(letterhead: &str) -> Self {
        let mut document = Self::blank();
        document.docx = document
            .docx
            .add_paragraph(
                Paragraph::new()
                    .align(AlignmentType::Center)
                    .add_run(Run::new().add_text(letterhead.trim()).bold()),
            )
            .add_paragraph(Paragraph::new());
        document
    }

    fn blank() -> Self {
        let docx = standard_styles()
            .into_iter()
            .fold(Docx::new(), |docx, style| docx.add_style(style));
        Self {
            docx,
            paragraphs: 0,
            manual_bullets: true,
        }
    }

    /// Existing `.docx` whose body is kept; minutes are appended after it
    pub fn from_docx_template(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path).map_err(|e| {
            MinutesError::Render(format!("Cannot read template '{}': {}", path.display(), e))
        })?;
        let mut docx = read_docx(&bytes).map_err(|e| {
            MinutesError::Render(format!("Cannot parse template '{}': {}", path.display(), e))
        })?;

        let mut manual_bullets = false;
        for style in standard_styles() {
            let present = docx
                .styles
                .styles
                .iter()
                .any(|existing| existing.style_id == style.style_id);
            if !present {
                manual_bullets |= style.style_id == "ListBullet";
                docx = docx.add_style(style);
            }
        }

        Ok(Self {
            docx,
            paragraphs: 0,
            manual_bullets,
        })
    }

    /// Number of minutes paragraphs added so far
    pub fn paragraphs(&self) -> usize {
        self.paragraphs
    }

    fn add(&mut self, paragraph: Paragraph) {
        let docx = std::mem::replace(&mut self.docx, Docx::new());
        self.docx = docx.add_paragraph(paragraph);
        self.paragraphs += 1;
    }

    /// Append one classified unit with its styling.
    pub fn push(&mut self, line: &RenderLine) -> Result<()> {
        check_xml_text(&line.plain_text())?;

        let paragraph = match &line.kind {
            LineKind::Heading { level, text } => Paragraph::new()
                .style(&format!("Heading{}", level))
                .add_run(Run::new().add_text(text)),
            LineKind::ListItem(text) => {
                let mut paragraph = Paragraph::new().style("ListBullet");
                if self.manual_bullets {
                    paragraph = paragraph.add_run(Run::new().add_text(BULLET));
                }
                add_spans(paragraph, &parse_inline(text))
            }
            LineKind::Quote(text) => Paragraph::new()
                .style("Quote")
                .add_run(Run::new().add_text(text).italic()),
            LineKind::Action(text) => Paragraph::new()
                .style("Quote")
                .add_run(Run::new().add_text(text).bold()),
            LineKind::Prose(spans) => add_spans(Paragraph::new(), spans),
        };

        self.add(paragraph);
        Ok(())
    }

    /// Append an unstyled paragraph, dropping characters XML cannot carry
    pub fn push_plain(&mut self, text: &str) {
        self.add(Paragraph::new().add_run(Run::new().add_text(sanitize_xml_text(text))));
    }

    /// Write the document to `path`
    pub fn save(self, path: &Path) -> Result<()> {
        let file = std::fs::File::create(path)?;
        self.docx.build().pack(file).map_err(|e| {
            MinutesError::Render(format!("Cannot write document '{}': {}", path.display(), e))
        })?;
        Ok(())
    }
}

fn add_spans(paragraph: Paragraph, spans: &[InlineSpan]) -> Paragraph {
    spans.iter().fold(paragraph, |paragraph, span| {
        let run = Run::new().add_text(&span.text);
        let run = match span.style {
            SpanStyle::Normal => run,
            SpanStyle::Bold => run.bold(),
            SpanStyle::Italic => run.italic(),
        };
        paragraph.add_run(run)
    })
}

fn is_xml_char(c: char) -> bool {
    matches!(c, '\t' | '\n' | '\r') || (c >= ' ' && c != '\u{FFFE}' && c != '\u{FFFF}')
}

/// Reject text containing characters that are not allowed in XML 1.0
pub fn check_xml_text(text: &str) -> Result<()> {
    match text.chars().find(|&c| !is_xml_char(c)) {
        Some(c) => Err(MinutesError::Render(format!(
            "character U+{:04X} cannot be stored in a Word document",
            c as u32
        ))),
        None => Ok(()),
    }
}

pub fn sanitize_xml_text(text: &str) -> String {
    text.chars().filter(|&c| is_xml_char(c)).collect()
}

/// Pick the starting document from the template setting.
fn open_document(
    template: Option<&Path>,
    settings: &Settings,
    outcome: &mut RenderOutcome,
) -> Result<MinutesDocument> {
    let title = &settings.document.title;

    let Some(template) = template else {
        outcome
            .notes
            .push("No template file found. Creating document with standard formatting.".to_string());
        return Ok(MinutesDocument::new(title));
    };

    let extension = template
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();

    match extension.as_str() {
        "docx" => {
            let document = MinutesDocument::from_docx_template(template)?;
            outcome
                .notes
                .push(format!("Using template: {}", template.display()));
            Ok(document)
        }
        "dotx" => {
            outcome.warnings.push(format!(
                ".dotx templates cannot be loaded directly ({}); save it as .docx to keep its layout. Using basic formatting.",
                template.display()
            ));
            let letterhead = settings.document.letterhead.trim();
            Ok(if letterhead.is_empty() {
                MinutesDocument::new(title)
            } else {
                MinutesDocument::with_letterhead(letterhead)
            })
        }
        _ => {
            outcome.warnings.push(format!(
                "Unknown template file type: {}. Creating basic document.",
                template.display()
            ));
            Ok(MinutesDocument::new(title))
        }
    }
}

fn render_styled(
    text: &str,
    template: Option<&Path>,
    settings: &Settings,
    output: &Path,
) -> Result<RenderOutcome> {
    let mut outcome = RenderOutcome::new(RenderMode::Styled, output);
    let mut document = open_document(template, settings, &mut outcome)?;

    for line in classify(text) {
        if let Err(e) = document.push(&line) {
            tracing::warn!("Rendering line as plain text: {}", e);
            outcome
                .warnings
                .push(format!("Rendered a line as plain text: {}", e));
            document.push_plain(&line.plain_text());
        }
    }

    outcome.paragraphs = document.paragraphs();
    document.save(output)?;
    Ok(outcome)
}

/// One plain paragraph per blank-line-separated chunk of `text`.
pub fn write_plain(text: &str, settings: &Settings, output: &Path) -> Result<RenderOutcome> {
    let mut outcome = RenderOutcome::new(RenderMode::Fallback, output);
    let mut document = MinutesDocument::new(&settings.document.title);

    for chunk in PARAGRAPH_BREAK_RE.split(text) {
        let chunk = chunk.trim();
        if !chunk.is_empty() {
            document.push_plain(chunk);
        }
    }

    outcome.paragraphs = document.paragraphs();
    document.save(output)?;
    Ok(outcome)
}

/// Render model output to a Word document at `output`.
///
/// Falls back to a plain document when the styled pass fails as a whole.
pub fn render_minutes(
    text: &str,
    template: Option<&Path>,
    settings: &Settings,
    output: &Path,
) -> Result<RenderOutcome> {
    match render_styled(text, template, settings, output) {
        Ok(outcome) => Ok(outcome),
        Err(e) => {
            tracing::warn!("Styled rendering failed, writing plain document: {}", e);
            let mut outcome = write_plain(text, settings, output)?;
            outcome
                .warnings
                .insert(0, format!("Error creating styled document: {}", e));
            Ok(outcome)
        }
    }
}
