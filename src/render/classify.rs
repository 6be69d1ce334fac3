//! Line classification of model output

use regex::Regex;
use std::sync::LazyLock;

use crate::render::heading::{heading_level, looks_like_heading};
use crate::render::inline::{parse_inline, strip_bold_markers, InlineSpan};

/// Deepest heading the output document distinguishes
pub const MAX_HEADING_LEVEL: u8 = 3;

static MARKDOWN_HEADING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(#{1,6})\s+(.*)$").unwrap());

static LIST_MARKER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:[-*+]|\d+\.)\s+").unwrap());

static ACTION_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)^\*\*Action:\*\*").unwrap());

static LEADING_BOLD_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\*\*(.*?)\*\*").unwrap());

/// Bold lead-ins containing one of these become section headings
const SECTION_KEYWORDS: [&str; 7] = [
    "CALL TO ORDER",
    "COMMUNICATIONS",
    "CONSENT AGENDA",
    "ACTION ITEM",
    "DISCUSSION",
    "INFORMATION",
    "ADJOURN",
];

/// What a unit of output becomes in the document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind {
    Heading { level: u8, text: String },
    ListItem(String),
    Quote(String),
    /// Bold, quote-styled board action
    Action(String),
    Prose(Vec<InlineSpan>),
}

/// A classified unit and how many non-blank input lines it consumed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderLine {
    pub kind: LineKind,
    pub source_lines: usize,
}

impl RenderLine {
    fn single(kind: LineKind) -> Self {
        Self {
            kind,
            source_lines: 1,
        }
    }

    /// Text content without styling
    pub fn plain_text(&self) -> String {
        match &self.kind {
            LineKind::Heading { text, .. }
            | LineKind::ListItem(text)
            | LineKind::Quote(text)
            | LineKind::Action(text) => text.clone(),
            LineKind::Prose(spans) => spans.iter().map(|s| s.text.as_str()).collect(),
        }
    }
}

#[derive(Default)]
struct Classifier<'a> {
    out: Vec<RenderLine>,
    pending: Vec<&'a str>,
    in_list: bool,
}

impl<'a> Classifier<'a> {
    fn flush(&mut self) {
        if self.pending.is_empty() {
            return;
        }
        let text = self.pending.join(" ");
        self.out.push(RenderLine {
            kind: format_paragraph(&text),
            source_lines: self.pending.len(),
        });
        self.pending.clear();
    }

    fn line(&mut self, line: &'a str) {
        if line.is_empty() {
            self.flush();
            self.in_list = false;
            return;
        }

        if let Some(caps) = MARKDOWN_HEADING_RE.captures(line) {
            self.flush();
            self.in_list = false;
            let level = caps[1].len().min(MAX_HEADING_LEVEL as usize) as u8;
            self.out.push(RenderLine::single(LineKind::Heading {
                level,
                text: caps[2].trim().to_string(),
            }));
            return;
        }

        if let Some(marker) = LIST_MARKER_RE.find(line) {
            self.flush();
            self.in_list = true;
            self.out
                .push(RenderLine::single(LineKind::ListItem(line[marker.end()..].to_string())));
            return;
        }

        if looks_like_heading(line) {
            self.flush();
            self.in_list = false;
            self.out.push(RenderLine::single(LineKind::Heading {
                level: heading_level(line).clamp(1, MAX_HEADING_LEVEL),
                text: line.to_string(),
            }));
            return;
        }

        if self.in_list {
            self.flush();
            self.in_list = false;
        }
        self.pending.push(line);
    }
}

/// Classify raw model output line by line.
///
/// Blank lines separate paragraphs; consecutive prose lines are joined with
/// spaces into one unit. Every non-blank line lands in exactly one unit.
pub fn classify(text: &str) -> Vec<RenderLine> {
    let mut classifier = Classifier::default();
    for line in text.lines() {
        classifier.line(line.trim());
    }
    classifier.flush();
    classifier.out
}

/// Paragraph-level formatting of accumulated prose, in priority order.
pub fn format_paragraph(text: &str) -> LineKind {
    if ACTION_RE.is_match(text) {
        return LineKind::Action(strip_bold_markers(text));
    }

    if LEADING_BOLD_RE.is_match(text) {
        let stripped = strip_bold_markers(text);
        let upper = stripped.to_uppercase();
        if SECTION_KEYWORDS.iter().any(|keyword| upper.contains(keyword)) {
            return LineKind::Heading {
                level: 1,
                text: stripped,
            };
        }
        return LineKind::Prose(parse_inline(text));
    }

    if text.starts_with('>') {
        return LineKind::Quote(text.trim_start_matches(['>', ' ']).to_string());
    }

    LineKind::Prose(parse_inline(text))
}
