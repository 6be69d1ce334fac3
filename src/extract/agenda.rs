//! Agenda extraction from Word documents

use docx_rs::{read_docx, DocumentChild, InsertChild, ParagraphChild, Run, RunChild};
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

use crate::{MinutesError, Result};

static HORIZONTAL_SPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[ \t]+").unwrap());

static TRAILING_SPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)[ \t]+$").unwrap());

static BLANK_RUN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n{3,}").unwrap());

/// One non-blank agenda paragraph
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgendaLine {
    /// 0 = body text, 1-3 = heading depth
    pub level: u8,
    pub text: String,
}

/// Agenda paragraphs in document order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedDocument {
    lines: Vec<AgendaLine>,
}

impl ExtractedDocument {
    /// Build from `(style id, paragraph text)` pairs, skipping blank paragraphs
    pub fn from_paragraphs<'a, I>(paragraphs: I) -> Self
    where
        I: IntoIterator<Item = (Option<&'a str>, String)>,
    {
        let lines = paragraphs
            .into_iter()
            .filter_map(|(style, text)| {
                let text = text.trim();
                if text.is_empty() {
                    return None;
                }
                Some(AgendaLine {
                    level: style.map(heading_level_for_style).unwrap_or(0),
                    text: text.to_string(),
                })
            })
            .collect();

        Self { lines }
    }

    pub fn lines(&self) -> &[AgendaLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Render as prompt text, headings prefixed with `#` markers
    pub fn to_text(&self) -> String {
        let joined = self
            .lines
            .iter()
            .map(|line| {
                if line.level == 0 {
                    line.text.clone()
                } else {
                    format!("{} {}", "#".repeat(line.level as usize), line.text)
                }
            })
            .collect::<Vec<_>>()
            .join("\n");

        normalize_agenda_text(&joined)
    }
}

/// Heading depth implied by a paragraph style id or name.
///
/// `Heading1`, `heading 2` and `Heading 3` map to their level; any other
/// heading style maps to 1 and non-heading styles to 0.
pub fn heading_level_for_style(style: &str) -> u8 {
    let normalized: String = style
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_lowercase();

    let Some(rest) = normalized.strip_prefix("heading") else {
        return 0;
    };

    match rest {
        "2" => 2,
        "3" => 3,
        _ => 1,
    }
}

/// Collapse spaces and tabs to one space and 3+ newlines to a single blank line.
///
/// Whitespace-only lines count as blank.
pub fn normalize_agenda_text(text: &str) -> String {
    let collapsed = HORIZONTAL_SPACE_RE.replace_all(text, " ");
    let collapsed = TRAILING_SPACE_RE.replace_all(&collapsed, "");
    let collapsed = BLANK_RUN_RE.replace_all(&collapsed, "\n\n");
    collapsed.trim().to_string()
}

/// Read an agenda `.docx` file.
pub fn extract_agenda(path: &Path) -> Result<ExtractedDocument> {
    let bytes = std::fs::read(path).map_err(|e| {
        MinutesError::Extraction(format!("Cannot read agenda '{}': {}", path.display(), e))
    })?;

    let docx = read_docx(&bytes).map_err(|e| {
        MinutesError::Extraction(format!(
            "Cannot parse agenda '{}' as a Word document: {}",
            path.display(),
            e
        ))
    })?;

    let paragraphs = docx.document.children.iter().filter_map(|child| match child {
        DocumentChild::Paragraph(para) => Some((
            para.property.style.as_ref().map(|s| s.val.as_str()),
            paragraph_text(&para.children),
        )),
        _ => None,
    });

    let document = ExtractedDocument::from_paragraphs(paragraphs);
    tracing::debug!(
        "Extracted {} agenda paragraphs from {}",
        document.lines().len(),
        path.display()
    );

    Ok(document)
}

/// Text of direct runs, hyperlinks and tracked insertions; deletions are skipped
fn paragraph_text(children: &[ParagraphChild]) -> String {
    let mut text = String::new();

    for child in children {
        match child {
            ParagraphChild::Run(run) => push_run_text(run, &mut text),
            ParagraphChild::Hyperlink(link) => text.push_str(&paragraph_text(&link.children)),
            ParagraphChild::Insert(insert) => {
                for ic in &insert.children {
                    if let InsertChild::Run(run) = ic {
                        push_run_text(run, &mut text);
                    }
                }
            }
            _ => {}
        }
    }

    text
}

fn push_run_text(run: &Run, text: &mut String) {
    for rc in &run.children {
        match rc {
            RunChild::Text(t) => text.push_str(&t.text),
            RunChild::Tab(_) => text.push('\t'),
            RunChild::Break(_) => text.push('\n'),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docx_rs::{Docx, Hyperlink, HyperlinkType, Insert, Paragraph};
    use proptest::prelude::*;

    #[test]
    fn heading_styles_map_to_levels() {
        assert_eq!(heading_level_for_style("Heading1"), 1);
        assert_eq!(heading_level_for_style("heading 2"), 2);
        assert_eq!(heading_level_for_style("Heading 3"), 3);
        assert_eq!(heading_level_for_style("Heading5"), 1);
        assert_eq!(heading_level_for_style("Normal"), 0);
        assert_eq!(heading_level_for_style("ListParagraph"), 0);
    }

    #[test]
    fn headings_get_markers_and_blanks_are_skipped() {
        let doc = ExtractedDocument::from_paragraphs(vec![
            (Some("Heading1"), "Regular Meeting".to_string()),
            (None, "   ".to_string()),
            (Some("Heading2"), " Call to Order ".to_string()),
            (Some("Normal"), "Roll call\tof members".to_string()),
        ]);

        assert_eq!(doc.lines().len(), 3);
        assert_eq!(
            doc.to_text(),
            "# Regular Meeting\n## Call to Order\nRoll call of members"
        );
    }

    #[test]
    fn normalize_collapses_spaces_but_keeps_single_newlines() {
        assert_eq!(normalize_agenda_text("a  \t b\nc"), "a b\nc");
        assert_eq!(normalize_agenda_text("a\n\n\n\nb"), "a\n\nb");
        assert_eq!(normalize_agenda_text("a\n\nb"), "a\n\nb");
    }

    #[test]
    fn whitespace_only_lines_count_as_blank() {
        assert_eq!(normalize_agenda_text("a\n\t\n \n\nb"), "a\n\nb");

        let doc = ExtractedDocument::from_paragraphs(vec![(
            None,
            "Roll call\n \n \n \nPublic comment".to_string(),
        )]);
        assert_eq!(doc.to_text(), "Roll call\n\nPublic comment");
    }

    #[test]
    fn hyperlinked_and_inserted_runs_are_extracted() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("agenda.docx");
        let docx = Docx::new()
            .add_paragraph(
                Paragraph::new()
                    .add_run(Run::new().add_text("5. Approve "))
                    .add_hyperlink(
                        Hyperlink::new("https://example.org/staff-report.pdf", HyperlinkType::External)
                            .add_run(Run::new().add_text("Resolution 2024-07")),
                    ),
            )
            .add_paragraph(
                Paragraph::new()
                    .add_run(Run::new().add_text("6. Receive "))
                    .add_insert(Insert::new(Run::new().add_text("the audit report"))),
            );
        docx.build()
            .pack(std::fs::File::create(&path).unwrap())
            .unwrap();

        let text = extract_agenda(&path).unwrap().to_text();
        assert_eq!(
            text,
            "5. Approve Resolution 2024-07\n6. Receive the audit report"
        );
    }

    #[test]
    fn missing_file_is_an_extraction_error() {
        let err = extract_agenda(Path::new("/definitely/not/here.docx")).unwrap_err();
        assert!(matches!(err, MinutesError::Extraction(_)));
    }

    #[test]
    fn non_docx_file_is_an_extraction_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("agenda.docx");
        std::fs::write(&path, "not a zip archive").unwrap();

        let err = extract_agenda(&path).unwrap_err();
        assert!(err.to_string().contains("Cannot parse agenda"));
    }

    fn agenda_line() -> impl Strategy<Value = String> {
        prop_oneof![
            Just(String::new()),
            Just(" ".to_string()),
            Just("\t \t".to_string()),
            "[A-Za-z0-9][A-Za-z0-9 .,:]{0,30}",
        ]
    }

    proptest! {
        #[test]
        fn blank_runs_collapse_to_one(lines in prop::collection::vec(agenda_line(), 0..40)) {
            let normalized = normalize_agenda_text(&lines.join("\n"));

            prop_assert!(!normalized.contains("\n\n\n"));
            prop_assert!(normalized.lines().all(|l| l.is_empty() || !l.trim().is_empty()));

            let kept = normalized.lines().filter(|l| !l.is_empty()).count();
            let non_blank = lines.iter().filter(|l| !l.trim().is_empty()).count();
            prop_assert_eq!(kept, non_blank);
        }

        #[test]
        fn single_newlines_are_kept(lines in prop::collection::vec("[A-Za-z][A-Za-z ]{0,20}[a-z]", 1..20)) {
            let normalized = normalize_agenda_text(&lines.join("\n"));
            prop_assert_eq!(normalized.lines().count(), lines.len());
        }
    }
}
