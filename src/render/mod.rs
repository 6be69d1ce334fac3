//! Rendering of model output into a styled Word document
//!
//! Output text is classified line by line (headings, list items, quotes,
//! board actions, prose with inline emphasis) and written with `docx-rs`.
//! A line that cannot be written styled is written plain; if the styled pass
//! fails as a whole, the text is written as plain paragraphs instead.

mod classify;
mod docx;
mod heading;
mod inline;

pub use classify::{classify, format_paragraph, LineKind, RenderLine, MAX_HEADING_LEVEL};
pub use docx::{
    check_xml_text, render_minutes, sanitize_xml_text, write_plain, MinutesDocument, RenderMode,
    RenderOutcome,
};
pub use heading::{heading_level, looks_like_heading, FALLBACK_HEADING_LEVEL};
pub use inline::{parse_inline, strip_bold_markers, InlineSpan, SpanStyle};
