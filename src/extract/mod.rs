//! Text extraction from meeting inputs
//!
//! Flattens the agenda document and the caption file into the plain text the
//! prompt is built from.

mod agenda;
mod transcript;

pub use agenda::{
    extract_agenda, heading_level_for_style, normalize_agenda_text, AgendaLine, ExtractedDocument,
};
pub use transcript::{clean_transcript, extract_transcript, is_cue_metadata};
