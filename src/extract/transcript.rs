//! Transcript extraction from WebVTT caption files

use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

use crate::{MinutesError, Result};

/// Header blocks and cue timing lines (`00:01:02.345 --> ...` or `01:02.345 --> ...`)
static CUE_METADATA_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(WEBVTT|NOTE|\d{2}:\d{2}:\d{2}\.\d{3}|\d{2}:\d{2}\.\d{3}\s+-->)").unwrap()
});

static WHITESPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Whether a trimmed caption line is a header or a cue timing line
pub fn is_cue_metadata(line: &str) -> bool {
    CUE_METADATA_RE.is_match(line)
}

/// Join caption text into one space-separated string.
///
/// Header, timing and blank lines are dropped; speaker labels and cue
/// identifiers are kept as ordinary text.
pub fn clean_transcript(raw: &str) -> String {
    let raw = raw.strip_prefix('\u{feff}').unwrap_or(raw);

    let joined = raw
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !is_cue_metadata(line))
        .collect::<Vec<_>>()
        .join(" ");

    WHITESPACE_RE.replace_all(&joined, " ").trim().to_string()
}

/// Read a `.vtt` caption file.
pub fn extract_transcript(path: &Path) -> Result<String> {
    let raw = std::fs::read_to_string(path).map_err(|e| {
        MinutesError::Extraction(format!("Cannot read transcript '{}': {}", path.display(), e))
    })?;

    let text = clean_transcript(&raw);
    tracing::debug!(
        "Extracted {} transcript characters from {}",
        text.len(),
        path.display()
    );

    Ok(text)
}
