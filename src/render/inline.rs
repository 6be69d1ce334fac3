//! Inline emphasis parsing (`**bold**`, `*italic*`)

use regex::Regex;
use std::sync::LazyLock;

static BOLD_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*\*(.*?)\*\*").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpanStyle {
    Normal,
    Bold,
    Italic,
}

/// A run of text sharing one style
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineSpan {
    pub style: SpanStyle,
    pub text: String,
}

impl InlineSpan {
    pub fn new(style: SpanStyle, text: impl Into<String>) -> Self {
        Self {
            style,
            text: text.into(),
        }
    }

    pub fn normal(text: impl Into<String>) -> Self {
        Self::new(SpanStyle::Normal, text)
    }
}

/// Remove `**` pairs, keeping their content
pub fn strip_bold_markers(text: &str) -> String {
    BOLD_RE.replace_all(text, "$1").into_owned()
}

/// Split text into styled spans.
///
/// Bold pairs are matched first across the whole text; every segment between
/// them is then scanned for single-star italics. Empty spans are dropped.
pub fn parse_inline(text: &str) -> Vec<InlineSpan> {
    let mut spans = Vec::new();
    let mut cursor = 0;

    for caps in BOLD_RE.captures_iter(text) {
        let (Some(whole), Some(inner)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        push_italics(&mut spans, &text[cursor..whole.start()]);
        push(&mut spans, SpanStyle::Bold, inner.as_str());
        cursor = whole.end();
    }
    push_italics(&mut spans, &text[cursor..]);

    spans
}

fn push(spans: &mut Vec<InlineSpan>, style: SpanStyle, text: &str) {
    if !text.is_empty() {
        spans.push(InlineSpan::new(style, text));
    }
}

/// `*text*` where neither star touches another star and the content has no star
fn push_italics(spans: &mut Vec<InlineSpan>, segment: &str) {
    let bytes = segment.as_bytes();
    let mut cursor = 0;
    let mut i = 0;

    while i < bytes.len() {
        let opens = bytes[i] == b'*'
            && (i == 0 || bytes[i - 1] != b'*')
            && bytes.get(i + 1).is_some_and(|&b| b != b'*');

        if opens {
            if let Some(offset) = segment[i + 1..].find('*') {
                let close = i + 1 + offset;
                if bytes.get(close + 1) != Some(&b'*') {
                    push(spans, SpanStyle::Normal, &segment[cursor..i]);
                    push(spans, SpanStyle::Italic, &segment[i + 1..close]);
                    cursor = close + 1;
                    i = close + 1;
                    continue;
                }
            }
        }
        i += 1;
    }

    push(spans, SpanStyle::Normal, &segment[cursor..]);
}
