//! Inline Tone Markup
//!
//! Output lines are plain strings that may carry lightweight color hints in
//! the form `{tone|text}`. Renderers either interpret the hints via [`parse`]
//! or drop them via [`strip`].
//!
//! A brace group whose tone name is unknown, or which is never closed, is
//! kept as literal text. `{{` is a literal `{`; use [`escape`] on any text
//! that did not come from trusted content. Nesting is not supported.

use serde::{Deserialize, Serialize};

/// Named tone a renderer maps onto its own palette
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    /// Unstyled text
    #[default]
    Plain,
    /// Highlighted text (headings, bars)
    Accent,
    /// Success / deployed
    Ok,
    /// Warning
    Warn,
    /// Error
    Err,
    /// De-emphasized text
    Muted,
}

impl Tone {
    /// Parse a tone name as it appears inside a marker
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "plain" => Some(Self::Plain),
            "accent" => Some(Self::Accent),
            "ok" => Some(Self::Ok),
            "warn" => Some(Self::Warn),
            "err" => Some(Self::Err),
            "muted" => Some(Self::Muted),
            _ => None,
        }
    }

    /// Marker name for this tone
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Plain => "plain",
            Self::Accent => "accent",
            Self::Ok => "ok",
            Self::Warn => "warn",
            Self::Err => "err",
            Self::Muted => "muted",
        }
    }
}

/// A run of text sharing one tone
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Segment<'a> {
    /// Tone of this run
    pub tone: Tone,
    /// The text, markers removed
    pub text: &'a str,
}

/// Wrap `text` in a marker for `tone`
#[must_use]
pub fn tag(tone: Tone, text: &str) -> String {
    format!("{{{}|{}}}", tone.name(), text)
}

/// Escape `text` so [`parse`] returns it unchanged
#[must_use]
pub fn escape(text: &str) -> String {
    text.replace('{', "{{")
}

/// Split a line into toned segments
///
/// Plain text is split only around markers and escapes; empty segments are
/// never emitted.
#[must_use]
pub fn parse(line: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut plain_start = 0;
    let mut cursor = 0;

    while let Some(rel) = line[cursor..].find('{') {
        let open = cursor + rel;
        if line[open + 1..].starts_with('{') {
            push_segment(&mut segments, Tone::Plain, &line[plain_start..=open]);
            cursor = open + 2;
            plain_start = cursor;
            continue;
        }
        match marker_at(line, open) {
            Some((tone, text, end)) => {
                push_segment(&mut segments, Tone::Plain, &line[plain_start..open]);
                push_segment(&mut segments, tone, text);
                cursor = end;
                plain_start = end;
            }
            None => cursor = open + 1,
        }
    }

    push_segment(&mut segments, Tone::Plain, &line[plain_start..]);
    segments
}

/// Remove all markers, keeping their text
#[must_use]
pub fn strip(line: &str) -> String {
    parse(line).into_iter().map(|s| s.text).collect()
}

/// Recognize a marker starting at byte `open` (which holds `{`)
///
/// Returns the tone, the inner text and the byte offset just past `}`.
fn marker_at(line: &str, open: usize) -> Option<(Tone, &str, usize)> {
    let body = &line[open + 1..];
    let bar = body.find('|')?;
    let close = body.find('}')?;
    if close < bar {
        return None;
    }
    let tone = Tone::from_name(&body[..bar])?;
    let text = &body[bar + 1..close];
    Some((tone, text, open + 1 + close + 1))
}

fn push_segment<'a>(segments: &mut Vec<Segment<'a>>, tone: Tone, text: &'a str) {
    if !text.is_empty() {
        segments.push(Segment { tone, text });
    }
}
