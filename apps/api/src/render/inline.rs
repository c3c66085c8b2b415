//! Inline tokenizer for `<ins>`, `<del>` and `**bold**` spans.
//!
//! Matching rules:
//! - leftmost span wins; at a given position the precedence is ins → del → bold
//! - each span closes at the FIRST closing marker (shortest match), so two
//!   spans on one line stay separate
//! - span contents are not re-scanned: `<ins>**x**</ins>` is one Inserted run "**x**"
//! - an opening marker with no closing marker on the line is plain text

use crate::render::model::{Run, RunStyle};

struct SpanRule {
    open: &'static str,
    close: &'static str,
    style: RunStyle,
}

/// Tried in order at every position.
const SPAN_RULES: [SpanRule; 3] = [
    SpanRule {
        open: "<ins>",
        close: "</ins>",
        style: RunStyle::Inserted,
    },
    SpanRule {
        open: "<del>",
        close: "</del>",
        style: RunStyle::Deleted,
    },
    SpanRule {
        open: "**",
        close: "**",
        style: RunStyle::Bold,
    },
];

/// A span recognised at the start of the remaining input.
struct SpanMatch<'a> {
    style: RunStyle,
    inner: &'a str,
    /// Bytes consumed, markers included.
    len: usize,
}

fn match_span(rest: &str) -> Option<SpanMatch<'_>> {
    SPAN_RULES.iter().find_map(|rule| {
        let after_open = rest.strip_prefix(rule.open)?;
        let close_at = after_open.find(rule.close)?;
        Some(SpanMatch {
            style: rule.style,
            inner: &after_open[..close_at],
            len: rule.open.len() + close_at + rule.close.len(),
        })
    })
}

/// Splits one block's text into styled runs. Empty runs are never emitted.
pub fn tokenize_inline(text: &str) -> Vec<Run> {
    let mut runs = Vec::new();
    let mut plain_start = 0;
    let mut cursor = 0;

    while cursor < text.len() {
        let rest = &text[cursor..];
        match match_span(rest) {
            Some(span) => {
                push_run(&mut runs, RunStyle::Plain, &text[plain_start..cursor]);
                push_run(&mut runs, span.style, span.inner);
                cursor += span.len;
                plain_start = cursor;
            }
            None => {
                // Markers are ASCII, so stepping a whole char keeps us on a boundary.
                cursor += rest.chars().next().map_or(1, char::len_utf8);
            }
        }
    }
    push_run(&mut runs, RunStyle::Plain, &text[plain_start..]);

    runs
}

fn push_run(runs: &mut Vec<Run>, style: RunStyle, text: &str) {
    if !text.is_empty() {
        runs.push(Run::new(style, text));
    }
}
