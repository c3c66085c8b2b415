//! Line-level tokenizer: classifies each body line before inline parsing.

/// One non-blank body line, classified. Payloads borrow from the source line
/// with the block marker removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineToken<'a> {
    Heading(&'a str),
    Bullet(&'a str),
    Paragraph(&'a str),
}

const HEADING_MARKER: &str = "###";
const BULLET_MARKER: &str = "- ";

/// Classifies a line. Precedence: blank (dropped) → `###` heading → `- ` bullet → paragraph.
///
/// Extra leading `#` beyond the recognised `###` are swallowed, so `#### X` is
/// still a heading with text `X`.
pub fn classify_line(line: &str) -> Option<LineToken<'_>> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    if let Some(rest) = line.strip_prefix(HEADING_MARKER) {
        return Some(LineToken::Heading(rest.trim_start_matches('#').trim()));
    }

    if let Some(rest) = line.strip_prefix(BULLET_MARKER) {
        return Some(LineToken::Bullet(rest.trim()));
    }

    Some(LineToken::Paragraph(line))
}
