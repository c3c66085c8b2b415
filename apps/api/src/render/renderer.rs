//! Entry points: `render` for annotated resume markup, `render_plain` for
//! prose (cover letter, notes). Both split off the rationale the same way.

use crate::render::inline::tokenize_inline;
use crate::render::lines::{classify_line, LineToken};
use crate::render::model::{Block, DocumentModel, HeadingLevel, Run};

/// Separates document body from the model's free-text rationale.
pub const RATIONALE_DELIMITER: &str = "[[THINKING_PROCESS]]";

const RATIONALE_HEADING: &str = "LLM Thinking Process";

/// Splits at the first delimiter. Later delimiters belong to the rationale verbatim.
///
/// Without a delimiter the whole input is the body (untouched) and the rationale is empty.
/// With one, both sides are trimmed.
pub fn split_rationale(text: &str) -> (&str, &str) {
    match text.split_once(RATIONALE_DELIMITER) {
        Some((body, rationale)) => (body.trim(), rationale.trim()),
        None => (text, ""),
    }
}

/// Renders annotated markup: headings, bullets, paragraphs, each with inline spans.
pub fn render(text: &str) -> DocumentModel {
    let (body, rationale) = split_rationale(text);

    let mut blocks: Vec<Block> = body
        .lines()
        .filter_map(classify_line)
        .map(|token| match token {
            LineToken::Heading(text) => Block::Heading {
                level: HeadingLevel::Section,
                runs: tokenize_inline(text),
            },
            LineToken::Bullet(text) => Block::BulletItem {
                runs: tokenize_inline(text),
            },
            LineToken::Paragraph(text) => Block::Paragraph {
                runs: tokenize_inline(text),
            },
        })
        .collect();

    append_rationale(&mut blocks, rationale);
    DocumentModel { blocks }
}

/// Renders prose line by line with no inline parsing.
///
/// Every body line becomes a paragraph, blank lines included, except a line
/// wholly wrapped in `**…**`, which becomes a section heading.
pub fn render_plain(text: &str) -> DocumentModel {
    let (body, rationale) = split_rationale(text);

    let mut blocks: Vec<Block> = body.trim().lines().map(plain_block).collect();

    append_rationale(&mut blocks, rationale);
    DocumentModel { blocks }
}

fn plain_block(line: &str) -> Block {
    let trimmed = line.trim();
    if trimmed.len() >= 4 && trimmed.starts_with("**") && trimmed.ends_with("**") {
        return Block::Heading {
            level: HeadingLevel::Section,
            runs: plain_runs(&trimmed.replace("**", "")),
        };
    }
    Block::Paragraph {
        runs: plain_runs(line),
    }
}

fn plain_runs(text: &str) -> Vec<Run> {
    if text.is_empty() {
        Vec::new()
    } else {
        vec![Run::plain(text)]
    }
}

fn append_rationale(blocks: &mut Vec<Block>, rationale: &str) {
    if rationale.is_empty() {
        return;
    }
    blocks.push(Block::PageBreak);
    blocks.push(Block::Heading {
        level: HeadingLevel::Title,
        runs: vec![Run::plain(RATIONALE_HEADING)],
    });
    blocks.push(Block::Paragraph {
        runs: vec![Run::plain(rationale)],
    });
}
