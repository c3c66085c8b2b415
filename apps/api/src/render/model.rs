//! Document model produced by the renderer and consumed by the docx writer.

/// Style tag carried by a single run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStyle {
    Plain,
    Bold,
    /// Text the model added (`<ins>…</ins>`).
    Inserted,
    /// Text the model removed (`<del>…</del>`).
    Deleted,
}

/// A contiguous span of text with one style. Markup characters are already stripped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Run {
    pub style: RunStyle,
    pub text: String,
}

impl Run {
    pub fn new(style: RunStyle, text: impl Into<String>) -> Self {
        Self {
            style,
            text: text.into(),
        }
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(RunStyle::Plain, text)
    }
}

/// Heading depth. Body headings are always `Section`, one below the title.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadingLevel {
    Title,
    Section,
}

impl HeadingLevel {
    pub fn level(self) -> u8 {
        match self {
            HeadingLevel::Title => 1,
            HeadingLevel::Section => 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Heading { level: HeadingLevel, runs: Vec<Run> },
    BulletItem { runs: Vec<Run> },
    Paragraph { runs: Vec<Run> },
    PageBreak,
}

impl Block {
    pub fn runs(&self) -> &[Run] {
        match self {
            Block::Heading { runs, .. } | Block::BulletItem { runs } | Block::Paragraph { runs } => {
                runs.as_slice()
            }
            Block::PageBreak => &[],
        }
    }

    /// Rendered text of the block: all run texts concatenated.
    pub fn text(&self) -> String {
        self.runs().iter().map(|r| r.text.as_str()).collect()
    }
}

/// Ordered blocks of one generated document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentModel {
    pub blocks: Vec<Block>,
}
