// Markup rendering: annotated LLM output → structured document model.
// Pure and CPU-only; never fails — malformed markup degrades to literal text.

pub mod inline;
pub mod lines;
pub mod model;
pub mod renderer;

// Re-export the public API consumed by other modules (composer, package).
pub use model::{Block, DocumentModel, HeadingLevel, Run, RunStyle};
pub use renderer::{render, render_plain, split_rationale, RATIONALE_DELIMITER};
