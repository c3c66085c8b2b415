//! Metadata extraction — company and role names used to build output filenames.
//!
//! Never fails on bad model output: anything that is not a `{"company", "role"}`
//! object falls back to `Company` / `Role`. Only the completion call itself can fail.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::errors::AppError;
use crate::generation::prompts::{fill_template, METADATA_PROMPT_TEMPLATE};
use crate::llm_client::LlmClient;

pub const DEFAULT_COMPANY: &str = "Company";
pub const DEFAULT_ROLE: &str = "Role";

pub const DOCUMENT_EXTENSION: &str = "docx";
pub const ARCHIVE_EXTENSION: &str = "zip";

/// Filename-safe company and role. Both fields are already sanitized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Metadata {
    pub company: String,
    pub role: String,
}

impl Default for Metadata {
    fn default() -> Self {
        Self {
            company: DEFAULT_COMPANY.to_string(),
            role: DEFAULT_ROLE.to_string(),
        }
    }
}

impl Metadata {
    /// `{company}_{role}` — the prefix shared by every output file.
    pub fn base_name(&self) -> String {
        format!("{}_{}", self.company, self.role)
    }
}

/// Output file names derived from one `Metadata`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApplicationFilenames {
    pub resume: String,
    pub cover_letter: String,
    pub notes: String,
    pub archive: String,
}

impl ApplicationFilenames {
    pub fn from_metadata(metadata: &Metadata) -> Self {
        let base = metadata.base_name();
        Self {
            resume: format!("{base}_Resume.{DOCUMENT_EXTENSION}"),
            cover_letter: format!("{base}_CoverLetter.{DOCUMENT_EXTENSION}"),
            notes: format!("{base}_Notes.{DOCUMENT_EXTENSION}"),
            archive: format!("{base}_Application.{ARCHIVE_EXTENSION}"),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawMetadata {
    company: String,
    role: String,
}

/// Asks the LLM for company/role. A failed completion fails the request;
/// an unparseable answer does not.
pub async fn extract_metadata(llm: &LlmClient, job_description: &str) -> Result<Metadata, AppError> {
    let prompt = fill_template(METADATA_PROMPT_TEMPLATE, &[("job_description", job_description)]);
    let completion = llm
        .complete(&prompt)
        .await
        .map_err(|e| AppError::Llm(format!("Metadata extraction failed: {e}")))?;

    Ok(parse_metadata(&completion))
}

/// Parses a metadata completion, stripping the first fenced code block wrapper if present.
pub fn parse_metadata(completion: &str) -> Metadata {
    let json = strip_code_fence(completion);

    match serde_json::from_str::<RawMetadata>(json) {
        Ok(raw) => Metadata {
            company: sanitize_or(&raw.company, DEFAULT_COMPANY),
            role: sanitize_or(&raw.role, DEFAULT_ROLE),
        },
        Err(e) => {
            warn!("Metadata completion was not usable JSON, using defaults: {e}");
            Metadata::default()
        }
    }
}

/// Keeps only alphanumerics, spaces, underscores and hyphens; trims; spaces → underscores.
pub fn sanitize_component(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, ' ' | '_' | '-'))
        .collect::<String>()
        .trim()
        .replace(' ', "_")
}

fn sanitize_or(raw: &str, fallback: &str) -> String {
    let clean = sanitize_component(raw);
    if clean.is_empty() {
        fallback.to_string()
    } else {
        clean
    }
}

/// Returns the contents of the first ``` block (language tag dropped), or the
/// whole text when there is no fence.
fn strip_code_fence(text: &str) -> &str {
    let Some((_, after_open)) = text.split_once("```") else {
        return text.trim();
    };
    // Info string may be spaced off the fence ("``` json").
    let inner = after_open
        .trim_start()
        .trim_start_matches(|c: char| c.is_ascii_alphanumeric());
    match inner.find("```") {
        Some(end) => inner[..end].trim(),
        None => inner.trim(),
    }
}
