//! Application Composer — turns one job description plus two source documents
//! into three rendered documents and the names to ship them under.
//!
//! Flow: four independent completions (resume, cover letter, notes, metadata)
//!       fanned out concurrently → render → derive filenames.
//!
//! Failure policy: if ANY completion fails the whole request fails. Error text
//! is never written into a generated document.

use tracing::info;

use crate::errors::AppError;
use crate::generation::metadata::{extract_metadata, ApplicationFilenames, Metadata};
use crate::generation::prompts::{
    fill_template, COVER_LETTER_PROMPT_TEMPLATE, NOTES_PROMPT_TEMPLATE, RESUME_PROMPT_TEMPLATE,
};
use crate::llm_client::prompts::{FACTUAL_INSTRUCTION, RATIONALE_INSTRUCTION};
use crate::llm_client::LlmClient;
use crate::package::{write_archive, write_docx, PackageError};
use crate::render::{render, render_plain, DocumentModel};

// ────────────────────────────────────────────────────────────────────────────
// Data models
// ────────────────────────────────────────────────────────────────────────────

/// Inputs for one generation. Source texts are whatever extraction produced,
/// error markers included.
#[derive(Debug, Clone)]
pub struct ApplicationRequest {
    pub job_description: String,
    pub resume_text: String,
    pub cover_letter_text: String,
}

/// Everything one generation produces, ready for packaging.
#[derive(Debug, Clone)]
pub struct ApplicationBundle {
    pub metadata: Metadata,
    pub filenames: ApplicationFilenames,
    pub resume: DocumentModel,
    pub cover_letter: DocumentModel,
    pub notes: DocumentModel,
}

// ────────────────────────────────────────────────────────────────────────────
// Composition
// ────────────────────────────────────────────────────────────────────────────

/// Runs the four completions concurrently and renders the results.
///
/// `try_join!` drops the still-pending calls as soon as one fails, so an
/// aborted request leaves nothing running behind it.
pub async fn compose_application(
    llm: &LlmClient,
    request: &ApplicationRequest,
) -> Result<ApplicationBundle, AppError> {
    info!(
        "Composing application: jd={} chars, resume={} chars, cover_letter={} chars",
        request.job_description.len(),
        request.resume_text.len(),
        request.cover_letter_text.len()
    );

    let (resume_raw, cover_letter_raw, notes_raw, metadata) = tokio::try_join!(
        complete_document(llm, "Resume", build_resume_prompt(request)),
        complete_document(llm, "Cover letter", build_cover_letter_prompt(request)),
        complete_document(llm, "Notes", build_notes_prompt(request)),
        extract_metadata(llm, &request.job_description),
    )?;

    let filenames = ApplicationFilenames::from_metadata(&metadata);
    info!("Generated documents for {}", metadata.base_name());

    Ok(ApplicationBundle {
        resume: render(&resume_raw),
        cover_letter: render_plain(&cover_letter_raw),
        notes: render_plain(&notes_raw),
        metadata,
        filenames,
    })
}

/// Writes the three documents and zips them under their derived names.
/// CPU bound — callers on the runtime should use `spawn_blocking`.
pub fn package_bundle(bundle: &ApplicationBundle) -> Result<Vec<u8>, PackageError> {
    let resume = write_docx(&bundle.resume)?;
    let cover_letter = write_docx(&bundle.cover_letter)?;
    let notes = write_docx(&bundle.notes)?;

    write_archive([
        (bundle.filenames.resume.as_str(), resume.as_slice()),
        (bundle.filenames.cover_letter.as_str(), cover_letter.as_slice()),
        (bundle.filenames.notes.as_str(), notes.as_slice()),
    ])
}

async fn complete_document(
    llm: &LlmClient,
    label: &str,
    prompt: String,
) -> Result<String, AppError> {
    llm.complete(&prompt)
        .await
        .map_err(|e| AppError::Llm(format!("{label} generation failed: {e}")))
}

// ────────────────────────────────────────────────────────────────────────────
// Prompt building
// ────────────────────────────────────────────────────────────────────────────

fn build_resume_prompt(request: &ApplicationRequest) -> String {
    fill_template(
        RESUME_PROMPT_TEMPLATE,
        &[
            ("rationale_instruction", RATIONALE_INSTRUCTION),
            ("job_description", &request.job_description),
            ("resume_text", &request.resume_text),
        ],
    )
}

fn build_cover_letter_prompt(request: &ApplicationRequest) -> String {
    fill_template(
        COVER_LETTER_PROMPT_TEMPLATE,
        &[
            ("rationale_instruction", RATIONALE_INSTRUCTION),
            ("job_description", &request.job_description),
            ("resume_text", &request.resume_text),
            ("cover_letter_text", &request.cover_letter_text),
        ],
    )
}

fn build_notes_prompt(request: &ApplicationRequest) -> String {
    fill_template(
        NOTES_PROMPT_TEMPLATE,
        &[
            ("rationale_instruction", RATIONALE_INSTRUCTION),
            ("factual_instruction", FACTUAL_INSTRUCTION),
            ("job_description", &request.job_description),
        ],
    )
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
