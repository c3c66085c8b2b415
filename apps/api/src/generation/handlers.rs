//! Axum route handlers for the Generation API.

use axum::{
    extract::{
        multipart::{Field, Multipart},
        State,
    },
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use bytes::Bytes;
use tracing::{debug, info};

use crate::errors::AppError;
use crate::extraction::extract_text;
use crate::generation::composer::{compose_application, package_bundle, ApplicationRequest};
use crate::state::AppState;

const ARCHIVE_MEDIA_TYPE: &str = "application/zip";

// ────────────────────────────────────────────────────────────────────────────
// Multipart form
// ────────────────────────────────────────────────────────────────────────────

struct Upload {
    file_name: String,
    bytes: Bytes,
}

struct ApplicationForm {
    job_description: String,
    resume: Upload,
    cover_letter: Upload,
}

async fn read_form(mut multipart: Multipart) -> Result<ApplicationForm, AppError> {
    let mut job_description = None;
    let mut resume = None;
    let mut cover_letter = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "job_description" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("Invalid job_description: {e}")))?;
                job_description = Some(text);
            }
            "resume" => resume = Some(read_upload(field).await?),
            "cover_letter" => cover_letter = Some(read_upload(field).await?),
            other => debug!("Ignoring unexpected multipart field '{other}'"),
        }
    }

    Ok(ApplicationForm {
        job_description: job_description
            .filter(|jd| !jd.trim().is_empty())
            .ok_or_else(|| AppError::Validation("job_description cannot be empty".to_string()))?,
        resume: resume.ok_or_else(|| AppError::Validation("resume file is required".to_string()))?,
        cover_letter: cover_letter
            .ok_or_else(|| AppError::Validation("cover_letter file is required".to_string()))?,
    })
}

async fn read_upload(field: Field<'_>) -> Result<Upload, AppError> {
    let file_name = field.file_name().unwrap_or_default().to_string();
    let bytes = field
        .bytes()
        .await
        .map_err(|e| AppError::Validation(format!("Failed to read upload '{file_name}': {e}")))?;
    Ok(Upload { file_name, bytes })
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/applications
///
/// Multipart fields: `job_description` (text), `resume` (file), `cover_letter` (file).
/// Returns a zip of the tailored resume, cover letter and research notes.
/// Nothing partial is ever returned: any completion failure fails the request.
pub async fn handle_generate_application(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Response, AppError> {
    let form = read_form(multipart).await?;

    let (resume_text, cover_letter_text) = tokio::join!(
        extract_text(&form.resume.file_name, form.resume.bytes),
        extract_text(&form.cover_letter.file_name, form.cover_letter.bytes),
    );

    let request = ApplicationRequest {
        job_description: form.job_description,
        resume_text,
        cover_letter_text,
    };

    let bundle = compose_application(&state.llm, &request).await?;
    let archive_name = bundle.filenames.archive.clone();

    let archive = tokio::task::spawn_blocking(move || package_bundle(&bundle))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Packaging task failed: {e}")))??;

    info!("Returning {} ({} bytes)", archive_name, archive.len());

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, ARCHIVE_MEDIA_TYPE.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{archive_name}\""),
            ),
        ],
        archive,
    )
        .into_response())
}
