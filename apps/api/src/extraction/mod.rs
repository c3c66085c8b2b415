//! Best-effort plain-text extraction from uploaded documents.
//!
//! Extraction never fails the request: a broken upload becomes an inline
//! `[Error reading …]` marker that flows into the prompt like any other text.
//! Parsing is CPU bound and runs on the blocking pool.

use std::io::{Cursor, Read};

use bytes::Bytes;
use quick_xml::events::Event;
use quick_xml::Reader;
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("{0}")]
    Pdf(String),

    #[error("{0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Xml(#[from] quick_xml::Error),

    #[error("extraction worker failed: {0}")]
    Worker(String),
}

/// Upload format, decided by file extension only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Docx,
    PlainText,
}

impl DocumentKind {
    pub fn from_file_name(file_name: &str) -> Self {
        let lower = file_name.to_ascii_lowercase();
        if lower.ends_with(".pdf") {
            DocumentKind::Pdf
        } else if lower.ends_with(".docx") {
            DocumentKind::Docx
        } else {
            DocumentKind::PlainText
        }
    }

    fn label(self) -> &'static str {
        match self {
            DocumentKind::Pdf => "PDF",
            DocumentKind::Docx => "DOCX",
            DocumentKind::PlainText => "text",
        }
    }
}

/// Extracts text from an uploaded file, substituting an error marker on failure.
pub async fn extract_text(file_name: &str, bytes: Bytes) -> String {
    let kind = DocumentKind::from_file_name(file_name);

    let result = match kind {
        // Non-UTF-8 plain uploads yield nothing rather than a marker.
        DocumentKind::PlainText => return String::from_utf8(bytes.to_vec()).unwrap_or_default(),
        DocumentKind::Pdf => run_blocking(move || extract_pdf(&bytes)).await,
        DocumentKind::Docx => run_blocking(move || extract_docx(&bytes)).await,
    };

    match result {
        Ok(text) => text,
        Err(e) => {
            warn!("Failed to extract {} from '{}': {e}", kind.label(), file_name);
            format!("[Error reading {}: {e}]", kind.label())
        }
    }
}

async fn run_blocking<F>(job: F) -> Result<String, ExtractError>
where
    F: FnOnce() -> Result<String, ExtractError> + Send + 'static,
{
    // A panicking parser surfaces as a JoinError rather than tearing down the worker.
    tokio::task::spawn_blocking(job)
        .await
        .map_err(|e| ExtractError::Worker(e.to_string()))?
}

fn extract_pdf(bytes: &[u8]) -> Result<String, ExtractError> {
    pdf_extract::extract_text_from_mem(bytes).map_err(|e| ExtractError::Pdf(e.to_string()))
}

fn extract_docx(bytes: &[u8]) -> Result<String, ExtractError> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))?;
    let mut xml = String::new();
    archive
        .by_name("word/document.xml")?
        .read_to_string(&mut xml)?;
    document_xml_to_text(&xml)
}

/// Collects `<w:t>` text from WordprocessingML, one line per `<w:p>` paragraph.
///
/// Tabs and breaks count only inside a run; `<w:tab/>` also appears in
/// paragraph tab-stop definitions.
fn document_xml_to_text(xml: &str) -> Result<String, ExtractError> {
    let mut reader = Reader::from_str(xml);
    let mut out = String::new();
    let mut in_run = false;
    let mut in_text = false;

    loop {
        match reader.read_event()? {
            Event::Start(e) => match e.name().as_ref() {
                b"w:r" => in_run = true,
                b"w:t" => in_text = true,
                _ => {}
            },
            Event::End(e) => match e.name().as_ref() {
                b"w:r" => in_run = false,
                b"w:t" => in_text = false,
                b"w:p" => out.push('\n'),
                _ => {}
            },
            Event::Empty(e) => match e.name().as_ref() {
                b"w:p" => out.push('\n'),
                b"w:tab" if in_run => out.push('\t'),
                b"w:br" | b"w:cr" if in_run => out.push('\n'),
                _ => {}
            },
            Event::Text(text) if in_text => out.push_str(&text.unescape()?),
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn docx_with(document_xml: &str) -> Bytes {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        writer
            .start_file("word/document.xml", zip::write::FileOptions::default())
            .unwrap();
        writer.write_all(document_xml.as_bytes()).unwrap();
        Bytes::from(writer.finish().unwrap().into_inner())
    }

    #[test]
    fn test_kind_from_extension_is_case_insensitive() {
        assert_eq!(DocumentKind::from_file_name("CV.PDF"), DocumentKind::Pdf);
        assert_eq!(DocumentKind::from_file_name("letter.docx"), DocumentKind::Docx);
        assert_eq!(DocumentKind::from_file_name("notes.md"), DocumentKind::PlainText);
        assert_eq!(DocumentKind::from_file_name("resume"), DocumentKind::PlainText);
    }

    #[test]
    fn test_document_xml_paragraphs_and_entities() {
        let xml = r#"<w:document><w:body>
            <w:p><w:r><w:t>Jane &amp; Co</w:t></w:r><w:r><w:t xml:space="preserve"> engineer</w:t></w:r></w:p>
            <w:p><w:r><w:t>Rust</w:t><w:tab/><w:t>&lt;3</w:t></w:r></w:p>
            <w:p><w:r><w:t/></w:r></w:p>
        </w:body></w:document>"#;
        assert_eq!(
            document_xml_to_text(xml).unwrap(),
            "Jane & Co engineer\nRust\t<3\n\n"
        );
    }

    #[test]
    fn test_table_tags_are_not_text() {
        let xml = "<w:tbl><w:tr><w:tc><w:p><w:r><w:t>cell</w:t></w:r></w:p></w:tc></w:tr></w:tbl>";
        assert_eq!(document_xml_to_text(xml).unwrap(), "cell\n");
    }

    #[test]
    fn test_numeric_character_references_are_decoded() {
        let xml = "<w:p><w:r><w:t>It&#8217;s &#x2013; done</w:t></w:r></w:p>";
        assert_eq!(document_xml_to_text(xml).unwrap(), "It\u{2019}s \u{2013} done\n");
    }

    #[test]
    fn test_self_closing_paragraph_is_a_blank_line() {
        let xml = "<w:p><w:r><w:t>A</w:t></w:r></w:p><w:p/><w:p><w:r><w:t>B</w:t></w:r></w:p>";
        assert_eq!(document_xml_to_text(xml).unwrap(), "A\n\nB\n");
    }

    #[test]
    fn test_tab_stop_definitions_are_not_text() {
        let xml = r#"<w:p><w:pPr><w:tabs><w:tab w:val="left" w:pos="720"/></w:tabs></w:pPr><w:r><w:t>Skills</w:t><w:tab/><w:t>Rust</w:t></w:r></w:p>"#;
        assert_eq!(document_xml_to_text(xml).unwrap(), "Skills\tRust\n");
    }

    #[tokio::test]
    async fn test_plain_text_upload_is_decoded() {
        let text = extract_text("resume.txt", Bytes::from_static(b"Jane Doe\nRust")).await;
        assert_eq!(text, "Jane Doe\nRust");
    }

    #[tokio::test]
    async fn test_invalid_utf8_plain_upload_is_empty() {
        let text = extract_text("resume.txt", Bytes::from_static(&[0xff, 0xfe, 0x00])).await;
        assert_eq!(text, "");
    }

    #[tokio::test]
    async fn test_docx_upload_is_extracted() {
        let bytes = docx_with("<w:p><w:r><w:t>Hello</w:t></w:r></w:p>");
        assert_eq!(extract_text("cover.docx", bytes).await, "Hello\n");
    }

    #[tokio::test]
    async fn test_corrupt_docx_becomes_marker() {
        let text = extract_text("cover.docx", Bytes::from_static(b"not a zip")).await;
        assert!(text.starts_with("[Error reading DOCX: "), "got {text}");
        assert!(text.ends_with(']'));
    }

    #[tokio::test]
    async fn test_corrupt_pdf_becomes_marker() {
        let text = extract_text("resume.pdf", Bytes::from_static(b"%PDF-garbage")).await;
        assert!(text.starts_with("[Error reading PDF: "), "got {text}");
    }
}
