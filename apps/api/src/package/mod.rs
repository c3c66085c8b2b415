// Packaging: DocumentModel → .docx bytes, and .docx files → one .zip archive.
// Everything stays in memory; nothing touches the filesystem.

pub mod archive;
pub mod docx;

use thiserror::Error;

pub use archive::write_archive;
pub use docx::write_docx;

#[derive(Debug, Error)]
pub enum PackageError {
    #[error("Zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
