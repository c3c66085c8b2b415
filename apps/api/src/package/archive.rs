use std::io::{Cursor, Write};

use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::package::PackageError;

/// Zips `(file name, contents)` pairs, in order, into an in-memory archive.
pub fn write_archive<'a, I>(entries: I) -> Result<Vec<u8>, PackageError>
where
    I: IntoIterator<Item = (&'a str, &'a [u8])>,
{
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = FileOptions::default().compression_method(CompressionMethod::Deflated);

    for (name, contents) in entries {
        writer.start_file(name, options)?;
        writer.write_all(contents)?;
    }

    Ok(writer.finish()?.into_inner())
}

#[cfg(test)]
mod tests {
    use std::io::Read;

    use super::*;

    #[test]
    fn test_archive_contains_entries_in_order() {
        let bytes = write_archive([
            ("Acme_Eng_Resume.docx", b"resume".as_slice()),
            ("Acme_Eng_Notes.docx", b"notes".as_slice()),
        ])
        .unwrap();

        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        assert_eq!(archive.len(), 2);
        assert_eq!(archive.by_index(0).unwrap().name(), "Acme_Eng_Resume.docx");

        let mut notes = String::new();
        archive
            .by_name("Acme_Eng_Notes.docx")
            .unwrap()
            .read_to_string(&mut notes)
            .unwrap();
        assert_eq!(notes, "notes");
    }

    #[test]
    fn test_empty_archive_is_valid() {
        let bytes = write_archive(std::iter::empty()).unwrap();
        let archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        assert_eq!(archive.len(), 0);
    }
}
