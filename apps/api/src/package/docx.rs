//! Minimal WordprocessingML writer for `DocumentModel`.
//!
//! Run styling: Bold → `<w:b/>`, Inserted → green, Deleted → red (not struck).
//! Headings and bullets use named styles declared in `word/styles.xml`.

use crate::package::archive::write_archive;
use crate::package::PackageError;
use crate::render::{Block, DocumentModel, Run, RunStyle};

const INSERTED_COLOR: &str = "008000";
const DELETED_COLOR: &str = "FF0000";
const BULLET_GLYPH: &str = "\u{2022}\t";

const CONTENT_TYPES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/><Override PartName="/word/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml"/></Types>"#;

const PACKAGE_RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/></Relationships>"#;

const DOCUMENT_RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/></Relationships>"#;

const STYLES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:styles xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:style w:type="paragraph" w:default="1" w:styleId="Normal"><w:name w:val="Normal"/><w:pPr><w:spacing w:after="120"/></w:pPr><w:rPr><w:sz w:val="22"/></w:rPr></w:style><w:style w:type="paragraph" w:styleId="Heading1"><w:name w:val="heading 1"/><w:basedOn w:val="Normal"/><w:next w:val="Normal"/><w:pPr><w:keepNext/><w:spacing w:before="240" w:after="120"/><w:outlineLvl w:val="0"/></w:pPr><w:rPr><w:b/><w:sz w:val="32"/></w:rPr></w:style><w:style w:type="paragraph" w:styleId="Heading2"><w:name w:val="heading 2"/><w:basedOn w:val="Normal"/><w:next w:val="Normal"/><w:pPr><w:keepNext/><w:spacing w:before="200" w:after="80"/><w:outlineLvl w:val="1"/></w:pPr><w:rPr><w:b/><w:sz w:val="26"/></w:rPr></w:style><w:style w:type="paragraph" w:styleId="ListBullet"><w:name w:val="List Bullet"/><w:basedOn w:val="Normal"/><w:pPr><w:spacing w:after="40"/><w:ind w:left="360" w:hanging="360"/></w:pPr></w:style></w:styles>"#;

const DOCUMENT_OPEN: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>"#;
const DOCUMENT_CLOSE: &str = "</w:body></w:document>";

/// Serializes a document model into `.docx` bytes.
pub fn write_docx(doc: &DocumentModel) -> Result<Vec<u8>, PackageError> {
    let document_xml = document_xml(doc);

    write_archive([
        ("[Content_Types].xml", CONTENT_TYPES_XML.as_bytes()),
        ("_rels/.rels", PACKAGE_RELS_XML.as_bytes()),
        ("word/_rels/document.xml.rels", DOCUMENT_RELS_XML.as_bytes()),
        ("word/styles.xml", STYLES_XML.as_bytes()),
        ("word/document.xml", document_xml.as_bytes()),
    ])
}

fn document_xml(doc: &DocumentModel) -> String {
    let mut xml = String::from(DOCUMENT_OPEN);
    for block in &doc.blocks {
        push_block(&mut xml, block);
    }
    xml.push_str(DOCUMENT_CLOSE);
    xml
}

fn push_block(xml: &mut String, block: &Block) {
    match block {
        Block::Heading { level, runs } => {
            let style = format!("Heading{}", level.level());
            push_paragraph(xml, Some(style.as_str()), None, runs)
        }
        Block::BulletItem { runs } => push_paragraph(xml, Some("ListBullet"), Some(BULLET_GLYPH), runs),
        Block::Paragraph { runs } => push_paragraph(xml, None, None, runs),
        Block::PageBreak => xml.push_str(r#"<w:p><w:r><w:br w:type="page"/></w:r></w:p>"#),
    }
}

fn push_paragraph(xml: &mut String, style: Option<&str>, prefix: Option<&str>, runs: &[Run]) {
    xml.push_str("<w:p>");
    if let Some(style) = style {
        xml.push_str(&format!(r#"<w:pPr><w:pStyle w:val="{style}"/></w:pPr>"#));
    }
    if let Some(prefix) = prefix {
        push_run(xml, &Run::plain(prefix));
    }
    for run in runs {
        push_run(xml, run);
    }
    xml.push_str("</w:p>");
}

fn push_run(xml: &mut String, run: &Run) {
    xml.push_str("<w:r>");
    match run.style {
        RunStyle::Plain => {}
        RunStyle::Bold => xml.push_str("<w:rPr><w:b/></w:rPr>"),
        RunStyle::Inserted => {
            xml.push_str(&format!(r#"<w:rPr><w:color w:val="{INSERTED_COLOR}"/></w:rPr>"#))
        }
        RunStyle::Deleted => {
            xml.push_str(&format!(r#"<w:rPr><w:color w:val="{DELETED_COLOR}"/></w:rPr>"#))
        }
    }
    // Word ignores raw newlines inside <w:t>; emit explicit line breaks.
    for (i, line) in run.text.split('\n').enumerate() {
        if i > 0 {
            xml.push_str("<w:br/>");
        }
        xml.push_str(r#"<w:t xml:space="preserve">"#);
        xml.push_str(&escape_xml(line));
        xml.push_str("</w:t>");
    }
    xml.push_str("</w:r>");
}

fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            // XML 1.0 forbids C0 controls other than tab, LF and CR.
            '\t' => out.push(c),
            c if c < '\u{20}' => {}
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use std::io::{Cursor, Read};

    use super::*;
    use crate::render::{render, HeadingLevel};

    fn read_part(bytes: Vec<u8>, name: &str) -> String {
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        let mut out = String::new();
        archive.by_name(name).unwrap().read_to_string(&mut out).unwrap();
        out
    }

    #[test]
    fn test_docx_has_required_parts() {
        let bytes = write_docx(&DocumentModel::default()).unwrap();
        let archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        let names: Vec<&str> = archive.file_names().collect();
        for part in [
            "[Content_Types].xml",
            "_rels/.rels",
            "word/_rels/document.xml.rels",
            "word/styles.xml",
            "word/document.xml",
        ] {
            assert!(names.contains(&part), "missing {part}");
        }
    }

    #[test]
    fn test_run_styles_are_written() {
        let doc = render("### Experience\n**Lead** - Co\n- <ins>Shipped X</ins>\n- <del>Old duty</del>");
        let xml = read_part(write_docx(&doc).unwrap(), "word/document.xml");

        assert!(xml.contains(r#"<w:pStyle w:val="Heading2"/>"#));
        assert!(xml.contains(r#"<w:rPr><w:b/></w:rPr><w:t xml:space="preserve">Lead</w:t>"#));
        assert!(xml.contains(r#"<w:color w:val="008000"/></w:rPr><w:t xml:space="preserve">Shipped X</w:t>"#));
        assert!(xml.contains(r#"<w:color w:val="FF0000"/></w:rPr><w:t xml:space="preserve">Old duty</w:t>"#));
        assert!(!xml.contains("<w:strike"));
        assert_eq!(xml.matches(r#"<w:pStyle w:val="ListBullet"/>"#).count(), 2);
    }

    #[test]
    fn test_page_break_and_title_heading() {
        let doc = DocumentModel {
            blocks: vec![
                Block::PageBreak,
                Block::Heading {
                    level: HeadingLevel::Title,
                    runs: vec![Run::plain("LLM Thinking Process")],
                },
            ],
        };
        let xml = document_xml(&doc);
        assert!(xml.contains(r#"<w:br w:type="page"/>"#));
        assert!(xml.contains(r#"<w:pStyle w:val="Heading1"/>"#));
    }

    #[test]
    fn test_text_is_escaped_and_newlines_become_breaks() {
        let doc = DocumentModel {
            blocks: vec![Block::Paragraph {
                runs: vec![Run::plain("R&D <team>\r\nline two")],
            }],
        };
        let xml = document_xml(&doc);
        assert!(xml.contains(
            r#"R&amp;D &lt;team&gt;</w:t><w:br/><w:t xml:space="preserve">line two"#
        ));
    }

    #[test]
    fn test_control_characters_are_dropped() {
        let doc = DocumentModel {
            blocks: vec![Block::Paragraph {
                runs: vec![Run::plain("Page one\u{0C}Page two\u{0B}x\u{0}\tend")],
            }],
        };
        let xml = document_xml(&doc);
        assert!(xml.contains("Page onePage twox\tend"));
        assert!(!xml
            .chars()
            .any(|c| c < '\u{20}' && !matches!(c, '\t' | '\n' | '\r')));
    }

    #[test]
    fn test_empty_paragraph_is_kept() {
        let doc = DocumentModel {
            blocks: vec![Block::Paragraph { runs: vec![] }],
        };
        assert!(document_xml(&doc).contains("<w:p></w:p>"));
    }
}
