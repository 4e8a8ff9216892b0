//! DOCX container reading.
//!
//! A DOCX file is a ZIP archive whose `word/document.xml` member holds
//! the WordprocessingML body. Output is the non-empty body paragraphs in
//! order (whitespace-only paragraphs are skipped), followed by the text
//! of each table cell.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use quick_xml::Reader;
use quick_xml::events::Event;

use cvparse_core::BackendError;

/// Extract the plain text of a DOCX file.
pub fn read_docx(path: &Path) -> Result<String, BackendError> {
    let file = File::open(path)?;
    let mut archive = zip::ZipArchive::new(file)
        .map_err(|e| BackendError::Open(format!("not a DOCX container: {e}")))?;
    let document = archive
        .by_name("word/document.xml")
        .map_err(|e| BackendError::Open(format!("word/document.xml missing: {e}")))?;
    parse_document_xml(BufReader::new(document))
}

/// Walk the WordprocessingML event stream.
///
/// Table nesting is tracked with a depth counter so paragraphs inside
/// cells land in the cell text, not the body text. `w:tab` and `w:br`
/// become a tab and a newline, matching how the runs render.
fn parse_document_xml<R: BufRead>(reader: R) -> Result<String, BackendError> {
    let mut xml_reader = Reader::from_reader(reader);

    let mut buf = Vec::new();

    let mut paragraphs: Vec<String> = Vec::new();
    let mut cells: Vec<String> = Vec::new();

    let mut current_para = String::new();
    let mut cell_paras: Vec<String> = Vec::new();

    let mut table_depth: u32 = 0;
    let mut in_text = false;

    loop {
        match xml_reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => match e.local_name().as_ref() {
                b"tbl" => table_depth += 1,
                b"tc" => cell_paras.clear(),
                b"p" => current_para.clear(),
                b"t" => in_text = true,
                b"br" => current_para.push('\n'),
                _ => {}
            },
            Ok(Event::Empty(ref e)) => match e.local_name().as_ref() {
                b"tab" => current_para.push('\t'),
                b"br" => current_para.push('\n'),
                _ => {}
            },
            Ok(Event::Text(ref e)) => {
                if in_text {
                    current_para.push_str(&e.unescape().unwrap_or_default());
                }
            }
            Ok(Event::End(ref e)) => match e.local_name().as_ref() {
                b"tbl" => table_depth = table_depth.saturating_sub(1),
                b"t" => in_text = false,
                b"p" => {
                    // Empty and whitespace-only paragraphs carry no text.
                    if !current_para.trim().is_empty() {
                        if table_depth == 0 {
                            paragraphs.push(current_para.clone());
                        } else {
                            cell_paras.push(current_para.clone());
                        }
                    }
                    current_para.clear();
                }
                b"tc" => {
                    let cell = cell_paras.join("\n");
                    let cell = cell.trim();
                    if !cell.is_empty() {
                        cells.push(cell.to_string());
                    }
                    cell_paras.clear();
                }
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(BackendError::Extraction(format!(
                    "malformed document.xml: {e}"
                )));
            }
            _ => {}
        }
        buf.clear();
    }

    let mut parts = paragraphs;
    parts.extend(cells);
    Ok(parts.join("\n").trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};

    fn parse(body: &str) -> String {
        let xml = format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
<w:body>{body}</w:body>
</w:document>"#
        );
        parse_document_xml(Cursor::new(xml)).unwrap()
    }

    #[test]
    fn paragraphs_in_order() {
        let text = parse(
            "<w:p><w:r><w:t>John Smith</w:t></w:r></w:p>\
             <w:p><w:r><w:t>Engineer</w:t></w:r></w:p>",
        );
        assert_eq!(text, "John Smith\nEngineer");
    }

    #[test]
    fn empty_and_whitespace_paragraphs_are_skipped() {
        let text = parse(
            "<w:p><w:r><w:t>John Smith</w:t></w:r></w:p><w:p/>\
             <w:p><w:r><w:t> </w:t></w:r></w:p>\
             <w:p><w:r><w:t>Engineer</w:t></w:r></w:p>",
        );
        assert_eq!(text, "John Smith\nEngineer");
    }

    #[test]
    fn runs_are_concatenated_within_a_paragraph() {
        let text = parse("<w:p><w:r><w:t>Jo</w:t></w:r><w:r><w:t>hn</w:t></w:r></w:p>");
        assert_eq!(text, "John");
    }

    #[test]
    fn tabs_and_breaks_are_rendered() {
        let text = parse("<w:p><w:r><w:t>a</w:t><w:tab/><w:t>b</w:t><w:br/><w:t>c</w:t></w:r></w:p>");
        assert_eq!(text, "a\tb\nc");
    }

    #[test]
    fn entities_are_unescaped() {
        let text = parse("<w:p><w:r><w:t>R&amp;D engineer</w:t></w:r></w:p>");
        assert_eq!(text, "R&D engineer");
    }

    #[test]
    fn table_cells_come_after_body_text() {
        let text = parse(
            "<w:p><w:r><w:t>intro</w:t></w:r></w:p>\
             <w:tbl><w:tr>\
             <w:tc><w:p><w:r><w:t>cell one</w:t></w:r></w:p></w:tc>\
             <w:tc><w:p><w:r><w:t>cell two</w:t></w:r></w:p></w:tc>\
             </w:tr></w:tbl>",
        );
        assert_eq!(text, "intro\ncell one\ncell two");
    }

    #[test]
    fn multi_paragraph_cell_joins_with_newline() {
        let text = parse(
            "<w:tbl><w:tr><w:tc>\
             <w:p><w:r><w:t>x</w:t></w:r></w:p>\
             <w:p><w:r><w:t>y</w:t></w:r></w:p>\
             </w:tc></w:tr></w:tbl>",
        );
        assert_eq!(text, "x\ny");
    }

    #[test]
    fn empty_cells_are_dropped() {
        let text = parse(
            "<w:tbl><w:tr>\
             <w:tc><w:p/></w:tc>\
             <w:tc><w:p><w:r><w:t>kept</w:t></w:r></w:p></w:tc>\
             </w:tr></w:tbl>",
        );
        assert_eq!(text, "kept");
    }

    #[test]
    fn read_docx_roundtrip_through_zip() -> anyhow::Result<()> {
        let xml = r#"<?xml version="1.0"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
<w:body><w:p><w:r><w:t>Packed text</w:t></w:r></w:p></w:body>
</w:document>"#;

        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        writer.start_file("word/document.xml", zip::write::SimpleFileOptions::default())?;
        writer.write_all(xml.as_bytes())?;
        let bytes = writer.finish()?.into_inner();

        let dir = tempfile::tempdir()?;
        let path = dir.path().join("cv.docx");
        std::fs::write(&path, bytes)?;

        assert_eq!(read_docx(&path)?, "Packed text");
        Ok(())
    }

    #[test]
    fn non_zip_file_is_an_open_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.docx");
        std::fs::write(&path, b"not a zip at all").unwrap();
        assert!(matches!(read_docx(&path), Err(BackendError::Open(_))));
    }

    #[test]
    fn zip_without_document_xml_is_an_open_error() {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        writer
            .start_file("other.txt", zip::write::SimpleFileOptions::default())
            .unwrap();
        writer.write_all(b"hi").unwrap();
        let bytes = writer.finish().unwrap().into_inner();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.docx");
        std::fs::write(&path, bytes).unwrap();
        assert!(matches!(read_docx(&path), Err(BackendError::Open(_))));
    }
}
