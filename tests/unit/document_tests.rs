/*!
 * Tests for loading and saving .docx packages
 */

use bidocx::document::{Alignment, Block, DocxReader, DocxWriter, Document, Paragraph, Run, RunFormat};
use bidocx::errors::LoadError;

use crate::common;

#[test]
fn test_load_with_missing_file_should_return_not_found() {
    let temp_dir = common::create_temp_dir().unwrap();
    let result = DocxReader::load(temp_dir.path().join("absent.docx"));
    assert!(matches!(result, Err(LoadError::NotFound(_))));
}

#[test]
fn test_load_with_plain_text_file_should_return_archive_error() {
    let temp_dir = common::create_temp_dir().unwrap();
    let path = common::create_test_file(temp_dir.path(), "fake.docx", "not a zip").unwrap();
    assert!(matches!(DocxReader::load(&path), Err(LoadError::Archive(_))));
}

#[test]
fn test_load_with_malformed_xml_should_return_xml_error() {
    let temp_dir = common::create_temp_dir().unwrap();
    let path = common::create_docx(temp_dir.path(), "broken.docx", "<w:p><w:r>").unwrap();
    assert!(matches!(DocxReader::load(&path), Err(LoadError::Xml(_))));
}

#[test]
fn test_load_should_keep_body_order_of_paragraphs_and_tables() {
    let temp_dir = common::create_temp_dir().unwrap();
    let body = format!(
        "{}{}{}",
        common::paragraph_xml("Intro"),
        common::table_xml(&[&["Name", "42"], &["Price", "19.99"]]),
        common::paragraph_xml("Outro"),
    );
    let path = common::create_docx(temp_dir.path(), "mixed.docx", &body).unwrap();

    let document = DocxReader::load(&path).unwrap();

    assert_eq!(document.blocks.len(), 3);
    assert!(matches!(&document.blocks[0], Block::Paragraph(p) if p.text() == "Intro"));
    assert!(matches!(&document.blocks[2], Block::Paragraph(p) if p.text() == "Outro"));
    let table = document.tables().next().unwrap();
    assert_eq!(table.row_count(), 2);
    assert_eq!(table.column_count(), 2);
    assert_eq!(table.cell(1, 1).unwrap().text(), "19.99");
    assert!(document.styles_part.is_none());
}

#[test]
fn test_load_should_read_run_formatting() {
    let temp_dir = common::create_temp_dir().unwrap();
    let body = r#"<w:p><w:pPr><w:pStyle w:val="Title"/><w:jc w:val="center"/></w:pPr><w:r><w:rPr><w:rFonts w:ascii="Arial"/><w:b/><w:i w:val="0"/><w:color w:val="FF0000"/><w:sz w:val="28"/><w:u w:val="single"/></w:rPr><w:t>Red</w:t></w:r><w:hyperlink><w:r><w:t xml:space="preserve"> link</w:t></w:r></w:hyperlink></w:p>"#;
    let path = common::create_docx(temp_dir.path(), "formatted.docx", body).unwrap();

    let document = DocxReader::load(&path).unwrap();
    let paragraph = document.paragraphs().next().unwrap();

    assert_eq!(paragraph.style.as_deref(), Some("Title"));
    assert_eq!(paragraph.alignment, Some(Alignment::Center));
    assert_eq!(paragraph.runs.len(), 2);
    assert_eq!(
        paragraph.runs[0].format,
        RunFormat {
            bold: Some(true),
            italic: Some(false),
            underline: Some(true),
            size: Some(28),
            font: Some("Arial".to_string()),
            color: Some("FF0000".to_string()),
        }
    );
    assert_eq!(paragraph.text(), "Red link");
}

#[test]
fn test_save_then_load_should_preserve_paragraphs() {
    let temp_dir = common::create_temp_dir().unwrap();
    let path = temp_dir.path().join("out").join("saved.docx");

    let mut document = Document::new();
    let paragraph = document.add_paragraph(Paragraph::styled(Some("Heading1".to_string()), Some(Alignment::Right)));
    paragraph.add_run(Run {
        text: "A & B <c>".to_string(),
        format: RunFormat {
            underline: Some(true),
            ..RunFormat::default()
        },
    });
    paragraph.add_run(Run::line_break());

    DocxWriter::save(&document, &path).unwrap();
    let loaded = DocxReader::load(&path).unwrap();

    assert_eq!(loaded.blocks, document.blocks);
    assert!(loaded.styles_part.is_some());
}
