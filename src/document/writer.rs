/*!
 * Serializing the document model into a `.docx` package.
 *
 * The package holds the minimum set of parts Word needs: content types,
 * relationships, the main document and a styles part (the source styles when
 * available). Files are written to a temporary sibling and renamed into place
 * so a reader never observes a half-written output.
 */

use log::debug;
use quick_xml::escape::escape;
use std::fmt::Write as _;
use std::fs;
use std::io::{Cursor, Seek, Write};
use std::path::Path;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use super::model::{Block, Document, Paragraph, Run, Table, TableBorders};
use super::reader::{DOCUMENT_PART, STYLES_PART, W_NS};
use crate::errors::SerializationError;

/// Usable text width of a Letter page with 1" margins, in twentieths of a point
const TEXT_WIDTH_TWIPS: usize = 9360;

const CONTENT_TYPES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
  <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
  <Default Extension="xml" ContentType="application/xml"/>
  <Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/>
  <Override PartName="/word/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml"/>
</Types>"#;

const PACKAGE_RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/>
</Relationships>"#;

const DOCUMENT_RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/>
</Relationships>"#;

const DEFAULT_STYLES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:styles xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:style w:type="paragraph" w:default="1" w:styleId="Normal">
    <w:name w:val="Normal"/>
    <w:qFormat/>
  </w:style>
  <w:style w:type="table" w:default="1" w:styleId="TableNormal">
    <w:name w:val="Normal Table"/>
    <w:tblPr>
      <w:tblInd w:w="0" w:type="dxa"/>
      <w:tblCellMar>
        <w:top w:w="0" w:type="dxa"/>
        <w:left w:w="108" w:type="dxa"/>
        <w:bottom w:w="0" w:type="dxa"/>
        <w:right w:w="108" w:type="dxa"/>
      </w:tblCellMar>
    </w:tblPr>
  </w:style>
</w:styles>"#;

const SECTION_PROPERTIES_XML: &str = r#"<w:sectPr><w:pgSz w:w="12240" w:h="15840"/><w:pgMar w:top="1440" w:right="1440" w:bottom="1440" w:left="1440" w:header="720" w:footer="720" w:gutter="0"/><w:cols w:space="720"/></w:sectPr>"#;

/// Writer for `.docx` packages
pub struct DocxWriter;

impl DocxWriter {
    /// Write `document` to `path`, replacing any existing file.
    pub fn save<P: AsRef<Path>>(document: &Document, path: P) -> Result<(), SerializationError> {
        let path = path.as_ref();
        let directory = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(directory)?;

        let mut staging = tempfile::Builder::new()
            .prefix(".bidocx-")
            .suffix(".tmp")
            .tempfile_in(directory)?;
        Self::write_package(document, staging.as_file_mut())?;
        staging.as_file().sync_all()?;

        staging.persist(path).map_err(|e| SerializationError::Persist {
            path: path.to_path_buf(),
            reason: e.error.to_string(),
        })?;

        debug!("Wrote {} block(s) to {:?}", document.blocks.len(), path);
        Ok(())
    }

    /// Serialize `document` into an in-memory package.
    pub fn to_bytes(document: &Document) -> Result<Vec<u8>, SerializationError> {
        let mut buffer = Cursor::new(Vec::new());
        Self::write_package(document, &mut buffer)?;
        Ok(buffer.into_inner())
    }

    fn write_package<W: Write + Seek>(document: &Document, writer: W) -> Result<(), SerializationError> {
        let mut zip = ZipWriter::new(writer);
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

        let document_xml = render_document_xml(document);
        let styles_xml = document
            .styles_part
            .as_deref()
            .unwrap_or(DEFAULT_STYLES_XML.as_bytes());

        let parts: [(&str, &[u8]); 5] = [
            ("[Content_Types].xml", CONTENT_TYPES_XML.as_bytes()),
            ("_rels/.rels", PACKAGE_RELS_XML.as_bytes()),
            (DOCUMENT_PART, document_xml.as_bytes()),
            ("word/_rels/document.xml.rels", DOCUMENT_RELS_XML.as_bytes()),
            (STYLES_PART, styles_xml),
        ];

        for (name, content) in parts {
            zip.start_file(name, options).map_err(archive_error)?;
            zip.write_all(content)?;
        }

        zip.finish().map_err(archive_error)?;
        Ok(())
    }
}

fn archive_error(error: zip::result::ZipError) -> SerializationError {
    SerializationError::Archive(error.to_string())
}

/// Render the main document part.
pub fn render_document_xml(document: &Document) -> String {
    let mut body = String::new();

    for block in &document.blocks {
        match block {
            Block::Paragraph(paragraph) => write_paragraph(&mut body, paragraph),
            Block::Table(table) => write_table(&mut body, table),
        }
    }

    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="{W_NS}" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><w:body>{body}{SECTION_PROPERTIES_XML}</w:body></w:document>"#
    )
}

fn write_paragraph(out: &mut String, paragraph: &Paragraph) {
    out.push_str("<w:p>");

    if paragraph.style.is_some() || paragraph.alignment.is_some() {
        out.push_str("<w:pPr>");
        if let Some(style) = &paragraph.style {
            let _ = write!(out, r#"<w:pStyle w:val="{}"/>"#, escape(style.as_str()));
        }
        if let Some(alignment) = paragraph.alignment {
            let _ = write!(out, r#"<w:jc w:val="{}"/>"#, alignment.as_ooxml());
        }
        out.push_str("</w:pPr>");
    }

    for run in &paragraph.runs {
        write_run(out, run);
    }

    out.push_str("</w:p>");
}

fn write_run(out: &mut String, run: &Run) {
    out.push_str("<w:r>");

    let format = &run.format;
    if !format.is_plain() {
        // Child order follows the CT_RPr schema sequence
        out.push_str("<w:rPr>");
        if let Some(font) = &format.font {
            let font = escape(font.as_str());
            let _ = write!(out, r#"<w:rFonts w:ascii="{font}" w:hAnsi="{font}" w:cs="{font}"/>"#);
        }
        if let Some(bold) = format.bold {
            write_toggle(out, "b", bold);
        }
        if let Some(italic) = format.italic {
            write_toggle(out, "i", italic);
        }
        if let Some(color) = &format.color {
            let _ = write!(out, r#"<w:color w:val="{}"/>"#, escape(color.as_str()));
        }
        if let Some(size) = format.size {
            let _ = write!(out, r#"<w:sz w:val="{size}"/><w:szCs w:val="{size}"/>"#);
        }
        if let Some(underline) = format.underline {
            let value = if underline { "single" } else { "none" };
            let _ = write!(out, r#"<w:u w:val="{value}"/>"#);
        }
        out.push_str("</w:rPr>");
    }

    write_run_text(out, &run.text);
    out.push_str("</w:r>");
}

fn write_toggle(out: &mut String, name: &str, on: bool) {
    if on {
        let _ = write!(out, "<w:{name}/>");
    } else {
        let _ = write!(out, r#"<w:{name} w:val="0"/>"#);
    }
}

/// Emit run content, turning newlines into breaks and tabs into tab stops.
fn write_run_text(out: &mut String, text: &str) {
    let mut pending = String::new();

    for ch in text.chars() {
        match ch {
            '\n' => {
                flush_text(out, &mut pending);
                out.push_str("<w:br/>");
            }
            '\t' => {
                flush_text(out, &mut pending);
                out.push_str("<w:tab/>");
            }
            // Not representable in XML 1.0
            c if c.is_control() => {}
            c => pending.push(c),
        }
    }

    flush_text(out, &mut pending);
}

fn flush_text(out: &mut String, pending: &mut String) {
    if !pending.is_empty() {
        let _ = write!(out, r#"<w:t xml:space="preserve">{}</w:t>"#, escape(pending.as_str()));
        pending.clear();
    }
}

fn write_table(out: &mut String, table: &Table) {
    let columns = table.column_count();
    if columns == 0 {
        return;
    }
    let column_width = TEXT_WIDTH_TWIPS / columns;

    out.push_str("<w:tbl><w:tblPr>");
    out.push_str(r#"<w:tblW w:w="0" w:type="auto"/>"#);
    if let Some(borders) = &table.borders {
        write_borders(out, borders);
    }
    out.push_str(r#"<w:tblLook w:val="04A0" w:firstRow="1" w:lastRow="0" w:firstColumn="1" w:lastColumn="0" w:noHBand="0" w:noVBand="1"/>"#);
    out.push_str("</w:tblPr><w:tblGrid>");
    for _ in 0..columns {
        let _ = write!(out, r#"<w:gridCol w:w="{column_width}"/>"#);
    }
    out.push_str("</w:tblGrid>");

    for row in &table.rows {
        out.push_str("<w:tr>");
        for cell in &row.cells {
            let _ = write!(out, r#"<w:tc><w:tcPr><w:tcW w:w="{column_width}" w:type="dxa"/></w:tcPr>"#);
            if cell.paragraphs.is_empty() {
                // A cell must end with a paragraph
                out.push_str("<w:p/>");
            }
            for paragraph in &cell.paragraphs {
                write_paragraph(out, paragraph);
            }
            out.push_str("</w:tc>");
        }
        out.push_str("</w:tr>");
    }

    out.push_str("</w:tbl>");
}

fn write_borders(out: &mut String, borders: &TableBorders) {
    out.push_str("<w:tblBorders>");
    for edge in TableBorders::EDGES {
        let _ = write!(
            out,
            r#"<w:{edge} w:val="single" w:sz="{}" w:space="{}" w:color="{}"/>"#,
            borders.size,
            borders.space,
            escape(borders.color.as_str())
        );
    }
    out.push_str("</w:tblBorders>");
}
