/*!
 * Common test utilities for the bidocx test suite
 */

#![allow(dead_code)]

use anyhow::Result;
use async_trait::async_trait;
use parking_lot::Mutex;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use bidocx::errors::{ProviderError, TranslationError};
use bidocx::language_utils::LanguagePair;
use bidocx::translation::Translator;

const W_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

/// Route `log` output through the test harness; safe to call more than once
pub fn init_test_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// A `<w:p>` holding one plain run
pub fn paragraph_xml(text: &str) -> String {
    if text.is_empty() {
        return "<w:p/>".to_string();
    }
    format!(
        r#"<w:p><w:r><w:t xml:space="preserve">{}</w:t></w:r></w:p>"#,
        text
    )
}

/// A `<w:tbl>` with one plain paragraph per cell
pub fn table_xml(rows: &[&[&str]]) -> String {
    let columns = rows.iter().map(|r| r.len()).max().unwrap_or(0);
    let mut xml = String::from("<w:tbl><w:tblGrid>");
    for _ in 0..columns {
        xml.push_str(r#"<w:gridCol w:w="2000"/>"#);
    }
    xml.push_str("</w:tblGrid>");
    for row in rows {
        xml.push_str("<w:tr>");
        for cell in row.iter() {
            xml.push_str("<w:tc>");
            xml.push_str(&paragraph_xml(cell));
            xml.push_str("</w:tc>");
        }
        xml.push_str("</w:tr>");
    }
    xml.push_str("</w:tbl>");
    xml
}

/// Wrap body content in a complete main document part
pub fn document_xml(body: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><w:document xmlns:w="{}"><w:body>{}</w:body></w:document>"#,
        W_NS, body
    )
}

/// Write a minimal `.docx` package whose body is `body`
pub fn create_docx(dir: &Path, filename: &str, body: &str) -> Result<PathBuf> {
    let path = dir.join(filename);
    let mut zip = ZipWriter::new(File::create(&path)?);
    let options = SimpleFileOptions::default();

    zip.start_file("[Content_Types].xml", options)?;
    zip.write_all(
        br#"<?xml version="1.0" encoding="UTF-8"?><Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/></Types>"#,
    )?;
    zip.start_file("word/document.xml", options)?;
    zip.write_all(document_xml(body).as_bytes())?;
    zip.finish()?;

    Ok(path)
}

/// Translator that records every request and answers `"[target] text"`
#[derive(Debug, Default)]
pub struct RecordingTranslator {
    requests: Mutex<Vec<String>>,
    fail_on: Option<String>,
}

impl RecordingTranslator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail every request for `text`
    pub fn failing_on(text: &str) -> Self {
        Self {
            requests: Mutex::new(Vec::new()),
            fail_on: Some(text.to_string()),
        }
    }

    /// Texts requested so far, in request order
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().clone()
    }
}

#[async_trait]
impl Translator for RecordingTranslator {
    async fn translate(&self, text: &str, languages: &LanguagePair) -> Result<String, TranslationError> {
        self.requests.lock().push(text.to_string());

        if self.fail_on.as_deref() == Some(text) {
            return Err(ProviderError::ApiError {
                status_code: 503,
                message: "unavailable".to_string(),
            }
            .into());
        }

        Ok(format!("[{}] {}", languages.target, text))
    }
}
