/*!
 * End-to-end tests for building bilingual documents
 */

use std::sync::Arc;

use bidocx::app_config::FailurePolicy;
use bidocx::document::{Alignment, Block, DocxReader, DocxWriter, Paragraph, RunFormat};
use bidocx::errors::TranslationError;
use bidocx::language_utils::LanguagePair;
use bidocx::providers::mock::MockProvider;
use bidocx::rebuilder::Rebuilder;

use crate::common::{self, RecordingTranslator};

fn rebuilder_with(translator: Arc<RecordingTranslator>, policy: FailurePolicy) -> Rebuilder {
    Rebuilder::new(translator, LanguagePair::default(), 4, policy)
}

#[tokio::test]
async fn test_single_paragraph_should_become_translation_then_original() {
    let temp_dir = common::create_temp_dir().unwrap();
    let input = common::create_docx(temp_dir.path(), "hello.docx", &common::paragraph_xml("Hello world")).unwrap();
    let output = temp_dir.path().join("hello.hi.docx");

    let source = DocxReader::load(&input).unwrap();
    let bilingual = rebuilder_with(Arc::new(RecordingTranslator::new()), FailurePolicy::Fallback)
        .rebuild(&source)
        .await
        .unwrap();
    DocxWriter::save(&bilingual, &output).unwrap();

    let reloaded = DocxReader::load(&output).unwrap();
    let texts: Vec<String> = reloaded.paragraphs().map(Paragraph::text).collect();
    assert_eq!(texts, vec!["[hi] Hello world\n", "Hello world"]);
}

#[tokio::test]
async fn test_blank_paragraph_should_produce_nothing() {
    let temp_dir = common::create_temp_dir().unwrap();
    let body = format!("{}{}", common::paragraph_xml(""), common::paragraph_xml("   "));
    let input = common::create_docx(temp_dir.path(), "blank.docx", &body).unwrap();

    let translator = Arc::new(RecordingTranslator::new());
    let source = DocxReader::load(&input).unwrap();
    let bilingual = rebuilder_with(translator.clone(), FailurePolicy::Fallback)
        .rebuild(&source)
        .await
        .unwrap();

    assert!(bilingual.blocks.is_empty());
    assert!(translator.requests().is_empty());
}

#[tokio::test]
async fn test_table_should_translate_labels_and_keep_numbers() {
    let temp_dir = common::create_temp_dir().unwrap();
    let body = common::table_xml(&[&["Name", "42"], &["Price", "19.99"], &["-3.14", "0"]]);
    let input = common::create_docx(temp_dir.path(), "table.docx", &body).unwrap();
    let output = temp_dir.path().join("table.hi.docx");

    let translator = Arc::new(RecordingTranslator::new());
    let source = DocxReader::load(&input).unwrap();
    let bilingual = rebuilder_with(translator.clone(), FailurePolicy::Fallback)
        .rebuild(&source)
        .await
        .unwrap();
    DocxWriter::save(&bilingual, &output).unwrap();

    let reloaded = DocxReader::load(&output).unwrap();
    let table = reloaded.tables().next().unwrap();
    assert_eq!(table.row_count(), 3);
    assert_eq!(table.column_count(), 2);
    assert_eq!(table.cell(0, 0).unwrap().text(), "[hi] Name\nName");
    assert_eq!(table.cell(0, 1).unwrap().text(), "42");
    assert_eq!(table.cell(1, 0).unwrap().text(), "[hi] Price\nPrice");
    assert_eq!(table.cell(1, 1).unwrap().text(), "19.99");
    assert_eq!(table.cell(2, 0).unwrap().text(), "-3.14");
    assert_eq!(table.cell(2, 1).unwrap().text(), "0");

    let mut requested = translator.requests();
    requested.sort();
    assert_eq!(requested, vec!["Name", "Price"]);
}

#[tokio::test]
async fn test_run_formatting_should_survive_in_original_paragraph() {
    let temp_dir = common::create_temp_dir().unwrap();
    let body = r#"<w:p><w:pPr><w:pStyle w:val="Heading2"/><w:jc w:val="both"/></w:pPr><w:r><w:rPr><w:b/></w:rPr><w:t xml:space="preserve">Bold </w:t></w:r><w:r><w:rPr><w:i/><w:color w:val="1F4E79"/></w:rPr><w:t>italic</w:t></w:r></w:p>"#;
    let input = common::create_docx(temp_dir.path(), "runs.docx", body).unwrap();
    let output = temp_dir.path().join("runs.hi.docx");

    let source = DocxReader::load(&input).unwrap();
    let bilingual = rebuilder_with(Arc::new(RecordingTranslator::new()), FailurePolicy::Fallback)
        .rebuild(&source)
        .await
        .unwrap();
    DocxWriter::save(&bilingual, &output).unwrap();

    let reloaded = DocxReader::load(&output).unwrap();
    let paragraphs: Vec<&Paragraph> = reloaded.paragraphs().collect();
    assert_eq!(paragraphs.len(), 2);

    let translated = paragraphs[0];
    assert_eq!(translated.style.as_deref(), Some("Heading2"));
    assert_eq!(translated.alignment, Some(Alignment::Justify));
    assert!(translated.runs.iter().all(|r| r.format.is_plain()));

    let original = paragraphs[1];
    let source_paragraph = source.paragraphs().next().unwrap();
    assert_eq!(original, source_paragraph);
    assert_eq!(
        original.runs[1].format,
        RunFormat {
            italic: Some(true),
            color: Some("1F4E79".to_string()),
            ..RunFormat::default()
        }
    );
}

#[tokio::test]
async fn test_failed_unit_with_fallback_should_keep_original_only() {
    common::init_test_logging();
    let temp_dir = common::create_temp_dir().unwrap();
    let body = format!(
        "{}{}{}",
        common::paragraph_xml("Keep me"),
        common::paragraph_xml("Translate me"),
        common::table_xml(&[&["Keep me", "7"]]),
    );
    let input = common::create_docx(temp_dir.path(), "partial.docx", &body).unwrap();

    let source = DocxReader::load(&input).unwrap();
    let bilingual = rebuilder_with(Arc::new(RecordingTranslator::failing_on("Keep me")), FailurePolicy::Fallback)
        .rebuild(&source)
        .await
        .unwrap();

    let texts: Vec<String> = bilingual.paragraphs().map(Paragraph::text).collect();
    assert_eq!(texts, vec!["Keep me", "[hi] Translate me\n", "Translate me"]);

    let table = bilingual.tables().next().unwrap();
    assert_eq!(table.cell(0, 0).unwrap().text(), "Keep me");
    assert_eq!(table.cell(0, 1).unwrap().text(), "7");
}

#[tokio::test]
async fn test_failed_unit_with_abort_should_fail_the_run() {
    let temp_dir = common::create_temp_dir().unwrap();
    let body = format!("{}{}", common::paragraph_xml("One"), common::paragraph_xml("Two"));
    let input = common::create_docx(temp_dir.path(), "abort.docx", &body).unwrap();

    let source = DocxReader::load(&input).unwrap();
    let result = rebuilder_with(Arc::new(RecordingTranslator::failing_on("Two")), FailurePolicy::Abort)
        .rebuild(&source)
        .await;

    assert!(matches!(result, Err(TranslationError::Provider(_))));
}

#[tokio::test]
async fn test_output_should_not_depend_on_completion_order() {
    let mut body = String::new();
    for text in ["A", "A much longer opening sentence", "Mid", "x"] {
        body.push_str(&common::paragraph_xml(text));
    }
    body.push_str(&common::table_xml(&[&["Qty", "3", "Unit price"], &["y", "", "Total amount"]]));
    let temp_dir = common::create_temp_dir().unwrap();
    let input = common::create_docx(temp_dir.path(), "order.docx", &body).unwrap();
    let source = DocxReader::load(&input).unwrap();

    let sequential = Rebuilder::new(Arc::new(MockProvider::working()), LanguagePair::default(), 1, FailurePolicy::Abort)
        .rebuild(&source)
        .await
        .unwrap();
    let concurrent = Rebuilder::new(Arc::new(MockProvider::slow(60)), LanguagePair::default(), 8, FailurePolicy::Abort)
        .rebuild(&source)
        .await
        .unwrap();

    assert_eq!(sequential, concurrent);
    assert_eq!(concurrent.blocks.len(), 9);
    assert!(matches!(concurrent.blocks[8], Block::Table(_)));
}
