/*!
 * Building the bilingual document.
 *
 * The rebuilder walks the source document, translates every textual unit
 * through a `BatchTranslator` and appends the bilingual content to a fresh
 * document: all paragraphs first, then all tables.
 *
 * Paragraphs become two paragraphs, translation first. Table cells keep their
 * position and hold `translation + "\n" + original`; numbers and blank cells
 * are copied as they are.
 */

use log::{debug, info};
use std::collections::HashMap;
use std::sync::Arc;

use crate::app_config::FailurePolicy;
use crate::classifier::{UnitKind, classify};
use crate::document::{Block, Cell, Document, Paragraph, Run, Table, TableBorders};
use crate::errors::TranslationError;
use crate::language_utils::LanguagePair;
use crate::translation::{BatchTranslator, Translator};

/// Position of a translation unit in the source document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnitId {
    /// A body paragraph, by block index
    Paragraph { block: usize },
    /// A table cell, by block index and grid position
    Cell { block: usize, row: usize, column: usize },
}

/// A piece of text that needs translating
#[derive(Debug, Clone, PartialEq)]
pub struct TranslationUnit {
    pub id: UnitId,
    pub text: String,
}

/// Collect the units that go to the translator, in document order.
///
/// Blank paragraphs, blank cells and numeric cells are left out.
pub fn collect_units(source: &Document) -> Vec<TranslationUnit> {
    let mut units = Vec::new();

    for (block, item) in source.blocks.iter().enumerate() {
        match item {
            Block::Paragraph(paragraph) if !paragraph.is_blank() => {
                units.push(TranslationUnit {
                    id: UnitId::Paragraph { block },
                    text: paragraph.text(),
                });
            }
            Block::Paragraph(_) => {}
            Block::Table(table) => {
                for (row, cells) in table.rows.iter().enumerate() {
                    for (column, cell) in cells.cells.iter().enumerate() {
                        let text = cell.text();
                        if text.trim().is_empty() || classify(&text) == UnitKind::Numeric {
                            continue;
                        }
                        units.push(TranslationUnit {
                            id: UnitId::Cell { block, row, column },
                            text,
                        });
                    }
                }
            }
        }
    }

    units
}

/// Builds bilingual documents
#[derive(Debug, Clone)]
pub struct Rebuilder {
    batch: BatchTranslator,
    languages: LanguagePair,
}

impl Rebuilder {
    pub fn new(
        translator: Arc<dyn Translator>,
        languages: LanguagePair,
        max_concurrent_requests: usize,
        failure_policy: FailurePolicy,
    ) -> Self {
        Self {
            batch: BatchTranslator::new(translator, max_concurrent_requests, failure_policy),
            languages,
        }
    }

    /// Build the bilingual version of `source`.
    pub async fn rebuild(&self, source: &Document) -> Result<Document, TranslationError> {
        self.rebuild_with_progress(source, |_, _| {}).await
    }

    /// Build the bilingual version of `source`, reporting translation progress.
    ///
    /// Fails only under `FailurePolicy::Abort`; the partially built document
    /// is dropped in that case.
    pub async fn rebuild_with_progress<F>(
        &self,
        source: &Document,
        progress_callback: F,
    ) -> Result<Document, TranslationError>
    where
        F: Fn(usize, usize) + Send + Sync,
    {
        let units = collect_units(source);
        let texts: Vec<String> = units.iter().map(|u| u.text.clone()).collect();
        debug!("{} unit(s) to translate ({})", units.len(), self.languages);

        let results = self
            .batch
            .translate_all(&texts, &self.languages, progress_callback)
            .await?;

        let mut translations: HashMap<UnitId, String> = HashMap::with_capacity(units.len());
        let mut failed = 0;
        for (unit, result) in units.iter().zip(results) {
            match result {
                Some(translated) => {
                    translations.insert(unit.id, translated);
                }
                None => failed += 1,
            }
        }

        let mut target = Document::new();
        target.styles_part = source.styles_part.clone();

        // Paragraphs first, tables after, each group in source order
        for (block, item) in source.blocks.iter().enumerate() {
            if let Block::Paragraph(paragraph) = item {
                let translated = translations.get(&UnitId::Paragraph { block });
                append_paragraph(&mut target, paragraph, translated.map(String::as_str));
            }
        }
        for (block, item) in source.blocks.iter().enumerate() {
            if let Block::Table(table) = item {
                append_table(&mut target, table, block, &translations);
            }
        }

        info!(
            "Rebuilt {} paragraph(s) and {} table(s), {} of {} unit(s) kept untranslated",
            target.paragraphs().count(),
            target.tables().count(),
            failed,
            units.len()
        );

        Ok(target)
    }
}

/// Append the translated paragraph (when available) and then the original.
fn append_paragraph(target: &mut Document, source: &Paragraph, translated: Option<&str>) {
    if source.is_blank() {
        return;
    }

    if let Some(translated) = translated {
        let paragraph = target.add_paragraph(Paragraph::styled(source.style.clone(), source.alignment));
        paragraph.add_run(Run::plain(translated));
        paragraph.add_run(Run::line_break());
    }

    let original = target.add_paragraph(Paragraph::styled(source.style.clone(), source.alignment));
    for run in &source.runs {
        original.add_run(run.clone());
    }
}

fn append_table(
    target: &mut Document,
    source: &Table,
    block: usize,
    translations: &HashMap<UnitId, String>,
) {
    let table = target.add_table(source.column_count());
    table.set_borders(TableBorders::uniform());

    for (row_index, source_row) in source.rows.iter().enumerate() {
        let row = table.add_row();
        for (column, (source_cell, target_cell)) in
            source_row.cells.iter().zip(row.cells.iter_mut()).enumerate()
        {
            let id = UnitId::Cell {
                block,
                row: row_index,
                column,
            };
            fill_cell(target_cell, source_cell, translations.get(&id).map(String::as_str));
        }
    }
}

fn fill_cell(target: &mut Cell, source: &Cell, translated: Option<&str>) {
    let text = source.text();

    if text.trim().is_empty() {
        target.set_text(text);
        return;
    }

    match (classify(&text), translated) {
        (UnitKind::Textual, Some(translated)) => target.set_text(format!("{}\n{}", translated, text)),
        _ => target.set_text(text),
    }

    if let Some(first) = source.first_paragraph() {
        let paragraph = target.first_paragraph_mut();
        paragraph.style = first.style.clone();
        paragraph.alignment = first.alignment;
    }
}
