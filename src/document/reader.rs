/*!
 * Loading `.docx` packages into the document model.
 *
 * The main part (`word/document.xml`) is parsed with roxmltree and only the
 * body-level paragraphs and tables are kept. Nested tables are ignored.
 */

use log::debug;
use roxmltree::Node;
use std::fs::File;
use std::io::{Cursor, Read, Seek};
use std::path::Path;
use zip::ZipArchive;
use zip::result::ZipError;

use super::model::{Alignment, Block, Cell, Document, Paragraph, Run, RunFormat, Table};
use crate::errors::LoadError;

/// WordprocessingML main namespace (transitional)
pub const W_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
/// WordprocessingML main namespace (strict)
const W_STRICT_NS: &str = "http://purl.oclc.org/ooxml/wordprocessingml/main";

pub const DOCUMENT_PART: &str = "word/document.xml";
pub const STYLES_PART: &str = "word/styles.xml";

/// Widest table Word will open; bounds tables that declare no grid
const MAX_TABLE_COLUMNS: usize = 63;

/// Elements that wrap runs without being runs themselves
const RUN_CONTAINERS: [&str; 8] = [
    "hyperlink",
    "ins",
    "moveTo",
    "smartTag",
    "fldSimple",
    "customXml",
    "sdt",
    "sdtContent",
];

/// Reader for `.docx` packages
pub struct DocxReader;

impl DocxReader {
    /// Open and parse a `.docx` file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Document, LoadError> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(LoadError::NotFound(path.to_path_buf()));
        }

        let file = File::open(path)?;
        let document = Self::from_reader(file)?;

        debug!(
            "Loaded {:?}: {} paragraph(s), {} table(s)",
            path,
            document.paragraphs().count(),
            document.tables().count()
        );

        Ok(document)
    }

    /// Parse a `.docx` package held in memory.
    pub fn from_bytes(bytes: &[u8]) -> Result<Document, LoadError> {
        Self::from_reader(Cursor::new(bytes))
    }

    fn from_reader<R: Read + Seek>(reader: R) -> Result<Document, LoadError> {
        let mut archive = ZipArchive::new(reader).map_err(|e| LoadError::Archive(e.to_string()))?;

        let main_part = read_part(&mut archive, DOCUMENT_PART)?
            .ok_or_else(|| LoadError::MissingPart(DOCUMENT_PART.to_string()))?;
        let xml = String::from_utf8(main_part).map_err(|e| LoadError::Xml(e.to_string()))?;

        let mut document = parse_document_xml(&xml)?;
        document.styles_part = read_part(&mut archive, STYLES_PART)?;

        Ok(document)
    }
}

/// Read one package part, `None` when it does not exist.
fn read_part<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
    name: &str,
) -> Result<Option<Vec<u8>>, LoadError> {
    let mut entry = match archive.by_name(name) {
        Ok(entry) => entry,
        Err(ZipError::FileNotFound) => return Ok(None),
        Err(e) => return Err(LoadError::Archive(e.to_string())),
    };

    let mut buffer = Vec::new();
    entry.read_to_end(&mut buffer)?;
    Ok(Some(buffer))
}

/// Parse the XML of a main document part.
pub fn parse_document_xml(xml: &str) -> Result<Document, LoadError> {
    let xml = xml.trim_start_matches('\u{feff}');
    let tree = roxmltree::Document::parse(xml).map_err(|e| LoadError::Xml(e.to_string()))?;

    let body = w_child(tree.root_element(), "body")
        .ok_or_else(|| LoadError::MissingPart("w:body".to_string()))?;

    let mut document = Document::new();
    for child in body.children() {
        match word_name(child) {
            Some("p") => document.blocks.push(Block::Paragraph(parse_paragraph(child))),
            Some("tbl") => document.blocks.push(Block::Table(parse_table(child))),
            _ => {}
        }
    }

    Ok(document)
}

/// Local name of an element in the WordprocessingML namespace.
fn word_name<'a, 'input>(node: Node<'a, 'input>) -> Option<&'a str> {
    if !node.is_element() {
        return None;
    }
    let tag = node.tag_name();
    match tag.namespace() {
        Some(W_NS) | Some(W_STRICT_NS) => Some(tag.name()),
        _ => None,
    }
}

fn w_child<'a, 'input>(node: Node<'a, 'input>, name: &str) -> Option<Node<'a, 'input>> {
    node.children().find(|n| word_name(*n) == Some(name))
}

fn w_attr<'a, 'input>(node: Node<'a, 'input>, name: &str) -> Option<&'a str> {
    node.attribute((W_NS, name))
        .or_else(|| node.attribute((W_STRICT_NS, name)))
}

/// `w:b`, `w:i` and friends: present without a value means on.
fn on_off(node: Node) -> bool {
    !matches!(w_attr(node, "val"), Some("0" | "false" | "off"))
}

fn parse_paragraph(node: Node) -> Paragraph {
    let mut paragraph = Paragraph::default();

    if let Some(properties) = w_child(node, "pPr") {
        paragraph.style = w_child(properties, "pStyle")
            .and_then(|n| w_attr(n, "val"))
            .map(str::to_string);
        paragraph.alignment = w_child(properties, "jc")
            .and_then(|n| w_attr(n, "val"))
            .and_then(Alignment::from_ooxml);
    }

    collect_runs(node, &mut paragraph.runs);
    paragraph
}

fn collect_runs(node: Node, runs: &mut Vec<Run>) {
    for child in node.children() {
        match word_name(child) {
            Some("r") => runs.push(parse_run(child)),
            Some(name) if RUN_CONTAINERS.contains(&name) => collect_runs(child, runs),
            _ => {}
        }
    }
}

fn parse_run(node: Node) -> Run {
    let mut run = Run::default();

    for child in node.children() {
        match word_name(child) {
            Some("rPr") => run.format = parse_run_format(child),
            Some("t") => run.text.push_str(child.text().unwrap_or_default()),
            Some("tab") => run.text.push('\t'),
            Some("br") | Some("cr") => run.text.push('\n'),
            Some("noBreakHyphen") => run.text.push('-'),
            _ => {}
        }
    }

    run
}

fn parse_run_format(node: Node) -> RunFormat {
    let mut format = RunFormat::default();

    for child in node.children() {
        match word_name(child) {
            Some("b") => format.bold = Some(on_off(child)),
            Some("i") => format.italic = Some(on_off(child)),
            Some("u") => format.underline = Some(w_attr(child, "val") != Some("none")),
            Some("sz") => format.size = w_attr(child, "val").and_then(|v| v.parse().ok()),
            Some("rFonts") => {
                format.font = w_attr(child, "ascii")
                    .or_else(|| w_attr(child, "hAnsi"))
                    .map(str::to_string);
            }
            Some("color") => {
                format.color = w_attr(child, "val")
                    .filter(|v| !v.eq_ignore_ascii_case("auto"))
                    .map(str::to_string);
            }
            _ => {}
        }
    }

    format
}

fn parse_table(node: Node) -> Table {
    let grid_columns = w_child(node, "tblGrid")
        .map(|grid| grid.children().filter(|n| word_name(*n) == Some("gridCol")).count())
        .unwrap_or(0);
    let width_limit = if grid_columns > 0 {
        grid_columns
    } else {
        MAX_TABLE_COLUMNS
    };

    let mut rows: Vec<Vec<Cell>> = Vec::new();
    for tr in node.children().filter(|n| word_name(*n) == Some("tr")) {
        let cells: Vec<Cell> = parse_row(tr, width_limit)
            .into_iter()
            .enumerate()
            .map(|(column, (cell, continues_merge))| {
                // A vertical-merge continuation shows the content of the cell above
                match rows.last().and_then(|above| above.get(column)) {
                    Some(above) if continues_merge => above.clone(),
                    _ => cell,
                }
            })
            .collect();
        rows.push(cells);
    }

    let columns = if grid_columns > 0 {
        grid_columns
    } else {
        rows.iter().map(Vec::len).max().unwrap_or(0)
    };

    Table::from_rows(columns, rows)
}

/// Cells of a row in grid order, each flagged when it continues a vertical merge.
///
/// A cell spanning n columns appears n times; spans are cut at `width_limit`.
fn parse_row(node: Node, width_limit: usize) -> Vec<(Cell, bool)> {
    let mut cells = Vec::new();

    for tc in node.children().filter(|n| word_name(*n) == Some("tc")) {
        let remaining = width_limit.saturating_sub(cells.len());
        if remaining == 0 {
            break;
        }

        let properties = w_child(tc, "tcPr");
        let span = properties
            .and_then(|p| w_child(p, "gridSpan"))
            .and_then(|g| w_attr(g, "val"))
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or(1)
            .clamp(1, remaining);
        let continues_merge = properties
            .and_then(|p| w_child(p, "vMerge"))
            .is_some_and(|m| w_attr(m, "val") != Some("restart"));

        let cell = Cell {
            paragraphs: tc
                .children()
                .filter(|n| word_name(*n) == Some("p"))
                .map(parse_paragraph)
                .collect(),
        };

        for _ in 1..span {
            cells.push((cell.clone(), continues_merge));
        }
        cells.push((cell, continues_merge));
    }

    cells
}
