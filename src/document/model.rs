/*!
 * In-memory model of a Word document body.
 *
 * The model is deliberately flat: a document is an ordered list of blocks,
 * each block being either a paragraph or a table whose cells hold paragraphs.
 * Source and target documents are separate owned values; copying formatting
 * from one to the other always clones plain data.
 */

/// A Word document body as an ordered sequence of blocks.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    /// Paragraphs and tables in source order
    pub blocks: Vec<Block>,

    /// Raw `word/styles.xml` part, carried over so style ids keep resolving
    pub styles_part: Option<Vec<u8>>,
}

/// A top-level body element.
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Paragraph(Paragraph),
    Table(Table),
}

impl Document {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a paragraph and return a mutable handle to it.
    pub fn add_paragraph(&mut self, paragraph: Paragraph) -> &mut Paragraph {
        self.blocks.push(Block::Paragraph(paragraph));
        match self.blocks.last_mut() {
            Some(Block::Paragraph(p)) => p,
            _ => unreachable!("a paragraph was just pushed"),
        }
    }

    /// Append an empty table with a fixed column count.
    pub fn add_table(&mut self, columns: usize) -> &mut Table {
        self.blocks.push(Block::Table(Table::new(columns)));
        match self.blocks.last_mut() {
            Some(Block::Table(t)) => t,
            _ => unreachable!("a table was just pushed"),
        }
    }

    /// Body-level paragraphs in document order.
    pub fn paragraphs(&self) -> impl Iterator<Item = &Paragraph> {
        self.blocks.iter().filter_map(|block| match block {
            Block::Paragraph(p) => Some(p),
            Block::Table(_) => None,
        })
    }

    /// Body-level tables in document order.
    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.blocks.iter().filter_map(|block| match block {
            Block::Table(t) => Some(t),
            Block::Paragraph(_) => None,
        })
    }
}

/// Paragraph justification (`w:jc`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    Left,
    Center,
    Right,
    Justify,
    Distribute,
}

impl Alignment {
    /// Parse a `w:jc/@w:val` value. Unknown values yield `None`.
    pub fn from_ooxml(value: &str) -> Option<Self> {
        match value {
            "left" | "start" => Some(Self::Left),
            "center" => Some(Self::Center),
            "right" | "end" => Some(Self::Right),
            "both" => Some(Self::Justify),
            "distribute" => Some(Self::Distribute),
            _ => None,
        }
    }

    /// Value written back into `w:jc/@w:val`.
    pub fn as_ooxml(&self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Center => "center",
            Self::Right => "right",
            Self::Justify => "both",
            Self::Distribute => "distribute",
        }
    }
}

/// Character formatting of a run.
///
/// Boolean toggles are tri-state: `None` means inherited from the style.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunFormat {
    pub bold: Option<bool>,
    pub italic: Option<bool>,
    pub underline: Option<bool>,
    /// Font size in half-points (`w:sz`)
    pub size: Option<u32>,
    /// Font family name (`w:rFonts/@w:ascii`)
    pub font: Option<String>,
    /// Hex RGB colour such as `FF0000`
    pub color: Option<String>,
}

impl RunFormat {
    /// True when no attribute is set explicitly.
    pub fn is_plain(&self) -> bool {
        *self == Self::default()
    }
}

/// A run of text sharing one character format.
///
/// `\n` in the text is a line break and `\t` a tab.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Run {
    pub text: String,
    pub format: RunFormat,
}

impl Run {
    /// Run without explicit formatting.
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            format: RunFormat::default(),
        }
    }

    /// A run that only carries a line break.
    pub fn line_break() -> Self {
        Self::plain("\n")
    }
}

/// A paragraph: style, alignment and runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Paragraph {
    /// Style id (`w:pStyle/@w:val`)
    pub style: Option<String>,
    pub alignment: Option<Alignment>,
    pub runs: Vec<Run>,
}

impl Paragraph {
    /// Empty paragraph carrying the given style and alignment.
    pub fn styled(style: Option<String>, alignment: Option<Alignment>) -> Self {
        Self {
            style,
            alignment,
            runs: Vec::new(),
        }
    }

    /// Paragraph with a single plain run.
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            runs: vec![Run::plain(text)],
            ..Self::default()
        }
    }

    /// Append a run and return a mutable handle to it.
    pub fn add_run(&mut self, run: Run) -> &mut Run {
        self.runs.push(run);
        let last = self.runs.len() - 1;
        &mut self.runs[last]
    }

    /// Full text, the concatenation of all run texts.
    pub fn text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }

    /// True when the text is empty after trimming whitespace.
    pub fn is_blank(&self) -> bool {
        self.runs.iter().all(|r| r.text.trim().is_empty())
    }
}

/// Single-line borders applied identically to the four outer edges and both inner axes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableBorders {
    /// Line weight in eighths of a point
    pub size: u32,
    /// Spacing between border and content in points
    pub space: u32,
    /// Hex RGB colour
    pub color: String,
}

impl TableBorders {
    /// Thin solid black lines around and inside the table.
    pub fn uniform() -> Self {
        Self {
            size: 4,
            space: 0,
            color: "000000".to_string(),
        }
    }

    /// Edge element names covered by the border set, in schema order.
    pub const EDGES: [&'static str; 6] = ["top", "left", "bottom", "right", "insideH", "insideV"];
}

/// A table cell holding paragraphs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cell {
    pub paragraphs: Vec<Paragraph>,
}

impl Cell {
    /// Cell holding one paragraph with the given text.
    pub fn with_text(text: impl Into<String>) -> Self {
        let mut cell = Self::default();
        cell.set_text(text);
        cell
    }

    /// Paragraph texts joined with newlines.
    pub fn text(&self) -> String {
        self.paragraphs
            .iter()
            .map(|p| p.text())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Replace the content with a single paragraph holding one run.
    ///
    /// Newlines in `text` become line breaks inside that run.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.paragraphs = vec![Paragraph::with_text(text)];
    }

    pub fn first_paragraph(&self) -> Option<&Paragraph> {
        self.paragraphs.first()
    }

    /// First paragraph, created when the cell has none.
    pub fn first_paragraph_mut(&mut self) -> &mut Paragraph {
        if self.paragraphs.is_empty() {
            self.paragraphs.push(Paragraph::default());
        }
        &mut self.paragraphs[0]
    }
}

/// A row of cells.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    pub cells: Vec<Cell>,
}

/// A rectangular table: every row has exactly `columns` cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    columns: usize,
    pub rows: Vec<Row>,
    pub borders: Option<TableBorders>,
}

impl Table {
    /// Empty table with a fixed column count.
    pub fn new(columns: usize) -> Self {
        Self {
            columns,
            rows: Vec::new(),
            borders: None,
        }
    }

    /// Build a table from rows, padding or truncating each row to `columns`.
    pub fn from_rows(columns: usize, rows: Vec<Vec<Cell>>) -> Self {
        let mut table = Self::new(columns);
        for mut cells in rows {
            cells.resize_with(columns, Cell::default);
            table.rows.push(Row { cells });
        }
        table
    }

    pub fn column_count(&self) -> usize {
        self.columns
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Append a row of empty cells and return it.
    pub fn add_row(&mut self) -> &mut Row {
        self.rows.push(Row {
            cells: vec![Cell::default(); self.columns],
        });
        let last = self.rows.len() - 1;
        &mut self.rows[last]
    }

    pub fn set_borders(&mut self, borders: TableBorders) {
        self.borders = Some(borders);
    }

    pub fn cell(&self, row: usize, column: usize) -> Option<&Cell> {
        self.rows.get(row).and_then(|r| r.cells.get(column))
    }
}
