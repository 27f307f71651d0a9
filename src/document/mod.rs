/*!
 * Word document handling.
 *
 * - `model`: the in-memory paragraph/table tree
 * - `reader`: loading `.docx` packages
 * - `writer`: saving `.docx` packages
 */

pub mod model;
pub mod reader;
pub mod writer;

pub use model::{
    Alignment, Block, Cell, Document, Paragraph, Row, Run, RunFormat, Table,
    TableBorders,
};
pub use reader::DocxReader;
pub use writer::DocxWriter;
