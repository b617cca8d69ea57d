//! Notebook document model (DST-001)
//!
//! Ordered-fragment view of a Jupyter notebook: the rest of the crate only
//! cares about executable cells and their position in the document. Reading
//! the on-disk nbformat container lives in [`reader`]; everything downstream
//! consumes [`Fragment`]s.

mod cell;
mod reader;

#[cfg(test)]
mod tests;

pub use cell::{Cell, CellType};
pub use reader::NotebookError;

/// One executable unit of source text from a document, tagged with its
/// position among the document's cells. Immutable once read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    /// Index of the originating cell within the document
    pub ordinal: usize,
    /// Raw cell source
    pub source: String,
}

/// An ordered notebook document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Notebook {
    cells: Vec<Cell>,
}

impl Notebook {
    /// Create an empty notebook.
    pub fn new() -> Self {
        Self { cells: Vec::new() }
    }

    /// Parse a notebook from nbformat-4 JSON.
    pub fn from_ipynb(json: &str) -> Result<Self, NotebookError> {
        reader::parse_ipynb(json)
    }

    /// Read and parse a notebook file.
    pub fn from_path(path: &std::path::Path) -> Result<Self, NotebookError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_ipynb(&json)
    }

    /// Append a cell.
    pub fn add_cell(&mut self, cell: Cell) {
        self.cells.push(cell);
    }

    /// Append a code cell.
    pub fn add_code(&mut self, source: impl Into<String>) {
        self.cells.push(Cell::code(source));
    }

    /// Append a markdown cell.
    pub fn add_markdown(&mut self, source: impl Into<String>) {
        self.cells.push(Cell::markdown(source));
    }

    /// All cells, in document order.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Number of cells in the document.
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Executable fragments in document order. Markdown and raw cells carry
    /// no runnable source and are skipped; the ordinal still refers to the
    /// cell's position in the full document.
    pub fn fragments(&self) -> Vec<Fragment> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.cell_type == CellType::Code)
            .map(|(ordinal, cell)| Fragment {
                ordinal,
                source: cell.source_text(),
            })
            .collect()
    }
}
