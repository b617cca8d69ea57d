//! nbformat-4 JSON reader.
//!
//! Only the fields the pipeline needs are modelled: cell type and source.
//! nbformat stores cell source either as a single string or as a list of
//! lines, so both encodings are accepted.

use super::cell::{split_source, Cell, CellType};
use super::Notebook;
use serde::Deserialize;

/// Errors that can occur while reading a notebook document.
#[derive(Debug, thiserror::Error)]
pub enum NotebookError {
    /// Filesystem read failed
    #[error("failed to read notebook file: {0}")]
    Io(#[from] std::io::Error),

    /// Document is not valid notebook JSON
    #[error("invalid notebook JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Document declares an nbformat major version this reader does not handle
    #[error("unsupported nbformat version {0} (expected 4)")]
    UnsupportedVersion(u64),
}

#[derive(Debug, Deserialize)]
struct RawNotebook {
    nbformat: u64,
    #[serde(default)]
    cells: Vec<RawCell>,
}

#[derive(Debug, Deserialize)]
struct RawCell {
    cell_type: String,
    #[serde(default)]
    source: SourceField,
}

/// nbformat source field: a string or a list of lines.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SourceField {
    Lines(Vec<String>),
    Text(String),
}

impl Default for SourceField {
    fn default() -> Self {
        Self::Text(String::new())
    }
}

impl SourceField {
    fn into_lines(self) -> Vec<String> {
        match self {
            Self::Lines(lines) => lines,
            Self::Text(text) => split_source(text),
        }
    }
}

pub(super) fn parse_ipynb(json: &str) -> Result<Notebook, NotebookError> {
    let raw: RawNotebook = serde_json::from_str(json)?;
    if raw.nbformat != 4 {
        return Err(NotebookError::UnsupportedVersion(raw.nbformat));
    }

    let mut notebook = Notebook::new();
    for cell in raw.cells {
        let cell_type = match cell.cell_type.as_str() {
            "code" => CellType::Code,
            "markdown" => CellType::Markdown,
            _ => CellType::Raw,
        };
        notebook.add_cell(Cell {
            cell_type,
            source: cell.source.into_lines(),
        });
    }
    Ok(notebook)
}
