//! Notebook cell types.

use serde::{Deserialize, Serialize};

/// Cell type in a notebook
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CellType {
    /// Executable code cell
    Code,
    /// Markdown documentation cell
    Markdown,
    /// Raw text cell
    Raw,
}

impl std::fmt::Display for CellType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Code => write!(f, "code"),
            Self::Markdown => write!(f, "markdown"),
            Self::Raw => write!(f, "raw"),
        }
    }
}

/// A single cell in a notebook
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    /// Type of cell
    pub cell_type: CellType,
    /// Source content (lines, nbformat style)
    pub source: Vec<String>,
}

impl Cell {
    /// Create a new code cell
    pub fn code(source: impl Into<String>) -> Self {
        Self {
            cell_type: CellType::Code,
            source: split_source(source.into()),
        }
    }

    /// Create a new markdown cell
    pub fn markdown(source: impl Into<String>) -> Self {
        Self {
            cell_type: CellType::Markdown,
            source: split_source(source.into()),
        }
    }

    /// Create a new raw cell
    pub fn raw(source: impl Into<String>) -> Self {
        Self {
            cell_type: CellType::Raw,
            source: split_source(source.into()),
        }
    }

    /// Get the source as a single string
    pub fn source_text(&self) -> String {
        self.source.join("")
    }
}

/// Split source into lines, keeping newlines on all but the last line
/// (the nbformat convention).
pub(crate) fn split_source(source: String) -> Vec<String> {
    let line_count = source.lines().count();
    source
        .lines()
        .enumerate()
        .map(|(i, line)| {
            if i + 1 == line_count && !source.ends_with('\n') {
                line.to_string()
            } else {
                format!("{line}\n")
            }
        })
        .collect()
}
