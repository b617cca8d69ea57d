//! Tests for the notebook module.

use super::*;
use std::io::Write;

#[test]
fn test_fragments_skip_markdown_cells() {
    let mut nb = Notebook::new();
    nb.add_markdown("# Title");
    nb.add_code("x = 1");
    nb.add_markdown("explanation");
    nb.add_code("y = 2");

    let fragments = nb.fragments();
    assert_eq!(fragments.len(), 2);
    assert_eq!(fragments[0].ordinal, 1);
    assert_eq!(fragments[0].source, "x = 1");
    assert_eq!(fragments[1].ordinal, 3);
    assert_eq!(fragments[1].source, "y = 2");
}

#[test]
fn test_empty_notebook_has_no_fragments() {
    let nb = Notebook::new();
    assert!(nb.fragments().is_empty());
    assert_eq!(nb.cell_count(), 0);
}

#[test]
fn test_cell_source_text_roundtrip() {
    let cell = Cell::code("line1\nline2\nline3");
    assert_eq!(cell.source_text(), "line1\nline2\nline3");

    let cell = Cell::code("line1\nline2\n");
    assert_eq!(cell.source_text(), "line1\nline2\n");
}

#[test]
fn test_from_ipynb_source_as_lines() {
    let json = r##"{
        "nbformat": 4,
        "nbformat_minor": 5,
        "metadata": {},
        "cells": [
            {"cell_type": "markdown", "metadata": {}, "source": ["# Notes\n"]},
            {"cell_type": "code", "metadata": {}, "outputs": [], "execution_count": 1,
             "source": ["import torch\n", "D_MODEL = 512"]}
        ]
    }"##;

    let nb = Notebook::from_ipynb(json).unwrap();
    assert_eq!(nb.cell_count(), 2);

    let fragments = nb.fragments();
    assert_eq!(fragments.len(), 1);
    assert_eq!(fragments[0].ordinal, 1);
    assert_eq!(fragments[0].source, "import torch\nD_MODEL = 512");
}

#[test]
fn test_from_ipynb_source_as_string() {
    let json = r#"{
        "nbformat": 4,
        "cells": [
            {"cell_type": "code", "source": "def f(x):\n    return x"}
        ]
    }"#;

    let nb = Notebook::from_ipynb(json).unwrap();
    let fragments = nb.fragments();
    assert_eq!(fragments.len(), 1);
    assert_eq!(fragments[0].source, "def f(x):\n    return x");
}

#[test]
fn test_from_ipynb_rejects_old_nbformat() {
    let json = r#"{"nbformat": 3, "cells": []}"#;
    let err = Notebook::from_ipynb(json).unwrap_err();
    assert!(matches!(err, NotebookError::UnsupportedVersion(3)));
}

#[test]
fn test_from_ipynb_rejects_invalid_json() {
    let err = Notebook::from_ipynb("not json").unwrap_err();
    assert!(matches!(err, NotebookError::Json(_)));
}

#[test]
fn test_unknown_cell_type_treated_as_raw() {
    let json = r#"{
        "nbformat": 4,
        "cells": [{"cell_type": "heading", "source": "old format"}]
    }"#;

    let nb = Notebook::from_ipynb(json).unwrap();
    assert_eq!(nb.cells()[0].cell_type, CellType::Raw);
    assert!(nb.fragments().is_empty());
}

#[test]
fn test_from_path() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{"nbformat": 4, "cells": [{{"cell_type": "code", "source": "x = 1"}}]}}"#
    )
    .unwrap();

    let nb = Notebook::from_path(file.path()).unwrap();
    assert_eq!(nb.fragments().len(), 1);
}

#[test]
fn test_from_path_missing_file() {
    let err = Notebook::from_path("/nonexistent/notebook.ipynb".as_ref()).unwrap_err();
    assert!(matches!(err, NotebookError::Io(_)));
}

#[test]
fn test_cell_type_display() {
    assert_eq!(format!("{}", CellType::Code), "code");
    assert_eq!(format!("{}", CellType::Markdown), "markdown");
    assert_eq!(format!("{}", CellType::Raw), "raw");
}
