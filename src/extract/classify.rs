//! Statement classifier.
//!
//! Fragments are Python source, so classification leans on the language's
//! own tooling: CPython's `ast` module, reached through the embedded
//! interpreter. Kept statements are rebuilt into a fresh `ast.Module` and
//! regenerated with `ast.unparse`, never sliced out of the original text,
//! so indentation and nested structure of kept bodies stay valid.
//!
//! A fragment that fails to parse is dropped (empty classification), not
//! treated as an error: exploratory documents routinely contain magics and
//! half-edited cells.

use crate::notebook::Fragment;
use pyo3::exceptions::PySyntaxError;
use pyo3::prelude::*;
use pyo3::types::{IntoPyDict, PyList};

/// Syntactic kind of a top-level statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatementKind {
    /// `import x` / `from x import y`, always kept
    Import,
    /// `def` / `async def`, always kept with the body untouched
    FunctionDef,
    /// `class`, always kept with the body untouched
    ClassDef,
    /// Simple or annotated assignment whose value is a literal
    ConstantAssign,
    /// Anything else, never retained
    Other,
}

impl StatementKind {
    /// Whether statements of this kind survive classification.
    pub fn retained(self) -> bool {
        self != Self::Other
    }
}

/// A fragment reduced to its retained statements, regenerated as source
/// text. Derived from exactly one [`Fragment`]; empty text means nothing
/// survived (or the fragment did not parse).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedFragment {
    /// Ordinal of the originating fragment
    pub ordinal: usize,
    /// Regenerated source of the retained statements
    pub text: String,
}

/// Interpreter-level faults during classification. Fragment syntax errors
/// are not represented here: they classify to empty text by design.
#[derive(Debug, thiserror::Error)]
pub enum ClassifyError {
    /// The embedded interpreter failed outside of fragment parsing
    #[error("interpreter error during classification: {0}")]
    Interpreter(#[from] PyErr),
}

/// Classify one fragment.
pub fn classify(fragment: &Fragment) -> Result<ClassifiedFragment, ClassifyError> {
    Ok(ClassifiedFragment {
        ordinal: fragment.ordinal,
        text: extract_definitions(&fragment.source)?,
    })
}

/// Keep only imports, definitions, and constant bindings from a source
/// fragment, returning the regenerated text of the survivors in original
/// order. Returns an empty string when the fragment fails to parse or when
/// nothing is retained.
pub fn extract_definitions(source: &str) -> Result<String, ClassifyError> {
    walk(source).map(|(text, _)| text)
}

/// Per-statement kinds for a fragment, in source order. Empty when the
/// fragment fails to parse.
pub fn statement_kinds(source: &str) -> Result<Vec<StatementKind>, ClassifyError> {
    walk(source).map(|(_, kinds)| kinds)
}

fn walk(source: &str) -> Result<(String, Vec<StatementKind>), ClassifyError> {
    Python::with_gil(|py| {
        let ast = py.import("ast")?;

        let tree = match ast.call_method1("parse", (source,)) {
            Ok(tree) => tree,
            Err(err) if err.is_instance_of::<PySyntaxError>(py) => {
                return Ok((String::new(), Vec::new()));
            }
            Err(err) => return Err(err.into()),
        };

        let kept = PyList::empty(py);
        let mut kinds = Vec::new();
        for node in tree.getattr("body")?.iter()? {
            let node = node?;
            let kind = kind_of(ast, node)?;
            if kind.retained() {
                kept.append(node)?;
            }
            kinds.push(kind);
        }

        if kept.is_empty() {
            return Ok((String::new(), kinds));
        }

        let fields = [("body", kept), ("type_ignores", PyList::empty(py))].into_py_dict(py);
        let module = ast.getattr("Module")?.call((), Some(fields))?;
        let text: String = ast.call_method1("unparse", (module,))?.extract()?;
        Ok((text, kinds))
    })
}

fn kind_of(ast: &PyModule, node: &PyAny) -> PyResult<StatementKind> {
    if isinstance(node, ast, "Import")? || isinstance(node, ast, "ImportFrom")? {
        return Ok(StatementKind::Import);
    }
    if isinstance(node, ast, "FunctionDef")? || isinstance(node, ast, "AsyncFunctionDef")? {
        return Ok(StatementKind::FunctionDef);
    }
    if isinstance(node, ast, "ClassDef")? {
        return Ok(StatementKind::ClassDef);
    }
    if isinstance(node, ast, "Assign")? {
        for target in node.getattr("targets")?.iter()? {
            if !is_name_target(ast, target?)? {
                return Ok(StatementKind::Other);
            }
        }
        if is_literal(ast, node.getattr("value")?)? {
            return Ok(StatementKind::ConstantAssign);
        }
        return Ok(StatementKind::Other);
    }
    if isinstance(node, ast, "AnnAssign")? {
        // The annotation itself is not validated, only the value.
        let value = node.getattr("value")?;
        if !value.is_none() && isinstance(value, ast, "Constant")? {
            return Ok(StatementKind::ConstantAssign);
        }
        return Ok(StatementKind::Other);
    }
    Ok(StatementKind::Other)
}

/// A bare name, or an unpacking target (`X, Y = ...`) made entirely of
/// bare names. Anything reaching into an object or a container is rejected: attribute
/// and subscript targets, starred elements.
fn is_name_target(ast: &PyModule, target: &PyAny) -> PyResult<bool> {
    if isinstance(target, ast, "Name")? {
        return Ok(true);
    }
    if isinstance(target, ast, "Tuple")? || isinstance(target, ast, "List")? {
        for elt in target.getattr("elts")?.iter()? {
            if !isinstance(elt?, ast, "Name")? {
                return Ok(false);
            }
        }
        return Ok(true);
    }
    Ok(false)
}

/// Literal predicate for retained assignments: a constant, or a
/// tuple/list/set whose elements are all constants. One level deep:
/// nested collections, names, calls, and arithmetic all fail it.
fn is_literal(ast: &PyModule, node: &PyAny) -> PyResult<bool> {
    if isinstance(node, ast, "Constant")? {
        return Ok(true);
    }
    if isinstance(node, ast, "Tuple")? || isinstance(node, ast, "List")? || isinstance(node, ast, "Set")? {
        for elt in node.getattr("elts")?.iter()? {
            if !isinstance(elt?, ast, "Constant")? {
                return Ok(false);
            }
        }
        return Ok(true);
    }
    Ok(false)
}

fn isinstance(node: &PyAny, ast: &PyModule, class_name: &str) -> PyResult<bool> {
    node.is_instance(ast.getattr(class_name)?)
}
