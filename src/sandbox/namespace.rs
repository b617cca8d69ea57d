//! Executed namespace and its diagnostic sentinel.

use pyo3::prelude::*;
use pyo3::types::PyDict;

/// Reserved key under which execution diagnostics are recorded. Kept
/// inspectable in the namespace itself rather than raised, so downstream
/// consumers can look without re-running anything.
pub const DIAGNOSTIC_KEY: &str = "_introspection_error";

/// Optional-dependency seeding. Each tensor/numeric library binds under its
/// conventional name when importable and degrades to a harmless placeholder
/// otherwise, so later attribute access fails predictably instead of
/// breaking namespace construction.
const DEPENDENCY_PRELUDE: &str = r#"
try:
    import torch
    import torch.nn as nn
    import torch.nn.functional as F
except Exception:
    torch = None
    class _MissingDependency:
        pass
    nn = _MissingDependency()
    F = _MissingDependency()
try:
    import numpy as np
except Exception:
    np = None
"#;

/// Result of executing the distilled source, read back from the namespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntrospectionOutcome {
    /// The source executed cleanly
    Ok,
    /// Execution failed or nothing was extracted; the namespace may still
    /// be partially populated
    ExecutionFailed(String),
}

/// Mapping from symbol name to runtime value, produced once per session.
/// Read-only after construction: checks must not mutate shared symbols,
/// or check ordering would become observable.
#[derive(Debug)]
pub struct Namespace {
    dict: Py<PyDict>,
}

impl Namespace {
    /// Build the namespace: seed builtins and optional dependencies, then
    /// execute the distilled source with the namespace as both definition
    /// and lookup scope (ordinary module-evaluation semantics). Infallible
    /// by design: every failure path lands in the diagnostic entry.
    pub(crate) fn build(source: &str) -> Self {
        Python::with_gil(|py| {
            let dict = PyDict::new(py);
            if let Err(err) = seed_and_execute(py, dict, source) {
                // Interpreter fault outside the extracted code itself.
                let _ = dict.set_item(DIAGNOSTIC_KEY, err.to_string());
            }
            Self { dict: dict.into() }
        })
    }

    /// Borrow the underlying dictionary for direct interpreter work.
    pub fn as_dict<'py>(&'py self, py: Python<'py>) -> &'py PyDict {
        self.dict.as_ref(py)
    }

    /// Whether a symbol is defined.
    pub fn contains(&self, name: &str) -> bool {
        Python::with_gil(|py| lookup(self.as_dict(py), name).is_some())
    }

    /// Execution outcome, derived from the diagnostic sentinel.
    pub fn outcome(&self) -> IntrospectionOutcome {
        Python::with_gil(|py| match lookup(self.as_dict(py), DIAGNOSTIC_KEY) {
            Some(value) => IntrospectionOutcome::ExecutionFailed(value.to_string()),
            None => IntrospectionOutcome::Ok,
        })
    }

    /// Whether a usable tensor runtime survived dependency seeding: `torch`
    /// bound to a real module and `nn` exposing `Module`, rather than the
    /// degradation placeholders.
    pub fn tensor_runtime_available(&self) -> bool {
        Python::with_gil(|py| {
            let dict = self.as_dict(py);
            let torch_ok = lookup(dict, "torch").is_some_and(|t| !t.is_none());
            let nn_ok = lookup(dict, "nn")
                .is_some_and(|nn| nn.hasattr("Module").unwrap_or(false));
            torch_ok && nn_ok
        })
    }
}

/// Dict lookup that treats a failed lookup the same as a missing key.
/// Callers that care about the `None` placeholders bound for absent
/// dependencies must check `is_none` on the returned value.
pub(crate) fn lookup<'py>(dict: &'py PyDict, name: &str) -> Option<&'py PyAny> {
    dict.get_item(name).ok().flatten()
}

fn seed_and_execute(py: Python<'_>, dict: &PyDict, source: &str) -> PyResult<()> {
    dict.set_item("__builtins__", py.import("builtins")?)?;
    py.run(DEPENDENCY_PRELUDE, Some(dict), Some(dict))?;

    if source.trim().is_empty() {
        dict.set_item(
            DIAGNOSTIC_KEY,
            "no definitions or imports extracted from document",
        )?;
        return Ok(());
    }

    if let Err(err) = py.run(source, Some(dict), Some(dict)) {
        // Keep whatever got defined before the failure.
        dict.set_item(DIAGNOSTIC_KEY, err.to_string())?;
    }
    Ok(())
}
