//! Isolated execution environment (DST-003)
//!
//! The only place in the crate that runs extracted code. A [`Sandbox`] owns
//! the distilled source and builds its [`Namespace`] lazily, exactly once:
//! construction is expensive (it executes arbitrary extracted definitions)
//! and every harness check reads from the same memoized result.
//!
//! Construction never fails outward. Execution errors, like an empty
//! distillation, are recorded as a diagnostic inside the namespace so the
//! partially-populated result stays usable for introspection.

mod namespace;


pub use namespace::{IntrospectionOutcome, Namespace, DIAGNOSTIC_KEY};
pub(crate) use namespace::lookup;

use crate::extract::{distill, ClassifyError};
use crate::notebook::Notebook;
use std::sync::OnceLock;

/// A single-session execution environment for distilled source.
#[derive(Debug)]
pub struct Sandbox {
    source: String,
    namespace: OnceLock<Namespace>,
}

impl Sandbox {
    /// Create a sandbox over already-distilled source text. Nothing is
    /// executed until [`Sandbox::namespace`] is first called.
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            namespace: OnceLock::new(),
        }
    }

    /// Distill a notebook and wrap the result. Errors here are
    /// interpreter-level classification faults only; documents that
    /// yield nothing produce an empty (but valid) sandbox.
    pub fn from_notebook(notebook: &Notebook) -> Result<Self, ClassifyError> {
        Ok(Self::new(distill(notebook)?))
    }

    /// The distilled source this sandbox will execute.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The executed namespace, built on first access and memoized for the
    /// life of the sandbox. Never panics and never raises: failures are
    /// recorded in the namespace diagnostic instead.
    pub fn namespace(&self) -> &Namespace {
        self.namespace.get_or_init(|| Namespace::build(&self.source))
    }
}
