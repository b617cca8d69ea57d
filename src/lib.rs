//! destilar: distill reusable definitions from exploratory notebooks.
//!
//! Notebook-style documents interleave heavy, non-reproducible execution
//! (training loops, file I/O, plotting) with declarations worth keeping
//! (imports, functions, classes, hyperparameter constants). This crate
//! rebuilds a minimal executable module from the keepable statements, runs
//! it in an isolated interpreter namespace, and exercises the surviving
//! symbols with a tolerant, capability-probing harness.
//!
//! # Pipeline
//!
//! ```text
//! Notebook -> classify cells -> aggregate + sanitize -> Sandbox -> Harness
//! ```
//!
//! # Example
//!
//! ```no_run
//! use destilar::{Harness, Notebook, Sandbox};
//!
//! let notebook = Notebook::from_path("experiment.ipynb".as_ref())?;
//! let sandbox = Sandbox::from_notebook(&notebook)?;
//! let report = Harness::new(sandbox).run();
//! assert!(!report.is_failure());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod extract;
pub mod harness;
pub mod notebook;
pub mod sandbox;

pub use extract::{
    aggregate, distill, extract_definitions, sanitize, statement_kinds, ClassifiedFragment,
    ClassifyError, StatementKind,
};
pub use harness::{
    ArgValue, CallStrategy, CheckOutcome, CheckResult, Harness, InvokeError, Probe, Report,
    SymbolContract, EXPECTED_SYMBOLS,
};
pub use notebook::{Cell, CellType, Fragment, Notebook, NotebookError};
pub use sandbox::{IntrospectionOutcome, Namespace, Sandbox};
