//! Statement-level extraction pipeline (DST-002)
//!
//! Decides, cell by cell, what survives from a notebook: imports, function
//! and class definitions, and constant bindings are kept; training loops,
//! bare expressions, and anything with runtime dependencies is discarded.
//! The surviving statements are regenerated as program text, aggregated in
//! document order, and sanitized.
//!
//! # Components
//!
//! - [`classify`] - per-statement keep/drop decision and text regeneration
//! - [`sanitize`] - idempotent text-level cleanup of continuation artifacts
//! - [`aggregate`] - order-preserving concatenation of classified fragments

mod aggregate;
mod classify;
mod sanitize;


pub use aggregate::{aggregate, distill};
pub use classify::{
    classify, extract_definitions, statement_kinds, ClassifiedFragment, ClassifyError,
    StatementKind,
};
pub use sanitize::sanitize;
