//! Fragment aggregation.

use super::classify::{classify, ClassifiedFragment, ClassifyError};
use super::sanitize::sanitize;
use crate::notebook::Notebook;

/// Concatenate classified fragments in document order, separated by a blank
/// line, skipping fragments that reduced to nothing. No reordering and no
/// deduplication: later definitions may rely on imports and constants
/// introduced earlier.
pub fn aggregate<'a>(fragments: impl IntoIterator<Item = &'a ClassifiedFragment>) -> String {
    fragments
        .into_iter()
        .filter(|fragment| !fragment.text.trim().is_empty())
        .map(|fragment| fragment.text.as_str())
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Full extraction pipeline: classify every executable fragment of the
/// document, aggregate the survivors, and sanitize the result. The returned
/// text is ready for sandbox execution (and may be empty when the document
/// contains nothing worth keeping).
pub fn distill(notebook: &Notebook) -> Result<String, ClassifyError> {
    let mut classified = Vec::new();
    for fragment in notebook.fragments() {
        classified.push(classify(&fragment)?);
    }
    Ok(sanitize(&aggregate(&classified)))
}
