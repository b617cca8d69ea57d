//! Text-level cleanup of regenerated source.
//!
//! Program-text regeneration handles structure; this pass handles the
//! artifacts that survive it at the text level: backslash line
//! continuations, stray backslash-plus-whitespace before a newline, and
//! CRLF line endings. It is a defensive pass, not the primary correctness
//! mechanism.

use regex::Regex;
use std::sync::LazyLock;

// `foo \` at end of line, possibly with whitespace between the backslash
// and the newline.
static STRAY_CONTINUATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\\[ \t]+\n").expect("stray continuation pattern"));
static CONTINUATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\\\n").expect("continuation pattern"));

/// Normalize continuation artifacts and line endings.
///
/// Idempotent for all inputs: the substitutions run to a fixpoint, so
/// stacked backslashes cannot re-expose a continuation on a second pass.
pub fn sanitize(text: &str) -> String {
    let mut current = text.replace("\r\n", "\n");
    loop {
        let pass = STRAY_CONTINUATION.replace_all(&current, "\n");
        let pass = CONTINUATION.replace_all(&pass, "\n").into_owned();
        if pass == current {
            return current;
        }
        current = pass;
    }
}
