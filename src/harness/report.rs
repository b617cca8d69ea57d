//! Check outcomes and session report.

use serde::Serialize;
use std::fmt;

/// Terminal outcome of one check. Never an uncaught fault: recoverable
/// preconditions resolve to `Skipped` or `Failed` per harness policy,
/// behavioral mismatches are always `Failed`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "reason", rename_all = "snake_case")]
pub enum CheckResult {
    /// The check executed and its assertions held
    Passed,
    /// A precondition was missing and lenient policy applied
    Skipped(String),
    /// A precondition was missing under strict policy, or an assertion
    /// failed
    Failed(String),
}

impl CheckResult {
    /// Whether this outcome is `Passed`.
    pub fn is_passed(&self) -> bool {
        matches!(self, Self::Passed)
    }

    /// Whether this outcome is `Skipped`.
    pub fn is_skipped(&self) -> bool {
        matches!(self, Self::Skipped(_))
    }

    /// Whether this outcome is `Failed`.
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

impl fmt::Display for CheckResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Passed => write!(f, "passed"),
            Self::Skipped(reason) => write!(f, "skipped: {reason}"),
            Self::Failed(reason) => write!(f, "failed: {reason}"),
        }
    }
}

/// A named check outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckOutcome {
    /// Check name
    pub name: String,
    /// Terminal result
    pub result: CheckResult,
}

/// Aggregated outcomes for one harness session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Report {
    outcomes: Vec<CheckOutcome>,
}

impl Report {
    /// Create an empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a check outcome. Outcomes are terminal: a name already
    /// recorded keeps its first result.
    pub fn record(&mut self, name: impl Into<String>, result: CheckResult) {
        let name = name.into();
        if self.get(&name).is_none() {
            self.outcomes.push(CheckOutcome { name, result });
        }
    }

    /// All outcomes, in check order.
    pub fn outcomes(&self) -> &[CheckOutcome] {
        &self.outcomes
    }

    /// Result of a named check, if recorded.
    pub fn get(&self, name: &str) -> Option<&CheckResult> {
        self.outcomes
            .iter()
            .find(|outcome| outcome.name == name)
            .map(|outcome| &outcome.result)
    }

    /// Session exit status: failure iff any check failed.
    pub fn is_failure(&self) -> bool {
        self.outcomes.iter().any(|o| o.result.is_failed())
    }

    /// Count of passed checks.
    pub fn passed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.result.is_passed()).count()
    }

    /// Count of skipped checks.
    pub fn skipped(&self) -> usize {
        self.outcomes.iter().filter(|o| o.result.is_skipped()).count()
    }

    /// Count of failed checks.
    pub fn failed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.result.is_failed()).count()
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for outcome in &self.outcomes {
            writeln!(f, "{}: {}", outcome.name, outcome.result)?;
        }
        writeln!(
            f,
            "{} passed, {} skipped, {} failed",
            self.passed(),
            self.skipped(),
            self.failed()
        )
    }
}
