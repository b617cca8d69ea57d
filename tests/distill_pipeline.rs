//! End-to-end pipeline scenarios: document in, verdicts out.

use destilar::{
    CheckResult, Harness, IntrospectionOutcome, Notebook, Sandbox,
};

/// A document mixing one reusable definition with heavy execution keeps
/// the definition and nothing else.
#[test]
fn test_definition_survives_training_loop_is_dropped() {
    let mut nb = Notebook::new();
    nb.add_code("def f(x):\n    return x");
    nb.add_code("for i in range(10):\n    print(i)");

    let sandbox = Sandbox::from_notebook(&nb).unwrap();
    let ns = sandbox.namespace();

    assert!(ns.contains("f"));
    assert!(!ns.contains("i"));
    assert_eq!(ns.outcome(), IntrospectionOutcome::Ok);
}

/// An empty document produces a namespace whose only content beyond the
/// seeded dependencies is the "nothing extracted" diagnostic.
#[test]
fn test_empty_document_yields_diagnostic_namespace() {
    let sandbox = Sandbox::from_notebook(&Notebook::new()).unwrap();
    match sandbox.namespace().outcome() {
        IntrospectionOutcome::ExecutionFailed(reason) => {
            assert!(reason.contains("extracted"), "unexpected reason: {reason}");
        }
        IntrospectionOutcome::Ok => panic!("empty document must carry a diagnostic"),
    }
}

/// Strict mode escalates a missing-symbol condition to Failed; lenient
/// mode resolves the same condition to Skipped.
#[test]
fn test_strict_mode_escalates_missing_symbols() {
    let json = r##"{
        "nbformat": 4,
        "cells": [
            {"cell_type": "markdown", "source": "# No code here"},
            {"cell_type": "code", "source": "HELPER = 3"}
        ]
    }"##;

    let nb = Notebook::from_ipynb(json).unwrap();

    let lenient = Harness::new(Sandbox::from_notebook(&nb).unwrap());
    let report = lenient.run();
    assert!(matches!(
        report.get("core_symbols_present"),
        Some(CheckResult::Skipped(_))
    ));
    assert!(!report.is_failure());

    let strict = Harness::new(Sandbox::from_notebook(&nb).unwrap()).with_strict(true);
    let report = strict.run();
    assert!(matches!(
        report.get("core_symbols_present"),
        Some(CheckResult::Failed(_))
    ));
    assert!(report.is_failure());
}

/// Full run over a realistic document: hyperparameters and definitions
/// survive, training execution does not, and the lenient harness reports
/// no failures whether or not a tensor runtime is installed.
#[test]
fn test_full_document_lenient_run() {
    let mut nb = Notebook::new();
    nb.add_markdown("# Transformer from scratch");
    nb.add_code("import math\nD_MODEL = 32\nEPOCHS = 30");
    nb.add_code(
        "class PositionalEncoding:\n    def __init__(self, d_model, dropout, max_len):\n        self.d_model = d_model\n    def __call__(self, x):\n        return x",
    );
    nb.add_code("def make_causal_mask(size):\n    return torch.ones(size, size)");
    nb.add_code("for epoch in range(EPOCHS):\n    print('training', epoch)");
    nb.add_code("losses = train_model()");

    let sandbox = Sandbox::from_notebook(&nb).unwrap();
    assert!(sandbox.source().contains("D_MODEL = 32"));
    assert!(!sandbox.source().contains("train_model"));

    let ns = sandbox.namespace();
    assert!(ns.contains("PositionalEncoding"));
    assert!(ns.contains("make_causal_mask"));
    assert!(ns.contains("D_MODEL"));
    assert!(!ns.contains("losses"));

    let report = Harness::new(sandbox).run();
    assert!(!report.is_failure(), "report:\n{report}");
    assert!(matches!(
        report.get("core_symbols_present"),
        Some(CheckResult::Passed)
    ));
}

/// Fragments that fail to parse are dropped locally; the rest of the
/// document still loads.
#[test]
fn test_unparseable_fragment_is_local_failure() {
    let mut nb = Notebook::new();
    nb.add_code("%matplotlib inline");
    nb.add_code("def survivor():\n    return 1");

    let sandbox = Sandbox::from_notebook(&nb).unwrap();
    let ns = sandbox.namespace();
    assert!(ns.contains("survivor"));
    assert_eq!(ns.outcome(), IntrospectionOutcome::Ok);
}

/// Definitions in later fragments can rely on constants from earlier ones:
/// aggregation preserves document order.
#[test]
fn test_cross_fragment_dependency_order() {
    let mut nb = Notebook::new();
    nb.add_code("VOCAB = 100");
    nb.add_code("def vocab_size():\n    return VOCAB");

    let sandbox = Sandbox::from_notebook(&nb).unwrap();
    let ns = sandbox.namespace();
    assert_eq!(ns.outcome(), IntrospectionOutcome::Ok);
    assert!(ns.contains("vocab_size"));
}
