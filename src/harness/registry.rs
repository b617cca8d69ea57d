//! Expected-symbol registry.
//!
//! Fixed domain knowledge: the transformer building blocks a from-scratch
//! sequence-to-sequence notebook is expected to define, each with the
//! canonical hyperparameter shape used to construct it and the behavioral
//! probe the harness runs against it. Nothing here is derived at runtime.

use pyo3::prelude::*;

/// A literal constructor argument value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ArgValue {
    /// Integer hyperparameter (dimensions, counts)
    Int(i64),
    /// Float hyperparameter (rates, probabilities)
    Float(f64),
}

impl ToPyObject for ArgValue {
    fn to_object(&self, py: Python<'_>) -> PyObject {
        match self {
            Self::Int(v) => v.to_object(py),
            Self::Float(v) => v.to_object(py),
        }
    }
}

/// The behavioral probe a contract is checked with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Probe {
    /// Construct, apply to a zeros tensor of the given shape, and expect
    /// an output of the same shape
    SameShapeForward { batch: usize, seq: usize, dim: usize },
    /// Construct, apply to q/k/v tensors of the given shape (with an
    /// optional mask keyword), and expect an output of the same shape
    AttentionForward { batch: usize, seq: usize, dim: usize },
    /// Apply to a padded id matrix and expect a mask covering its rows
    PadMask,
    /// Apply to a size and expect a square mask of that size
    CausalMask,
    /// Presence and callability only
    Callable,
}

/// One logical contract: a symbol the document should define, how to
/// construct it, and how to probe it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SymbolContract {
    /// Symbol name expected in the namespace
    pub symbol: &'static str,
    /// Canonical constructor keyword arguments, in declared order (the
    /// positional fallback reuses this order)
    pub ctor_args: &'static [(&'static str, ArgValue)],
    /// Behavioral probe kind
    pub probe: Probe,
}

/// The catalogue of contracts the harness checks for.
pub const EXPECTED_SYMBOLS: &[SymbolContract] = &[
    SymbolContract {
        symbol: "PositionalEncoding",
        ctor_args: &[
            ("d_model", ArgValue::Int(32)),
            ("dropout", ArgValue::Float(0.0)),
            ("max_len", ArgValue::Int(50)),
        ],
        probe: Probe::SameShapeForward {
            batch: 2,
            seq: 10,
            dim: 32,
        },
    },
    SymbolContract {
        symbol: "MultiHeadAttention",
        ctor_args: &[
            ("d_model", ArgValue::Int(32)),
            ("n_heads", ArgValue::Int(4)),
            ("dropout", ArgValue::Float(0.0)),
        ],
        probe: Probe::AttentionForward {
            batch: 2,
            seq: 10,
            dim: 32,
        },
    },
    SymbolContract {
        symbol: "FeedForward",
        ctor_args: &[
            ("d_model", ArgValue::Int(32)),
            ("d_ff", ArgValue::Int(64)),
            ("dropout", ArgValue::Float(0.0)),
        ],
        probe: Probe::Callable,
    },
    SymbolContract {
        symbol: "EncoderLayer",
        ctor_args: &[],
        probe: Probe::Callable,
    },
    SymbolContract {
        symbol: "DecoderLayer",
        ctor_args: &[],
        probe: Probe::Callable,
    },
    SymbolContract {
        symbol: "TransformerModel",
        ctor_args: &[],
        probe: Probe::Callable,
    },
    SymbolContract {
        symbol: "LabelSmoothingLoss",
        ctor_args: &[],
        probe: Probe::Callable,
    },
    SymbolContract {
        symbol: "NoamWrapper",
        ctor_args: &[],
        probe: Probe::Callable,
    },
    SymbolContract {
        symbol: "make_pad_mask",
        ctor_args: &[],
        probe: Probe::PadMask,
    },
    SymbolContract {
        symbol: "make_causal_mask",
        ctor_args: &[],
        probe: Probe::CausalMask,
    },
];

/// Look up a contract by symbol name.
pub fn contract(symbol: &str) -> Option<&'static SymbolContract> {
    EXPECTED_SYMBOLS.iter().find(|c| c.symbol == symbol)
}
