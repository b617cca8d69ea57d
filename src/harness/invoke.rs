//! Adaptive invocation.
//!
//! Extracted symbols come with no signature contract, so construction and
//! calls run through an explicit, ordered list of calling conventions: the
//! canonical keyword form first, then a positional form derived from the
//! same argument table in declared order. A `TypeError` means "called it
//! wrong" and moves to the next strategy; every other exception means "it
//! is broken" and is surfaced immediately, never retried.

use super::registry::ArgValue;
use pyo3::exceptions::PyTypeError;
use pyo3::prelude::*;
use pyo3::types::{PyDict, PyTuple};

/// One calling convention attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallStrategy {
    /// Arguments passed by keyword
    Keyword,
    /// Arguments passed positionally, in declared order
    Positional,
}

/// The fixed fallback order for both construction and calls.
pub const STRATEGY_PLAN: &[CallStrategy] = &[CallStrategy::Keyword, CallStrategy::Positional];

/// Invocation failures.
#[derive(Debug, thiserror::Error)]
pub enum InvokeError {
    /// Every strategy in the plan failed with a signature mismatch
    #[error("no calling convention accepted by `{symbol}`: {mismatch}")]
    SignatureExhausted {
        /// Symbol being invoked
        symbol: String,
        /// Text of the last signature mismatch
        mismatch: String,
    },

    /// The callable raised something other than a signature mismatch
    #[error("`{symbol}` raised: {source}")]
    Raised {
        /// Symbol being invoked
        symbol: String,
        /// The underlying Python exception
        #[source]
        source: PyErr,
    },
}

/// Construct an instance from a symbol using the strategy plan over its
/// argument table.
pub fn construct<'py>(
    py: Python<'py>,
    symbol: &str,
    callable: &'py PyAny,
    args: &[(&str, ArgValue)],
) -> Result<&'py PyAny, InvokeError> {
    let mut last_mismatch = String::from("no strategies attempted");

    for strategy in STRATEGY_PLAN {
        let attempt = match strategy {
            CallStrategy::Keyword => {
                let kwargs = PyDict::new(py);
                for (name, value) in args {
                    kwargs
                        .set_item(*name, value.to_object(py))
                        .map_err(|source| InvokeError::Raised {
                            symbol: symbol.to_string(),
                            source,
                        })?;
                }
                callable.call((), Some(kwargs))
            }
            CallStrategy::Positional => {
                let values: Vec<PyObject> =
                    args.iter().map(|(_, value)| value.to_object(py)).collect();
                callable.call1(PyTuple::new(py, values))
            }
        };

        match attempt {
            Ok(instance) => return Ok(instance),
            Err(err) if err.is_instance_of::<PyTypeError>(py) => {
                last_mismatch = err.to_string();
            }
            Err(source) => {
                return Err(InvokeError::Raised {
                    symbol: symbol.to_string(),
                    source,
                })
            }
        }
    }

    Err(InvokeError::SignatureExhausted {
        symbol: symbol.to_string(),
        mismatch: last_mismatch,
    })
}

/// Call a constructed instance (or plain function). The keyword strategy
/// passes `positional` plus `keywords`; the positional fallback drops the
/// keywords entirely, matching how loosely-specified forward methods tend
/// to differ (an optional `mask=None` that some implementations lack).
pub fn call<'py>(
    py: Python<'py>,
    symbol: &str,
    callable: &'py PyAny,
    positional: &[&PyAny],
    keywords: &[(&str, PyObject)],
) -> Result<&'py PyAny, InvokeError> {
    let plan: &[CallStrategy] = if keywords.is_empty() {
        &[CallStrategy::Positional]
    } else {
        STRATEGY_PLAN
    };
    let mut last_mismatch = String::from("no strategies attempted");

    for strategy in plan {
        let args = PyTuple::new(py, positional);
        let attempt = match strategy {
            CallStrategy::Keyword => {
                let kwargs = PyDict::new(py);
                for (name, value) in keywords {
                    kwargs
                        .set_item(*name, value)
                        .map_err(|source| InvokeError::Raised {
                            symbol: symbol.to_string(),
                            source,
                        })?;
                }
                callable.call(args, Some(kwargs))
            }
            CallStrategy::Positional => callable.call1(args),
        };

        match attempt {
            Ok(result) => return Ok(result),
            Err(err) if err.is_instance_of::<PyTypeError>(py) => {
                last_mismatch = err.to_string();
            }
            Err(source) => {
                return Err(InvokeError::Raised {
                    symbol: symbol.to_string(),
                    source,
                })
            }
        }
    }

    Err(InvokeError::SignatureExhausted {
        symbol: symbol.to_string(),
        mismatch: last_mismatch,
    })
}
