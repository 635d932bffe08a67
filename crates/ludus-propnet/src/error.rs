//! Circuit construction errors.

use std::error::Error;
use std::fmt;

use ludus_core::PoolError;

/// Errors raised while compiling a reference network into a circuit.
///
/// All of these are fatal: there is no partial or degraded circuit. A
/// malformed reference is fixed at its producer (the rule parser), and an
/// allocation failure is fixed at the pool the caller supplied.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CompileError {
    /// The reference network has no init proposition.
    MissingInit,
    /// The reference network has no terminal proposition.
    MissingTerminal,
    /// The pool could not produce a node.
    Allocation {
        /// The underlying pool failure.
        source: PoolError,
    },
}

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingInit => write!(f, "reference network has no init proposition"),
            Self::MissingTerminal => write!(f, "reference network has no terminal proposition"),
            Self::Allocation { source } => {
                write!(f, "node allocation failed: {source}")
            }
        }
    }
}

impl Error for CompileError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Allocation { source } => Some(source),
            _ => None,
        }
    }
}
