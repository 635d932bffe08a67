//! Error types shared across the pool strategies.

use std::error::Error;
use std::fmt;

/// Errors that can occur during pool operations.
///
/// Capacity exhaustion and misuse of a strategy (double free, `clear` on
/// an unbounded pool) are *not* represented here: those are caller
/// contract violations and panic, per the documented precondition on each
/// operation. The only recoverable failure a pool can surface is the
/// supplied item constructor failing, in which case the pool guarantees
/// it has performed no mutation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PoolError {
    /// The [`ItemAllocator`](crate::ItemAllocator) could not construct a
    /// new item.
    ItemConstruction {
        /// Human-readable description of the construction failure.
        reason: String,
    },
}

impl fmt::Display for PoolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ItemConstruction { reason } => {
                write!(f, "item construction failed: {reason}")
            }
        }
    }
}

impl Error for PoolError {}
