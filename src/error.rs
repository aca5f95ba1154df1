//! Error types shared by the grammar engine and the turtle interpreter.
//!
//! Every failure is returned to the caller as a typed [`LsysError`]; nothing in
//! this crate logs or partially mutates caller-owned state on the error path.

use std::fmt;

/// Errors produced while expanding a grammar or interpreting a symbol string.
#[derive(Clone, Debug, PartialEq)]
pub enum LsysError {
    /// A configuration value is out of its valid domain.
    InvalidParameter {
        name: &'static str,
        reason: String,
    },

    /// Expansion would produce more symbols than the configured ceiling.
    GrammarTooLarge {
        /// The ceiling that would have been exceeded.
        limit: usize,
        /// 1-based rewrite pass that crosses the ceiling.
        pass: u32,
    },

    /// Strict interpretation met a symbol with no action table entry.
    UnknownSymbol { symbol: char, index: usize },

    /// The cancellation flag was raised between rewrite passes.
    Cancelled { completed_passes: u32 },
}

impl LsysError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for LsysError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LsysError::InvalidParameter { name, reason } => {
                write!(f, "Invalid parameter '{}': {}", name, reason)
            }
            LsysError::GrammarTooLarge { limit, pass } => {
                write!(
                    f,
                    "Grammar too large: pass {} exceeds the limit of {} symbols",
                    pass, limit
                )
            }
            LsysError::UnknownSymbol { symbol, index } => {
                write!(f, "Unknown symbol '{}' at index {}", symbol, index)
            }
            LsysError::Cancelled { completed_passes } => {
                write!(f, "Expansion cancelled after {} passes", completed_passes)
            }
        }
    }
}

impl std::error::Error for LsysError {}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, LsysError>;
