//! Error types for the explevel core library.

use thiserror::Error;

/// Top-level error type for all explevel operations.
#[derive(Error, Debug)]
pub enum ExpError {
    /// No record with the given id is registered in the store.
    #[error("The element with id {0} cannot be found")]
    NotFound(String),

    /// A record with the given id is already registered in the store.
    #[error("The entry with id {0} already exists")]
    DuplicateKey(String),

    /// The experience band between `level` and `level + 1` is empty, so
    /// progress through it is undefined.
    #[error("Cannot compute progress at level {level}: next level needs no extra experience")]
    DivideByZero {
        /// Level whose band is degenerate.
        level: i64,
    },

    /// An intermediate value left the `i64` range.
    #[error("Arithmetic overflow in {operation}")]
    ArithmeticOverflow {
        /// Which calculation overflowed.
        operation: &'static str,
    },

    /// JSON encoding failure while writing a store.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// File missing, unreadable, or holding malformed data.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience Result type alias.
pub type Result<T> = std::result::Result<T, ExpError>;
