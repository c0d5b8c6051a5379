//! Error types for card_tracker

use thiserror::Error;

/// Unified error type for card and collection operations
#[derive(Debug, Error)]
pub enum CollectionError {
    /// A required text field was empty or whitespace only
    #[error("{field} cannot be empty")]
    BlankField { field: &'static str },

    /// Value is not a member of a closed vocabulary (rarity, condition, color)
    #[error("Invalid {field} '{value}'. Must be one of: {accepted}")]
    InvalidEnumeration {
        field: &'static str,
        value: String,
        accepted: String,
    },

    /// Numeric field below zero
    #[error("{field} cannot be negative (got {value})")]
    NegativeValue { field: &'static str, value: String },

    /// No card was supplied to an insert
    #[error("Cannot add an empty card record to the collection")]
    NullRecord,

    #[error("Invalid card index {index}: collection holds {len} card(s)")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Card '{name}' not found in collection")]
    NotFound { name: String },

    /// Average requested over an empty collection
    #[error("Cannot average card values of an empty collection")]
    DivideByZero,

    /// A CSV row with the right shape that still failed to build a card
    #[error("Line {line}: cannot import card '{name}': {reason}")]
    MalformedRow {
        line: u64,
        name: String,
        reason: String,
    },

    /// Opening or creating the collection file failed
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Reading or writing CSV data failed mid-stream
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Result alias for card_tracker operations
pub type Result<T> = std::result::Result<T, CollectionError>;
