// src/error.rs
// Error taxonomy for card handling, catalog persistence and storage.

use derive_more::{Display, Error};

use crate::defs::Number;

#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum BingoError {
    /// The card does not hold exactly the expected amount of numbers.
    #[display("Invalid card shape: expected {expected} numbers, found {found}")]
    InvalidCardShape { expected: usize, found: usize },

    #[display("Number {number} is outside the 1-75 range")]
    NumberOutOfRange { number: Number },

    /// A number sits in (or is moved to) a column whose range does not contain it.
    #[display("Number {number} does not belong to column {column}")]
    NumberOutOfColumn { number: Number, column: char },

    #[display("Number {number} appears more than once on the card")]
    DuplicateNumber { number: Number },

    #[display("The center cell is the free space and cannot hold a number")]
    CenterCell,

    #[display("Cell ({row}, {col}) is empty")]
    EmptyCell { row: usize, col: usize },

    #[display("Cell ({row}, {col}) is outside the grid")]
    OutOfGrid { row: usize, col: usize },

    /// Recovered locally by falling back to the default catalog.
    #[display("Unparseable persisted pattern catalog: {reason}")]
    UnparseablePersistedCatalog { reason: String },

    #[display("Storage error: {message}")]
    Store { message: String },
}

impl BingoError {
    pub fn store(message: impl Into<String>) -> Self {
        BingoError::Store { message: message.into() }
    }
}

impl From<std::io::Error> for BingoError {
    fn from(err: std::io::Error) -> Self {
        BingoError::store(format!("I/O error: {err}"))
    }
}

impl From<serde_json::Error> for BingoError {
    fn from(err: serde_json::Error) -> Self {
        BingoError::store(format!("Serialization error: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = BingoError::InvalidCardShape { expected: 24, found: 23 };
        assert_eq!(err.to_string(), "Invalid card shape: expected 24 numbers, found 23");

        let err = BingoError::NumberOutOfColumn { number: 20, column: 'B' };
        assert_eq!(err.to_string(), "Number 20 does not belong to column B");
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: BingoError = io.into();
        assert!(matches!(err, BingoError::Store { .. }));
        assert!(err.to_string().contains("missing"));
    }
}
