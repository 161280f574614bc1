// src/defs.rs
// Shared constants and basic types for the bingo caller.

use serde::{Deserialize, Serialize};
use std::fmt;

pub type Number = u8;

pub struct GridStruct {
    pub rows: u8,
    pub cols: u8,
    pub center_row: u8,
    pub center_col: u8,
}

pub const GRIDCONFIG: GridStruct = GridStruct {
    rows: 5,       // number of rows in a card
    cols: 5,       // number of columns in a card
    center_row: 2, // row of the free space
    center_col: 2, // column of the free space
};

pub const GRID_SIZE: usize = GRIDCONFIG.rows as usize;
pub const FIRSTNUMBER: Number = 1;
pub const LASTNUMBER: Number = 75;
// Every cell except the free center
pub const NUMBERSPERCARD: usize = (GRIDCONFIG.rows as usize) * (GRIDCONFIG.cols as usize) - 1;

/// A single cell of a mapped card: either the free center or a card number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    Free,
    Number(Number),
}

impl Cell {
    pub fn number(&self) -> Option<Number> {
        match self {
            Cell::Free => None,
            Cell::Number(n) => Some(*n),
        }
    }

    pub fn is_free(&self) -> bool {
        matches!(self, Cell::Free)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Free => write!(f, "FREE"),
            Cell::Number(n) => write!(f, "{n}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbers_per_card() {
        assert_eq!(NUMBERSPERCARD, 24);
        assert_eq!(LASTNUMBER - FIRSTNUMBER + 1, 75);
    }

    #[test]
    fn test_cell_accessors() {
        assert_eq!(Cell::Number(12).number(), Some(12));
        assert_eq!(Cell::Free.number(), None);
        assert!(Cell::Free.is_free());
        assert_eq!(Cell::Free.to_string(), "FREE");
        assert_eq!(Cell::Number(7).to_string(), "7");
    }
}
