// src/draft.rs
// Card correction workflow: recognized numbers are laid out on a draft grid
// that the player fixes up cell by cell before it becomes a card.

use std::collections::HashSet;

use crate::card::Card;
use crate::columns::{column_of, COLUMNS};
use crate::defs::{Number, FIRSTNUMBER, GRID_SIZE, LASTNUMBER, NUMBERSPERCARD};
use crate::error::BingoError;
use crate::lines::{non_center_cells, Coordinate};

/// Pulls every number in the 1-75 range out of recognized text, keeping the
/// first occurrence of each.
pub fn parse_numbers(text: &str) -> Vec<Number> {
    let mut seen = HashSet::new();
    text.split(|c: char| !c.is_ascii_digit())
        .filter(|token| !token.is_empty())
        .filter_map(|token| token.parse::<u32>().ok())
        .filter(|&n| (FIRSTNUMBER as u32..=LASTNUMBER as u32).contains(&n))
        .map(|n| n as Number)
        .filter(|&n| seen.insert(n))
        .collect()
}

/// A partially filled grid plus, per column, the numbers not yet placed.
///
/// Every number of 1-75 is always in exactly one place: a cell or the bank
/// of its column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardDraft {
    cells: [[Option<Number>; GRID_SIZE]; GRID_SIZE],
    banks: [Vec<Number>; GRID_SIZE],
}

impl CardDraft {
    pub fn new() -> Self {
        Self::from_numbers(&[])
    }

    /// Places numbers in ascending order into the first free cell of their
    /// column, top to bottom. Numbers that find no free cell stay in the bank.
    pub fn from_numbers(numbers: &[Number]) -> Self {
        let mut cells = [[None; GRID_SIZE]; GRID_SIZE];
        let mut placed = HashSet::new();

        let mut sorted = numbers.to_vec();
        sorted.sort_unstable();
        for number in sorted {
            let Some(col) = column_of(number) else {
                continue;
            };
            if placed.contains(&number) {
                continue;
            }
            let free_row = (0..GRID_SIZE)
                .find(|&row| cells[row][col].is_none() && !Coordinate::new(row, col).is_center());
            if let Some(row) = free_row {
                cells[row][col] = Some(number);
                placed.insert(number);
            }
        }

        let banks: [Vec<Number>; GRID_SIZE] = COLUMNS.map(|column| column.numbers().filter(|n| !placed.contains(n)).collect());

        CardDraft { cells, banks }
    }

    pub fn cell(&self, coord: Coordinate) -> Option<Number> {
        self.cells.get(coord.row).and_then(|row| row.get(coord.col)).copied().flatten()
    }

    pub fn bank(&self, col: usize) -> &[Number] {
        self.banks.get(col).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn filled(&self) -> usize {
        self.cells.iter().flatten().filter(|c| c.is_some()).count()
    }

    pub fn is_complete(&self) -> bool {
        self.filled() == NUMBERSPERCARD
    }

    fn find_cell(&self, number: Number) -> Option<Coordinate> {
        non_center_cells().into_iter().find(|&c| self.cell(c) == Some(number))
    }

    fn return_to_bank(&mut self, number: Number) {
        if let Some(col) = column_of(number) {
            let bank = &mut self.banks[col];
            bank.push(number);
            bank.sort_unstable();
        }
    }

    fn check_target(coord: Coordinate) -> Result<(), BingoError> {
        if !coord.in_grid() {
            return Err(BingoError::OutOfGrid { row: coord.row, col: coord.col });
        }
        if coord.is_center() {
            return Err(BingoError::CenterCell);
        }
        Ok(())
    }

    /// Moves `number` onto `target`, from its bank or from another cell.
    ///
    /// From the bank, a displaced occupant goes back to its bank. Between
    /// cells the two numbers swap.
    pub fn place(&mut self, number: Number, target: Coordinate) -> Result<(), BingoError> {
        Self::check_target(target)?;
        let Some(col) = column_of(number) else {
            return Err(BingoError::NumberOutOfRange { number });
        };
        if col != target.col {
            return Err(BingoError::NumberOutOfColumn { number, column: COLUMNS[target.col].label });
        }

        let occupant = self.cells[target.row][target.col];
        match self.find_cell(number) {
            Some(source) if source == target => Ok(()),
            Some(source) => {
                // Source and target share a column, so the occupant fits either cell
                self.cells[target.row][target.col] = Some(number);
                self.cells[source.row][source.col] = occupant;
                Ok(())
            }
            None => {
                self.banks[col].retain(|&n| n != number);
                self.cells[target.row][target.col] = Some(number);
                if let Some(previous) = occupant {
                    self.return_to_bank(previous);
                }
                Ok(())
            }
        }
    }

    /// Swaps two cells of the same column.
    pub fn swap(&mut self, a: Coordinate, b: Coordinate) -> Result<(), BingoError> {
        Self::check_target(a)?;
        Self::check_target(b)?;
        let (first, second) = (self.cells[a.row][a.col], self.cells[b.row][b.col]);
        if a.col != b.col {
            if let Some(number) = first {
                return Err(BingoError::NumberOutOfColumn { number, column: COLUMNS[b.col].label });
            }
            if let Some(number) = second {
                return Err(BingoError::NumberOutOfColumn { number, column: COLUMNS[a.col].label });
            }
        }
        self.cells[a.row][a.col] = second;
        self.cells[b.row][b.col] = first;
        Ok(())
    }

    /// Clears a cell, sending its number back to the bank.
    pub fn remove(&mut self, coord: Coordinate) -> Result<Number, BingoError> {
        Self::check_target(coord)?;
        let Some(number) = self.cells[coord.row][coord.col].take() else {
            return Err(BingoError::EmptyCell { row: coord.row, col: coord.col });
        };
        self.return_to_bank(number);
        Ok(number)
    }

    /// Reads the grid row by row into a validated card.
    pub fn finalize(&self) -> Result<Card, BingoError> {
        let numbers: Vec<Number> = non_center_cells().into_iter().filter_map(|c| self.cell(c)).collect();
        if numbers.len() != NUMBERSPERCARD {
            return Err(BingoError::InvalidCardShape {
                expected: NUMBERSPERCARD,
                found: numbers.len(),
            });
        }
        Card::new(numbers)
    }
}

impl Default for CardDraft {
    fn default() -> Self {
        Self::new()
    }
}
