// src/card.rs
// The player's card: a flat sequence of 24 numbers laid out around the free center.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::columns::{column_of, COLUMNS};
use crate::defs::{Cell, Number, GRID_SIZE, NUMBERSPERCARD};
use crate::error::BingoError;
use crate::lines::{non_center_cells, Coordinate};
use crate::logging::{log_info, log_warning};
use crate::store::PreferenceStore;

pub const CARD_STORAGE_KEY: &str = "bingo_card";

/// Card numbers in row-major order, skipping the free center.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Card(Vec<Number>);

impl Card {
    /// Validates shape, column placement and uniqueness.
    pub fn new(numbers: Vec<Number>) -> Result<Self, BingoError> {
        validate_card(&numbers)?;
        Ok(Card(numbers))
    }

    /// Trusts the caller to have validated the numbers upstream.
    pub fn from_unchecked(numbers: Vec<Number>) -> Self {
        Card(numbers)
    }

    pub fn numbers(&self) -> &[Number] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn to_grid(&self) -> Result<Grid, BingoError> {
        map_card_to_grid(&self.0)
    }
}

/// Checks a flat card against the column table once mapped onto the grid.
pub fn validate_card(numbers: &[Number]) -> Result<(), BingoError> {
    if numbers.len() != NUMBERSPERCARD {
        return Err(BingoError::InvalidCardShape {
            expected: NUMBERSPERCARD,
            found: numbers.len(),
        });
    }

    let mut seen = HashSet::new();
    for (&number, coord) in numbers.iter().zip(non_center_cells()) {
        let column = COLUMNS[coord.col];
        if column_of(number).is_none() {
            return Err(BingoError::NumberOutOfRange { number });
        }
        if !column.contains(number) {
            return Err(BingoError::NumberOutOfColumn { number, column: column.label });
        }
        if !seen.insert(number) {
            return Err(BingoError::DuplicateNumber { number });
        }
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    cells: [[Cell; GRID_SIZE]; GRID_SIZE],
}

impl Grid {
    pub fn cell(&self, coord: Coordinate) -> Option<Cell> {
        self.cells.get(coord.row).and_then(|row| row.get(coord.col)).copied()
    }

    pub fn rows(&self) -> &[[Cell; GRID_SIZE]; GRID_SIZE] {
        &self.cells
    }

    /// The 24 card numbers in row-major order.
    pub fn numbers(&self) -> Vec<Number> {
        self.cells.iter().flatten().filter_map(Cell::number).collect()
    }

    /// Whether the cell counts as covered: the free center always does.
    pub fn is_marked(&self, coord: Coordinate, drawn: &HashSet<Number>) -> bool {
        match self.cell(coord) {
            Some(Cell::Free) => true,
            Some(Cell::Number(n)) => drawn.contains(&n),
            None => false,
        }
    }
}

/// Lays the card out row by row, putting the free space in the center
/// without consuming a card number.
pub fn map_card_to_grid(numbers: &[Number]) -> Result<Grid, BingoError> {
    if numbers.len() != NUMBERSPERCARD {
        return Err(BingoError::InvalidCardShape {
            expected: NUMBERSPERCARD,
            found: numbers.len(),
        });
    }

    let mut cells = [[Cell::Free; GRID_SIZE]; GRID_SIZE];
    let mut cursor = numbers.iter();
    for (row, row_cells) in cells.iter_mut().enumerate() {
        for (col, cell) in row_cells.iter_mut().enumerate() {
            if Coordinate::new(row, col).is_center() {
                continue;
            }
            // Length was checked above, so the cursor never runs dry
            if let Some(&number) = cursor.next() {
                *cell = Cell::Number(number);
            }
        }
    }

    Ok(Grid { cells })
}

/// Persisted form of the player's card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredCard {
    pub numbers: Vec<Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_src: Option<String>,
}

pub fn save_card<S: PreferenceStore + ?Sized>(store: &mut S, card: &Card, image_src: Option<String>) -> Result<(), BingoError> {
    let stored = StoredCard {
        numbers: card.numbers().to_vec(),
        image_src,
    };
    store.set(CARD_STORAGE_KEY, &serde_json::to_string(&stored)?)?;
    log_info(&format!("Card saved with {} numbers", card.len()));
    Ok(())
}

/// Loads the stored card; an unreadable or invalid blob counts as no card.
pub fn load_card<S: PreferenceStore + ?Sized>(store: &S) -> Option<Card> {
    let blob = match store.get(CARD_STORAGE_KEY) {
        Ok(Some(blob)) => blob,
        Ok(None) => return None,
        Err(e) => {
            log_warning(&format!("Could not read stored card: {e}"));
            return None;
        }
    };

    let stored: StoredCard = match serde_json::from_str(&blob) {
        Ok(stored) => stored,
        Err(e) => {
            log_warning(&format!("Stored card is unreadable: {e}"));
            return None;
        }
    };

    match Card::new(stored.numbers) {
        Ok(card) => Some(card),
        Err(e) => {
            log_warning(&format!("Stored card is invalid: {e}"));
            None
        }
    }
}

pub fn clear_card<S: PreferenceStore + ?Sized>(store: &mut S) -> Result<(), BingoError> {
    store.remove(CARD_STORAGE_KEY)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::store::MemoryStore;

    /// A column-valid card: every row takes the next numbers of each column band.
    pub(crate) fn sample_numbers() -> Vec<Number> {
        let mut numbers = Vec::new();
        for row in 0..GRID_SIZE {
            for col in 0..GRID_SIZE {
                if Coordinate::new(row, col).is_center() {
                    continue;
                }
                numbers.push(COLUMNS[col].lower + row as Number);
            }
        }
        numbers
    }

    #[test]
    fn test_map_card_fills_row_major_around_center() {
        let numbers = sample_numbers();
        let grid = map_card_to_grid(&numbers).unwrap();

        assert_eq!(grid.cell(Coordinate::new(2, 2)), Some(Cell::Free));
        for (index, coord) in non_center_cells().into_iter().enumerate() {
            assert_eq!(grid.cell(coord), Some(Cell::Number(numbers[index])));
        }
        assert_eq!(grid.numbers(), numbers);
    }

    #[test]
    fn test_center_is_free_regardless_of_contents() {
        let numbers: Vec<Number> = (1..=24).collect();
        let grid = map_card_to_grid(&numbers).unwrap();
        assert_eq!(grid.cell(Coordinate::new(2, 2)), Some(Cell::Free));
        assert_eq!(grid.cell(Coordinate::new(2, 1)), Some(Cell::Number(12)));
        assert_eq!(grid.cell(Coordinate::new(2, 3)), Some(Cell::Number(13)));
        assert_eq!(grid.cell(Coordinate::new(4, 4)), Some(Cell::Number(24)));
    }

    #[test]
    fn test_map_card_rejects_wrong_length() {
        for len in [0, 23, 25] {
            let numbers: Vec<Number> = (1..=len as Number).collect();
            let err = map_card_to_grid(&numbers).unwrap_err();
            assert_eq!(err, BingoError::InvalidCardShape { expected: 24, found: len });
        }
    }

    #[test]
    fn test_validate_card() {
        assert!(Card::new(sample_numbers()).is_ok());

        let mut wrong_column = sample_numbers();
        wrong_column.swap(0, 1);
        assert!(matches!(Card::new(wrong_column), Err(BingoError::NumberOutOfColumn { .. })));

        let mut duplicate = sample_numbers();
        duplicate[5] = duplicate[0];
        assert_eq!(Card::new(duplicate), Err(BingoError::DuplicateNumber { number: 1 }));

        let mut out_of_range = sample_numbers();
        out_of_range[4] = 80;
        assert_eq!(Card::new(out_of_range), Err(BingoError::NumberOutOfRange { number: 80 }));
    }

    #[test]
    fn test_is_marked() {
        let grid = map_card_to_grid(&sample_numbers()).unwrap();
        let drawn: HashSet<Number> = [1].into_iter().collect();
        assert!(grid.is_marked(Coordinate::new(0, 0), &drawn));
        assert!(grid.is_marked(Coordinate::new(2, 2), &drawn));
        assert!(!grid.is_marked(Coordinate::new(0, 1), &drawn));
        assert!(!grid.is_marked(Coordinate::new(5, 0), &drawn));
    }

    #[test]
    fn test_card_persistence() {
        let mut store = MemoryStore::new();
        assert_eq!(load_card(&store), None);

        let card = Card::new(sample_numbers()).unwrap();
        save_card(&mut store, &card, None).unwrap();
        assert_eq!(load_card(&store), Some(card));

        clear_card(&mut store).unwrap();
        assert_eq!(load_card(&store), None);
    }

    #[test]
    fn test_unreadable_card_loads_as_none() {
        let mut store = MemoryStore::new();
        store.set(CARD_STORAGE_KEY, "not json").unwrap();
        assert_eq!(load_card(&store), None);

        store.set(CARD_STORAGE_KEY, r#"{"numbers":[1,2,3]}"#).unwrap();
        assert_eq!(load_card(&store), None);
    }
}
