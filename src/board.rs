// src/board.rs
// Numbers called so far, kept in the order they were drawn.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::defs::Number;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Board(Vec<Number>);

impl Board {
    pub fn new() -> Self {
        Board(Vec::new())
    }

    pub fn from_numbers(numbers: Vec<Number>) -> Self {
        Board(numbers)
    }

    pub fn push(&mut self, number: Number) {
        self.0.push(number);
    }

    pub fn get_numbers(&self) -> &[Number] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, number: Number) -> bool {
        self.0.contains(&number)
    }

    pub fn last_number(&self) -> Option<Number> {
        self.0.last().copied()
    }

    pub fn drawn_set(&self) -> HashSet<Number> {
        self.0.iter().copied().collect()
    }

    pub fn get_sorted_numbers(&self) -> Vec<Number> {
        let mut sorted = self.0.clone();
        sorted.sort_unstable();
        sorted
    }

    /// Up to `n` numbers drawn before the last one, most recent first.
    pub fn get_last_numbers(&self, n: usize) -> Vec<Number> {
        if self.0.len() <= 1 {
            return Vec::new();
        }

        let available_previous = self.0.len() - 1;
        let numbers_to_show = std::cmp::min(n, available_previous);
        let start_index = self.0.len() - numbers_to_show - 1;
        let end_index = self.0.len() - 1;

        let mut result: Vec<Number> = self.0[start_index..end_index].to_vec();
        result.reverse();
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_numbers() {
        let board = Board::from_numbers(vec![10, 20, 30, 40, 50]);
        assert_eq!(board.last_number(), Some(50));
        assert_eq!(board.get_last_numbers(3), vec![40, 30, 20]);
        assert_eq!(board.get_last_numbers(10), vec![40, 30, 20, 10]);
    }

    #[test]
    fn test_last_numbers_short_board() {
        assert!(Board::new().get_last_numbers(3).is_empty());
        assert!(Board::from_numbers(vec![7]).get_last_numbers(3).is_empty());
        assert_eq!(Board::new().last_number(), None);
    }

    #[test]
    fn test_sorted_and_set() {
        let mut board = Board::new();
        for n in [42, 3, 17] {
            board.push(n);
        }
        assert_eq!(board.get_sorted_numbers(), vec![3, 17, 42]);
        assert_eq!(board.get_numbers().to_vec(), vec![42, 3, 17]);
        assert!(board.drawn_set().contains(&17));
        assert!(board.contains(3));
        assert_eq!(board.len(), 3);
    }
}
