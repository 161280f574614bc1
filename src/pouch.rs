// src/pouch.rs
// The pool of numbers still waiting to be called.

use serde::{Deserialize, Serialize};

use crate::defs::{Number, FIRSTNUMBER, LASTNUMBER};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pouch {
    pub numbers: Vec<Number>,
}

impl Pouch {
    pub fn new() -> Self {
        Pouch {
            numbers: (FIRSTNUMBER..=LASTNUMBER).collect(),
        }
    }

    /// Pouch holding every number of the range not already drawn.
    pub fn without(drawn: &[Number]) -> Self {
        Pouch {
            numbers: (FIRSTNUMBER..=LASTNUMBER).filter(|n| !drawn.contains(n)).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.numbers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.numbers.is_empty()
    }

    pub fn contains(&self, number: Number) -> bool {
        self.numbers.contains(&number)
    }

    /// Removes a uniformly random number, `None` once the pouch is empty.
    pub fn extract(&mut self) -> Option<Number> {
        if self.is_empty() {
            None
        } else {
            let random_index = rand::random_range(0..self.len());
            Some(self.numbers.remove(random_index))
        }
    }
}

impl Default for Pouch {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_new_pouch_is_full() {
        let pouch = Pouch::new();
        assert_eq!(pouch.len(), 75);
        assert!(pouch.contains(1));
        assert!(pouch.contains(75));
        assert!(!pouch.contains(76));
    }

    #[test]
    fn test_extract_until_empty() {
        let mut pouch = Pouch::new();
        let mut seen = HashSet::new();
        while let Some(number) = pouch.extract() {
            assert!((FIRSTNUMBER..=LASTNUMBER).contains(&number));
            assert!(seen.insert(number), "number {number} extracted twice");
        }
        assert_eq!(seen.len(), 75);
        assert!(pouch.is_empty());
        assert_eq!(pouch.extract(), None);
    }

    #[test]
    fn test_without() {
        let pouch = Pouch::without(&[1, 75, 40]);
        assert_eq!(pouch.len(), 72);
        assert!(!pouch.contains(40));
    }
}
