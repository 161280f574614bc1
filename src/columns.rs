// src/columns.rs
// Column constraints of a 75-ball card: each column owns a band of 15 numbers.

use crate::defs::Number;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnRange {
    pub lower: Number,
    pub upper: Number,
    pub label: char,
}

impl ColumnRange {
    pub fn contains(&self, number: Number) -> bool {
        (self.lower..=self.upper).contains(&number)
    }

    pub fn numbers(&self) -> impl Iterator<Item = Number> {
        self.lower..=self.upper
    }
}

pub const COLUMNS: [ColumnRange; 5] = [
    ColumnRange { lower: 1, upper: 15, label: 'B' },
    ColumnRange { lower: 16, upper: 30, label: 'I' },
    ColumnRange { lower: 31, upper: 45, label: 'N' },
    ColumnRange { lower: 46, upper: 60, label: 'G' },
    ColumnRange { lower: 61, upper: 75, label: 'O' },
];

pub fn range_of(col: usize) -> Option<ColumnRange> {
    COLUMNS.get(col).copied()
}

pub fn column_label(col: usize) -> Option<char> {
    COLUMNS.get(col).map(|c| c.label)
}

/// Index of the column whose range holds `number`, if any.
pub fn column_of(number: Number) -> Option<usize> {
    COLUMNS.iter().position(|c| c.contains(number))
}

/// Count of drawn numbers per column, in column order.
pub fn column_stats<'a, I>(drawn: I) -> [(char, usize); 5]
where
    I: IntoIterator<Item = &'a Number>,
{
    let mut stats = COLUMNS.map(|c| (c.label, 0));
    for &number in drawn {
        if let Some(col) = column_of(number) {
            stats[col].1 += 1;
        }
    }
    stats
}
