// src/lines.rs
// Grid geometry: every straight run of cells that can complete a line pattern.
//
// Lines are derived once per length and shared read-only afterwards.

use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use crate::defs::{GRIDCONFIG, GRID_SIZE};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coordinate {
    pub row: usize,
    pub col: usize,
}

impl Coordinate {
    pub const fn new(row: usize, col: usize) -> Self {
        Coordinate { row, col }
    }

    pub fn is_center(&self) -> bool {
        self.row == GRIDCONFIG.center_row as usize && self.col == GRIDCONFIG.center_col as usize
    }

    pub fn in_grid(&self) -> bool {
        self.row < GRID_SIZE && self.col < GRID_SIZE
    }
}

pub type Line = Vec<Coordinate>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Horizontal,
    Vertical,
    Diagonal,
}

impl Orientation {
    pub const ALL: [Orientation; 3] = [Orientation::Horizontal, Orientation::Vertical, Orientation::Diagonal];

    pub fn as_str(&self) -> &'static str {
        match self {
            Orientation::Horizontal => "horizontal",
            Orientation::Vertical => "vertical",
            Orientation::Diagonal => "diagonal",
        }
    }

    pub fn from_suffix(s: &str) -> Option<Self> {
        Orientation::ALL.into_iter().find(|o| o.as_str() == s)
    }
}

/// Supported line lengths: a "terço" run of three or a full "quina" of five.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineLength {
    Three,
    Five,
}

impl LineLength {
    pub fn size(&self) -> usize {
        match self {
            LineLength::Three => 3,
            LineLength::Five => 5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LineFamilies {
    pub horizontal: Vec<Line>,
    pub vertical: Vec<Line>,
    pub diagonal: Vec<Line>,
}

impl LineFamilies {
    pub fn family(&self, orientation: Orientation) -> &[Line] {
        match orientation {
            Orientation::Horizontal => &self.horizontal,
            Orientation::Vertical => &self.vertical,
            Orientation::Diagonal => &self.diagonal,
        }
    }

    pub fn total(&self) -> usize {
        self.horizontal.len() + self.vertical.len() + self.diagonal.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Line> {
        self.horizontal.iter().chain(&self.vertical).chain(&self.diagonal)
    }
}

/// Builds every line of the given length that fits in the grid.
///
/// Horizontal and vertical runs slide along each row/column. Diagonal runs are
/// anchored at every top-left corner of an `L x L` window and taken in both
/// directions, so a length equal to the grid size yields just the two main
/// diagonals while shorter lengths yield overlapping runs (some lines through
/// the center are produced by more than one anchor).
pub fn generate_lines(length: LineLength) -> LineFamilies {
    let len = length.size();
    let starts = GRID_SIZE - len;
    let mut families = LineFamilies::default();

    for fixed in 0..GRID_SIZE {
        for start in 0..=starts {
            families
                .horizontal
                .push((0..len).map(|k| Coordinate::new(fixed, start + k)).collect());
            families
                .vertical
                .push((0..len).map(|k| Coordinate::new(start + k, fixed)).collect());
        }
    }

    for i in 0..=starts {
        for j in 0..=starts {
            families
                .diagonal
                .push((0..len).map(|k| Coordinate::new(i + k, j + k)).collect());
            families
                .diagonal
                .push((0..len).map(|k| Coordinate::new(i + k, j + len - 1 - k)).collect());
        }
    }

    families
}

static TERCO_LINES: LazyLock<LineFamilies> = LazyLock::new(|| generate_lines(LineLength::Three));
static QUINA_LINES: LazyLock<LineFamilies> = LazyLock::new(|| generate_lines(LineLength::Five));

/// Cached line families for `length`.
pub fn lines(length: LineLength) -> &'static LineFamilies {
    match length {
        LineLength::Three => &TERCO_LINES,
        LineLength::Five => &QUINA_LINES,
    }
}

pub fn corners() -> [Coordinate; 4] {
    let last = GRID_SIZE - 1;
    [
        Coordinate::new(0, 0),
        Coordinate::new(0, last),
        Coordinate::new(last, 0),
        Coordinate::new(last, last),
    ]
}

/// All cells except the free center, in row-major order.
pub fn non_center_cells() -> Vec<Coordinate> {
    (0..GRID_SIZE)
        .flat_map(|row| (0..GRID_SIZE).map(move |col| Coordinate::new(row, col)))
        .filter(|c| !c.is_center())
        .collect()
}
