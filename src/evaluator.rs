// src/evaluator.rs
// Decides which enabled win patterns a card has completed with the numbers drawn so far.

use std::collections::{HashMap, HashSet};

use crate::card::{map_card_to_grid, Card, Grid};
use crate::defs::Number;
use crate::error::BingoError;
use crate::lines::{corners, lines, non_center_cells, Coordinate, Orientation};
use crate::pattern::{PatternDefinition, PatternKind};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternStatus {
    pub id: String,
    pub name: String,
    pub completed: bool,
}

/// Completion verdicts for the enabled patterns, in catalog order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CompletionReport {
    entries: Vec<PatternStatus>,
}

impl CompletionReport {
    pub fn entries(&self) -> &[PatternStatus] {
        &self.entries
    }

    /// `None` when the pattern is disabled or unknown.
    pub fn is_completed(&self, id: &str) -> Option<bool> {
        self.entries.iter().find(|e| e.id == id).map(|e| e.completed)
    }

    pub fn completed(&self) -> impl Iterator<Item = &PatternStatus> {
        self.entries.iter().filter(|e| e.completed)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn to_map(&self) -> HashMap<String, bool> {
        self.entries.iter().map(|e| (e.id.clone(), e.completed)).collect()
    }
}

/// A line counts once every cell is the free center or a drawn number.
pub fn line_satisfied(grid: &Grid, line: &[Coordinate], drawn: &HashSet<Number>) -> bool {
    line.iter().all(|&coord| grid.is_marked(coord, drawn))
}

fn any_line_in_orientations(grid: &Grid, pattern: &PatternDefinition, drawn: &HashSet<Number>) -> bool {
    let Some(length) = pattern.kind().line_length() else {
        return false;
    };
    let families = lines(length);
    Orientation::ALL
        .into_iter()
        .filter(|&o| pattern.orientation_enabled(o))
        .any(|o| families.family(o).iter().any(|line| line_satisfied(grid, line, drawn)))
}

/// Evaluates a single pattern; `None` for ids this evaluator does not know.
pub fn evaluate_pattern(grid: &Grid, pattern: &PatternDefinition, drawn: &HashSet<Number>) -> Option<bool> {
    match pattern.kind() {
        PatternKind::FourCorners => Some(line_satisfied(grid, &corners(), drawn)),
        PatternKind::FullCard => Some(line_satisfied(grid, &non_center_cells(), drawn)),
        PatternKind::Third | PatternKind::Quina => Some(any_line_in_orientations(grid, pattern, drawn)),
        PatternKind::Unknown => None,
    }
}

/// Disabled patterns and unknown ids are left out of the report.
pub fn evaluate_patterns(grid: &Grid, drawn: &HashSet<Number>, catalog: &[PatternDefinition]) -> CompletionReport {
    let entries = catalog
        .iter()
        .filter(|pattern| pattern.enabled)
        .filter_map(|pattern| {
            evaluate_pattern(grid, pattern, drawn).map(|completed| PatternStatus {
                id: pattern.id.clone(),
                name: pattern.name.clone(),
                completed,
            })
        })
        .collect();
    CompletionReport { entries }
}

pub fn evaluate_card(card: &Card, drawn: &HashSet<Number>, catalog: &[PatternDefinition]) -> Result<CompletionReport, BingoError> {
    let grid = map_card_to_grid(card.numbers())?;
    Ok(evaluate_patterns(&grid, drawn, catalog))
}
