// src/terminal.rs
// Terminal input/output for the bingo caller.

use std::collections::HashSet;
use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    terminal::{disable_raw_mode, enable_raw_mode},
};

use crate::card::Grid;
use crate::columns::{column_stats, COLUMNS};
use crate::defs::{Cell, Number};
use crate::evaluator::CompletionReport;
use crate::game::Game;

const GREEN: &str = "\x1b[1;32m";
const YELLOW: &str = "\x1b[1;33m";
const DIM: &str = "\x1b[2m";
const RESET: &str = "\x1b[0m";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Draw,
    ToggleSound,
    Exit,
}

/// One line per column: the label, then all 15 numbers with the called ones lit.
pub fn print_board(drawn: &HashSet<Number>, last: Option<Number>) {
    for column in COLUMNS {
        print!("{YELLOW}{}{RESET} ", column.label);
        for number in column.numbers() {
            if Some(number) == last {
                print!(" {GREEN}{number:2}{RESET}");
            } else if drawn.contains(&number) {
                print!(" {YELLOW}{number:2}{RESET}");
            } else {
                print!(" {DIM}{number:2}{RESET}");
            }
        }
        println!();
    }
}

pub fn print_card(grid: &Grid, drawn: &HashSet<Number>) {
    let header: Vec<String> = COLUMNS.iter().map(|c| format!("{:^4}", c.label)).collect();
    println!(" {}", header.join(" "));
    for row in grid.rows() {
        let cells: Vec<String> = row
            .iter()
            .map(|cell| match cell {
                Cell::Free => format!("{GREEN}FREE{RESET}"),
                Cell::Number(n) if drawn.contains(n) => format!("{YELLOW}{n:^4}{RESET}"),
                Cell::Number(n) => format!("{n:^4}"),
            })
            .collect();
        println!(" {}", cells.join(" "));
    }
}

pub fn print_report(report: &CompletionReport) {
    if report.is_empty() {
        println!("No winning patterns enabled.");
        return;
    }
    for status in report.entries() {
        if status.completed {
            println!("  {GREEN}{:<14} Complete{RESET}", status.name);
        } else {
            println!("  {:<14} {DIM}Incomplete{RESET}", status.name);
        }
    }
}

pub fn print_column_stats(drawn: &[Number]) {
    let stats: Vec<String> = column_stats(drawn).iter().map(|(label, count)| format!("{label}: {count}")).collect();
    println!("Per column: {}", stats.join("  "));
}

pub fn show_on_terminal(game: &Game, card: Option<(&Grid, &CompletionReport)>, previous_numbers: usize) {
    let board = game.board();
    let drawn = board.drawn_set();

    match board.last_number() {
        Some(last) => println!("Last number: {GREEN}{last}{RESET}"),
        None => println!("No numbers drawn yet"),
    }
    println!("Previous numbers: {:?}", board.get_last_numbers(previous_numbers));
    println!(
        "Drawn: {}  Remaining: {}  Sound: {}",
        board.len(),
        game.pouch().len(),
        if game.sound_enabled() { "on" } else { "off" }
    );
    print_column_stats(board.get_numbers());
    println!();
    print_board(&drawn, board.last_number());

    if let Some((grid, report)) = card {
        println!("\nYour card:");
        print_card(grid, &drawn);
        println!("\nWinning patterns:");
        print_report(report);
    }

    if game.is_pouch_empty() {
        println!("\nThe pouch is empty!");
    }
    println!();
}

/// Waits for a key press: ESC or `q` exits, `s` toggles sound, anything else draws.
pub fn hitkey() -> io::Result<KeyAction> {
    println!("\nPress any key to draw, S to toggle sound, ESC to exit");

    enable_raw_mode()?;
    let result = read_action();
    disable_raw_mode()?;
    print!("\x1Bc"); // Clear the screen

    result
}

fn read_action() -> io::Result<KeyAction> {
    // Drop keys pressed while the previous draw was being shown
    while event::poll(Duration::from_millis(0))? {
        event::read()?;
    }

    loop {
        if let Event::Key(key_event) = event::read()? {
            // Only key presses, not releases
            if key_event.kind != KeyEventKind::Press {
                continue;
            }
            return Ok(match key_event.code {
                KeyCode::Esc | KeyCode::Char('q') => KeyAction::Exit,
                KeyCode::Char('s') | KeyCode::Char('S') => KeyAction::ToggleSound,
                _ => KeyAction::Draw,
            });
        }
    }
}
