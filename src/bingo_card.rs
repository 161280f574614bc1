// src/bingo_card.rs
// Card and winning pattern management for the bingo caller.
//
// Card entry takes the text recognized from a photo of the card (or typed by
// hand), lays the numbers out by column and lets single cells be corrected
// before the card is saved:
//
//   bingo-card --numbers "3 18 33 48 63 ..." --place 12@1,0 --remove 4,2
//
// Pattern switches accept both pattern ids (`quina`) and sub-pattern ids
// (`quina_diagonal`).

use std::collections::HashSet;
use std::error::Error;
use std::fs;
use std::path::PathBuf;

use clap::Parser;
use bingo::card::{clear_card, load_card, save_card};
use bingo::columns::COLUMNS;
use bingo::config::AppConfig;
use bingo::defs::{Number, GRID_SIZE};
use bingo::draft::{parse_numbers, CardDraft};
use bingo::lines::Coordinate;
use bingo::logging::{log_error, log_info, log_warning, set_log_level};
use bingo::pattern::{load_catalog, reset_catalog, save_catalog, set_enabled_by_id, PatternDefinition};
use bingo::store::FileStore;
use bingo::terminal;

#[derive(Parser)]
#[command(name = env!("CARGO_BIN_NAME"))]
#[command(about = "Bingo Card - Enter your card and choose the winning patterns")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Args {
    /// Recognized card text; every number from 1 to 75 in it is placed on the card
    #[arg(long, conflicts_with = "numbers_file")]
    numbers: Option<String>,

    /// File holding the recognized card text
    #[arg(long)]
    numbers_file: Option<PathBuf>,

    /// Correction applied after placement, as NUMBER@ROW,COL (repeatable)
    #[arg(long, value_parser = parse_placement)]
    place: Vec<(Number, Coordinate)>,

    /// Clear a cell after placement, as ROW,COL (repeatable)
    #[arg(long, value_parser = parse_coordinate)]
    remove: Vec<Coordinate>,

    /// Delete the saved card
    #[arg(long)]
    clear: bool,

    /// Show the saved card
    #[arg(long)]
    show: bool,

    /// Enable a pattern or sub-pattern by id (repeatable)
    #[arg(long)]
    enable: Vec<String>,

    /// Disable a pattern or sub-pattern by id (repeatable)
    #[arg(long)]
    disable: Vec<String>,

    /// Restore the default winning patterns
    #[arg(long)]
    reset_patterns: bool,

    /// List the winning patterns and their state
    #[arg(long)]
    list_patterns: bool,

    /// Data directory (overrides the configuration file)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Configuration file
    #[arg(long, default_value = bingo::config::DEFAULT_CONFIG_PATH)]
    config: PathBuf,
}

fn parse_coordinate(s: &str) -> Result<Coordinate, String> {
    let (row, col) = s
        .split_once(',')
        .ok_or_else(|| format!("expected ROW,COL, got {s:?}"))?;
    let row = row.trim().parse::<usize>().map_err(|e| format!("invalid row {row:?}: {e}"))?;
    let col = col.trim().parse::<usize>().map_err(|e| format!("invalid column {col:?}: {e}"))?;
    let coord = Coordinate::new(row, col);
    if !coord.in_grid() {
        return Err(format!("cell {row},{col} is outside the {GRID_SIZE}x{GRID_SIZE} grid"));
    }
    Ok(coord)
}

fn parse_placement(s: &str) -> Result<(Number, Coordinate), String> {
    let (number, cell) = s
        .split_once('@')
        .ok_or_else(|| format!("expected NUMBER@ROW,COL, got {s:?}"))?;
    let number = number
        .trim()
        .parse::<Number>()
        .map_err(|e| format!("invalid number {number:?}: {e}"))?;
    Ok((number, parse_coordinate(cell)?))
}

fn print_draft(draft: &CardDraft) {
    for row in 0..GRID_SIZE {
        let cells: Vec<String> = (0..GRID_SIZE)
            .map(|col| {
                let coord = Coordinate::new(row, col);
                match draft.cell(coord) {
                    _ if coord.is_center() => "FREE".to_string(),
                    Some(n) => format!("{n:^4}"),
                    None => " __ ".to_string(),
                }
            })
            .collect();
        println!(" {}", cells.join(" "));
    }
    println!("{} of 24 cells filled", draft.filled());
}

fn print_patterns(catalog: &[PatternDefinition]) {
    for pattern in catalog {
        let state = if pattern.enabled { "on" } else { "off" };
        println!("{:<12} {:<14} {:<4} {}", pattern.id, pattern.name, state, pattern.description);
        for sub in pattern.sub_patterns() {
            let state = if sub.enabled { "on" } else { "off" };
            println!("  {:<20} {:<10} {}", sub.id, sub.name, state);
        }
    }
}

fn enter_card(args: &Args, store: &mut FileStore) -> Result<(), Box<dyn Error>> {
    let text = match (&args.numbers, &args.numbers_file) {
        (Some(text), _) => text.clone(),
        (None, Some(path)) => fs::read_to_string(path)?,
        (None, None) => return Ok(()),
    };

    let numbers = parse_numbers(&text);
    log_info(&format!("Recognized {} card numbers", numbers.len()));
    let mut draft = CardDraft::from_numbers(&numbers);

    for &(number, coord) in &args.place {
        draft.place(number, coord)?;
    }
    for &coord in &args.remove {
        draft.remove(coord)?;
    }

    print_draft(&draft);
    match draft.finalize() {
        Ok(card) => {
            save_card(store, &card, None)?;
            println!("Card saved.");
            Ok(())
        }
        Err(e) => {
            for (col, column) in COLUMNS.iter().enumerate() {
                let missing = (0..GRID_SIZE)
                    .map(|row| Coordinate::new(row, col))
                    .filter(|c| !c.is_center() && draft.cell(*c).is_none())
                    .count();
                if missing > 0 {
                    println!("Column {} needs {missing} more number(s)", column.label);
                }
            }
            Err(e.into())
        }
    }
}

fn update_patterns(args: &Args, store: &mut FileStore) -> Result<(), Box<dyn Error>> {
    let mut catalog = if args.reset_patterns {
        reset_catalog(store)?
    } else {
        load_catalog(store)
    };

    if args.enable.is_empty() && args.disable.is_empty() {
        return Ok(());
    }

    let switches = args
        .enable
        .iter()
        .map(|id| (id, true))
        .chain(args.disable.iter().map(|id| (id, false)));
    for (id, enabled) in switches {
        if set_enabled_by_id(&mut catalog, id, enabled) {
            log_info(&format!("Pattern {id} {}", if enabled { "enabled" } else { "disabled" }));
        } else {
            log_warning(&format!("Unknown pattern id: {id}"));
        }
    }
    save_catalog(store, &catalog)?;
    Ok(())
}

fn run() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let mut config = AppConfig::load_from_or_default(&args.config);
    if let Some(dir) = &args.data_dir {
        config.data_dir = dir.clone();
    }
    set_log_level(config.log_level);

    let mut store = FileStore::new(&config.data_dir);

    if args.clear {
        clear_card(&mut store)?;
        println!("Card cleared.");
    }

    enter_card(&args, &mut store)?;
    update_patterns(&args, &mut store)?;

    if args.list_patterns {
        print_patterns(&load_catalog(&store));
    }

    if args.show {
        match load_card(&store) {
            Some(card) => terminal::print_card(&card.to_grid()?, &HashSet::new()),
            None => println!("No card saved."),
        }
    }

    Ok(())
}

fn main() {
    if let Err(e) = run() {
        log_error(&format!("{e}"));
        std::process::exit(1);
    }
}
