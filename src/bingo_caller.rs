// src/bingo_caller.rs
// Interactive terminal bingo caller.
//
// Interactive Controls:
// - any key: draw the next number
// - S: toggle the sound preference
// - ESC / q: exit
//
// The player's card and the winning pattern preferences are read from the data
// directory on every redraw, so changes made with `bingo-card` show up at once.

use std::collections::HashSet;
use std::error::Error;
use std::path::PathBuf;

use clap::Parser;
use bingo::card::{clear_card, load_card, Grid};
use bingo::config::AppConfig;
use bingo::evaluator::{evaluate_patterns, CompletionReport};
use bingo::game::Game;
use bingo::logging::{log_error, log_info, log_warning, set_log_level};
use bingo::pattern::load_catalog;
use bingo::store::FileStore;
use bingo::terminal::{self, KeyAction};

#[derive(Parser)]
#[command(name = env!("CARGO_BIN_NAME"))]
#[command(about = "Bingo Caller - Draw numbers and track your card's winning patterns")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Args {
    /// Start a new game, keeping the current one as the previous game
    #[arg(long, conflicts_with = "previous")]
    newgame: bool,

    /// Restore the previously saved game
    #[arg(long)]
    previous: bool,

    /// Data directory (overrides the configuration file)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Configuration file
    #[arg(long, default_value = bingo::config::DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Exit after displaying the current state (no interactive loop)
    #[arg(long)]
    exit: bool,
}

fn current_report(store: &FileStore, game: &Game) -> Option<(Grid, CompletionReport)> {
    let card = load_card(store)?;
    let grid = match card.to_grid() {
        Ok(grid) => grid,
        Err(e) => {
            log_warning(&format!("Could not lay out card: {e}"));
            return None;
        }
    };
    let report = evaluate_patterns(&grid, &game.board().drawn_set(), &load_catalog(store));
    Some((grid, report))
}

fn announce_new_completions(previous: &HashSet<String>, report: &CompletionReport) {
    for status in report.completed() {
        if !previous.contains(&status.id) {
            log_info(&format!("Pattern completed: {}", status.name));
        }
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let mut config = AppConfig::load_from_or_default(&args.config);
    if let Some(dir) = args.data_dir {
        config.data_dir = dir;
    }
    set_log_level(config.log_level);

    let mut store = FileStore::new(&config.data_dir);
    let mut game = Game::load(&store);

    if args.newgame {
        for component in game.reset(&mut store)? {
            log_info(&component);
        }
        // A fresh game means a fresh card
        clear_card(&mut store)?;
    } else if args.previous {
        game.load_previous(&mut store)?;
    }

    let mut completed: HashSet<String> = HashSet::new();
    loop {
        let card_state = current_report(&store, &game);
        if let Some((_, report)) = &card_state {
            announce_new_completions(&completed, report);
            completed = report.completed().map(|s| s.id.clone()).collect();
        }

        terminal::show_on_terminal(&game, card_state.as_ref().map(|(g, r)| (g, r)), config.previous_numbers);

        if args.exit {
            break;
        }

        match terminal::hitkey()? {
            KeyAction::Draw => match game.draw() {
                Some(number) => {
                    game.save(&mut store)?;
                    log_info(&format!("Number drawn: {number} ({})", game.game_info()));
                }
                None => {
                    println!("The pouch is empty! Start a new game with --newgame.");
                    break;
                }
            },
            KeyAction::ToggleSound => {
                let enabled = game.toggle_sound();
                game.save(&mut store)?;
                log_info(&format!("Sound {}", if enabled { "enabled" } else { "disabled" }));
            }
            KeyAction::Exit => {
                println!("Exiting the caller.");
                break;
            }
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
