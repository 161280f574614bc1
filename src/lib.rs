// lib.rs
// Library modules for the bingo caller

pub mod defs;
pub mod error;
pub mod logging;
pub mod config;
pub mod store;
pub mod columns;
pub mod lines;
pub mod card;
pub mod draft;
pub mod pattern;
pub mod evaluator;
pub mod pouch;
pub mod board;
pub mod game;
pub mod terminal;
