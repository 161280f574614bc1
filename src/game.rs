// src/game.rs
// A calling session: the pouch, the numbers drawn so far and the sound preference,
// persisted through a preference store after every change.

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::defs::{Number, FIRSTNUMBER, LASTNUMBER};
use crate::error::BingoError;
use crate::logging::{log_info, log_warning};
use crate::pouch::Pouch;
use crate::store::PreferenceStore;

pub const GAME_STATE_KEY: &str = "bingo_game_state";
pub const PREVIOUS_GAME_STATE_KEY: &str = "bingo_previous_game_state";

/// Stored form of a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    pub drawn_numbers: Vec<Number>,
    pub remaining_numbers: Vec<Number>,
    pub sound_enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    board: Board,
    pouch: Pouch,
    sound_enabled: bool,
}

impl Game {
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            pouch: Pouch::new(),
            sound_enabled: true,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn pouch(&self) -> &Pouch {
        &self.pouch
    }

    pub fn sound_enabled(&self) -> bool {
        self.sound_enabled
    }

    pub fn has_game_started(&self) -> bool {
        !self.board.is_empty()
    }

    pub fn is_pouch_empty(&self) -> bool {
        self.pouch.is_empty()
    }

    /// Moves a random number from the pouch to the board.
    pub fn draw(&mut self) -> Option<Number> {
        let extracted = self.pouch.extract()?;
        self.board.push(extracted);
        Some(extracted)
    }

    pub fn toggle_sound(&mut self) -> bool {
        self.sound_enabled = !self.sound_enabled;
        self.sound_enabled
    }

    pub fn to_state(&self) -> GameState {
        GameState {
            drawn_numbers: self.board.get_numbers().to_vec(),
            remaining_numbers: self.pouch.numbers.clone(),
            sound_enabled: self.sound_enabled,
        }
    }

    /// Rebuilds a session from stored state. Out-of-range and repeated drawn
    /// numbers are dropped and the pouch is recomputed from what was drawn,
    /// so the two always partition 1-75.
    pub fn from_state(state: GameState) -> Self {
        let mut drawn: Vec<Number> = Vec::with_capacity(state.drawn_numbers.len());
        for number in state.drawn_numbers {
            if (FIRSTNUMBER..=LASTNUMBER).contains(&number) && !drawn.contains(&number) {
                drawn.push(number);
            }
        }

        let pouch = Pouch::without(&drawn);
        let mut stored_remaining = state.remaining_numbers;
        stored_remaining.sort_unstable();
        if stored_remaining != pouch.numbers {
            log_warning("Stored remaining numbers did not match the drawn numbers; pouch rebuilt");
        }

        Self {
            board: Board::from_numbers(drawn),
            pouch,
            sound_enabled: state.sound_enabled,
        }
    }

    pub fn save<S: PreferenceStore + ?Sized>(&self, store: &mut S) -> Result<(), BingoError> {
        store.set(GAME_STATE_KEY, &serde_json::to_string(&self.to_state())?)
    }

    /// Restores the current session, or starts a fresh one when nothing
    /// usable is stored.
    pub fn load<S: PreferenceStore + ?Sized>(store: &S) -> Self {
        Self::load_key(store, GAME_STATE_KEY)
    }

    fn load_key<S: PreferenceStore + ?Sized>(store: &S, key: &str) -> Self {
        let blob = match store.get(key) {
            Ok(Some(blob)) => blob,
            Ok(None) => return Self::new(),
            Err(e) => {
                log_warning(&format!("Failed to load game state from {key}: {e}"));
                return Self::new();
            }
        };

        match serde_json::from_str::<GameState>(&blob) {
            Ok(state) => Self::from_state(state),
            Err(e) => {
                log_warning(&format!("Failed to parse game state from {key}: {e}"));
                Self::new()
            }
        }
    }

    /// Keeps the current session as the previous game, then starts over.
    pub fn reset<S: PreferenceStore + ?Sized>(&mut self, store: &mut S) -> Result<Vec<String>, BingoError> {
        let mut reset_components = Vec::new();

        store.set(PREVIOUS_GAME_STATE_KEY, &serde_json::to_string(&self.to_state())?)?;
        reset_components.push(format!("Previous game saved with {} numbers drawn", self.board.len()));

        *self = Self::new();
        reset_components.push(format!("Pouch refilled with numbers {FIRSTNUMBER}-{LASTNUMBER}"));
        reset_components.push("Board state cleared".to_string());

        self.save(store)?;
        log_info("New game started");
        Ok(reset_components)
    }

    /// Replaces the session with the previously saved game.
    pub fn load_previous<S: PreferenceStore + ?Sized>(&mut self, store: &mut S) -> Result<(), BingoError> {
        *self = Self::load_key(store, PREVIOUS_GAME_STATE_KEY);
        self.save(store)?;
        log_info(&format!("Previous game restored with {} numbers drawn", self.board.len()));
        Ok(())
    }

    pub fn game_info(&self) -> String {
        format!(
            "Game[drawn={}, pouch_len={}, last={}, sound={}]",
            self.board.len(),
            self.pouch.len(),
            self.board.last_number().map_or("-".to_string(), |n| n.to_string()),
            if self.sound_enabled { "on" } else { "off" }
        )
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[test]
    fn test_game_creation() {
        let game = Game::new();
        assert!(!game.has_game_started());
        assert_eq!(game.pouch().len(), 75);
        assert!(game.sound_enabled());
        assert!(game.game_info().contains("pouch_len=75"));
    }

    #[test]
    fn test_draw_moves_number_from_pouch_to_board() {
        let mut game = Game::new();
        let number = game.draw().unwrap();
        assert!(game.has_game_started());
        assert_eq!(game.board().last_number(), Some(number));
        assert!(!game.pouch().contains(number));
        assert_eq!(game.board().len() + game.pouch().len(), 75);
    }

    #[test]
    fn test_draw_exhausts_pouch() {
        let mut game = Game::new();
        for _ in 0..75 {
            assert!(game.draw().is_some());
        }
        assert!(game.is_pouch_empty());
        assert_eq!(game.draw(), None);
        assert_eq!(game.board().get_sorted_numbers(), (1..=75).collect::<Vec<Number>>());
    }

    #[test]
    fn test_state_round_trip_through_store() {
        let mut store = MemoryStore::new();
        let mut game = Game::new();
        game.draw();
        game.draw();
        game.toggle_sound();
        game.save(&mut store).unwrap();

        let loaded = Game::load(&store);
        assert_eq!(loaded, game);
        assert!(!loaded.sound_enabled());
    }

    #[test]
    fn test_state_blob_shape() {
        let json = serde_json::to_value(Game::new().to_state()).unwrap();
        assert!(json.get("drawnNumbers").is_some());
        assert_eq!(json["remainingNumbers"].as_array().map(Vec::len), Some(75));
        assert_eq!(json["soundEnabled"], true);
    }

    #[test]
    fn test_load_missing_or_broken_state() {
        let mut store = MemoryStore::new();
        assert_eq!(Game::load(&store), Game::new());

        store.set(GAME_STATE_KEY, "[broken").unwrap();
        assert_eq!(Game::load(&store), Game::new());
    }

    #[test]
    fn test_from_state_repairs_inconsistent_pouch() {
        let state = GameState {
            drawn_numbers: vec![5, 5, 80, 12],
            remaining_numbers: vec![1, 2, 3],
            sound_enabled: true,
        };
        let game = Game::from_state(state);
        assert_eq!(game.board().get_numbers().to_vec(), vec![5, 12]);
        assert_eq!(game.pouch().len(), 73);
        assert!(!game.pouch().contains(5));
    }

    #[test]
    fn test_reset_and_load_previous() {
        let mut store = MemoryStore::new();
        let mut game = Game::new();
        for _ in 0..5 {
            game.draw();
        }
        let before = game.clone();

        let components = game.reset(&mut store).unwrap();
        assert!(components.contains(&"Board state cleared".to_string()));
        assert!(components.contains(&"Pouch refilled with numbers 1-75".to_string()));
        assert!(!game.has_game_started());
        assert_eq!(Game::load(&store), Game::new());

        game.load_previous(&mut store).unwrap();
        assert_eq!(game, before);
        // The restored game is now the current one
        assert_eq!(Game::load(&store), before);
    }
}
