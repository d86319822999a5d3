pub mod engine;
pub mod error;
pub mod goban;
pub mod stone;
pub mod territory;
pub mod turn;

/// Board coordinate as `(col, row)`, zero-indexed from the top-left.
pub type Point = (u8, u8);

pub use engine::{DEFAULT_KOMI, Game, GameState, STANDARD_SIZES, Stage};
pub use error::{ConfigError, GoError};
pub use goban::{Captures, Goban, Group};
pub use stone::Stone;
pub use territory::{PlayerScore, Score};
pub use turn::{Move, Turn};
