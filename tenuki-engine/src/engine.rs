use std::fmt;

use serde::{Deserialize, Serialize};

use crate::Point;
use crate::error::{ConfigError, GoError};
use crate::goban::{Captures, Goban, Group};
use crate::stone::Stone;
use crate::territory::{self, Score};
use crate::turn::Turn;

/// Board sizes the product offers. The rules are size-agnostic; this is
/// policy, enforced only by [`Game::new`].
pub const STANDARD_SIZES: [u8; 3] = [9, 13, 19];

/// Fixed compensation added to White's score, all board sizes.
pub const DEFAULT_KOMI: f64 = 6.5;

/// Where the game stands: accepting moves, or over after two consecutive
/// passes. `Ended` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    AwaitingMove,
    Ended,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::AwaitingMove => write!(f, "awaiting_move"),
            Stage::Ended => write!(f, "ended"),
        }
    }
}

/// Owned snapshot of the grid and game bookkeeping, shaped for rendering
/// hosts. Serializes to the JSON the UI layer consumes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub board: Vec<i8>,
    pub size: u8,
    pub next: Stone,
    pub ko: Option<Point>,
    pub captures: Captures,
    pub passes: u32,
    pub move_number: u32,
}

/// A single game of Go: one board plus turn, pass, and scoring
/// bookkeeping. All mutation goes through [`Game::put_stone`] and
/// [`Game::pass_move`].
#[derive(Debug, Clone)]
pub struct Game {
    goban: Goban,
    next: Stone,
    last_move: Option<Point>,
    passes: u32,
    move_number: u32,
    komi: f64,
    moves: Vec<Turn>,
}

impl Game {
    /// Create a game on a standard board. Black moves first by Go
    /// convention unless the caller says otherwise.
    pub fn new(size: u8, first: Stone) -> Result<Self, ConfigError> {
        if !STANDARD_SIZES.contains(&size) {
            return Err(ConfigError::UnsupportedSize(size));
        }
        Ok(Self::with_any_size(size, first))
    }

    /// Create a game on a board of any side length, bypassing the
    /// standard-size policy. Test suites and analysis tooling use small
    /// boards freely.
    pub fn with_any_size(size: u8, first: Stone) -> Self {
        Game {
            goban: Goban::new(size),
            next: first,
            last_move: None,
            passes: 0,
            move_number: 0,
            komi: DEFAULT_KOMI,
            moves: Vec::new(),
        }
    }

    // -- Accessors --

    pub fn size(&self) -> u8 {
        self.goban.size()
    }

    pub fn goban(&self) -> &Goban {
        &self.goban
    }

    pub fn board(&self) -> &[i8] {
        self.goban.board()
    }

    pub fn next_to_move(&self) -> Stone {
        self.next
    }

    pub fn ko(&self) -> Option<Point> {
        self.goban.ko()
    }

    pub fn captures(&self) -> Captures {
        self.goban.captures()
    }

    pub fn stone_at(&self, point: Point) -> Option<Stone> {
        self.goban.stone_at(point)
    }

    pub fn last_move(&self) -> Option<Point> {
        self.last_move
    }

    pub fn consecutive_passes(&self) -> u32 {
        self.passes
    }

    pub fn move_number(&self) -> u32 {
        self.move_number
    }

    pub fn komi(&self) -> f64 {
        self.komi
    }

    pub fn moves(&self) -> &[Turn] {
        &self.moves
    }

    pub fn stage(&self) -> Stage {
        if self.passes >= 2 {
            Stage::Ended
        } else {
            Stage::AwaitingMove
        }
    }

    pub fn is_over(&self) -> bool {
        self.stage() == Stage::Ended
    }

    /// The group and liberties through `point`; empty for empty points.
    /// Analyzer surface for AI callers ranking candidate moves.
    pub fn group_at(&self, point: Point) -> Group {
        self.goban.group_at(point)
    }

    // -- Game actions --

    /// Would [`Game::put_stone`] accept `point` right now? Read-only;
    /// resolves the placement against a scratch board and discards it.
    pub fn is_valid_move(&self, point: Point) -> bool {
        !self.is_over() && self.goban.place(point, self.next).is_ok()
    }

    /// Place a stone for the player to move. On success returns the
    /// captured points in deterministic order; on rejection nothing
    /// changes, ko lock included.
    pub fn put_stone(&mut self, point: Point) -> Result<Vec<Point>, GoError> {
        if self.is_over() {
            return Err(GoError::GameOver);
        }
        let (goban, captured) = self.goban.place(point, self.next)?;

        self.goban = goban;
        self.passes = 0;
        self.moves.push(Turn::play(self.next, point));
        self.last_move = Some(point);
        self.next = self.next.opponent();
        self.move_number += 1;
        Ok(captured)
    }

    /// Pass the turn. Returns true iff the game has now ended: two passes
    /// with no placement between them. A placement resets the streak, so
    /// a pass after one always starts a new one.
    pub fn pass_move(&mut self) -> bool {
        if self.is_over() {
            return true;
        }
        self.passes += 1;
        self.last_move = None;
        self.goban.clear_ko();
        self.moves.push(Turn::pass(self.next));
        self.next = self.next.opponent();
        self.is_over()
    }

    // -- Scoring --

    /// Territory + captures for both colors, komi to White.
    pub fn score(&self) -> Score {
        territory::score(&self.goban, self.komi)
    }

    /// The winner by score once the game has ended; `None` while the
    /// game is in progress or on a drawn result.
    pub fn winner(&self) -> Option<Stone> {
        if !self.is_over() {
            return None;
        }
        let score = self.score();
        if score.black_total() > score.white_total() {
            Some(Stone::Black)
        } else if score.white_total() > score.black_total() {
            Some(Stone::White)
        } else {
            None
        }
    }

    /// Owned copy of the grid and bookkeeping for rendering hosts.
    pub fn snapshot(&self) -> GameState {
        GameState {
            board: self.goban.board().to_vec(),
            size: self.goban.size(),
            next: self.next,
            ko: self.goban.ko(),
            captures: self.goban.captures(),
            passes: self.passes,
            move_number: self.move_number,
        }
    }
}
