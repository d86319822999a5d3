use std::fmt;

use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

use crate::Point;
use crate::error::GoError;
use crate::stone::Stone;

/// Cumulative capture tallies, indexed by the capturing color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Captures {
    pub black: u32,
    pub white: u32,
}

impl Captures {
    pub fn get(&self, stone: Stone) -> u32 {
        match stone {
            Stone::Black => self.black,
            Stone::White => self.white,
        }
    }

    fn add(&mut self, stone: Stone, count: u32) {
        match stone {
            Stone::Black => self.black += count,
            Stone::White => self.white += count,
        }
    }
}

/// A maximal set of same-colored stones connected by shared edges, plus
/// the distinct empty points adjacent to any member.
///
/// Transient: recomputed on demand, never cached, since the board mutates
/// between queries. Point order is traversal order, which is deterministic
/// for a given board.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Group {
    pub points: Vec<Point>,
    pub liberties: Vec<Point>,
}

/// Square Go board stored as a flat row-major array of cells
/// (1 = Black, -1 = White, 0 = empty), with capture tallies and the
/// ko lock from the most recent placement.
#[derive(Debug, Clone, PartialEq)]
pub struct Goban {
    board: Vec<i8>,
    size: u8,
    captures: Captures,
    ko: Option<Point>,
}

impl Goban {
    /// Create an empty board with the given side length.
    pub fn new(size: u8) -> Self {
        Goban {
            board: vec![0i8; size as usize * size as usize],
            size,
            captures: Captures::default(),
            ko: None,
        }
    }

    /// Create a goban from an existing cell matrix.
    pub fn from_matrix(rows: Vec<Vec<i8>>) -> Self {
        let size = rows.len() as u8;
        assert!(
            rows.iter().all(|row| row.len() == size as usize),
            "board matrix must be square"
        );
        Goban {
            board: rows.into_iter().flatten().collect(),
            size,
            captures: Captures::default(),
            ko: None,
        }
    }

    // -- Accessors --

    pub fn board(&self) -> &[i8] {
        &self.board
    }

    pub fn size(&self) -> u8 {
        self.size
    }

    pub fn captures(&self) -> Captures {
        self.captures
    }

    pub fn ko(&self) -> Option<Point> {
        self.ko
    }

    pub fn stone_at(&self, point: Point) -> Option<Stone> {
        if self.on_board(point) {
            Stone::from_int(self.board[self.idx(point)])
        } else {
            None
        }
    }

    pub fn on_board(&self, (col, row): Point) -> bool {
        col < self.size && row < self.size
    }

    pub fn is_empty(&self) -> bool {
        self.board.iter().all(|&cell| cell == 0)
    }

    // -- Legality & placement --

    /// Resolve a placement against a scratch copy of the board.
    ///
    /// Returns the successor board and the captured points, or the reason
    /// the move is illegal. `self` is never touched, so the same call
    /// backs both speculative validity checks and committed placements,
    /// and a rejected move cannot leave partial state behind.
    ///
    /// Captured opponent groups are found by a row-major scan, so the
    /// returned point order is deterministic for a given position.
    pub fn place(&self, point: Point, stone: Stone) -> Result<(Goban, Vec<Point>), GoError> {
        if !self.on_board(point) {
            return Err(GoError::NotOnBoard);
        }
        if self.stone_at(point).is_some() {
            return Err(GoError::Occupied);
        }
        if self.ko == Some(point) {
            return Err(GoError::KoViolation);
        }

        let mut next = self.clone();
        next.set_stone(point, stone);

        // Captures resolve before the suicide check: a move that fills its
        // own last liberty is still legal if it removes the opponent's.
        let captured = next.capture_dead(stone.opponent());
        let own = next.group_at(point);
        if captured.is_empty() && own.liberties.is_empty() {
            return Err(GoError::Suicide);
        }
        next.captures.add(stone, captured.len() as u32);

        // A lone stone taking a lone stone leaves a repeatable shape;
        // lock the emptied point for the opponent's next turn.
        next.ko = if captured.len() == 1 && own.points.len() == 1 {
            Some(captured[0])
        } else {
            None
        };

        Ok((next, captured))
    }

    /// Remove every `color` group with no liberties, in place. Returns the
    /// removed points in group discovery order, then traversal order
    /// within each group.
    fn capture_dead(&mut self, color: Stone) -> Vec<Point> {
        let mut visited = vec![false; self.board.len()];
        let mut captured = Vec::new();

        for row in 0..self.size {
            for col in 0..self.size {
                let point = (col, row);
                if visited[self.idx(point)] || self.stone_at(point) != Some(color) {
                    continue;
                }
                let chain = self.chain_from(point, &mut visited);
                if self.chain_liberties(&chain).is_empty() {
                    captured.extend(&chain);
                }
            }
        }

        for &p in &captured {
            self.clear_stone(p);
        }
        captured
    }

    /// Forget the ko lock; it only ever lasts a single turn.
    pub(crate) fn clear_ko(&mut self) {
        self.ko = None;
    }

    // -- Group/liberty analysis --

    /// The 4-connected neighbors that are on the board.
    pub fn neighbors(&self, (col, row): Point) -> ArrayVec<Point, 4> {
        let mut result = ArrayVec::new();
        if col > 0 {
            result.push((col - 1, row));
        }
        if col + 1 < self.size {
            result.push((col + 1, row));
        }
        if row > 0 {
            result.push((col, row - 1));
        }
        if row + 1 < self.size {
            result.push((col, row + 1));
        }
        result
    }

    /// The connected same-color group through `point` and its liberties.
    /// An empty or off-board point yields an empty group.
    pub fn group_at(&self, point: Point) -> Group {
        if self.stone_at(point).is_none() {
            return Group::default();
        }
        let mut visited = vec![false; self.board.len()];
        let points = self.chain_from(point, &mut visited);
        let liberties = self.chain_liberties(&points);
        Group { points, liberties }
    }

    /// Flood-fill the same-color chain through `point`, marking `visited`.
    fn chain_from(&self, point: Point, visited: &mut [bool]) -> Vec<Point> {
        let stone = match self.stone_at(point) {
            Some(s) => s,
            None => return Vec::new(),
        };

        let mut chain = Vec::new();
        let mut stack = vec![point];

        while let Some(p) = stack.pop() {
            let pi = self.idx(p);
            if visited[pi] {
                continue;
            }
            visited[pi] = true;
            chain.push(p);
            for n in self.neighbors(p) {
                if self.stone_at(n) == Some(stone) && !visited[self.idx(n)] {
                    stack.push(n);
                }
            }
        }

        chain
    }

    /// Distinct empty points adjacent to any stone of `chain`. A liberty
    /// bordered by several chain stones counts once.
    fn chain_liberties(&self, chain: &[Point]) -> Vec<Point> {
        let mut seen = vec![false; self.board.len()];
        let mut libs = Vec::new();
        for &p in chain {
            for n in self.neighbors(p) {
                let ni = self.idx(n);
                if !seen[ni] && self.stone_at(n).is_none() {
                    seen[ni] = true;
                    libs.push(n);
                }
            }
        }
        libs
    }

    // -- Internal helpers --

    #[inline]
    fn idx(&self, (col, row): Point) -> usize {
        row as usize * self.size as usize + col as usize
    }

    fn set_stone(&mut self, point: Point, stone: Stone) {
        if self.on_board(point) {
            let i = self.idx(point);
            self.board[i] = stone.to_int();
        }
    }

    fn clear_stone(&mut self, point: Point) {
        if self.on_board(point) {
            let i = self.idx(point);
            self.board[i] = 0;
        }
    }
}

impl fmt::Display for Goban {
    /// Rows of `B`/`W`/`+`, the same alphabet the test layouts use.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.size {
            for col in 0..self.size {
                let c = match self.stone_at((col, row)) {
                    Some(Stone::Black) => 'B',
                    Some(Stone::White) => 'W',
                    None => '+',
                };
                write!(f, "{c}")?;
            }
            if row + 1 < self.size {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}
