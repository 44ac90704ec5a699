//! # Board interface
//!
//! Core value types and the trait through which the search reaches the
//! rule engine. The MCTS core never inspects rules itself - legality,
//! placement, and turn tracking are delegated to [`Game`] methods, so the
//! search compiles against any 9x9 NoGo-shaped rule implementation.

use smallvec::SmallVec;
use std::fmt;

/// Board side length.
pub const BOARD_SIZE: usize = 9;

/// Number of cells on the board; also the branching-factor bound.
pub const BOARD_CELLS: usize = BOARD_SIZE * BOARD_SIZE;

/// Row-major cell index in `0..81`: `(row, col) = (p / 9, p % 9)`.
pub type Position = usize;

/// A player's stone colour.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    Black,
    White,
}

impl Color {
    /// The other player.
    #[inline]
    pub fn opponent(self) -> Color {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Black => write!(f, "black"),
            Color::White => write!(f, "white"),
        }
    }
}

/// A stone placement.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Move {
    pub pos: Position,
    pub color: Color,
}

impl Move {
    #[inline]
    pub fn new(pos: Position, color: Color) -> Move {
        Move { pos, color }
    }
}

/// Orthogonal neighbours of `pos` in left, right, up, down order.
/// `None` marks an off-board direction.
#[inline]
pub fn neighbors(pos: Position) -> [Option<Position>; 4] {
    let (row, col) = (pos / BOARD_SIZE, pos % BOARD_SIZE);
    [
        (col > 0).then(|| pos - 1),
        (col + 1 < BOARD_SIZE).then(|| pos + 1),
        (row > 0).then(|| pos - BOARD_SIZE),
        (row + 1 < BOARD_SIZE).then(|| pos + BOARD_SIZE),
    ]
}

/// The board interface the decision engine consumes.
///
/// Implementations are plain values: every descent copies the board once
/// and mutates the copy, so `Copy` must be cheap (the shipped [`crate::Board`]
/// is an 81-cell array plus a turn marker).
pub trait Game: Copy + Send + Sync {
    /// Whether `mov` may be played in this state. Covers turn order as
    /// well as the NoGo placement rules.
    fn is_legal(&self, mov: Move) -> bool;

    /// Put a stone on the board without any rule checking and without
    /// advancing the turn. Used by the search after legality has been
    /// established, and by the opening heuristic for tentative placements.
    fn set(&mut self, pos: Position, color: Color);

    /// Hand the move to the other player.
    fn advance_turn(&mut self);

    /// The player whose turn it is.
    fn to_move(&self) -> Color;

    /// The stone at `pos`, if any.
    fn stone(&self, pos: Position) -> Option<Color>;

    /// Place a legal move and advance the turn.
    #[inline]
    fn play(&mut self, mov: Move) {
        self.set(mov.pos, mov.color);
        self.advance_turn();
    }

    /// All positions where `color` could legally play.
    fn legal_moves(&self, color: Color) -> SmallVec<[Position; 8]> {
        (0..BOARD_CELLS)
            .filter(|&pos| self.is_legal(Move::new(pos, color)))
            .collect()
    }

    /// Whether `color` has at least one legal move.
    fn has_legal_move(&self, color: Color) -> bool {
        (0..BOARD_CELLS).any(|pos| self.is_legal(Move::new(pos, color)))
    }
}
