//! # NoGo rule engine
//!
//! A 9x9 NoGo board as a compact `Copy` value: 81 cells plus the player
//! to move. A placement is legal iff the cell is empty, it is that
//! player's turn, no group of either colour is left without liberties by
//! it (captures are forbidden in NoGo, suicide included), and so the
//! game ends when the player to move has nowhere to play.

use crate::game::{neighbors, Color, Game, Move, Position, BOARD_CELLS, BOARD_SIZE};
use smallvec::SmallVec;
use std::fmt;

/// Board state. Cheap to copy; the search clones one per descent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Board {
    cells: [Option<Color>; BOARD_CELLS],
    turn: Color,
}

impl Board {
    /// An empty board with Black to move.
    pub fn new() -> Board {
        Board {
            cells: [None; BOARD_CELLS],
            turn: Color::Black,
        }
    }

    /// Whether the group containing `start` has at least one liberty.
    ///
    /// Flood fill over same-coloured stones; `start` must be occupied.
    fn group_has_liberty(&self, start: Position) -> bool {
        let color = self.cells[start];
        debug_assert!(color.is_some());
        let mut seen = [false; BOARD_CELLS];
        let mut stack: SmallVec<[Position; 32]> = SmallVec::new();
        seen[start] = true;
        stack.push(start);
        while let Some(pos) = stack.pop() {
            for n in neighbors(pos).into_iter().flatten() {
                match self.cells[n] {
                    None => return true,
                    Some(_) if seen[n] => {}
                    Some(c) if Some(c) == color => {
                        seen[n] = true;
                        stack.push(n);
                    }
                    Some(_) => {}
                }
            }
        }
        false
    }
}

impl Default for Board {
    fn default() -> Board {
        Board::new()
    }
}

impl Game for Board {
    fn is_legal(&self, mov: Move) -> bool {
        if mov.color != self.turn || self.cells[mov.pos].is_some() {
            return false;
        }
        let mut after = *self;
        after.cells[mov.pos] = Some(mov.color);
        // No capture: every adjacent enemy group must keep a liberty.
        for n in neighbors(mov.pos).into_iter().flatten() {
            if after.cells[n] == Some(mov.color.opponent()) && !after.group_has_liberty(n) {
                return false;
            }
        }
        // No suicide: the placed group must keep a liberty.
        after.group_has_liberty(mov.pos)
    }

    #[inline]
    fn set(&mut self, pos: Position, color: Color) {
        self.cells[pos] = Some(color);
    }

    #[inline]
    fn advance_turn(&mut self) {
        self.turn = self.turn.opponent();
    }

    #[inline]
    fn to_move(&self) -> Color {
        self.turn
    }

    #[inline]
    fn stone(&self, pos: Position) -> Option<Color> {
        self.cells[pos]
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..BOARD_SIZE {
            for col in 0..BOARD_SIZE {
                let glyph = match self.cells[row * BOARD_SIZE + col] {
                    Some(Color::Black) => 'X',
                    Some(Color::White) => 'O',
                    None => '.',
                };
                if col > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{}", glyph)?;
            }
            writeln!(f)?;
        }
        write!(f, "{} to move", self.turn)
    }
}
