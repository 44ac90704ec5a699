//! # Opening heuristic
//!
//! Deterministic hand rule for the first few moves: prefer edge and
//! corner-adjacent points that turn a neighbouring square into an eye,
//! and when no own eye is available, occupy the square where the
//! opponent could make one. Once the rule finds nothing the agent falls
//! back to search for the rest of the episode.

use crate::game::{neighbors, Color, Game, Move, Position, BOARD_CELLS};

/// Edge points probed first, in preference order.
pub const EDGE_POINTS: [Position; 8] = [3, 5, 27, 45, 35, 53, 75, 77];

/// Corner-adjacent points probed second.
pub const CORNER_POINTS: [Position; 8] = [1, 9, 7, 17, 63, 73, 71, 79];

/// Centres of the pre-known 3x3 holes on the 9x9 grid; a neighbour at
/// one of these indices satisfies the eye test regardless of content.
const HOLLOW_POINTS: [Position; 8] = [13, 22, 37, 38, 42, 43, 58, 67];

/// Eye test: `pos` is an eye for `color` when each orthogonal neighbour
/// is off-board, a hollow index, or occupied by `color`.
pub(crate) fn is_eye<B: Game>(board: &B, pos: Position, color: Color) -> bool {
    neighbors(pos).into_iter().all(|n| match n {
        None => true,
        Some(n) if HOLLOW_POINTS.contains(&n) => true,
        Some(n) => board.stone(n) == Some(color),
    })
}

/// Would placing `color` at `pos` turn one of its neighbours into an
/// eye? Returns the first such neighbour in left, right, up, down order.
pub(crate) fn eye_made_by<B: Game>(board: &B, pos: Position, color: Color) -> Option<Position> {
    let mut after = *board;
    after.set(pos, color);
    neighbors(pos)
        .into_iter()
        .flatten()
        .find(|&n| is_eye(&after, n, color))
}

/// Pick an opening move for `color`, or `None` when the rule has no
/// suggestion (the caller then disables it for the episode).
pub fn opening_move<B: Game>(board: &B, color: Color) -> Option<Position> {
    let mut pick: Option<Position> = None;
    let mut eye_found = false;

    for &edge in &EDGE_POINTS {
        if !board.is_legal(Move::new(edge, color)) {
            continue;
        }
        if !eye_found && eye_made_by(board, edge, color).is_some() {
            pick = Some(edge);
            eye_found = true;
        } else if pick.is_none() {
            pick = Some(edge);
        }
    }

    for &corner in &CORNER_POINTS {
        if !board.is_legal(Move::new(corner, color)) {
            continue;
        }
        let makes_eye = eye_made_by(board, corner, color).is_some();
        if (makes_eye && !eye_found) || pick.is_none() {
            pick = Some(corner);
            if makes_eye {
                eye_found = true;
            }
        }
    }

    let pick = pick?;
    if eye_found {
        return Some(pick);
    }

    // Only a tentative pick: look one move ahead for an opponent eye and
    // take its centre first.
    let mut after = *board;
    after.advance_turn();
    let opponent = color.opponent();
    for pos in 0..BOARD_CELLS {
        if !after.is_legal(Move::new(pos, opponent)) {
            continue;
        }
        if let Some(eye) = eye_made_by(&after, pos, opponent) {
            return Some(eye);
        }
    }
    Some(pick)
}
