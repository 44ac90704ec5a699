#[cfg(test)]
mod tests {
    use crate::board::Board;
    use crate::game::{Color, Game, Position, BOARD_SIZE};
    use crate::opening::{eye_made_by, is_eye, opening_move, CORNER_POINTS, EDGE_POINTS};

    fn board_with(stones: &[(Position, Color)], to_move: Color) -> Board {
        let mut board = Board::new();
        for &(pos, color) in stones {
            board.set(pos, color);
        }
        if board.to_move() != to_move {
            board.advance_turn();
        }
        board
    }

    fn white(points: &[Position]) -> Vec<(Position, Color)> {
        points.iter().map(|&p| (p, Color::White)).collect()
    }

    // ------------------------------------------------------------------
    // eye test
    // ------------------------------------------------------------------

    #[test]
    fn four_friendly_neighbours_make_an_eye() {
        // 24 = (2, 6); neighbours 23, 25, 15, 33, none of them hollow.
        let board = board_with(&white(&[23, 25, 15, 33]), Color::White);
        assert!(is_eye(&board, 24, Color::White));
        assert!(!is_eye(&board, 24, Color::Black));
    }

    #[test]
    fn a_missing_neighbour_breaks_the_eye() {
        let board = board_with(&white(&[23, 25, 15]), Color::White);
        assert!(!is_eye(&board, 24, Color::White));
    }

    #[test]
    fn off_board_neighbours_count_as_friendly() {
        // Corner 0 only has on-board neighbours 1 and 9.
        let board = board_with(&white(&[1, 9]), Color::White);
        assert!(is_eye(&board, 0, Color::White));
    }

    #[test]
    fn hollow_points_count_as_friendly() {
        // 12 = (1, 3) has neighbours 11, 13, 3, 21 and 13 is a hollow
        // centre, so three stones suffice.
        let board = board_with(&white(&[11, 3, 21]), Color::White);
        assert!(is_eye(&board, 12, Color::White));
    }

    #[test]
    fn eye_test_is_stable_under_reflection_and_rotation() {
        // The same four-stone diamond, reflected across the vertical
        // axis and rotated a quarter turn; every involved square stays
        // clear of the hollow table.
        let cases: [(&[Position; 4], Position); 3] = [
            (&[23, 25, 15, 33], 24),
            (&[21, 19, 11, 29], 20),
            (&[51, 69, 61, 59], 60),
        ];
        for (stones, centre) in cases {
            let board = board_with(&white(stones), Color::White);
            assert!(is_eye(&board, centre, Color::White), "centre {centre}");
            let broken = board_with(&white(&stones[1..]), Color::White);
            assert!(!is_eye(&broken, centre, Color::White), "centre {centre}");
        }
    }

    #[test]
    fn eye_made_by_reports_the_new_eye() {
        // Placing white at 31 completes the eye at 40.
        let board = board_with(&white(&[39, 41, 49]), Color::White);
        assert_eq!(eye_made_by(&board, 31, Color::White), Some(40));
        assert_eq!(eye_made_by(&board, 30, Color::White), None);
    }

    // ------------------------------------------------------------------
    // opening rule
    // ------------------------------------------------------------------

    #[test]
    fn empty_board_yields_an_edge_or_corner_point() {
        let board = Board::new();
        let pick = opening_move(&board, Color::Black).expect("rule applies on an empty board");
        assert!(
            EDGE_POINTS.contains(&pick) || CORNER_POINTS.contains(&pick),
            "unexpected opening point {pick}"
        );
        assert_ne!(pick, 40, "the centre is never an opening point");
    }

    #[test]
    fn eye_making_edge_beats_a_plain_edge() {
        // A black stone on 3 blocks the first edge candidate and lets 5
        // complete an eye at 4 (3 is black, 13 is hollow, row 0 above).
        let board = board_with(&[(3, Color::Black)], Color::Black);
        assert_eq!(opening_move(&board, Color::Black), Some(5));
    }

    #[test]
    fn corners_are_tried_once_edges_are_gone() {
        // Black already holds every edge candidate, so the rule falls
        // through to the first corner point.
        let stones: Vec<(Position, Color)> =
            EDGE_POINTS.iter().map(|&p| (p, Color::Black)).collect();
        let board = board_with(&stones, Color::Black);
        assert_eq!(opening_move(&board, Color::Black), Some(CORNER_POINTS[0]));
    }

    #[test]
    fn opponent_eye_point_is_taken_preemptively() {
        // White would complete an eye at 40 by playing 31; black takes
        // 40 first.
        let board = board_with(&white(&[39, 41, 49]), Color::Black);
        assert_eq!(opening_move(&board, Color::Black), Some(40));
    }

    #[test]
    fn rule_fails_when_no_candidate_is_playable() {
        let stones: Vec<(Position, Color)> = EDGE_POINTS
            .iter()
            .chain(CORNER_POINTS.iter())
            .map(|&p| (p, Color::White))
            .collect();
        let board = board_with(&stones, Color::Black);
        assert_eq!(opening_move(&board, Color::Black), None);
    }

    #[test]
    fn candidate_tables_stay_on_the_board_rim() {
        for &pos in EDGE_POINTS.iter().chain(CORNER_POINTS.iter()) {
            let (row, col) = (pos / BOARD_SIZE, pos % BOARD_SIZE);
            assert!(
                row == 0 || row == 8 || col == 0 || col == 8 || row == 1 || col == 1
                    || row == 7 || col == 7,
                "candidate {pos} is not near the rim"
            );
        }
    }
}
