#[cfg(test)]
mod tests {
    use crate::arena::{ArenaExhausted, NodeArena};
    use crate::game::{Color, BOARD_CELLS};

    #[test]
    fn alloc_returns_zeroed_nodes() {
        let mut arena = NodeArena::with_capacity(4);
        assert!(arena.is_empty());
        let id = arena.alloc(Color::Black).unwrap();
        let node = arena.get(id);
        assert_eq!(node.count, 0);
        assert_eq!(node.val, 0);
        assert_eq!(node.rave_count, 0);
        assert_eq!(node.rave_val, 0);
        assert_eq!(node.color, Color::Black);
        assert!((0..BOARD_CELLS).all(|pos| node.child_at(pos).is_none()));
    }

    #[test]
    fn alloc_hands_out_distinct_slots() {
        let mut arena = NodeArena::with_capacity(3);
        let a = arena.alloc(Color::Black).unwrap();
        let b = arena.alloc(Color::White).unwrap();
        let c = arena.alloc(Color::Black).unwrap();
        assert_ne!(a, b);
        assert_ne!(b, c);
        assert_eq!(arena.len(), 3);
        arena.get_mut(b).count = 7;
        assert_eq!(arena.get(b).count, 7);
        assert_eq!(arena.get(a).count, 0);
        assert_eq!(arena.get(c).count, 0);
    }

    #[test]
    fn alloc_fails_at_capacity() {
        let mut arena = NodeArena::with_capacity(2);
        arena.alloc(Color::Black).unwrap();
        arena.alloc(Color::White).unwrap();
        assert_eq!(arena.alloc(Color::Black), Err(ArenaExhausted));
        // The arena stays usable for reads after exhaustion.
        assert_eq!(arena.len(), 2);
    }
}
