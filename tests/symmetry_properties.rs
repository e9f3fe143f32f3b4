mod common;

use std::collections::HashSet;

use common::{canonical_states, reachable_states};
use gato::tictactoe::{Board, D4Transform};

#[test]
fn canonical_form_is_invariant_under_every_transform() {
    for state in reachable_states() {
        let board = state.board();
        let canonical = board.canonical();
        for transform in D4Transform::all() {
            let image = board.transform(&transform);
            assert_eq!(
                image.canonical(),
                canonical,
                "{transform} changed the class of {}",
                board.encode()
            );
            assert!(image.is_equivalent(board));
        }
        assert_eq!(canonical.canonical(), canonical);
    }
}

#[test]
fn canonical_form_is_the_smallest_image() {
    for state in reachable_states() {
        let board = state.board();
        let smallest = D4Transform::all()
            .iter()
            .map(|t| *board.transform(t).cells())
            .min()
            .unwrap();
        assert_eq!(*board.canonical().cells(), smallest);
    }
}

#[test]
fn reachable_positions_form_765_classes() {
    assert_eq!(reachable_states().len(), 5478);
    assert_eq!(canonical_states().len(), 765);
}

#[test]
fn orbit_and_stabilizer_sizes_multiply_to_eight() {
    for state in reachable_states() {
        let board = state.board();
        let orbit: HashSet<Board> = D4Transform::all()
            .iter()
            .map(|t| board.transform(t))
            .collect();
        assert_eq!(orbit.len() * board.stabilizer().len(), 8);
    }
}

#[test]
fn canonical_context_maps_positions_both_ways() {
    let board = Board::from_string(".X...O...").unwrap();
    let context = board.canonical_context();
    assert_eq!(board.transform(&context.transform), context.board);

    for pos in 0..9 {
        let mapped = context.map_to_canonical(pos);
        assert_eq!(board.get(pos), context.board.get(mapped));
        assert_eq!(context.map_to_original(mapped), pos);
    }
}

#[test]
fn transforms_compose_with_their_inverse() {
    for transform in D4Transform::all() {
        for pos in 0..9 {
            let there = transform.transform_position(pos);
            assert_eq!(transform.inverse().transform_position(there), pos);
        }
    }
}
