use super::*;
use crate::puzzle::state::PuzzleState;

#[test]
fn spare_peg_is_the_third_index() {
    assert_eq!(spare_peg(0, 2), 1);
    assert_eq!(spare_peg(2, 0), 1);
    assert_eq!(spare_peg(0, 1), 2);
    assert_eq!(spare_peg(1, 2), 0);
}

#[test]
fn one_layer_is_a_single_direct_move() {
    let moves: Vec<_> = solve(1).collect();
    assert_eq!(moves, vec![Move::new(0, 2)]);
}

#[test]
fn three_layers_match_reference_order() {
    let moves: Vec<_> = solve(3).map(|m| (m.origin, m.destination)).collect();
    assert_eq!(
        moves,
        vec![(0, 2), (0, 1), (2, 1), (0, 2), (1, 0), (1, 2), (0, 2)]
    );
}

#[test]
fn zero_layers_yields_nothing() {
    assert_eq!(solve(0).count(), 0);
}

#[test]
fn move_count_is_two_pow_l_minus_one() {
    for layers in 1..=12u32 {
        let moves = solve(layers);
        assert_eq!(moves.size_hint(), (((1usize << layers) - 1), Some((1usize << layers) - 1)));
        assert_eq!(moves.count() as u64, (1u64 << layers) - 1, "layers={layers}");
    }
}

#[test]
fn every_move_is_legal_and_ends_solved() {
    for layers in 1..=10u32 {
        let mut state = PuzzleState::new(layers as usize);
        for mv in solve(layers) {
            let moving = state.top_disk(mv.origin).expect("origin peg has a disk");
            let smallest = state
                .slots(mv.origin)
                .iter()
                .copied()
                .filter(|&r| r != 0)
                .min()
                .unwrap();
            assert_eq!(moving, smallest);
            if let Some(below) = state.top_disk(mv.destination) {
                assert!(below > moving, "disk {moving} placed on {below}");
            }
            state.apply(mv.origin, mv.destination);
        }
        assert!(state.is_solved(), "layers={layers}");
        assert_eq!(state.height(0), 0);
        assert_eq!(state.height(1), 0);
        assert_eq!(state.height(2), layers as usize);
    }
}

#[test]
fn pending_stack_stays_linear_in_depth() {
    let mut moves = solve(16);
    let mut max_depth = 0;
    while moves.next().is_some() {
        max_depth = max_depth.max(moves.stack.len());
    }
    assert!(max_depth <= 32, "depth {max_depth}");
}
