mod common;

use common::canonical_states;
use gato::{
    Error,
    search::{DRAW, LOSS, MinimaxEngine, Pruning, SearchConfig, WIN, decide},
    tictactoe::{Game, GameOutcome, GameState, Move, Player},
};

fn all_configs() -> Vec<SearchConfig> {
    let mut configs = Vec::new();
    for pruning in [Pruning::None, Pruning::AlphaBeta] {
        for parallel_root in [false, true] {
            for transposition in [false, true] {
                configs.push(
                    SearchConfig::new()
                        .with_pruning(pruning)
                        .with_parallel_root(parallel_root)
                        .with_transposition(transposition),
                );
            }
        }
    }
    configs
}

#[test]
fn opening_move_is_on_the_board_and_the_game_is_drawn() {
    let state = GameState::new_game();
    let decision = MinimaxEngine::default().evaluate(&state).unwrap();

    assert!(state.board().is_empty(decision.mv.position()));
    assert_eq!(decision.mv, Move::new(0, 0, Player::X));
    assert_eq!(decision.score, DRAW);

    let openings: Vec<usize> = decision.children.iter().map(|c| c.mv.position()).collect();
    assert_eq!(openings, vec![0, 1, 4]);
}

#[test]
fn takes_the_winning_diagonal() {
    // X . O
    // . X O
    // . . .
    let state = GameState::parse("X.O.XO..._X").unwrap();
    let decision = MinimaxEngine::default().evaluate(&state).unwrap();
    assert_eq!(decision.mv, Move::new(2, 2, Player::X));
    assert_eq!(decision.score, WIN);

    let after = state.apply_move(2, 2).unwrap();
    assert!(after.is_terminal());
    assert_eq!(after.winner(), Some(Player::X));
}

#[test]
fn finishes_at_once_instead_of_forking() {
    // X O O
    // . X .
    // . . .
    // (0, 1) also wins by force, but only after O's reply.
    let state = GameState::parse("XOO.X...._X").unwrap();
    for config in all_configs() {
        let decision = MinimaxEngine::new(config).evaluate(&state).unwrap();
        assert_eq!(decision.mv, Move::new(2, 2, Player::X), "{config:?}");
        assert_eq!(decision.score, WIN);
        assert_eq!(decision.plies, Some(1));
        assert!(state.apply_move(2, 2).unwrap().is_terminal());
    }
}

#[test]
fn prefers_winning_over_blocking() {
    // O to move with both sides threatening: O O . / X X . / X . .
    let state = GameState::parse("OO.XX.X.._O").unwrap();
    let decision = decide(&state).unwrap();
    assert_eq!(decision, Move::new(2, 0, Player::O));
}

#[test]
fn full_board_has_no_move() {
    let full = GameState::parse("XOXXOOOXX").unwrap();
    assert_eq!(decide(&full), Err(Error::NoMoveAvailable));
    assert_eq!(full.apply_move(1, 1), Err(Error::GameOver));
}

#[test]
fn repeated_decisions_agree() {
    for state in canonical_states().into_iter().filter(|s| !s.is_over()) {
        let engine = MinimaxEngine::default();
        assert_eq!(engine.decide(&state), engine.decide(&state));
    }
}

#[test]
fn every_configuration_chooses_the_same_move() {
    let configs = all_configs();
    for state in canonical_states().into_iter().filter(|s| !s.is_over()) {
        let reference = MinimaxEngine::new(configs[0]).evaluate(&state).unwrap();
        let best = reference.children.iter().map(|c| c.score).max().unwrap();
        assert_eq!(reference.score, best);
        assert!(reference.children.iter().all(|c| (LOSS..=WIN).contains(&c.score)));

        for config in &configs[1..] {
            let decision = MinimaxEngine::new(*config).evaluate(&state).unwrap();
            assert_eq!(
                decision.mv,
                reference.mv,
                "{config:?} disagrees on {}",
                state.board().encode()
            );
            assert_eq!(decision.children, reference.children);
        }
    }
}

#[test]
fn o_can_open() {
    let state = GameState::new_game_with(Player::O);
    let mv = decide(&state).unwrap();
    assert_eq!(mv.player, Player::O);

    let mut game = Game::from_state(state);
    while !game.is_over() {
        let mv = decide(game.current()).unwrap();
        game.play_move(mv).unwrap();
    }
    assert_eq!(game.outcome(), Some(GameOutcome::Draw));
}

#[test]
fn session_rejects_moves_out_of_turn() {
    let mut game = Game::new();
    let err = game.play_move(Move::new(1, 1, Player::O)).unwrap_err();
    assert_eq!(
        err,
        Error::WrongPlayer {
            expected: Player::X,
            got: Player::O
        }
    );
    assert_eq!(game.moves().len(), 0);
}
