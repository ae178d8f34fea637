mod common;

use std::time::Duration;

use poly_solver::{solve, PieceInstance, SolverConfig};

fn square(id: char) -> PieceInstance {
    let occ: String = std::iter::repeat(id).take(4).collect();
    PieceInstance {
        id,
        rows: 2,
        cols: 2,
        occupancy: occ,
    }
}

/// A 4x4 board tiled by four 2x2 square pieces, one per quadrant — the
/// simplest instance of "N pieces whose combined area matches the board"
/// that is unambiguously solvable by construction.
#[test]
fn four_square_pieces_fully_tile_a_four_by_four_board() {
    common::init_log();
    let config = SolverConfig {
        board_rows: 4,
        board_cols: 4,
        pieces: vec![square('J'), square('L'), square('S'), square('O')],
        reflect: false,
        deadline: Duration::from_secs(10),
    };
    let report = solve(&config).unwrap();
    assert!(report.total_solutions >= 1);
    assert_eq!(report.best_partial_depth, 4);
    assert!(report.best_partial_board.iter().all(|&c| c != '-'));
}

/// A U-piece and a plus-piece can't tile a
/// 3x3 board (5 + 5 = 10 cells, the board has 9); some best partial is
/// still returned.
#[test]
fn u_and_plus_pieces_cannot_tile_a_three_by_three_board() {
    common::init_log();
    let config = SolverConfig {
        board_rows: 3,
        board_cols: 3,
        pieces: vec![
            PieceInstance {
                id: 'K',
                rows: 2,
                cols: 3,
                occupancy: "K.KKKK".to_string(),
            },
            PieceInstance {
                id: 'N',
                rows: 3,
                cols: 3,
                occupancy: ".N.NNN.N.".to_string(),
            },
        ],
        reflect: false,
        deadline: Duration::from_secs(10),
    };
    let report = solve(&config).unwrap();
    assert_eq!(report.total_solutions, 0);
    assert!(report.best_partial_depth >= 1);
}

/// A single 5x1 vertical stick tiles a 5x1
/// board exactly once.
#[test]
fn vertical_stick_tiles_a_five_by_one_board_exactly_once() {
    common::init_log();
    let config = SolverConfig {
        board_rows: 5,
        board_cols: 1,
        pieces: vec![PieceInstance {
            id: 'A',
            rows: 5,
            cols: 1,
            occupancy: "AAAAA".to_string(),
        }],
        reflect: false,
        deadline: Duration::from_secs(10),
    };
    let report = solve(&config).unwrap();
    assert_eq!(report.total_solutions, 1);
    assert_eq!(report.best_partial_board, vec!['A'; 5]);
}

/// A 6x1 stick tiles a 6x1 board exactly
/// once, rendered as six stacked characters.
#[test]
fn six_long_stick_tiles_a_six_by_one_board_exactly_once() {
    common::init_log();
    let config = SolverConfig {
        board_rows: 6,
        board_cols: 1,
        pieces: vec![PieceInstance {
            id: 'A',
            rows: 6,
            cols: 1,
            occupancy: "AAAAAA".to_string(),
        }],
        reflect: false,
        deadline: Duration::from_secs(10),
    };
    let report = solve(&config).unwrap();
    assert_eq!(report.total_solutions, 1);
    assert_eq!(report.best_partial_board, vec!['A'; 6]);
}

/// A single horizontal 1x4 piece cannot tile
/// both rows of a 2x4 board; the best partial covers exactly one row.
#[test]
fn single_i_piece_cannot_tile_both_rows_of_a_two_by_four_board() {
    common::init_log();
    let config = SolverConfig {
        board_rows: 2,
        board_cols: 4,
        pieces: vec![PieceInstance {
            id: 'I',
            rows: 1,
            cols: 4,
            occupancy: "IIII".to_string(),
        }],
        reflect: false,
        deadline: Duration::from_secs(10),
    };
    let report = solve(&config).unwrap();
    assert_eq!(report.total_solutions, 0);
    assert_eq!(report.best_partial_depth, 1);
    assert_eq!(report.best_partial_board.iter().filter(|&&c| c == 'I').count(), 4);
}

/// Determinism: two independent runs over identical input produce
/// identical solution counts and an identical best-partial board.
#[test]
fn identical_inputs_produce_identical_results() {
    common::init_log();
    let make_config = || SolverConfig {
        board_rows: 4,
        board_cols: 4,
        pieces: vec![square('J'), square('L'), square('S'), square('O')],
        reflect: false,
        deadline: Duration::from_secs(10),
    };

    let first = solve(&make_config()).unwrap();
    let second = solve(&make_config()).unwrap();
    assert_eq!(first.total_solutions, second.total_solutions);
    assert_eq!(first.best_partial_board, second.best_partial_board);
}
