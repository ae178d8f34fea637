//! Top-level façade: builds pieces and the placement matrix, runs the
//! search, and renders the best partial solution onto a board.

use std::time::{Duration, Instant};

use log::info;

use crate::error::{Error, ErrorKind, Result};
use crate::piece::{Piece, PieceInstance};
use crate::placement::{self, PlacementRow};
use crate::search;

/// Everything the solver needs for one run: board size, the piece
/// instances to place, whether reflected variants are allowed, and a
/// wall-clock search budget.
pub struct SolverConfig {
    pub board_rows: usize,
    pub board_cols: usize,
    pub pieces: Vec<PieceInstance>,
    pub reflect: bool,
    pub deadline: Duration,
}

/// Outcome of one solve: the number of complete tilings found, and the
/// deepest partial solution seen, rendered as a board.
pub struct SolveReport {
    pub total_solutions: u64,
    pub best_partial_board: Vec<char>,
    pub best_partial_depth: usize,
}

/// Builds the piece catalogue and placement matrix for `config`, then runs
/// Algorithm X. Never returns an error for an untileable board or a
/// deadline reached mid-search — those are reported as zero solutions and
/// a best-effort partial board respectively. `Err` is reserved for invalid
/// input (bad board dimensions, malformed piece instances).
pub fn solve(config: &SolverConfig) -> Result<SolveReport> {
    if config.board_rows == 0 || config.board_cols == 0 {
        return Err(Error::new(
            ErrorKind::InvalidConfig,
            format!(
                "board dimensions must be positive, got {}x{}",
                config.board_rows, config.board_cols
            ),
        ));
    }
    if config.pieces.is_empty() {
        return Err(Error::new(ErrorKind::InvalidConfig, "no pieces provided"));
    }

    let pieces: Vec<Piece> = config
        .pieces
        .iter()
        .map(|instance| Piece::build(instance, config.reflect))
        .collect::<Result<_>>()?;

    let rows = placement::enumerate(config.board_rows, config.board_cols, &pieces);
    let total_columns = config.board_rows * config.board_cols + pieces.len();
    info!(
        "built placement matrix: {} rows, {} columns, {} pieces",
        rows.len(),
        total_columns,
        pieces.len()
    );

    let deadline = Instant::now() + config.deadline;
    let outcome = search::solve(&rows, total_columns, deadline);
    info!(
        "search finished: {} solutions, best depth {}/{}",
        outcome.total_solutions,
        outcome.best_depth,
        pieces.len()
    );

    let best_partial_board = render(
        config.board_rows,
        config.board_cols,
        &rows,
        &pieces,
        &outcome.best_solution,
    );

    Ok(SolveReport {
        total_solutions: outcome.total_solutions,
        best_partial_board,
        best_partial_depth: outcome.best_depth,
    })
}

/// Renders a list of chosen placement-matrix row indices onto an
/// `R*C`-length board, empty cells carrying `-`.
fn render(
    board_rows: usize,
    board_cols: usize,
    rows: &[PlacementRow],
    pieces: &[Piece],
    solution: &[usize],
) -> Vec<char> {
    let mut board = vec!['-'; board_rows * board_cols];
    for &row_ix in solution {
        let row = &rows[row_ix];
        let piece = &pieces[row.piece_ix];
        let variant = &piece.variants[row.variant_ix];
        for dy in 0..variant.rows {
            for dx in 0..variant.cols {
                if variant.cell(dy, dx) != '.' {
                    let pos = (row.top + dy) * board_cols + (row.left + dx);
                    board[pos] = piece.id;
                }
            }
        }
    }
    board
}
