//! Builds the sparse exact-cover matrix: one row per legal placement of one
//! piece variant at one board position.

use itertools::iproduct;

use crate::piece::Piece;

/// One row of the exact-cover matrix: placing `variant_ix` of piece
/// `piece_ix` with its top-left corner at `(top, left)`. `columns` holds the
/// board-cell column ids this placement fills, followed by its one
/// piece-instance column id.
#[derive(Clone, Debug)]
pub struct PlacementRow {
    pub piece_ix: usize,
    pub variant_ix: usize,
    pub top: usize,
    pub left: usize,
    pub columns: Vec<usize>,
}

/// Enumerates every placement of every variant of every piece instance that
/// fits inside an `board_rows x board_cols` board. Row order: pieces in
/// input order, then variants `0..V`, then `top` ascending, then `left`
/// ascending — matching the original matrix-building loop nest.
pub fn enumerate(board_rows: usize, board_cols: usize, pieces: &[Piece]) -> Vec<PlacementRow> {
    let mut total = 0usize;
    for piece in pieces {
        for variant in &piece.variants {
            if variant.rows > board_rows || variant.cols > board_cols {
                continue;
            }
            total += (board_rows - variant.rows + 1) * (board_cols - variant.cols + 1);
        }
    }

    let mut rows = Vec::with_capacity(total);
    for (piece_ix, piece) in pieces.iter().enumerate() {
        for (variant_ix, variant) in piece.variants.iter().enumerate() {
            if variant.rows > board_rows || variant.cols > board_cols {
                continue;
            }
            let top_range = 0..=(board_rows - variant.rows);
            let left_range = 0..=(board_cols - variant.cols);
            for (top, left) in iproduct!(top_range, left_range) {
                let mut columns = Vec::with_capacity(variant.cells.iter().filter(|&&c| c != '.').count() + 1);
                for dy in 0..variant.rows {
                    for dx in 0..variant.cols {
                        if variant.cell(dy, dx) != '.' {
                            columns.push((top + dy) * board_cols + (left + dx));
                        }
                    }
                }
                columns.push(board_rows * board_cols + piece_ix);
                rows.push(PlacementRow {
                    piece_ix,
                    variant_ix,
                    top,
                    left,
                    columns,
                });
            }
        }
    }

    rows
}
