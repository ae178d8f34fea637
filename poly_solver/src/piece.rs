//! Piece shapes: a base occupancy grid plus its rotated (and optionally
//! reflected) variants. See DESIGN.md for the tight-bounding-box choice over
//! the original's square `alloc_dim` padding.

use crate::error::{Error, ErrorKind, Result};

/// Caller-supplied description of one piece instance: an id character, a
/// bounding box, and a dotted row-major occupancy string (`.` for empty,
/// any other non-`.` char is treated as filled and rewritten to `id`).
#[derive(Clone, Debug)]
pub struct PieceInstance {
    pub id: char,
    pub rows: usize,
    pub cols: usize,
    pub occupancy: String,
}

/// One rotation or reflection of a piece: a tight `rows x cols` grid,
/// row-major, filled cells carrying the piece's id and empty cells `.`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Variant {
    pub rows: usize,
    pub cols: usize,
    pub cells: Vec<char>,
}

impl Variant {
    pub fn cell(&self, row: usize, col: usize) -> char {
        self.cells[row * self.cols + col]
    }

    fn rotate_clockwise(&self) -> Variant {
        let (old_rows, old_cols) = (self.rows, self.cols);
        let (new_rows, new_cols) = (old_cols, old_rows);
        let mut cells = vec!['.'; new_rows * new_cols];
        for i in 0..new_rows {
            for j in 0..new_cols {
                cells[i * new_cols + j] = self.cell(old_rows - 1 - j, i);
            }
        }
        Variant {
            rows: new_rows,
            cols: new_cols,
            cells,
        }
    }

    fn reflect_horizontal(&self) -> Variant {
        let mut cells = vec!['.'; self.rows * self.cols];
        for i in 0..self.rows {
            for j in 0..self.cols {
                cells[i * self.cols + j] = self.cell(i, self.cols - 1 - j);
            }
        }
        Variant {
            rows: self.rows,
            cols: self.cols,
            cells,
        }
    }
}

/// A piece's id plus its distinct variants. `variants.len()` is 4 for an
/// unreflected piece, up to 8 when reflection is enabled (fewer if rotations
/// or reflections coincide, e.g. the square tetromino collapses to 1).
#[derive(Clone, Debug)]
pub struct Piece {
    pub id: char,
    pub variants: Vec<Variant>,
}

impl Piece {
    /// Builds the canonical variant from `instance`, then its three further
    /// clockwise rotations, then (if `reflect`) a horizontal mirror and its
    /// three rotations, deduplicating identical grids along the way.
    pub fn build(instance: &PieceInstance, reflect: bool) -> Result<Piece> {
        if instance.rows == 0 || instance.cols == 0 {
            return Err(Error::new(
                ErrorKind::InvalidConfig,
                format!("piece '{}' has a zero-sized bounding box", instance.id),
            ));
        }
        if instance.occupancy.chars().count() != instance.rows * instance.cols {
            return Err(Error::new(
                ErrorKind::InvalidConfig,
                format!(
                    "piece '{}' occupancy has {} chars, expected {}x{}={}",
                    instance.id,
                    instance.occupancy.chars().count(),
                    instance.rows,
                    instance.cols,
                    instance.rows * instance.cols
                ),
            ));
        }

        let base_cells: Vec<char> = instance
            .occupancy
            .chars()
            .map(|c| if c == '.' { '.' } else { instance.id })
            .collect();
        let base = Variant {
            rows: instance.rows,
            cols: instance.cols,
            cells: base_cells,
        };
        if !base.cells.iter().any(|&c| c != '.') {
            return Err(Error::new(
                ErrorKind::InvalidConfig,
                format!("piece '{}' has no filled cells", instance.id),
            ));
        }

        let mut candidates = Vec::with_capacity(8);
        let rot1 = base.rotate_clockwise();
        let rot2 = rot1.rotate_clockwise();
        let rot3 = rot2.rotate_clockwise();
        candidates.push(base);
        candidates.push(rot1);
        candidates.push(rot2);
        candidates.push(rot3);

        if reflect {
            let reflected = candidates[0].reflect_horizontal();
            let rrot1 = reflected.rotate_clockwise();
            let rrot2 = rrot1.rotate_clockwise();
            let rrot3 = rrot2.rotate_clockwise();
            candidates.push(reflected);
            candidates.push(rrot1);
            candidates.push(rrot2);
            candidates.push(rrot3);
        }

        let mut variants: Vec<Variant> = Vec::with_capacity(candidates.len());
        for v in candidates {
            if !variants.contains(&v) {
                variants.push(v);
            }
        }

        Ok(Piece {
            id: instance.id,
            variants,
        })
    }
}
