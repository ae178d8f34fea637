//! Algorithm X over the placement matrix, using the two-array (`active`
//! row bitmap, `covered` column bitmap) representation rather than Knuth's
//! Dancing Links — adequate for the board sizes this solver targets, per
//! the original's own approach.

use std::time::Instant;

use bit_vec::BitVec;
use log::{debug, trace};

use crate::placement::PlacementRow;

/// Result of a complete search: how many full covers were found, and the
/// deepest partial solution seen (a list of row indices into the placement
/// matrix), which equals a complete solution when `total_solutions > 0`.
pub struct SearchOutcome {
    pub total_solutions: u64,
    pub best_solution: Vec<usize>,
    pub best_depth: usize,
}

struct Engine<'a> {
    rows: &'a [PlacementRow],
    row_mask: Vec<BitVec>,
    total_columns: usize,
    deadline: Instant,
    active: BitVec,
    covered: BitVec,
    covered_count: usize,
    partial: Vec<usize>,
    best: Vec<usize>,
    best_depth: usize,
    total_solutions: u64,
    timed_out: bool,
}

impl<'a> Engine<'a> {
    fn new(rows: &'a [PlacementRow], total_columns: usize, deadline: Instant) -> Self {
        let row_mask = rows
            .iter()
            .map(|row| {
                let mut mask = BitVec::from_elem(total_columns, false);
                for &c in &row.columns {
                    mask.set(c, true);
                }
                mask
            })
            .collect();

        Engine {
            rows,
            row_mask,
            total_columns,
            deadline,
            active: BitVec::from_elem(rows.len(), true),
            covered: BitVec::from_elem(total_columns, false),
            covered_count: 0,
            partial: Vec::new(),
            best: Vec::new(),
            best_depth: 0,
            total_solutions: 0,
            timed_out: false,
        }
    }

    /// The uncovered column with the fewest active rows covering it, and
    /// that count. Ties broken by lowest column index.
    fn choose_column(&self) -> Option<(usize, usize)> {
        let mut best: Option<(usize, usize)> = None;
        for c in 0..self.total_columns {
            if self.covered[c] {
                continue;
            }
            let count = (0..self.rows.len())
                .filter(|&r| self.active[r] && self.row_mask[r][c])
                .count();
            match best {
                Some((_, best_count)) if best_count <= count => {}
                _ => best = Some((c, count)),
            }
        }
        best
    }

    fn rows_conflict(&self, r1: usize, r2: usize) -> bool {
        self.rows[r1]
            .columns
            .iter()
            .any(|&c| self.row_mask[r2][c])
    }

    fn run(&mut self) {
        self.recurse();
    }

    fn recurse(&mut self) {
        if self.partial.len() > self.best_depth {
            self.best_depth = self.partial.len();
            self.best = self.partial.clone();
        }

        if self.covered_count == self.total_columns {
            self.total_solutions += 1;
            trace!("complete solution #{} at depth {}", self.total_solutions, self.partial.len());
            return;
        }

        let Some((col, count)) = self.choose_column() else {
            return;
        };
        if count == 0 {
            return;
        }

        let candidates: Vec<usize> = (0..self.rows.len())
            .filter(|&r| self.active[r] && self.row_mask[r][col])
            .collect();

        for r in candidates {
            if Instant::now() >= self.deadline {
                debug!("deadline reached at depth {}", self.partial.len());
                self.timed_out = true;
                return;
            }

            let active_snapshot = self.active.clone();
            let covered_snapshot = self.covered.clone();
            let covered_count_snapshot = self.covered_count;

            for &c in &self.rows[r].columns {
                if !self.covered[c] {
                    self.covered.set(c, true);
                    self.covered_count += 1;
                }
            }
            for j in 0..self.rows.len() {
                if self.active[j] && (j == r || self.rows_conflict(r, j)) {
                    self.active.set(j, false);
                }
            }

            self.partial.push(r);
            self.recurse();
            self.partial.pop();

            self.active = active_snapshot;
            self.covered = covered_snapshot;
            self.covered_count = covered_count_snapshot;

            if self.timed_out {
                return;
            }
        }
    }
}

/// Runs Algorithm X to completion or until `deadline` passes, whichever
/// comes first. `total_columns` is `board_rows * board_cols + n_pieces`.
pub fn solve(rows: &[PlacementRow], total_columns: usize, deadline: Instant) -> SearchOutcome {
    let mut engine = Engine::new(rows, total_columns, deadline);
    engine.run();
    SearchOutcome {
        total_solutions: engine.total_solutions,
        best_solution: engine.best,
        best_depth: engine.best_depth,
    }
}
