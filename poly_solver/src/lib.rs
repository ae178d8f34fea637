//! Tetromino/polyomino exact-cover solver: builds a piece's rotations and
//! (optionally) reflections, enumerates every placement on a board as a row
//! of a sparse 0/1 matrix, and runs Algorithm X over it.
//!
//! Three layers, bottom-up: [`piece`] builds immutable shape variants;
//! [`placement`] enumerates the matrix rows; [`search`] runs the
//! branch-and-backtrack cover search. [`solver`] is the `solve()` façade
//! most callers want.

pub mod error;
pub mod piece;
pub mod placement;
pub mod search;
pub mod solver;

pub use error::{Error, ErrorKind, Result};
pub use piece::{Piece, PieceInstance, Variant};
pub use placement::PlacementRow;
pub use solver::{solve, SolveReport, SolverConfig};
