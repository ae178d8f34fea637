//! A single-file, fixed-degree persistent B-tree key/value store.
//!
//! Three layers, bottom-up: [`pager`] owns the backing file and the block
//! format; [`node`] holds the pure CLRS-style node algorithms (search,
//! insert-with-proactive-split, tombstone delete); [`tree`] is the
//! `open/close/put/get/delete` façade most callers want. Keys and values are
//! fixed-width `i32`s.

pub mod error;
pub mod node;
pub mod pager;
pub mod tree;

pub use error::{Error, ErrorKind, Result};
pub use node::{DELETION_SENTINEL, SENTINEL_VALUE};
pub use pager::{Pager, PagerStats};
pub use tree::BTree;
