//! Top-down `open/close/put/get/delete` façade driving proactive splitting
//! on insert and tombstone-only deletion.

use std::path::Path;

use log::info;

use crate::error::{Error, ErrorKind, Result};
use crate::node::{self, Node, SENTINEL_VALUE};
use crate::pager::{Pager, PagerStats};

/// Root is always at address 0.
pub const ROOT_ADDRESS: i32 = 0;

/// A persistent key/value B-tree over fixed-width signed integer keys and
/// values, backed by a single [`Pager`].
pub struct BTree {
    pager: Option<Pager>,
}

impl BTree {
    /// Opens (or creates) the store at `path`. If newly created, an empty
    /// leaf root is allocated at address 0.
    pub fn open(path: impl AsRef<Path>, t: i32) -> Result<Self> {
        let mut pager = Pager::open(path, t)?;
        if pager.empty()? {
            let addr = pager.alloc()?;
            debug_assert_eq!(addr, ROOT_ADDRESS, "first alloc on an empty store must be address 0");
            let root = Node::empty(pager.get_t(), true);
            pager.write(ROOT_ADDRESS, &root)?;
        }
        Ok(Self { pager: Some(pager) })
    }

    /// Flushes and closes the underlying store. Idempotent: calling this
    /// again after a successful close returns `Ok(())` without touching
    /// any file.
    pub fn close(&mut self) -> Result<()> {
        if let Some(pager) = self.pager.take() {
            pager.close()?;
        }
        Ok(())
    }

    pub fn get_t(&self) -> Result<i32> {
        Ok(self.pager()?.get_t())
    }

    pub fn stats(&self) -> Result<PagerStats> {
        Ok(self.pager()?.stats())
    }

    fn pager(&self) -> Result<&Pager> {
        self.pager
            .as_ref()
            .ok_or_else(|| Error::new(ErrorKind::ClosedPager, "operation on a closed tree"))
    }

    fn pager_mut(&mut self) -> Result<&mut Pager> {
        self.pager
            .as_mut()
            .ok_or_else(|| Error::new(ErrorKind::ClosedPager, "operation on a closed tree"))
    }

    /// Inserts or updates `(k, v)`. Pre-splits a full root before
    /// descending so every recursive call ever sees a non-full node.
    pub fn put(&mut self, k: i32, v: i32) -> Result<()> {
        let pager = self.pager_mut()?;
        let t = pager.get_t();
        let root = pager.read(ROOT_ADDRESS)?;

        if root.is_full(t) {
            split_root(pager, &root)?;
            info!("put: root split, new root written to address {}", ROOT_ADDRESS);
        }

        node::insert_nonfull(pager, ROOT_ADDRESS, k, v)
    }

    /// Looks up `k`. Returns `Some(value)` on a live hit, `None` if absent
    /// or tombstoned — never an error.
    pub fn get(&mut self, k: i32) -> Result<Option<i32>> {
        let pager = self.pager_mut()?;
        node::search(pager, ROOT_ADDRESS, k)
    }

    /// Best-effort delete: marks the key's value as a tombstone. A missing
    /// or already-tombstoned key is a no-op, not an error.
    pub fn delete(&mut self, k: i32) -> Result<()> {
        let pager = self.pager_mut()?;
        node::mark_deleted(pager, ROOT_ADDRESS, k)
    }

    /// Independent recursive re-check of the tree's structural invariants
    /// (key ordering, node occupancy bounds, sentinel hygiene, uniform leaf
    /// depth), using fresh reads rather than reusing `get`/`put`'s traversal
    /// code.
    pub fn check_invariants(&mut self) -> Result<()> {
        let pager = self.pager_mut()?;
        let t = pager.get_t();
        let root = pager.read(ROOT_ADDRESS)?;
        check_node(pager, ROOT_ADDRESS, &root, t, true, i32::MIN, i32::MAX, None)?;
        Ok(())
    }
}

/// Splits a full root: copies the lower half into a freshly allocated
/// `new_lower`, the upper half into `new_upper`, and overwrites address 0
/// with a new internal root whose single key is the old root's median.
fn split_root(pager: &mut Pager, root: &Node) -> Result<()> {
    let t = pager.get_t();
    let leaf = root.leaf;

    let median_key = root.key[(t - 1) as usize];
    let median_value = root.value[(t - 1) as usize];

    let mut lower = Node::empty(t, leaf);
    lower.n = t - 1;
    lower.key[..(t - 1) as usize].copy_from_slice(&root.key[..(t - 1) as usize]);
    lower.value[..(t - 1) as usize].copy_from_slice(&root.value[..(t - 1) as usize]);
    if !leaf {
        lower.child[..t as usize].copy_from_slice(&root.child[..t as usize]);
    }

    let mut upper = Node::empty(t, leaf);
    upper.n = t - 1;
    upper.key[..(t - 1) as usize].copy_from_slice(&root.key[t as usize..(2 * t - 1) as usize]);
    upper.value[..(t - 1) as usize].copy_from_slice(&root.value[t as usize..(2 * t - 1) as usize]);
    if !leaf {
        upper.child[..t as usize].copy_from_slice(&root.child[t as usize..(2 * t) as usize]);
    }

    let new_lower = pager.alloc()?;
    let new_upper = pager.alloc()?;
    pager.write(new_lower, &lower)?;
    pager.write(new_upper, &upper)?;

    let mut new_root = Node::empty(t, false);
    new_root.n = 1;
    new_root.key[0] = median_key;
    new_root.value[0] = median_value;
    new_root.child[0] = new_lower;
    new_root.child[1] = new_upper;
    pager.write(ROOT_ADDRESS, &new_root)?;

    Ok(())
}

/// Recursively validates structural invariants on the subtree rooted at
/// `addr`, given the node already read there and the open `(lo, hi)` key
/// bound in effect (`parent_key_ref` names the slot used for the error
/// message only).
fn check_node(
    pager: &mut Pager,
    addr: i32,
    node: &Node,
    t: i32,
    is_root: bool,
    lo: i32,
    hi: i32,
    parent_key_ref: Option<usize>,
) -> Result<usize> {
    let _ = parent_key_ref;
    let n = node.n as usize;

    if !is_root && !((t - 1) as usize <= n && n <= (2 * t - 1) as usize) {
        return Err(Error::new(
            ErrorKind::Corruption,
            format!("node at {} has n={} outside [{}, {}]", addr, n, t - 1, 2 * t - 1),
        ));
    }
    if is_root && n > (2 * t - 1) as usize {
        return Err(Error::new(
            ErrorKind::Corruption,
            format!("root at {} has n={} > {}", addr, n, 2 * t - 1),
        ));
    }

    for i in 0..n {
        let k = node.key[i];
        if k < lo || k > hi {
            return Err(Error::new(
                ErrorKind::Corruption,
                format!("key {} at {}[{}] outside bound ({}, {})", k, addr, i, lo, hi),
            ));
        }
        if i > 0 && node.key[i - 1] >= node.key[i] {
            return Err(Error::new(
                ErrorKind::Corruption,
                format!("keys not strictly increasing at {}: {} >= {}", addr, node.key[i - 1], node.key[i]),
            ));
        }
        if node.key[i] == SENTINEL_VALUE || node.value[i] == SENTINEL_VALUE {
            return Err(Error::new(
                ErrorKind::Corruption,
                format!("live slot {} at {} carries the unused sentinel", i, addr),
            ));
        }
    }
    for i in n..node.key.len() {
        if node.key[i] != SENTINEL_VALUE || node.value[i] != SENTINEL_VALUE {
            return Err(Error::new(
                ErrorKind::Corruption,
                format!("dead slot {} at {} does not carry the sentinel", i, addr),
            ));
        }
    }

    if node.leaf {
        return Ok(0);
    }

    let mut child_depth = None;
    for i in 0..=n {
        let child_addr = node.child[i];
        let child = pager.read(child_addr)?;
        let child_lo = if i == 0 { lo } else { node.key[i - 1] };
        let child_hi = if i == n { hi } else { node.key[i] };
        let depth = check_node(pager, child_addr, &child, t, false, child_lo, child_hi, Some(i))?;
        match child_depth {
            None => child_depth = Some(depth),
            Some(d) if d == depth => {}
            Some(d) => {
                return Err(Error::new(
                    ErrorKind::Corruption,
                    format!("leaves at uneven depth under {}: {} vs {}", addr, d, depth),
                ));
            }
        }
    }

    Ok(child_depth.unwrap_or(0) + 1)
}
