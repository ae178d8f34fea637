//! Owns the single backing file for a B-tree store: serializes/deserializes
//! fixed-size node blocks at computed offsets and tracks read/write/alloc
//! counters.

use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use log::{debug, warn};

use crate::error::{Error, ErrorKind, Result};
use crate::node::Node;

const MAGIC_NUMBER: i32 = 0xBEEFCAFEu32 as i32;
const FORMAT_VERSION: i32 = 1;
/// Three `i32`s: magic, version, t.
const HEADER_SIZE: u64 = 12;

/// Cumulative read/write/alloc counts since the pager was opened.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PagerStats {
    pub reads: u64,
    pub writes: u64,
    pub allocs: u64,
}

/// An open, single-file B-tree page store.
///
/// `Pager::open` returns an owned handle rather than a global singleton
/// (see DESIGN.md); there is no `Pager::global()`. A handle going out of
/// scope without calling [`Pager::close`] still flushes on `Drop`, so a
/// dropped handle never loses buffered writes.
pub struct Pager {
    file: File,
    t: i32,
    block_size: usize,
    stats: PagerStats,
    path: PathBuf,
}

impl Pager {
    /// Opens `path` if it exists (adopting its stored `t`, ignoring
    /// `t_desired`) or creates it fresh with `t_desired` (which must be
    /// `>= 2`). Resets the read/write/alloc counters.
    pub fn open(path: impl AsRef<Path>, t_desired: i32) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::open_existing(path)
        } else {
            Self::create_new(path, t_desired)
        }
    }

    fn open_existing(path: &Path) -> Result<Self> {
        let mut file = OpenOptions::new().read(true).write(true).open(path)?;

        let mut header = [0u8; HEADER_SIZE as usize];
        file.seek(SeekFrom::Start(0))?;
        file.read_exact(&mut header).map_err(|e| {
            Error::new(
                ErrorKind::Corruption,
                format!("short read of header in {:?}: {e}", path),
            )
        })?;
        let magic = i32::from_ne_bytes(header[0..4].try_into().unwrap());
        let version = i32::from_ne_bytes(header[4..8].try_into().unwrap());
        let t = i32::from_ne_bytes(header[8..12].try_into().unwrap());

        if magic != MAGIC_NUMBER || version != FORMAT_VERSION {
            return Err(Error::new(
                ErrorKind::Corruption,
                format!(
                    "bad header in {:?}: magic={:#x} version={} (want magic={:#x} version={})",
                    path, magic, version, MAGIC_NUMBER, FORMAT_VERSION
                ),
            ));
        }
        if t < 2 {
            return Err(Error::new(
                ErrorKind::Corruption,
                format!("stored degree t={} in {:?} is invalid (t >= 2 required)", t, path),
            ));
        }

        let block_size = Node::block_len(t) * 4;
        let file_size = file.metadata()?.len();
        if file_size < HEADER_SIZE || (file_size - HEADER_SIZE) % block_size as u64 != 0 {
            warn!(
                "{:?}: file size {} does not align with header {} + k*block_size {}",
                path, file_size, HEADER_SIZE, block_size
            );
        }

        debug!("opened existing store {:?} with t={}", path, t);
        Ok(Self {
            file,
            t,
            block_size,
            stats: PagerStats::default(),
            path: path.to_path_buf(),
        })
    }

    fn create_new(path: &Path, t_desired: i32) -> Result<Self> {
        if t_desired < 2 {
            return Err(Error::new(
                ErrorKind::InvalidConfig,
                format!("t must be >= 2 to create a new store, got {}", t_desired),
            ));
        }

        let mut file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)?;

        let mut header = Vec::with_capacity(HEADER_SIZE as usize);
        header.extend_from_slice(&MAGIC_NUMBER.to_ne_bytes());
        header.extend_from_slice(&FORMAT_VERSION.to_ne_bytes());
        header.extend_from_slice(&t_desired.to_ne_bytes());
        file.seek(SeekFrom::Start(0))?;
        file.write_all(&header)?;
        file.flush()?;

        debug!("created new store {:?} with t={}", path, t_desired);
        Ok(Self {
            file,
            t: t_desired,
            block_size: Node::block_len(t_desired) * 4,
            stats: PagerStats::default(),
            path: path.to_path_buf(),
        })
    }

    /// Flushes and closes the store. Taking `self` by value means a closed
    /// pager cannot be reused — there is no "use after close" state to
    /// guard against at this layer; [`crate::tree::BTree`] adds that
    /// guard one layer up since it must survive a `close` call.
    pub fn close(mut self) -> Result<()> {
        self.file.flush()?;
        Ok(())
    }

    pub fn empty(&mut self) -> Result<bool> {
        let len = self.file.metadata()?.len();
        Ok(len == HEADER_SIZE)
    }

    /// Returns the next free address, extending the file by exactly one
    /// block via a single sparse seek-and-write of the last byte (never a
    /// zero-filled block-sized buffer).
    pub fn alloc(&mut self) -> Result<i32> {
        let file_size = self.file.metadata()?.len();
        if (file_size - HEADER_SIZE) % self.block_size as u64 != 0 {
            return Err(Error::new(
                ErrorKind::Corruption,
                format!(
                    "{:?}: file size {} misaligned with block size {} before alloc",
                    self.path, file_size, self.block_size
                ),
            ));
        }
        let addr = ((file_size - HEADER_SIZE) / self.block_size as u64) as i32;

        let last_byte_offset = HEADER_SIZE + (addr as u64 + 1) * self.block_size as u64 - 1;
        self.file.seek(SeekFrom::Start(last_byte_offset))?;
        self.file.write_all(&[0u8])?;

        self.stats.allocs += 1;
        debug!("alloc -> {}", addr);
        Ok(addr)
    }

    fn offset_of(&self, addr: i32) -> u64 {
        HEADER_SIZE + addr as u64 * self.block_size as u64
    }

    /// Reads and deserializes the node at `addr`.
    pub fn read(&mut self, addr: i32) -> Result<Node> {
        let offset = self.offset_of(addr);
        self.file.seek(SeekFrom::Start(offset))?;
        let mut buf = vec![0u8; self.block_size];
        self.file.read_exact(&mut buf).map_err(|e| {
            Error::new(
                ErrorKind::Corruption,
                format!("short read at address {} (offset {}): {e}", addr, offset),
            )
        })?;
        self.stats.reads += 1;
        Node::from_bytes(&buf, self.t)
    }

    /// Serializes and writes `node` at `addr`.
    pub fn write(&mut self, addr: i32, node: &Node) -> Result<()> {
        let offset = self.offset_of(addr);
        let bytes = node.to_bytes(self.t);
        self.file.seek(SeekFrom::Start(offset))?;
        self.file.write_all(&bytes).map_err(|e| {
            Error::new(
                ErrorKind::Corruption,
                format!("short write at address {} (offset {}): {e}", addr, offset),
            )
        })?;
        self.stats.writes += 1;
        Ok(())
    }

    pub fn get_t(&self) -> i32 {
        self.t
    }

    pub fn stats(&self) -> PagerStats {
        self.stats
    }
}

impl Drop for Pager {
    /// Best-effort flush for a handle dropped without an explicit
    /// [`Pager::close`]. Errors are logged, not propagated — `Drop` cannot
    /// return a `Result`.
    fn drop(&mut self) {
        if let Err(e) = self.file.flush() {
            warn!("{:?}: flush on drop failed: {e}", self.path);
        }
    }
}
