use std::{fmt, io};

/// Coarse classification of what went wrong, so callers can match on it
/// instead of parsing the message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// `t < 2` on a fresh file, or a degree `t` stored on disk that violates it.
    InvalidConfig,
    /// Bad magic/version, short read/write, misaligned file length.
    Corruption,
    /// Any other I/O failure (seek, read, write, flush).
    Io,
    /// A precondition the caller or an internal routine violated
    /// (split of a non-full child, descent below a freed node, ...).
    Precondition,
    /// An operation was attempted on a pager/tree that has been closed.
    ClosedPager,
}

/// The single error type for this crate. Carries a human-readable message
/// and a [`ErrorKind`] for programmatic dispatch.
#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
    details: String,
}

impl Error {
    pub fn new(kind: ErrorKind, msg: impl Into<String>) -> Self {
        Self {
            kind,
            details: msg.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.details)
    }
}

impl std::error::Error for Error {}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Error::new(ErrorKind::Io, e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
