use std::fmt;

/// Coarse classification of what went wrong, so callers can match on it
/// instead of parsing the message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Board dimensions `<= 0`, a piece whose occupancy string doesn't
    /// match its declared `rows * cols`, or a piece with no filled cells.
    InvalidConfig,
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

pub type Result<T> = std::result::Result<T, Error>;
