//! Unified error type for all store operations.

/// Things that can go wrong when using the store.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// File system problem while reading the document (anything but "missing").
    Io(String),
    /// The document exists but is not a record array or a `candidatos` object.
    Corrupt(String),
    /// Persisting the document failed. The previous file is left in place.
    Write(String),
    /// No record carries the requested `ID`.
    NotFound(i64),
    /// Bad configuration (invalid address, flag, etc.).
    Config(String),
    /// Anything else, e.g. a record that could not be encoded.
    Internal(String),
}

impl Error {
    /// `true` for the one error a caller can fix by asking for another id.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound(_))
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Io(msg) => write!(f, "i/o error: {msg}"),
            Error::Corrupt(msg) => write!(f, "corrupt document: {msg}"),
            Error::Write(msg) => write!(f, "write error: {msg}"),
            Error::NotFound(id) => write!(f, "no record with ID {id}"),
            Error::Config(msg) => write!(f, "config error: {msg}"),
            Error::Internal(msg) => write!(f, "internal error: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        if err.is_io() {
            Error::Io(err.to_string())
        } else if err.is_syntax() || err.is_eof() || err.is_data() {
            Error::Corrupt(err.to_string())
        } else {
            Error::Internal(err.to_string())
        }
    }
}

/// Result alias using our [`Error`] type.
pub type Result<T> = std::result::Result<T, Error>;
