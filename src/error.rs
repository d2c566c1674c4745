use std::io;
use std::path::PathBuf;

/// The primary error type for all operations in the `tarfs` crate.
#[derive(Debug, thiserror::Error)]
pub enum TarFsError {
    /// The archive file could not be opened or read from disk.
    /// Includes the path where the error happened.
    #[error("I/O error on path '{}': {source}", .path.display())]
    Io { source: io::Error, path: PathBuf },

    /// The archive stream is malformed, or a decode or decompression step failed.
    #[error("malformed archive: {source}")]
    Archive { source: io::Error },

    /// The queried path contains a NUL byte or a disallowed separator.
    #[error("invalid character in file path")]
    InvalidPath,

    /// No record exists for the normalized path.
    #[error("file does not exist")]
    NotFound,

    /// Reads and seeks are not available on a directory handle.
    #[error("is a directory")]
    IsDirectory,
}

impl TarFsError {
    /// True for errors raised while building the filesystem, as opposed to
    /// errors scoped to a single call on an existing one.
    pub fn is_construction(&self) -> bool {
        matches!(self, TarFsError::Io { .. } | TarFsError::Archive { .. })
    }

    pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(io::Error) -> Self {
        let path = path.into();
        move |source| TarFsError::Io { source, path }
    }
}

impl From<TarFsError> for io::Error {
    fn from(err: TarFsError) -> Self {
        let kind = match &err {
            TarFsError::Io { source, .. } | TarFsError::Archive { source } => source.kind(),
            TarFsError::InvalidPath => io::ErrorKind::InvalidInput,
            TarFsError::NotFound => io::ErrorKind::NotFound,
            TarFsError::IsDirectory => io::ErrorKind::Unsupported,
        };
        io::Error::new(kind, err)
    }
}

pub type Result<T, E = TarFsError> = std::result::Result<T, E>;
