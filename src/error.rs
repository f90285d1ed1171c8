//! Error taxonomy for dirlens
//!
//! Only failures that abort a whole invocation live here. Per-entry stat
//! failures degrade at the call site (default classification, zero sizes)
//! and never surface as errors.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// The requested directory could not be listed.
    #[error("cannot access '{path}': {source}")]
    Access { path: PathBuf, source: io::Error },

    /// A file could not be opened for the slide view.
    #[error("cannot open '{path}': {source}")]
    Open { path: PathBuf, source: io::Error },

    /// Failure writing to the output stream.
    #[error("error writing output: {0}")]
    Io(#[from] io::Error),
}

impl Error {
    pub fn access(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::Access {
            path: path.into(),
            source,
        }
    }

    pub fn open(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::Open {
            path: path.into(),
            source,
        }
    }

    /// Process exit code for this failure category.
    ///
    /// Usage errors exit 1 directly from `main`; access and open failures
    /// get their own codes so callers can tell them apart.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Access { .. } => 2,
            Error::Open { .. } => 3,
            Error::Io(_) => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes_are_distinct() {
        let access = Error::access("/tmp/x", io::Error::from(io::ErrorKind::PermissionDenied));
        let open = Error::open("/tmp/x", io::Error::from(io::ErrorKind::NotFound));
        let io_err = Error::from(io::Error::from(io::ErrorKind::BrokenPipe));

        assert_eq!(access.exit_code(), 2);
        assert_eq!(open.exit_code(), 3);
        assert_eq!(io_err.exit_code(), 1);
    }

    #[test]
    fn test_display_includes_path() {
        let err = Error::access("/no/such/dir", io::Error::from(io::ErrorKind::NotFound));
        let message = err.to_string();
        assert!(message.contains("/no/such/dir"), "message: {}", message);
        assert!(message.starts_with("cannot access"), "message: {}", message);
    }
}
