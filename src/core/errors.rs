use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("unable to open directory {}: {source}", .path.display())]
    DirectoryUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("file not found: {}: {source}", .path.display())]
    FileNotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to read {}: {source}", .path.display())]
    ReadFailure {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write {}: {source}", .path.display())]
    WriteFailure {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid format: {0}")]
    InvalidFormat(String),
    #[error("permission denied: {}: {source}", .path.display())]
    PermissionDenied {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

impl Error {
    /// Maps an OS error raised while touching `path` onto the explorer taxonomy.
    pub fn classify(source: io::Error, path: &Path) -> Error {
        match source.kind() {
            io::ErrorKind::NotFound => Error::FileNotFound {
                path: path.to_path_buf(),
                source,
            },
            io::ErrorKind::PermissionDenied => Error::PermissionDenied {
                path: path.to_path_buf(),
                source,
            },
            _ => Error::Io(source),
        }
    }

    pub fn directory_unavailable(source: io::Error, path: &Path) -> Error {
        Error::DirectoryUnavailable {
            path: path.to_path_buf(),
            source,
        }
    }

    pub fn read_failure(source: io::Error, path: &Path) -> Error {
        Error::ReadFailure {
            path: path.to_path_buf(),
            source,
        }
    }

    pub fn write_failure(source: io::Error, path: &Path) -> Error {
        Error::WriteFailure {
            path: path.to_path_buf(),
            source,
        }
    }
}
