use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::core::errors::{Error, Result};

/// The explorer's current directory.
///
/// Held as an explicit value instead of the process-wide cwd; every
/// relative path an operation receives is resolved through it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkingDirectory {
    current: PathBuf,
}

impl WorkingDirectory {
    /// Starts at `start`, or at the process cwd when none is given.
    pub fn new(start: Option<&Path>) -> Result<Self> {
        let start = match start {
            Some(path) => path.to_path_buf(),
            None => env::current_dir()?,
        };
        let current = canonical_dir(&start)?;
        Ok(Self { current })
    }

    pub fn current(&self) -> &Path {
        &self.current
    }

    /// Resolves a user-supplied path against the current directory.
    pub fn resolve(&self, path: &str) -> PathBuf {
        let path = Path::new(path);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.current.join(path)
        }
    }

    /// Moves to `target`. The current directory is left unchanged on failure.
    pub fn change_dir(&mut self, target: &str) -> Result<&Path> {
        let next = canonical_dir(&self.resolve(target))?;
        tracing::debug!("cd {} -> {}", self.current.display(), next.display());
        self.current = next;
        Ok(&self.current)
    }

    pub fn parent(&mut self) -> Result<&Path> {
        self.change_dir("..")
    }
}

fn canonical_dir(path: &Path) -> Result<PathBuf> {
    let canonical = fs::canonicalize(path).map_err(|err| Error::directory_unavailable(err, path))?;
    if !canonical.is_dir() {
        return Err(Error::directory_unavailable(
            io::Error::other("not a directory"),
            path,
        ));
    }
    Ok(canonical)
}
