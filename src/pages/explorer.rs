use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde_json::json;

use crate::core::config::{Action, OutputFormat};
use crate::core::errors::{Error, Result};
use crate::models::file_entry::DirectoryEntry;
use crate::models::permissions::PermissionSet;
use crate::services::fs::finder::{self, Finder};
use crate::services::fs::listing::list_dir;
use crate::services::fs::ops;
use crate::services::fs::workdir::WorkingDirectory;
use crate::ui::table::render_listing;

/// Runs explorer operations against its own working directory.
pub struct Explorer {
    cwd: WorkingDirectory,
}

impl Explorer {
    pub fn new(cwd: WorkingDirectory) -> Self {
        Self { cwd }
    }

    pub fn open(start: Option<&Path>) -> Result<Self> {
        Ok(Self::new(WorkingDirectory::new(start)?))
    }

    pub fn current_dir(&self) -> &Path {
        self.cwd.current()
    }

    pub fn list(&self) -> Result<Vec<DirectoryEntry>> {
        list_dir(self.cwd.current())
    }

    pub fn change_dir(&mut self, target: &str) -> Result<PathBuf> {
        self.cwd.change_dir(target).map(Path::to_path_buf)
    }

    pub fn go_back(&mut self) -> Result<PathBuf> {
        self.cwd.parent().map(Path::to_path_buf)
    }

    pub fn copy(&self, source: &str, target: &str) -> Result<u64> {
        ops::copy_file(&self.cwd.resolve(source), &self.cwd.resolve(target))
    }

    pub fn move_file(&self, from: &str, to: &str) -> Result<()> {
        ops::move_file(&self.cwd.resolve(from), &self.cwd.resolve(to))
    }

    pub fn delete(&self, path: &str) -> Result<()> {
        ops::delete_path(&self.cwd.resolve(path))
    }

    pub fn create(&self, path: &str) -> Result<PathBuf> {
        let path = self.cwd.resolve(path);
        ops::create_file(&path)?;
        Ok(path)
    }

    /// Searches below the current directory.
    pub fn find(&self, needle: &str) -> Finder {
        finder::find(self.cwd.current(), needle)
    }

    pub fn permissions(&self, path: &str) -> Result<PermissionSet> {
        ops::get_permissions(&self.cwd.resolve(path))
    }

    pub fn set_permissions(&self, path: &str, symbolic: &str) -> Result<PermissionSet> {
        ops::set_permissions(&self.cwd.resolve(path), symbolic)
    }

    /// Performs one action and writes its outcome, or the reason it failed,
    /// to `out`. Returns whether the action succeeded; only errors writing
    /// to `out` are propagated.
    pub fn execute<W: Write>(
        &mut self,
        action: &Action,
        out: &mut W,
        format: OutputFormat,
    ) -> io::Result<bool> {
        tracing::debug!(?action, "execute");
        let mut report = Report { out, format };
        match action {
            Action::Ls => match self.list() {
                Ok(entries) => {
                    report.listing(self.cwd.current(), &entries)?;
                    Ok(true)
                }
                Err(err) => report.failure("Unable to open directory", &err),
            },
            Action::Cd { path } => match self.change_dir(path) {
                Ok(dir) => report.success(&format!("Changed directory to: {}", dir.display())),
                Err(err) => report.failure("Failed to change directory", &err),
            },
            Action::Cp { source, target } => match self.copy(source, target) {
                Ok(_) => report.success("File copied successfully!"),
                Err(err @ Error::FileNotFound { .. }) => {
                    report.failure("Source file not found", &err)
                }
                Err(err @ Error::ReadFailure { .. }) => {
                    report.failure("Failed to read source file", &err)
                }
                Err(err) => report.failure("Failed to create target file", &err),
            },
            Action::Mv { from, to } => match self.move_file(from, to) {
                Ok(()) => report.success("File moved successfully!"),
                Err(err) => report.failure("Failed to move file", &err),
            },
            Action::Rm { path } => match self.delete(path) {
                Ok(()) => report.success("File deleted successfully!"),
                Err(err) => report.failure("Failed to delete file", &err),
            },
            Action::Touch { path } => match self.create(path) {
                Ok(created) => report.success(&format!("File created: {}", created.display())),
                Err(err) => report.failure("Failed to create file", &err),
            },
            Action::Find { needle } => {
                let root = self.cwd.current().to_path_buf();
                report.matches(&root, self.find(needle))?;
                Ok(true)
            }
            Action::Perms { path } => match self.permissions(path) {
                Ok(perms) => report.permissions(path, perms),
                Err(err) => report.failure("Unable to fetch file info", &err),
            },
            Action::Chmod { path, symbolic } => match self.set_permissions(path, symbolic) {
                Ok(_) => report.success("Permissions changed successfully!"),
                Err(err @ Error::InvalidFormat(_)) => {
                    report.failure("Invalid format! Use rwxr-xr-- style", &err)
                }
                Err(err) => report.failure("Permission change failed", &err),
            },
        }
    }
}

/// Writes outcomes as human text or JSON lines.
struct Report<'a, W: Write> {
    out: &'a mut W,
    format: OutputFormat,
}

impl<W: Write> Report<'_, W> {
    fn success(&mut self, message: &str) -> io::Result<bool> {
        match self.format {
            OutputFormat::Text => writeln!(self.out, "{message}")?,
            OutputFormat::Json => {
                writeln!(self.out, "{}", json!({ "ok": true, "message": message }))?
            }
        }
        Ok(true)
    }

    fn failure(&mut self, context: &str, err: &Error) -> io::Result<bool> {
        tracing::debug!("{context}: {err}");
        match self.format {
            OutputFormat::Text => writeln!(self.out, "{context}: {err}")?,
            OutputFormat::Json => writeln!(
                self.out,
                "{}",
                json!({ "ok": false, "context": context, "error": err.to_string() })
            )?,
        }
        Ok(false)
    }

    fn listing(&mut self, dir: &Path, entries: &[DirectoryEntry]) -> io::Result<()> {
        match self.format {
            OutputFormat::Text => render_listing(self.out, dir, entries),
            OutputFormat::Json => {
                for entry in entries {
                    writeln!(self.out, "{}", serde_json::to_string(entry)?)?;
                }
                Ok(())
            }
        }
    }

    fn matches(&mut self, root: &Path, found: Finder) -> io::Result<()> {
        if self.format == OutputFormat::Text {
            writeln!(self.out, "Searching in: {}", root.display())?;
        }
        for hit in found {
            match self.format {
                OutputFormat::Text => writeln!(self.out, "Found: {}", hit.path.display())?,
                OutputFormat::Json => writeln!(self.out, "{}", serde_json::to_string(&hit)?)?,
            }
        }
        Ok(())
    }

    fn permissions(&mut self, path: &str, perms: PermissionSet) -> io::Result<bool> {
        match self.format {
            OutputFormat::Text => writeln!(self.out, "Permissions for {path}: {perms}")?,
            OutputFormat::Json => writeln!(
                self.out,
                "{}",
                json!({ "path": path, "permissions": perms, "mode": format!("{:03o}", perms.to_mode()) })
            )?,
        }
        Ok(true)
    }
}
