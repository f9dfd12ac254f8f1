use std::ffi::OsStr;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;

use crate::core::errors::{Error, Result};
use crate::models::file_entry::{DirectoryEntry, EntryKind};
use crate::models::permissions::PermissionSet;

/// Lists `path` in directory-stream order.
///
/// Failing to open the directory aborts the listing. An entry whose
/// metadata cannot be read (dangling symlink, removed mid-listing) is
/// logged and left out.
pub fn list_dir(path: &Path) -> Result<Vec<DirectoryEntry>> {
    let reader = fs::read_dir(path).map_err(|err| Error::directory_unavailable(err, path))?;

    let mut entries = Vec::new();
    for entry in reader {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                tracing::warn!("skipping dir entry in {}: {}", path.display(), err);
                continue;
            }
        };

        // read_dir never yields "." or "..", guard anyway for odd filesystems
        let name = os_str_to_string(entry.file_name());
        if name == "." || name == ".." {
            continue;
        }

        let entry_path = entry.path();
        // stat, not lstat: a link to a directory lists as DIR
        let md = match fs::metadata(&entry_path) {
            Ok(md) => md,
            Err(err) => {
                tracing::warn!("skipping {}: {}", entry_path.display(), err);
                continue;
            }
        };

        let kind = if md.is_dir() {
            EntryKind::Directory
        } else {
            EntryKind::File
        };

        entries.push(DirectoryEntry {
            name,
            path: entry_path,
            kind,
            permissions: PermissionSet::from_mode(md.permissions().mode()),
        });
    }

    tracing::debug!("listed {} entries in {}", entries.len(), path.display());
    Ok(entries)
}

fn os_str_to_string(s: impl AsRef<OsStr>) -> String {
    s.as_ref().to_string_lossy().into_owned()
}
