use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

use super::permissions::{self, PermissionSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    File,
    Directory,
}

impl EntryKind {
    pub fn label(&self) -> &'static str {
        match self {
            EntryKind::File => "FILE",
            EntryKind::Directory => "DIR",
        }
    }

    pub fn is_dir(&self) -> bool {
        matches!(self, EntryKind::Directory)
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One row of a directory listing.
#[derive(Debug, Clone, Serialize)]
pub struct DirectoryEntry {
    pub name: String,
    pub path: PathBuf,
    pub kind: EntryKind,
    pub permissions: PermissionSet,
}

impl DirectoryEntry {
    /// `ls -l` style rendering, type character included.
    pub fn mode_string(&self) -> String {
        permissions::encode(self.permissions.to_mode(), self.kind.is_dir())
    }
}

/// A path found by a recursive name search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchMatch {
    pub path: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_string_prefixes_type() {
        let entry = DirectoryEntry {
            name: "src".into(),
            path: PathBuf::from("/work/src"),
            kind: EntryKind::Directory,
            permissions: PermissionSet::from_mode(0o750),
        };
        assert_eq!(entry.mode_string(), "drwxr-x---");
        assert_eq!(entry.kind.to_string(), "DIR");
    }

    #[test]
    fn serializes_entry_for_json_output() {
        let entry = DirectoryEntry {
            name: "a.txt".into(),
            path: PathBuf::from("/work/a.txt"),
            kind: EntryKind::File,
            permissions: PermissionSet::from_mode(0o644),
        };
        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["kind"], "file");
        assert_eq!(value["permissions"], "rw-r--r--");
        assert_eq!(value["path"], "/work/a.txt");
    }
}
