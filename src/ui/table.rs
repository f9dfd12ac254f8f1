use std::io::{self, Write};
use std::path::Path;

use crate::models::file_entry::DirectoryEntry;

const RULE: &str = "---------------------------------------------------------------";

/// Writes the directory listing table: Name, Type and the `ls -l` style
/// permission string for every entry.
pub fn render_listing<W: Write>(out: &mut W, dir: &Path, entries: &[DirectoryEntry]) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "Current Directory: {}", dir.display())?;
    writeln!(out, "{RULE}")?;
    writeln!(out, "{:<25}{:<12}Permissions", "Name", "Type")?;
    writeln!(out, "{RULE}")?;
    for entry in entries {
        writeln!(
            out,
            "{:<25}{:<12}{}",
            entry.name,
            entry.kind.label(),
            entry.mode_string()
        )?;
    }
    Ok(())
}
