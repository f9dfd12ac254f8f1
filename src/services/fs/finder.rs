use std::path::Path;

use walkdir::WalkDir;

use crate::models::file_entry::SearchMatch;

/// Depth-first, pre-order name search below a root directory.
///
/// Every entry whose file name contains the needle (case-sensitive, literal)
/// is yielded, and every directory is descended into whether or not its own
/// name matched. Directories that cannot be read are skipped and the walk
/// continues with their siblings. Symlinks are reported but never followed.
pub struct Finder {
    walker: walkdir::IntoIter,
    needle: String,
}

pub fn find(root: &Path, needle: &str) -> Finder {
    let walker = WalkDir::new(root)
        .min_depth(1)
        .follow_links(false)
        .into_iter();
    Finder {
        walker,
        needle: needle.to_string(),
    }
}

impl Iterator for Finder {
    type Item = SearchMatch;

    fn next(&mut self) -> Option<SearchMatch> {
        loop {
            let entry = match self.walker.next()? {
                Ok(entry) => entry,
                Err(err) => {
                    tracing::debug!("find: skipping unreadable path: {}", err);
                    continue;
                }
            };

            if entry.file_name().to_string_lossy().contains(&self.needle) {
                return Some(SearchMatch {
                    path: entry.into_path(),
                });
            }
        }
    }
}
