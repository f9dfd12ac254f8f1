use std::fmt::{self, Write as _};

use serde::{Serialize, Serializer};

use crate::core::errors::{Error, Result};

/// Length in bytes of the editable symbolic form (`rwxr-xr--`).
pub const SYMBOLIC_LEN: usize = 9;

const LETTERS: [u8; 3] = *b"rwx";

/// Read/write/execute flags for one class of user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Triple {
    pub read: bool,
    pub write: bool,
    pub execute: bool,
}

impl Triple {
    fn from_bits(bits: u32) -> Self {
        Self {
            read: bits & 0o4 != 0,
            write: bits & 0o2 != 0,
            execute: bits & 0o1 != 0,
        }
    }

    fn bits(&self) -> u32 {
        ((self.read as u32) << 2) | ((self.write as u32) << 1) | self.execute as u32
    }

    fn flags(&self) -> [bool; 3] {
        [self.read, self.write, self.execute]
    }
}

/// The nine permission bits of a mode, owner/group/other.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PermissionSet {
    pub owner: Triple,
    pub group: Triple,
    pub other: Triple,
}

impl PermissionSet {
    /// Extracts the permission bits; file type and setuid/setgid/sticky are ignored.
    pub fn from_mode(mode: u32) -> Self {
        Self {
            owner: Triple::from_bits((mode >> 6) & 0o7),
            group: Triple::from_bits((mode >> 3) & 0o7),
            other: Triple::from_bits(mode & 0o7),
        }
    }

    pub fn to_mode(&self) -> u32 {
        (self.owner.bits() << 6) | (self.group.bits() << 3) | self.other.bits()
    }

    /// Parses a 9-character string such as `rw-r--r--`.
    ///
    /// A position is set only when it holds its expected letter. Any other
    /// character, including a letter meant for a different position, clears
    /// the bit instead of failing. Only the length, counted in bytes, is
    /// validated, so a multibyte character takes up more than one position.
    pub fn from_symbolic(symbolic: &str) -> Result<Self> {
        let bytes = symbolic.as_bytes();
        if bytes.len() != SYMBOLIC_LEN {
            return Err(Error::InvalidFormat(format!(
                "expected {SYMBOLIC_LEN} bytes like rwxr-xr--, got {:?}",
                symbolic
            )));
        }

        let mut triples = [Triple::default(); 3];
        for (class, triple) in triples.iter_mut().enumerate() {
            let chunk = &bytes[class * 3..class * 3 + 3];
            triple.read = chunk[0] == LETTERS[0];
            triple.write = chunk[1] == LETTERS[1];
            triple.execute = chunk[2] == LETTERS[2];
        }

        Ok(Self {
            owner: triples[0],
            group: triples[1],
            other: triples[2],
        })
    }
}

impl fmt::Display for PermissionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for triple in [self.owner, self.group, self.other] {
            for (set, letter) in triple.flags().into_iter().zip(LETTERS) {
                f.write_char(if set { letter as char } else { '-' })?;
            }
        }
        Ok(())
    }
}

impl Serialize for PermissionSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Renders a mode the way `ls -l` does: a type character (`d` or `-`)
/// followed by the nine permission characters.
pub fn encode(mode: u32, is_dir: bool) -> String {
    let kind = if is_dir { 'd' } else { '-' };
    format!("{kind}{}", PermissionSet::from_mode(mode))
}

/// Converts a 9-character symbolic string into permission bits.
pub fn decode(symbolic: &str) -> Result<u32> {
    PermissionSet::from_symbolic(symbolic).map(|set| set.to_mode())
}
