use std::fs::{self, File};
use std::io::{self, Read, Write};
use std::os::unix::fs::PermissionsExt;
use std::path::Path;

use crate::core::errors::{Error, Result};
use crate::models::permissions::PermissionSet;

const COPY_BUF_LEN: usize = 64 * 1024;

/// Copies `source` into `target` byte for byte, replacing any existing
/// content. The source is opened and checked to be a regular file before the
/// target is created, so a bad source never truncates the target. Returns the
/// number of bytes copied.
pub fn copy_file(source: &Path, target: &Path) -> Result<u64> {
    let mut reader = File::open(source).map_err(|err| Error::FileNotFound {
        path: source.to_path_buf(),
        source: err,
    })?;
    let md = reader
        .metadata()
        .map_err(|err| Error::read_failure(err, source))?;
    if md.is_dir() {
        return Err(Error::read_failure(io::Error::other("is a directory"), source));
    }

    let mut writer = File::create(target).map_err(|err| Error::write_failure(err, target))?;
    let mut buf = vec![0u8; COPY_BUF_LEN];
    let mut copied = 0u64;
    loop {
        let n = match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
            Err(err) => return Err(Error::read_failure(err, source)),
        };
        writer
            .write_all(&buf[..n])
            .map_err(|err| Error::write_failure(err, target))?;
        copied += n as u64;
    }
    writer.flush().map_err(|err| Error::write_failure(err, target))?;

    tracing::debug!("copied {} bytes {} -> {}", copied, source.display(), target.display());
    Ok(copied)
}

/// Renames `from` to `to`. A missing source is `FileNotFound`; any other
/// failure (missing destination directory, cross-device) names the destination.
pub fn move_file(from: &Path, to: &Path) -> Result<()> {
    fs::rename(from, to).map_err(|err| match fs::symlink_metadata(from) {
        Err(_) => Error::classify(err, from),
        Ok(_) => Error::write_failure(err, to),
    })?;
    tracing::debug!("moved {} -> {}", from.display(), to.display());
    Ok(())
}

/// Removes a file, or a directory if it is empty.
pub fn delete_path(path: &Path) -> Result<()> {
    let md = fs::symlink_metadata(path).map_err(|err| Error::classify(err, path))?;
    let removed = if md.is_dir() {
        fs::remove_dir(path)
    } else {
        fs::remove_file(path)
    };
    removed.map_err(|err| Error::classify(err, path))?;
    tracing::debug!("deleted {}", path.display());
    Ok(())
}

/// Creates an empty file; an existing file is truncated.
pub fn create_file(path: &Path) -> Result<()> {
    File::create(path).map_err(|err| Error::write_failure(err, path))?;
    tracing::debug!("created {}", path.display());
    Ok(())
}

pub fn get_permissions(path: &Path) -> Result<PermissionSet> {
    let md = fs::metadata(path).map_err(|err| Error::classify(err, path))?;
    Ok(PermissionSet::from_mode(md.permissions().mode()))
}

/// Applies a symbolic permission string. The string is validated before
/// the filesystem is touched; only the nine permission bits are written,
/// so setuid/setgid/sticky end up cleared.
pub fn set_permissions(path: &Path, symbolic: &str) -> Result<PermissionSet> {
    let permissions = PermissionSet::from_symbolic(symbolic)?;
    fs::set_permissions(path, fs::Permissions::from_mode(permissions.to_mode()))
        .map_err(|err| Error::classify(err, path))?;
    tracing::debug!("chmod {} {}", permissions, path.display());
    Ok(permissions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn mode_of(path: &Path) -> u32 {
        fs::metadata(path).unwrap().permissions().mode() & 0o777
    }

    #[test]
    fn copy_replaces_destination_content() -> Result<()> {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("src.bin");
        let dst = dir.path().join("dst.bin");
        fs::write(&src, [0u8, 1, 2, 255])?;
        fs::write(&dst, "a much longer piece of existing content")?;

        let copied = copy_file(&src, &dst)?;

        assert_eq!(copied, 4);
        assert_eq!(fs::read(&dst)?, vec![0u8, 1, 2, 255]);
        Ok(())
    }

    #[test]
    fn copy_from_missing_source_leaves_destination() -> Result<()> {
        let dir = TempDir::new().unwrap();
        let dst = dir.path().join("dst.txt");
        fs::write(&dst, "keep me")?;

        let err = copy_file(&dir.path().join("missing.txt"), &dst).unwrap_err();

        assert!(matches!(err, Error::FileNotFound { .. }));
        assert_eq!(fs::read_to_string(&dst)?, "keep me");
        Ok(())
    }

    #[test]
    fn copy_into_missing_directory_is_write_failure() -> Result<()> {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("src.txt");
        fs::write(&src, "x")?;

        let err = copy_file(&src, &dir.path().join("no").join("dst.txt")).unwrap_err();
        assert!(matches!(err, Error::WriteFailure { .. }));
        Ok(())
    }

    #[test]
    fn copy_from_directory_keeps_destination() -> Result<()> {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("srcdir");
        let dst = dir.path().join("dst.txt");
        fs::create_dir(&src)?;
        fs::write(&dst, "precious")?;

        let err = copy_file(&src, &dst).unwrap_err();

        match err {
            Error::ReadFailure { path, .. } => assert_eq!(path, src),
            other => panic!("expected read failure on the source, got {other:?}"),
        }
        assert_eq!(fs::read_to_string(&dst)?, "precious");
        Ok(())
    }

    #[test]
    fn move_into_missing_directory_names_destination() -> Result<()> {
        let dir = TempDir::new().unwrap();
        let from = dir.path().join("a.txt");
        let to = dir.path().join("nodir").join("b.txt");
        fs::write(&from, "stay")?;

        let err = move_file(&from, &to).unwrap_err();

        match err {
            Error::WriteFailure { path, .. } => assert_eq!(path, to),
            other => panic!("expected failure on the destination, got {other:?}"),
        }
        assert_eq!(fs::read_to_string(&from)?, "stay");
        Ok(())
    }

    #[test]
    fn move_renames_and_reports_missing_source() -> Result<()> {
        let dir = TempDir::new().unwrap();
        let from = dir.path().join("old.txt");
        let to = dir.path().join("new.txt");
        fs::write(&from, "moved")?;

        move_file(&from, &to)?;
        assert!(!from.exists());
        assert_eq!(fs::read_to_string(&to)?, "moved");

        assert!(matches!(
            move_file(&from, &to),
            Err(Error::FileNotFound { .. })
        ));
        Ok(())
    }

    #[test]
    fn delete_removes_files_and_empty_directories() -> Result<()> {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("gone.txt");
        let empty = dir.path().join("empty");
        let full = dir.path().join("full");
        fs::write(&file, "")?;
        fs::create_dir(&empty)?;
        fs::create_dir(&full)?;
        fs::write(full.join("inner.txt"), "")?;

        delete_path(&file)?;
        delete_path(&empty)?;
        assert!(!file.exists());
        assert!(!empty.exists());

        assert!(delete_path(&full).is_err());
        assert!(full.join("inner.txt").exists());

        assert!(matches!(
            delete_path(&file),
            Err(Error::FileNotFound { .. })
        ));
        Ok(())
    }

    #[test]
    fn create_makes_empty_file_and_truncates_existing() -> Result<()> {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("new.txt");

        create_file(&path)?;
        assert_eq!(fs::read(&path)?.len(), 0);

        fs::write(&path, "content")?;
        create_file(&path)?;
        assert_eq!(fs::read(&path)?.len(), 0);

        assert!(matches!(
            create_file(&dir.path().join("missing").join("x.txt")),
            Err(Error::WriteFailure { .. })
        ));
        Ok(())
    }

    #[test]
    fn get_and_set_permissions() -> Result<()> {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("script.sh");
        fs::write(&path, "#!/bin/sh\n")?;

        let applied = set_permissions(&path, "rwxr-x---")?;
        assert_eq!(applied.to_string(), "rwxr-x---");
        assert_eq!(mode_of(&path), 0o750);
        assert_eq!(get_permissions(&path)?.to_string(), "rwxr-x---");
        Ok(())
    }

    #[test]
    fn set_permissions_applies_lenient_decode() -> Result<()> {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("f.txt");
        fs::write(&path, "")?;

        set_permissions(&path, "rzzr--r--")?;
        assert_eq!(mode_of(&path), 0o444);
        Ok(())
    }

    #[test]
    fn set_permissions_validates_before_touching_file() -> Result<()> {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("f.txt");
        fs::write(&path, "")?;
        fs::set_permissions(&path, fs::Permissions::from_mode(0o640))?;

        for bad in ["rwxrwxrw", "rwxrwxrwxr"] {
            assert!(matches!(
                set_permissions(&path, bad),
                Err(Error::InvalidFormat(_))
            ));
            assert_eq!(mode_of(&path), 0o640);
        }
        Ok(())
    }

    #[test]
    fn permissions_of_missing_file_is_not_found() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("absent");
        assert!(matches!(
            get_permissions(&missing),
            Err(Error::FileNotFound { .. })
        ));
        assert!(matches!(
            set_permissions(&missing, "rw-------"),
            Err(Error::FileNotFound { .. })
        ));
    }
}
