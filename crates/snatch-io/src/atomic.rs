//! Atomic file replacement
//!
//! Content goes to a temporary file in the target's directory, which is then
//! renamed over the target. Readers see either the old or the new content,
//! never a partial write, as long as the rename stays on one filesystem.

use crate::error::SaveError;
use std::fs;
use std::io::Write;
use std::path::Path;

/// Replace `path` with `contents` atomically
///
/// Creates the parent directory if needed. Permissions of an existing target
/// are carried over to the replacement.
///
/// # Errors
/// Returns error if the directory, temporary file, or rename fails. The
/// temporary file is removed and `path` is untouched in every error case.
pub fn write_atomic(path: &Path, contents: &[u8]) -> Result<(), SaveError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).map_err(|source| SaveError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })?;

    let write_err = |source| SaveError::Write {
        path: path.to_path_buf(),
        source,
    };

    let prefix = path
        .file_name()
        .map(|name| format!(".{}.", name.to_string_lossy()))
        .unwrap_or_else(|| ".".to_string());

    // Dropping `tmp` on an early return deletes the temporary file.
    let mut tmp = tempfile::Builder::new()
        .prefix(&prefix)
        .suffix(".tmp")
        .tempfile_in(dir)
        .map_err(write_err)?;
    tmp.write_all(contents).map_err(write_err)?;
    tmp.as_file().sync_all().map_err(write_err)?;

    if let Ok(metadata) = fs::metadata(path) {
        tmp.as_file()
            .set_permissions(metadata.permissions())
            .map_err(write_err)?;
    }

    // PersistError hands the temporary file back; dropping it removes it.
    tmp.persist(path).map_err(|err| SaveError::Rename {
        path: path.to_path_buf(),
        source: err.error,
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leftover_temp_files(dir: &Path) -> Vec<String> {
        fs::read_dir(dir)
            .unwrap()
            .filter_map(Result::ok)
            .map(|entry| entry.file_name().to_string_lossy().into_owned())
            .filter(|name| name.ends_with(".tmp"))
            .collect()
    }

    #[test]
    fn creates_file_and_parent() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("nested/deeper/out.json");

        write_atomic(&target, b"{}\n").unwrap();

        assert_eq!(fs::read(&target).unwrap(), b"{}\n");
        assert!(leftover_temp_files(target.parent().unwrap()).is_empty());
    }

    #[test]
    fn replaces_existing_content() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("out.yaml");
        fs::write(&target, "old: true\n").unwrap();

        write_atomic(&target, b"new: true\n").unwrap();

        assert_eq!(fs::read_to_string(&target).unwrap(), "new: true\n");
        assert!(leftover_temp_files(dir.path()).is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn keeps_permissions_of_existing_target() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("out.json");
        fs::write(&target, "{}\n").unwrap();
        fs::set_permissions(&target, fs::Permissions::from_mode(0o644)).unwrap();

        write_atomic(&target, b"[]\n").unwrap();

        let mode = fs::metadata(&target).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o644);
    }

    #[cfg(unix)]
    #[test]
    fn failed_rename_cleans_up_and_leaves_target() {
        let dir = tempfile::tempdir().unwrap();
        // A non-empty directory cannot be replaced by a file.
        let target = dir.path().join("occupied");
        fs::create_dir(&target).unwrap();
        fs::write(target.join("keep.txt"), "keep").unwrap();

        let err = write_atomic(&target, b"{}\n").unwrap_err();

        assert!(matches!(err, SaveError::Rename { .. }));
        assert!(target.is_dir());
        assert_eq!(fs::read_to_string(target.join("keep.txt")).unwrap(), "keep");
        assert!(leftover_temp_files(dir.path()).is_empty());
    }

    #[test]
    fn parent_is_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "x").unwrap();

        let err = write_atomic(&blocker.join("out.json"), b"{}\n").unwrap_err();

        assert!(matches!(err, SaveError::CreateDir { .. }));
        assert_eq!(fs::read_to_string(&blocker).unwrap(), "x");
    }
}
