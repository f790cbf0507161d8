// SPDX-FileCopyrightText: 2026 Bazaar Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Recursive directory erasure.
//!
//! Deletion is post-order (a directory is removed only once empty) and
//! fail-fast: the first entry that cannot be deleted aborts the whole
//! operation naming that entry. A half-erased tree is easier to diagnose
//! than a silently skipped file that later collides with an extraction.

use std::fs;
use std::path::Path;

use bazaar_core::BazaarError;

/// Erase a plugin installation directory and everything under it.
///
/// Erasing a directory that does not exist is a no-op success.
pub fn erase_dir(dir: &Path) -> Result<(), BazaarError> {
    if !dir.exists() {
        return Ok(());
    }
    erase_tree(dir)
}

fn erase_tree(dir: &Path) -> Result<(), BazaarError> {
    let entries = fs::read_dir(dir).map_err(|source| BazaarError::Delete {
        path: dir.to_path_buf(),
        source,
    })?;

    for entry in entries {
        let entry = entry.map_err(|source| BazaarError::Delete {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        let file_type = entry.file_type().map_err(|source| BazaarError::Delete {
            path: path.clone(),
            source,
        })?;

        // Symlinks are removed as files, never followed.
        if file_type.is_dir() {
            erase_tree(&path)?;
        } else {
            fs::remove_file(&path)
                .map_err(|source| BazaarError::Delete { path, source })?;
        }
    }

    fs::remove_dir(dir).map_err(|source| BazaarError::Delete {
        path: dir.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn erases_a_nested_tree() {
        let root = TempDir::new().unwrap();
        let plugin = root.path().join("foo");
        fs::create_dir_all(plugin.join("lib/nested")).unwrap();
        fs::write(plugin.join("plugin.jar"), b"jar").unwrap();
        fs::write(plugin.join("lib/dep.jar"), b"dep").unwrap();
        fs::write(plugin.join("lib/nested/deep.txt"), b"deep").unwrap();

        erase_dir(&plugin).unwrap();

        assert!(!plugin.exists());
        assert!(root.path().exists());
    }

    #[test]
    fn erasing_a_missing_directory_is_a_no_op() {
        let root = TempDir::new().unwrap();
        erase_dir(&root.path().join("never-created")).unwrap();
    }

    #[test]
    fn erase_is_idempotent() {
        let root = TempDir::new().unwrap();
        let plugin = root.path().join("foo");
        fs::create_dir(&plugin).unwrap();

        erase_dir(&plugin).unwrap();
        erase_dir(&plugin).unwrap();
        assert!(!plugin.exists());
    }

    #[test]
    fn undeletable_target_aborts_and_names_the_path() {
        // A plain file where a directory is expected cannot be listed; the
        // failure names the offending path instead of being swallowed.
        let root = TempDir::new().unwrap();
        let not_a_dir = root.path().join("foo");
        fs::write(&not_a_dir, b"plain file").unwrap();

        let err = erase_dir(&not_a_dir).unwrap_err();
        match err {
            BazaarError::Delete { path, .. } => assert_eq!(path, not_a_dir),
            other => panic!("expected Delete error, got {other:?}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn symlinks_are_removed_not_followed() {
        let root = TempDir::new().unwrap();
        let outside = root.path().join("outside");
        fs::create_dir(&outside).unwrap();
        fs::write(outside.join("keep.txt"), b"keep").unwrap();

        let plugin = root.path().join("foo");
        fs::create_dir(&plugin).unwrap();
        std::os::unix::fs::symlink(&outside, plugin.join("link")).unwrap();

        erase_dir(&plugin).unwrap();

        assert!(!plugin.exists());
        assert!(outside.join("keep.txt").exists());
    }
}
