//! Write-to-temp then rename.

use std::fs;
use std::io::Write;
use std::path::Path;

use vigil_core::errors::StorageError;

/// Replace `target` with `data` atomically.
///
/// The temp file is created next to the target so the final rename never
/// crosses a filesystem boundary. Readers see either the old document or the
/// new one.
pub fn atomic_write(target: &Path, data: &[u8]) -> Result<(), StorageError> {
    let parent = match target.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent).map_err(|e| StorageError::Io {
        path: parent.to_path_buf(),
        source: e,
    })?;

    let mut temp = tempfile::NamedTempFile::new_in(parent).map_err(|e| StorageError::Io {
        path: parent.to_path_buf(),
        source: e,
    })?;
    temp.as_file_mut()
        .write_all(data)
        .and_then(|()| temp.as_file().sync_all())
        .map_err(|e| StorageError::Io {
            path: temp.path().to_path_buf(),
            source: e,
        })?;

    temp.persist(target).map_err(|e| StorageError::Io {
        path: target.to_path_buf(),
        source: e.error,
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn atomic_write_creates_parent_and_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let target = dir.path().join("nested").join("out.json");
        atomic_write(&target, b"{}").unwrap();
        assert_eq!(fs::read_to_string(&target).unwrap(), "{}");
    }

    #[test]
    fn atomic_write_overwrites_existing() {
        let dir = tempfile::TempDir::new().unwrap();
        let target = dir.path().join("out.txt");
        atomic_write(&target, b"first").unwrap();
        atomic_write(&target, b"second").unwrap();
        assert_eq!(fs::read_to_string(&target).unwrap(), "second");
        // No temp files left behind
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }
}
