// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use anyhow::{Context, Result};
use log::debug;
use std::path::{Path, PathBuf};
use tempfile::{Builder, NamedTempFile};

/// Owner of every scratch file created during a run.
///
/// Files are allocated in the directory the final artifacts will land in
/// so the install step is a same-filesystem rename. Names carry a random
/// suffix so concurrent invocations never collide. Whatever is still owned
/// when the arena goes out of scope is removed, on success and failure
/// alike.
#[derive(Default)]
pub struct Scratch {
    files: Vec<NamedTempFile>,
}

impl Scratch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a uniquely named, empty, 0600-mode file in `dir` and
    /// return its path. The arena keeps ownership.
    pub fn create(&mut self, dir: &Path, prefix: &str) -> Result<PathBuf> {
        let file = Builder::new()
            .prefix(prefix)
            .rand_bytes(8)
            .tempfile_in(dir)
            .with_context(|| {
                format!("failed to create scratch file in {}", dir.display())
            })?;

        let path = file.path().to_path_buf();
        debug!("allocated scratch file: {}", path.display());
        self.files.push(file);

        Ok(path)
    }

    /// Transfer ownership of the scratch file at `path` out of the arena.
    /// Once taken, the file is the caller's to persist or drop.
    pub fn take(&mut self, path: &Path) -> Option<NamedTempFile> {
        self.files
            .iter()
            .position(|f| f.path() == path)
            .map(|i| self.files.swap_remove(i))
    }

    /// Remove every scratch file still owned. Idempotent, and a file that
    /// is already gone is not an error worth more than a debug line.
    pub fn release_all(&mut self) {
        for file in self.files.drain(..) {
            let path = file.path().to_path_buf();
            if let Err(e) = file.close() {
                debug!(
                    "failed to remove scratch file {}: {}",
                    path.display(),
                    e
                );
            } else {
                debug!("removed scratch file: {}", path.display());
            }
        }
    }
}

impl Drop for Scratch {
    fn drop(&mut self) {
        self.release_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn file_count(dir: &Path) -> usize {
        std::fs::read_dir(dir).unwrap().count()
    }

    #[test]
    fn create_names_never_collide() -> Result<()> {
        let dir = TempDir::new()?;
        let mut scratch = Scratch::new();

        let a = scratch.create(dir.path(), "key")?;
        let b = scratch.create(dir.path(), "key")?;

        assert_ne!(a, b);
        assert!(a.exists());
        assert!(b.exists());
        Ok(())
    }

    #[test]
    fn release_all_removes_files_and_is_idempotent() -> Result<()> {
        let dir = TempDir::new()?;
        let mut scratch = Scratch::new();

        scratch.create(dir.path(), "key")?;
        scratch.create(dir.path(), "cert")?;
        assert_eq!(file_count(dir.path()), 2);

        scratch.release_all();
        assert_eq!(file_count(dir.path()), 0);

        // second release over an empty arena is a no-op
        scratch.release_all();
        assert_eq!(file_count(dir.path()), 0);
        Ok(())
    }

    #[test]
    fn drop_removes_remaining_files() -> Result<()> {
        let dir = TempDir::new()?;
        {
            let mut scratch = Scratch::new();
            scratch.create(dir.path(), "key")?;
        }

        assert_eq!(file_count(dir.path()), 0);
        Ok(())
    }

    #[test]
    fn taken_files_are_no_longer_released() -> Result<()> {
        let dir = TempDir::new()?;
        let mut scratch = Scratch::new();

        let path = scratch.create(dir.path(), "key")?;
        let file = scratch.take(&path).expect("file should be in the arena");

        scratch.release_all();
        assert!(path.exists());

        drop(file);
        assert!(!path.exists());
        Ok(())
    }

    #[test]
    fn take_unknown_path_is_none() -> Result<()> {
        let dir = TempDir::new()?;
        let mut scratch = Scratch::new();
        scratch.create(dir.path(), "key")?;

        assert!(scratch.take(Path::new("/no/such/file")).is_none());
        Ok(())
    }
}
