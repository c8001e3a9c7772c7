//! Test fixtures and utilities for reducing test setup duplication.
//!
//! Provides temp directories and an [`SdCard`] builder that lays out a fake
//! SD card tree with a single call per file.
//!
//! # Usage
//!
//! ```ignore
//! use crate::test_fixtures::{SdCard, create_temp_dir};
//!
//! #[test]
//! fn my_test() {
//!     let temp = create_temp_dir();
//!
//!     let card = SdCard::new();
//!     card.file("Roms/Super Nintendo (SNES)/.media/bg.png");
//!     let layout = card.layout();
//! }
//! ```

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::error::{AestheticsError, Result};
use crate::fs::{Entry, FileSystem, LocalFileSystem, RomDirectory};
use crate::layout::Layout;

/// Absolute base for temp directories, so a relative `TMPDIR` never puts
/// fixture cards under the working directory
fn temp_dir_base() -> PathBuf {
    let base = std::env::temp_dir();
    if base.is_absolute() {
        base
    } else {
        PathBuf::from("/tmp")
    }
}

/// Create a temp directory in the system temp location.
///
/// # Panics
///
/// Panics if the temp directory cannot be created.
#[must_use]
pub fn create_temp_dir() -> TempDir {
    TempDir::new_in(temp_dir_base()).expect("Failed to create temp directory")
}

/// A throwaway SD card tree.
///
/// Files created with [`SdCard::file`] contain their own relative path, so
/// copies can be traced back to their source by content.
pub struct SdCard {
    temp: TempDir,
}

impl Default for SdCard {
    fn default() -> Self {
        Self::new()
    }
}

impl SdCard {
    /// # Panics
    ///
    /// Panics if the temp directory cannot be created.
    #[must_use]
    pub fn new() -> Self {
        Self {
            temp: create_temp_dir(),
        }
    }

    pub fn root(&self) -> &Path {
        self.temp.path()
    }

    pub fn path(&self, rel: &str) -> PathBuf {
        self.root().join(rel)
    }

    #[must_use]
    pub fn layout(&self) -> Layout {
        Layout::new(self.root())
    }

    /// Create a file whose content is its relative path.
    ///
    /// # Panics
    ///
    /// Panics if the file cannot be written.
    pub fn file(&self, rel: &str) -> PathBuf {
        self.file_with(rel, rel)
    }

    /// # Panics
    ///
    /// Panics if the file cannot be written.
    pub fn file_with(&self, rel: &str, content: &str) -> PathBuf {
        let full_path = self.path(rel);
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&full_path, content).expect("Failed to write test file");
        full_path
    }

    /// # Panics
    ///
    /// Panics if the directory cannot be created.
    pub fn dir(&self, rel: &str) -> PathBuf {
        let full_path = self.path(rel);
        std::fs::create_dir_all(&full_path).expect("Failed to create directory");
        full_path
    }

    pub fn exists(&self, rel: &str) -> bool {
        self.path(rel).exists()
    }

    /// # Panics
    ///
    /// Panics if the file cannot be read.
    #[must_use]
    pub fn read(&self, rel: &str) -> String {
        std::fs::read_to_string(self.path(rel)).expect("Failed to read test file")
    }

    /// Relative paths of every file below `rel`, sorted
    ///
    /// # Panics
    ///
    /// Panics if the tree cannot be walked.
    #[must_use]
    pub fn files_under(&self, rel: &str) -> Vec<String> {
        let base = self.path(rel);
        let mut files: Vec<String> = walkdir::WalkDir::new(&base)
            .into_iter()
            .map(|e| e.expect("Failed to walk test tree"))
            .filter(|e| e.file_type().is_file())
            .map(|e| {
                e.path()
                    .strip_prefix(&base)
                    .expect("Walked path outside base")
                    .to_string_lossy()
                    .into_owned()
            })
            .collect();
        files.sort();
        files
    }
}

/// [`LocalFileSystem`] that fails on chosen paths.
///
/// Listing a broken directory errors, and copying from or to a broken file
/// or deleting it fails. Everything else goes to the real disk.
#[derive(Debug, Default)]
pub struct FailingFileSystem {
    unreadable: BTreeSet<PathBuf>,
    broken: BTreeSet<PathBuf>,
}

impl FailingFileSystem {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn unreadable(mut self, dir: impl Into<PathBuf>) -> Self {
        self.unreadable.insert(dir.into());
        self
    }

    #[must_use]
    pub fn broken(mut self, file: impl Into<PathBuf>) -> Self {
        self.broken.insert(file.into());
        self
    }
}

impl FileSystem for FailingFileSystem {
    fn list(&self, path: &Path) -> Result<Vec<Entry>> {
        if self.unreadable.contains(path) {
            return Err(AestheticsError::DirectoryListFailed {
                path: path.display().to_string(),
                reason: "permission denied".to_string(),
            });
        }
        LocalFileSystem.list(path)
    }

    fn exists(&self, path: &Path) -> bool {
        LocalFileSystem.exists(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        LocalFileSystem.is_dir(path)
    }

    fn copy(&self, from: &Path, to: &Path) -> Result<()> {
        if self.broken.contains(from) || self.broken.contains(to) {
            return Err(AestheticsError::FileCopyFailed {
                from: from.display().to_string(),
                to: to.display().to_string(),
                reason: "input/output error".to_string(),
            });
        }
        LocalFileSystem.copy(from, to)
    }

    fn delete(&self, path: &Path) -> bool {
        !self.broken.contains(path) && LocalFileSystem.delete(path)
    }

    fn rename(&self, from: &Path, to: &Path) -> Result<()> {
        LocalFileSystem.rename(from, to)
    }

    fn remove_dir_all(&self, path: &Path) -> Result<()> {
        LocalFileSystem.remove_dir_all(path)
    }

    fn rom_directories(&self, rom_root: &Path, active_only: bool) -> Result<Vec<RomDirectory>> {
        LocalFileSystem.rom_directories(rom_root, active_only)
    }
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_temp_dir_base_is_absolute() {
        assert!(temp_dir_base().is_absolute());
    }

    #[test]
    fn test_create_temp_dir() {
        let temp = create_temp_dir();
        assert!(temp.path().exists());
    }

    #[test]
    fn test_sd_card_file_content_is_relative_path() {
        let card = SdCard::new();
        card.file("Roms/Game Boy (GB)/.media/bg.png");
        assert_eq!(
            card.read("Roms/Game Boy (GB)/.media/bg.png"),
            "Roms/Game Boy (GB)/.media/bg.png"
        );
    }

    #[test]
    fn test_sd_card_files_under() {
        let card = SdCard::new();
        card.file("Roms/b.png");
        card.file("Roms/a/c.png");
        card.dir("Roms/empty");
        assert_eq!(card.files_under("Roms"), vec!["a/c.png", "b.png"]);
    }

    #[test]
    fn test_sd_card_layout_is_rooted_in_temp_dir() {
        let card = SdCard::new();
        assert_eq!(card.layout().roms, card.root().join("Roms"));
    }
}
