//! File system collaborators with unified error handling
//!
//! Every engine module reaches the disk through the [`FileSystem`] trait so
//! that walks, copies and deletes share one error vocabulary and one place
//! where listing order is defined.

use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{AestheticsError, Result};

/// One entry of a directory listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub name: String,
    pub is_dir: bool,
}

impl Entry {
    pub fn file(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_dir: false,
        }
    }

    pub fn dir(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_dir: true,
        }
    }

    /// File name without its final extension
    pub fn stem(&self) -> &str {
        file_stem(&self.name)
    }

    /// True for a non-directory entry with a `.png` extension
    pub fn is_png(&self) -> bool {
        !self.is_dir && has_png_extension(&self.name)
    }
}

/// A top-level directory of the ROM home with the number of files beneath it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RomDirectory {
    pub name: String,
    pub path: PathBuf,
    pub file_count: usize,
}

impl RomDirectory {
    /// A ROM directory is active when it holds at least one file
    pub fn is_active(&self) -> bool {
        self.file_count > 0
    }
}

/// Disk access used by the aggregation, catalog and transfer engines
pub trait FileSystem {
    /// List a directory, ordered by name
    fn list(&self, path: &Path) -> Result<Vec<Entry>>;

    fn exists(&self, path: &Path) -> bool;

    fn is_dir(&self, path: &Path) -> bool;

    /// Copy a file, creating parent directories and keeping permission bits
    fn copy(&self, from: &Path, to: &Path) -> Result<()>;

    /// Delete a file. Never fails loudly; reports success instead
    fn delete(&self, path: &Path) -> bool;

    fn rename(&self, from: &Path, to: &Path) -> Result<()>;

    /// Remove a directory and everything below it
    fn remove_dir_all(&self, path: &Path) -> Result<()>;

    /// List top-level ROM directories, optionally only those holding files
    fn rom_directories(&self, rom_root: &Path, active_only: bool) -> Result<Vec<RomDirectory>>;
}

/// [`FileSystem`] backed by the real disk
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalFileSystem;

impl FileSystem for LocalFileSystem {
    fn list(&self, path: &Path) -> Result<Vec<Entry>> {
        let read_dir = fs::read_dir(path).map_err(|e| list_error(path, &e))?;

        let mut entries = Vec::new();
        for entry in read_dir {
            let entry = entry.map_err(|e| list_error(path, &e))?;
            let is_dir = entry.file_type().is_ok_and(|t| t.is_dir())
                || (entry.file_type().is_ok_and(|t| t.is_symlink()) && entry.path().is_dir());
            entries.push(Entry {
                name: entry.file_name().to_string_lossy().into_owned(),
                is_dir,
            });
        }
        entries.sort_by(|a, b| a.name.cmp(&b.name));

        Ok(entries)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn copy(&self, from: &Path, to: &Path) -> Result<()> {
        let copy_error = |reason: String| AestheticsError::FileCopyFailed {
            from: from.display().to_string(),
            to: to.display().to_string(),
            reason,
        };

        if let Some(parent) = to.parent() {
            fs::create_dir_all(parent).map_err(|e| copy_error(e.to_string()))?;
        }
        // std::fs::copy carries the source permission bits over
        fs::copy(from, to)
            .map(|_| ())
            .map_err(|e| copy_error(e.to_string()))
    }

    fn delete(&self, path: &Path) -> bool {
        match fs::remove_file(path) {
            Ok(()) => true,
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "delete failed");
                false
            }
        }
    }

    fn rename(&self, from: &Path, to: &Path) -> Result<()> {
        fs::rename(from, to).map_err(|e| AestheticsError::FileWriteFailed {
            path: to.display().to_string(),
            reason: e.to_string(),
        })
    }

    fn remove_dir_all(&self, path: &Path) -> Result<()> {
        fs::remove_dir_all(path).map_err(|e| {
            tracing::debug!(path = %path.display(), error = %e, "remove failed");
            AestheticsError::FileDeleteFailed {
                path: path.display().to_string(),
            }
        })
    }

    fn rom_directories(&self, rom_root: &Path, active_only: bool) -> Result<Vec<RomDirectory>> {
        let entries = self
            .list(rom_root)
            .map_err(|e| AestheticsError::RomListingFailed {
                path: rom_root.display().to_string(),
                reason: e.to_string(),
            })?;

        let directories = entries
            .into_iter()
            .filter(|entry| entry.is_dir && !is_hidden(&entry.name))
            .map(|entry| {
                let path = rom_root.join(&entry.name);
                let file_count = count_visible_files(&path);
                RomDirectory {
                    name: entry.name,
                    path,
                    file_count,
                }
            })
            .filter(|dir| !active_only || dir.is_active())
            .collect();

        Ok(directories)
    }
}

/// Count non-hidden files below a directory, skipping hidden directories such as `.media`
fn count_visible_files(path: &Path) -> usize {
    WalkDir::new(path)
        .min_depth(1)
        .follow_links(true)
        .into_iter()
        .filter_entry(|e| !is_hidden(&e.file_name().to_string_lossy()))
        .filter_map(std::result::Result::ok)
        .filter(|e| e.file_type().is_file())
        .count()
}

fn list_error(path: &Path, e: &std::io::Error) -> AestheticsError {
    AestheticsError::DirectoryListFailed {
        path: path.display().to_string(),
        reason: e.to_string(),
    }
}

pub fn is_hidden(name: &str) -> bool {
    name.starts_with('.')
}

/// File name without its final extension (`"a.b.png"` -> `"a.b"`)
pub fn file_stem(name: &str) -> &str {
    match name.rfind('.') {
        Some(0) | None => name,
        Some(idx) => &name[..idx],
    }
}

pub fn has_png_extension(name: &str) -> bool {
    Path::new(name)
        .extension()
        .is_some_and(|ext| ext == "png")
}

/// Base name of a path as an owned string
pub fn base_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}
