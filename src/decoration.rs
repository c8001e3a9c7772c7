//! Editing single decorations in place

use std::path::{Path, PathBuf};

use crate::aggregation::DecorationCache;
use crate::error::{AestheticsError, Result};
use crate::fs::{FileSystem, has_png_extension};
use crate::layout::{Layout, MediaKind, WALLPAPER_FILE};

pub struct DecorationEditor<'a> {
    fs: &'a dyn FileSystem,
    layout: &'a Layout,
}

impl<'a> DecorationEditor<'a> {
    pub fn new(fs: &'a dyn FileSystem, layout: &'a Layout) -> Self {
        Self { fs, layout }
    }

    /// Slot file that decorates `target` with an image of `kind`
    ///
    /// `target` must exist below the card root. The root itself only has a
    /// wallpaper.
    pub fn slot(&self, kind: MediaKind, target: &Path) -> Result<PathBuf> {
        let invalid = || AestheticsError::InvalidDecorationTarget {
            path: target.display().to_string(),
        };

        if !target.starts_with(&self.layout.root) || !self.fs.exists(target) {
            return Err(invalid());
        }

        if target == self.layout.root {
            return match kind {
                MediaKind::Wallpaper => Ok(self.layout.root.join(WALLPAPER_FILE)),
                _ => Err(invalid()),
            };
        }

        if kind != MediaKind::Icon && !self.fs.is_dir(target) {
            return Err(invalid());
        }

        let parent = target.parent().ok_or_else(invalid)?;
        Ok(self.layout.slot_path(kind, parent, target))
    }

    /// Copy `image` into the slot, replacing whatever was there
    pub fn set(&self, kind: MediaKind, target: &Path, image: &Path) -> Result<PathBuf> {
        let image_name = image
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        if !self.fs.exists(image) || self.fs.is_dir(image) || !has_png_extension(&image_name) {
            return Err(AestheticsError::FileNotFound {
                path: image.display().to_string(),
            });
        }

        let slot = self.slot(kind, target)?;
        self.fs.copy(image, &slot)?;
        tracing::info!(slot = %slot.display(), "decoration set");
        Ok(slot)
    }

    /// Delete the slot file. Returns false if it was already empty.
    pub fn clear(&self, kind: MediaKind, target: &Path) -> Result<bool> {
        let slot = self.slot(kind, target)?;
        if !self.fs.exists(&slot) {
            return Ok(false);
        }
        self.remove(&slot)?;
        tracing::info!(slot = %slot.display(), "decoration cleared");
        Ok(true)
    }

    /// Delete a discovered decoration file and drop it from the cache
    pub fn delete(&self, path: &Path, cache: &mut DecorationCache) -> Result<()> {
        if !self.fs.exists(path) {
            return Err(AestheticsError::FileNotFound {
                path: path.display().to_string(),
            });
        }
        self.remove(path)?;
        if !cache.forget(path) {
            tracing::debug!(path = %path.display(), "deleted file was not in the cached aggregation");
        }
        Ok(())
    }

    fn remove(&self, path: &Path) -> Result<()> {
        if self.fs.delete(path) {
            Ok(())
        } else {
            Err(AestheticsError::FileDeleteFailed {
                path: path.display().to_string(),
            })
        }
    }
}
