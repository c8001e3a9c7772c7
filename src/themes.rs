//! Saved and downloaded theme packages
//!
//! Every directory under the themes root is a theme. A theme may carry a
//! `preview.png`, or a `hidden.preview.png` when its preview is hidden from
//! the browser.

use std::path::{Path, PathBuf};

use crate::catalog::Component;
use crate::error::{AestheticsError, Result};
use crate::fs::{FileSystem, is_hidden};
use crate::layout::{HIDDEN_PREVIEW_FILE, Layout, PREVIEW_FILE};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub name: String,
    pub path: PathBuf,
    pub preview_found: bool,
    /// Holds anything besides its preview images
    pub contains_theme: bool,
    pub is_hidden: bool,
}

pub struct ThemeLibrary<'a> {
    fs: &'a dyn FileSystem,
    root: &'a Path,
}

impl<'a> ThemeLibrary<'a> {
    pub fn new(fs: &'a dyn FileSystem, layout: &'a Layout) -> Self {
        Self {
            fs,
            root: &layout.themes,
        }
    }

    pub fn root(&self) -> &Path {
        self.root
    }

    /// All themes, sorted by name. A missing themes root holds no themes.
    pub fn list(&self) -> Result<Vec<Theme>> {
        if !self.fs.is_dir(self.root) {
            return Ok(Vec::new());
        }

        let mut themes = Vec::new();
        for entry in self.fs.list(self.root)? {
            if !entry.is_dir || is_hidden(&entry.name) {
                continue;
            }
            themes.push(self.load(&entry.name)?);
        }

        Ok(themes)
    }

    pub fn get(&self, name: &str) -> Result<Theme> {
        validate_name(name)?;
        if !self.fs.is_dir(&self.root.join(name)) {
            return Err(AestheticsError::ThemeNotFound {
                name: name.to_string(),
            });
        }
        self.load(name)
    }

    fn load(&self, name: &str) -> Result<Theme> {
        let path = self.root.join(name);
        let entries = self.fs.list(&path)?;

        let has = |file: &str| entries.iter().any(|e| !e.is_dir && e.name == file);
        let visible = has(PREVIEW_FILE);
        let hidden = has(HIDDEN_PREVIEW_FILE);
        let preview_count = usize::from(visible) + usize::from(hidden);

        Ok(Theme {
            name: name.to_string(),
            path,
            preview_found: visible || hidden,
            contains_theme: entries.len() > preview_count,
            is_hidden: hidden,
        })
    }

    /// The visible preview if present, else the hidden one
    pub fn preview_path(&self, theme: &Theme) -> Option<PathBuf> {
        [PREVIEW_FILE, HIDDEN_PREVIEW_FILE]
            .into_iter()
            .map(|file| theme.path.join(file))
            .find(|path| self.fs.exists(path))
    }

    /// Swap the preview between its visible and hidden names
    ///
    /// Returns whether the theme is hidden afterwards.
    pub fn toggle_hidden(&self, name: &str) -> Result<bool> {
        let theme = self.get(name)?;
        let visible = theme.path.join(PREVIEW_FILE);
        let hidden = theme.path.join(HIDDEN_PREVIEW_FILE);

        if theme.is_hidden {
            self.fs.rename(&hidden, &visible)?;
            tracing::info!(theme = %name, "preview shown");
            Ok(false)
        } else if theme.preview_found {
            self.fs.rename(&visible, &hidden)?;
            tracing::info!(theme = %name, "preview hidden");
            Ok(true)
        } else {
            Err(AestheticsError::FileNotFound {
                path: visible.display().to_string(),
            })
        }
    }

    pub fn delete(&self, name: &str) -> Result<()> {
        let theme = self.get(name)?;
        self.fs.remove_dir_all(&theme.path)?;
        tracing::info!(theme = %name, "theme deleted");
        Ok(())
    }

    pub fn rename(&self, from: &str, to: &str) -> Result<Theme> {
        let theme = self.get(from)?;
        validate_name(to)?;

        let target = self.root.join(to);
        if self.fs.exists(&target) {
            return Err(AestheticsError::ThemeAlreadyExists {
                name: to.to_string(),
            });
        }

        self.fs.rename(&theme.path, &target)?;
        tracing::info!(from = %from, to = %to, "theme renamed");
        self.load(to)
    }

    /// Remove the package directories of the given components from a theme
    ///
    /// `components` should come from the catalog's scan of that theme.
    /// Returns how many directories were removed; failures are logged.
    pub fn delete_components(&self, name: &str, components: &[Component]) -> Result<usize> {
        let theme = self.get(name)?;
        let mut removed = 0;

        for path in components.iter().flat_map(|c| c.matched_paths.iter()) {
            if !path.starts_with(&theme.path) {
                tracing::warn!(path = %path.display(), "component directory outside theme, skipped");
                continue;
            }
            match self.fs.remove_dir_all(path) {
                Ok(()) => removed += 1,
                Err(e) => tracing::warn!(error = %e, "could not remove component"),
            }
        }

        Ok(removed)
    }
}

/// Reject names that are blank or would leave the themes directory
pub fn validate_name(name: &str) -> Result<()> {
    let trimmed = name.trim();
    if trimmed.is_empty() || trimmed == "." || trimmed == ".." || name.contains(['/', '\\']) {
        return Err(AestheticsError::InvalidThemeName {
            name: name.to_string(),
        });
    }
    Ok(())
}
