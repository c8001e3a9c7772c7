//! Enumeration of live decorations for save and reset

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use crate::classifier::{Classifier, ImageRole, is_media_dir, platform_tag_of};
use crate::fs::{FileSystem, file_stem};
use crate::layout::{Home, MEDIA_DIR, MediaKind, PORTS_TAG};

/// A decoration currently in place on the card
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct LiveAsset {
    pub path: PathBuf,
    pub kind: MediaKind,
    /// Decorated item relative to its home, e.g. `["Game Boy (GB)", "Hacks"]`
    pub segments: Vec<String>,
}

pub(super) struct AssetWalk<'a> {
    pub fs: &'a dyn FileSystem,
    pub classifier: Classifier<'a>,
    pub home: Home,
    pub home_dir: &'a Path,
    /// Top-level ROM directories a walk may enter; `None` admits everything
    pub eligible: Option<&'a BTreeSet<String>>,
}

impl AssetWalk<'_> {
    pub fn collect(&self) -> Vec<LiveAsset> {
        let mut assets = Vec::new();
        self.visit(self.home_dir, &mut assets);
        assets
    }

    fn visit(&self, dir: &Path, assets: &mut Vec<LiveAsset>) {
        let entries = match self.fs.list(dir) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(dir = %dir.display(), error = %e, "skipping unreadable directory");
                return;
            }
        };

        if is_media_dir(dir) {
            for entry in entries.iter().filter(|e| !e.is_dir) {
                if let Some(asset) = self.asset(dir, &entry.name) {
                    assets.push(asset);
                }
            }
            return;
        }

        if self.descent_blocked(dir) {
            tracing::debug!(dir = %dir.display(), "not descending");
            return;
        }

        for entry in entries.iter().filter(|e| e.is_dir) {
            if dir == self.home_dir && entry.name != MEDIA_DIR && !self.is_eligible(&entry.name) {
                continue;
            }
            self.visit(&dir.join(&entry.name), assets);
        }
    }

    fn asset(&self, media_dir: &Path, file_name: &str) -> Option<LiveAsset> {
        let owner = media_dir.parent()?;
        let mut segments = relative_segments(self.home_dir, owner);

        let kind = match self.classifier.role(media_dir, file_name)? {
            ImageRole::Wallpaper => MediaKind::Wallpaper,
            ImageRole::ListWallpaper => MediaKind::ListWallpaper,
            ImageRole::FolderIcon => {
                segments.push(file_stem(file_name).to_string());
                MediaKind::Icon
            }
            ImageRole::Artwork => return None,
        };

        if let Some(first) = segments.first() {
            if !self.is_eligible(first) {
                return None;
            }
        }

        Some(LiveAsset {
            path: media_dir.join(file_name),
            kind,
            segments,
        })
    }

    fn is_eligible(&self, top_level: &str) -> bool {
        self.eligible.is_none_or(|names| names.contains(top_level))
    }

    /// Deep ports trees and anything below a tool bundle are not walked
    fn descent_blocked(&self, dir: &Path) -> bool {
        let relative = dir.strip_prefix(self.home_dir).unwrap_or(dir);
        let depth = relative.components().count();
        match self.home {
            Home::Roms => depth > 2 && platform_tag_of(relative).as_deref() == Some(PORTS_TAG),
            Home::Tools => depth > 1,
            Home::Collections => false,
        }
    }
}

fn relative_segments(home_dir: &Path, dir: &Path) -> Vec<String> {
    dir.strip_prefix(home_dir)
        .map(|relative| {
            relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect()
        })
        .unwrap_or_default()
}
