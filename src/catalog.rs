//! Component catalog
//!
//! A component is one manageable asset category, e.g. `SystemIcons`. The set
//! of categories is fixed; what varies is which of them are present on the
//! live card or inside a saved theme package.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use crate::classifier::{Classifier, ImageRole, platform_tag_of};
use crate::error::{AestheticsError, Result};
use crate::fs::{FileSystem, base_name, has_png_extension};
use crate::layout::{Home, Layout, MEDIA_DIR, MediaKind, PORTS_TAG};

/// Static description of one component category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComponentTypeDescriptor {
    pub name: &'static str,
    pub media_kind: MediaKind,
    pub home: Home,
    /// Whether the category also owns root-level meta singletons
    pub contains_meta_files: bool,
    /// Package-only alias of another category with the same media kind and home
    pub is_duplicate_media_kind: bool,
}

const fn descriptor(
    name: &'static str,
    media_kind: MediaKind,
    home: Home,
    contains_meta_files: bool,
    is_duplicate_media_kind: bool,
) -> ComponentTypeDescriptor {
    ComponentTypeDescriptor {
        name,
        media_kind,
        home,
        contains_meta_files,
        is_duplicate_media_kind,
    }
}

/// Every known category, sorted by name
pub static DESCRIPTORS: [ComponentTypeDescriptor; 10] = [
    descriptor("CollectionIcons", MediaKind::Icon, Home::Collections, false, false),
    descriptor("CollectionListWallpapers", MediaKind::ListWallpaper, Home::Collections, false, false),
    descriptor("CollectionWallpapers", MediaKind::Wallpaper, Home::Collections, false, false),
    descriptor("SystemIcons", MediaKind::Icon, Home::Roms, true, false),
    descriptor("SystemListWallpapers", MediaKind::ListWallpaper, Home::Roms, true, false),
    descriptor("SystemWallpapers", MediaKind::Wallpaper, Home::Roms, true, false),
    descriptor("ToolIcons", MediaKind::Icon, Home::Tools, false, false),
    descriptor("ToolListWallpapers", MediaKind::ListWallpaper, Home::Tools, false, false),
    descriptor("ToolWallpapers", MediaKind::Wallpaper, Home::Tools, false, false),
    descriptor("Wallpapers", MediaKind::Wallpaper, Home::Roms, false, true),
];

pub fn find_descriptor(name: &str) -> Option<&'static ComponentTypeDescriptor> {
    DESCRIPTORS.iter().find(|d| d.name == name)
}

/// Package directory name of the category saving `kind` assets for `home`
pub fn component_name(home: Home, kind: MediaKind) -> String {
    let suffix = match kind {
        MediaKind::Icon => "Icons",
        MediaKind::Wallpaper => "Wallpapers",
        MediaKind::ListWallpaper => "ListWallpapers",
    };
    format!("{}{suffix}", home.component_prefix())
}

/// A category together with its presence in one place
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Component {
    pub name: &'static str,
    pub is_supported: bool,
    /// Package directories holding this component; empty for the live card
    pub matched_paths: Vec<PathBuf>,
    pub descriptor: &'static ComponentTypeDescriptor,
}

impl Component {
    fn unresolved(descriptor: &'static ComponentTypeDescriptor) -> Self {
        Self {
            name: descriptor.name,
            is_supported: false,
            matched_paths: Vec::new(),
            descriptor,
        }
    }

    pub fn is_platform_dependent(&self) -> bool {
        self.descriptor.home.is_platform_dependent()
    }

    /// Outstanding while probing the live card for `home`
    fn is_outstanding(&self, home: Home) -> bool {
        self.descriptor.home == home && !self.is_supported && !self.descriptor.is_duplicate_media_kind
    }
}

/// Every category, none supported yet
pub fn all_components() -> Vec<Component> {
    DESCRIPTORS.iter().map(Component::unresolved).collect()
}

/// Keep only the named components, in catalog order
pub fn select(components: Vec<Component>, names: &[String]) -> Result<Vec<Component>> {
    if let Some(unknown) = names.iter().find(|n| find_descriptor(n).is_none()) {
        return Err(AestheticsError::UnknownComponent {
            name: unknown.clone(),
        });
    }

    Ok(components
        .into_iter()
        .filter(|c| names.iter().any(|n| n == c.name))
        .collect())
}

/// Answers "which components are present" for the live card or a package
pub struct Catalog<'a> {
    fs: &'a dyn FileSystem,
    layout: &'a Layout,
    classifier: Classifier<'a>,
}

impl<'a> Catalog<'a> {
    pub fn new(fs: &'a dyn FileSystem, layout: &'a Layout) -> Self {
        Self {
            fs,
            layout,
            classifier: Classifier::new(fs, layout),
        }
    }

    /// Components of a saved package, or of the live card when `theme` is `None`
    pub fn components(&self, theme: Option<&Path>) -> Vec<Component> {
        match theme {
            Some(theme_path) => self.package_components(theme_path),
            None => self.live_components(),
        }
    }

    pub fn live_components(&self) -> Vec<Component> {
        let mut components = all_components();

        let present: BTreeSet<MediaKind> = self
            .layout
            .meta_files()
            .into_iter()
            .filter(|meta| self.fs.exists(&meta.path))
            .map(|meta| meta.kind)
            .collect();
        for component in &mut components {
            if component.descriptor.contains_meta_files && present.contains(&component.descriptor.media_kind) {
                component.is_supported = true;
            }
        }

        for home in [Home::Collections, Home::Roms, Home::Tools] {
            if components.iter().any(|c| c.is_outstanding(home)) {
                let home_dir = self.layout.home_dir(home).to_path_buf();
                self.probe(home, &home_dir, &mut components);
            }
        }

        components
    }

    /// Probe one directory of a home, then its children while anything is outstanding
    fn probe(&self, home: Home, dir: &Path, components: &mut [Component]) {
        let media = dir.join(MEDIA_DIR);
        if self.fs.is_dir(&media) {
            if let Ok(files) = self.fs.list(&media) {
                let found: BTreeSet<MediaKind> = files
                    .iter()
                    .filter(|f| !f.is_dir)
                    .filter_map(|f| self.classifier.role(&media, &f.name))
                    .filter(|role| *role != ImageRole::Artwork)
                    .filter_map(ImageRole::media_kind)
                    .collect();

                for component in components.iter_mut().filter(|c| c.is_outstanding(home)) {
                    if found.contains(&component.descriptor.media_kind) {
                        tracing::debug!(component = component.name, dir = %dir.display(), "component present");
                        component.is_supported = true;
                    }
                }

                if !components.iter().any(|c| c.is_outstanding(home)) {
                    return;
                }
            }
        }

        let home_dir = self.layout.home_dir(home);
        let ports = home == Home::Roms
            && platform_tag_of(dir.strip_prefix(home_dir).unwrap_or(dir)).as_deref() == Some(PORTS_TAG);
        let below_tools = home == Home::Tools && dir != home_dir;
        if ports || below_tools {
            return;
        }

        let Ok(entries) = self.fs.list(dir) else {
            return;
        };
        for entry in entries.iter().filter(|e| e.is_dir && e.name != MEDIA_DIR) {
            if !components.iter().any(|c| c.is_outstanding(home)) {
                break;
            }
            self.probe(home, &dir.join(&entry.name), components);
        }
    }

    /// Walk a package tree matching component directories that hold images
    pub fn package_components(&self, theme_path: &Path) -> Vec<Component> {
        let mut components = all_components();
        self.match_package_dir(theme_path, &mut components);
        components
    }

    fn match_package_dir(&self, dir: &Path, components: &mut [Component]) {
        let Ok(entries) = self.fs.list(dir) else {
            tracing::warn!(dir = %dir.display(), "skipping unreadable package directory");
            return;
        };

        let has_png = entries
            .iter()
            .any(|e| !e.is_dir && has_png_extension(&e.name));
        if has_png {
            let name = base_name(dir);
            if let Some(component) = components.iter_mut().find(|c| c.name == name) {
                component.is_supported = true;
                component.matched_paths.push(dir.to_path_buf());
                return;
            }
        }

        for entry in entries.iter().filter(|e| e.is_dir) {
            self.match_package_dir(&dir.join(&entry.name), components);
        }
    }
}
