//! Recursive decoration walk

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use super::{Aggregations, ConsoleAggregation, ConsoleKey, Decoration, DirectoryAggregation, MISC_TAG};
use crate::classifier::{
    Classifier, ImageRole, display_name, is_candidate_image, is_media_dir, platform_tag,
    platform_tag_of,
};
use crate::fs::{Entry, FileSystem, base_name};
use crate::layout::{DecorationSource, Layout, MEDIA_DIR, PORTS_TAG};

/// Values inherited from ancestors during the walk
#[derive(Debug, Clone, Default)]
struct Ancestry {
    /// First directory below the source root; keys the directory grouping
    soft_parent: Option<PathBuf>,
    /// Nearest directory holding a candidate image; splits console buckets
    hard_parent: Option<PathBuf>,
    /// Platform tag, inherited unchanged once found
    hard_console: Option<String>,
}

/// Accumulates decorations from one or more sources
pub struct AggregationBuilder<'a> {
    fs: &'a dyn FileSystem,
    layout: &'a Layout,
    classifier: Classifier<'a>,
    console: BTreeMap<ConsoleKey, Vec<Decoration>>,
    directory: BTreeMap<String, Vec<Decoration>>,
}

impl<'a> AggregationBuilder<'a> {
    pub fn new(fs: &'a dyn FileSystem, layout: &'a Layout) -> Self {
        Self {
            fs,
            layout,
            classifier: Classifier::new(fs, layout),
            console: BTreeMap::new(),
            directory: BTreeMap::new(),
        }
    }

    /// Walk one source root, merging into what was collected so far
    pub fn scan(&mut self, source: &DecorationSource) -> &mut Self {
        self.visit(&source.path, source, Ancestry::default());
        self
    }

    pub fn build(self) -> Aggregations {
        let by_console = self
            .console
            .into_iter()
            .map(|(key, decorations)| ConsoleAggregation {
                console_tag: key.tag,
                console_name: key.name,
                decorations,
            })
            .collect();

        let by_directory = self
            .directory
            .into_iter()
            .map(|(directory_name, decorations)| DirectoryAggregation {
                directory_name,
                decorations,
            })
            .collect();

        Aggregations {
            by_console,
            by_directory,
        }
    }

    fn visit(&mut self, dir: &Path, source: &DecorationSource, mut ancestry: Ancestry) {
        let entries = match self.fs.list(dir) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(dir = %dir.display(), error = %e, "skipping unreadable directory");
                return;
            }
        };

        let mut ports = false;
        if ancestry.hard_console.is_none() {
            let relative = dir.strip_prefix(&source.path).unwrap_or(dir);
            ancestry.hard_console = platform_tag_of(relative);
            ports = source.path == self.layout.roms
                && ancestry.hard_console.as_deref() == Some(PORTS_TAG);
        }

        let owner = owner_of(dir);
        if ancestry.hard_parent.is_none() && has_candidate_image(&entries) {
            ancestry.hard_parent = Some(owner.to_path_buf());
        }
        if ancestry.soft_parent.is_none() && owner != source.path {
            ancestry.soft_parent = Some(owner.to_path_buf());
        }

        for entry in entries.iter().filter(|e| e.is_dir) {
            if ports && entry.name != MEDIA_DIR {
                tracing::debug!(dir = %dir.display(), child = %entry.name, "ports directory, not descending");
                continue;
            }
            self.visit(&dir.join(&entry.name), source, ancestry.clone());
        }

        for entry in entries.iter().filter(|e| !e.is_dir) {
            let Some(role) = self.classifier.role(dir, &entry.name) else {
                continue;
            };
            if role == ImageRole::FolderIcon {
                continue;
            }
            let decoration = decoration(dir, &entry.name, role, source, &ancestry);
            self.insert(decoration);
        }
    }

    fn insert(&mut self, decoration: Decoration) {
        self.directory
            .entry(decoration.directory_key.clone())
            .or_default()
            .push(decoration.clone());
        self.console
            .entry(decoration.console_key.clone())
            .or_default()
            .push(decoration);
    }
}

/// The directory a path stands for: a `.media` directory decorates its parent
fn owner_of(dir: &Path) -> &Path {
    if is_media_dir(dir) {
        dir.parent().unwrap_or(dir)
    } else {
        dir
    }
}

fn has_candidate_image(entries: &[Entry]) -> bool {
    entries
        .iter()
        .any(|e| !e.is_dir && is_candidate_image(&e.name))
}

fn decoration(
    dir: &Path,
    file_name: &str,
    role: ImageRole,
    source: &DecorationSource,
    ancestry: &Ancestry,
) -> Decoration {
    let path = dir.join(file_name);

    let tag = ancestry
        .hard_console
        .clone()
        .or_else(|| {
            source
                .filenames_tag_free
                .then(|| platform_tag(file_name).map(str::to_string))
                .flatten()
        })
        .unwrap_or_else(|| MISC_TAG.to_string());

    let soft = ancestry.soft_parent.as_deref().unwrap_or(&source.path);
    let hard = ancestry.hard_parent.as_deref().unwrap_or(soft);

    let mut directory_key = display_name(&base_name(soft));
    if hard != soft {
        directory_key = format!("{directory_key}/{}", display_name(&base_name(hard)));
    }

    let console_key = ConsoleKey {
        tag,
        name: display_name(&base_name(hard)),
    };

    let name = path
        .strip_prefix(hard)
        .map(|p| p.to_string_lossy().into_owned())
        .unwrap_or_else(|_| file_name.to_string());

    Decoration {
        name,
        path,
        role,
        console_key,
        directory_key,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::LocalFileSystem;
    use crate::test_fixtures::SdCard;

    fn scan_roms(card: &SdCard) -> Aggregations {
        let layout = card.layout();
        let mut builder = AggregationBuilder::new(&LocalFileSystem, &layout);
        builder.scan(&DecorationSource {
            path: layout.roms.clone(),
            filenames_tag_free: true,
        });
        builder.build()
    }

    #[test]
    fn test_tagged_directory_wallpaper() {
        let card = SdCard::new();
        card.file("Roms/(SNES) Super Nintendo/.media/bg.png");

        let aggregations = scan_roms(&card);

        assert_eq!(aggregations.by_console.len(), 1);
        let console = &aggregations.by_console[0];
        assert_eq!(console.console_tag, "(SNES)");
        assert_eq!(console.decorations.len(), 1);
        let decoration = &console.decorations[0];
        assert_eq!(decoration.directory_key, "Super Nintendo");
        assert_eq!(decoration.role, ImageRole::Wallpaper);
        assert_eq!(decoration.name, ".media/bg.png");
    }

    #[test]
    fn test_media_with_only_backgrounds() {
        let card = SdCard::new();
        card.file("Roms/Game Boy (GB)/.media/bg.png");
        card.file("Roms/Game Boy (GB)/.media/bglist.png");

        let aggregations = scan_roms(&card);
        let roles: Vec<_> = aggregations.decorations().map(|d| d.role).collect();

        assert_eq!(roles.len(), 2);
        assert!(!roles.contains(&ImageRole::FolderIcon));
        assert!(roles.contains(&ImageRole::Wallpaper));
        assert!(roles.contains(&ImageRole::ListWallpaper));
    }

    #[test]
    fn test_folder_icons_are_not_decorations() {
        let card = SdCard::new();
        card.file("Roms/Game Boy (GB)/Hacks/Tetris DX.gb");
        card.file("Roms/Game Boy (GB)/.media/Hacks.png");
        card.file("Roms/Game Boy (GB)/.media/Tetris.png");
        card.file("Roms/Game Boy (GB)/Tetris.gb");

        let aggregations = scan_roms(&card);
        let names: Vec<_> = aggregations.decorations().map(|d| d.name.as_str()).collect();

        assert_eq!(names, vec![".media/Tetris.png"]);
    }

    #[test]
    fn test_hard_parent_splits_sibling_buckets() {
        let card = SdCard::new();
        card.file("Roms/(SNES) Super Nintendo/Hacks/.media/bg.png");
        card.file("Roms/(SNES) Super Nintendo/Translations/.media/bg.png");

        let aggregations = scan_roms(&card);
        let names: Vec<_> = aggregations
            .by_console
            .iter()
            .map(|c| (c.console_tag.as_str(), c.console_name.as_str()))
            .collect();
        assert_eq!(names, vec![("(SNES)", "Hacks"), ("(SNES)", "Translations")]);

        let directories: Vec<_> = aggregations
            .by_directory
            .iter()
            .map(|d| d.directory_name.as_str())
            .collect();
        assert_eq!(
            directories,
            vec!["Super Nintendo/Hacks", "Super Nintendo/Translations"]
        );
    }

    #[test]
    fn test_console_tag_inherited_by_descendants() {
        let card = SdCard::new();
        card.file("Roms/Game Boy (GB)/Homebrew (2021)/.media/bg.png");

        let aggregations = scan_roms(&card);
        assert_eq!(aggregations.by_console[0].console_tag, "(GB)");
    }

    #[test]
    fn test_tag_from_file_name_for_tag_free_source() {
        let card = SdCard::new();
        card.file("Roms/.media/Game Boy (GB).png");

        let aggregations = scan_roms(&card);
        assert_eq!(aggregations.by_console[0].console_tag, "(GB)");
        assert_eq!(aggregations.by_directory[0].directory_name, "Roms");
    }

    #[test]
    fn test_untagged_images_land_in_misc() {
        let card = SdCard::new();
        card.file("Screenshots/shot (GB).png");
        let layout = card.layout();
        let mut builder = AggregationBuilder::new(&LocalFileSystem, &layout);
        builder.scan(&DecorationSource {
            path: layout.screenshots.clone(),
            filenames_tag_free: false,
        });
        let aggregations = builder.build();

        assert_eq!(aggregations.by_console[0].console_tag, MISC_TAG);
        assert_eq!(aggregations.by_directory[0].directory_name, "Screenshots");
    }

    #[test]
    fn test_ports_directory_only_descends_into_media() {
        let card = SdCard::new();
        card.file("Roms/Ports (PORTS)/.media/bg.png");
        card.file("Roms/Ports (PORTS)/Quake/.media/bg.png");

        let aggregations = scan_roms(&card);
        assert_eq!(aggregations.len(), 1);
        assert!(
            aggregations
                .decorations()
                .all(|d| !d.path.to_string_lossy().contains("Quake"))
        );
    }

    #[test]
    fn test_previews_are_ignored() {
        let card = SdCard::new();
        card.file("Roms/Game Boy (GB)/.media/preview.png");
        card.file("Roms/Game Boy (GB)/.media/hidden.preview.png");

        assert!(scan_roms(&card).is_empty());
    }

    #[test]
    fn test_sources_merge_into_one_result() {
        let card = SdCard::new();
        card.file("Roms/Game Boy (GB)/.media/bg.png");
        card.file("Screenshots/a.png");
        let layout = card.layout();

        let mut builder = AggregationBuilder::new(&LocalFileSystem, &layout);
        for source in layout.decoration_sources() {
            if source.path.is_dir() {
                builder.scan(&source);
            }
        }
        let aggregations = builder.build();

        assert_eq!(aggregations.len(), 2);
        assert_eq!(aggregations.by_directory.len(), 2);
    }
}
