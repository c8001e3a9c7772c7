//! SD card layout: homes, meta singletons and decoration slot paths
//!
//! ```text
//! <root>/
//! ├── bg.png                         # root wallpaper (meta)
//! ├── .media/Collections.png         # sentinel icons (meta)
//! ├── .media/Recently Played.png
//! ├── Roms/<Name (TAG)>/.media/...   # system decorations
//! ├── Collections/<name>.txt         # collection decorations in Collections/.media
//! ├── Recently Played/.media/...
//! ├── Tools/.media/tg5040.png        # tools icon (meta)
//! ├── Tools/tg5040/<Tool>.pak/...    # tool decorations
//! ├── Screenshots/
//! └── .userdata/shared/Aesthetics/Themes/<theme>/<Component>/...
//! ```

use std::path::{Path, PathBuf};

/// Directory holding decorations for its parent directory's entries
pub const MEDIA_DIR: &str = ".media";

/// Fixed wallpaper file name inside a `.media` directory
pub const WALLPAPER_FILE: &str = "bg.png";

/// Fixed list wallpaper file name inside a `.media` directory
pub const LIST_WALLPAPER_FILE: &str = "bglist.png";

pub const PREVIEW_FILE: &str = "preview.png";
pub const HIDDEN_PREVIEW_FILE: &str = "hidden.preview.png";

/// Platform tag of the ports directory, which is never walked deeply
pub const PORTS_TAG: &str = "(PORTS)";

/// Device platform name used for the tools tree
pub const TOOLS_PLATFORM: &str = "tg5040";

pub const ROMS_DIR: &str = "Roms";
pub const COLLECTIONS_DIR: &str = "Collections";
pub const RECENTLY_PLAYED_DIR: &str = "Recently Played";
pub const TOOLS_DIR: &str = "Tools";
pub const SCREENSHOTS_DIR: &str = "Screenshots";

/// Default SD card mount point on the device
pub const DEFAULT_ROOT: &str = "/mnt/SDCARD";

/// Kind of decoration an image is used as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MediaKind {
    Icon,
    Wallpaper,
    ListWallpaper,
}

/// A top-level content tree that carries per-folder decorations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Home {
    Roms,
    Collections,
    Tools,
}

impl Home {
    /// Component name prefix used in theme packages
    pub fn component_prefix(self) -> &'static str {
        match self {
            Home::Roms => "System",
            Home::Collections => "Collection",
            Home::Tools => "Tool",
        }
    }

    /// Extension tried when a decoded item does not exist literally
    pub fn item_extension(self) -> Option<&'static str> {
        match self {
            Home::Roms => None,
            Home::Collections => Some("txt"),
            Home::Tools => Some("pak"),
        }
    }

    /// Whether assets under this home are keyed by platform tag
    pub fn is_platform_dependent(self) -> bool {
        self == Home::Roms
    }
}

/// A root scanned for decorations during aggregation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecorationSource {
    pub path: PathBuf,
    /// Whether image file names may carry the platform tag themselves
    pub filenames_tag_free: bool,
}

/// A root-level singleton image handled outside the per-folder convention
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetaFile {
    pub kind: MediaKind,
    /// File name used inside a theme package component directory
    pub package_name: &'static str,
    pub path: PathBuf,
}

/// Resolved paths of one SD card
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    pub root: PathBuf,
    pub roms: PathBuf,
    pub collections: PathBuf,
    pub recently_played: PathBuf,
    pub tools: PathBuf,
    pub screenshots: PathBuf,
    pub themes: PathBuf,
}

impl Default for Layout {
    fn default() -> Self {
        Self::new(DEFAULT_ROOT)
    }
}

impl Layout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            roms: root.join(ROMS_DIR),
            collections: root.join(COLLECTIONS_DIR),
            recently_played: root.join(RECENTLY_PLAYED_DIR),
            tools: root.join(TOOLS_DIR).join(TOOLS_PLATFORM),
            screenshots: root.join(SCREENSHOTS_DIR),
            themes: root
                .join(".userdata")
                .join("shared")
                .join("Aesthetics")
                .join("Themes"),
            root,
        }
    }

    pub fn home_dir(&self, home: Home) -> &Path {
        match home {
            Home::Roms => &self.roms,
            Home::Collections => &self.collections,
            Home::Tools => &self.tools,
        }
    }

    /// The home a path lies under, if any
    pub fn home_of(&self, path: &Path) -> Option<Home> {
        [Home::Roms, Home::Collections, Home::Tools]
            .into_iter()
            .find(|home| path.starts_with(self.home_dir(*home)))
    }

    /// Roots scanned by the aggregation pass, in scan order
    pub fn decoration_sources(&self) -> Vec<DecorationSource> {
        vec![
            DecorationSource {
                path: self.tools.join("Theme-Manager.pak").join("Themes"),
                filenames_tag_free: true,
            },
            DecorationSource {
                path: self.screenshots.clone(),
                filenames_tag_free: false,
            },
            DecorationSource {
                path: self.roms.clone(),
                filenames_tag_free: true,
            },
        ]
    }

    /// All meta singletons
    pub fn meta_files(&self) -> Vec<MetaFile> {
        let root_media = self.root.join(MEDIA_DIR);
        let tools_parent_media = self.root.join(TOOLS_DIR).join(MEDIA_DIR);
        let collections_media = self.collections.join(MEDIA_DIR);
        let recent_media = self.recently_played.join(MEDIA_DIR);
        let tools_media = self.tools.join(MEDIA_DIR);

        let meta = |kind, package_name, path| MetaFile {
            kind,
            package_name,
            path,
        };

        vec![
            meta(MediaKind::Icon, "Collections.png", root_media.join("Collections.png")),
            meta(
                MediaKind::Icon,
                "Recently Played.png",
                root_media.join("Recently Played.png"),
            ),
            meta(
                MediaKind::Icon,
                "Tools.png",
                tools_parent_media.join(format!("{TOOLS_PLATFORM}.png")),
            ),
            meta(MediaKind::Wallpaper, "Collections.png", collections_media.join(WALLPAPER_FILE)),
            meta(
                MediaKind::Wallpaper,
                "Recently Played.png",
                recent_media.join(WALLPAPER_FILE),
            ),
            meta(MediaKind::Wallpaper, "Tools.png", tools_media.join(WALLPAPER_FILE)),
            meta(MediaKind::Wallpaper, "Root.png", self.root.join(WALLPAPER_FILE)),
            meta(
                MediaKind::ListWallpaper,
                "Collections.png",
                collections_media.join(LIST_WALLPAPER_FILE),
            ),
            meta(
                MediaKind::ListWallpaper,
                "Recently Played.png",
                recent_media.join(LIST_WALLPAPER_FILE),
            ),
            meta(MediaKind::ListWallpaper, "Tools.png", tools_media.join(LIST_WALLPAPER_FILE)),
        ]
    }

    pub fn meta_files_of(&self, kind: MediaKind) -> Vec<MetaFile> {
        self.meta_files()
            .into_iter()
            .filter(|meta| meta.kind == kind)
            .collect()
    }

    pub fn is_meta_file(&self, path: &Path) -> bool {
        self.meta_files().iter().any(|meta| meta.path == path)
    }

    /// Wallpaper slot of a directory
    pub fn wallpaper_path(&self, item: &Path) -> PathBuf {
        item.join(MEDIA_DIR).join(WALLPAPER_FILE)
    }

    /// List wallpaper slot of a directory; the ROM home uses the root wallpaper
    pub fn list_wallpaper_path(&self, item: &Path) -> PathBuf {
        if item == self.roms {
            return self.root.join(WALLPAPER_FILE);
        }
        item.join(MEDIA_DIR).join(LIST_WALLPAPER_FILE)
    }

    /// Icon slot of an item shown inside `parent`
    ///
    /// The Tools, Recently Played and Collections entries are redirected to
    /// their meta icons.
    pub fn icon_path(&self, parent: &Path, item: &Path) -> PathBuf {
        let name = item
            .file_name()
            .map(|n| crate::fs::file_stem(&n.to_string_lossy()).to_string())
            .unwrap_or_default();

        let (parent, name) = match name.as_str() {
            TOOLS_DIR | TOOLS_PLATFORM => (self.root.join(TOOLS_DIR), TOOLS_PLATFORM.to_string()),
            RECENTLY_PLAYED_DIR | COLLECTIONS_DIR => (self.root.clone(), name),
            _ => (parent.to_path_buf(), name),
        };

        parent.join(MEDIA_DIR).join(format!("{name}.png"))
    }

    /// Slot path of any media kind for `item` shown inside `parent`
    pub fn slot_path(&self, kind: MediaKind, parent: &Path, item: &Path) -> PathBuf {
        match kind {
            MediaKind::Icon => self.icon_path(parent, item),
            MediaKind::Wallpaper => self.wallpaper_path(item),
            MediaKind::ListWallpaper => self.list_wallpaper_path(item),
        }
    }
}
