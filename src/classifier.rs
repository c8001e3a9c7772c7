//! Path classification: platform tags and the role of decoration images
//!
//! Everything here is pure except [`Classifier`], which fetches the sibling
//! snapshot the folder-icon heuristic needs through a [`FileSystem`].

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::fs::{Entry, FileSystem, file_stem, has_png_extension};
use crate::layout::{
    HIDDEN_PREVIEW_FILE, Home, LIST_WALLPAPER_FILE, Layout, MEDIA_DIR, MediaKind, PREVIEW_FILE,
    WALLPAPER_FILE,
};

#[allow(clippy::expect_used)]
static PLATFORM_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(([^)]+)\)").expect("platform tag pattern is valid"));

/// First parenthesized substring of a path, parentheses included
///
/// ```
/// use aesthetics::classifier::platform_tag;
///
/// assert_eq!(platform_tag("/Roms/Super Nintendo (SNES)"), Some("(SNES)"));
/// assert_eq!(platform_tag("/Roms/(GB) Game Boy (Color)"), Some("(GB)"));
/// assert_eq!(platform_tag("/Roms/Tools"), None);
/// ```
pub fn platform_tag(path: &str) -> Option<&str> {
    PLATFORM_TAG.find(path).map(|m| m.as_str())
}

/// [`platform_tag`] for a path, as an owned string
pub fn platform_tag_of(path: &Path) -> Option<String> {
    platform_tag(&path.to_string_lossy()).map(str::to_string)
}

/// Directory name with its platform tag removed, for display
///
/// Falls back to the raw name when nothing else is left.
pub fn display_name(name: &str) -> String {
    let stripped = match PLATFORM_TAG.find(name) {
        Some(m) => format!("{}{}", &name[..m.start()], &name[m.end()..]),
        None => name.to_string(),
    };
    let collapsed = stripped.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.is_empty() {
        name.to_string()
    } else {
        collapsed
    }
}

pub fn is_preview(file_name: &str) -> bool {
    file_name == PREVIEW_FILE || file_name == HIDDEN_PREVIEW_FILE
}

pub fn is_media_dir(path: &Path) -> bool {
    path.file_name().is_some_and(|n| n == MEDIA_DIR)
}

/// A `.png` that can be a decoration at all (previews never are)
pub fn is_candidate_image(file_name: &str) -> bool {
    has_png_extension(file_name) && !is_preview(file_name)
}

/// What a decoration image stands for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageRole {
    /// `.media/bg.png`
    Wallpaper,
    /// `.media/bglist.png`
    ListWallpaper,
    /// `.media/<name>.png` standing for a self-contained subfolder
    FolderIcon,
    /// Any other image, e.g. screenshots or per-game artwork
    Artwork,
}

impl ImageRole {
    pub fn media_kind(self) -> Option<MediaKind> {
        match self {
            ImageRole::Wallpaper => Some(MediaKind::Wallpaper),
            ImageRole::ListWallpaper => Some(MediaKind::ListWallpaper),
            ImageRole::FolderIcon => Some(MediaKind::Icon),
            ImageRole::Artwork => None,
        }
    }
}

/// Whether an icon's namesake directory holds nothing named after the icon
///
/// `namesake` is the listing of `<media parent>/<icon stem>` when that is a
/// directory, `None` when it does not exist.
pub fn is_self_contained(icon_stem: &str, namesake: Option<&[Entry]>) -> bool {
    let prefix = format!("{icon_stem}.");
    namesake.is_some_and(|entries| !entries.iter().any(|e| e.name.starts_with(&prefix)))
}

/// Folder-icon verdict from an explicit sibling snapshot
///
/// Images under the Tools and Collections homes are always folder icons;
/// under the ROM home they are when the namesake directory is self-contained.
pub fn folder_icon_verdict(home: Option<Home>, icon_stem: &str, namesake: Option<&[Entry]>) -> bool {
    match home {
        Some(Home::Tools | Home::Collections) => true,
        _ => is_self_contained(icon_stem, namesake),
    }
}

/// Classifies images found on disk
#[derive(Clone, Copy)]
pub struct Classifier<'a> {
    fs: &'a dyn FileSystem,
    layout: &'a Layout,
}

impl<'a> Classifier<'a> {
    pub fn new(fs: &'a dyn FileSystem, layout: &'a Layout) -> Self {
        Self { fs, layout }
    }

    pub fn is_meta_file(&self, path: &Path) -> bool {
        self.layout.is_meta_file(path)
    }

    /// Folder-icon check for `file_name` inside `<media_parent>/.media`
    pub fn is_folder_icon(&self, media_parent: &Path, file_name: &str) -> bool {
        let stem = file_stem(file_name);
        let namesake_dir = media_parent.join(stem);
        let namesake = if self.fs.is_dir(&namesake_dir) {
            Some(self.fs.list(&namesake_dir).unwrap_or_default())
        } else {
            None
        };

        folder_icon_verdict(self.layout.home_of(media_parent), stem, namesake.as_deref())
    }

    /// Role of a candidate image inside `dir`, or `None` when it is not a decoration
    ///
    /// Previews and meta singletons are never decorations. `bg.png` and
    /// `bglist.png` inside a `.media` directory bypass the folder-icon check.
    pub fn role(&self, dir: &Path, file_name: &str) -> Option<ImageRole> {
        if !is_candidate_image(file_name) || self.is_meta_file(&dir.join(file_name)) {
            return None;
        }

        if !is_media_dir(dir) {
            return Some(ImageRole::Artwork);
        }

        let role = match file_name {
            WALLPAPER_FILE => ImageRole::Wallpaper,
            LIST_WALLPAPER_FILE => ImageRole::ListWallpaper,
            _ => match dir.parent() {
                Some(media_parent) if self.is_folder_icon(media_parent, file_name) => {
                    ImageRole::FolderIcon
                }
                _ => ImageRole::Artwork,
            },
        };
        Some(role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::LocalFileSystem;
    use crate::test_fixtures::SdCard;

    #[test]
    fn test_platform_tag_first_match_wins() {
        assert_eq!(platform_tag("(SNES) Super Nintendo"), Some("(SNES)"));
        assert_eq!(platform_tag("/a (GB)/b (GBA)"), Some("(GB)"));
        assert_eq!(platform_tag("Ports (PORTS).png"), Some("(PORTS)"));
    }

    #[test]
    fn test_platform_tag_requires_content() {
        assert_eq!(platform_tag("Empty ()"), None);
        assert_eq!(platform_tag("Unclosed (SNES"), None);
        assert_eq!(platform_tag(""), None);
    }

    #[test]
    fn test_platform_tag_of_path() {
        assert_eq!(
            platform_tag_of(Path::new("/sd/Roms/Game Boy (GB)/.media")),
            Some("(GB)".to_string())
        );
    }

    #[test]
    fn test_display_name_strips_tag() {
        assert_eq!(display_name("(SNES) Super Nintendo"), "Super Nintendo");
        assert_eq!(display_name("Super Nintendo (SNES)"), "Super Nintendo");
        assert_eq!(display_name("Hacks"), "Hacks");
        assert_eq!(display_name("(SNES)"), "(SNES)");
    }

    #[test]
    fn test_preview_names() {
        assert!(is_preview("preview.png"));
        assert!(is_preview("hidden.preview.png"));
        assert!(!is_preview("bg.png"));
        assert!(!is_candidate_image("preview.png"));
        assert!(is_candidate_image("bg.png"));
    }

    #[test]
    fn test_self_contained_without_namesake() {
        assert!(!is_self_contained("Hacks", None));
    }

    #[test]
    fn test_self_contained_with_unrelated_children() {
        let entries = vec![Entry::file("rom1.sfc"), Entry::dir("sub")];
        assert!(is_self_contained("Hacks", Some(&entries)));
    }

    #[test]
    fn test_not_self_contained_when_child_shares_name() {
        let entries = vec![Entry::file("Chrono Trigger.sfc")];
        assert!(!is_self_contained("Chrono Trigger", Some(&entries)));
    }

    #[test]
    fn test_verdict_flat_homes_always_icons() {
        assert!(folder_icon_verdict(Some(Home::Tools), "Files", None));
        assert!(folder_icon_verdict(Some(Home::Collections), "Favorites", None));
        assert!(!folder_icon_verdict(Some(Home::Roms), "Hacks", None));
        assert!(!folder_icon_verdict(None, "Hacks", None));
    }

    #[test]
    fn test_role_of_fixed_backgrounds_bypasses_heuristic() {
        let card = SdCard::new();
        card.file("Roms/Super Nintendo (SNES)/.media/bg.png");
        card.file("Roms/Super Nintendo (SNES)/.media/bglist.png");
        card.dir("Roms/Super Nintendo (SNES)/bg");
        let layout = card.layout();
        let classifier = Classifier::new(&LocalFileSystem, &layout);
        let media = layout.roms.join("Super Nintendo (SNES)/.media");

        assert_eq!(classifier.role(&media, "bg.png"), Some(ImageRole::Wallpaper));
        assert_eq!(
            classifier.role(&media, "bglist.png"),
            Some(ImageRole::ListWallpaper)
        );
    }

    #[test]
    fn test_role_folder_icon_vs_game_artwork() {
        let card = SdCard::new();
        card.file("Roms/Super Nintendo (SNES)/Hacks/Super Metroid Redesign.sfc");
        card.file("Roms/Super Nintendo (SNES)/.media/Hacks.png");
        card.file("Roms/Super Nintendo (SNES)/Chrono Trigger/Chrono Trigger.cue");
        card.file("Roms/Super Nintendo (SNES)/.media/Chrono Trigger.png");
        card.file("Roms/Super Nintendo (SNES)/.media/Zelda.png");
        let layout = card.layout();
        let classifier = Classifier::new(&LocalFileSystem, &layout);
        let media = layout.roms.join("Super Nintendo (SNES)/.media");

        assert_eq!(classifier.role(&media, "Hacks.png"), Some(ImageRole::FolderIcon));
        assert_eq!(
            classifier.role(&media, "Chrono Trigger.png"),
            Some(ImageRole::Artwork)
        );
        assert_eq!(classifier.role(&media, "Zelda.png"), Some(ImageRole::Artwork));
    }

    #[test]
    fn test_role_outside_media_is_artwork() {
        let card = SdCard::new();
        card.file("Screenshots/shot.png");
        let layout = card.layout();
        let classifier = Classifier::new(&LocalFileSystem, &layout);

        assert_eq!(
            classifier.role(&layout.screenshots, "shot.png"),
            Some(ImageRole::Artwork)
        );
        assert_eq!(classifier.role(&layout.screenshots, "notes.txt"), None);
        assert_eq!(classifier.role(&layout.screenshots, "preview.png"), None);
    }

    #[test]
    fn test_role_excludes_meta_files() {
        let card = SdCard::new();
        card.file("Collections/.media/bg.png");
        let layout = card.layout();
        let classifier = Classifier::new(&LocalFileSystem, &layout);

        assert_eq!(
            classifier.role(&layout.collections.join(".media"), "bg.png"),
            None
        );
    }

    #[test]
    fn test_collections_images_are_folder_icons() {
        let card = SdCard::new();
        card.file("Collections/Favorites.txt");
        card.file("Collections/.media/Favorites.png");
        let layout = card.layout();
        let classifier = Classifier::new(&LocalFileSystem, &layout);

        assert!(classifier.is_folder_icon(&layout.collections, "Favorites.png"));
    }
}
