//! Package file names for live decorations
//!
//! A live asset's location relative to its home is flattened into one file
//! stem: segments are joined with [`FOLDER_DELIMITER`]. For the ROM home the
//! first segment is reduced to its platform tag, and when several ROM
//! directories share that tag a [`PLATFORM_INDEX_DELIMITER`] and the
//! zero-based position of the source directory are appended.
//!
//! ```text
//! Roms/Super Nintendo (SNES)/Hacks/.media/bg.png  ->  SystemWallpapers/(SNES)`~`Hacks.png
//! Roms/SNES Hacks (SNES)/.media/bg.png            ->  SystemWallpapers/(SNES)`#`1.png
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::classifier::platform_tag;
use crate::fs::RomDirectory;

pub const FOLDER_DELIMITER: &str = "`~`";
pub const PLATFORM_INDEX_DELIMITER: &str = "`#`";

/// Top-level ROM directories grouped by platform tag
///
/// Directories sharing a tag are ordered by name, so indices do not depend
/// on the order the file system happens to list them in.
#[derive(Debug, Clone, Default)]
pub struct PlatformDirectories {
    by_tag: BTreeMap<String, Vec<RomDirectory>>,
}

impl PlatformDirectories {
    /// Group directories by tag; untagged directories are dropped
    pub fn new(directories: impl IntoIterator<Item = RomDirectory>) -> Self {
        let mut by_tag: BTreeMap<String, Vec<RomDirectory>> = BTreeMap::new();
        for directory in directories {
            if let Some(tag) = platform_tag(&directory.name) {
                by_tag.entry(tag.to_string()).or_default().push(directory);
            }
        }
        for group in by_tag.values_mut() {
            group.sort_by(|a, b| a.name.cmp(&b.name));
        }
        Self { by_tag }
    }

    /// Every directory carrying `tag`, in index order
    pub fn sharing(&self, tag: &str) -> &[RomDirectory] {
        self.by_tag.get(tag).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Tag of a directory and its index, present only when the tag is shared
    pub fn disambiguate<'n>(&self, dir_name: &'n str) -> Option<(&'n str, Option<usize>)> {
        let tag = platform_tag(dir_name)?;
        let group = self.sharing(tag);
        let index = if group.len() > 1 {
            group.iter().position(|d| d.name == dir_name)
        } else {
            None
        };
        Some((tag, index))
    }
}

/// Package file stem for a live asset
///
/// `segments` is the asset's directory path relative to its home, plus the
/// icon stem for folder icons. With `platforms` set the first segment must
/// carry a platform tag; untagged paths yield `None`.
pub fn encode(segments: &[String], platforms: Option<&PlatformDirectories>) -> Option<String> {
    let (first, rest) = segments.split_first()?;

    let Some(platforms) = platforms else {
        return Some(segments.join(FOLDER_DELIMITER));
    };

    let (tag, index) = platforms.disambiguate(first)?;
    let mut stem = std::iter::once(tag)
        .chain(rest.iter().map(String::as_str))
        .collect::<Vec<_>>()
        .join(FOLDER_DELIMITER);
    if let Some(index) = index {
        stem.push_str(PLATFORM_INDEX_DELIMITER);
        stem.push_str(&index.to_string());
    }
    Some(stem)
}

/// A package file stem split back into its parts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedName {
    pub segments: Vec<String>,
    pub platform_index: Option<usize>,
}

impl DecodedName {
    /// Bare platform tag of the first segment
    pub fn platform_tag(&self) -> Option<&str> {
        self.segments.first().and_then(|s| platform_tag(s))
    }
}

pub fn decode(stem: &str) -> DecodedName {
    let (body, platform_index) = match stem.rsplit_once(PLATFORM_INDEX_DELIMITER) {
        Some((body, index)) => match index.parse::<usize>() {
            Ok(index) => (body, Some(index)),
            Err(_) => (stem, None),
        },
        None => (stem, None),
    };

    DecodedName {
        segments: body.split(FOLDER_DELIMITER).map(str::to_string).collect(),
        platform_index,
    }
}

/// Live item paths a decoded name refers to
///
/// For the ROM home (`platforms` set) an indexed name selects one directory
/// sharing the tag, an unindexed name fans out to every one of them. An
/// index past the end resolves to nothing.
pub fn resolve(
    decoded: &DecodedName,
    home_dir: &Path,
    platforms: Option<&PlatformDirectories>,
) -> Vec<PathBuf> {
    let Some(platforms) = platforms else {
        return vec![join_segments(home_dir, &decoded.segments)];
    };

    let Some(tag) = decoded.platform_tag() else {
        return Vec::new();
    };
    let rest = decoded.segments.get(1..).unwrap_or_default();
    let group = platforms.sharing(tag);

    let selected: Vec<&RomDirectory> = match decoded.platform_index {
        Some(index) => group.get(index).into_iter().collect(),
        None => group.iter().collect(),
    };

    selected
        .into_iter()
        .map(|directory| join_segments(&home_dir.join(&directory.name), rest))
        .collect()
}

fn join_segments(base: &Path, segments: &[String]) -> PathBuf {
    segments
        .iter()
        .fold(base.to_path_buf(), |path, segment| path.join(segment))
}
