//! Decoration discovery and grouping
//!
//! A pass walks every decoration source of a [`Layout`] and files each
//! discovered image twice: once by platform tag and sub-group
//! ([`ConsoleAggregation`]), once by directory nesting
//! ([`DirectoryAggregation`]). Both groupings are sorted by key.

use std::fmt;
use std::str::FromStr;
use std::path::{Path, PathBuf};

use crate::classifier::ImageRole;
use crate::fs::FileSystem;
use crate::layout::Layout;

mod builder;
mod cache;

pub use builder::AggregationBuilder;
pub use cache::DecorationCache;

/// Console bucket used when no platform tag can be found
pub const MISC_TAG: &str = "(misc)";

/// Bucket key of the console grouping, ordered by tag then sub-group
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConsoleKey {
    pub tag: String,
    pub name: String,
}

impl fmt::Display for ConsoleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.name.is_empty() {
            write!(f, "{}", self.tag)
        } else {
            write!(f, "{} {}", self.tag, self.name)
        }
    }
}

/// One discovered decoration image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoration {
    /// Display string, relative to the directory the image decorates
    pub name: String,
    pub path: PathBuf,
    pub role: ImageRole,
    pub console_key: ConsoleKey,
    pub directory_key: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleAggregation {
    pub console_tag: String,
    pub console_name: String,
    pub decorations: Vec<Decoration>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryAggregation {
    pub directory_name: String,
    pub decorations: Vec<Decoration>,
}

/// Result of one aggregation pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Aggregations {
    pub by_console: Vec<ConsoleAggregation>,
    pub by_directory: Vec<DirectoryAggregation>,
}

impl Aggregations {
    /// Number of distinct decorations discovered
    pub fn len(&self) -> usize {
        self.by_directory.iter().map(|d| d.decorations.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.by_directory.is_empty()
    }

    pub fn decorations(&self) -> impl Iterator<Item = &Decoration> {
        self.by_directory.iter().flat_map(|d| d.decorations.iter())
    }

    /// Labelled groups in the order the given mode presents them
    pub fn groups(&self, mode: AggregationMode) -> Vec<(String, &[Decoration])> {
        match mode {
            AggregationMode::Console => self
                .by_console
                .iter()
                .map(|c| {
                    let key = ConsoleKey {
                        tag: c.console_tag.clone(),
                        name: c.console_name.clone(),
                    };
                    (key.to_string(), c.decorations.as_slice())
                })
                .collect(),
            AggregationMode::Directory => self
                .by_directory
                .iter()
                .map(|d| (d.directory_name.clone(), d.decorations.as_slice()))
                .collect(),
        }
    }

    /// Drop a decoration from both groupings, removing buckets left empty
    ///
    /// Returns whether anything was removed.
    pub fn remove(&mut self, path: &Path) -> bool {
        let before = self.len();

        for group in &mut self.by_console {
            group.decorations.retain(|d| d.path != path);
        }
        self.by_console.retain(|g| !g.decorations.is_empty());

        for group in &mut self.by_directory {
            group.decorations.retain(|d| d.path != path);
        }
        self.by_directory.retain(|g| !g.decorations.is_empty());

        self.len() != before
    }
}

/// Which grouping the presentation layer shows
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum AggregationMode {
    #[default]
    Console,
    Directory,
}

impl AggregationMode {
    #[must_use]
    pub fn cycle(self) -> Self {
        match self {
            AggregationMode::Console => AggregationMode::Directory,
            AggregationMode::Directory => AggregationMode::Console,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AggregationMode::Console => "console",
            AggregationMode::Directory => "directory",
        }
    }
}

impl fmt::Display for AggregationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AggregationMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "console" | "0" => Ok(AggregationMode::Console),
            "directory" | "1" => Ok(AggregationMode::Directory),
            other => Err(format!("unknown aggregation type '{other}' (expected console or directory)")),
        }
    }
}

/// Run a full pass over every existing decoration source of the layout
pub fn aggregate(fs: &dyn FileSystem, layout: &Layout) -> Aggregations {
    let mut builder = AggregationBuilder::new(fs, layout);
    for source in layout.decoration_sources() {
        if fs.is_dir(&source.path) {
            builder.scan(&source);
        } else {
            tracing::debug!(source = %source.path.display(), "decoration source missing, skipped");
        }
    }
    builder.build()
}
