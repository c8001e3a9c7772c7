//! Command implementations for Aesthetics CLI

use std::path::{Path, PathBuf};

use aesthetics::catalog::{Catalog, Component, select};
use aesthetics::config::Config;
use aesthetics::error::Result;
use aesthetics::fs::LocalFileSystem;
use aesthetics::layout::Layout;
use aesthetics::themes::ThemeLibrary;

pub mod completions;
pub mod components;
pub mod decoration;
pub mod decorations;
pub mod prompt;
pub mod themes;
pub mod transfer;

/// Everything a command needs from the global flags
pub struct Context {
    pub layout: Layout,
    pub config: Config,
    pub config_path: PathBuf,
    pub fs: LocalFileSystem,
}

impl Context {
    pub fn load(root: Option<&Path>, config_file: Option<&Path>) -> Result<Self> {
        let config_path = Config::resolve_path(config_file);
        let config = Config::load_from(&config_path)?;
        let layout = Layout::new(config.sdcard_root(root));

        Ok(Self {
            layout,
            config,
            config_path,
            fs: LocalFileSystem,
        })
    }

    pub fn library(&self) -> ThemeLibrary<'_> {
        ThemeLibrary::new(&self.fs, &self.layout)
    }

    pub fn catalog(&self) -> Catalog<'_> {
        Catalog::new(&self.fs, &self.layout)
    }

    /// A theme given by name, or by path when it names an existing directory
    pub fn theme_path(&self, theme: &str) -> Result<PathBuf> {
        let as_path = Path::new(theme);
        if as_path.components().count() > 1 && as_path.is_dir() {
            return Ok(as_path.to_path_buf());
        }
        Ok(self.library().get(theme)?.path)
    }

    /// Components of the card or a theme, narrowed to `names` when any are given
    pub fn components(&self, theme: Option<&Path>, names: &[String]) -> Result<Vec<Component>> {
        let components = self.catalog().components(theme);
        if names.is_empty() {
            Ok(components)
        } else {
            select(components, names)
        }
    }
}
