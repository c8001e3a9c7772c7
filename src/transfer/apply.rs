//! Theme package -> live card

use std::collections::BTreeSet;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use super::{Scope, TransferEngine, TransferOptions, TransferReport};
use crate::catalog::Component;
use crate::classifier::is_preview;
use crate::codec::{PlatformDirectories, decode, resolve};
use crate::error::Result;
use crate::fs::{file_stem, has_png_extension};
use crate::layout::Home;

impl TransferEngine<'_> {
    /// Copy every image of the components' package directories onto the card
    ///
    /// Unindexed ROM assets fan out to every directory sharing their tag.
    /// Assets whose item no longer exists are skipped.
    pub fn apply(&mut self, components: &[Component], options: &TransferOptions) -> Result<TransferReport> {
        let mut report = TransferReport::default();

        let directories = self.rom_directories(Scope::All)?;
        let eligible = Self::eligible_names(&directories, options.scope);
        let platforms = PlatformDirectories::new(directories);

        for component in components {
            for package_dir in &component.matched_paths {
                let files = match self.fs.list(package_dir) {
                    Ok(files) => files,
                    Err(e) => {
                        tracing::warn!(dir = %package_dir.display(), error = %e, "skipping unreadable component directory");
                        continue;
                    }
                };

                for file in files
                    .iter()
                    .filter(|f| !f.is_dir && has_png_extension(&f.name) && !is_preview(&f.name))
                {
                    let source = package_dir.join(&file.name);
                    let destinations = self.destinations(component, &file.name, &platforms, &eligible);
                    if destinations.is_empty() {
                        tracing::debug!(source = %source.display(), "no live target");
                        report.skipped += 1;
                    }
                    for destination in destinations {
                        self.copy_gated(
                            "Apply",
                            &source,
                            &destination,
                            options.preserve_existing,
                            options,
                            &mut report,
                        );
                    }
                }
            }
        }

        tracing::info!(%report, "apply finished");
        Ok(report)
    }

    /// Live slot paths a package file should be copied to
    fn destinations(
        &self,
        component: &Component,
        file_name: &str,
        platforms: &PlatformDirectories,
        eligible: &BTreeSet<String>,
    ) -> Vec<PathBuf> {
        let descriptor = component.descriptor;

        if descriptor.contains_meta_files {
            if let Some(meta) = self
                .layout
                .meta_files_of(descriptor.media_kind)
                .into_iter()
                .find(|meta| meta.package_name == file_name)
            {
                return vec![meta.path];
            }
        }

        let decoded = decode(file_stem(file_name));
        if decoded.segments.iter().any(String::is_empty) {
            return Vec::new();
        }

        let home = descriptor.home;
        let home_dir = self.layout.home_dir(home);
        let platforms = home.is_platform_dependent().then_some(platforms);

        resolve(&decoded, home_dir, platforms)
            .into_iter()
            .filter(|item| !home.is_platform_dependent() || is_under_eligible(item, home_dir, eligible))
            .filter_map(|item| self.existing_item(home, item))
            .filter_map(|item| {
                let parent = item.parent()?.to_path_buf();
                Some(self.layout.slot_path(descriptor.media_kind, &parent, &item))
            })
            .collect()
    }

    /// The item itself, or its `.txt`/`.pak` sibling for collections and tools
    fn existing_item(&self, home: Home, item: PathBuf) -> Option<PathBuf> {
        if self.fs.exists(&item) {
            return Some(item);
        }
        let extension = home.item_extension()?;
        let mut with_extension: OsString = item.into_os_string();
        with_extension.push(format!(".{extension}"));
        let item = PathBuf::from(with_extension);
        self.fs.exists(&item).then_some(item)
    }
}

fn is_under_eligible(item: &Path, home_dir: &Path, eligible: &BTreeSet<String>) -> bool {
    item.strip_prefix(home_dir)
        .ok()
        .and_then(|relative| relative.components().next())
        .is_some_and(|first| eligible.contains(first.as_os_str().to_string_lossy().as_ref()))
}
