//! Live card -> theme package

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use chrono::Local;

use super::{Scope, TransferEngine, TransferOptions, TransferReport, generate_theme_name};
use crate::catalog::{Component, component_name};
use crate::codec::{PlatformDirectories, encode};
use crate::error::Result;
use crate::layout::{Home, MediaKind};

impl TransferEngine<'_> {
    /// Save the supported components into a freshly named theme
    pub fn save(&mut self, components: &[Component], options: &TransferOptions) -> Result<TransferReport> {
        let name = generate_theme_name(self.fs, &self.layout.themes, Local::now())?;
        tracing::info!(theme = %name, "saving current decorations");
        self.save_as(&name, components, options)
    }

    /// Save the supported components into `<themes>/<name>`
    pub fn save_as(
        &mut self,
        name: &str,
        components: &[Component],
        options: &TransferOptions,
    ) -> Result<TransferReport> {
        let theme_dir = self.layout.themes.join(name);
        let mut report = TransferReport {
            theme_name: Some(name.to_string()),
            ..Default::default()
        };

        let saved: Vec<&Component> = components
            .iter()
            .filter(|c| c.is_supported && !c.descriptor.is_duplicate_media_kind)
            .collect();

        // Indices count every live directory sharing a tag, as apply decodes them
        let directories = self.rom_directories(Scope::All)?;
        let eligible = Self::eligible_names(&directories, options.scope);
        let platforms = PlatformDirectories::new(directories);

        for component in saved.iter().filter(|c| c.descriptor.contains_meta_files) {
            for meta in self.layout.meta_files_of(component.descriptor.media_kind) {
                if self.fs.exists(&meta.path) {
                    let to = theme_dir.join(component.name).join(meta.package_name);
                    self.copy_gated("Save", &meta.path, &to, false, options, &mut report);
                }
            }
        }

        let mut kinds_by_home: BTreeMap<Home, BTreeSet<MediaKind>> = BTreeMap::new();
        for component in &saved {
            kinds_by_home
                .entry(component.descriptor.home)
                .or_default()
                .insert(component.descriptor.media_kind);
        }

        for (home, kinds) in kinds_by_home {
            let assets = self.walk(home, &eligible).collect();
            let platforms = home.is_platform_dependent().then_some(&platforms);

            for asset in assets.into_iter().filter(|a| kinds.contains(&a.kind)) {
                if asset.kind != MediaKind::Icon && asset.segments.is_empty() {
                    continue;
                }
                let Some(stem) = encode(&asset.segments, platforms) else {
                    tracing::debug!(path = %asset.path.display(), "no package name, skipped");
                    continue;
                };
                let to = package_file(&theme_dir, home, asset.kind, &stem);
                self.copy_gated("Save", &asset.path, &to, false, options, &mut report);
            }
        }

        tracing::info!(theme = %name, %report, "save finished");
        Ok(report)
    }
}

fn package_file(theme_dir: &Path, home: Home, kind: MediaKind, stem: &str) -> std::path::PathBuf {
    theme_dir
        .join(component_name(home, kind))
        .join(format!("{stem}.png"))
}
