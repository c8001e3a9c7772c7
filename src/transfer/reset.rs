//! Remove decorations from the live card

use std::collections::{BTreeMap, BTreeSet};

use super::{Scope, TransferEngine, TransferOptions, TransferReport};
use crate::catalog::Component;
use crate::error::Result;
use crate::layout::{Home, MediaKind};

impl TransferEngine<'_> {
    /// Delete every live asset the components resolve to
    ///
    /// Meta singletons and the non-ROM homes have no notion of being
    /// inactive, so a [`Scope::InactiveOnly`] reset leaves them alone.
    pub fn reset(&mut self, components: &[Component], options: &TransferOptions) -> Result<TransferReport> {
        let mut report = TransferReport::default();
        let inactive_only = options.scope == Scope::InactiveOnly;

        let directories = self.rom_directories(options.scope)?;
        let eligible = Self::eligible_names(&directories, options.scope);

        if !inactive_only {
            for component in components.iter().filter(|c| c.descriptor.contains_meta_files) {
                for meta in self.layout.meta_files_of(component.descriptor.media_kind) {
                    if self.fs.exists(&meta.path) {
                        self.delete_gated(&meta.path, options, &mut report);
                    }
                }
            }
        }

        let mut kinds_by_home: BTreeMap<Home, BTreeSet<MediaKind>> = BTreeMap::new();
        for component in components {
            kinds_by_home
                .entry(component.descriptor.home)
                .or_default()
                .insert(component.descriptor.media_kind);
        }

        for (home, kinds) in kinds_by_home {
            if inactive_only && !home.is_platform_dependent() {
                continue;
            }
            let assets = self.walk(home, &eligible).collect();
            for asset in assets.into_iter().filter(|a| kinds.contains(&a.kind)) {
                self.delete_gated(&asset.path, options, &mut report);
            }
        }

        tracing::info!(%report, "reset finished");
        Ok(report)
    }
}
