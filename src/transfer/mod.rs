//! Theme transfer engine
//!
//! Moves the set of decorations in place on the card into a flat theme
//! package ([`TransferEngine::save`]), back onto the card
//! ([`TransferEngine::apply`]), or removes it ([`TransferEngine::reset`]).
//!
//! Per-file failures never abort a pass; they are tallied in the returned
//! [`TransferReport`]. Only setup failures, such as an unreadable ROM home,
//! surface as errors. [`TransferEngine::run`] sequences the phases of a
//! compound request and tags a failure with the phase it happened in.

use std::collections::BTreeSet;
use std::path::Path;

use chrono::{DateTime, Local};

use crate::catalog::Component;
use crate::classifier::Classifier;
use crate::error::{AestheticsError, Result};
use crate::fs::{FileSystem, RomDirectory};
use crate::layout::{Home, Layout};

mod apply;
mod options;
mod reset;
mod save;
mod walk;


pub use options::{ClearMode, Scope, TransferOptions, TransferReport};

pub const REVERT_PHASE: &str = "Reverting to Defaults";
pub const SAVE_PHASE: &str = "Saving Current Theme";
pub const APPLY_PHASE: &str = "Applying Components";

/// Candidate theme names tried before giving up
const MAX_NAME_ATTEMPTS: usize = 11;

/// Asked before each file when `confirm_each_file` is set
pub trait Confirmer {
    /// `preview` is the image about to be copied or deleted
    fn confirm(&mut self, message: &str, preview: &Path) -> bool;
}

impl<C: Confirmer + ?Sized> Confirmer for &mut C {
    fn confirm(&mut self, message: &str, preview: &Path) -> bool {
        (**self).confirm(message, preview)
    }
}

/// Confirmer that approves everything
#[derive(Debug, Default, Clone, Copy)]
pub struct AlwaysConfirm;

impl Confirmer for AlwaysConfirm {
    fn confirm(&mut self, _message: &str, _preview: &Path) -> bool {
        true
    }
}

pub struct TransferEngine<'a> {
    fs: &'a dyn FileSystem,
    layout: &'a Layout,
    classifier: Classifier<'a>,
    confirmer: Box<dyn Confirmer + 'a>,
    phase_listener: Option<Box<dyn FnMut(&str) + 'a>>,
}

impl<'a> TransferEngine<'a> {
    pub fn new(fs: &'a dyn FileSystem, layout: &'a Layout) -> Self {
        Self {
            fs,
            layout,
            classifier: Classifier::new(fs, layout),
            confirmer: Box::new(AlwaysConfirm),
            phase_listener: None,
        }
    }

    #[must_use]
    pub fn with_confirmer(mut self, confirmer: impl Confirmer + 'a) -> Self {
        self.confirmer = Box::new(confirmer);
        self
    }

    /// Called with the phase label as [`TransferEngine::run`] enters each phase
    #[must_use]
    pub fn with_phase_listener(mut self, listener: impl FnMut(&str) + 'a) -> Self {
        self.phase_listener = Some(Box::new(listener));
        self
    }

    fn enter_phase(&mut self, phase: &str) {
        tracing::debug!(phase, "entering phase");
        if let Some(listener) = self.phase_listener.as_mut() {
            listener(phase);
        }
    }

    /// Run a compound request
    ///
    /// With [`ClearMode::ClearFirst`] the components are reset first. Then,
    /// without a theme, the current decorations are saved as a new theme
    /// (unless the request was clear-only); with a theme, its components are
    /// applied.
    pub fn run(
        &mut self,
        theme: Option<&Path>,
        components: &[Component],
        options: &TransferOptions,
    ) -> Result<TransferReport> {
        let mut report = TransferReport::default();

        if options.clear == ClearMode::ClearFirst {
            self.enter_phase(REVERT_PHASE);
            let reset = self
                .reset(components, options)
                .map_err(|e| e.in_phase(REVERT_PHASE, report.modified))?;
            report.absorb(reset);

            if theme.is_none() {
                return Ok(report);
            }
        }

        match theme {
            None => {
                self.enter_phase(SAVE_PHASE);
                let saved = self
                    .save(components, options)
                    .map_err(|e| e.in_phase(SAVE_PHASE, report.modified))?;
                report.absorb(saved);
            }
            Some(theme) => {
                tracing::info!(theme = %theme.display(), "applying theme");
                self.enter_phase(APPLY_PHASE);
                let applied = self
                    .apply(components, options)
                    .map_err(|e| e.in_phase(APPLY_PHASE, report.modified))?;
                report.absorb(applied);
            }
        }

        Ok(report)
    }

    /// Top-level ROM directories, listed once per operation
    fn rom_directories(&self, scope: Scope) -> Result<Vec<RomDirectory>> {
        self.fs
            .rom_directories(&self.layout.roms, scope == Scope::ActiveOnly)
    }

    fn eligible_names(directories: &[RomDirectory], scope: Scope) -> BTreeSet<String> {
        directories
            .iter()
            .filter(|d| scope.admits(d))
            .map(|d| d.name.clone())
            .collect()
    }

    fn walk<'w>(&'w self, home: Home, eligible: &'w BTreeSet<String>) -> walk::AssetWalk<'w> {
        walk::AssetWalk {
            fs: self.fs,
            classifier: self.classifier,
            home,
            home_dir: self.layout.home_dir(home),
            eligible: home.is_platform_dependent().then_some(eligible),
        }
    }

    /// Copy one file, honoring the confirm gate and, when asked, existing destinations
    fn copy_gated(
        &mut self,
        verb: &str,
        from: &Path,
        to: &Path,
        preserve_existing: bool,
        options: &TransferOptions,
        report: &mut TransferReport,
    ) {
        if options.confirm_each_file {
            if !self.confirmer.confirm(&format!("{verb} {}", short_name(from)), from) {
                report.skipped += 1;
                return;
            }
        } else if preserve_existing && self.fs.exists(to) {
            tracing::debug!(to = %to.display(), "destination exists, preserved");
            report.skipped += 1;
            return;
        }

        match self.fs.copy(from, to) {
            Ok(()) => report.modified += 1,
            Err(e) => {
                tracing::warn!(error = %e, "copy failed");
                report.failed += 1;
            }
        }
    }

    fn delete_gated(&mut self, path: &Path, options: &TransferOptions, report: &mut TransferReport) {
        if options.confirm_each_file
            && !self
                .confirmer
                .confirm(&format!("Delete {}", short_name(path)), path)
        {
            report.skipped += 1;
            return;
        }

        if self.fs.delete(path) {
            report.modified += 1;
        } else {
            tracing::warn!(path = %path.display(), "delete failed");
            report.failed += 1;
        }
    }
}

/// Last two components of a path, e.g. `SystemIcons/(GB).png`
fn short_name(path: &Path) -> String {
    let components: Vec<_> = path
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    components[components.len().saturating_sub(2)..].join("/")
}

/// First free `LocalTheme-<timestamp>` name in the themes directory
pub fn generate_theme_name(fs: &dyn FileSystem, themes_dir: &Path, now: DateTime<Local>) -> Result<String> {
    let base = format!("LocalTheme-{}", now.format("%Y.%m.%d-%H.%M.%S"));

    for attempt in 1..=MAX_NAME_ATTEMPTS {
        let name = if attempt == 1 {
            base.clone()
        } else {
            format!("{base} ({attempt})")
        };
        if !fs.exists(&themes_dir.join(&name)) {
            return Ok(name);
        }
    }

    Err(AestheticsError::ThemeNameExhausted)
}
