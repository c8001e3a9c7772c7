//! Transfer options and outcome tallies

use std::fmt;

use crate::fs::RomDirectory;

/// Which top-level ROM directories a transfer may touch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Scope {
    #[default]
    All,
    /// Only directories holding at least one file
    ActiveOnly,
    /// Only directories holding no files
    InactiveOnly,
}

impl Scope {
    pub fn admits(self, directory: &RomDirectory) -> bool {
        match self {
            Scope::All => true,
            Scope::ActiveOnly => directory.is_active(),
            Scope::InactiveOnly => !directory.is_active(),
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Scope::All => "all",
            Scope::ActiveOnly => "active",
            Scope::InactiveOnly => "inactive",
        })
    }
}

/// Whether a compound transfer resets matching components first
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ClearMode {
    #[default]
    None,
    ClearFirst,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransferOptions {
    pub scope: Scope,
    pub clear: ClearMode,
    /// Leave destinations that already exist untouched when applying
    pub preserve_existing: bool,
    /// Ask the confirmer before every single file
    pub confirm_each_file: bool,
}

/// Tally of one transfer
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransferReport {
    pub modified: usize,
    pub failed: usize,
    pub skipped: usize,
    /// Name of the theme written by a save
    pub theme_name: Option<String>,
}

impl TransferReport {
    /// Fold another phase's tally into this one
    pub fn absorb(&mut self, other: TransferReport) {
        self.modified += other.modified;
        self.failed += other.failed;
        self.skipped += other.skipped;
        if other.theme_name.is_some() {
            self.theme_name = other.theme_name;
        }
    }

    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }
}

impl fmt::Display for TransferReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} file(s) modified, {} failed, {} skipped",
            self.modified, self.failed, self.skipped
        )
    }
}
