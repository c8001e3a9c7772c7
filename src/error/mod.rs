//! Error types and handling for Aesthetics
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.
//!
//! Only fatal conditions are represented here. Unreadable branches during a
//! walk and per-file copy/delete failures are logged and tallied by the
//! caller instead of being turned into errors.

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for Aesthetics operations
#[derive(Error, Diagnostic, Debug)]
pub enum AestheticsError {
    // File system errors
    #[error("Failed to list directory: {path}")]
    #[diagnostic(code(aesthetics::fs::list_failed))]
    DirectoryListFailed { path: String, reason: String },

    #[error("Failed to copy '{from}' to '{to}': {reason}")]
    #[diagnostic(code(aesthetics::fs::copy_failed))]
    FileCopyFailed {
        from: String,
        to: String,
        reason: String,
    },

    #[error("Failed to write file: {path}")]
    #[diagnostic(code(aesthetics::fs::write_failed))]
    FileWriteFailed { path: String, reason: String },

    #[error("Failed to delete: {path}")]
    #[diagnostic(code(aesthetics::fs::delete_failed))]
    FileDeleteFailed { path: String },

    #[error("File not found: {path}")]
    #[diagnostic(code(aesthetics::fs::not_found))]
    FileNotFound { path: String },

    #[error("IO error: {message}")]
    #[diagnostic(code(aesthetics::fs::io_error))]
    IoError { message: String },

    // Layout errors
    #[error("Failed to enumerate ROM directories under {path}: {reason}")]
    #[diagnostic(
        code(aesthetics::layout::rom_listing_failed),
        help("Check that the SD card is mounted and the Roms directory is readable")
    )]
    RomListingFailed { path: String, reason: String },

    #[error("Not a decoration target: {path}")]
    #[diagnostic(
        code(aesthetics::layout::invalid_target),
        help("Decorations can only be attached to directories under the SD card root")
    )]
    InvalidDecorationTarget { path: String },

    // Theme errors
    #[error("No valid theme names available")]
    #[diagnostic(
        code(aesthetics::theme::name_exhausted),
        help("Several themes were saved within the same second. Wait a moment and try again")
    )]
    ThemeNameExhausted,

    #[error("Theme '{name}' not found")]
    #[diagnostic(
        code(aesthetics::theme::not_found),
        help("Run 'aesthetics themes list' to see saved themes")
    )]
    ThemeNotFound { name: String },

    #[error("Invalid theme name: '{name}'")]
    #[diagnostic(
        code(aesthetics::theme::invalid_name),
        help("Theme names must be non-empty and must not contain path separators")
    )]
    InvalidThemeName { name: String },

    #[error("Theme '{name}' already exists")]
    #[diagnostic(code(aesthetics::theme::already_exists))]
    ThemeAlreadyExists { name: String },

    #[error("Unknown component: {name}")]
    #[diagnostic(
        code(aesthetics::theme::unknown_component),
        help("Run 'aesthetics components' to see component names")
    )]
    UnknownComponent { name: String },

    // Configuration errors
    #[error("Failed to read configuration file: {path}")]
    #[diagnostic(code(aesthetics::config::read_failed))]
    ConfigReadFailed { path: String, reason: String },

    #[error("Failed to parse configuration file: {path}")]
    #[diagnostic(code(aesthetics::config::parse_failed))]
    ConfigParseFailed { path: String, reason: String },

    // Prompt errors
    #[error("Prompt failed: {message}")]
    #[diagnostic(code(aesthetics::ui::prompt_failed))]
    PromptFailed { message: String },

    // Transfer errors
    #[error("{phase} failed after {modified} file(s) were modified")]
    #[diagnostic(
        code(aesthetics::transfer::phase_failed),
        help("Files modified before the failure are left in place")
    )]
    PhaseFailed {
        phase: String,
        modified: usize,
        #[source]
        source: Box<AestheticsError>,
    },
}

impl AestheticsError {
    /// Wrap this error with the phase label it occurred in.
    #[must_use]
    pub fn in_phase(self, phase: impl Into<String>, modified: usize) -> Self {
        AestheticsError::PhaseFailed {
            phase: phase.into(),
            modified,
            source: Box::new(self),
        }
    }

    /// Phase label for user-facing reporting, if the error carries one.
    pub fn phase(&self) -> Option<&str> {
        match self {
            AestheticsError::PhaseFailed { phase, .. } => Some(phase),
            _ => None,
        }
    }
}

impl From<std::io::Error> for AestheticsError {
    fn from(err: std::io::Error) -> Self {
        AestheticsError::IoError {
            message: err.to_string(),
        }
    }
}

impl From<serde_yaml::Error> for AestheticsError {
    fn from(err: serde_yaml::Error) -> Self {
        AestheticsError::ConfigParseFailed {
            path: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

impl From<inquire::InquireError> for AestheticsError {
    fn from(err: inquire::InquireError) -> Self {
        AestheticsError::PromptFailed {
            message: err.to_string(),
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, AestheticsError>;
