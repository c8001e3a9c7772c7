//! Interactive confirmations

use std::path::Path;

use inquire::Confirm;

use aesthetics::error::Result;
use aesthetics::transfer::Confirmer;

/// Ask once before a destructive command; `yes` skips the prompt
pub fn confirm_action(message: &str, yes: bool) -> Result<bool> {
    if yes {
        return Ok(true);
    }

    Ok(Confirm::new(message)
        .with_default(true)
        .with_help_message("Press Enter to confirm, or 'n' to cancel")
        .prompt()?)
}

/// Per-file confirmation during a transfer
///
/// A failed prompt counts as "no", so the file is skipped.
pub struct PromptConfirmer;

impl Confirmer for PromptConfirmer {
    fn confirm(&mut self, message: &str, preview: &Path) -> bool {
        let help = format!("Image: {}", preview.display());
        Confirm::new(message)
            .with_default(true)
            .with_help_message(&help)
            .prompt()
            .unwrap_or_else(|e| {
                tracing::warn!(error = %e, "confirmation failed, skipping file");
                false
            })
    }
}
