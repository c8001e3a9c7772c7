//! Single decoration editing

use std::path::{Path, PathBuf};

use aesthetics::aggregation::DecorationCache;
use aesthetics::decoration::DecorationEditor;
use aesthetics::error::{AestheticsError, Result};

use super::Context;
use super::prompt::confirm_action;
use crate::cli::DecorationCommand;

pub fn run(ctx: &Context, command: DecorationCommand) -> Result<()> {
    let editor = DecorationEditor::new(&ctx.fs, &ctx.layout);

    match command {
        DecorationCommand::Set { kind, target, image } => {
            let slot = editor.set(kind.into(), &on_card(ctx, &target), &image)?;
            println!("Set {}", slot.display());
        }
        DecorationCommand::Clear { kind, target, yes } => {
            let target = on_card(ctx, &target);
            let slot = editor.slot(kind.into(), &target)?;
            if !confirm_action(&format!("Remove {}?", slot.display()), yes)? {
                println!("Cancelled.");
                return Ok(());
            }
            if editor.clear(kind.into(), &target)? {
                println!("Cleared {}", slot.display());
            } else {
                println!("Nothing to clear at {}", slot.display());
            }
        }
        DecorationCommand::Delete { path, yes } => {
            let path = on_card(ctx, &path);
            let mut cache = DecorationCache::new();
            let known = cache
                .get_or_build(&ctx.fs, &ctx.layout)
                .decorations()
                .any(|d| d.path == path);
            if !known {
                return Err(AestheticsError::InvalidDecorationTarget {
                    path: path.display().to_string(),
                });
            }

            if !confirm_action(&format!("Delete {}?", path.display()), yes)? {
                println!("Cancelled.");
                return Ok(());
            }
            editor.delete(&path, &mut cache)?;
            let remaining = cache.get().map_or(0, |a| a.len());
            println!("Deleted {} ({remaining} decorations left)", path.display());
        }
    }

    Ok(())
}

/// Relative paths are taken from the card root
fn on_card(ctx: &Context, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        ctx.layout.root.join(path)
    }
}
