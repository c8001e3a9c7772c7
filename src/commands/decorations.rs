//! Decorations command implementation
//!
//! Lists every decoration found on the card, grouped by console or by
//! directory.

use console::Style;

use aesthetics::aggregation::{AggregationMode, Decoration, aggregate};
use aesthetics::classifier::ImageRole;
use aesthetics::error::Result;

use super::Context;
use crate::cli::DecorationsArgs;

pub fn run(mut ctx: Context, args: DecorationsArgs) -> Result<()> {
    let mode = if args.cycle {
        let mode = ctx.config.cycle_aggregation_type();
        ctx.config.save_to(&ctx.config_path)?;
        println!("Default grouping is now {mode}.");
        mode
    } else {
        args.by
            .map_or(ctx.config.decoration_aggregation_type, AggregationMode::from)
    };

    let aggregations = aggregate(&ctx.fs, &ctx.layout);
    if aggregations.is_empty() {
        println!("No decorations found under {}.", ctx.layout.root.display());
        return Ok(());
    }

    println!("Decorations ({}) by {mode}:", aggregations.len());
    for (label, decorations) in aggregations.groups(mode) {
        println!();
        println!("  {}", Style::new().bold().yellow().apply_to(&label));
        for decoration in decorations {
            display_decoration(decoration);
        }
    }

    Ok(())
}

fn display_decoration(decoration: &Decoration) {
    println!(
        "    {} {}",
        decoration.name,
        Style::new().dim().apply_to(format!("[{}]", role_label(decoration.role)))
    );
    println!("      {}", Style::new().dim().apply_to(decoration.path.display()));
}

fn role_label(role: ImageRole) -> &'static str {
    match role {
        ImageRole::Wallpaper => "wallpaper",
        ImageRole::ListWallpaper => "list wallpaper",
        ImageRole::FolderIcon => "icon",
        ImageRole::Artwork => "artwork",
    }
}
