//! Components command implementation

use console::Style;

use aesthetics::error::Result;

use super::Context;
use crate::cli::ComponentsArgs;

pub fn run(ctx: &Context, args: ComponentsArgs) -> Result<()> {
    let theme = args.theme.as_deref().map(|t| ctx.theme_path(t)).transpose()?;
    let components = ctx.components(theme.as_deref(), &[])?;

    match &theme {
        Some(path) => println!("Components of {}:", path.display()),
        None => println!("Components on {}:", ctx.layout.root.display()),
    }
    println!();

    for component in &components {
        // The legacy alias never shows up on the card itself
        if theme.is_none() && component.descriptor.is_duplicate_media_kind {
            continue;
        }
        let mark = if component.is_supported {
            Style::new().green().apply_to("✓")
        } else {
            Style::new().dim().apply_to("·")
        };
        println!("  {mark} {}", component.name);
        for path in &component.matched_paths {
            println!("      {}", Style::new().dim().apply_to(path.display()));
        }
    }

    Ok(())
}
