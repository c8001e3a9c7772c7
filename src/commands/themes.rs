//! Themes command implementation

use console::Style;

use aesthetics::error::Result;

use super::Context;
use super::prompt::confirm_action;
use crate::cli::ThemesCommand;

pub fn run(ctx: &Context, command: ThemesCommand) -> Result<()> {
    match command {
        ThemesCommand::List => list(ctx),
        ThemesCommand::TogglePreview { name } => {
            let hidden = ctx.library().toggle_hidden(&name)?;
            let state = if hidden { "hidden" } else { "visible" };
            println!("Preview of {name} is now {state}.");
            Ok(())
        }
        ThemesCommand::Rename { from, to } => {
            let theme = ctx.library().rename(&from, &to)?;
            println!("Renamed {from} to {}.", theme.name);
            Ok(())
        }
        ThemesCommand::Delete { name, yes } => {
            if !confirm_action(&format!("Delete theme {name}?"), yes)? {
                println!("Cancelled.");
                return Ok(());
            }
            ctx.library().delete(&name)?;
            println!("Deleted theme {name}.");
            Ok(())
        }
        ThemesCommand::DeleteComponents {
            name,
            components,
            yes,
        } => delete_components(ctx, &name, &components, yes),
    }
}

fn list(ctx: &Context) -> Result<()> {
    let library = ctx.library();
    let themes = library.list()?;

    if themes.is_empty() {
        println!("No themes saved in {}.", library.root().display());
        return Ok(());
    }

    println!("Themes ({}):", themes.len());
    println!();
    for theme in &themes {
        let mut flags = Vec::new();
        if theme.is_hidden {
            flags.push("hidden");
        }
        if !theme.preview_found {
            flags.push("no preview");
        }
        if !theme.contains_theme {
            flags.push("empty");
        }

        let name = Style::new().bold().yellow().apply_to(&theme.name);
        if flags.is_empty() {
            println!("  {name}");
        } else {
            println!("  {name} {}", Style::new().dim().apply_to(format!("({})", flags.join(", "))));
        }
    }

    Ok(())
}

fn delete_components(ctx: &Context, name: &str, names: &[String], yes: bool) -> Result<()> {
    let theme = ctx.library().get(name)?;
    let components = ctx.components(Some(&theme.path), names)?;

    if !components.iter().any(|c| c.is_supported) {
        println!("Theme {name} holds none of those components.");
        return Ok(());
    }

    let prompt = format!("Delete {} from theme {name}?", names.join(", "));
    if !confirm_action(&prompt, yes)? {
        println!("Cancelled.");
        return Ok(());
    }

    let removed = ctx.library().delete_components(name, &components)?;
    println!("Removed {removed} component director{} from {name}.", if removed == 1 { "y" } else { "ies" });
    Ok(())
}
