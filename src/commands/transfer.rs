//! Save, apply and reset commands
//!
//! Thin wrappers that turn flags into [`TransferOptions`] and hand the work
//! to the transfer engine.

use console::Style;

use aesthetics::error::{AestheticsError, Result};
use aesthetics::fs::FileSystem;
use aesthetics::themes::validate_name;
use aesthetics::transfer::{ClearMode, SAVE_PHASE, TransferEngine, TransferOptions, TransferReport};

use super::Context;
use super::prompt::{PromptConfirmer, confirm_action};
use crate::cli::{ApplyArgs, ResetArgs, SaveArgs, TransferArgs};
use crate::progress::ProgressDisplay;

fn options(args: &TransferArgs) -> TransferOptions {
    TransferOptions {
        scope: args.scope.into(),
        confirm_each_file: args.confirm,
        ..TransferOptions::default()
    }
}

/// Run `action` on an engine wired for the terminal
///
/// Per-file confirmation and the spinner do not mix, so a spinner is only
/// shown when no prompts will be asked.
fn with_engine(
    ctx: &Context,
    args: &TransferArgs,
    message: &str,
    action: impl FnOnce(&mut TransferEngine<'_>) -> Result<TransferReport>,
) -> Result<TransferReport> {
    let engine = TransferEngine::new(&ctx.fs, &ctx.layout);

    if args.confirm {
        let mut engine = engine.with_confirmer(PromptConfirmer);
        return action(&mut engine);
    }

    let progress = ProgressDisplay::new(message);
    let mut engine = engine.with_phase_listener(|phase| progress.set_phase(phase));
    let result = action(&mut engine);
    match &result {
        Ok(_) => progress.finish(),
        Err(_) => progress.abandon(),
    }
    result
}

fn print_report(report: &TransferReport) {
    let label = if report.has_failures() {
        Style::new().yellow().bold().apply_to("Finished with failures:")
    } else {
        Style::new().green().bold().apply_to("Done:")
    };
    println!("{label} {report}");
}

pub fn save(ctx: &Context, args: SaveArgs) -> Result<()> {
    let components = ctx.components(None, &args.transfer.components)?;
    let options = options(&args.transfer);

    let report = match args.name.as_deref() {
        Some(name) => {
            validate_name(name)?;
            if ctx.fs.exists(&ctx.layout.themes.join(name)) {
                return Err(AestheticsError::ThemeAlreadyExists {
                    name: name.to_string(),
                });
            }
            with_engine(ctx, &args.transfer, SAVE_PHASE, |engine| {
                engine
                    .save_as(name, &components, &options)
                    .map_err(|e| e.in_phase(SAVE_PHASE, 0))
            })?
        }
        None => with_engine(ctx, &args.transfer, SAVE_PHASE, |engine| {
            engine.run(None, &components, &options)
        })?,
    };

    print_report(&report);
    if let Some(name) = &report.theme_name {
        println!("Saved theme {}", Style::new().bold().cyan().apply_to(name));
    }
    Ok(())
}

pub fn apply(ctx: &Context, args: ApplyArgs) -> Result<()> {
    let theme = ctx.theme_path(&args.theme)?;
    let components = ctx.components(Some(&theme), &args.transfer.components)?;

    if !components.iter().any(|c| c.is_supported) {
        println!("Theme {} has no components to apply.", theme.display());
        return Ok(());
    }

    let prompt = format!("Apply {} to {}?", args.theme, ctx.layout.root.display());
    if !confirm_action(&prompt, args.yes)? {
        println!("Cancelled.");
        return Ok(());
    }

    let options = TransferOptions {
        clear: if args.clear {
            ClearMode::ClearFirst
        } else {
            ClearMode::None
        },
        preserve_existing: args.preserve,
        ..options(&args.transfer)
    };

    let report = with_engine(ctx, &args.transfer, "Applying", |engine| {
        engine.run(Some(&theme), &components, &options)
    })?;

    print_report(&report);
    Ok(())
}

pub fn reset(ctx: &Context, args: ResetArgs) -> Result<()> {
    let components = ctx.components(None, &args.transfer.components)?;
    let options = TransferOptions {
        clear: ClearMode::ClearFirst,
        ..options(&args.transfer)
    };

    let prompt = format!(
        "Remove {} decorations from {}?",
        options.scope,
        ctx.layout.root.display()
    );
    if !confirm_action(&prompt, args.yes)? {
        println!("Cancelled.");
        return Ok(());
    }

    // Clearing without a theme stops after the reset phase
    let report = with_engine(ctx, &args.transfer, "Resetting", |engine| {
        engine.run(None, &components, &options)
    })?;

    print_report(&report);
    Ok(())
}
