//! Aesthetics - wallpaper, icon and theme manager
//!
//! Command line front end for the decoration engine of a game-launcher
//! SD card.

use clap::Parser;
use miette::Diagnostic;

mod cli;
mod commands;
mod progress;

use aesthetics::error::{AestheticsError, Result};
use cli::{Cli, Commands};
use commands::Context;

fn run(cli: Cli) -> Result<()> {
    let Cli {
        root,
        config,
        verbose,
        command,
    } = cli;

    let command = match command {
        Commands::Completions(args) => return commands::completions::run(args),
        other => other,
    };

    let ctx = Context::load(root.as_deref(), config.as_deref())?;
    aesthetics::logging::init(verbose, &ctx.config.log_level);
    tracing::debug!(root = %ctx.layout.root.display(), config = %ctx.config_path.display(), "starting");

    match command {
        Commands::Decorations(args) => commands::decorations::run(ctx, args),
        Commands::Components(args) => commands::components::run(&ctx, args),
        Commands::Save(args) => commands::transfer::save(&ctx, args),
        Commands::Apply(args) => commands::transfer::apply(&ctx, args),
        Commands::Reset(args) => commands::transfer::reset(&ctx, args),
        Commands::Themes(command) => commands::themes::run(&ctx, command),
        Commands::Decoration(command) => commands::decoration::run(&ctx, command),
        // Handled before the context is loaded
        Commands::Completions(_) => Ok(()),
    }
}

fn report(error: &AestheticsError) {
    eprintln!("Error: {error}");
    let mut source = std::error::Error::source(error);
    while let Some(cause) = source {
        eprintln!("  Caused by: {cause}");
        source = cause.source();
    }
    if let Some(help) = error.help() {
        eprintln!("  Help: {help}");
    }
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        report(&e);
        std::process::exit(1);
    }
}
