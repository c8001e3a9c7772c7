//! CLI definitions using clap derive API

use clap::builder::{Styles, styling::AnsiColor};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use aesthetics::aggregation::AggregationMode;
use aesthetics::layout::MediaKind;
use aesthetics::transfer::Scope;

/// Aesthetics - wallpaper, icon and theme manager
///
/// Save, apply and reset the decorations of a game-launcher SD card.
#[derive(Parser, Debug)]
#[command(
    name = "aesthetics",
    author,
    version,
    color = clap::ColorChoice::Auto,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Wallpaper, icon and theme manager for game-launcher SD cards",
    long_about = "Aesthetics finds the wallpapers and icons decorating an SD card, saves them \
                  into portable theme packages, applies saved or downloaded themes, and resets \
                  the card back to its defaults.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n    \
                  aesthetics decorations --by directory\n    \
                  aesthetics save\n    \
                  aesthetics apply \"Neon Nights\" --clear\n    \
                  aesthetics reset --scope inactive -y\n    \
                  aesthetics themes list"
)]
pub struct Cli {
    /// SD card root (defaults to the configured root, then /mnt/SDCARD)
    #[arg(long, short = 'r', global = true, env = "AESTHETICS_ROOT")]
    pub root: Option<PathBuf>,

    /// Configuration file (defaults to ./config.yml, then the user config directory)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List decorations found on the card
    Decorations(DecorationsArgs),

    /// Show which components the card or a theme provides
    Components(ComponentsArgs),

    /// Save the current decorations as a new theme
    Save(SaveArgs),

    /// Apply a saved or downloaded theme
    Apply(ApplyArgs),

    /// Remove decorations from the card
    Reset(ResetArgs),

    /// Manage saved themes
    #[command(subcommand)]
    Themes(ThemesCommand),

    /// Edit a single decoration
    #[command(subcommand)]
    Decoration(DecorationCommand),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Grouping used by the decorations listing
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum GroupBy {
    Console,
    Directory,
}

impl From<GroupBy> for AggregationMode {
    fn from(by: GroupBy) -> Self {
        match by {
            GroupBy::Console => AggregationMode::Console,
            GroupBy::Directory => AggregationMode::Directory,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ScopeArg {
    #[default]
    All,
    /// Only ROM directories holding files
    Active,
    /// Only empty ROM directories
    Inactive,
}

impl From<ScopeArg> for Scope {
    fn from(scope: ScopeArg) -> Self {
        match scope {
            ScopeArg::All => Scope::All,
            ScopeArg::Active => Scope::ActiveOnly,
            ScopeArg::Inactive => Scope::InactiveOnly,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum KindArg {
    Wallpaper,
    ListWallpaper,
    Icon,
}

impl From<KindArg> for MediaKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Wallpaper => MediaKind::Wallpaper,
            KindArg::ListWallpaper => MediaKind::ListWallpaper,
            KindArg::Icon => MediaKind::Icon,
        }
    }
}

/// Options shared by save, apply and reset
#[derive(Args, Debug, Clone, Default)]
pub struct TransferArgs {
    /// Limit to these components (repeatable; defaults to all present)
    #[arg(long = "component", short = 'c', value_name = "NAME")]
    pub components: Vec<String>,

    /// Which ROM directories take part
    #[arg(long, value_enum, default_value_t = ScopeArg::All)]
    pub scope: ScopeArg,

    /// Ask before each file
    #[arg(long)]
    pub confirm: bool,
}

/// Arguments for the decorations command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  List decorations grouped by console:\n    aesthetics decorations\n\n\
                  Group by directory instead:\n    aesthetics decorations --by directory\n\n\
                  Switch the default grouping and list:\n    aesthetics decorations --cycle")]
pub struct DecorationsArgs {
    /// Grouping to show (defaults to the configured one)
    #[arg(long, value_enum, conflicts_with = "cycle")]
    pub by: Option<GroupBy>,

    /// Switch the configured grouping and save it
    #[arg(long)]
    pub cycle: bool,
}

/// Arguments for the components command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Components present on the card:\n    aesthetics components\n\n\
                  Components of a saved theme:\n    aesthetics components \"Neon Nights\"")]
pub struct ComponentsArgs {
    /// Theme name or path (defaults to the card itself)
    pub theme: Option<String>,
}

/// Arguments for the save command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Save everything:\n    aesthetics save\n\n\
                  Save only system wallpapers under a given name:\n    aesthetics save -c SystemWallpapers --name \"My Walls\"")]
pub struct SaveArgs {
    /// Theme name (defaults to LocalTheme-<timestamp>)
    #[arg(long)]
    pub name: Option<String>,

    #[command(flatten)]
    pub transfer: TransferArgs,
}

/// Arguments for the apply command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Apply a theme:\n    aesthetics apply \"Neon Nights\"\n\n\
                  Clear first, then apply only icons:\n    aesthetics apply \"Neon Nights\" --clear -c SystemIcons\n\n\
                  Keep decorations already on the card:\n    aesthetics apply ./Downloads/Neon --preserve")]
pub struct ApplyArgs {
    /// Theme name or path
    pub theme: String,

    #[command(flatten)]
    pub transfer: TransferArgs,

    /// Reset the selected components before applying
    #[arg(long)]
    pub clear: bool,

    /// Never overwrite decorations already on the card
    #[arg(long)]
    pub preserve: bool,

    /// Skip confirmation prompt
    #[arg(long, short = 'y')]
    pub yes: bool,
}

/// Arguments for the reset command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Remove every decoration:\n    aesthetics reset -y\n\n\
                  Remove decorations of empty ROM directories:\n    aesthetics reset --scope inactive")]
pub struct ResetArgs {
    #[command(flatten)]
    pub transfer: TransferArgs,

    /// Skip confirmation prompt
    #[arg(long, short = 'y')]
    pub yes: bool,
}

#[derive(Subcommand, Debug)]
pub enum ThemesCommand {
    /// List saved and downloaded themes
    List,

    /// Hide or show a theme's preview
    TogglePreview { name: String },

    /// Rename a theme
    Rename { from: String, to: String },

    /// Delete a theme
    Delete {
        name: String,

        /// Skip confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },

    /// Delete components from a theme
    DeleteComponents {
        name: String,

        /// Component to delete (repeatable)
        #[arg(long = "component", short = 'c', value_name = "NAME", required = true)]
        components: Vec<String>,

        /// Skip confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum DecorationCommand {
    /// Copy an image into a directory's decoration slot
    Set {
        #[arg(value_enum)]
        kind: KindArg,
        /// Directory (or collection file) to decorate
        target: PathBuf,
        image: PathBuf,
    },

    /// Remove a directory's decoration
    Clear {
        #[arg(value_enum)]
        kind: KindArg,
        target: PathBuf,

        /// Skip confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },

    /// Delete a discovered decoration file
    Delete {
        path: PathBuf,

        /// Skip confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },
}

/// Arguments for completions command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Generate bash completions:\n    aesthetics completions bash > ~/.bash_completion.d/aesthetics\n\n\
                  Generate zsh completions:\n    aesthetics completions zsh > ~/.zfunc/_aesthetics\n\n\
                  Generate fish completions:\n    aesthetics completions fish > ~/.config/fish/completions/aesthetics.fish")]
pub struct CompletionsArgs {
    /// Shell type (bash, elvish, fish, powershell, zsh)
    pub shell: String,
}
