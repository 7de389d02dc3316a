//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use optimus_core::domain::GeneratorKind;

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "optimus",
    bin_name = "optimus",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Generate Optimus modules and page templates",
    long_about = "Optimus renders the back-end and front-end files of a CRUD module \
                  or a page template from a JSON configuration, and wires them into \
                  the existing project through marker comments.",
    after_help = "EXAMPLES:\n\
        \x20 optimus generate module blog-post.json\n\
        \x20 optimus generate page about-us.json --root ../site\n\
        \x20 optimus validate module blog-post.json\n\
        \x20 optimus completions bash > /usr/share/bash-completion/completions/optimus",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate a module or a page template.
    #[command(
        visible_alias = "g",
        subcommand,
        about = "Generate a module or a page template",
        after_help = "EXAMPLES:\n\
            \x20 optimus generate module blog-post.json\n\
            \x20 optimus generate page about-us.json --templates ./templates"
    )]
    Generate(GenerateCommands),

    /// Shorthand for `generate module`.
    #[command(name = "generate:module", about = "Same as `generate module`")]
    GenerateModule(GenerateArgs),

    /// Shorthand for `generate page`.
    #[command(name = "generate:page", about = "Same as `generate page`")]
    GeneratePage(GenerateArgs),

    /// Validate a configuration and print it with defaults applied.
    #[command(
        about = "Validate a configuration file",
        after_help = "EXAMPLES:\n\
            \x20 optimus validate module blog-post.json\n\
            \x20 optimus validate page about-us.json --output-format json"
    )]
    Validate(ValidateArgs),

    /// Show which template sources a generator needs and whether they exist.
    #[command(
        about = "List the template sources of a generator",
        after_help = "EXAMPLES:\n\
            \x20 optimus templates module\n\
            \x20 optimus templates page --templates ./templates"
    )]
    Templates(TemplatesArgs),

    /// Initialise an Optimus configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 optimus init\n\
            \x20 optimus init --force"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 optimus completions bash > ~/.local/share/bash-completion/completions/optimus\n\
            \x20 optimus completions zsh  > ~/.zfunc/_optimus\n\
            \x20 optimus completions fish > ~/.config/fish/completions/optimus.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the Optimus configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 optimus config get templates.root\n\
            \x20 optimus config list\n\
            \x20 optimus config path"
    )]
    Config(ConfigCommands),
}

// ── generate ──────────────────────────────────────────────────────────────────

/// Subcommands for `optimus generate`.
#[derive(Debug, Subcommand)]
pub enum GenerateCommands {
    /// Generate a CRUD module.
    Module(GenerateArgs),
    /// Generate a page template.
    Page(GenerateArgs),
}

impl GenerateCommands {
    pub fn into_parts(self) -> (GeneratorKind, GenerateArgs) {
        match self {
            Self::Module(args) => (GeneratorKind::Module, args),
            Self::Page(args) => (GeneratorKind::Page, args),
        }
    }
}

/// Arguments shared by every generate command.
#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// JSON configuration file describing the module or page.
    #[arg(value_name = "CONFIG", help = "JSON configuration file")]
    pub config: PathBuf,

    /// Templates root directory (overrides `templates.root`).
    #[arg(long = "templates", value_name = "DIR", help = "Templates root directory")]
    pub templates: Option<PathBuf>,

    /// Destination project root (overrides `project.root`).
    #[arg(long = "root", value_name = "DIR", help = "Project root to generate into")]
    pub root: Option<PathBuf>,

    /// Skip the configured formatters.
    #[arg(long = "no-format", help = "Do not run post-processing formatters")]
    pub no_format: bool,
}

// ── validate / templates ──────────────────────────────────────────────────────

/// Arguments for `optimus validate`.
#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Which generator's schema to validate against.
    #[arg(value_enum, help = "Generator kind")]
    pub kind: KindArg,

    /// JSON configuration file.
    #[arg(value_name = "CONFIG", help = "JSON configuration file")]
    pub config: PathBuf,
}

/// Arguments for `optimus templates`.
#[derive(Debug, Args)]
pub struct TemplatesArgs {
    /// Which generator's templates to list.
    #[arg(value_enum, help = "Generator kind")]
    pub kind: KindArg,

    /// Templates root directory (overrides `templates.root`).
    #[arg(long = "templates", value_name = "DIR", help = "Templates root directory")]
    pub templates: Option<PathBuf>,
}

/// Generator selector on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum KindArg {
    Module,
    /// Also accepted as `page-template`.
    #[value(alias = "page-template")]
    Page,
}

impl From<KindArg> for GeneratorKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Module => GeneratorKind::Module,
            KindArg::Page => GeneratorKind::Page,
        }
    }
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `optimus init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Overwrite an existing config file.
    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `optimus completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `optimus config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `templates.root`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the default configuration file.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────
