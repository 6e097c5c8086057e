//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "branchline",
    bin_name = "branchline",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Franchise, office and product catalogue",
    long_about = "Branchline keeps a franchise \u{2192} office \u{2192} product hierarchy \
                  consistent: names are unique per kind, children need an existing \
                  parent, and updates cannot change identity.",
    after_help = "EXAMPLES:\n\
        \x20 branchline franchise create --name \"Acme\"\n\
        \x20 branchline office create --name north --franchise 1\n\
        \x20 branchline product create --name widget --stock 10 --office 1\n\
        \x20 branchline product top-stock 1 --output-format json",
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
    /// Manage franchises.
    #[command(
        subcommand,
        visible_alias = "f",
        about = "Manage franchises",
        after_help = "EXAMPLES:\n\
            \x20 branchline franchise create --name acme\n\
            \x20 branchline franchise get 1\n\
            \x20 branchline franchise update 1 --name \"Acme Holdings\"\n\
            \x20 branchline franchise offices 1"
    )]
    Franchise(FranchiseCommands),

    /// Manage offices.
    #[command(
        subcommand,
        visible_alias = "o",
        about = "Manage offices",
        after_help = "EXAMPLES:\n\
            \x20 branchline office create --name north --franchise 1\n\
            \x20 branchline office update 2 --json '{\"id\":2,\"name\":\"north\",\"franchise_id\":1}'"
    )]
    Office(OfficeCommands),

    /// Manage products.
    #[command(
        subcommand,
        visible_alias = "p",
        about = "Manage products",
        after_help = "EXAMPLES:\n\
            \x20 branchline product create --name widget --stock 10 --office 2\n\
            \x20 branchline product delete 3 --yes\n\
            \x20 branchline product top-stock 1"
    )]
    Product(ProductCommands),

    /// Initialise a Branchline configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 branchline init           # global config\n\
            \x20 branchline init --local   # .branchline.toml in CWD"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 branchline completions bash > ~/.local/share/bash-completion/completions/branchline\n\
            \x20 branchline completions zsh  > ~/.zfunc/_branchline"
    )]
    Completions(CompletionsArgs),

    /// Inspect the Branchline configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 branchline config get storage.data_file\n\
            \x20 branchline config list"
    )]
    Config(ConfigCommands),
}

// ── franchise ─────────────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum FranchiseCommands {
    /// Show a franchise and its offices.
    Get {
        #[arg(value_name = "ID")]
        id: i64,
    },
    /// Create a franchise.
    Create(FranchisePayload),
    /// Replace a franchise.
    Update {
        #[arg(value_name = "ID")]
        id: i64,
        #[command(flatten)]
        payload: FranchisePayload,
    },
    /// List the offices of a franchise.
    Offices {
        #[arg(value_name = "ID")]
        id: i64,
    },
}

/// Franchise fields, as flags or as one JSON document.
#[derive(Debug, Args)]
pub struct FranchisePayload {
    #[arg(short = 'n', long = "name", help = "Franchise name")]
    pub name: Option<String>,

    #[arg(
        long = "json",
        value_name = "PAYLOAD",
        conflicts_with = "name",
        help = "Full JSON payload, e.g. '{\"name\":\"acme\"}'"
    )]
    pub json: Option<String>,
}

// ── office ────────────────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum OfficeCommands {
    /// Show an office.
    Get {
        #[arg(value_name = "ID")]
        id: i64,
    },
    /// Create an office under a franchise.
    Create(OfficePayload),
    /// Replace an office.
    Update {
        #[arg(value_name = "ID")]
        id: i64,
        #[command(flatten)]
        payload: OfficePayload,
    },
}

/// Office fields, as flags or as one JSON document.
#[derive(Debug, Args)]
pub struct OfficePayload {
    #[arg(short = 'n', long = "name", help = "Office name")]
    pub name: Option<String>,

    #[arg(
        short = 'f',
        long = "franchise",
        value_name = "ID",
        help = "Owning franchise id"
    )]
    pub franchise_id: Option<i64>,

    #[arg(
        long = "json",
        value_name = "PAYLOAD",
        conflicts_with_all = ["name", "franchise_id"],
        help = "Full JSON payload"
    )]
    pub json: Option<String>,
}

// ── product ───────────────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum ProductCommands {
    /// Show a product.
    Get {
        #[arg(value_name = "ID")]
        id: i64,
    },
    /// Create a product under an office.
    Create(ProductPayload),
    /// Replace a product.
    Update {
        #[arg(value_name = "ID")]
        id: i64,
        #[command(flatten)]
        payload: ProductPayload,
    },
    /// Delete a product.
    Delete {
        #[arg(value_name = "ID")]
        id: i64,

        /// Skip the confirmation prompt.
        #[arg(short = 'y', long = "yes", help = "Delete without asking")]
        yes: bool,
    },
    /// Highest-stock product of each office under a franchise.
    #[command(name = "top-stock")]
    TopStock {
        #[arg(value_name = "FRANCHISE_ID")]
        franchise_id: i64,
    },
}

/// Product fields, as flags or as one JSON document.
#[derive(Debug, Args)]
pub struct ProductPayload {
    #[arg(short = 'n', long = "name", help = "Product name")]
    pub name: Option<String>,

    #[arg(
        short = 's',
        long = "stock",
        allow_negative_numbers = true,
        help = "Units in stock"
    )]
    pub stock: Option<i64>,

    #[arg(
        short = 'o',
        long = "office",
        value_name = "ID",
        help = "Owning office id"
    )]
    pub office_id: Option<i64>,

    #[arg(
        long = "json",
        value_name = "PAYLOAD",
        conflicts_with_all = ["name", "stock", "office_id"],
        help = "Full JSON payload"
    )]
    pub json: Option<String>,
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `branchline init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Write to `.branchline.toml` in the current directory.
    #[arg(
        long = "local",
        help = "Create local configuration in current directory"
    )]
    pub local: bool,

    /// Overwrite an existing config file.
    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `branchline completions`.
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

/// Subcommands for `branchline config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `storage.data_file`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the active configuration file.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────
