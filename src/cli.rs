//! CLI definitions using clap derive API

use clap::builder::{Styles, styling::AnsiColor};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::ConfigOverrides;

/// pnp-vendorize - copy Plug'n'Play dependencies into a vendor directory
///
/// Reads the "vendorize" block of the current package's package.json and copies the listed
/// packages out of the Yarn PnP store.
#[derive(Parser, Debug)]
#[command(
    name = "pnp-vendorize",
    author,
    version,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Copy Yarn Plug'n'Play dependencies into a plain vendor directory",
    long_about = "pnp-vendorize copies the packages named in the \"vendorize\" block of package.json \
                  out of the Yarn Plug'n'Play store into a plain directory (vendor/ by default), \
                  so they can be committed or shipped without the PnP runtime.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n    \
                  pnp-vendorize\n    \
                  pnp-vendorize run --clean\n    \
                  pnp-vendorize list --transitive\n    \
                  pnp-vendorize -C packages/web run"
)]
pub struct Cli {
    /// Directory to vendorize from (defaults to current directory)
    #[arg(long = "cwd", short = 'C', global = true, value_name = "DIR")]
    pub cwd: Option<PathBuf>,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only report errors
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Defaults to `run`
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Copy the configured packages into the vendor directory
    Run(RunArgs),

    /// Show what would be vendored without touching the filesystem
    List(ListArgs),

    /// Show version information
    Version,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

impl Default for Commands {
    fn default() -> Self {
        Commands::Run(RunArgs::default())
    }
}

/// Arguments for the run command
#[derive(Parser, Debug, Default)]
#[command(after_help = "EXAMPLES:\n  \
                  Vendor what package.json configures:\n    pnp-vendorize run\n\n\
                  Start from an empty vendor directory:\n    pnp-vendorize run --clean\n\n\
                  Vendor into another directory:\n    pnp-vendorize run --dir third_party\n\n\
                  Include dependencies of every configured package:\n    pnp-vendorize run --transitive")]
pub struct RunArgs {
    /// Output directory, overriding "dirName"
    #[arg(long, value_name = "DIR")]
    pub dir: Option<String>,

    /// Remove the output directory first, overriding "cleanBefore"
    #[arg(long)]
    pub clean: bool,

    /// Do not write .gitignore, overriding "gitIgnore"
    #[arg(long)]
    pub no_gitignore: bool,

    /// Vendor transitive dependencies of every configured package
    #[arg(long)]
    pub transitive: bool,
}

impl RunArgs {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            dir_name: self.dir.clone(),
            clean_before: self.clean,
            no_git_ignore: self.no_gitignore,
            transitive: self.transitive,
        }
    }
}

/// Arguments for the list command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  List configured packages:\n    pnp-vendorize list\n\n\
                  Include transitive dependencies:\n    pnp-vendorize list --transitive")]
pub struct ListArgs {
    /// Include transitive dependencies of every configured package
    #[arg(long)]
    pub transitive: bool,
}

impl ListArgs {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            transitive: self.transitive,
            ..ConfigOverrides::default()
        }
    }
}

/// Arguments for completions command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Generate bash completions:\n    pnp-vendorize completions --shell bash > ~/.bash_completion.d/pnp-vendorize\n\n\
                  Generate zsh completions:\n    pnp-vendorize completions --shell zsh > ~/.zfunc/_pnp-vendorize")]
pub struct CompletionsArgs {
    /// Shell type (bash, elvish, fish, powershell, zsh)
    #[arg(long)]
    pub shell: String,
}
