//! CLI argument parsing via clap.

use clap::{ArgAction, Parser};
use forksweep::build_info;

/// Interactively review and delete your GitHub forks.
#[derive(Debug, Parser)]
#[command(
    name = "forksweep",
    version = build_info::VERSION,
    long_version = build_info::LONG_VERSION,
    after_help = build_info::HELP_BUILD_METADATA
)]
pub struct Args {
    /// Delete every fork without prompting.
    #[arg(short = 'f', long = "force")]
    pub force: bool,

    /// Skip the extra "yes" confirmation for forks with open pull requests.
    #[arg(short = 's', long = "skip-confirmation")]
    pub skip_confirmation: bool,

    /// Path to config file (default: ./forksweep.toml or ~/.config/forksweep/forksweep.toml).
    #[arg(short = 'c', long = "config")]
    pub config: Option<String>,

    /// Disable color output.
    #[arg(long = "no-color")]
    pub no_color: bool,

    /// Disable the progress spinner while fetching.
    #[arg(long = "no-progress")]
    pub no_progress: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    pub verbose: u8,
}
