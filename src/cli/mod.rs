//! Command-line interface.

pub mod output;
pub mod resolve;
pub mod update;

use std::path::PathBuf;

use clap::Parser;

use crate::core::constants;

/// ghenv - push secrets and variables to GitHub Actions.
#[derive(Parser, Debug)]
#[command(
    name = "ghenv",
    about = "Push secrets and variables to GitHub Actions",
    version,
    after_help = "Repository falls back to $GITHUB_ID then $GITHUB_REPOSITORY.\n\
                  Token falls back to $GITHUB_TOKEN then $GH_TOKEN.\n\
                  Without --name or --file, a JSON state document is read from stdin."
)]
pub struct Cli {
    /// Target repository as OWNER/REPO
    #[arg(short, long, value_name = "OWNER/REPO")]
    pub repo: Option<String>,

    /// Access token with secrets and variables write access
    #[arg(short, long, visible_alias = "key", value_name = "TOKEN")]
    pub token: Option<String>,

    /// Batch state file (JSON array of {key, value | file, secret}); "-" reads stdin
    #[arg(
        short,
        long,
        value_name = "PATH",
        conflicts_with_all = ["name", "value", "value_file", "secret"]
    )]
    pub file: Option<PathBuf>,

    /// Single-entry mode: secret or variable name
    #[arg(short, long, value_name = "NAME")]
    pub name: Option<String>,

    /// Single-entry value (prompted or read from stdin when omitted)
    #[arg(long, requires = "name", conflicts_with = "value_file")]
    pub value: Option<String>,

    /// Single-entry value read from a file
    #[arg(long, requires = "name", value_name = "PATH")]
    pub value_file: Option<PathBuf>,

    /// Single-entry mode: store as an encrypted secret instead of a variable
    #[arg(short, long, requires = "name")]
    pub secret: bool,

    /// GitHub API base URL
    #[arg(
        long,
        env = "GITHUB_API_URL",
        default_value = constants::DEFAULT_API_URL,
        value_name = "URL"
    )]
    pub api_url: String,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = constants::DEFAULT_TIMEOUT_SECS, value_name = "SECS")]
    pub timeout: u64,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

/// Execute the parsed command line.
pub fn execute(cli: Cli) -> crate::error::Result<()> {
    update::execute(cli)
}
