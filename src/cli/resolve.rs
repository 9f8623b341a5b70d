//! Configuration resolution for the CLI.
//!
//! Each required setting is taken from its flag, then from the first
//! non-blank environment variable in its chain, then from an interactive
//! prompt. Without a terminal there is no prompt and a missing value is an
//! error.

use std::io::{self, IsTerminal};
use std::time::Duration;

use dialoguer::{Input, Password};
use tracing::debug;

use crate::cli::Cli;
use crate::core::config::Config;
use crate::core::constants::{REPO_ENV_VARS, TOKEN_ENV_VARS};
use crate::core::types::RepoSlug;
use crate::error::{ConfigError, Result};

/// First non-blank value among `names`, as seen by `lookup`.
pub fn first_env<F>(names: &[&str], lookup: F) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    names.iter().find_map(|name| {
        lookup(*name).filter(|v| !v.trim().is_empty()).map(|v| {
            debug!(var = *name, "using value from environment");
            v
        })
    })
}

/// Flag value if non-blank, else the environment chain.
pub fn flag_or_env<F>(flag: Option<&str>, names: &[&str], lookup: F) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    match flag {
        Some(v) if !v.trim().is_empty() => Some(v.to_string()),
        _ => first_env(names, lookup),
    }
}

fn process_env(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

fn interactive() -> bool {
    io::stdin().is_terminal()
}

/// Resolve the access token.
pub fn resolve_token(flag: Option<&str>) -> Result<String> {
    if let Some(token) = flag_or_env(flag, TOKEN_ENV_VARS, process_env) {
        return Ok(token);
    }
    if !interactive() {
        return Err(ConfigError::Missing { field: "token" }.into());
    }

    let token = Password::new()
        .with_prompt("Access token")
        .interact()?;
    Ok(token)
}

/// Resolve and parse the target repository.
pub fn resolve_repo(flag: Option<&str>) -> Result<RepoSlug> {
    let raw = match flag_or_env(flag, REPO_ENV_VARS, process_env) {
        Some(raw) => raw,
        None if interactive() => Input::<String>::new()
            .with_prompt("Repository (OWNER/REPO)")
            .interact_text()?,
        None => return Err(ConfigError::Missing { field: "repository" }.into()),
    };
    Ok(raw.parse::<RepoSlug>()?)
}

/// Build the run configuration from the command line.
///
/// # Errors
///
/// Returns `ConfigError` for a missing or malformed setting, before any
/// entry is read or any request is made.
pub fn resolve_config(cli: &Cli) -> Result<Config> {
    let token = resolve_token(cli.token.as_deref())?;
    let repo = resolve_repo(cli.repo.as_deref())?;

    Config::new(repo, token)?
        .with_api_url(&cli.api_url)?
        .with_timeout(Duration::from_secs(cli.timeout))
}
