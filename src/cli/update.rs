//! Update command.
//!
//! Resolves configuration, gathers entries (single `--name` entry, a state
//! file, or a state document on stdin), and applies them in order.

use std::io::{self, IsTerminal, Read};
use std::path::Path;

use dialoguer::{Input, Password};
use tracing::debug;
use zeroize::Zeroizing;

use crate::cli::{output, resolve, Cli};
use crate::core::api::GithubClient;
use crate::core::state::{load_entries, parse_entries, StateEntry, ValueSource};
use crate::core::updater::StateUpdater;
use crate::core::validation::validate_name;
use crate::error::{Result, StateError};

/// Run the update.
pub fn execute(cli: Cli) -> Result<()> {
    let config = resolve::resolve_config(&cli)?;
    debug!(?config, "configuration resolved");

    output::kv("repository", config.repo());

    let entries = collect_entries(&cli)?;
    if entries.is_empty() {
        output::warn("no entries to apply");
        return Ok(());
    }

    let updater = StateUpdater::from_config(GithubClient::new(&config)?, &config);
    let applied = updater.execute_with(&entries, |entry| output::step(entry.kind(), entry.key()))?;

    output::blank();
    for a in &applied {
        output::dimmed(&format!("  {} {}", a.key, a.outcome));
    }
    output::success(&format!(
        "applied {} {} to {}",
        applied.len(),
        if applied.len() == 1 { "entry" } else { "entries" },
        config.repo()
    ));

    Ok(())
}

/// Gather the entries to apply, in order.
fn collect_entries(cli: &Cli) -> Result<Vec<StateEntry>> {
    if let Some(name) = &cli.name {
        return Ok(vec![single_entry(name, cli)?]);
    }

    match &cli.file {
        Some(path) if path != Path::new("-") => load_entries(path),
        _ => {
            if io::stdin().is_terminal() {
                output::dimmed("paste state JSON, then press Ctrl-D");
            }
            let input = read_stdin("stdin")?;
            parse_entries(&input)
        }
    }
}

/// Build the entry for `--name` mode.
fn single_entry(name: &str, cli: &Cli) -> Result<StateEntry> {
    // Reject a bad name before asking for a value.
    validate_name(name)?;

    let source = if let Some(value) = &cli.value {
        ValueSource::inline(value.clone())
    } else if let Some(path) = &cli.value_file {
        ValueSource::File(path.clone())
    } else if !io::stdin().is_terminal() {
        let mut value = read_stdin("stdin")?;
        strip_trailing_newline(&mut value);
        ValueSource::Inline(value)
    } else if cli.secret {
        let value = Password::new()
            .with_prompt(format!("Value for {}", output::key(name)))
            .allow_empty_password(true)
            .interact()?;
        ValueSource::inline(value)
    } else {
        let value = Input::<String>::new()
            .with_prompt(format!("Value for {}", output::key(name)))
            .allow_empty(true)
            .interact_text()?;
        ValueSource::inline(value)
    };

    StateEntry::new(name, source, cli.secret)
}

fn read_stdin(label: &str) -> Result<Zeroizing<Vec<u8>>> {
    let mut buf = Zeroizing::new(Vec::new());
    io::stdin()
        .read_to_end(&mut buf)
        .map_err(|source| StateError::ReadInput {
            path: label.to_string(),
            source,
        })?;
    debug!(bytes = buf.len(), "read stdin");
    Ok(buf)
}

/// Drop one trailing `\n` or `\r\n`, as left by `echo` or a heredoc.
fn strip_trailing_newline(buf: &mut Vec<u8>) {
    if buf.last() == Some(&b'\n') {
        buf.pop();
        if buf.last() == Some(&b'\r') {
            buf.pop();
        }
    }
}
