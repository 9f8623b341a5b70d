//! ghenv - push secrets and variables to GitHub Actions.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use ghenv::cli::output;
use ghenv::cli::{execute, Cli};
use ghenv::core::constants::LOG_ENV_VAR;
use ghenv::error::{ApiError, ConfigError, Error};

fn main() {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("ghenv=debug")
        } else {
            EnvFilter::new("ghenv=warn")
        }
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();

    if let Err(e) = execute(cli) {
        let suggestion = match &e {
            Error::Config(ConfigError::Missing { field: "token" }) => {
                Some("pass --token or set GITHUB_TOKEN")
            }
            Error::Config(ConfigError::Missing { .. }) | Error::Config(ConfigError::InvalidRepo(_)) => {
                Some("pass --repo OWNER/REPO or set GITHUB_ID")
            }
            Error::Api(ApiError::Unauthorized { .. }) => {
                Some("the token needs write access to Actions secrets and variables")
            }
            Error::Api(ApiError::NotFound(_)) => {
                Some("check the repository name and that the token can see it")
            }
            _ => None,
        };

        output::error(&e.to_string());
        if let Some(hint) = suggestion {
            output::hint(hint);
        }
        std::process::exit(e.exit_code());
    }
}
