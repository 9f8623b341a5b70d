//! ghenv - push secrets and variables to GitHub Actions.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── cli/              # Command-line interface
//! │   ├── output        # Terminal output helpers
//! │   ├── resolve       # Flag/env/prompt resolution into Config
//! │   └── update        # Single-entry and batch update command
//! └── core/             # Core library components
//!     ├── api/          # RepoApi trait + GitHub REST client
//!     ├── cipher/       # Sealed-box encryption
//!     ├── config        # Immutable run configuration
//!     ├── keys          # Public key fetch-once cache
//!     ├── secrets       # Seal + upload
//!     ├── state         # Entries and state-file decoding
//!     ├── variables     # Variable create-or-update
//!     └── updater       # Ordered, fail-fast orchestration
//! ```
//!
//! # Example
//!
//! ```no_run
//! use ghenv::core::api::GithubClient;
//! use ghenv::core::config::Config;
//! use ghenv::core::state::{StateEntry, ValueSource};
//! use ghenv::core::updater::StateUpdater;
//!
//! # fn main() -> ghenv::error::Result<()> {
//! let config = Config::new("octo-org/app".parse()?, "ghp_token")?;
//! let updater = StateUpdater::from_config(GithubClient::new(&config)?, &config);
//! updater.execute(&[
//!     StateEntry::new("API_TOKEN", ValueSource::inline("abc123"), true)?,
//!     StateEntry::new("REGION", ValueSource::inline("us-east-1"), false)?,
//! ])?;
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod core;
pub mod error;
