//! Constants used throughout ghenv.
//!
//! Centralizes endpoint defaults, header values, and environment names.

/// Default GitHub REST API base URL.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Media type requested from the GitHub API.
pub const ACCEPT: &str = "application/vnd.github+json";

/// Pinned GitHub REST API version.
pub const API_VERSION: &str = "2022-11-28";

/// Default per-request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Page size used when listing repository variables (GitHub maximum).
pub const VARIABLES_PER_PAGE: usize = 30;

/// Length of a curve25519 public key in bytes.
pub const PUBLIC_KEY_LEN: usize = 32;

/// Prefix GitHub reserves for its own secret and variable names.
pub const RESERVED_PREFIX: &str = "GITHUB_";

/// Environment variables consulted for the repository, in order.
pub const REPO_ENV_VARS: &[&str] = &["GITHUB_ID", "GITHUB_REPOSITORY"];

/// Environment variables consulted for the access token, in order.
pub const TOKEN_ENV_VARS: &[&str] = &["GITHUB_TOKEN", "GH_TOKEN"];

/// Environment variable holding the tracing filter.
pub const LOG_ENV_VAR: &str = "GHENV_LOG";

/// `User-Agent` sent with every request (GitHub rejects requests without one).
pub fn user_agent() -> String {
    format!("ghenv/{}", env!("CARGO_PKG_VERSION"))
}
