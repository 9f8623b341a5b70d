//! Error types for ghenv.
//!
//! Each domain gets its own enum; [`Error`] wraps them so callers can
//! propagate with `?` and `main` can still tell failures apart.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    State(#[from] StateError),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Cipher(#[from] CipherError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("prompt failed: {0}")]
    Prompt(#[from] dialoguer::Error),
}

impl Error {
    /// Process exit code for this error.
    ///
    /// | code | meaning                              |
    /// |------|--------------------------------------|
    /// | 1    | io / prompt failure                  |
    /// | 2    | bad configuration or key name        |
    /// | 3    | state input or value file unreadable |
    /// | 4    | remote API failure                   |
    /// | 5    | token rejected by the remote API     |
    /// | 6    | public key or sealing failure        |
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Io(_) | Error::Prompt(_) => 1,
            Error::Config(_) | Error::Validation(_) => 2,
            Error::State(_) => 3,
            Error::Api(ApiError::Unauthorized { .. }) => 5,
            Error::Api(_) => 4,
            Error::Cipher(_) => 6,
        }
    }
}

/// Run configuration errors. Raised before any entry is processed.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid repository '{0}': expected OWNER/REPO")]
    InvalidRepo(String),

    #[error("missing {field}: pass it as a flag, set it in the environment, or run interactively")]
    Missing { field: &'static str },

    #[error("invalid {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

/// Secret and variable name validation errors.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("name cannot be empty")]
    EmptyKey,

    #[error("invalid name '{key}': {reason}")]
    InvalidKey { key: String, reason: String },

    #[error("invalid name '{0}': the GITHUB_ prefix is reserved")]
    ReservedPrefix(String),
}

/// Errors reading state input or resolving entry values.
#[derive(Error, Debug)]
pub enum StateError {
    #[error("failed to parse state input: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("failed to read state input {path}: {source}")]
    ReadInput {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read value file for {key} ({}): {source}", path.display())]
    ReadValueFile {
        key: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("value for {0} is not valid UTF-8 (variables must be text)")]
    NonUtf8Value(String),
}

/// Remote API errors.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("access denied ({status}): {message}")]
    Unauthorized { status: u16, message: String },

    #[error("not found: {0}")]
    NotFound(String),

    #[error("unexpected response ({status}): {message}")]
    Status { status: u16, message: String },

    #[error("failed to decode response from {url}: {reason}")]
    Decode { url: String, reason: String },
}

/// Public key decoding and sealing errors.
#[derive(Error, Debug)]
pub enum CipherError {
    #[error("invalid repository public key: {0}")]
    InvalidPublicKey(String),

    #[error("encryption failed: {0}")]
    EncryptionFailed(String),
}

pub type Result<T> = std::result::Result<T, Error>;
