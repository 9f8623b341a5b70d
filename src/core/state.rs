//! Batch state entries.
//!
//! A state file is a JSON array of records, applied in order:
//!
//! ```json
//! [
//!   {"key": "API_TOKEN", "value": "abc123", "secret": true},
//!   {"key": "CERT", "file": "./cert.pem", "secret": true},
//!   {"key": "REGION", "value": "us-east-1"}
//! ]
//! ```
//!
//! `secret` defaults to `false`. An inline `value` wins over `file`.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, trace, warn};
use zeroize::Zeroizing;

use crate::core::types::EntryName;
use crate::core::validation::validate_name;
use crate::error::{Result, StateError};

/// Plaintext bytes, wiped on drop.
pub type Plaintext = Zeroizing<Vec<u8>>;

/// Where an entry's value comes from.
pub enum ValueSource {
    /// Value given directly.
    Inline(Plaintext),
    /// Value read from a file when the entry is applied.
    File(PathBuf),
    /// Neither given; applied as an empty string.
    Empty,
}

impl ValueSource {
    pub fn inline(value: impl Into<String>) -> Self {
        ValueSource::Inline(Zeroizing::new(value.into().into_bytes()))
    }
}

impl fmt::Debug for ValueSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueSource::Inline(v) => write!(f, "Inline(<{} bytes>)", v.len()),
            ValueSource::File(p) => f.debug_tuple("File").field(p).finish(),
            ValueSource::Empty => write!(f, "Empty"),
        }
    }
}

/// One key to push, with its value source and kind.
#[derive(Debug)]
pub struct StateEntry {
    key: EntryName,
    source: ValueSource,
    secret: bool,
}

impl StateEntry {
    /// Create an entry after validating its name.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if `key` is not a valid GitHub name.
    pub fn new(key: impl Into<EntryName>, source: ValueSource, secret: bool) -> Result<Self> {
        let key = key.into();
        validate_name(&key)?;
        Ok(Self {
            key,
            source,
            secret,
        })
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn source(&self) -> &ValueSource {
        &self.source
    }

    pub fn is_secret(&self) -> bool {
        self.secret
    }

    /// "secret" or "variable", for display.
    pub fn kind(&self) -> &'static str {
        if self.secret {
            "secret"
        } else {
            "variable"
        }
    }

    /// Produce the effective plaintext.
    ///
    /// An empty value is legitimate; only a failed file read is an error.
    ///
    /// # Errors
    ///
    /// Returns `StateError::ReadValueFile` if the referenced file cannot be read.
    pub fn resolve(&self) -> Result<Plaintext> {
        match &self.source {
            ValueSource::Inline(value) => Ok(value.clone()),
            ValueSource::File(path) => {
                let bytes = std::fs::read(path).map_err(|source| StateError::ReadValueFile {
                    key: self.key.clone(),
                    path: path.clone(),
                    source,
                })?;
                trace!(key = %self.key, len = bytes.len(), "read value file");
                Ok(Zeroizing::new(bytes))
            }
            ValueSource::Empty => Ok(Zeroizing::new(Vec::new())),
        }
    }
}

/// Wire shape of one record.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawEntry {
    key: String,
    #[serde(default)]
    value: Option<String>,
    #[serde(default)]
    file: Option<PathBuf>,
    #[serde(default)]
    secret: bool,
}

impl TryFrom<RawEntry> for StateEntry {
    type Error = crate::error::Error;

    fn try_from(raw: RawEntry) -> Result<Self> {
        let source = match (raw.value, raw.file) {
            (Some(value), file) => {
                if file.is_some() {
                    debug!(key = %raw.key, "both value and file given; using value");
                }
                ValueSource::inline(value)
            }
            (None, Some(path)) => ValueSource::File(path),
            (None, None) => {
                warn!(key = %raw.key, "no value or file given; using empty value");
                ValueSource::Empty
            }
        };
        StateEntry::new(raw.key, source, raw.secret)
    }
}

/// Decode a JSON state document into validated entries, keeping order.
///
/// # Errors
///
/// Returns `StateError::Parse` for malformed JSON or unknown fields, or
/// `ValidationError` for the first invalid name.
pub fn parse_entries(input: &[u8]) -> Result<Vec<StateEntry>> {
    let raw: Vec<RawEntry> = serde_json::from_slice(input).map_err(StateError::Parse)?;
    let entries = raw
        .into_iter()
        .map(StateEntry::try_from)
        .collect::<Result<Vec<_>>>()?;

    debug!(
        entries = entries.len(),
        secrets = entries.iter().filter(|e| e.is_secret()).count(),
        "parsed state"
    );
    Ok(entries)
}

/// Read and decode a state file.
///
/// # Errors
///
/// Returns `StateError::ReadInput` if the file cannot be read, otherwise as
/// [`parse_entries`].
pub fn load_entries(path: &Path) -> Result<Vec<StateEntry>> {
    debug!(path = %path.display(), "loading state file");
    let contents = Zeroizing::new(std::fs::read(path).map_err(|source| StateError::ReadInput {
        path: path.display().to_string(),
        source,
    })?);
    parse_entries(&contents)
}
