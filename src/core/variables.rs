//! Variable create-or-update.
//!
//! GitHub exposes separate create and update endpoints for variables, so
//! the current listing decides which one applies. The check and the write
//! are not atomic; callers that upsert in parallel must serialize per name.

use std::fmt;

use tracing::debug;

use crate::core::api::{RemoteVariable, RepoApi};
use crate::core::types::RepoSlug;
use crate::error::Result;

/// Which branch an upsert took.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upsert {
    Created,
    Updated,
}

impl fmt::Display for Upsert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Upsert::Created => write!(f, "created"),
            Upsert::Updated => write!(f, "updated"),
        }
    }
}

/// Check whether `name` is already defined on the repository.
///
/// GitHub stores names upper-cased, so the comparison ignores ASCII case.
pub fn variable_exists<A: RepoApi + ?Sized>(api: &A, repo: &RepoSlug, name: &str) -> Result<bool> {
    let variables = api.list_variables(repo)?;
    let exists = variables.iter().any(|v| v.name.eq_ignore_ascii_case(name));
    debug!(name, exists, listed = variables.len(), "checked variable");
    Ok(exists)
}

/// Create `name` if it is absent, otherwise update it.
///
/// # Errors
///
/// Listing errors propagate before anything is written; create/update
/// errors propagate unmodified.
pub fn upsert_variable<A: RepoApi + ?Sized>(
    api: &A,
    repo: &RepoSlug,
    name: &str,
    value: &str,
) -> Result<Upsert> {
    let exists = variable_exists(api, repo, name)?;
    let variable = RemoteVariable {
        name: name.to_string(),
        value: value.to_string(),
    };

    if exists {
        api.update_variable(repo, &variable)?;
        Ok(Upsert::Updated)
    } else {
        api.create_variable(repo, &variable)?;
        Ok(Upsert::Created)
    }
}
