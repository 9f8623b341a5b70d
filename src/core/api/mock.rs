//! In-memory `RepoApi` double that records every call.

use std::cell::RefCell;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use super::{EncryptedSecret, RemoteVariable, RepoApi};
use crate::core::types::{RepoPublicKey, RepoSlug};
use crate::error::{ApiError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    GetPublicKey,
    PutSecret { name: String, key_id: String },
    ListVariables,
    CreateVariable { name: String, value: String },
    UpdateVariable { name: String, value: String },
}

pub struct MockApi {
    public_key: RepoPublicKey,
    variables: RefCell<Vec<RemoteVariable>>,
    calls: RefCell<Vec<Call>>,
    sealed: RefCell<Vec<String>>,
    fail_key_fetch: bool,
    fail_listing: bool,
    fail_name: Option<String>,
}

impl MockApi {
    /// Mock serving key id `kid1` with 32 zero bytes as key material.
    pub fn new() -> Self {
        Self::with_key(&STANDARD.encode([0u8; 32]))
    }

    pub fn with_key(material: &str) -> Self {
        Self {
            public_key: RepoPublicKey {
                key_id: "kid1".to_string(),
                key: material.to_string(),
            },
            variables: RefCell::new(Vec::new()),
            calls: RefCell::new(Vec::new()),
            sealed: RefCell::new(Vec::new()),
            fail_key_fetch: false,
            fail_listing: false,
            fail_name: None,
        }
    }

    pub fn with_variable(self, name: &str, value: &str) -> Self {
        self.variables.borrow_mut().push(RemoteVariable {
            name: name.to_string(),
            value: value.to_string(),
        });
        self
    }

    pub fn failing_key_fetch(mut self) -> Self {
        self.fail_key_fetch = true;
        self
    }

    pub fn failing_listing(mut self) -> Self {
        self.fail_listing = true;
        self
    }

    /// Reject any mutation that targets `name`.
    pub fn failing_on(mut self, name: &str) -> Self {
        self.fail_name = Some(name.to_string());
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.calls.borrow().iter().filter(|c| pred(c)).count()
    }

    /// Ciphertexts received by `put_secret`, in order.
    pub fn sealed(&self) -> Vec<String> {
        self.sealed.borrow().clone()
    }

    pub fn variable(&self, name: &str) -> Option<String> {
        self.variables
            .borrow()
            .iter()
            .find(|v| v.name == name)
            .map(|v| v.value.clone())
    }

    fn check(&self, name: &str) -> Result<()> {
        if self.fail_name.as_deref() == Some(name) {
            return Err(ApiError::Status {
                status: 422,
                message: format!("rejected {}", name),
            }
            .into());
        }
        Ok(())
    }
}

impl RepoApi for MockApi {
    fn get_public_key(&self, _repo: &RepoSlug) -> Result<RepoPublicKey> {
        self.calls.borrow_mut().push(Call::GetPublicKey);
        if self.fail_key_fetch {
            return Err(ApiError::Unauthorized {
                status: 401,
                message: "Bad credentials".to_string(),
            }
            .into());
        }
        Ok(self.public_key.clone())
    }

    fn put_secret(&self, _repo: &RepoSlug, name: &str, secret: &EncryptedSecret) -> Result<()> {
        self.calls.borrow_mut().push(Call::PutSecret {
            name: name.to_string(),
            key_id: secret.key_id.clone(),
        });
        self.check(name)?;
        self.sealed.borrow_mut().push(secret.encrypted_value.clone());
        Ok(())
    }

    fn list_variables(&self, _repo: &RepoSlug) -> Result<Vec<RemoteVariable>> {
        self.calls.borrow_mut().push(Call::ListVariables);
        if self.fail_listing {
            return Err(ApiError::Status {
                status: 500,
                message: "Server Error".to_string(),
            }
            .into());
        }
        Ok(self.variables.borrow().clone())
    }

    fn create_variable(&self, _repo: &RepoSlug, variable: &RemoteVariable) -> Result<()> {
        self.calls.borrow_mut().push(Call::CreateVariable {
            name: variable.name.clone(),
            value: variable.value.clone(),
        });
        self.check(&variable.name)?;
        self.variables.borrow_mut().push(variable.clone());
        Ok(())
    }

    fn update_variable(&self, _repo: &RepoSlug, variable: &RemoteVariable) -> Result<()> {
        self.calls.borrow_mut().push(Call::UpdateVariable {
            name: variable.name.clone(),
            value: variable.value.clone(),
        });
        self.check(&variable.name)?;
        let mut variables = self.variables.borrow_mut();
        if let Some(existing) = variables
            .iter_mut()
            .find(|v| v.name.eq_ignore_ascii_case(&variable.name))
        {
            existing.value = variable.value.clone();
        }
        Ok(())
    }
}
