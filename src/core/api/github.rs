//! GitHub REST transport.
//!
//! Blocking `reqwest` client for the repository Actions secrets and
//! variables endpoints. Authentication is a bearer token taken from
//! [`Config`]; the client never inspects it.

use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, trace};

use super::{EncryptedSecret, RemoteVariable, RepoApi};
use crate::core::config::Config;
use crate::core::constants;
use crate::core::types::{RepoPublicKey, RepoSlug};
use crate::error::{ApiError, ConfigError, Result};

/// GitHub API client bound to one base URL and token.
pub struct GithubClient {
    client: Client,
    base_url: String,
}

/// One page of `GET /repos/{owner}/{repo}/actions/variables`.
#[derive(Debug, Deserialize)]
struct VariablesPage {
    total_count: usize,
    #[serde(default)]
    variables: Vec<RemoteVariable>,
}

/// GitHub error body; only `message` is surfaced.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

impl GithubClient {
    /// Build a client from the run configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if the token cannot be sent as a
    /// header, or `ApiError::Transport` if the TLS backend fails to start.
    pub fn new(config: &Config) -> Result<Self> {
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", config.token())).map_err(
            |_| ConfigError::InvalidValue {
                field: "token",
                reason: "contains characters that cannot be sent in a header".to_string(),
            },
        )?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        headers.insert(ACCEPT, HeaderValue::from_static(constants::ACCEPT));
        headers.insert(
            "x-github-api-version",
            HeaderValue::from_static(constants::API_VERSION),
        );

        let client = Client::builder()
            .default_headers(headers)
            .user_agent(constants::user_agent())
            .timeout(config.timeout())
            .build()
            .map_err(|e| ApiError::Transport {
                url: config.api_url().to_string(),
                source: e,
            })?;

        debug!(
            api_url = config.api_url(),
            timeout_secs = config.timeout().as_secs(),
            "github client ready"
        );

        Ok(Self {
            client,
            base_url: config.api_url().to_string(),
        })
    }

    fn actions_url(&self, repo: &RepoSlug, path: &str) -> String {
        format!(
            "{}/repos/{}/{}/actions/{}",
            self.base_url,
            repo.owner(),
            repo.repo(),
            path
        )
    }

    /// Send a request and turn non-2xx answers into `ApiError`.
    fn send(&self, url: &str, request: RequestBuilder) -> Result<Response> {
        let response = request.send().map_err(|e| ApiError::Transport {
            url: url.to_string(),
            source: e,
        })?;

        let status = response.status();
        trace!(url, status = status.as_u16(), "response");

        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().unwrap_or_default();
        Err(status_error(status, &body).into())
    }

    fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let response = self.send(url, self.client.get(url))?;
        response.json::<T>().map_err(|e| {
            ApiError::Decode {
                url: url.to_string(),
                reason: e.to_string(),
            }
            .into()
        })
    }
}

/// Map an unsuccessful status and body onto the error taxonomy.
fn status_error(status: StatusCode, body: &str) -> ApiError {
    let message = serde_json::from_str::<ErrorBody>(body)
        .map(|b| b.message)
        .unwrap_or_else(|_| body.trim().to_string());

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ApiError::Unauthorized {
            status: status.as_u16(),
            message,
        },
        StatusCode::NOT_FOUND => ApiError::NotFound(message),
        _ => ApiError::Status {
            status: status.as_u16(),
            message,
        },
    }
}

impl RepoApi for GithubClient {
    fn get_public_key(&self, repo: &RepoSlug) -> Result<RepoPublicKey> {
        let url = self.actions_url(repo, "secrets/public-key");
        debug!(repo = %repo, "fetching repository public key");
        self.get_json(&url)
    }

    fn put_secret(&self, repo: &RepoSlug, name: &str, secret: &EncryptedSecret) -> Result<()> {
        let url = self.actions_url(repo, &format!("secrets/{}", name));
        debug!(repo = %repo, name, key_id = %secret.key_id, "uploading secret");
        self.send(&url, self.client.put(&url).json(secret))?;
        Ok(())
    }

    fn list_variables(&self, repo: &RepoSlug) -> Result<Vec<RemoteVariable>> {
        let base = self.actions_url(repo, "variables");
        let mut variables = Vec::new();
        let mut page = 1usize;

        loop {
            let url = format!(
                "{}?per_page={}&page={}",
                base,
                constants::VARIABLES_PER_PAGE,
                page
            );
            let body: VariablesPage = self.get_json(&url)?;
            let fetched = body.variables.len();
            variables.extend(body.variables);

            debug!(
                repo = %repo,
                page,
                fetched,
                total = body.total_count,
                "listed variables"
            );

            if fetched < constants::VARIABLES_PER_PAGE || variables.len() >= body.total_count {
                break;
            }
            page += 1;
        }

        Ok(variables)
    }

    fn create_variable(&self, repo: &RepoSlug, variable: &RemoteVariable) -> Result<()> {
        let url = self.actions_url(repo, "variables");
        debug!(repo = %repo, name = %variable.name, "creating variable");
        self.send(&url, self.client.post(&url).json(variable))?;
        Ok(())
    }

    fn update_variable(&self, repo: &RepoSlug, variable: &RemoteVariable) -> Result<()> {
        let url = self.actions_url(repo, &format!("variables/{}", variable.name));
        debug!(repo = %repo, name = %variable.name, "updating variable");
        self.send(&url, self.client.patch(&url).json(variable))?;
        Ok(())
    }
}
