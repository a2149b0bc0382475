//! Blocking HTTP client for the content REST API.
//!
//! | Operation | Request                                   |
//! |-----------|-------------------------------------------|
//! | search    | `GET  {endpoint}/rest/api/content?...`    |
//! | create    | `POST {endpoint}/rest/api/content`        |
//! | update    | `PUT  {endpoint}/rest/api/content/{id}`   |
//!
//! Credentials are sent as HTTP basic auth on every request. A `409` answer
//! to an update is reported as [`StoreError::Conflict`].

use std::time::Duration;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use md2wiki_core::SyncConfig;

use crate::error::StoreError;
use crate::model::{Content, ContentQuery, CreateContent, SearchResults};
use crate::store::ContentStore;

/// Username / password (or API token) pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    fn basic_header(&self) -> String {
        let raw = format!("{}:{}", self.username, self.password);
        format!("Basic {}", STANDARD.encode(raw))
    }
}

/// [`ContentStore`] backed by the wiki's REST API.
pub struct ConfluenceClient {
    agent: ureq::Agent,
    endpoint: String,
    authorization: Option<String>,
}

impl ConfluenceClient {
    pub fn new(endpoint: &str, credentials: Option<Credentials>, timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(timeout).build();
        Self {
            agent,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            authorization: credentials.as_ref().map(Credentials::basic_header),
        }
    }

    /// Endpoint, credentials and timeout taken from `config`.
    ///
    /// Credentials are only sent when a username is configured.
    pub fn from_config(config: &SyncConfig) -> Self {
        let credentials = config.username.as_ref().map(|username| Credentials {
            username: username.clone(),
            password: config.password.clone().unwrap_or_default(),
        });
        Self::new(
            config.endpoint_base(),
            credentials,
            Duration::from_secs(config.timeout_secs),
        )
    }

    fn content_url(&self) -> String {
        format!("{}/rest/api/content", self.endpoint)
    }

    fn request(&self, method: &str, url: &str) -> ureq::Request {
        let request = self
            .agent
            .request(method, url)
            .set("Accept", "application/json");
        match &self.authorization {
            Some(value) => request.set("Authorization", value),
            None => request,
        }
    }
}

impl ContentStore for ConfluenceClient {
    fn search(&self, query: &ContentQuery) -> Result<Vec<Content>, StoreError> {
        let url = self.content_url();
        tracing::debug!(title = %query.title, space = %query.space_key, "GET {url}");

        let limit = query.limit.to_string();
        let mut request = self
            .request("GET", &url)
            .query("title", &query.title)
            .query("spaceKey", &query.space_key.0)
            .query("type", &query.content_type)
            .query("limit", &limit);
        if !query.expand.is_empty() {
            request = request.query("expand", &query.expand.join(","));
        }

        let response = request.call().map_err(into_store_error)?;
        let results: SearchResults = response.into_json()?;
        Ok(results.results)
    }

    fn create(&self, body: &CreateContent) -> Result<Content, StoreError> {
        let url = self.content_url();
        tracing::debug!(title = %body.title, "POST {url}");

        let response = self
            .request("POST", &url)
            .send_json(body)
            .map_err(into_store_error)?;
        Ok(response.into_json()?)
    }

    fn update(&self, content: &Content) -> Result<Content, StoreError> {
        let url = format!("{}/{}", self.content_url(), content.id);
        tracing::debug!(title = %content.title, version = content.version.number, "PUT {url}");

        let response = self
            .request("PUT", &url)
            .send_json(content)
            .map_err(|err| match err {
                ureq::Error::Status(409, _) => StoreError::Conflict {
                    id: content.id.clone(),
                    version: content.version.number,
                },
                other => into_store_error(other),
            })?;
        Ok(response.into_json()?)
    }
}

fn into_store_error(err: ureq::Error) -> StoreError {
    match err {
        ureq::Error::Status(status, response) => StoreError::Status {
            status,
            body: response.into_string().unwrap_or_default(),
        },
        ureq::Error::Transport(transport) => StoreError::Transport(transport.to_string()),
    }
}
