//! Minimal JIRA REST v2 client for availability and credential checks

use crate::error::{Error, Result};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Result of the unauthenticated request against the site root
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SiteStatus {
    Reachable,
    Unavailable(u16),
    Unexpected(u16),
}

/// `GET /rest/api/2/serverInfo` payload
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerInfo {
    pub server_title: Option<String>,
    pub version: Option<String>,
}

/// Result of the server info request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiStatus {
    Available(ServerInfo),
    Unavailable {
        status: u16,
        error_message: Option<String>,
    },
}

/// `GET /rest/api/2/myself` payload
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JiraUser {
    pub display_name: String,
    pub email_address: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ErrorBody {
    error_message: Option<String>,
    #[serde(default)]
    error_messages: Vec<String>,
}

impl ErrorBody {
    fn message(self) -> Option<String> {
        self.error_message
            .or_else(|| (!self.error_messages.is_empty()).then(|| self.error_messages.join("; ")))
    }
}

/// JIRA client bound to one server
pub struct JiraClient {
    client: Client,
    server: Url,
}

impl JiraClient {
    /// Create a client; `timeout` applies to every request
    pub fn new(server: Url, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            server: with_trailing_slash(server),
        })
    }

    pub fn server(&self) -> &Url {
        &self.server
    }

    /// Unauthenticated request against the site root
    pub async fn probe_site(&self) -> Result<SiteStatus> {
        debug!("Probing JIRA site {}", self.server);
        let response = self.client.get(self.server.clone()).send().await?;

        Ok(match response.status() {
            StatusCode::OK => SiteStatus::Reachable,
            StatusCode::NOT_FOUND => SiteStatus::Unavailable(404),
            status => SiteStatus::Unexpected(status.as_u16()),
        })
    }

    /// Unauthenticated request against the server info endpoint
    pub async fn server_info(&self) -> Result<ApiStatus> {
        let url = self.endpoint("rest/api/2/serverInfo")?;
        debug!("Requesting {}", url);
        let response = self.client.get(url).send().await?;

        match response.status() {
            StatusCode::OK => Ok(ApiStatus::Available(response.json().await?)),
            status => {
                let error_message = response
                    .json::<ErrorBody>()
                    .await
                    .ok()
                    .and_then(ErrorBody::message);
                Ok(ApiStatus::Unavailable {
                    status: status.as_u16(),
                    error_message,
                })
            }
        }
    }

    /// Authenticated request for the current user
    pub async fn myself(&self, user_email: &str, api_key: &str) -> Result<JiraUser> {
        let url = self.endpoint("rest/api/2/myself")?;
        debug!("Requesting {} as {}", url, user_email);
        let response = self
            .client
            .get(url)
            .basic_auth(user_email, Some(api_key))
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(response.json().await?);
        }

        let message = response
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(ErrorBody::message)
            .unwrap_or_else(|| status.canonical_reason().unwrap_or("Unknown").to_string());
        Err(Error::HttpStatus {
            status: status.as_u16(),
            message,
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        Ok(self.server.join(path)?)
    }
}

/// `Url::join` replaces the last path segment unless the base ends in `/`
pub(crate) fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}
