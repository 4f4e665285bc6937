//! API key sources
//!
//! The JIRA API key comes either straight from configuration or from
//! Google Cloud Secret Manager's REST API.

use super::client::with_trailing_slash;
use crate::env::EnvSource;
use crate::error::{Error, Result};
use async_trait::async_trait;
use base64::Engine;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Variable holding an OAuth access token for Secret Manager calls
pub const ACCESS_TOKEN_ENV: &str = "GOOGLE_OAUTH_ACCESS_TOKEN";

pub const DEFAULT_SECRET_MANAGER_ENDPOINT: &str = "https://secretmanager.googleapis.com/";

pub const DEFAULT_METADATA_TOKEN_URL: &str =
    "http://metadata.google.internal/computeMetadata/v1/instance/service-accounts/default/token";

/// Somewhere an API key can be read from
#[async_trait]
pub trait SecretSource: Send + Sync {
    /// Where the secret comes from, for report output
    fn describe(&self) -> String;

    async fn fetch(&self) -> Result<String>;
}

/// A key supplied directly, e.g. through `JIRA_API_KEY`
pub struct StaticSecret {
    value: String,
}

impl StaticSecret {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }
}

#[async_trait]
impl SecretSource for StaticSecret {
    fn describe(&self) -> String {
        "environment".to_string()
    }

    async fn fetch(&self) -> Result<String> {
        Ok(self.value.clone())
    }
}

/// Where Secret Manager calls get their bearer token
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenSource {
    Static(String),
    /// GCE/Cloud Run metadata server token endpoint
    MetadataServer(Url),
}

impl TokenSource {
    /// `GOOGLE_OAUTH_ACCESS_TOKEN` when set, the metadata server otherwise
    pub fn from_env<E: EnvSource + ?Sized>(env: &E) -> Result<Self> {
        match env.var(ACCESS_TOKEN_ENV) {
            Some(token) if !token.trim().is_empty() => Ok(Self::Static(token.trim().to_string())),
            _ => Ok(Self::MetadataServer(Url::parse(DEFAULT_METADATA_TOKEN_URL)?)),
        }
    }

    async fn token(&self, client: &Client) -> Result<String> {
        match self {
            Self::Static(token) => Ok(token.clone()),
            Self::MetadataServer(url) => {
                debug!("Requesting access token from {}", url);
                let response = client
                    .get(url.clone())
                    .header("Metadata-Flavor", "Google")
                    .send()
                    .await?;
                if !response.status().is_success() {
                    return Err(Error::Secret(format!(
                        "Metadata server returned HTTP {}",
                        response.status().as_u16()
                    )));
                }
                let body: MetadataToken = response.json().await?;
                Ok(body.access_token)
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct MetadataToken {
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct AccessResponse {
    payload: Payload,
}

#[derive(Debug, Deserialize)]
struct Payload {
    data: String,
}

/// Reads the latest (or a pinned) version of a Secret Manager secret
pub struct SecretManagerSecret {
    client: Client,
    endpoint: Url,
    resource: String,
    token: TokenSource,
}

impl SecretManagerSecret {
    /// `resource` is `projects/{project}/secrets/{secret}` with an optional
    /// `/versions/{version}` suffix; `latest` is used when omitted.
    pub fn new(resource: &str, token: TokenSource, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: Url::parse(DEFAULT_SECRET_MANAGER_ENDPOINT)?,
            resource: normalize_resource(resource)?,
            token,
        })
    }

    /// Point at a different API endpoint
    pub fn with_endpoint(mut self, endpoint: Url) -> Self {
        self.endpoint = with_trailing_slash(endpoint);
        self
    }

    pub fn resource(&self) -> &str {
        &self.resource
    }
}

#[async_trait]
impl SecretSource for SecretManagerSecret {
    fn describe(&self) -> String {
        "Secret Manager".to_string()
    }

    async fn fetch(&self) -> Result<String> {
        let token = self.token.token(&self.client).await?;
        let url = self.endpoint.join(&format!("v1/{}:access", self.resource))?;
        debug!("Accessing secret {}", self.resource);

        let response = self.client.get(url).bearer_auth(token).send().await?;
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(Error::HttpStatus {
                status: status.as_u16(),
                message: message.trim().to_string(),
            });
        }

        let body: AccessResponse = response.json().await?;
        let bytes = base64::engine::general_purpose::STANDARD
            .decode(body.payload.data.as_bytes())
            .map_err(|e| Error::Secret(format!("Secret payload is not valid base64: {}", e)))?;
        String::from_utf8(bytes)
            .map_err(|_| Error::Secret("Secret payload is not valid UTF-8".to_string()))
    }
}

fn normalize_resource(resource: &str) -> Result<String> {
    let resource = resource.trim().trim_matches('/');
    let mut parts = resource.split('/');
    let valid = parts.next() == Some("projects")
        && parts.next().is_some_and(|p| !p.is_empty())
        && parts.next() == Some("secrets")
        && parts.next().is_some_and(|s| !s.is_empty());
    if !valid {
        return Err(Error::Config(format!(
            "Invalid secret name '{}': expected projects/<project>/secrets/<secret>[/versions/<version>]",
            resource
        )));
    }

    match (parts.next(), parts.next(), parts.next()) {
        (None, _, _) => Ok(format!("{}/versions/latest", resource)),
        (Some("versions"), Some(version), None) if !version.is_empty() => Ok(resource.to_string()),
        _ => Err(Error::Config(format!(
            "Invalid secret version in '{}'",
            resource
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::MockEnv;
    use serde_json::json;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_normalize_resource() {
        assert_eq!(
            normalize_resource("projects/123/secrets/JIRA_API_KEY").unwrap(),
            "projects/123/secrets/JIRA_API_KEY/versions/latest"
        );
        assert_eq!(
            normalize_resource("projects/123/secrets/JIRA_API_KEY/versions/4").unwrap(),
            "projects/123/secrets/JIRA_API_KEY/versions/4"
        );
        assert!(normalize_resource("JIRA_API_KEY").is_err());
        assert!(normalize_resource("projects//secrets/x").is_err());
        assert!(normalize_resource("projects/1/secrets/x/versions").is_err());
        assert!(normalize_resource("projects/1/secrets/x/versions/1/extra").is_err());
    }

    #[test]
    fn test_token_source_from_env() {
        let env = MockEnv::new().with_var(ACCESS_TOKEN_ENV, "ya29.token");
        assert_eq!(
            TokenSource::from_env(&env).unwrap(),
            TokenSource::Static("ya29.token".to_string())
        );
        assert!(matches!(
            TokenSource::from_env(&MockEnv::new()).unwrap(),
            TokenSource::MetadataServer(_)
        ));
    }

    #[tokio::test]
    async fn test_static_secret() {
        let secret = StaticSecret::new("abc");
        assert_eq!(secret.fetch().await.unwrap(), "abc");
        assert_eq!(secret.describe(), "environment");
    }

    #[tokio::test]
    async fn test_fetch_decodes_payload() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/projects/42/secrets/JIRA_API_KEY/versions/latest:access"))
            .and(header("authorization", "Bearer tok"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "name": "projects/42/secrets/JIRA_API_KEY/versions/3",
                "payload": {"data": "c2VjcmV0LWtleQ=="}
            })))
            .mount(&server)
            .await;

        let secret = SecretManagerSecret::new(
            "projects/42/secrets/JIRA_API_KEY",
            TokenSource::Static("tok".to_string()),
            Duration::from_secs(5),
        )
        .unwrap()
        .with_endpoint(Url::parse(&server.uri()).unwrap());

        assert_eq!(secret.fetch().await.unwrap(), "secret-key");
    }

    #[tokio::test]
    async fn test_fetch_uses_metadata_token() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/token"))
            .and(header("Metadata-Flavor", "Google"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "access_token": "meta-token",
                "expires_in": 3599,
                "token_type": "Bearer"
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/v1/projects/1/secrets/k/versions/latest:access"))
            .and(header("authorization", "Bearer meta-token"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"payload": {"data": "aGk="}})),
            )
            .mount(&server)
            .await;

        let token_url = Url::parse(&format!("{}/token", server.uri())).unwrap();
        let secret = SecretManagerSecret::new(
            "projects/1/secrets/k",
            TokenSource::MetadataServer(token_url),
            Duration::from_secs(5),
        )
        .unwrap()
        .with_endpoint(Url::parse(&server.uri()).unwrap());

        assert_eq!(secret.fetch().await.unwrap(), "hi");
    }

    #[tokio::test]
    async fn test_fetch_permission_denied() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(403).set_body_string("Permission denied"))
            .mount(&server)
            .await;

        let secret = SecretManagerSecret::new(
            "projects/1/secrets/k",
            TokenSource::Static("tok".to_string()),
            Duration::from_secs(5),
        )
        .unwrap()
        .with_endpoint(Url::parse(&server.uri()).unwrap());

        let err = secret.fetch().await.unwrap_err();
        assert!(matches!(err, Error::HttpStatus { status: 403, .. }));
    }
}
