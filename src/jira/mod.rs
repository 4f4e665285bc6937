//! JIRA availability and credential check
//!
//! Three steps, each printed as it runs:
//!
//! 1. unauthenticated request against the site root
//! 2. unauthenticated request against `/rest/api/2/serverInfo`
//! 3. API key retrieval and an authenticated `/rest/api/2/myself` call,
//!    only when the first two show JIRA is up
//!
//! The final [`StatusReport`] maps to the process exit code.

pub mod client;
mod report;
pub mod secrets;

pub use client::{ApiStatus, JiraClient, JiraUser, ServerInfo, SiteStatus};
pub use report::{MESSAGE_RETENTION_DAYS, RETRY_INITIAL_SECS, RETRY_MAX_BACKOFF_SECS};
pub use secrets::{SecretManagerSecret, SecretSource, StaticSecret, TokenSource};

use crate::error::{Error, Result};
use std::io::Write;
use std::time::Duration;
use tracing::{info, warn};
use url::Url;

pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// Text JIRA Cloud returns while a site is down
const SITE_UNAVAILABLE: &str = "Site temporarily unavailable";

/// Longest error excerpt printed for a failed credential check
const ERROR_EXCERPT_CHARS: usize = 100;

/// Where and as whom to check
#[derive(Debug, Clone)]
pub struct JiraSettings {
    pub server: Url,
    pub user_email: Option<String>,
    pub timeout: Duration,
}

impl JiraSettings {
    pub fn new(server: Url) -> Self {
        Self {
            server,
            user_email: None,
            timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }

    pub fn with_user_email(mut self, email: impl Into<String>) -> Self {
        self.user_email = Some(email.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Outcome of a full check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusReport {
    pub available: bool,
    /// `None` when JIRA was down and credentials were not tried
    pub credentials_valid: Option<bool>,
}

impl StatusReport {
    pub fn is_healthy(&self) -> bool {
        self.available && self.credentials_valid == Some(true)
    }

    pub fn exit_code(&self) -> i32 {
        if self.is_healthy() {
            0
        } else {
            1
        }
    }
}

/// Run all steps and print the summary
///
/// Only write failures on `out` are returned as errors; everything else is
/// part of the report.
pub async fn run_status_check<W: Write + ?Sized>(
    settings: &JiraSettings,
    secret: Option<&dyn SecretSource>,
    out: &mut W,
) -> Result<StatusReport> {
    let client = JiraClient::new(settings.server.clone(), settings.timeout)?;

    let available = check_jira_status(&client, out).await?;
    if !available {
        report::unavailable(out)?;
        info!("JIRA at {} is unavailable", settings.server);
        return Ok(StatusReport {
            available,
            credentials_valid: None,
        });
    }

    let credentials_valid =
        check_credentials(&client, settings.user_email.as_deref(), secret, out).await?;
    if credentials_valid {
        report::online_and_valid(out)?;
    } else {
        report::online_but_invalid(out)?;
    }

    Ok(StatusReport {
        available,
        credentials_valid: Some(credentials_valid),
    })
}

/// Steps 1 and 2; true when the API answered
pub async fn check_jira_status<W: Write + ?Sized>(
    client: &JiraClient,
    out: &mut W,
) -> Result<bool> {
    report::header(out)?;

    writeln!(out, "1️⃣  Testing basic connectivity...")?;
    match client.probe_site().await {
        Ok(SiteStatus::Reachable) => {
            writeln!(out, "   ✅ JIRA site is reachable (HTTP 200)")?;
        }
        Ok(SiteStatus::Unavailable(status)) => {
            writeln!(out, "   ❌ JIRA site unavailable (HTTP {})", status)?;
            writeln!(out, "   ⚠️  Error: {}", SITE_UNAVAILABLE)?;
            return Ok(false);
        }
        Ok(SiteStatus::Unexpected(status)) => {
            writeln!(out, "   ⚠️  Unexpected status: HTTP {}", status)?;
        }
        Err(e) => {
            warn!("JIRA connectivity check failed: {}", e);
            writeln!(out, "   ❌ Connection failed: {}", e)?;
            return Ok(false);
        }
    }

    writeln!(out)?;
    writeln!(out, "2️⃣  Testing API endpoint...")?;
    match client.server_info().await {
        Ok(ApiStatus::Available(server_info)) => {
            writeln!(out, "   ✅ JIRA API is accessible (HTTP 200)")?;
            writeln!(
                out,
                "   📊 Server: {}",
                server_info.server_title.as_deref().unwrap_or("N/A")
            )?;
            writeln!(
                out,
                "   🔢 Version: {}",
                server_info.version.as_deref().unwrap_or("N/A")
            )?;
            Ok(true)
        }
        Ok(ApiStatus::Unavailable {
            status,
            error_message,
        }) => {
            writeln!(out, "   ❌ JIRA API unavailable (HTTP {})", status)?;
            if status == 404 {
                writeln!(
                    out,
                    "   ⚠️  Error: {}",
                    error_message.as_deref().unwrap_or("Unknown")
                )?;
            }
            Ok(false)
        }
        Err(Error::Request(e)) if e.is_decode() => {
            warn!("JIRA API returned an unreadable body: {}", e);
            writeln!(out, "   ❌ Unexpected error: {}", e)?;
            Ok(false)
        }
        Err(e) => {
            warn!("JIRA API check failed: {}", e);
            writeln!(out, "   ❌ API connection failed: {}", e)?;
            Ok(false)
        }
    }
}

/// Step 3; true when the authenticated call succeeded
pub async fn check_credentials<W: Write + ?Sized>(
    client: &JiraClient,
    user_email: Option<&str>,
    secret: Option<&dyn SecretSource>,
    out: &mut W,
) -> Result<bool> {
    writeln!(out)?;
    writeln!(out, "3️⃣  Testing JIRA credentials...")?;

    match authenticate(client, user_email, secret, out).await {
        Ok(user) => {
            writeln!(out, "   ✅ Successfully authenticated as: {}", user.display_name)?;
            writeln!(
                out,
                "   📧 Email: {}",
                user.email_address.as_deref().unwrap_or("N/A")
            )?;
            Ok(true)
        }
        Err(Error::Io(e)) => Err(Error::Io(e)),
        Err(e) => {
            warn!("JIRA credential check failed: {}", e);
            writeln!(out, "   ❌ Authentication failed: {}", e.kind())?;
            let text = e.to_string();
            if text.contains(SITE_UNAVAILABLE) {
                writeln!(out, "   ⚠️  JIRA service is down - credentials cannot be tested")?;
            } else {
                writeln!(
                    out,
                    "   ℹ️  Error: {}",
                    report::truncate_chars(&text, ERROR_EXCERPT_CHARS)
                )?;
            }
            Ok(false)
        }
    }
}

async fn authenticate<W: Write + ?Sized>(
    client: &JiraClient,
    user_email: Option<&str>,
    secret: Option<&dyn SecretSource>,
    out: &mut W,
) -> Result<JiraUser> {
    let secret = secret.ok_or_else(|| {
        Error::Config("No API key source configured (set JIRA_API_KEY or --secret)".to_string())
    })?;
    let api_key = secret.fetch().await?;
    writeln!(out, "   ✅ Retrieved API key from {}", secret.describe())?;
    writeln!(out, "   📏 Key length: {} characters", api_key.chars().count())?;

    let user_email = user_email.ok_or_else(|| {
        Error::Config("No JIRA user email configured (set JIRA_USER_EMAIL or --email)".to_string())
    })?;
    client.myself(user_email, &api_key).await
}
