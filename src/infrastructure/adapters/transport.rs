//! Manager Transport
//!
//! Pushes an archive to a container's HTTP management endpoint. Kept behind a
//! trait so adapters can be exercised without a running container.

use std::fs::File;
use std::path::Path;
use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use url::Url;

use crate::domain::value_objects::Credentials;

/// Default time budget for one upload
pub const DEFAULT_TIMEOUT_SECS: u64 = 300;

/// Environment variable overriding [`DEFAULT_TIMEOUT_SECS`]
pub const TIMEOUT_ENV: &str = "REDEPLOY_HTTP_TIMEOUT_SECS";

/// One upload to a management endpoint
#[derive(Debug)]
pub struct ManagerRequest<'a> {
    pub url: &'a Url,
    pub archive: &'a Path,
    pub credentials: Option<&'a Credentials>,
}

pub trait ManagerTransport: std::fmt::Debug + Send + Sync {
    /// PUT the archive to `request.url` and return the response body.
    ///
    /// Transport failures and non-2xx responses come back as `Err(cause)`.
    fn put_archive(&self, request: &ManagerRequest<'_>) -> Result<String, String>;
}

/// Blocking HTTP transport backed by reqwest
#[derive(Debug, Clone)]
pub struct HttpManagerTransport {
    timeout: Duration,
}

impl HttpManagerTransport {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    /// Transport honouring `REDEPLOY_HTTP_TIMEOUT_SECS`
    pub fn from_env() -> Self {
        let secs = std::env::var(TIMEOUT_ENV)
            .ok()
            .and_then(|v| v.trim().parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);
        Self::new(Duration::from_secs(secs))
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl Default for HttpManagerTransport {
    fn default() -> Self {
        Self::new(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }
}

impl ManagerTransport for HttpManagerTransport {
    fn put_archive(&self, request: &ManagerRequest<'_>) -> Result<String, String> {
        let client = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| format!("failed to build HTTP client: {}", e))?;

        let file = File::open(request.archive)
            .map_err(|e| format!("cannot read {}: {}", request.archive.display(), e))?;

        let mut builder = client
            .put(request.url.clone())
            .header(CONTENT_TYPE, "application/octet-stream")
            .body(file);
        if let Some(credentials) = request.credentials {
            builder = builder.basic_auth(credentials.username(), Some(credentials.password()));
        }

        tracing::debug!(url = %request.url, "uploading archive");
        let response = builder.send().map_err(|e| e.to_string())?;
        let status = response.status();
        let body = response.text().map_err(|e| e.to_string())?;

        if !status.is_success() {
            return Err(format!("HTTP {}: {}", status, first_line(&body)));
        }
        Ok(body)
    }
}

/// First non-blank line of a response body
pub(crate) fn first_line(body: &str) -> &str {
    body.lines()
        .map(str::trim)
        .find(|l| !l.is_empty())
        .unwrap_or("")
}
