//! Tomcat Manager Adapters
//!
//! Tomcat 6.x through 9.x, deploying through the manager application's text
//! interface: `PUT {url}{manager_context}/deploy?path=/ctx&update=true`.
//! The manager answers `OK - ...` or `FAIL - ...` in the body.
//!
//! `update=true` makes a repeated deploy to the same context replace the
//! previous one.

use std::sync::Arc;

use url::Url;

use crate::domain::entities::Archive;
use crate::domain::ports::{
    AdapterSettings, ContainerAdapter, DeployContract, DeployEvent, ExecutionContext, Redeploy,
};
use crate::domain::value_objects::ContextPath;
use crate::error::{ConfigurationError, DeploymentError};

use super::registry::{AdapterDescriptor, FieldSpec};
use super::settings::{settings_of, SettingsReader};
use super::transport::{first_line, HttpManagerTransport, ManagerRequest, ManagerTransport};

const TOMCAT6_FIELDS: &[FieldSpec] = &[
    FieldSpec::required("url", "url"),
    FieldSpec::with_default("manager_context", "managerContext", "/manager"),
    FieldSpec::optional("credentials_id", "credentialsId"),
];

const TOMCAT_TEXT_FIELDS: &[FieldSpec] = &[
    FieldSpec::required("url", "url"),
    FieldSpec::with_default("manager_context", "managerContext", "/manager/text"),
    FieldSpec::optional("credentials_id", "credentialsId"),
];

/// Supported Tomcat generations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TomcatVersion {
    V6,
    V7,
    V8,
    V9,
}

impl TomcatVersion {
    pub const ALL: [TomcatVersion; 4] = [
        TomcatVersion::V6,
        TomcatVersion::V7,
        TomcatVersion::V8,
        TomcatVersion::V9,
    ];

    pub fn container_id(&self) -> &'static str {
        match self {
            TomcatVersion::V6 => "tomcat6x",
            TomcatVersion::V7 => "tomcat7x",
            TomcatVersion::V8 => "tomcat8x",
            TomcatVersion::V9 => "tomcat9x",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            TomcatVersion::V6 => "tomcat6",
            TomcatVersion::V7 => "tomcat7",
            TomcatVersion::V8 => "tomcat8",
            TomcatVersion::V9 => "tomcat9",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            TomcatVersion::V6 => "Tomcat 6.x",
            TomcatVersion::V7 => "Tomcat 7.x",
            TomcatVersion::V8 => "Tomcat 8.x",
            TomcatVersion::V9 => "Tomcat 9.x",
        }
    }

    /// Tomcat 7 moved the scriptable manager under `/manager/text`
    pub fn default_manager_context(&self) -> &'static str {
        match self {
            TomcatVersion::V6 => "/manager",
            _ => "/manager/text",
        }
    }

    fn fields(&self) -> &'static [FieldSpec] {
        match self {
            TomcatVersion::V6 => TOMCAT6_FIELDS,
            _ => TOMCAT_TEXT_FIELDS,
        }
    }

    pub(crate) fn descriptor(&self) -> AdapterDescriptor {
        AdapterDescriptor {
            id: self.container_id(),
            symbol: self.symbol(),
            display_name: self.display_name(),
            fields: self.fields(),
            constructor: match self {
                TomcatVersion::V6 => |s: &AdapterSettings| build(TomcatVersion::V6, s),
                TomcatVersion::V7 => |s: &AdapterSettings| build(TomcatVersion::V7, s),
                TomcatVersion::V8 => |s: &AdapterSettings| build(TomcatVersion::V8, s),
                TomcatVersion::V9 => |s: &AdapterSettings| build(TomcatVersion::V9, s),
            },
        }
    }
}

fn build(
    version: TomcatVersion,
    settings: &AdapterSettings,
) -> Result<Arc<dyn ContainerAdapter>, ConfigurationError> {
    Ok(Arc::new(TomcatManagerAdapter::from_settings(version, settings)?))
}

/// Deploys through a remote Tomcat manager
#[derive(Debug, Clone)]
pub struct TomcatManagerAdapter {
    version: TomcatVersion,
    url: String,
    manager_context: String,
    credentials_id: Option<String>,
    transport: Arc<dyn ManagerTransport>,
}

impl TomcatManagerAdapter {
    /// Validate and build an adapter.
    ///
    /// `url` must be an absolute http(s) URL; the manager context defaults per version.
    pub fn new(
        version: TomcatVersion,
        url: &str,
        manager_context: Option<&str>,
        credentials_id: Option<&str>,
    ) -> Result<Self, ConfigurationError> {
        let settings = settings_of([
            ("url", Some(url)),
            ("manager_context", manager_context),
            ("credentials_id", credentials_id),
        ]);
        Self::from_settings(version, &settings)
    }

    pub fn from_settings(
        version: TomcatVersion,
        settings: &AdapterSettings,
    ) -> Result<Self, ConfigurationError> {
        let id = version.container_id();
        let reader = SettingsReader::new(id, settings);

        let url = reader.required("url")?;
        let parsed = Url::parse(&url).map_err(|e| ConfigurationError::invalid(id, "url", e.to_string()))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConfigurationError::invalid(
                id,
                "url",
                format!("unsupported scheme '{}'", parsed.scheme()),
            ));
        }

        if settings.contains_key("manager_context") && reader.optional("manager_context").is_none() {
            return Err(ConfigurationError::invalid(id, "manager_context", "must not be empty"));
        }
        let manager_context = reader.or_default("manager_context", version.default_manager_context());
        if !manager_context.starts_with('/') {
            return Err(ConfigurationError::invalid(
                id,
                "manager_context",
                "must start with '/'",
            ));
        }
        let manager_context = manager_context.trim_end_matches('/');
        if manager_context.is_empty() {
            return Err(ConfigurationError::invalid(
                id,
                "manager_context",
                "must name the manager application, not '/'",
            ));
        }

        Ok(Self {
            version,
            url,
            manager_context: manager_context.to_string(),
            credentials_id: reader.optional("credentials_id"),
            transport: Arc::new(HttpManagerTransport::from_env()),
        })
    }

    /// Swap the transport (tests, proxies)
    pub fn with_transport(mut self, transport: Arc<dyn ManagerTransport>) -> Self {
        self.transport = transport;
        self
    }

    /// Manager endpoint for deploying under `context_path`
    pub fn deploy_url(&self, context_path: &ContextPath) -> Result<Url, url::ParseError> {
        let mut url = Url::parse(&format!(
            "{}{}/deploy",
            self.url.trim_end_matches('/'),
            self.manager_context
        ))?;
        url.query_pairs_mut()
            .append_pair("path", &context_path.manager_path())
            .append_pair("update", "true");
        Ok(url)
    }

    fn failure(&self, cause: impl Into<String>) -> DeploymentError {
        DeploymentError::new(self.container_id(), self.describe(), cause)
    }
}

impl ContainerAdapter for TomcatManagerAdapter {
    fn container_id(&self) -> &'static str {
        self.version.container_id()
    }

    fn describe(&self) -> String {
        format!(
            "{} at {}{}",
            self.version.display_name(),
            self.url.trim_end_matches('/'),
            self.manager_context
        )
    }

    fn settings(&self) -> AdapterSettings {
        settings_of([
            ("url", Some(self.url.as_str())),
            ("manager_context", Some(self.manager_context.as_str())),
            ("credentials_id", self.credentials_id.as_deref()),
        ])
    }

    fn contract(&self) -> DeployContract<'_> {
        DeployContract::Modern(self)
    }
}

impl Redeploy for TomcatManagerAdapter {
    fn redeploy(
        &self,
        archive: &Archive,
        context_path: &ContextPath,
        ctx: &ExecutionContext,
    ) -> Result<(), DeploymentError> {
        let credentials = match &self.credentials_id {
            Some(id) => Some(
                ctx.credentials(id)
                    .ok_or_else(|| self.failure(format!("credentials '{}' not found", id)))?,
            ),
            None => None,
        };

        let url = self
            .deploy_url(context_path)
            .map_err(|e| self.failure(format!("invalid manager URL: {}", e)))?;

        ctx.emit(DeployEvent::AdapterMessage {
            adapter: self.container_id().to_string(),
            message: format!("Uploading {} to {}", archive.file_name(), url),
        });

        let body = self
            .transport
            .put_archive(&ManagerRequest {
                url: &url,
                archive: archive.path(),
                credentials: credentials.as_ref(),
            })
            .map_err(|cause| self.failure(cause))?;

        check_manager_response(&body).map_err(|cause| self.failure(cause))
    }
}

/// The text manager reports success with a leading `OK`
fn check_manager_response(body: &str) -> Result<(), String> {
    let line = first_line(body);
    if line.starts_with("OK") {
        Ok(())
    } else if line.is_empty() {
        Err("empty response from manager".to_string())
    } else {
        Err(line.to_string())
    }
}
