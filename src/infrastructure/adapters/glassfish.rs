//! GlassFish Adapters
//!
//! Deploys through the `asadmin` command line tool of a local GlassFish
//! installation, which talks to the domain admin server on
//! `hostname:admin_port`. The admin password is handed over in a temporary
//! password file that is removed when the attempt ends.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::Arc;

use tempfile::NamedTempFile;

use crate::domain::entities::Archive;
use crate::domain::ports::{
    AdapterSettings, ContainerAdapter, DeployContract, DeployEvent, ExecutionContext, Redeploy,
};
use crate::domain::value_objects::{ContextPath, Credentials};
use crate::error::{ConfigurationError, DeploymentError};

use super::registry::{AdapterDescriptor, FieldSpec};
use super::settings::{settings_of, SettingsReader};
use super::transport::first_line;

pub const DEFAULT_HOSTNAME: &str = "localhost";
pub const DEFAULT_ADMIN_PORT: u16 = 4848;

const FIELDS: &[FieldSpec] = &[
    FieldSpec::required("home", "home"),
    FieldSpec::with_default("hostname", "hostname", DEFAULT_HOSTNAME),
    FieldSpec::with_default("admin_port", "adminPort", "4848"),
    FieldSpec::optional("credentials_id", "credentialsId"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GlassFishVersion {
    V2,
    V3,
}

impl GlassFishVersion {
    pub const ALL: [GlassFishVersion; 2] = [GlassFishVersion::V2, GlassFishVersion::V3];

    pub fn container_id(&self) -> &'static str {
        match self {
            GlassFishVersion::V2 => "glassfish2x",
            GlassFishVersion::V3 => "glassfish3x",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            GlassFishVersion::V2 => "glassfish2",
            GlassFishVersion::V3 => "glassfish3",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            GlassFishVersion::V2 => "GlassFish 2.x",
            GlassFishVersion::V3 => "GlassFish 3.x",
        }
    }

    /// Key asadmin reads from the password file
    fn password_key(&self) -> &'static str {
        match self {
            GlassFishVersion::V2 => "AS_ADMIN_ADMINPASSWORD",
            GlassFishVersion::V3 => "AS_ADMIN_PASSWORD",
        }
    }

    pub(crate) fn descriptor(&self) -> AdapterDescriptor {
        AdapterDescriptor {
            id: self.container_id(),
            symbol: self.symbol(),
            display_name: self.display_name(),
            fields: FIELDS,
            constructor: match self {
                GlassFishVersion::V2 => |s: &AdapterSettings| build(GlassFishVersion::V2, s),
                GlassFishVersion::V3 => |s: &AdapterSettings| build(GlassFishVersion::V3, s),
            },
        }
    }
}

fn build(
    version: GlassFishVersion,
    settings: &AdapterSettings,
) -> Result<Arc<dyn ContainerAdapter>, ConfigurationError> {
    Ok(Arc::new(GlassFishAdapter::from_settings(version, settings)?))
}

/// Captured result of an external command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

/// Runs external programs on behalf of an adapter
pub trait CommandRunner: std::fmt::Debug + Send + Sync {
    fn run(&self, program: &Path, args: &[String]) -> std::io::Result<CommandOutput>;
}

/// Runs programs as child processes
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessRunner;

impl CommandRunner for ProcessRunner {
    fn run(&self, program: &Path, args: &[String]) -> std::io::Result<CommandOutput> {
        let output = Command::new(program).args(args).output()?;
        Ok(CommandOutput {
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

#[derive(Debug, Clone)]
pub struct GlassFishAdapter {
    version: GlassFishVersion,
    home: PathBuf,
    hostname: String,
    admin_port: u16,
    credentials_id: Option<String>,
    runner: Arc<dyn CommandRunner>,
}

impl GlassFishAdapter {
    pub fn from_settings(
        version: GlassFishVersion,
        settings: &AdapterSettings,
    ) -> Result<Self, ConfigurationError> {
        let id = version.container_id();
        let reader = SettingsReader::new(id, settings);

        let home = PathBuf::from(reader.required("home")?);
        let hostname = reader.or_default("hostname", DEFAULT_HOSTNAME);
        let admin_port = match reader.optional("admin_port") {
            Some(raw) => raw
                .parse::<u16>()
                .ok()
                .filter(|port| *port > 0)
                .ok_or_else(|| {
                    ConfigurationError::invalid(id, "admin_port", format!("'{}' is not a port number", raw))
                })?,
            None => DEFAULT_ADMIN_PORT,
        };

        Ok(Self {
            version,
            home,
            hostname,
            admin_port,
            credentials_id: reader.optional("credentials_id"),
            runner: Arc::new(ProcessRunner),
        })
    }

    pub fn with_runner(mut self, runner: Arc<dyn CommandRunner>) -> Self {
        self.runner = runner;
        self
    }

    pub fn asadmin(&self) -> PathBuf {
        let name = if cfg!(windows) { "asadmin.bat" } else { "asadmin" };
        self.home.join("bin").join(name)
    }

    /// `asadmin` arguments for deploying `archive` under `context_path`.
    ///
    /// GlassFish 2 only accepts connection options after the subcommand.
    pub fn deploy_args(
        &self,
        archive: &Archive,
        context_path: &ContextPath,
        auth: Option<(&str, &Path)>,
    ) -> Vec<String> {
        let mut connection = vec![
            "--host".to_string(),
            self.hostname.clone(),
            "--port".to_string(),
            self.admin_port.to_string(),
        ];
        if let Some((user, password_file)) = auth {
            connection.push("--user".to_string());
            connection.push(user.to_string());
            connection.push("--passwordfile".to_string());
            connection.push(password_file.display().to_string());
        }

        let deploy = vec![
            "--force=true".to_string(),
            "--contextroot".to_string(),
            context_path.manager_path(),
            archive.path().display().to_string(),
        ];

        let mut args = Vec::with_capacity(connection.len() + deploy.len() + 1);
        match self.version {
            GlassFishVersion::V2 => {
                args.push("deploy".to_string());
                args.extend(connection);
            }
            GlassFishVersion::V3 => {
                args.extend(connection);
                args.push("deploy".to_string());
            }
        }
        args.extend(deploy);
        args
    }

    fn password_file(&self, credentials: &Credentials) -> std::io::Result<NamedTempFile> {
        let mut file = NamedTempFile::new()?;
        writeln!(file, "{}={}", self.version.password_key(), credentials.password())?;
        file.flush()?;
        Ok(file)
    }

    fn failure(&self, cause: impl Into<String>) -> DeploymentError {
        DeploymentError::new(self.container_id(), self.describe(), cause)
    }
}

impl ContainerAdapter for GlassFishAdapter {
    fn container_id(&self) -> &'static str {
        self.version.container_id()
    }

    fn describe(&self) -> String {
        format!(
            "{} at {}:{}",
            self.version.display_name(),
            self.hostname,
            self.admin_port
        )
    }

    fn settings(&self) -> AdapterSettings {
        let home = self.home.to_string_lossy();
        let port = self.admin_port.to_string();
        settings_of([
            ("home", Some(home.as_ref())),
            ("hostname", Some(self.hostname.as_str())),
            ("admin_port", Some(port.as_str())),
            ("credentials_id", self.credentials_id.as_deref()),
        ])
    }

    fn contract(&self) -> DeployContract<'_> {
        DeployContract::Modern(self)
    }
}

impl Redeploy for GlassFishAdapter {
    fn redeploy(
        &self,
        archive: &Archive,
        context_path: &ContextPath,
        ctx: &ExecutionContext,
    ) -> Result<(), DeploymentError> {
        let asadmin = self.asadmin();
        if !asadmin.is_file() {
            return Err(self.failure(format!("{} not found", asadmin.display())));
        }

        let credentials = match &self.credentials_id {
            Some(id) => Some(
                ctx.credentials(id)
                    .ok_or_else(|| self.failure(format!("credentials '{}' not found", id)))?,
            ),
            None => None,
        };

        // Lives until the command returns
        let password_file = credentials
            .as_ref()
            .map(|c| self.password_file(c))
            .transpose()
            .map_err(|e| self.failure(format!("cannot write password file: {}", e)))?;
        let auth = credentials
            .as_ref()
            .zip(password_file.as_ref())
            .map(|(c, f)| (c.username(), f.path()));

        let args = self.deploy_args(archive, context_path, auth);
        tracing::debug!(program = %asadmin.display(), args = ?args, "running asadmin");

        let output = self
            .runner
            .run(&asadmin, &args)
            .map_err(|e| self.failure(format!("cannot run asadmin: {}", e)))?;

        if !output.success {
            let reason = match first_line(&output.stderr) {
                "" => first_line(&output.stdout),
                line => line,
            };
            return Err(self.failure(format!("asadmin deploy failed: {}", reason)));
        }

        ctx.emit(DeployEvent::AdapterMessage {
            adapter: self.container_id().to_string(),
            message: format!("Deployed {} to {}", archive.file_name(), context_path),
        });
        Ok(())
    }
}
