//! Local Tomcat Adapter
//!
//! Deploys by copying the archive into `{home}/webapps` of a Tomcat on the
//! same host. Tomcat's auto-deployer picks the file up. The copy is written
//! to a temporary file in the same directory and renamed into place, so the
//! auto-deployer never sees a half-written archive.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tempfile::NamedTempFile;

use crate::domain::entities::Archive;
use crate::domain::ports::{
    AdapterSettings, ContainerAdapter, DeployContract, DeployEvent, ExecutionContext, Redeploy,
};
use crate::domain::value_objects::ContextPath;
use crate::error::{ConfigurationError, DeploymentError};

use super::registry::{AdapterDescriptor, FieldSpec};
use super::settings::{settings_of, SettingsReader};

const ID: &str = "tomcat-home";

const SYMBOL: &str = "tomcatHome";

const FIELDS: &[FieldSpec] = &[FieldSpec::required("home", "home")];

pub(crate) fn descriptor() -> AdapterDescriptor {
    AdapterDescriptor {
        id: ID,
        symbol: SYMBOL,
        display_name: "Tomcat (local home)",
        fields: FIELDS,
        constructor: build,
    }
}

fn build(settings: &AdapterSettings) -> Result<Arc<dyn ContainerAdapter>, ConfigurationError> {
    Ok(Arc::new(TomcatHomeAdapter::from_settings(settings)?))
}

/// Drops archives into a local Tomcat's `webapps` directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TomcatHomeAdapter {
    home: PathBuf,
}

impl TomcatHomeAdapter {
    pub fn new(home: impl Into<PathBuf>) -> Self {
        Self { home: home.into() }
    }

    pub fn from_settings(settings: &AdapterSettings) -> Result<Self, ConfigurationError> {
        let reader = SettingsReader::new(ID, settings);
        Ok(Self::new(reader.required("home")?))
    }

    pub fn webapps(&self) -> PathBuf {
        self.home.join("webapps")
    }

    fn copy_into_place(&self, archive: &Archive, dest: &Path) -> io::Result<()> {
        let webapps = self.webapps();
        let mut tmp = NamedTempFile::new_in(&webapps)?;
        let mut src = fs::File::open(archive.path())?;
        io::copy(&mut src, tmp.as_file_mut())?;
        tmp.as_file().sync_all()?;
        tmp.persist(dest).map_err(|e| e.error)?;
        Ok(())
    }
}

impl ContainerAdapter for TomcatHomeAdapter {
    fn container_id(&self) -> &'static str {
        ID
    }

    fn describe(&self) -> String {
        format!("Tomcat at {}", self.home.display())
    }

    fn settings(&self) -> AdapterSettings {
        let home = self.home.to_string_lossy();
        settings_of([("home", Some(home.as_ref()))])
    }

    fn contract(&self) -> DeployContract<'_> {
        DeployContract::Modern(self)
    }
}

impl Redeploy for TomcatHomeAdapter {
    fn redeploy(
        &self,
        archive: &Archive,
        context_path: &ContextPath,
        ctx: &ExecutionContext,
    ) -> Result<(), DeploymentError> {
        let webapps = self.webapps();
        if !webapps.is_dir() {
            return Err(DeploymentError::new(
                ID,
                self.describe(),
                format!("{} is not a directory", webapps.display()),
            ));
        }

        let dest = webapps.join(context_path.war_file_name());
        self.copy_into_place(archive, &dest).map_err(|e| {
            DeploymentError::new(
                ID,
                self.describe(),
                format!("cannot write {}: {}", dest.display(), e),
            )
        })?;

        ctx.emit(DeployEvent::AdapterMessage {
            adapter: ID.to_string(),
            message: format!("Copied {} to {}", archive.file_name(), dest.display()),
        });
        Ok(())
    }
}
