//! TOML Credential Store
//!
//! Credentials live in a plain TOML file, keyed by id:
//!
//! ```toml
//! [credentials.tomcat]
//! username = "deployer"
//! password = "s3cret"
//! ```
//!
//! The file is not encrypted. Keep it readable by the build user only.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::domain::ports::CredentialStore;
use crate::domain::value_objects::Credentials;
use crate::error::ConfigurationError;

/// Environment variable pointing at a credentials file
pub const CREDENTIALS_ENV: &str = "REDEPLOY_CREDENTIALS";

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct CredentialsFile {
    #[serde(default)]
    credentials: BTreeMap<String, Credentials>,
}

#[derive(Debug, Default, Clone)]
pub struct TomlCredentialStore {
    entries: BTreeMap<String, Credentials>,
}

impl TomlCredentialStore {
    pub fn from_toml(source: &Path, content: &str) -> Result<Self, ConfigurationError> {
        let file: CredentialsFile =
            toml::from_str(content).map_err(|e| ConfigurationError::InvalidFile {
                file: source.to_path_buf(),
                message: e.to_string(),
            })?;
        Ok(Self {
            entries: file.credentials,
        })
    }

    pub fn load(path: &Path) -> Result<Self, ConfigurationError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigurationError::io(path, &e))?;
        let store = Self::from_toml(path, &content)?;
        tracing::debug!(path = %path.display(), count = store.len(), "credentials loaded");
        Ok(store)
    }

    /// Load from an explicit path, `REDEPLOY_CREDENTIALS`, or the user config
    /// directory, in that order.
    ///
    /// An explicit or env-provided file must exist; the default one may be absent.
    pub fn discover(explicit: Option<&Path>) -> Result<Self, ConfigurationError> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        if let Some(path) = std::env::var_os(CREDENTIALS_ENV).filter(|v| !v.is_empty()) {
            return Self::load(Path::new(&path));
        }
        match default_path() {
            Some(path) if path.is_file() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl CredentialStore for TomlCredentialStore {
    fn lookup(&self, id: &str) -> Option<Credentials> {
        self.entries.get(id).cloned()
    }
}

/// `<config dir>/redeploy/credentials.toml`
pub fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("redeploy").join("credentials.toml"))
}
