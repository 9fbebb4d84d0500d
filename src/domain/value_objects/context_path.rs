//! ContextPath value object - where an archive is mounted on the container
//!
//! `app`, `/app` and `app/` all name the same mount point. The root context is
//! written `/` or `ROOT` and maps to `ROOT.war` on disk.

use crate::domain::entities::Archive;
use crate::error::ConfigurationError;

const ROOT: &str = "ROOT";

/// Normalised, non-empty context path
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContextPath {
    name: String,
}

impl ContextPath {
    /// Parse a user supplied context path.
    ///
    /// Fails with [`ConfigurationError::EmptyContextPath`] when the input is blank.
    pub fn new(raw: &str) -> Result<Self, ConfigurationError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ConfigurationError::EmptyContextPath);
        }
        Ok(Self::normalized(trimmed))
    }

    /// Default context path for an archive: its base name without extension.
    ///
    /// Fails when the file name leaves nothing to mount, so an unnamed
    /// archive never lands on the root context.
    pub fn for_archive(archive: &Archive) -> Result<Self, ConfigurationError> {
        let base = archive.base_name();
        let base = base.trim();
        if base.trim_matches('/').is_empty() {
            return Err(ConfigurationError::UnnamedArchive(archive.path().to_path_buf()));
        }
        Ok(Self::normalized(base))
    }

    fn normalized(value: &str) -> Self {
        let stripped = value.trim_matches('/');
        let name = if stripped.is_empty() || stripped == ROOT {
            ROOT.to_string()
        } else {
            stripped.to_string()
        };
        Self { name }
    }

    pub fn as_str(&self) -> &str {
        &self.name
    }

    pub fn is_root(&self) -> bool {
        self.name == ROOT
    }

    /// Path as container managers expect it (`/app`, or `/` for root)
    pub fn manager_path(&self) -> String {
        if self.is_root() {
            "/".to_string()
        } else {
            format!("/{}", self.name)
        }
    }

    /// File name used when dropping the archive into a `webapps` directory.
    ///
    /// Nested paths use `#` as separator (`shop/api` → `shop#api.war`).
    pub fn war_file_name(&self) -> String {
        format!("{}.war", self.name.replace('/', "#"))
    }
}

impl std::fmt::Display for ContextPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.manager_path())
    }
}
