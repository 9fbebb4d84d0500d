//! Archive entity - one resolved deployable package
//!
//! Archives are resolved right before deployment and never persisted.

use sha2::{Digest, Sha256};
use std::borrow::Cow;
use std::io::Read;
use std::path::{Path, PathBuf};

/// A packaged web application found in the workspace
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Archive {
    path: PathBuf,
    size: u64,
}

impl Archive {
    pub fn new(path: impl Into<PathBuf>, size: u64) -> Self {
        Self {
            path: path.into(),
            size,
        }
    }

    /// Build an archive handle from a file on disk
    pub fn from_path(path: impl Into<PathBuf>) -> std::io::Result<Self> {
        let path = path.into();
        let size = std::fs::metadata(&path)?.len();
        Ok(Self { path, size })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Size in bytes at resolution time
    pub fn size(&self) -> u64 {
        self.size
    }

    /// File name without its final extension (`app.war` → `app`).
    ///
    /// Bytes that are not valid UTF-8 are replaced with `U+FFFD`. Empty when
    /// the path has no file name.
    pub fn base_name(&self) -> Cow<'_, str> {
        self.path
            .file_stem()
            .map(|s| s.to_string_lossy())
            .unwrap_or_default()
    }

    /// File name including extension
    pub fn file_name(&self) -> Cow<'_, str> {
        self.path
            .file_name()
            .map(|s| s.to_string_lossy())
            .unwrap_or_default()
    }

    /// SHA256 of the archive content, formatted as `sha256:<hex>`
    pub fn checksum(&self) -> std::io::Result<String> {
        let mut file = std::fs::File::open(&self.path)?;
        let mut hasher = Sha256::new();
        let mut buf = [0u8; 64 * 1024];
        loop {
            let n = file.read(&mut buf)?;
            if n == 0 {
                break;
            }
            hasher.update(&buf[..n]);
        }
        Ok(format!("sha256:{:x}", hasher.finalize()))
    }
}

impl std::fmt::Display for Archive {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.path.display())
    }
}
