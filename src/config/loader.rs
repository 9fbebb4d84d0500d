//! Job definition loading

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::entities::DeployStep;
use crate::error::{ConfigResult, ConfigurationError};

use super::types::JobDefinition;

/// Overrides the step's on-failure flag (`true`/`false`)
pub const ON_FAILURE_ENV: &str = "REDEPLOY_ON_FAILURE";

/// Overrides the step's context path
pub const CONTEXT_PATH_ENV: &str = "REDEPLOY_CONTEXT_PATH";

/// Non-fatal configuration warning surfaced to CLI users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub key: String,
    pub file: PathBuf,
    pub line: Option<usize>,
    pub suggestion: Option<String>,
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown key '{}' in {}", self.key, self.file.display())?;
        if let Some(line) = self.line {
            write!(f, ":{}", line)?;
        }
        if let Some(suggestion) = &self.suggestion {
            write!(f, " (did you mean '{}'?)", suggestion)?;
        }
        Ok(())
    }
}

/// Load a job definition and collect non-fatal warnings (e.g. unknown keys).
pub fn load_with_warnings(path: &Path) -> ConfigResult<(JobDefinition, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path).map_err(|e| ConfigurationError::io(path, &e))?;
    parse_with_warnings(path, &content)
}

/// Parse job definition text; `path` is only used for messages.
pub fn parse_with_warnings(
    path: &Path,
    content: &str,
) -> ConfigResult<(JobDefinition, Vec<ConfigWarning>)> {
    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(content);

    let definition: JobDefinition = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| ConfigurationError::InvalidFile {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning {
                key: key.clone(),
                file: path.to_path_buf(),
                line: find_line_number(content, &key),
                suggestion: suggest_key(&key),
            }
        })
        .collect();

    Ok((definition, warnings))
}

/// Environment variable overrides (REDEPLOY_* prefix)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvOverrides {
    pub context_path: Option<String>,
    pub on_failure: Option<bool>,
}

impl EnvOverrides {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup(get_env: impl Fn(&str) -> Option<String>) -> Self {
        let mut overrides = Self::default();

        // REDEPLOY_ON_FAILURE
        if let Some(value) = get_env(ON_FAILURE_ENV) {
            match parse_bool(&value) {
                Some(flag) => overrides.on_failure = Some(flag),
                None => tracing::warn!(value = %value, "ignoring {}: expected true or false", ON_FAILURE_ENV),
            }
        }

        // REDEPLOY_CONTEXT_PATH
        overrides.context_path = get_env(CONTEXT_PATH_ENV).filter(|v| !v.trim().is_empty());

        overrides
    }

    pub fn apply(&self, step: &mut DeployStep) {
        if let Some(context_path) = &self.context_path {
            step.set_context_path(Some(context_path.clone()));
        }
        if let Some(on_failure) = self.on_failure {
            step.set_on_failure(Some(on_failure));
        }
    }
}

pub fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    for (i, line) in content.lines().enumerate() {
        let key = line.split('=').next().unwrap_or("").trim();
        if key == needle {
            return Some(i + 1);
        }
    }
    None
}

fn suggest_key(unknown: &str) -> Option<String> {
    const CANDIDATES: &[&str] = &["war", "context_path", "on_failure", "adapters"];

    let mut best: Option<(&str, usize)> = None;
    for &candidate in CANDIDATES {
        let dist = levenshtein(unknown, candidate);
        best = match best {
            None => Some((candidate, dist)),
            Some((_, best_dist)) if dist < best_dist => Some((candidate, dist)),
            Some(current) => Some(current),
        };
    }

    match best {
        Some((candidate, dist)) if dist <= 2 => Some(candidate.to_string()),
        _ => None,
    }
}

fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    let mut prev: Vec<usize> = (0..=b_bytes.len()).collect();
    let mut curr = vec![0usize; b_bytes.len() + 1];

    for (i, &ac) in a_bytes.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &bc) in b_bytes.iter().enumerate() {
            let cost = if ac == bc { 0 } else { 1 };
            curr[j + 1] =
                std::cmp::min(std::cmp::min(prev[j + 1] + 1, curr[j] + 1), prev[j] + cost);
        }
        prev.clone_from_slice(&curr);
    }

    prev[b_bytes.len()]
}
