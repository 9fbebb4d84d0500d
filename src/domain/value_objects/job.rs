//! Job value objects - who is invoking the deploy step
//!
//! The build system is an external collaborator. All the orchestrator needs
//! from it is the job identity, its kind, its workspace and its environment.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// How the invoking job is defined
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum JobKind {
    /// Scripted pipeline step
    Pipeline,
    /// Classic job with a post-build publisher
    #[default]
    Freestyle,
}

impl JobKind {
    pub fn is_pipeline(&self) -> bool {
        matches!(self, JobKind::Pipeline)
    }
}

impl std::fmt::Display for JobKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JobKind::Pipeline => write!(f, "pipeline"),
            JobKind::Freestyle => write!(f, "freestyle"),
        }
    }
}

/// The job execution the deploy step runs in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobContext {
    name: String,
    kind: JobKind,
    workspace: PathBuf,
    env: BTreeMap<String, String>,
}

impl JobContext {
    pub fn new(name: impl Into<String>, kind: JobKind, workspace: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            kind,
            workspace: workspace.into(),
            env: BTreeMap::new(),
        }
    }

    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    pub fn with_envs<I, K, V>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (k, v) in vars {
            self.env.insert(k.into(), v.into());
        }
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> JobKind {
        self.kind
    }

    pub fn workspace(&self) -> &Path {
        &self.workspace
    }

    pub fn env(&self, key: &str) -> Option<&str> {
        self.env.get(key).map(String::as_str)
    }

    /// Expand `${VAR}` and `$VAR` references against the job environment.
    ///
    /// Unknown variables are left verbatim so a typo stays visible in the log.
    pub fn expand(&self, input: &str) -> String {
        let mut out = String::with_capacity(input.len());
        let mut rest = input;

        while let Some(pos) = rest.find('$') {
            out.push_str(&rest[..pos]);
            let after = &rest[pos + 1..];

            if let Some(braced) = after.strip_prefix('{') {
                if let Some(end) = braced.find('}') {
                    let key = &braced[..end];
                    match self.env(key) {
                        Some(value) => out.push_str(value),
                        None => {
                            out.push_str("${");
                            out.push_str(key);
                            out.push('}');
                        }
                    }
                    rest = &braced[end + 1..];
                    continue;
                }
            } else {
                let len = variable_name_len(after);
                if len > 0 {
                    let key = &after[..len];
                    match self.env(key) {
                        Some(value) => out.push_str(value),
                        None => {
                            out.push('$');
                            out.push_str(key);
                        }
                    }
                    rest = &after[len..];
                    continue;
                }
            }

            out.push('$');
            rest = after;
        }

        out.push_str(rest);
        out
    }
}

fn variable_name_len(s: &str) -> usize {
    let mut chars = s.char_indices();
    match chars.next() {
        Some((_, c)) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return 0,
    }
    chars
        .find(|(_, c)| !(c.is_ascii_alphanumeric() || *c == '_'))
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job() -> JobContext {
        JobContext::new("shop", JobKind::Pipeline, "/ws")
            .with_env("BUILD_NUMBER", "42")
            .with_env("APP", "shop")
    }

    #[test]
    fn expand_braced_and_bare_variables() {
        let j = job();
        assert_eq!(j.expand("${APP}-$BUILD_NUMBER"), "shop-42");
        assert_eq!(j.expand("target/${APP}.war"), "target/shop.war");
    }

    #[test]
    fn expand_leaves_unknown_variables() {
        let j = job();
        assert_eq!(j.expand("${NOPE}/$ALSO_NOPE"), "${NOPE}/$ALSO_NOPE");
    }

    #[test]
    fn expand_keeps_lone_dollar_signs() {
        let j = job();
        assert_eq!(j.expand("cost $5 and $"), "cost $5 and $");
        assert_eq!(j.expand("${unterminated"), "${unterminated");
    }

    #[test]
    fn job_kind_serde_lowercase() {
        let json = serde_json::to_string(&JobKind::Pipeline).unwrap();
        assert_eq!(json, "\"pipeline\"");
    }
}
