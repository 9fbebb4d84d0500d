//! Workspace Archive Resolver
//!
//! Resolves Ant-style globs (`target/*.war`, `**/*.war`) against the job
//! workspace. Several patterns may be given separated by commas. Patterns are
//! anchored at the workspace root, so `*.war` only matches top-level files.

use std::path::Path;

use ignore::overrides::{Override, OverrideBuilder};
use ignore::WalkBuilder;

use crate::domain::entities::Archive;
use crate::domain::ports::ArchiveResolver;
use crate::error::ConfigurationError;

#[derive(Debug, Default, Clone, Copy)]
pub struct WorkspaceArchiveResolver;

impl WorkspaceArchiveResolver {
    pub fn new() -> Self {
        Self
    }
}

fn build_matcher(workspace: &Path, pattern: &str) -> Result<Override, ConfigurationError> {
    let invalid = |message: String| ConfigurationError::InvalidPattern {
        pattern: pattern.to_string(),
        message,
    };

    let globs: Vec<&str> = pattern
        .split(',')
        .map(str::trim)
        .filter(|g| !g.is_empty())
        .collect();
    if globs.is_empty() {
        return Err(invalid("pattern is empty".to_string()));
    }

    let mut builder = OverrideBuilder::new(workspace);
    for glob in globs {
        let glob = glob.replace('\\', "/");
        let anchored = if glob.starts_with('/') {
            glob
        } else {
            format!("/{}", glob)
        };
        builder.add(&anchored).map_err(|e| invalid(e.to_string()))?;
    }
    builder.build().map_err(|e| invalid(e.to_string()))
}

impl ArchiveResolver for WorkspaceArchiveResolver {
    fn resolve(&self, workspace: &Path, pattern: &str) -> Result<Vec<Archive>, ConfigurationError> {
        let matcher = build_matcher(workspace, pattern)?;

        let mut archives = Vec::new();
        for entry in WalkBuilder::new(workspace)
            .standard_filters(false)
            .follow_links(false)
            .overrides(matcher)
            .build()
        {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    tracing::warn!(error = %err, "skipping unreadable workspace entry");
                    continue;
                }
            };
            if !entry.file_type().is_some_and(|t| t.is_file()) {
                continue;
            }
            let archive = Archive::from_path(entry.path())
                .map_err(|e| ConfigurationError::io(entry.path(), &e))?;
            archives.push(archive);
        }

        archives.sort_by(|a, b| a.path().cmp(b.path()));
        tracing::debug!(pattern, count = archives.len(), "archives resolved");
        Ok(archives)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::{tempdir, TempDir};

    fn workspace(files: &[&str]) -> TempDir {
        let dir = tempdir().unwrap();
        for file in files {
            let path = dir.path().join(file);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, b"war").unwrap();
        }
        dir
    }

    fn names(ws: &TempDir, pattern: &str) -> Vec<String> {
        WorkspaceArchiveResolver
            .resolve(ws.path(), pattern)
            .unwrap()
            .iter()
            .map(|a| {
                a.path()
                    .strip_prefix(ws.path())
                    .unwrap()
                    .to_string_lossy()
                    .replace('\\', "/")
            })
            .collect()
    }

    #[test]
    fn star_stays_in_one_directory() {
        let ws = workspace(&["app.war", "target/app.war", "target/lib/x.war"]);
        assert_eq!(names(&ws, "*.war"), vec!["app.war"]);
        assert_eq!(names(&ws, "target/*.war"), vec!["target/app.war"]);
    }

    #[test]
    fn double_star_recurses() {
        let ws = workspace(&["b/app.war", "a/deep/api.war", "a/notes.txt"]);
        assert_eq!(names(&ws, "**/*.war"), vec!["a/deep/api.war", "b/app.war"]);
    }

    #[test]
    fn comma_separated_patterns_are_merged() {
        let ws = workspace(&["one.war", "two.ear", "three.jar"]);
        assert_eq!(names(&ws, "*.war, *.ear"), vec!["one.war", "two.ear"]);
    }

    #[test]
    fn hidden_and_gitignored_files_are_included() {
        let ws = workspace(&[".build/app.war", "out/app.war"]);
        fs::write(ws.path().join(".gitignore"), "out/\n").unwrap();
        assert_eq!(names(&ws, "**/*.war"), vec![".build/app.war", "out/app.war"]);
    }

    #[test]
    fn no_match_is_empty_not_an_error() {
        let ws = workspace(&["app.jar"]);
        assert!(names(&ws, "*.war").is_empty());
    }

    #[test]
    fn invalid_glob_is_a_configuration_error() {
        let ws = workspace(&[]);
        let err = WorkspaceArchiveResolver.resolve(ws.path(), "target/[.war").unwrap_err();
        assert!(matches!(err, ConfigurationError::InvalidPattern { .. }));
    }

    #[test]
    fn blank_pattern_is_a_configuration_error() {
        let ws = workspace(&[]);
        let err = WorkspaceArchiveResolver.resolve(ws.path(), " , ").unwrap_err();
        assert!(matches!(err, ConfigurationError::InvalidPattern { .. }));
    }
}
