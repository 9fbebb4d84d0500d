//! Deploy Event Port
//!
//! Provides an observable interface for deploy runs.
//! The execution log the operator reads is rendered from these events.

use std::path::PathBuf;

use crate::domain::value_objects::JobStatus;

/// Severity of an event line in the execution log
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventLevel {
    Info,
    Warn,
    Error,
}

impl EventLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventLevel::Info => "INFO",
            EventLevel::Warn => "WARN",
            EventLevel::Error => "ERROR",
        }
    }
}

/// Event emitted during a deploy run
#[derive(Debug, Clone, PartialEq)]
pub enum DeployEvent {
    /// No adapters configured; nothing will be deployed
    NoAdapters,

    /// The archive glob was resolved
    ArchivesResolved {
        pattern: String,
        count: usize,
        adapter_count: usize,
    },

    /// One archive picked up for deployment
    ArchiveFound {
        path: PathBuf,
        size: u64,
        checksum: Option<String>,
    },

    /// A deploy attempt is about to start
    AttemptStarted {
        archive: PathBuf,
        adapter: String,
        target: String,
        context_path: String,
    },

    /// A deploy attempt completed
    AttemptSucceeded {
        archive: PathBuf,
        adapter: String,
        target: String,
        elapsed_ms: u128,
    },

    /// A deploy attempt failed
    AttemptFailed {
        archive: PathBuf,
        adapter: String,
        target: String,
        cause: String,
        legacy: bool,
    },

    /// Free-form progress line from an adapter
    AdapterMessage { adapter: String, message: String },

    /// The job was cancelled; remaining attempts are skipped
    Cancelled { remaining: usize },

    /// Run completed
    Completed {
        status: JobStatus,
        deployed: usize,
        failed: usize,
        skipped: usize,
    },
}

impl DeployEvent {
    pub fn level(&self) -> EventLevel {
        match self {
            DeployEvent::AttemptFailed { .. } => EventLevel::Error,
            DeployEvent::Cancelled { .. } => EventLevel::Warn,
            DeployEvent::Completed { status, .. } => match status {
                JobStatus::Success => EventLevel::Info,
                JobStatus::Unstable => EventLevel::Warn,
                JobStatus::Failure => EventLevel::Error,
            },
            _ => EventLevel::Info,
        }
    }

    /// Operator-facing log line, without the level prefix
    pub fn message(&self) -> String {
        match self {
            DeployEvent::NoAdapters => {
                "No container adapters configured; nothing to deploy".to_string()
            }
            DeployEvent::ArchivesResolved {
                pattern,
                count,
                adapter_count,
            } => format!(
                "Attempting to deploy {} archive(s) matching '{}' to {} container(s)",
                count, pattern, adapter_count
            ),
            DeployEvent::ArchiveFound {
                path,
                size,
                checksum,
            } => format!(
                "Found {} ({} bytes, {})",
                path.display(),
                size,
                checksum.as_deref().unwrap_or("checksum unavailable")
            ),
            DeployEvent::AttemptStarted {
                archive,
                adapter,
                target,
                context_path,
            } => format!(
                "Deploying {} to {} [{}] at context path {}",
                archive.display(),
                target,
                adapter,
                context_path
            ),
            DeployEvent::AttemptSucceeded {
                archive,
                adapter,
                target,
                elapsed_ms,
            } => format!(
                "Deployed {} to {} [{}] in {} ms",
                archive.display(),
                target,
                adapter,
                elapsed_ms
            ),
            DeployEvent::AttemptFailed {
                archive,
                adapter,
                target,
                cause,
                ..
            } => format!(
                "Failed to deploy {} to {} [{}]: {}",
                archive.display(),
                target,
                adapter,
                cause
            ),
            DeployEvent::AdapterMessage { adapter, message } => {
                format!("[{}] {}", adapter, message)
            }
            DeployEvent::Cancelled { remaining } => format!(
                "Job cancelled; skipping {} remaining deploy attempt(s)",
                remaining
            ),
            DeployEvent::Completed {
                status,
                deployed,
                failed,
                skipped,
            } => format!(
                "Deploy finished with {}: {} deployed, {} failed, {} skipped",
                status, deployed, failed, skipped
            ),
        }
    }

    /// Full log line including the `[deploy][LEVEL]` prefix
    pub fn log_line(&self) -> String {
        format!("[deploy][{}] {}", self.level().as_str(), self.message())
    }
}

/// Trait for receiving deploy events
///
/// Implementations can be:
/// - ConsoleEventSink: log lines in the terminal
/// - JsonEventSink: NDJSON event stream for CI
/// - NoopEventSink: Silent operation
pub trait DeployEventSink: Send + Sync {
    /// Handle a deploy event
    fn on_event(&self, event: DeployEvent);
}

/// No-op event sink for silent operation
pub struct NoopEventSink;

impl DeployEventSink for NoopEventSink {
    fn on_event(&self, _event: DeployEvent) {
        // Do nothing
    }
}
