//! JSON Event Sink
//!
//! Outputs deploy events as NDJSON for CI/automation consumption.

use crate::domain::ports::{DeployEvent, DeployEventSink};
use std::io::{self, Write};
use std::sync::Mutex;

/// Event sink that outputs NDJSON events to stdout
pub struct JsonEventSink {
    /// Mutex to ensure thread-safe writes
    writer: Mutex<Box<dyn Write + Send>>,
}

impl JsonEventSink {
    /// Create a new JSON event sink writing to stdout
    pub fn stdout() -> Self {
        Self {
            writer: Mutex::new(Box::new(io::stdout())),
        }
    }

    /// Create a JSON event sink writing to a custom writer
    pub fn with_writer<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            writer: Mutex::new(Box::new(writer)),
        }
    }

    fn write_event(&self, mut event: serde_json::Value) {
        if let Some(fields) = event.as_object_mut() {
            fields.insert(
                "timestamp".to_string(),
                serde_json::Value::String(chrono::Utc::now().to_rfc3339()),
            );
        }
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", event);
            let _ = writer.flush();
        }
    }
}

fn to_json(event: &DeployEvent) -> serde_json::Value {
    let level = event.level().as_str();
    match event {
        DeployEvent::NoAdapters => serde_json::json!({
            "event": "no_adapters",
            "level": level,
        }),

        DeployEvent::ArchivesResolved {
            pattern,
            count,
            adapter_count,
        } => serde_json::json!({
            "event": "archives_resolved",
            "level": level,
            "pattern": pattern,
            "count": count,
            "adapters": adapter_count,
        }),

        DeployEvent::ArchiveFound {
            path,
            size,
            checksum,
        } => serde_json::json!({
            "event": "archive",
            "level": level,
            "path": path.display().to_string(),
            "size": size,
            "checksum": checksum,
        }),

        DeployEvent::AttemptStarted {
            archive,
            adapter,
            target,
            context_path,
        } => serde_json::json!({
            "event": "attempt_start",
            "level": level,
            "archive": archive.display().to_string(),
            "adapter": adapter,
            "target": target,
            "context_path": context_path,
        }),

        DeployEvent::AttemptSucceeded {
            archive,
            adapter,
            target,
            elapsed_ms,
        } => serde_json::json!({
            "event": "attempt_success",
            "level": level,
            "archive": archive.display().to_string(),
            "adapter": adapter,
            "target": target,
            "elapsed_ms": *elapsed_ms as u64,
        }),

        DeployEvent::AttemptFailed {
            archive,
            adapter,
            target,
            cause,
            legacy,
        } => serde_json::json!({
            "event": "attempt_failure",
            "level": level,
            "archive": archive.display().to_string(),
            "adapter": adapter,
            "target": target,
            "cause": cause,
            "legacy": legacy,
        }),

        DeployEvent::AdapterMessage { adapter, message } => serde_json::json!({
            "event": "adapter_message",
            "level": level,
            "adapter": adapter,
            "message": message,
        }),

        DeployEvent::Cancelled { remaining } => serde_json::json!({
            "event": "cancelled",
            "level": level,
            "remaining": remaining,
        }),

        DeployEvent::Completed {
            status,
            deployed,
            failed,
            skipped,
        } => serde_json::json!({
            "event": "complete",
            "level": level,
            "status": status,
            "deployed": deployed,
            "failed": failed,
            "skipped": skipped,
        }),
    }
}

impl DeployEventSink for JsonEventSink {
    fn on_event(&self, event: DeployEvent) {
        self.write_event(to_json(&event));
    }
}
