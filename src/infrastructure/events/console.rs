//! Console Event Sink
//!
//! Renders deploy events as execution log lines:
//! `[deploy][INFO] Deployed target/app.war to Tomcat 8.x at ... in 120 ms`.

use std::io::{self, Write};
use std::sync::Mutex;

use crossterm::style::Stylize;
use is_terminal::IsTerminal;

use crate::domain::ports::{DeployEvent, DeployEventSink, EventLevel};

pub struct ConsoleEventSink {
    writer: Mutex<Box<dyn Write + Send>>,
    color: bool,
}

impl ConsoleEventSink {
    /// Log to stdout, coloured when stdout is a terminal and `NO_COLOR` is unset
    pub fn stdout() -> Self {
        let color = io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none();
        Self {
            writer: Mutex::new(Box::new(io::stdout())),
            color,
        }
    }

    /// Uncoloured sink writing to a custom writer
    pub fn with_writer<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            writer: Mutex::new(Box::new(writer)),
            color: false,
        }
    }

    fn render(&self, event: &DeployEvent) -> String {
        if !self.color {
            return event.log_line();
        }
        let level = event.level();
        let tag = format!("[{}]", level.as_str());
        let tag = match level {
            EventLevel::Info => tag.cyan(),
            EventLevel::Warn => tag.yellow().bold(),
            EventLevel::Error => tag.red().bold(),
        };
        format!("{}{} {}", "[deploy]".dark_grey(), tag, event.message())
    }
}

impl DeployEventSink for ConsoleEventSink {
    fn on_event(&self, event: DeployEvent) {
        let line = self.render(&event);
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", line);
            let _ = writer.flush();
        }
    }
}
