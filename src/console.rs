//! Console output routed to one of four severity channels.
//!
//! Helpers that report to the user take a `&dyn Console` instead of reaching
//! for a global host console. The binary installs [`TerminalConsole`] both as
//! its console and as the `log` backend, so library diagnostics land on the
//! same channels.

use chrono::Local;
use crossterm::style::Stylize;
use log::{Level, LevelFilter, Log, Metadata, Record};
use std::cell::RefCell;
use std::fmt;
use std::io::{self, IsTerminal, Write};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Message,
    Warning,
    Error,
    Log,
}

impl FromStr for Severity {
    type Err = std::convert::Infallible;

    /// Unknown names, including the empty string, select the plain message channel.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "Warning" => Severity::Warning,
            "Error" => Severity::Error,
            "Log" => Severity::Log,
            _ => Severity::Message,
        })
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Severity::Message => "Message",
            Severity::Warning => "Warning",
            Severity::Error => "Error",
            Severity::Log => "Log",
        };
        f.write_str(name)
    }
}

impl From<Level> for Severity {
    fn from(level: Level) -> Self {
        match level {
            Level::Error => Severity::Error,
            Level::Warn => Severity::Warning,
            Level::Info => Severity::Message,
            Level::Debug | Level::Trace => Severity::Log,
        }
    }
}

pub trait Console {
    fn print(&self, text: &str, severity: Severity);

    fn message(&self, text: &str) {
        self.print(text, Severity::Message);
    }

    fn warning(&self, text: &str) {
        self.print(text, Severity::Warning);
    }

    fn error(&self, text: &str) {
        self.print(text, Severity::Error);
    }
}

/// Writes messages to stdout and everything else to stderr, timestamped and
/// colored when stderr is a terminal.
pub struct TerminalConsole {
    level: LevelFilter,
    colored: bool,
}

impl TerminalConsole {
    pub fn new(level: LevelFilter) -> Self {
        Self {
            level,
            colored: io::stderr().is_terminal(),
        }
    }

    /// Register this console as the global `log` backend.
    pub fn install(self) -> Result<(), log::SetLoggerError> {
        let level = self.level;
        log::set_boxed_logger(Box::new(self))?;
        log::set_max_level(level);
        Ok(())
    }

    fn format_line(&self, text: &str, severity: Severity) -> String {
        let timestamp = Local::now().format("%H:%M:%S");
        let prefix = format!("[{} {}]", timestamp, severity);

        if !self.colored {
            return format!("{} {}", prefix, text);
        }

        let prefix = match severity {
            Severity::Message => prefix.stylize(),
            Severity::Warning => prefix.yellow(),
            Severity::Error => prefix.red().bold(),
            Severity::Log => prefix.dark_grey(),
        };
        format!("{} {}", prefix, text)
    }
}

impl Console for TerminalConsole {
    fn print(&self, text: &str, severity: Severity) {
        // Output failures (closed pipe) are not worth surfacing from a print call
        let _ = match severity {
            Severity::Message => writeln!(io::stdout().lock(), "{}", text),
            _ => writeln!(io::stderr().lock(), "{}", self.format_line(text, severity)),
        };
    }
}

impl Log for TerminalConsole {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let line = self.format_line(&record.args().to_string(), record.level().into());
        let _ = writeln!(io::stderr().lock(), "{}", line);
    }

    fn flush(&self) {
        let _ = io::stderr().flush();
    }
}

/// Forwards every channel to the `log` facade under the `console` target.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogConsole;

impl Console for LogConsole {
    fn print(&self, text: &str, severity: Severity) {
        match severity {
            Severity::Message => log::info!(target: "console", "{}", text),
            Severity::Warning => log::warn!(target: "console", "{}", text),
            Severity::Error => log::error!(target: "console", "{}", text),
            Severity::Log => log::debug!(target: "console", "{}", text),
        }
    }
}

/// Records everything printed to it.
#[derive(Debug, Default)]
pub struct MemoryConsole {
    entries: RefCell<Vec<(Severity, String)>>,
}

impl MemoryConsole {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<(Severity, String)> {
        self.entries.borrow().clone()
    }

    pub fn contains(&self, severity: Severity, needle: &str) -> bool {
        self.entries
            .borrow()
            .iter()
            .any(|(s, text)| *s == severity && text.contains(needle))
    }
}

impl Console for MemoryConsole {
    fn print(&self, text: &str, severity: Severity) {
        self.entries.borrow_mut().push((severity, text.to_string()));
    }
}
