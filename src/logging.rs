//! File-backed logging for repohub
//!
//! The TUI owns the terminal, so log output goes to `repohub.log` next to
//! the executable. Modules log through the standard `log` facade; this
//! module only provides the backend and its initialization.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Mutex;

use chrono::Local;
use log::{LevelFilter, Log, Metadata, Record};

/// Backend writing one line per record to the log file.
struct FileLogger {
    file: Mutex<Option<File>>,
}

impl Log for FileLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let entry = format!(
            "[{}] [{:5}] [{}] {}\n",
            Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
            record.level(),
            record.target(),
            record.args()
        );

        if let Ok(mut guard) = self.file.lock() {
            if let Some(file) = guard.as_mut() {
                let _ = file.write_all(entry.as_bytes());
            }
        }
    }

    fn flush(&self) {
        if let Ok(mut guard) = self.file.lock() {
            if let Some(file) = guard.as_mut() {
                let _ = file.flush();
            }
        }
    }
}

/// Log file path (same directory as the executable)
fn log_path() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(|p| p.to_path_buf()))
        .unwrap_or_else(|| PathBuf::from("."))
        .join("repohub.log")
}

/// Level filter from `REPOHUB_LOG` (or `RUST_LOG`), defaulting to `info`.
fn level_from_env() -> LevelFilter {
    let raw = std::env::var("REPOHUB_LOG")
        .or_else(|_| std::env::var("RUST_LOG"))
        .unwrap_or_default();

    match raw.to_lowercase().as_str() {
        "off" => LevelFilter::Off,
        "error" => LevelFilter::Error,
        "warn" => LevelFilter::Warn,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        _ => LevelFilter::Info,
    }
}

/// Install the global logger. Safe to call more than once; only the first
/// call wins.
pub fn init() {
    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true) // Start fresh each run
        .open(log_path())
        .ok();

    let logger = FileLogger {
        file: Mutex::new(file),
    };

    if log::set_boxed_logger(Box::new(logger)).is_ok() {
        log::set_max_level(level_from_env());
    }
}
