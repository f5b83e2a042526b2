//! Console Logger
//!
//! `log` backend for the browser. Every record goes to the devtools console
//! (stderr off-wasm) and into a fixed-size ring buffer that the UI can show
//! as a diagnostics panel.

use std::collections::VecDeque;
use std::sync::{Mutex, OnceLock};

use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};

/// Lines kept in memory
pub const DEFAULT_CAPACITY: usize = 200;

static LOGGER: OnceLock<ConsoleLogger> = OnceLock::new();

/// Fixed-capacity buffer, oldest line dropped first
#[derive(Debug)]
pub struct RingBuffer {
    lines: VecDeque<String>,
    capacity: usize,
}

impl RingBuffer {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            lines: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, line: String) {
        if self.lines.len() == self.capacity {
            self.lines.pop_front();
        }
        self.lines.push_back(line);
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }
}

pub struct ConsoleLogger {
    level: LevelFilter,
    buffer: Mutex<RingBuffer>,
}

impl ConsoleLogger {
    pub fn new(level: LevelFilter, capacity: usize) -> Self {
        Self {
            level,
            buffer: Mutex::new(RingBuffer::new(capacity)),
        }
    }

    /// Buffered lines, oldest first
    pub fn recent(&self) -> Vec<String> {
        self.buffer
            .lock()
            .map(|buffer| buffer.lines())
            .unwrap_or_default()
    }
}

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format_line(record);
        emit(record.level(), &line);
        if let Ok(mut buffer) = self.buffer.lock() {
            buffer.push(line);
        }
    }

    fn flush(&self) {}
}

fn format_line(record: &Record) -> String {
    format!(
        "{} [{} {}] {}",
        chrono::Local::now().format("%H:%M:%S%.3f"),
        record.level(),
        record.target(),
        record.args()
    )
}

#[cfg(target_arch = "wasm32")]
fn emit(level: Level, line: &str) {
    let value = wasm_bindgen::JsValue::from_str(line);
    match level {
        Level::Error => web_sys::console::error_1(&value),
        Level::Warn => web_sys::console::warn_1(&value),
        Level::Info => web_sys::console::log_1(&value),
        Level::Debug | Level::Trace => web_sys::console::debug_1(&value),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn emit(_level: Level, line: &str) {
    eprintln!("{}", line);
}

/// Install the global logger. Fails if another logger is already set.
pub fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
    let logger = LOGGER.get_or_init(|| ConsoleLogger::new(level, DEFAULT_CAPACITY));
    log::set_logger(logger)?;
    log::set_max_level(level);
    Ok(())
}

/// Lines captured by the global logger
pub fn recent_lines() -> Vec<String> {
    LOGGER.get().map(ConsoleLogger::recent).unwrap_or_default()
}

/// Parse a level name, falling back to `Info`
pub fn parse_level(name: &str) -> LevelFilter {
    name.trim().parse().unwrap_or(LevelFilter::Info)
}
