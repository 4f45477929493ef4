/// Mirror3D Engine - process-wide logging slot
///
/// The engine keeps exactly one global: the active logger. Everything else
/// (mirrors, registry, host collaborators) is owned by a `MirrorSystem`
/// and passed explicitly.

use std::sync::{OnceLock, RwLock};
use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};

/// Global logger (initialized with DefaultLogger)
static LOGGER: OnceLock<RwLock<Box<dyn Logger>>> = OnceLock::new();

fn logger_slot() -> &'static RwLock<Box<dyn Logger>> {
    LOGGER.get_or_init(|| RwLock::new(Box::new(DefaultLogger)))
}

/// Engine-wide entry points
///
/// # Example
///
/// ```no_run
/// use std::sync::Mutex;
/// use mirror_3d_engine::mirror3d::{Engine, log::{Logger, LogEntry, LogSeverity}};
///
/// /// Keeps warnings raised by mirrors for an in-game console
/// struct ConsoleSink(Mutex<Vec<String>>);
///
/// impl Logger for ConsoleSink {
///     fn log(&self, entry: &LogEntry) {
///         if entry.severity >= LogSeverity::Warn {
///             if let Ok(mut lines) = self.0.lock() {
///                 lines.push(entry.message.clone());
///             }
///         }
///     }
/// }
///
/// Engine::set_logger(ConsoleSink(Mutex::new(Vec::new())));
/// ```
pub struct Engine;

impl Engine {
    /// Replace the active logger
    pub fn set_logger<L: Logger + 'static>(logger: L) {
        Self::install(Box::new(logger));
    }

    /// Go back to the colored console logger
    pub fn reset_logger() {
        Self::install(Box::new(DefaultLogger));
    }

    /// Log without location (`mirror_trace!` .. `mirror_warn!`)
    pub fn log(severity: LogSeverity, source: &str, message: String) {
        Self::dispatch(&LogEntry::new(severity, source, message));
    }

    /// Log with `file:line` (`mirror_error!`, `mirror_err!`)
    pub fn log_detailed(
        severity: LogSeverity,
        source: &str,
        message: String,
        file: &'static str,
        line: u32,
    ) {
        Self::dispatch(&LogEntry::new(severity, source, message).at(file, line));
    }

    fn install(logger: Box<dyn Logger>) {
        // A poisoned slot keeps whatever logger it had
        if let Ok(mut slot) = logger_slot().write() {
            *slot = logger;
        }
    }

    fn dispatch(entry: &LogEntry) {
        if let Ok(slot) = logger_slot().read() {
            slot.log(entry);
        }
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
