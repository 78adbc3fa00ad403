//! Event and log callback hooks.
//!
//! The library never prints; hosts that want to see what the animation
//! engine and terminal session are doing install callbacks here.

use std::sync::{Mutex, OnceLock, PoisonError};

/// Log level for debug callbacks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

type EventCallback = Box<dyn Fn(&str, &str) + Send + Sync + 'static>;
type LogCallback = Box<dyn Fn(LogLevel, &str) + Send + Sync + 'static>;

fn event_callback() -> &'static Mutex<Option<EventCallback>> {
    static CALLBACK: OnceLock<Mutex<Option<EventCallback>>> = OnceLock::new();
    CALLBACK.get_or_init(|| Mutex::new(None))
}

fn log_callback() -> &'static Mutex<Option<LogCallback>> {
    static CALLBACK: OnceLock<Mutex<Option<LogCallback>>> = OnceLock::new();
    CALLBACK.get_or_init(|| Mutex::new(None))
}

/// Set the global event callback, receiving `(name, data)`.
///
/// The animation engine emits `"frame"` with data of the form
/// `erased=N drawn=N skipped=N`.
pub fn set_event_callback<F>(callback: F)
where
    F: Fn(&str, &str) + Send + Sync + 'static,
{
    let mut guard = event_callback()
        .lock()
        .unwrap_or_else(PoisonError::into_inner);
    *guard = Some(Box::new(callback));
}

/// Remove the global event callback.
pub fn clear_event_callback() {
    let mut guard = event_callback()
        .lock()
        .unwrap_or_else(PoisonError::into_inner);
    *guard = None;
}

/// Emit an event to the registered callback.
pub fn emit_event(name: &str, data: &str) {
    if let Ok(guard) = event_callback().lock() {
        if let Some(callback) = guard.as_ref() {
            callback(name, data);
        }
    }
}

/// Set the global log callback.
pub fn set_log_callback<F>(callback: F)
where
    F: Fn(LogLevel, &str) + Send + Sync + 'static,
{
    let mut guard = log_callback()
        .lock()
        .unwrap_or_else(PoisonError::into_inner);
    *guard = Some(Box::new(callback));
}

/// Remove the global log callback.
pub fn clear_log_callback() {
    let mut guard = log_callback()
        .lock()
        .unwrap_or_else(PoisonError::into_inner);
    *guard = None;
}

/// Emit a log message.
pub fn emit_log(level: LogLevel, message: &str) {
    if let Ok(guard) = log_callback().lock() {
        if let Some(callback) = guard.as_ref() {
            callback(level, message);
        }
    }
}
