#![deny(missing_docs)]
//! Shared logging utilities for the foundry workspace.
//!
//! This crate provides the `foundry_*` logging macros used across the
//! codebase and a minimal test initializer for the global logger.

/// Trace-level logging through the global facade.
#[macro_export]
macro_rules! foundry_trace {
    ($($arg:tt)*) => {{
        log::trace!($($arg)*);
    }};
}

/// Info-level logging through the global facade.
#[macro_export]
macro_rules! foundry_info {
    ($($arg:tt)*) => {{
        log::info!($($arg)*);
    }};
}

/// Debug-level logging through the global facade.
#[macro_export]
macro_rules! foundry_debug {
    ($($arg:tt)*) => {{
        log::debug!($($arg)*);
    }};
}

/// Warn-level logging through the global facade.
#[macro_export]
macro_rules! foundry_warn {
    ($($arg:tt)*) => {{
        log::warn!($($arg)*);
    }};
}

/// Error-level logging through the global facade.
#[macro_export]
macro_rules! foundry_error {
    ($($arg:tt)*) => {{
        log::error!($($arg)*);
    }};
}

/// Initializes a terminal logger for unit tests. No-ops when another
/// logger is already installed, so every test can call it freely.
pub fn initialize_for_tests() {
    use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

    // Debug builds get debug-level output, release builds info.
    let level = if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    let _ = TermLogger::init(level, Config::default(), TerminalMode::Mixed, ColorChoice::Auto);
}
