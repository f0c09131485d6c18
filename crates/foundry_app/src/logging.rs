//! Logging initialization for the foundry CLI.
//!
//! File output goes to `./foundry.log` in the current working directory.

use std::fs::File;

use log::LevelFilter;
use simplelog::{
    ColorChoice, CombinedLogger, Config, ConfigBuilder, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};

const LOG_FILE: &str = "./foundry.log";

/// Destination for log output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogDestination {
    /// Write to ./foundry.log in the current directory.
    File,
    /// Write to the terminal.
    Terminal,
    /// Write to both file and terminal.
    Both,
}

impl LogDestination {
    fn to_terminal(self) -> bool {
        matches!(self, LogDestination::Terminal | LogDestination::Both)
    }

    fn to_file(self) -> bool {
        matches!(self, LogDestination::File | LogDestination::Both)
    }
}

/// Initialize the global logger for the chosen destination. Safe to call
/// once per process; a failure to create the log file degrades to
/// whatever sinks remain.
pub fn initialize(destination: LogDestination) {
    let level = LevelFilter::Info;
    let config = build_config();

    let mut sinks: Vec<Box<dyn SharedLogger>> = Vec::new();
    if destination.to_terminal() {
        sinks.push(TermLogger::new(
            level,
            config.clone(),
            TerminalMode::Mixed,
            ColorChoice::Auto,
        ));
    }
    if destination.to_file() {
        match File::create(LOG_FILE) {
            Ok(file) => sinks.push(WriteLogger::new(level, config, file)),
            Err(err) => eprintln!("warning: could not create {LOG_FILE}: {err}"),
        }
    }
    if sinks.is_empty() {
        return;
    }
    let _ = CombinedLogger::init(sinks);
}

fn build_config() -> Config {
    ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Error)
        .build()
}
