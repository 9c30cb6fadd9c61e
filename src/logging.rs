//! Logger initialization for the vta binary.
//!
//! The TUI owns the terminal, so it logs to a file; the one-shot commands log
//! to stderr only when asked to.

use std::fs::File;
use std::path::{Path, PathBuf};

use log::LevelFilter;
use simplelog::{ColorChoice, Config, ConfigBuilder, TermLogger, TerminalMode, WriteLogger};

/// Destination for log output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogDestination {
    /// Write to the given file, truncated on start.
    File(PathBuf),
    /// Write to stderr.
    Terminal,
    /// No logger is installed.
    Disabled,
}

/// Chooses the level for the given verbosity.
pub fn level_for(verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}

/// Initialize the global logger.
///
/// Failures are reported on stderr and otherwise ignored; running without a
/// logger is always acceptable.
pub fn initialize(destination: LogDestination, level: LevelFilter) {
    let config = build_config();

    let result = match destination {
        LogDestination::File(path) => match create_log_file(&path) {
            Some(file) => WriteLogger::init(level, config, file),
            None => return,
        },
        LogDestination::Terminal => {
            TermLogger::init(level, config, TerminalMode::Stderr, ColorChoice::Auto)
        }
        LogDestination::Disabled => return,
    };

    if let Err(err) = result {
        eprintln!("Warning: Could not initialize logger: {err}");
    }
}

fn build_config() -> Config {
    ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Error)
        // Keep HTTP stack chatter out of the log.
        .add_filter_allow_str("vta")
        .build()
}

fn create_log_file(path: &Path) -> Option<File> {
    if let Err(err) = crate::utils::ensure_parent_directory(path) {
        eprintln!("Warning: {err:#}");
        return None;
    }
    match File::create(path) {
        Ok(file) => Some(file),
        Err(err) => {
            eprintln!("Warning: Could not create log file at {:?}: {}", path, err);
            None
        }
    }
}
