//! Logger set-up for the two front-ends.
//!
//! The TUI owns the terminal, so it logs to a file; the CLI logs to stderr.

use std::fs::OpenOptions;
use std::path::Path;

use log::LevelFilter;
use simplelog::{ColorChoice, Config, ConfigBuilder, TermLogger, TerminalMode, WriteLogger};

fn config() -> Config {
    ConfigBuilder::new()
        .set_target_level(LevelFilter::Error)
        .set_thread_level(LevelFilter::Debug)
        .build()
}

/// Append log records to `path`, creating parent directories as needed.
pub fn init_file(path: &Path, level: LevelFilter) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    // A second init (tests, re-entry) keeps the first logger.
    let _ = WriteLogger::init(level, config(), file);
    Ok(())
}

/// Log to stderr.
pub fn init_stderr(level: LevelFilter) {
    let _ = TermLogger::init(level, config(), TerminalMode::Stderr, ColorChoice::Auto);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_logger_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("folio.log");
        init_file(&path, LevelFilter::Info).unwrap();
        assert!(path.exists());
    }
}
