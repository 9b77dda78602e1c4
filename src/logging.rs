//! log4rs setup shared by both binaries.

use log::LevelFilter;
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;
use std::error::Error;
use std::path::Path;

/// Logging config file looked up in the working directory.
pub const LOG_CONFIG_FILE: &str = "log4rs.yml";

/// Log line layout of the built in config.
const PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S)} {h({l:<5})} {t} - {m}{n}";

/// Built in config, everything at `level` and above goes to stderr.
pub fn default_config(level: LevelFilter) -> Result<Config, Box<dyn Error>> {
    let stderr = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(PATTERN)))
        .build();
    let config = Config::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr)))
        .build(Root::builder().appender("stderr").build(level))?;
    Ok(config)
}

/// Start logging from `config_file` when it exists, else with [`default_config`].
///
/// Stdout carries the program output, the shipped configs only log to stderr.
pub fn init_logging(config_file: &Path, level: LevelFilter) -> Result<(), Box<dyn Error>> {
    if config_file.exists() {
        log4rs::init_file(config_file, Default::default())
            .map_err(|e| format!("Error initializing log4rs from {}: {e}", config_file.display()))?;
        log::debug!("Logging configured from {}", config_file.display());
    } else {
        log4rs::init_config(default_config(level)?)?;
    }
    Ok(())
}

/// Parse a level name such as `info` or `DEBUG`, unknown names give `None`.
pub fn parse_level(name: &str) -> Option<LevelFilter> {
    name.trim().parse().ok()
}
