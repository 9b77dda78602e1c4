//! Settings of the `expired-domains` tool, read from the environment (and `.env`).

use crate::whois::DEFAULT_WHOIS_SERVER;
use log::LevelFilter;
use std::error::Error;
use std::path::PathBuf;
use std::time::Duration;

/// Domains file used when neither the command line nor `DOMAINS_FILE` names one.
pub const DEFAULT_DOMAINS_FILE: &str = "domains.txt";

/// Settings of one `expired-domains` run, each field names its environment variable.
#[derive(Debug, Clone, PartialEq)]
pub struct DomainCheckConfig {
    /// `DOMAINS_FILE`
    pub domains_file: PathBuf,
    /// `WHOIS_SERVER`, bootstrap server asked for each TLD's server.
    pub whois_server: String,
    /// `WHOIS_TIMEOUT_SECS`
    pub timeout: Duration,
    /// `WHOIS_CONCURRENCY`
    pub concurrency: usize,
    /// `WHOIS_CACHE_DIR`, `None` disables the daily cache.
    pub cache_dir: Option<PathBuf>,
    /// `LOG_LEVEL`, used when there is no log4rs.yml.
    pub log_level: LevelFilter,
}

impl Default for DomainCheckConfig {
    fn default() -> Self {
        DomainCheckConfig {
            domains_file: PathBuf::from(DEFAULT_DOMAINS_FILE),
            whois_server: DEFAULT_WHOIS_SERVER.to_string(),
            timeout: Duration::from_secs(10),
            concurrency: 4,
            cache_dir: Some(PathBuf::from(".")),
            log_level: LevelFilter::Info,
        }
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, Box<dyn Error>> {
    value
        .trim()
        .parse()
        .map_err(|_| format!("{key}={value:?} is not a valid number").into())
}

impl DomainCheckConfig {
    /// Read the settings from the process environment.
    pub fn from_env() -> Result<Self, Box<dyn Error>> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the settings through `get`, unset keys keep their default.
    pub fn from_lookup<F>(get: F) -> Result<Self, Box<dyn Error>>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = DomainCheckConfig::default();
        if let Some(file) = get("DOMAINS_FILE") {
            config.domains_file = PathBuf::from(file);
        }
        if let Some(server) = get("WHOIS_SERVER") {
            config.whois_server = server.trim().to_string();
        }
        if let Some(secs) = get("WHOIS_TIMEOUT_SECS") {
            config.timeout = Duration::from_secs(parse_number("WHOIS_TIMEOUT_SECS", &secs)?);
        }
        if let Some(n) = get("WHOIS_CONCURRENCY") {
            let n: usize = parse_number("WHOIS_CONCURRENCY", &n)?;
            if n == 0 {
                return Err("WHOIS_CONCURRENCY must be at least 1".into());
            }
            config.concurrency = n;
        }
        if let Some(dir) = get("WHOIS_CACHE_DIR") {
            // empty value turns the cache off
            config.cache_dir = (!dir.trim().is_empty()).then(|| PathBuf::from(dir.trim()));
        }
        if let Some(level) = get("LOG_LEVEL") {
            config.log_level = crate::logging::parse_level(&level)
                .ok_or_else(|| format!("LOG_LEVEL={level:?} is not a log level"))?;
        }
        Ok(config)
    }
}
