//! Two small network housekeeping tools.
//!
//! - `ipv6-split` splits a delegated IPv6 block into /64s and prints the
//!   Docker and pfSense steps for the static allocation.
//! - `expired-domains` reduces a domain list to root domains and reports
//!   the ones whose registration ran out.

pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod output;
pub mod processing;
pub mod whois;

use chrono::Utc;
use config::DomainCheckConfig;
use error::SplitError;
use models::ExpiredDomain;
use std::error::Error;
use whois::{CachedLookup, ExpiryLookup, WhoisClient};

/// Compute the allocation of `range_text` and render the whole checklist.
pub fn split_ipv6_range(range_text: &str) -> Result<String, SplitError> {
    let plan = processing::partition(range_text)?;
    log::info!("Split {} for {}", plan.network, range_text.trim());
    Ok(output::render_checklist(&plan))
}

/// Read the domains file and return the expired root domains.
pub async fn check_domains(config: &DomainCheckConfig) -> Result<Vec<ExpiredDomain>, Box<dyn Error>> {
    let domains = processing::read_domains_file(&config.domains_file)?;
    let client = WhoisClient::new(&config.whois_server, config.timeout);
    let now = Utc::now();

    match &config.cache_dir {
        Some(dir) => {
            let lookup = CachedLookup::open(client, dir, now.date_naive())?;
            let expired = check_with(&domains, &lookup, config.concurrency).await;
            lookup.save()?;
            Ok(expired)
        }
        None => Ok(check_with(&domains, &client, config.concurrency).await),
    }
}

async fn check_with<L: ExpiryLookup>(
    domains: &[String],
    lookup: &L,
    concurrency: usize,
) -> Vec<ExpiredDomain> {
    processing::find_expired_domains(domains, lookup, Utc::now(), concurrency).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_ipv6_range() {
        let text = split_ipv6_range("2001:db8::/56").expect("valid range");
        assert!(text.starts_with("LAN subnet: 2001:db8::/64\n"));
        assert!(text.contains("\nDOCKER:\n"));
        assert!(text.contains("\nPFSENSE:\n"));
    }

    #[test]
    fn test_split_ipv6_range_invalid() {
        assert_eq!(
            split_ipv6_range("2001:db8::/60").unwrap_err().to_string(),
            "Should be /59 IPv6 range or larger."
        );
    }

    #[tokio::test]
    async fn test_check_domains_missing_file() {
        let config = DomainCheckConfig {
            domains_file: "src/tests/test_data/missing.txt".into(),
            cache_dir: None,
            ..Default::default()
        };
        assert!(check_domains(&config).await.is_err());
    }
}
