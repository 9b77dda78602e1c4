//! Domain registration lookups.
//!
//! This module handles everything needed to find when a domain expires:
//! - [`client`] - WHOIS queries over TCP
//! - [`parse`] - Expiration date and referral extraction from replies
//! - [`cache`] - Daily JSON cache of lookup results

mod cache;
mod client;
mod parse;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

// Re-export public types and functions
pub use cache::{cache_file_name, CachedLookup, WhoisCache};
pub use client::{WhoisClient, DEFAULT_WHOIS_SERVER, WHOIS_PORT};
pub use parse::{parse_expiration, parse_refer, parse_whois_date};

/// Source of domain expiration dates.
///
/// Failures are not errors here, a domain that can not be looked up has no date.
#[async_trait]
pub trait ExpiryLookup: Send + Sync {
    async fn lookup_expiration(&self, domain: &str) -> Option<DateTime<Utc>>;
}
