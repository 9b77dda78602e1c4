//! Business logic of both tools.
//!
//! - [`partition`] - Split an IPv6 block into the static /64 allocation
//! - [`domains`] - Reduce domain lists to unique root domains
//! - [`expiry`] - Find domains past their expiration date

mod domains;
mod expiry;
mod partition;

// Re-export public functions
pub use domains::{extract_root_domain, read_domains_file, unique_root_domains};
pub use expiry::find_expired_domains;
pub use partition::{partition, MAX_INPUT_PREFIX, SUBNET_PREFIX};
