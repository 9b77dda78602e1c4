//! Find the domains whose registration has run out.

use crate::models::ExpiredDomain;
use crate::whois::ExpiryLookup;
use chrono::{DateTime, Utc};
use futures::stream::{self, StreamExt};

/// Look up every domain and return those with an expiration date before `now`.
///
/// At most `concurrency` lookups run at the same time. Domains without a known
/// date are skipped. The result is sorted by domain name.
pub async fn find_expired_domains<L>(
    domains: &[String],
    lookup: &L,
    now: DateTime<Utc>,
    concurrency: usize,
) -> Vec<ExpiredDomain>
where
    L: ExpiryLookup + ?Sized,
{
    log::info!(
        "Finding expired domains among {} with {} parallel lookups...",
        domains.len(),
        concurrency
    );

    let mut expired: Vec<ExpiredDomain> = stream::iter(domains)
        .map(|domain| async move {
            let expiration_date = lookup.lookup_expiration(domain).await?;
            (expiration_date < now).then(|| ExpiredDomain {
                domain: domain.clone(),
                expiration_date,
            })
        })
        .buffer_unordered(concurrency.max(1))
        .filter_map(|found| async move { found })
        .collect()
        .await;

    expired.sort_by(|a, b| a.domain.cmp(&b.domain));
    log::info!("Found {} expired domains", expired.len());
    expired
}
