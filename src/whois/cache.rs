//! Cache management for WHOIS lookups.
//!
//! Registries rate limit WHOIS, so successful lookups are kept in one JSON file per day.

use super::ExpiryLookup;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::error::Error;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Contents of a cache file.
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
pub struct WhoisCache {
    /// Day the lookups were made.
    pub date: Option<NaiveDate>,
    /// Root domain to expiration date.
    pub entries: BTreeMap<String, DateTime<Utc>>,
}

/// Cache file name for `day`, e.g. `whois_cache_2024-05-01.json`.
pub fn cache_file_name(day: NaiveDate) -> String {
    format!("whois_cache_{}.json", day.format("%Y-%m-%d"))
}

/// Read a cache file, a missing file is an empty cache.
fn read_cache_file(path: &Path) -> Result<WhoisCache, Box<dyn Error>> {
    let json = match std::fs::read_to_string(path) {
        Ok(json) => json,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            log::info!("No cache file yet: {}", path.display());
            return Ok(WhoisCache::default());
        }
        Err(e) => return Err(format!("Error reading cache file {}: {e}", path.display()).into()),
    };
    let mut deserializer = serde_json::Deserializer::from_str(&json);
    let cache: WhoisCache = serde_path_to_error::deserialize(&mut deserializer).map_err(|e| {
        format!(
            "Error parsing cache file {}: path={} error={}",
            path.display(),
            e.path(),
            e
        )
    })?;
    log::info!(
        "Reading {} cached expiration dates from {}",
        cache.entries.len(),
        path.display()
    );
    Ok(cache)
}

/// [`ExpiryLookup`] that answers from the daily cache and asks `inner` on a miss.
pub struct CachedLookup<L> {
    inner: L,
    path: PathBuf,
    cache: Mutex<WhoisCache>,
}

impl<L: ExpiryLookup> CachedLookup<L> {
    /// Open (or start) the cache for `day` in `dir`.
    pub fn open(inner: L, dir: &Path, day: NaiveDate) -> Result<Self, Box<dyn Error>> {
        let path = dir.join(cache_file_name(day));
        let mut cache = read_cache_file(&path)?;
        cache.date = Some(day);
        Ok(CachedLookup {
            inner,
            path,
            cache: Mutex::new(cache),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of cached dates.
    pub fn len(&self) -> usize {
        self.cache.lock().map(|c| c.entries.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Write the cache file.
    pub fn save(&self) -> Result<(), Box<dyn Error>> {
        let json = {
            let cache = self.cache.lock().map_err(|_| "Cache lock poisoned")?;
            serde_json::to_string_pretty(&*cache).map_err(|e| format!("Error serializing JSON: {e}"))?
        };
        log::info!("Writing cache file: {}", self.path.display());
        std::fs::write(&self.path, json)
            .map_err(|e| format!("Error writing cache file {}: {e}", self.path.display()))?;
        Ok(())
    }

    fn cached(&self, domain: &str) -> Option<DateTime<Utc>> {
        self.cache.lock().ok()?.entries.get(domain).copied()
    }
}

#[async_trait]
impl<L: ExpiryLookup> ExpiryLookup for CachedLookup<L> {
    async fn lookup_expiration(&self, domain: &str) -> Option<DateTime<Utc>> {
        if let Some(date) = self.cached(domain) {
            log::debug!("Cache hit {domain}: {date}");
            return Some(date);
        }
        // failed lookups are not cached, the next run tries again
        let date = self.inner.lookup_expiration(domain).await?;
        if let Ok(mut cache) = self.cache.lock() {
            cache.entries.insert(domain.to_string(), date);
        }
        Some(date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Counts calls, knows only `example.com`.
    #[derive(Default)]
    struct CountingLookup {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl ExpiryLookup for CountingLookup {
        async fn lookup_expiration(&self, domain: &str) -> Option<DateTime<Utc>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            (domain == "example.com").then(|| Utc.with_ymd_and_hms(2020, 1, 2, 3, 4, 5).unwrap())
        }
    }

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
    }

    #[test]
    fn test_cache_file_name() {
        assert_eq!(cache_file_name(day()), "whois_cache_2024-05-01.json");
    }

    #[tokio::test]
    async fn test_cache_hit_skips_inner_lookup() {
        let dir = tempfile::tempdir().unwrap();
        let lookup = CachedLookup::open(CountingLookup::default(), dir.path(), day()).unwrap();
        assert!(lookup.is_empty());

        let first = lookup.lookup_expiration("example.com").await;
        let second = lookup.lookup_expiration("example.com").await;
        assert_eq!(first, second);
        assert!(first.is_some());
        assert_eq!(lookup.inner.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_failures_are_not_cached() {
        let dir = tempfile::tempdir().unwrap();
        let lookup = CachedLookup::open(CountingLookup::default(), dir.path(), day()).unwrap();
        assert_eq!(lookup.lookup_expiration("unknown.org").await, None);
        assert_eq!(lookup.lookup_expiration("unknown.org").await, None);
        assert_eq!(lookup.inner.calls.load(Ordering::SeqCst), 2);
        assert!(lookup.is_empty());
    }

    #[tokio::test]
    async fn test_save_and_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let lookup = CachedLookup::open(CountingLookup::default(), dir.path(), day()).unwrap();
        lookup.lookup_expiration("example.com").await;
        lookup.save().expect("Error writing cache");
        assert!(lookup.path().ends_with("whois_cache_2024-05-01.json"));

        let reopened = CachedLookup::open(CountingLookup::default(), dir.path(), day()).unwrap();
        assert_eq!(reopened.len(), 1);
        assert!(reopened.lookup_expiration("example.com").await.is_some());
        assert_eq!(reopened.inner.calls.load(Ordering::SeqCst), 0);

        // another day starts empty
        let next_day = day().succ_opt().unwrap();
        let fresh = CachedLookup::open(CountingLookup::default(), dir.path(), next_day).unwrap();
        assert!(fresh.is_empty());
    }

    #[test]
    fn test_read_cache_fixture() {
        let cache = read_cache_file(Path::new("src/tests/test_data/whois_cache_2024-05-01.json"))
            .expect("Error reading cache fixture");
        assert_eq!(cache.date, Some(day()));
        assert_eq!(cache.entries.len(), 2);
        assert_eq!(
            cache.entries["example.com"],
            Utc.with_ymd_and_hms(2025, 8, 13, 4, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_read_cache_bad_json_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, r#"{"date":"2024-05-01","entries":{"a.com":"soon"}}"#).unwrap();
        let err = read_cache_file(&path).unwrap_err().to_string();
        assert!(err.contains("entries.a.com"), "{err}");
    }
}
