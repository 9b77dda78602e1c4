//! Expired domain report.

use super::terminal::large_warning;
use crate::models::ExpiredDomain;

/// Report printed by `expired-domains`.
pub fn render_expired_report(expired: &[ExpiredDomain]) -> String {
    if expired.is_empty() {
        return "No expired domains found.".to_string();
    }
    let mut lines = vec![large_warning("WARNING: The following domains have expired:")];
    lines.extend(expired.iter().map(|e| {
        format!(
            "Domain: {}, Expiration Date: {}",
            e.domain,
            e.expiration_date.format("%Y-%m-%d %H:%M:%S")
        )
    }));
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_no_expired_domains() {
        assert_eq!(render_expired_report(&[]), "No expired domains found.");
    }

    #[test]
    fn test_expired_domains_listed() {
        let expired = vec![ExpiredDomain {
            domain: "example.com".to_string(),
            expiration_date: Utc.with_ymd_and_hms(2020, 1, 2, 3, 4, 5).unwrap(),
        }];
        let report = render_expired_report(&expired);
        assert!(report.contains("WARNING: The following domains have expired:"));
        assert!(report.ends_with("\nDomain: example.com, Expiration Date: 2020-01-02 03:04:05"));
    }
}
