//! Extract fields from free form WHOIS replies.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use regex::Regex;
use std::sync::OnceLock;

static EXPIRY_REGEX: OnceLock<Regex> = OnceLock::new();
static REFER_REGEX: OnceLock<Regex> = OnceLock::new();

/// Matches `<expiry key>: <value>` lines, registries spell the key many ways.
///
/// Only blanks are skipped around the colon, a key with an empty value must not
/// take the next line as its value.
fn get_expiry_regex() -> &'static Regex {
    EXPIRY_REGEX.get_or_init(|| {
        Regex::new(
            r"(?im)^[ \t]*(?:registry expiry date|registrar registration expiration date|expiration date|expiry date|expiration time|expires(?: on)?|expire date|paid-till|valid until|renewal date)[ \t]*:[ \t]*([^\r\n]+?)[ \t\r]*$",
        )
        .expect("Invalid Regex")
    })
}

fn get_refer_regex() -> &'static Regex {
    REFER_REGEX.get_or_init(|| {
        Regex::new(r"(?im)^[ \t]*(?:refer|whois|registrar whois server)[ \t]*:[ \t]*([a-z0-9.-]+)[ \t\r]*$")
            .expect("Invalid Regex")
    })
}

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.fZ",
    "%Y-%m-%dT%H:%M:%SZ",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y.%m.%d %H:%M:%S",
    "%d.%m.%Y %H:%M:%S",
];

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d", "%d-%b-%Y", "%Y.%m.%d", "%d.%m.%Y", "%Y/%m/%d", "%d/%m/%Y", "%Y%m%d",
];

/// Parse one WHOIS date value into UTC.
///
/// Values without a time are taken as midnight UTC. Trailing text after the first
/// space of a date only value (`2025-01-01 (YYYY-MM-DD)`) is ignored.
pub fn parse_whois_date(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, format) {
            return Some(Utc.from_utc_datetime(&dt));
        }
    }
    let date_part = value.split_whitespace().next().unwrap_or("");
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(date_part, format) {
            return date.and_hms_opt(0, 0, 0).map(|dt| Utc.from_utc_datetime(&dt));
        }
    }
    None
}

/// Find the expiration date in a WHOIS reply, the earliest one if the reply lists several.
pub fn parse_expiration(text: &str) -> Option<DateTime<Utc>> {
    get_expiry_regex()
        .captures_iter(text)
        .filter_map(|c| {
            let value = c.get(1)?.as_str();
            let parsed = parse_whois_date(value);
            if parsed.is_none() {
                log::debug!("Unknown WHOIS date format: {value:?}");
            }
            parsed
        })
        .min()
}

/// The WHOIS server a reply refers to, if any.
pub fn parse_refer(text: &str) -> Option<String> {
    get_refer_regex()
        .captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_lowercase())
}
