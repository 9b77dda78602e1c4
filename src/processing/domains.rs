//! Reduce a list of host names and URLs to unique registrable root domains.

use itertools::Itertools;
use regex::Regex;
use std::error::Error;
use std::net::IpAddr;
use std::path::Path;
use std::sync::OnceLock;

static LABEL_REGEX: OnceLock<Regex> = OnceLock::new();

fn get_label_regex() -> &'static Regex {
    LABEL_REGEX.get_or_init(|| {
        Regex::new(r"^(xn--)?[a-z0-9]([a-z0-9-]{0,61}[a-z0-9])?$").expect("Invalid Regex")
    })
}

/// Pull the host part out of a line that may be a bare name, a URL or `host:port`.
fn host_part(line: &str) -> &str {
    let rest = match line.split_once("://") {
        Some((_, rest)) => rest,
        None => line,
    };
    let rest = rest.split(&['/', '?', '#'][..]).next().unwrap_or("");
    let rest = match rest.rsplit_once('@') {
        Some((_, host)) => host,
        None => rest,
    };
    match rest.split_once(':') {
        Some((host, _port)) => host,
        None => rest,
    }
}

/// Extract the registrable root domain, `www.example.co.uk` gives `example.co.uk`.
///
/// Returns `None` for blank lines, `#` comments, IP addresses, single labels
/// and bare public suffixes such as `org.za`.
pub fn extract_root_domain(line: &str) -> Option<String> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }
    if line.parse::<IpAddr>().is_ok() {
        return None;
    }
    let host = host_part(line).to_lowercase();
    let host = host.trim_end_matches('.');
    let host = host.strip_prefix("*.").unwrap_or(host);
    if host.parse::<IpAddr>().is_ok() {
        return None;
    }

    let labels: Vec<&str> = host.split('.').collect();
    if labels.len() < 2 || !labels.iter().all(|l| get_label_regex().is_match(l)) {
        log::debug!("extract_root_domain({line:?}) not a domain name");
        return None;
    }

    // registrable domain = public suffix plus one label, from the public suffix list
    match psl::domain_str(host) {
        Some(domain) => Some(domain.to_string()),
        None => {
            log::debug!("extract_root_domain({line:?}) is a bare public suffix");
            None
        }
    }
}

/// Sorted unique root domains of all `lines`.
pub fn unique_root_domains<'a, I>(lines: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    lines
        .into_iter()
        .filter_map(extract_root_domain)
        .sorted()
        .dedup()
        .collect()
}

/// Read a domains file, one entry per line, and return its unique root domains.
pub fn read_domains_file<P: AsRef<Path>>(path: P) -> Result<Vec<String>, Box<dyn Error>> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)
        .map_err(|e| format!("Error reading domains file {}: {e}", path.display()))?;
    let domains = unique_root_domains(text.lines());
    log::info!(
        "Read {} lines, {} unique root domains from {}",
        text.lines().count(),
        domains.len(),
        path.display()
    );
    log::debug!("Unique domains: {domains:?}");
    Ok(domains)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_root_domain_plain() {
        assert_eq!(extract_root_domain("example.com").as_deref(), Some("example.com"));
        assert_eq!(
            extract_root_domain("  WWW.Example.COM.  ").as_deref(),
            Some("example.com")
        );
        assert_eq!(
            extract_root_domain("a.b.c.example.org").as_deref(),
            Some("example.org")
        );
    }

    #[test]
    fn test_extract_root_domain_urls() {
        assert_eq!(
            extract_root_domain("https://mail.example.com/inbox?x=1").as_deref(),
            Some("example.com")
        );
        assert_eq!(
            extract_root_domain("ftp://user:pw@files.example.net:2121/pub").as_deref(),
            Some("example.net")
        );
        assert_eq!(
            extract_root_domain("shop.example.com:8443").as_deref(),
            Some("example.com")
        );
        assert_eq!(
            extract_root_domain("*.example.com").as_deref(),
            Some("example.com")
        );
    }

    #[test]
    fn test_extract_root_domain_two_level_suffix() {
        assert_eq!(
            extract_root_domain("shop.example.co.uk").as_deref(),
            Some("example.co.uk")
        );
        assert_eq!(
            extract_root_domain("example.co.nz").as_deref(),
            Some("example.co.nz")
        );
        assert_eq!(extract_root_domain("co.uk"), None);
    }

    #[test]
    fn test_extract_root_domain_public_suffix_list() {
        assert_eq!(
            extract_root_domain("shop.example.org.za").as_deref(),
            Some("example.org.za")
        );
        assert_eq!(
            extract_root_domain("www.example.ne.jp").as_deref(),
            Some("example.ne.jp")
        );
        assert_eq!(
            extract_root_domain("https://www.example.net.br/").as_deref(),
            Some("example.net.br")
        );
        assert_eq!(extract_root_domain("org.za"), None);
        assert_eq!(extract_root_domain("net.br"), None);
    }

    #[test]
    fn test_extract_root_domain_rejects() {
        assert_eq!(extract_root_domain(""), None);
        assert_eq!(extract_root_domain("   "), None);
        assert_eq!(extract_root_domain("# comment.com"), None);
        assert_eq!(extract_root_domain("localhost"), None);
        assert_eq!(extract_root_domain("192.168.1.1"), None);
        assert_eq!(extract_root_domain("http://10.0.0.1:8080/"), None);
        assert_eq!(extract_root_domain("2001:db8::1"), None);
        assert_eq!(extract_root_domain("bad_label.example.com"), None);
    }

    #[test]
    fn test_unique_root_domains() {
        let lines = vec![
            "www.example.com",
            "https://mail.example.com/x",
            "example.com",
            "",
            "shop.example.co.uk",
            "b.org",
            "a.b.org",
        ];
        assert_eq!(
            unique_root_domains(lines),
            vec!["b.org", "example.co.uk", "example.com"]
        );
    }

    #[test]
    fn test_read_domains_file() {
        let domains = read_domains_file("src/tests/test_data/domains.txt")
            .expect("Error reading domains file");
        assert_eq!(
            domains,
            vec!["example.co.uk", "example.com", "example.net", "example.org"]
        );
        assert!(read_domains_file("src/tests/test_data/missing.txt").is_err());
    }
}
