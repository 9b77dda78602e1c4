//! WHOIS (RFC 3912) client over TCP port 43.

use super::parse::{parse_expiration, parse_refer};
use super::ExpiryLookup;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use colored::Colorize;
use std::error::Error;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::time::timeout;

/// Default bootstrap server, it refers to the WHOIS server of each TLD.
pub const DEFAULT_WHOIS_SERVER: &str = "whois.iana.org";
pub const WHOIS_PORT: u16 = 43;
/// Replies larger than this are cut off.
const MAX_REPLY_BYTES: u64 = 512 * 1024;

/// Looks up expiration dates from the registry WHOIS servers.
#[derive(Debug, Clone)]
pub struct WhoisClient {
    bootstrap_server: String,
    port: u16,
    timeout: Duration,
}

impl WhoisClient {
    pub fn new(bootstrap_server: &str, timeout: Duration) -> Self {
        WhoisClient {
            bootstrap_server: bootstrap_server.to_string(),
            port: WHOIS_PORT,
            timeout,
        }
    }

    /// Use another TCP port for every server, only test servers listen elsewhere.
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Send one query to `server` and return the whole reply.
    pub async fn query(&self, server: &str, query: &str) -> Result<String, Box<dyn Error>> {
        log::debug!("whois -h {server} {query}", server = server.on_blue());
        let exchange = async {
            let mut stream = TcpStream::connect((server, self.port)).await?;
            stream.write_all(format!("{query}\r\n").as_bytes()).await?;
            let mut reply = Vec::new();
            (&mut stream)
                .take(MAX_REPLY_BYTES)
                .read_to_end(&mut reply)
                .await?;
            Ok::<Vec<u8>, std::io::Error>(reply)
        };
        let reply = timeout(self.timeout, exchange)
            .await
            .map_err(|_| format!("Timeout after {:?} querying {server}", self.timeout))?
            .map_err(|e| format!("Error querying {server}: {e}"))?;

        log::trace!("whois {server} {query} reply.len()={}", reply.len());
        Ok(String::from_utf8_lossy(&reply).into_owned())
    }

    /// Find the WHOIS server responsible for the TLD of `domain`.
    pub async fn referral_server(&self, domain: &str) -> Result<String, Box<dyn Error>> {
        let tld = domain
            .rsplit('.')
            .next()
            .filter(|t| !t.is_empty())
            .ok_or_else(|| format!("No TLD in {domain}"))?;
        let reply = self.query(&self.bootstrap_server, tld).await?;
        parse_refer(&reply).ok_or_else(|| format!("No WHOIS server for .{tld}").into())
    }

    /// Expiration date of `domain`, or an error describing why there is none.
    pub async fn expiration(&self, domain: &str) -> Result<DateTime<Utc>, Box<dyn Error>> {
        let server = self.referral_server(domain).await?;
        let reply = self.query(&server, domain).await?;
        parse_expiration(&reply)
            .ok_or_else(|| format!("No expiration date in reply from {server} for {domain}").into())
    }
}

#[async_trait]
impl ExpiryLookup for WhoisClient {
    async fn lookup_expiration(&self, domain: &str) -> Option<DateTime<Utc>> {
        log::info!("Fetching expiration date for domain: {domain}...");
        match self.expiration(domain).await {
            Ok(date) => {
                log::info!("Expiration date for domain {domain}: {date}");
                Some(date)
            }
            Err(e) => {
                log::warn!(
                    "{failed} to fetch expiration date for domain: {domain}: {e}",
                    failed = "failed".on_red()
                );
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncBufReadExt, BufReader};
    use tokio::net::TcpListener;

    /// Local WHOIS server, TLD queries get a referral back to itself.
    async fn fake_whois(domain_reply: &'static str) -> u16 {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        tokio::spawn(async move {
            loop {
                let (socket, _) = listener.accept().await.unwrap();
                let mut socket = BufReader::new(socket);
                let mut query = String::new();
                socket.read_line(&mut query).await.unwrap();
                let reply = if query.trim().contains('.') {
                    domain_reply.to_string()
                } else {
                    format!("domain: {}\nrefer: 127.0.0.1\n", query.trim())
                };
                socket.get_mut().write_all(reply.as_bytes()).await.unwrap();
            }
        });
        port
    }

    #[tokio::test]
    async fn test_query_reads_whole_reply() {
        let port = fake_whois("Registry Expiry Date: 2025-08-13T04:00:00Z\r\n").await;
        let client = WhoisClient::new("127.0.0.1", Duration::from_secs(5)).with_port(port);
        let reply = client.query("127.0.0.1", "example.com").await.unwrap();
        assert_eq!(reply, "Registry Expiry Date: 2025-08-13T04:00:00Z\r\n");
    }

    #[tokio::test]
    async fn test_expiration_follows_referral() {
        let port = fake_whois("Registry Expiry Date: 2025-08-13T04:00:00Z\r\n").await;
        let client = WhoisClient::new("127.0.0.1", Duration::from_secs(5)).with_port(port);
        assert_eq!(
            client.referral_server("example.com").await.unwrap(),
            "127.0.0.1"
        );
        let date = client.lookup_expiration("example.com").await.unwrap();
        assert_eq!(date.to_rfc3339(), "2025-08-13T04:00:00+00:00");
    }

    #[tokio::test]
    async fn test_expiration_without_date_is_none() {
        let port = fake_whois("No match for \"EXAMPLE.COM\".\r\n").await;
        let client = WhoisClient::new("127.0.0.1", Duration::from_secs(5)).with_port(port);
        assert!(client.expiration("example.com").await.is_err());
        assert_eq!(client.lookup_expiration("example.com").await, None);
    }

    #[tokio::test]
    async fn test_referral_server_rejects_empty_tld() {
        let client = WhoisClient::new("whois.invalid", Duration::from_millis(100));
        assert!(client.referral_server("example.").await.is_err());
    }

    #[tokio::test]
    async fn test_lookup_unreachable_server_is_none() {
        let client = WhoisClient::new("whois.invalid", Duration::from_millis(500));
        assert_eq!(client.lookup_expiration("example.com").await, None);
    }
}
