//! Blocklist/DNS feature (`statistical_report`)
//!
//! The one signal that leaves the snapshot: the raw URL is matched against a
//! fixed suspicious-domain pattern, and failing that the hostname is resolved
//! and its address compared against a fixed suspicious-IP set. Resolution
//! failure is an expected outcome mapped to a distinguished neutral value,
//! never an error.

use regex::Regex;
use tracing::debug;
use trust_dns_resolver::config::{ResolverConfig, ResolverOpts};
use trust_dns_resolver::TokioAsyncResolver;

use crate::error::{PhishError, Result};

/// Suspicious URL (or resolved IP on a blocklist).
pub const SUSPICIOUS: f32 = 1.0;
/// Resolvable hostname, not on any list.
pub const NORMAL: f32 = 0.0;
/// DNS resolution failed; deliberately distinct from both outcomes above.
pub const DNS_NEUTRAL: f32 = 2.0;

const SUSPICIOUS_URL_PATTERN: &str = concat!(
    r"at\.ua|usa\.cc|baltazarpresentes\.com\.br|pe\.hu|esy\.es|hol\.es|",
    r"sweddy\.com|myjino\.ru|96\.lt|ow\.ly",
);

/// IPs observed serving phishing kits; compared against resolved addresses.
const SUSPICIOUS_IPS: &[&str] = &[
    "146.112.61.108", "213.174.157.151", "121.50.168.88", "192.185.217.116",
    "78.46.211.158", "181.174.165.13", "46.242.145.103", "121.50.168.40",
    "83.125.22.219", "46.242.145.98", "107.151.148.44", "107.151.148.107",
    "64.70.19.203", "199.184.144.27", "107.151.148.108", "107.151.148.109",
    "119.28.52.61", "54.83.43.69", "52.69.166.231", "216.58.192.225",
    "118.184.25.86", "67.208.74.71", "23.253.126.58", "104.239.157.210",
    "175.126.123.219", "141.8.224.221", "10.10.10.10", "43.229.108.32",
    "103.232.215.140", "69.172.201.153", "216.218.185.162", "54.225.104.146",
    "103.243.24.98", "199.59.243.120", "31.170.160.61", "213.19.128.77",
    "62.113.226.131", "208.100.26.234", "195.16.127.102", "195.16.127.157",
    "34.196.13.28", "103.224.212.222", "172.217.4.225", "54.72.9.51",
    "192.64.147.141", "198.200.56.183", "23.253.164.103", "52.48.191.26",
    "52.214.197.72", "87.98.255.18", "209.99.17.27", "216.38.62.18",
    "104.130.124.96", "47.89.58.141", "54.86.225.156", "54.82.156.19",
    "37.157.192.102", "204.11.56.48", "110.34.231.42",
];

/// Resolver for the `statistical_report` feature.
///
/// Holds the compiled URL pattern and a shared DNS resolver; constructed once
/// at startup alongside the extractor.
pub struct StatisticalReporter {
    url_pattern: Regex,
    resolver: TokioAsyncResolver,
}

impl StatisticalReporter {
    pub fn new() -> Result<Self> {
        let url_pattern = Regex::new(SUSPICIOUS_URL_PATTERN)
            .map_err(|e| PhishError::Config(format!("suspicious URL pattern: {e}")))?;
        let resolver =
            TokioAsyncResolver::tokio(ResolverConfig::default(), ResolverOpts::default());
        Ok(Self { url_pattern, resolver })
    }

    /// Compute the three-valued `statistical_report` feature.
    pub async fn report(&self, url: &str, hostname: &str) -> f32 {
        if !url.is_empty() && self.url_pattern.is_match(url) {
            debug!("statistical_report: suspicious URL pattern matched in {url}");
            return SUSPICIOUS;
        }

        let hostname = hostname.trim().trim_start_matches('[').trim_end_matches(']');
        if hostname.is_empty() {
            return DNS_NEUTRAL;
        }

        match self.resolver.lookup_ip(hostname).await {
            Ok(lookup) => {
                let listed = lookup
                    .iter()
                    .any(|ip| SUSPICIOUS_IPS.contains(&ip.to_string().as_str()));
                if listed {
                    debug!("statistical_report: suspicious IP for {hostname}");
                    SUSPICIOUS
                } else {
                    NORMAL
                }
            }
            Err(e) => {
                // Expected for dead or fabricated hostnames; not a fault.
                debug!("statistical_report: DNS lookup failed for {hostname}: {e}");
                DNS_NEUTRAL
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_suspicious_url_pattern_short_circuits_dns() {
        let reporter = StatisticalReporter::new().unwrap();
        let value = reporter.report("http://ow.ly/abc123", "ow.ly").await;
        assert_eq!(value, SUSPICIOUS);
    }

    #[tokio::test]
    async fn test_empty_hostname_is_neutral() {
        let reporter = StatisticalReporter::new().unwrap();
        let value = reporter.report("http://example.com/x", "").await;
        assert_eq!(value, DNS_NEUTRAL);
    }

    #[tokio::test]
    async fn test_dns_failure_is_neutral_not_error() {
        let reporter = StatisticalReporter::new().unwrap();
        // .invalid is reserved and never resolves
        let value = reporter
            .report("http://host.invalid/x", "host.invalid")
            .await;
        assert_eq!(value, DNS_NEUTRAL);
    }
}
