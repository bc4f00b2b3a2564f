//! ICMP probing.
//!
//! # Error handling
//!
//! A probe that gets no reply within its timeout is a valid observation
//! and comes back as `Ok(None)` so the sample loop can still emit a row
//! for the attempt. Only setup-level failures (hostname resolution, raw
//! socket / client creation) are errors, and those are fatal to the
//! run.

use std::net::IpAddr;
use std::time::Duration;

use surge_ping::{Client, Config, ICMP, PingIdentifier, PingSequence};
use thiserror::Error;
use tokio::time::timeout;

/// Probe failures that are not representable as a sample.
#[derive(Debug, Error)]
pub enum ProbeError {
    /// Hostname did not resolve to any address.
    #[error("failed to resolve {host}: {source}")]
    Resolve {
        host: String,
        #[source]
        source: std::io::Error,
    },

    /// ICMP client creation failed (usually missing raw-socket
    /// privileges).
    #[error("failed to create ICMP client: {0}")]
    Setup(#[from] std::io::Error),
}

/// One echo probe against one host, bounded by a timeout.
#[async_trait::async_trait]
pub trait Prober: Send + Sync {
    /// Send a single echo request and return the round-trip delay, or
    /// `None` if no reply arrived within `timeout`.
    async fn probe(&self, host: &str, timeout: Duration) -> Result<Option<Duration>, ProbeError>;
}

/// [`Prober`] backed by real ICMP echo requests.
#[derive(Debug, Default)]
pub struct IcmpProber;

impl IcmpProber {
    pub fn new() -> Self {
        Self
    }
}

/// Resolve a hostname to an IP address, trying a direct parse first.
async fn resolve_host(host: &str) -> Result<IpAddr, std::io::Error> {
    if let Ok(ip) = host.parse::<IpAddr>() {
        return Ok(ip);
    }

    let addrs = tokio::net::lookup_host(format!("{host}:0")).await?;
    addrs
        .into_iter()
        .next()
        .map(|addr| addr.ip())
        .ok_or_else(|| std::io::Error::new(std::io::ErrorKind::NotFound, "no addresses found"))
}

#[async_trait::async_trait]
impl Prober for IcmpProber {
    async fn probe(
        &self,
        host: &str,
        probe_timeout: Duration,
    ) -> Result<Option<Duration>, ProbeError> {
        let ip_addr = resolve_host(host).await.map_err(|source| ProbeError::Resolve {
            host: host.to_string(),
            source,
        })?;

        let client = match ip_addr {
            IpAddr::V4(_) => Client::new(&Config::default()),
            IpAddr::V6(_) => Client::new(&Config::builder().kind(ICMP::V6).build()),
        }?;

        let mut pinger = client.pinger(ip_addr, PingIdentifier(rand::random())).await;
        pinger.timeout(probe_timeout);

        match timeout(probe_timeout, pinger.ping(PingSequence(0), &[])).await {
            Ok(Ok((_, rtt))) => {
                tracing::debug!(host = %host, rtt_ms = rtt.as_secs_f64() * 1000.0, "Echo reply");
                Ok(Some(rtt))
            }
            Ok(Err(e)) => {
                tracing::debug!(host = %host, error = %e, "Probe got no reply");
                Ok(None)
            }
            Err(_) => {
                tracing::debug!(
                    host = %host,
                    timeout_ms = probe_timeout.as_millis(),
                    "Probe timed out"
                );
                Ok(None)
            }
        }
    }
}
