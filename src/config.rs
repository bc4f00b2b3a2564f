//! Probe configuration.
//!
//! All configuration is resolved once at startup from the command line;
//! there is no config file. The resolved [`ProbeConfig`] is passed into
//! the sample loop explicitly and never mutated afterwards.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Default per-probe timeout (3 seconds). This is wifi, it can be slow.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(3000);

/// Default pause between full passes over the host list (2 seconds).
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(2);

/// Default log file path, opened in append mode.
pub const DEFAULT_LOG_FILE: &str = "/tmp/pingtool.csv";

/// Hosts probed when none are given on the command line: the usual
/// local gateway address plus a well-known public hostname.
pub const DEFAULT_HOSTS: &[&str] = &["10.11.0.1", "google.com"];

/// Configuration error types.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The host list resolved to nothing.
    #[error("host list is empty")]
    NoHosts,

    /// A host entry is blank.
    #[error("host entry {0} is empty")]
    EmptyHost(usize),

    /// The probe timeout is zero.
    #[error("probe timeout must be non-zero")]
    ZeroTimeout,
}

/// Resolved probe configuration.
#[derive(Debug, Clone)]
pub struct ProbeConfig {
    /// Hosts to probe, in order, every round.
    pub hosts: Vec<String>,
    /// Per-probe timeout.
    pub timeout: Duration,
    /// Pause between rounds.
    pub interval: Duration,
    /// Append-mode log file path.
    pub log_file: PathBuf,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            hosts: DEFAULT_HOSTS.iter().map(|h| (*h).to_string()).collect(),
            timeout: DEFAULT_TIMEOUT,
            interval: DEFAULT_INTERVAL,
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
        }
    }
}

impl ProbeConfig {
    /// Build a configuration from CLI-supplied hosts, falling back to
    /// [`DEFAULT_HOSTS`] when the list is empty.
    pub fn resolve(hosts: Vec<String>) -> Self {
        if hosts.is_empty() {
            Self::default()
        } else {
            Self {
                hosts,
                ..Self::default()
            }
        }
    }

    /// Set the per-probe timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the inter-round interval.
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Set the log file path.
    pub fn with_log_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.log_file = path.into();
        self
    }

    /// Validate configuration values.
    ///
    /// # Errors
    /// Returns `ConfigError` if the host list or timeout is unusable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.hosts.is_empty() {
            return Err(ConfigError::NoHosts);
        }
        if let Some(idx) = self.hosts.iter().position(|h| h.trim().is_empty()) {
            return Err(ConfigError::EmptyHost(idx));
        }
        if self.timeout.is_zero() {
            return Err(ConfigError::ZeroTimeout);
        }
        Ok(())
    }
}
