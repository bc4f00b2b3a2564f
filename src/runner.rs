//! The sample loop.
//!
//! Drives the probe/record cycle: for each host in order, run one
//! silenced probe, emit one CSV row, and after a full pass sleep the
//! configured interval. The loop has no terminal state of its own; it
//! ends only through the cancellation token, which is checked between
//! hosts and raced against every blocking await so an interrupt never
//! leaves a partial row behind.

use std::io::Write;
use std::time::Duration;

use thiserror::Error;
use tokio_util::sync::CancellationToken;

use crate::config::ProbeConfig;
use crate::probe::{ProbeError, Prober};
use crate::sample::{RunContext, Sample};
use crate::sink::ConsoleSink;

/// Failures inside the running loop. All fatal; a probe timeout is a
/// sample, not an error.
#[derive(Debug, Error)]
pub enum RunError {
    /// Probe setup failed.
    #[error(transparent)]
    Probe(#[from] ProbeError),

    /// A row could not be serialized or written.
    #[error("failed to write sample: {0}")]
    Csv(#[from] csv::Error),

    /// The access-point comment line could not be serialized.
    #[error("failed to serialize access point info: {0}")]
    Serialize(#[from] serde_json::Error),

    /// A sink rejected a write.
    #[error("output sink error: {0}")]
    Io(#[from] std::io::Error),
}

/// Orchestrates probes against the configured host list and fans each
/// sample out through the sink.
pub struct SampleLoop<P> {
    config: ProbeConfig,
    context: RunContext,
    prober: P,
    console: ConsoleSink,
}

impl<P: Prober> SampleLoop<P> {
    /// Build a loop from startup-resolved context.
    ///
    /// `console` must be the same handle whose clone sits inside the
    /// output sink, so probe-time silencing reaches it.
    pub fn new(config: ProbeConfig, context: RunContext, prober: P, console: ConsoleSink) -> Self {
        Self {
            config,
            context,
            prober,
            console,
        }
    }

    /// Run until cancelled.
    ///
    /// Emits the access-point comment line and the CSV header once,
    /// then rows forever. Cancellation — during a probe, during the
    /// inter-round sleep, or between hosts — returns `Ok(())`.
    pub async fn run<W: Write + Send>(
        &self,
        mut sink: W,
        cancel: CancellationToken,
    ) -> Result<(), RunError> {
        let ap_json = serde_json::to_string(&self.context.info)?;
        sink.write_all(format!("#{ap_json}\n").as_bytes())?;
        sink.flush()?;

        // Comment then header belong to startup, before any probe runs;
        // serialize() must not inject a second header later.
        let mut writer = csv::WriterBuilder::new().has_headers(false).from_writer(sink);
        writer.write_record(["user", "ssid", "bssid", "utc_time", "host", "delay"])?;
        writer.flush()?;

        tracing::info!(
            hosts = ?self.config.hosts,
            ssid = %self.context.info.ssid,
            user = %self.context.user,
            "Sampling started"
        );

        loop {
            for host in &self.config.hosts {
                if cancel.is_cancelled() {
                    return Ok(());
                }
                let delay = tokio::select! {
                    () = cancel.cancelled() => return Ok(()),
                    result = self.probe_silenced(host) => result?,
                };
                let sample = Sample::new(&self.context, host, delay);
                writer.serialize(&sample)?;
                writer.flush()?;
            }
            tokio::select! {
                () = cancel.cancelled() => return Ok(()),
                () = tokio::time::sleep(self.config.interval) => {}
            }
        }
    }

    /// One probe with console output discarded for its duration; the
    /// guard restores the console on every exit path.
    async fn probe_silenced(&self, host: &str) -> Result<Option<Duration>, ProbeError> {
        let _quiet = self.console.silence();
        self.prober.probe(host, self.config.timeout).await
    }
}
