//! pingtool — periodic network-reachability probe.
//!
//! Repeatedly measures ICMP round-trip latency to a small set of target
//! hosts, tags each measurement with the current wireless access point
//! (SSID/BSSID) and the invoking user, and appends the results as
//! timestamped CSV rows to both the console and an append-only log
//! file.
//!
//! # Architecture
//!
//! - [`ap`]: platform-specific access-point inspection (airport on
//!   macOS, NetworkManager on Linux), resolved once at startup
//! - [`identity`]: effective-user resolution (`SUDO_USER` aware)
//! - [`probe`]: single-shot ICMP echo probes with timeout-as-data
//!   semantics
//! - [`runner`]: the unbounded sample loop with cooperative
//!   cancellation
//! - [`sink`]: console/file fan-out and scoped console silencing
//!
//! Data flows one direction: AP inspection and identity resolution
//! populate a fixed [`sample::RunContext`] once, the loop drives
//! repeated probes, and every resulting [`sample::Sample`] fans out
//! through the sink.

pub mod ap;
pub mod config;
pub mod identity;
pub mod probe;
pub mod runner;
pub mod sample;
pub mod sink;

pub use ap::{AccessPointInfo, ApError, ApInspector};
pub use config::{ConfigError, ProbeConfig};
pub use identity::{IdentityError, effective_user};
pub use probe::{IcmpProber, ProbeError, Prober};
pub use runner::{RunError, SampleLoop};
pub use sample::{RunContext, Sample};
pub use sink::{ConsoleSink, MultiSink, SilenceGuard};
