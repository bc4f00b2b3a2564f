//! The per-probe measurement record.

use std::time::Duration;

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::ap::AccessPointInfo;

/// Fixed per-run context every sample carries.
#[derive(Debug, Clone)]
pub struct RunContext {
    /// Effective user identity.
    pub user: String,
    /// Access point captured at startup.
    pub info: AccessPointInfo,
}

/// One measurement, serialized to a CSV row immediately after creation
/// and never retained.
///
/// The column set and order — user, ssid, bssid, utc_time, host,
/// delay — is a compatibility contract with existing log consumers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub user: String,
    pub ssid: String,
    pub bssid: String,
    /// ISO-8601 UTC capture timestamp.
    pub utc_time: String,
    pub host: String,
    /// Round-trip delay in milliseconds; empty on timeout.
    pub delay: Option<f64>,
}

impl Sample {
    /// Build a sample for one probe result, timestamped now.
    pub fn new(context: &RunContext, host: &str, delay: Option<Duration>) -> Self {
        Self {
            user: context.user.clone(),
            ssid: context.info.ssid.clone(),
            bssid: context.info.bssid.clone(),
            utc_time: utc_now(),
            host: host.to_string(),
            delay: delay.map(|d| d.as_secs_f64() * 1000.0),
        }
    }
}

/// Current ISO-8601 UTC timestamp with microsecond precision.
fn utc_now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}
