//! macOS `airport -I` inspection strategy.
//!
//! The airport utility prints full key/value wireless diagnostics, one
//! colon-delimited pair per line:
//!
//! ```text
//!      agrCtlRSSI: -84
//!     agrCtlNoise: -90
//!           state: running
//!           BSSID: 1c:17:d3:17:79:70
//!            SSID: twilio
//!         channel: 6
//! ```
//!
//! Values may themselves contain colons (the BSSID is a MAC address),
//! so each line is split on the first colon only.

use std::collections::BTreeMap;

use super::info::{AccessPointInfo, ApError};
use super::inspector::{ApInspector, run_tool};

/// Well-known path of the private airport utility.
pub const AIRPORT_TOOL: &str =
    "/System/Library/PrivateFrameworks/Apple80211.framework/Versions/Current/Resources/airport";

/// Keys whose values are coerced to integers; any of these missing or
/// non-numeric invalidates the whole record.
const INT_KEYS: &[&str] = &[
    "agrCtlRSSI",
    "agrExtRSSI",
    "agrCtlNoise",
    "agrExtNoise",
    "lastTxRate",
    "maxRate",
    "lastAssocStatus",
    "MCS",
    "channel",
];

/// Inspection strategy backed by the macOS airport utility.
#[derive(Debug, Default)]
pub struct AirportInspector;

impl AirportInspector {
    pub fn new() -> Self {
        Self
    }
}

impl ApInspector for AirportInspector {
    fn name(&self) -> &'static str {
        "airport"
    }

    fn inspect(&self) -> Result<AccessPointInfo, ApError> {
        let output = run_tool(AIRPORT_TOOL, &["-I"])?;
        parse_airport_output(&output)
    }
}

/// Parse the full `airport -I` diagnostic dump into an
/// [`AccessPointInfo`].
pub fn parse_airport_output(output: &str) -> Result<AccessPointInfo, ApError> {
    let mut fields = BTreeMap::new();
    for line in output.lines() {
        if line.trim().is_empty() {
            continue;
        }
        // First colon only: MAC-address values contain colons too.
        let (key, value) = line
            .split_once(':')
            .ok_or_else(|| ApError::Parse(line.to_string()))?;
        fields.insert(key.trim().to_string(), value.trim().to_string());
    }
    AccessPointInfo::from_fields(fields, INT_KEYS)
}
