//! Linux NetworkManager (`nm-tool`) inspection strategy.
//!
//! `nm-tool` prints one summary line per visible network; the active
//! association is the single line starting with `*` and tagged `Infra`:
//!
//! ```text
//!   *home:           Infra, aa:bb:cc:dd:ee:ff, Freq 2437 MHz, Rate 54 Mb/s, Strength 80
//! ```
//!
//! Unlike the airport dump this is a fixed-position format: the SSID is
//! the first field (wrapped in `*` and `:`), the BSSID the third
//! (comma-terminated). No auxiliary numeric attributes are available.

use std::collections::BTreeMap;

use super::info::{AccessPointInfo, ApError};
use super::inspector::{ApInspector, run_tool};

/// Inspection strategy backed by NetworkManager's `nm-tool`.
#[derive(Debug, Default)]
pub struct NetworkManagerInspector;

impl NetworkManagerInspector {
    pub fn new() -> Self {
        Self
    }
}

impl ApInspector for NetworkManagerInspector {
    fn name(&self) -> &'static str {
        "nm-tool"
    }

    fn inspect(&self) -> Result<AccessPointInfo, ApError> {
        let output = run_tool("nm-tool", &[])?;
        parse_nm_tool_output(&output)
    }
}

/// Extract the active-AP record from full `nm-tool` output.
///
/// Exactly one active-infrastructure summary line must be present;
/// zero (not associated) or several (output shape changed) is fatal.
pub fn parse_nm_tool_output(output: &str) -> Result<AccessPointInfo, ApError> {
    let matching: Vec<&str> = output
        .lines()
        .filter(|line| {
            let trimmed = line.trim_start();
            trimmed.starts_with('*') && trimmed.contains("Infra")
        })
        .collect();
    if matching.len() != 1 {
        return Err(ApError::SummaryShape(matching.len()));
    }
    parse_summary_line(matching[0])
}

fn parse_summary_line(line: &str) -> Result<AccessPointInfo, ApError> {
    let chunks: Vec<&str> = line.split_whitespace().collect();
    if chunks.len() < 3 {
        return Err(ApError::Parse(line.to_string()));
    }

    let ssid = chunks[0]
        .strip_prefix('*')
        .and_then(|s| s.strip_suffix(':'))
        .ok_or_else(|| ApError::Parse(line.to_string()))?;
    let bssid = chunks[2].trim_end_matches(',');

    let mut fields = BTreeMap::new();
    fields.insert("SSID".to_string(), ssid.to_string());
    fields.insert("BSSID".to_string(), bssid.to_string());
    AccessPointInfo::from_fields(fields, &[])
}
