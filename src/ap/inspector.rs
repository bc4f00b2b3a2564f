//! Strategy trait and startup detection for access-point inspection.

use std::path::Path;
use std::process::Command;

use super::airport::{AIRPORT_TOOL, AirportInspector};
use super::info::{AccessPointInfo, ApError};
use super::network_manager::NetworkManagerInspector;

/// Trait that each platform inspection strategy implements.
///
/// Each strategy independently guarantees that a returned record has a
/// non-empty SSID and BSSID; callers never need to know which variant
/// is active.
pub trait ApInspector {
    /// Human-readable strategy name, for logging.
    fn name(&self) -> &'static str;

    /// Query the wireless subsystem and return the current AP record.
    fn inspect(&self) -> Result<AccessPointInfo, ApError>;
}

/// Return the inspection strategy for this machine, chosen by probing
/// for tool presence: the macOS airport utility if it exists at its
/// well-known path, otherwise NetworkManager's `nm-tool`.
pub fn detect() -> Box<dyn ApInspector> {
    if Path::new(AIRPORT_TOOL).exists() {
        tracing::debug!(tool = AIRPORT_TOOL, "Using airport inspection strategy");
        Box::new(AirportInspector::new())
    } else {
        tracing::debug!("Airport tool not found, using NetworkManager strategy");
        Box::new(NetworkManagerInspector::new())
    }
}

/// Run an external tool, returning its stdout or an [`ApError`] on
/// launch failure or non-zero exit.
pub(super) fn run_tool(cmd: &str, args: &[&str]) -> Result<String, ApError> {
    let output = Command::new(cmd)
        .args(args)
        .output()
        .map_err(|e| ApError::ToolUnavailable(format!("{cmd}: {e}")))?;
    if !output.status.success() {
        return Err(ApError::ToolFailed {
            tool: cmd.to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        });
    }
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}
