//! Access-point inspection.
//!
//! Captures the identity of the wireless network the machine is
//! currently associated with, by invoking a platform-specific external
//! tool and parsing its textual output.
//!
//! - [`AccessPointInfo`]: the captured record (SSID, BSSID, auxiliary
//!   signal attributes)
//! - [`ApInspector`]: strategy trait implemented once per platform tool
//! - [`detect`]: pick the strategy for this machine at startup

mod airport;
mod info;
mod inspector;
mod network_manager;

pub use airport::{AirportInspector, parse_airport_output};
pub use info::{AccessPointInfo, ApError, AttrValue};
pub use inspector::{ApInspector, detect};
pub use network_manager::{NetworkManagerInspector, parse_nm_tool_output};
