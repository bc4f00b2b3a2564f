//! The captured access-point record and its parse errors.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while locating or parsing the platform wireless tool.
///
/// Every variant is fatal: access-point identity is resolved once at
/// startup and the run does not begin without it.
#[derive(Debug, Error)]
pub enum ApError {
    /// No usable platform tool was found.
    #[error("no wireless status tool available: {0}")]
    ToolUnavailable(String),

    /// The tool ran but exited non-zero.
    #[error("`{tool}` failed: {stderr}")]
    ToolFailed { tool: String, stderr: String },

    /// A line of tool output did not match the expected shape.
    #[error("unparseable tool output line: {0:?}")]
    Parse(String),

    /// A required key was absent from the tool output.
    #[error("missing key in tool output: {0}")]
    MissingKey(&'static str),

    /// A declared numeric key carried a non-numeric value.
    #[error("key {key} is not an integer: {value:?}")]
    InvalidNumber { key: &'static str, value: String },

    /// The summary-line strategy expected exactly one matching line.
    #[error("expected exactly one active connection line, found {0}")]
    SummaryShape(usize),
}

/// One auxiliary attribute value: integer for the declared numeric
/// keys, text for everything else.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttrValue {
    Int(i64),
    Text(String),
}

/// Identity and signal attributes of the currently associated access
/// point.
///
/// Captured once per process run and immutable thereafter; every
/// emitted sample reuses the same record. Serializes to the JSON object
/// written as the log's leading comment line, with the `SSID`/`BSSID`
/// key spelling preserved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessPointInfo {
    /// Network name. Always present and non-empty.
    #[serde(rename = "SSID")]
    pub ssid: String,

    /// Radio hardware address. Always present and non-empty.
    #[serde(rename = "BSSID")]
    pub bssid: String,

    /// Remaining tool-reported attributes (RSSI, noise, tx rate,
    /// channel, ...). Which keys appear depends on the platform tool.
    #[serde(flatten)]
    pub attrs: BTreeMap<String, AttrValue>,
}

impl AccessPointInfo {
    /// Build a record from a raw `key -> value` map, enforcing the
    /// invariants: `SSID` and `BSSID` present and non-empty, and every
    /// key in `int_keys` present and integer-valued.
    pub fn from_fields(
        mut fields: BTreeMap<String, String>,
        int_keys: &[&'static str],
    ) -> Result<Self, ApError> {
        let ssid = fields.remove("SSID").ok_or(ApError::MissingKey("SSID"))?;
        let bssid = fields.remove("BSSID").ok_or(ApError::MissingKey("BSSID"))?;
        if ssid.is_empty() {
            return Err(ApError::MissingKey("SSID"));
        }
        if bssid.is_empty() {
            return Err(ApError::MissingKey("BSSID"));
        }

        let mut attrs = BTreeMap::new();
        for &key in int_keys {
            let value = fields.remove(key).ok_or(ApError::MissingKey(key))?;
            let parsed = value
                .parse::<i64>()
                .map_err(|_| ApError::InvalidNumber { key, value })?;
            attrs.insert(key.to_string(), AttrValue::Int(parsed));
        }
        for (key, value) in fields {
            attrs.insert(key, AttrValue::Text(value));
        }

        Ok(Self { ssid, bssid, attrs })
    }

    /// Integer attribute lookup, for callers that know a key is one of
    /// the declared numeric fields.
    pub fn int_attr(&self, key: &str) -> Option<i64> {
        match self.attrs.get(key) {
            Some(AttrValue::Int(v)) => Some(*v),
            _ => None,
        }
    }
}
