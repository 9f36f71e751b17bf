//! Device identity: serial number, interface addresses, firmware and uptime.

use serde::Serialize;

/// Reported when the hardware descriptor has no usable serial line.
pub const PLACEHOLDER_SERIAL: &str = "00000000";

/// Number of trailing characters of the serial line that form the serial.
pub const SERIAL_LEN: usize = 8;

/// Identity snapshot. Every field except the serial is best-effort.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeviceIdentity {
    pub serial_number: String,
    pub eth_mac: Option<String>,
    pub wlan_mac: Option<String>,
    pub firmware_version: Option<String>,
    pub uptime_seconds: Option<u64>,
}

/// Extract the serial from a cpuinfo-style descriptor.
///
/// Takes the last eight characters of the first line starting with `marker`.
/// Falls back to `PLACEHOLDER_SERIAL` when no such line exists or the line is
/// too short to carry a serial, so the result is always eight characters.
#[must_use]
pub fn extract_serial(descriptor: &str, marker: &str) -> String {
    descriptor
        .lines()
        .find(|line| line.starts_with(marker))
        .and_then(|line| last_chars(line.trim(), SERIAL_LEN))
        .unwrap_or_else(|| PLACEHOLDER_SERIAL.to_string())
}

fn last_chars(s: &str, n: usize) -> Option<String> {
    let count = s.chars().count();
    if count < n {
        return None;
    }
    Some(s.chars().skip(count - n).collect())
}

/// Parse the leading run of decimal digits of uptime output (`12345.67 ...`).
#[must_use]
pub fn parse_uptime(output: &str) -> Option<u64> {
    let trimmed = output.trim_start();
    let end = trimmed
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(trimmed.len());
    trimmed[..end].parse().ok()
}
