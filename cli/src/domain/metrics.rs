//! Resource metrics and unit conversion.

use serde::Serialize;

const BYTES_PER_MB: u64 = 1024 * 1024;

/// Resource snapshot. Every field is load-bearing; none is optional.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResourceMetrics {
    pub cpu_usage_percent: f32,
    pub memory_used_mb: u64,
    pub memory_total_mb: u64,
    pub storage_used_mb: u64,
    pub storage_total_mb: u64,
    pub temperature_celsius: i64,
}

/// Used/total pair in bytes, as reported by the OS.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Usage {
    pub used_bytes: u64,
    pub total_bytes: u64,
}

impl Usage {
    /// `(used, total)` in whole mebibytes, truncated.
    #[must_use]
    pub fn in_mb(self) -> (u64, u64) {
        (bytes_to_mb(self.used_bytes), bytes_to_mb(self.total_bytes))
    }
}

#[must_use]
pub fn bytes_to_mb(bytes: u64) -> u64 {
    bytes / BYTES_PER_MB
}

/// Truncate a sensor reading toward zero.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn whole_degrees(celsius: f32) -> i64 {
    celsius.trunc() as i64
}
