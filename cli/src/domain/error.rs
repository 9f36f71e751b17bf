//! Typed domain error enums.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All error types implement `thiserror::Error` and convert to `anyhow::Error`
//! via the `?` operator.

use thiserror::Error;

// ── Diagnostics errors ────────────────────────────────────────────────────────

/// Errors raised while decoding network-test output.
///
/// Any of these aborts the whole diagnostics read; no partial result is
/// returned unless the parser runs with `MalformedLinePolicy::Skip`.
#[derive(Debug, Error, PartialEq)]
pub enum DiagnosticsError {
    #[error("Invalid numeric value for '{key}': '{value}'")]
    InvalidNumber { key: String, value: String },

    #[error("Missing numeric value for '{key}'")]
    MissingNumber { key: String },

    #[error("Numeric value for '{key}' is not a finite number: {value}")]
    NotFinite { key: String, value: f64 },

    #[error("Numeric value for '{key}' is too large to truncate to an integer: {value}")]
    OutOfRange { key: String, value: f64 },
}

// ── Metrics errors ────────────────────────────────────────────────────────────

/// Errors raised by resource introspection. These are never suppressed.
#[derive(Debug, Error)]
pub enum MetricsError {
    #[error("CPU usage is unavailable: {0}")]
    Cpu(String),

    #[error("Memory information is unavailable: {0}")]
    Memory(String),

    #[error("Storage path {0} does not exist")]
    StoragePathMissing(String),

    #[error("No mounted filesystem holds {0}")]
    StorageUnmounted(String),

    #[error("Thermal sensor '{0}' not found")]
    SensorNotFound(String),

    #[error("Thermal sensor '{sensor}' reported an invalid reading: {reading}")]
    InvalidTemperature { sensor: String, reading: f32 },
}

// ── Lifecycle errors ──────────────────────────────────────────────────────────

/// Errors that prevent a lifecycle operation from being entered.
///
/// Once entered, a lifecycle operation never fails; per-step failures are
/// reported through `StepOutcome`.
#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error("Another reboot or factory reset is already in progress.")]
    Busy,

    #[error("Cannot create lifecycle lock at {path}: {reason}")]
    LockUnavailable { path: String, reason: String },
}

// ── Config errors ─────────────────────────────────────────────────────────────

/// Errors related to agent configuration validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value}\n\nExpected: {expected}")]
    InvalidValue {
        key: String,
        value: String,
        expected: String,
    },
}
