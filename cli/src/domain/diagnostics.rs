//! Network-test output decoding.
//!
//! The probe prints `key: value` lines. Keys are normalised to snake case;
//! `download_speed` and `latency` are coerced to numbers, everything else is
//! kept as the trimmed string.
//!
//! Pure functions only, no I/O, no async, no process execution.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::error::DiagnosticsError;

// ── Constants ────────────────────────────────────────────────────────────────

pub const DOWNLOAD_SPEED_KEY: &str = "download_speed";
pub const LATENCY_KEY: &str = "latency";
pub const PUBLIC_IP_KEY: &str = "public_ip";

/// Readings strictly above this are truncated to whole units; readings at or
/// below it keep their fraction.
pub const WHOLE_UNIT_THRESHOLD: f64 = 10.0;

/// A reading of exactly zero is reported as absent rather than `0`.
///
/// Inherited from the gateway firmware, where zero was treated as "no
/// reading". Unclear whether a real zero measurement should survive; revisit
/// together with the probe's own output contract.
pub const ZERO_READING_IS_ABSENT: bool = true;

// ── Types ────────────────────────────────────────────────────────────────────

/// A coerced numeric measurement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Reading {
    /// Value above `WHOLE_UNIT_THRESHOLD`, truncated.
    Integer(i64),
    /// Non-zero value at or below `WHOLE_UNIT_THRESHOLD`, unchanged.
    Float(f64),
}

impl fmt::Display for Reading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
        }
    }
}

/// Decoded network-test result. Built fresh per probe run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DiagnosticsResult {
    pub download_speed: Option<Reading>,
    pub latency: Option<Reading>,
    pub public_ip: Option<String>,
    /// Any other key the probe printed, verbatim.
    #[serde(flatten)]
    pub extra: BTreeMap<String, String>,
}

/// What to do with a numeric line that does not decode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MalformedLinePolicy {
    /// Fail the whole read. Matches the firmware's behaviour.
    #[default]
    Abort,
    /// Drop the offending line and keep parsing.
    Skip,
}

// ── Parsing ──────────────────────────────────────────────────────────────────

/// Normalise a probe key: trim, lower-case, spaces to underscores.
#[must_use]
pub fn normalize_key(raw: &str) -> String {
    raw.trim().to_lowercase().replace(' ', "_")
}

/// Decode the probe's stdout.
///
/// Lines without a colon are ignored. A later line overwrites an earlier one
/// with the same key.
///
/// # Errors
///
/// With `MalformedLinePolicy::Abort`, the first `download_speed` or
/// `latency` line whose value does not decode fails the whole read.
pub fn parse_probe_output(
    output: &str,
    policy: MalformedLinePolicy,
) -> Result<DiagnosticsResult, DiagnosticsError> {
    let mut result = DiagnosticsResult::default();

    for line in output.trim().lines() {
        let Some((raw_key, raw_value)) = line.split_once(':') else {
            continue;
        };
        let key = normalize_key(raw_key);
        let value = raw_value.trim();

        match key.as_str() {
            DOWNLOAD_SPEED_KEY | LATENCY_KEY => {
                let reading = match decode_reading(&key, value) {
                    Ok(reading) => reading,
                    Err(e) if policy == MalformedLinePolicy::Skip => {
                        tracing::warn!(line, error = %e, "skipping malformed diagnostics line");
                        continue;
                    }
                    Err(e) => return Err(e),
                };
                if key == DOWNLOAD_SPEED_KEY {
                    result.download_speed = reading;
                } else {
                    result.latency = reading;
                }
            }
            PUBLIC_IP_KEY => result.public_ip = Some(value.to_string()),
            _ => {
                result.extra.insert(key, value.to_string());
            }
        }
    }

    Ok(result)
}

/// Coerce the first whitespace-delimited token of `value`.
///
/// Underscores between digits (`1_000`) are accepted as group separators.
///
/// # Errors
///
/// Returns an error if there is no token, it is not a number, it is NaN or
/// infinite, or it is above the whole-unit threshold and its truncation does
/// not fit in an `i64`.
#[allow(clippy::float_cmp, clippy::cast_possible_truncation)]
pub fn decode_reading(key: &str, value: &str) -> Result<Option<Reading>, DiagnosticsError> {
    let token = value
        .split_whitespace()
        .next()
        .ok_or_else(|| DiagnosticsError::MissingNumber {
            key: key.to_string(),
        })?;
    let parsed: f64 = strip_digit_separators(token)
        .and_then(|digits| digits.parse::<f64>().ok())
        .ok_or_else(|| DiagnosticsError::InvalidNumber {
            key: key.to_string(),
            value: token.to_string(),
        })?;

    if !parsed.is_finite() {
        return Err(DiagnosticsError::NotFinite {
            key: key.to_string(),
            value: parsed,
        });
    }

    // Exact zero, including -0.0.
    if ZERO_READING_IS_ABSENT && parsed == 0.0 {
        return Ok(None);
    }

    if parsed > WHOLE_UNIT_THRESHOLD {
        let whole = parsed.trunc();
        if whole >= I64_UPPER_BOUND {
            return Err(DiagnosticsError::OutOfRange {
                key: key.to_string(),
                value: parsed,
            });
        }
        return Ok(Some(Reading::Integer(whole as i64)));
    }

    Ok(Some(Reading::Float(parsed)))
}

/// 2^63, the first whole value an `i64` cannot hold.
const I64_UPPER_BOUND: f64 = 9_223_372_036_854_775_808.0;

/// Drop `_` group separators. `None` if an underscore is not between two
/// digits, e.g. `_5`, `5_` or `1__0`.
fn strip_digit_separators(token: &str) -> Option<Cow<'_, str>> {
    if !token.contains('_') {
        return Some(Cow::Borrowed(token));
    }
    let bytes = token.as_bytes();
    let separated = bytes.iter().enumerate().filter(|(_, b)| **b == b'_').all(|(i, _)| {
        i > 0
            && bytes[i - 1].is_ascii_digit()
            && bytes.get(i + 1).is_some_and(u8::is_ascii_digit)
    });
    separated.then(|| Cow::Owned(token.replace('_', "")))
}

// ── Unit tests ───────────────────────────────────────────────────────────────
