//! Domain layer: pure business logic, types, and validation.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All functions are synchronous and take data in, returning data out.

pub mod config;
pub mod diagnostics;
pub mod error;
pub mod identity;
pub mod lifecycle;
pub mod metrics;

pub use config::{AgentConfig, CommandSpec};
pub use diagnostics::{DiagnosticsResult, MalformedLinePolicy, Reading, parse_probe_output};
pub use error::{ConfigError, DiagnosticsError, LifecycleError, MetricsError};
pub use identity::{DeviceIdentity, PLACEHOLDER_SERIAL, extract_serial};
pub use lifecycle::{LifecycleKind, LifecycleReport, LifecycleStep, PathPattern, StepOutcome};
pub use metrics::{ResourceMetrics, Usage};
