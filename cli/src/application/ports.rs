//! Port trait definitions for the Application layer.
//!
//! Ports are the interfaces (contracts) that infrastructure must fulfill.
//! This file imports only from `crate::domain`, never from `crate::infra`,
//! `crate::commands`, or `crate::output`.

use std::path::{Path, PathBuf};
use std::process::Output;
use std::time::Duration;

use anyhow::Result;

use crate::domain::{AgentConfig, LifecycleError, MetricsError, Usage};

// ── Command Runner Port ───────────────────────────────────────────────────────

/// Abstracts process execution so infrastructure can be swapped or mocked.
#[allow(async_fn_in_trait)]
pub trait CommandRunner {
    /// Run a program, capturing its exit status, stdout and stderr.
    ///
    /// # Errors
    ///
    /// Returns an error if the process cannot be spawned or exceeds `timeout`.
    /// On timeout, the child process must be killed (not left orphaned).
    async fn run_with_timeout(
        &self,
        program: &str,
        args: &[&str],
        timeout: Duration,
    ) -> Result<Output>;
}

// ── Filesystem Port ───────────────────────────────────────────────────────────

/// Abstracts the filesystem operations the agent performs on the device.
///
/// Removal is "remove if present": a missing target is not an error.
pub trait LocalFs {
    /// Read a whole text file.
    fn read_to_string(&self, path: &Path) -> Result<String>;
    /// Remove a single file. Succeeds if it does not exist.
    fn remove_file(&self, path: &Path) -> Result<()>;
    /// Remove a file or a directory tree. Succeeds if it does not exist.
    fn remove_all(&self, path: &Path) -> Result<()>;
    /// List the entries of a directory, hidden ones included.
    /// A missing directory has no entries.
    fn list_dir(&self, dir: &Path) -> Result<Vec<PathBuf>>;
}

// ── Resource Introspection Port ───────────────────────────────────────────────

/// Abstracts OS resource introspection. Failures are typed and propagate.
#[allow(async_fn_in_trait)]
pub trait ResourceProbe {
    /// Global CPU usage in percent.
    async fn cpu_usage_percent(&self) -> Result<f32, MetricsError>;
    /// Virtual memory used/total.
    async fn memory(&self) -> Result<Usage, MetricsError>;
    /// Usage of the filesystem holding `path`.
    async fn storage(&self, path: &Path) -> Result<Usage, MetricsError>;
    /// First reading, in degrees Celsius, of the named thermal sensor.
    async fn temperature(&self, sensor: &str) -> Result<f32, MetricsError>;
}

// ── Lifecycle Gate Port ───────────────────────────────────────────────────────

/// Admits at most one lifecycle operation at a time.
pub trait LifecycleGate {
    /// Held for the duration of the operation; dropping it opens the gate.
    type Guard;

    /// Acquire the gate without waiting.
    ///
    /// # Errors
    ///
    /// Returns `LifecycleError::Busy` if another operation holds the gate.
    fn try_acquire(&self) -> Result<Self::Guard, LifecycleError>;
}

// ── Progress Reporting Port ───────────────────────────────────────────────────

/// Abstracts progress reporting so services can emit events without
/// depending on the Presentation layer. Sync trait, no async needed.
pub trait ProgressReporter {
    /// Emit an in-progress step message.
    fn step(&self, message: &str);
    /// Emit a success message.
    fn success(&self, message: &str);
    /// Emit a warning message.
    fn warn(&self, message: &str);
}

// ── Configuration Port ────────────────────────────────────────────────────────

/// Abstracts where agent configuration comes from.
pub trait ConfigStore {
    /// Load and validate the configuration, falling back to defaults when no
    /// file exists.
    fn load(&self) -> Result<AgentConfig>;
    /// Location the configuration is read from.
    fn path(&self) -> PathBuf;
}
