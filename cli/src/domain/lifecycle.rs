//! Lifecycle operations: the step model and the factory-reset plan.
//!
//! Pure functions only, the plan is data; executing it is the job of
//! `application::services::lifecycle`.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::domain::config::FactoryResetConfig;

/// Device-wide transition requested by the operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LifecycleKind {
    Reboot,
    FactoryReset,
}

impl fmt::Display for LifecycleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Reboot => f.write_str("reboot"),
            Self::FactoryReset => f.write_str("factory reset"),
        }
    }
}

/// One unit of work in a lifecycle operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "target", rename_all = "snake_case")]
pub enum LifecycleStep {
    /// Stop a service through the service manager.
    ServiceStop(String),
    /// Remove a single file if present.
    FileRemove(PathBuf),
    /// Remove every path matching a `<dir>/<prefix>*` pattern, recursively.
    PathGlobRemove(String),
    /// Remove the contents of the log directory.
    LogPurge(PathBuf),
    /// Remove the application data directory.
    DataPurge(PathBuf),
    /// Issue the reboot command. Always last.
    Reboot,
}

impl fmt::Display for LifecycleStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ServiceStop(name) => write!(f, "stopping {name}"),
            Self::FileRemove(path) => write!(f, "removing {}", path.display()),
            Self::PathGlobRemove(pattern) => write!(f, "removing network settings {pattern}"),
            Self::LogPurge(dir) => write!(f, "removing log files in {}", dir.display()),
            Self::DataPurge(dir) => write!(f, "removing miner data {}", dir.display()),
            Self::Reboot => f.write_str("rebooting"),
        }
    }
}

/// What happened when a step ran.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepOutcome {
    pub step: LifecycleStep,
    pub attempted: bool,
    pub succeeded: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl StepOutcome {
    #[must_use]
    pub fn succeeded(step: LifecycleStep) -> Self {
        Self {
            step,
            attempted: true,
            succeeded: true,
            error: None,
        }
    }

    #[must_use]
    pub fn failed(step: LifecycleStep, error: impl Into<String>) -> Self {
        Self {
            step,
            attempted: true,
            succeeded: false,
            error: Some(error.into()),
        }
    }
}

/// Audit record of a lifecycle operation, in execution order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LifecycleReport {
    pub kind: LifecycleKind,
    pub steps: Vec<StepOutcome>,
}

impl LifecycleReport {
    /// Steps that were attempted and did not succeed.
    pub fn failures(&self) -> impl Iterator<Item = &StepOutcome> {
        self.steps.iter().filter(|o| o.attempted && !o.succeeded)
    }
}

/// A `<dir>/<prefix>*` pattern, or a single literal path.
///
/// Only a trailing `*` on the last component is special. Like a shell glob,
/// a bare `*` does not match hidden entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPattern {
    pub dir: PathBuf,
    pub prefix: String,
    pub wildcard: bool,
}

impl PathPattern {
    #[must_use]
    pub fn parse(pattern: &str) -> Self {
        let path = Path::new(pattern);
        let dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        match name.strip_suffix('*') {
            Some(prefix) => Self {
                dir,
                prefix: prefix.to_string(),
                wildcard: true,
            },
            None => Self {
                dir,
                prefix: name,
                wildcard: false,
            },
        }
    }

    /// Every entry of `dir`.
    #[must_use]
    pub fn all_in(dir: &Path) -> Self {
        Self {
            dir: dir.to_path_buf(),
            prefix: String::new(),
            wildcard: true,
        }
    }

    #[must_use]
    pub fn matches(&self, file_name: &str) -> bool {
        if !self.wildcard {
            return file_name == self.prefix;
        }
        if !self.prefix.starts_with('.') && file_name.starts_with('.') {
            return false;
        }
        file_name.starts_with(&self.prefix)
    }
}

/// The fixed factory-reset sequence: services, files, network settings,
/// logs, data, then reboot.
#[must_use]
pub fn factory_reset_plan(cfg: &FactoryResetConfig) -> Vec<LifecycleStep> {
    let services = cfg
        .services
        .iter()
        .cloned()
        .map(LifecycleStep::ServiceStop);
    let files = cfg
        .config_files
        .iter()
        .cloned()
        .map(LifecycleStep::FileRemove);
    let globs = cfg
        .network_globs
        .iter()
        .cloned()
        .map(LifecycleStep::PathGlobRemove);

    services
        .chain(files)
        .chain(globs)
        .chain([
            LifecycleStep::LogPurge(cfg.log_dir.clone()),
            LifecycleStep::DataPurge(cfg.data_dir.clone()),
            LifecycleStep::Reboot,
        ])
        .collect()
}
