//! Shared test helpers: recording port implementations and output constructors.

#![allow(dead_code)]
#![allow(clippy::expect_used)]

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Output};
use std::sync::Mutex;
use std::time::Duration;

use anyhow::Result;
use hotspot_agent::application::ports::{
    CommandRunner, LifecycleGate, LocalFs, ProgressReporter, ResourceProbe,
};
use hotspot_agent::domain::{LifecycleError, MetricsError, Usage};

// ── ExitStatus construction ──────────────────────────────────────────────────

/// Build an `ExitStatus` from a logical exit code (0 = success, non-zero = failure).
///
/// The raw wait-status encodes the exit code in bits 8–15, so we shift.
pub fn exit_status(code: i32) -> ExitStatus {
    use std::os::unix::process::ExitStatusExt;
    ExitStatus::from_raw(code << 8)
}

// ── Output constructors ──────────────────────────────────────────────────────

pub fn ok_output(stdout: &[u8]) -> Output {
    Output {
        status: exit_status(0),
        stdout: stdout.to_vec(),
        stderr: Vec::new(),
    }
}

pub fn err_output(code: i32, stderr: &[u8]) -> Output {
    Output {
        status: exit_status(code),
        stdout: Vec::new(),
        stderr: stderr.to_vec(),
    }
}

// ── CommandRunner ────────────────────────────────────────────────────────────

/// Answers every invocation with `respond` and records the command lines.
pub struct RecordingRunner<F> {
    respond: F,
    calls: Mutex<Vec<String>>,
}

impl<F> RecordingRunner<F>
where
    F: Fn(&str, &[&str]) -> Result<Output>,
{
    pub fn new(respond: F) -> Self {
        Self {
            respond,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Command lines seen so far, `program arg...`.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("lock").clone()
    }
}

/// Every command succeeds with empty output.
pub fn succeeding_runner() -> RecordingRunner<impl Fn(&str, &[&str]) -> Result<Output>> {
    RecordingRunner::new(|_: &str, _: &[&str]| Ok(ok_output(b"")))
}

/// Every command exits 1.
pub fn failing_runner() -> RecordingRunner<impl Fn(&str, &[&str]) -> Result<Output>> {
    RecordingRunner::new(|_: &str, _: &[&str]| Ok(err_output(1, b"failed")))
}

/// No command can be spawned.
pub fn unspawnable_runner() -> RecordingRunner<impl Fn(&str, &[&str]) -> Result<Output>> {
    RecordingRunner::new(|program: &str, _: &[&str]| {
        anyhow::bail!("failed to spawn {program}: No such file or directory")
    })
}

/// Every command prints `stdout` and exits 0.
pub fn printing_runner(stdout: &'static str) -> RecordingRunner<impl Fn(&str, &[&str]) -> Result<Output>> {
    RecordingRunner::new(move |_: &str, _: &[&str]| Ok(ok_output(stdout.as_bytes())))
}

impl<F> CommandRunner for RecordingRunner<F>
where
    F: Fn(&str, &[&str]) -> Result<Output>,
{
    async fn run_with_timeout(
        &self,
        program: &str,
        args: &[&str],
        _timeout: Duration,
    ) -> Result<Output> {
        let line = std::iter::once(program)
            .chain(args.iter().copied())
            .collect::<Vec<_>>()
            .join(" ");
        self.calls.lock().expect("lock").push(line);
        (self.respond)(program, args)
    }
}

// ── LocalFs ──────────────────────────────────────────────────────────────────

/// In-memory filesystem that records removals and can be told to fail them.
#[derive(Default)]
pub struct FakeFs {
    files: HashMap<PathBuf, String>,
    dirs: HashMap<PathBuf, Vec<PathBuf>>,
    fail_removals: bool,
    fail_listing: bool,
    removed: Mutex<Vec<PathBuf>>,
}

impl FakeFs {
    pub fn with_file(mut self, path: &str, content: &str) -> Self {
        self.files.insert(PathBuf::from(path), content.to_string());
        self
    }

    pub fn with_dir(mut self, dir: &str, entries: &[&str]) -> Self {
        let dir = PathBuf::from(dir);
        let entries = entries.iter().map(|e| dir.join(e)).collect();
        self.dirs.insert(dir, entries);
        self
    }

    /// Every removal and listing fails.
    pub fn broken(mut self) -> Self {
        self.fail_removals = true;
        self.fail_listing = true;
        self
    }

    /// Removals fail, listings succeed.
    pub fn read_only(mut self) -> Self {
        self.fail_removals = true;
        self
    }

    pub fn removed(&self) -> Vec<PathBuf> {
        self.removed.lock().expect("lock").clone()
    }

    fn remove(&self, path: &Path) -> Result<()> {
        self.removed.lock().expect("lock").push(path.to_path_buf());
        if self.fail_removals {
            anyhow::bail!("removing {}: Read-only file system", path.display());
        }
        Ok(())
    }
}

impl LocalFs for FakeFs {
    fn read_to_string(&self, path: &Path) -> Result<String> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("reading file {}: No such file", path.display()))
    }

    fn remove_file(&self, path: &Path) -> Result<()> {
        self.remove(path)
    }

    fn remove_all(&self, path: &Path) -> Result<()> {
        self.remove(path)
    }

    fn list_dir(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        if self.fail_listing {
            anyhow::bail!("listing {}: Permission denied", dir.display());
        }
        Ok(self.dirs.get(dir).cloned().unwrap_or_default())
    }
}

// ── ProgressReporter ─────────────────────────────────────────────────────────

/// Records every event as `"step: .."`, `"success: .."` or `"warn: .."`.
#[derive(Default)]
pub struct RecordingReporter {
    events: Mutex<Vec<String>>,
}

impl RecordingReporter {
    pub fn events(&self) -> Vec<String> {
        self.events.lock().expect("lock").clone()
    }

    pub fn steps(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| e.strip_prefix("step: ").map(str::to_string))
            .collect()
    }
}

impl ProgressReporter for RecordingReporter {
    fn step(&self, message: &str) {
        self.events.lock().expect("lock").push(format!("step: {message}"));
    }
    fn success(&self, message: &str) {
        self.events
            .lock()
            .expect("lock")
            .push(format!("success: {message}"));
    }
    fn warn(&self, message: &str) {
        self.events.lock().expect("lock").push(format!("warn: {message}"));
    }
}

// ── LifecycleGate ────────────────────────────────────────────────────────────

/// Always admits.
pub struct OpenGate;

impl LifecycleGate for OpenGate {
    type Guard = ();
    fn try_acquire(&self) -> Result<(), LifecycleError> {
        Ok(())
    }
}

/// Another operation is in flight.
pub struct BusyGate;

impl LifecycleGate for BusyGate {
    type Guard = ();
    fn try_acquire(&self) -> Result<(), LifecycleError> {
        Err(LifecycleError::Busy)
    }
}

// ── ResourceProbe ────────────────────────────────────────────────────────────

/// Fixed readings. `temperature` is returned as-is so tests can feed NaN.
pub struct FakeProbe {
    pub cpu: f32,
    pub memory: Usage,
    pub storage: Usage,
    pub temperature: f32,
    pub missing_sensor: bool,
}

impl Default for FakeProbe {
    fn default() -> Self {
        Self {
            cpu: 12.5,
            memory: Usage {
                used_bytes: 300 * 1024 * 1024 + 512,
                total_bytes: 1024 * 1024 * 1024,
            },
            storage: Usage {
                used_bytes: 2_000 * 1024 * 1024,
                total_bytes: 29_000 * 1024 * 1024,
            },
            temperature: 48.9,
            missing_sensor: false,
        }
    }
}

impl ResourceProbe for FakeProbe {
    async fn cpu_usage_percent(&self) -> Result<f32, MetricsError> {
        Ok(self.cpu)
    }
    async fn memory(&self) -> Result<Usage, MetricsError> {
        Ok(self.memory)
    }
    async fn storage(&self, _path: &Path) -> Result<Usage, MetricsError> {
        Ok(self.storage)
    }
    async fn temperature(&self, sensor: &str) -> Result<f32, MetricsError> {
        if self.missing_sensor {
            return Err(MetricsError::SensorNotFound(sensor.to_string()));
        }
        Ok(self.temperature)
    }
}
