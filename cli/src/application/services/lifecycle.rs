//! Application service: reboot and factory reset.
//!
//! Both operations run behind the `LifecycleGate`. Once the gate is taken the
//! sequence always runs to its terminal reboot: a failing step is recorded in
//! its `StepOutcome`, logged, reported, and skipped past. Every step is logged
//! and reported before it executes.

use anyhow::{Context, Result};

use crate::application::ports::{CommandRunner, LifecycleGate, LocalFs, ProgressReporter};
use crate::domain::config::{AgentConfig, CommandSpec, CommandsConfig};
use crate::domain::lifecycle::{
    LifecycleKind, LifecycleReport, LifecycleStep, PathPattern, StepOutcome, factory_reset_plan,
};
use crate::domain::LifecycleError;

/// Reboot the device.
///
/// # Errors
///
/// Returns `LifecycleError` only if the gate refuses entry; the reboot
/// command's own failure is recorded in the report.
pub async fn reboot(
    runner: &impl CommandRunner,
    gate: &impl LifecycleGate,
    commands: &CommandsConfig,
    reporter: &impl ProgressReporter,
) -> Result<LifecycleReport, LifecycleError> {
    let _guard = gate.try_acquire()?;

    let step = LifecycleStep::Reboot;
    announce(&step, reporter);
    let result = run_checked(runner, &commands.reboot, &[]).await;
    let outcome = record(step, result, reporter);

    Ok(LifecycleReport {
        kind: LifecycleKind::Reboot,
        steps: vec![outcome],
    })
}

/// Factory-reset the device: stop services, remove configuration, network
/// settings, logs and data, then reboot.
///
/// # Errors
///
/// Returns `LifecycleError` only if the gate refuses entry, in which case no
/// step has run.
pub async fn factory_reset(
    runner: &impl CommandRunner,
    fs: &impl LocalFs,
    gate: &impl LifecycleGate,
    cfg: &AgentConfig,
    reporter: &impl ProgressReporter,
) -> Result<LifecycleReport, LifecycleError> {
    let _guard = gate.try_acquire()?;
    tracing::info!("factory resetting");

    let plan = factory_reset_plan(&cfg.factory_reset);
    let mut steps = Vec::with_capacity(plan.len());
    for step in plan {
        announce(&step, reporter);
        let result = execute(&step, runner, fs, &cfg.commands).await;
        steps.push(record(step, result, reporter));
    }

    Ok(LifecycleReport {
        kind: LifecycleKind::FactoryReset,
        steps,
    })
}

/// Log and report `step` before it runs.
fn announce(step: &LifecycleStep, reporter: &impl ProgressReporter) {
    let message = step.to_string();
    tracing::info!(step = %message, "lifecycle step");
    reporter.step(&message);
}

/// Fold a step's result into its outcome and report it.
fn record(step: LifecycleStep, result: Result<()>, reporter: &impl ProgressReporter) -> StepOutcome {
    match result {
        Ok(()) => {
            reporter.success(&step.to_string());
            StepOutcome::succeeded(step)
        }
        Err(e) => {
            let error = format!("{e:#}");
            tracing::warn!(step = %step, error = %error, "lifecycle step failed, continuing");
            reporter.warn(&format!("{step}: {error}"));
            StepOutcome::failed(step, error)
        }
    }
}

async fn execute(
    step: &LifecycleStep,
    runner: &impl CommandRunner,
    fs: &impl LocalFs,
    commands: &CommandsConfig,
) -> Result<()> {
    match step {
        LifecycleStep::ServiceStop(name) => {
            run_checked(runner, &commands.service_manager, &[name.as_str(), "stop"]).await
        }
        LifecycleStep::FileRemove(path) => fs.remove_file(path),
        LifecycleStep::PathGlobRemove(pattern) => remove_matching(fs, &PathPattern::parse(pattern)),
        LifecycleStep::LogPurge(dir) => remove_matching(fs, &PathPattern::all_in(dir)),
        LifecycleStep::DataPurge(dir) => fs.remove_all(dir),
        LifecycleStep::Reboot => run_checked(runner, &commands.reboot, &[]).await,
    }
}

/// Run `spec` with `extra` appended to its arguments; non-zero exit is an error.
async fn run_checked(
    runner: &impl CommandRunner,
    spec: &CommandSpec,
    extra: &[&str],
) -> Result<()> {
    let mut args = spec.argv();
    args.extend_from_slice(extra);
    let command_line = format!("{} {}", spec.program, args.join(" "));
    let output = runner
        .run_with_timeout(&spec.program, &args, spec.timeout())
        .await
        .with_context(|| format!("running {}", command_line.trim_end()))?;
    anyhow::ensure!(
        output.status.success(),
        "{} exited with {}",
        command_line.trim_end(),
        output.status
    );
    Ok(())
}

/// Remove every entry of the pattern's directory that it matches. Keeps going
/// after a failed removal and reports all failures together.
fn remove_matching(fs: &impl LocalFs, pattern: &PathPattern) -> Result<()> {
    let entries = fs
        .list_dir(&pattern.dir)
        .with_context(|| format!("listing {}", pattern.dir.display()))?;

    let failures: Vec<String> = entries
        .iter()
        .filter(|path| {
            path.file_name()
                .is_some_and(|name| pattern.matches(&name.to_string_lossy()))
        })
        .filter_map(|path| fs.remove_all(path).err().map(|e| format!("{e:#}")))
        .collect();

    anyhow::ensure!(failures.is_empty(), "{}", failures.join("; "));
    Ok(())
}
