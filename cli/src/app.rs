//! Application context: unified state passed to every command handler.
//!
//! `AppContext` owns the loaded configuration and the production port
//! implementations, so command handlers only choose a use case and render
//! its result.

use std::path::PathBuf;

use anyhow::Result;

use crate::application::ports::ConfigStore;
use crate::domain::AgentConfig;
use crate::infra::command_runner::TokioCommandRunner;
use crate::infra::config::YamlConfigStore;
use crate::infra::fs::LocalFs;
use crate::infra::gate::FlockGate;
use crate::infra::resources::SysinfoProbe;
use crate::output::{HumanRenderer, OutputContext};

/// Output rendering mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-readable terminal output (default).
    Human,
    /// Machine-readable JSON output.
    Json,
}

/// Output rendering flags.
pub struct OutputFlags {
    /// Disable ANSI color output.
    pub no_color: bool,
    /// Suppress non-error output.
    pub quiet: bool,
    /// Enable JSON output mode.
    pub json: bool,
}

/// Flags passed from the top-level CLI to `AppContext::new`.
pub struct AppFlags {
    /// Output rendering options.
    pub output: OutputFlags,
    /// Explicit configuration file (`--config`).
    pub config: Option<PathBuf>,
}

/// Unified application context passed to every command handler.
pub struct AppContext {
    /// Terminal output context (colors, quiet mode).
    pub output: OutputContext,
    /// Output rendering mode (human vs JSON).
    pub mode: OutputMode,
    /// Validated agent configuration.
    pub config: AgentConfig,
    /// Process runner for firmware, uptime, probe and lifecycle commands.
    pub runner: TokioCommandRunner,
    /// Device filesystem.
    pub fs: LocalFs,
    /// CPU, memory, storage and thermal introspection.
    pub probe: SysinfoProbe,
    /// When `true`, skip interactive prompts and use defaults.
    ///
    /// Set when `CI` or `HOTSPOT_AGENT_YES` is present in the environment;
    /// `--yes` on a lifecycle subcommand has the same effect for that run.
    pub non_interactive: bool,
}

impl AppContext {
    /// Construct an `AppContext` from top-level CLI flags.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file exists but cannot be read,
    /// parsed or validated.
    pub fn new(flags: &AppFlags) -> Result<Self> {
        let non_interactive =
            std::env::var("CI").is_ok() || std::env::var("HOTSPOT_AGENT_YES").is_ok();

        let mode = if flags.output.json {
            OutputMode::Json
        } else {
            OutputMode::Human
        };

        let config = YamlConfigStore::new(flags.config.clone()).load()?;

        Ok(Self {
            output: OutputContext::new(flags.output.no_color, flags.output.quiet),
            mode,
            config,
            runner: TokioCommandRunner,
            fs: LocalFs,
            probe: SysinfoProbe,
            non_interactive,
        })
    }

    /// Returns `true` when JSON output mode is active.
    #[must_use]
    pub fn is_json(&self) -> bool {
        self.mode == OutputMode::Json
    }

    /// Human renderer over this context's output settings.
    #[must_use]
    pub fn human(&self) -> HumanRenderer<'_> {
        HumanRenderer::new(&self.output)
    }

    /// The cross-process lifecycle gate at the configured lock file.
    #[must_use]
    pub fn gate(&self) -> FlockGate {
        FlockGate::new(self.config.factory_reset.lock_file.clone())
    }

    /// Ask the user for confirmation.
    ///
    /// When `non_interactive` is `true` (CI or `HOTSPOT_AGENT_YES` env),
    /// returns `default` immediately without prompting.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal prompt fails (e.g. no TTY available).
    pub fn confirm(&self, prompt: &str, default: bool) -> Result<bool> {
        if self.non_interactive {
            return Ok(default);
        }
        let confirmed = dialoguer::Confirm::new()
            .with_prompt(prompt)
            .default(default)
            .interact()?;
        Ok(confirmed)
    }
}
