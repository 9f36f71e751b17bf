//! Domain types and validators for agent configuration.
//!
//! Pure functions only, no I/O, no async, no filesystem access. Defaults are
//! the fixed paths and commands of the stock gateway image.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::diagnostics::MalformedLinePolicy;
use crate::domain::error::ConfigError;

// ── Constants ────────────────────────────────────────────────────────────────

/// Default timeout for one-shot device commands (firmware, uptime, service stop).
pub const DEFAULT_COMMAND_TIMEOUT_SECS: u64 = 30;

/// Default timeout for the network test, which measures throughput.
pub const DEFAULT_NET_TEST_TIMEOUT_SECS: u64 = 120;

// ── Config schema ────────────────────────────────────────────────────────────

/// Top-level configuration stored in `/etc/hotspot-agent/config.yaml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct AgentConfig {
    /// Identity descriptor locations.
    pub identity: IdentityConfig,
    /// External commands invoked by the agent.
    pub commands: CommandsConfig,
    /// Resource introspection targets.
    pub resources: ResourcesConfig,
    /// Network-test parsing behaviour.
    pub diagnostics: DiagnosticsConfig,
    /// Factory reset plan.
    pub factory_reset: FactoryResetConfig,
}

/// Where device identity is read from.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct IdentityConfig {
    /// Hardware descriptor holding the serial line.
    pub cpuinfo_path: PathBuf,
    /// Prefix of the serial line in the descriptor.
    pub serial_marker: String,
    /// Address file of the wired interface.
    pub eth_address_path: PathBuf,
    /// Address file of the wireless interface.
    pub wlan_address_path: PathBuf,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            cpuinfo_path: PathBuf::from("/proc/cpuinfo"),
            serial_marker: "Serial".to_string(),
            eth_address_path: PathBuf::from("/sys/class/net/eth0/address"),
            wlan_address_path: PathBuf::from("/sys/class/net/wlan0/address"),
        }
    }
}

/// A program plus its arguments. Never run through a shell.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct CommandSpec {
    pub program: String,
    #[serde(default)]
    pub args: Vec<String>,
    #[serde(default = "default_command_timeout")]
    pub timeout_secs: u64,
}

impl CommandSpec {
    #[must_use]
    pub fn new(program: &str, args: &[&str]) -> Self {
        Self {
            program: program.to_string(),
            args: args.iter().map(ToString::to_string).collect(),
            timeout_secs: DEFAULT_COMMAND_TIMEOUT_SECS,
        }
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// Borrowed argument vector, in the shape `CommandRunner` expects.
    #[must_use]
    pub fn argv(&self) -> Vec<&str> {
        self.args.iter().map(String::as_str).collect()
    }

    #[must_use]
    pub fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.timeout_secs)
    }

    /// Render as a single command line, for logs.
    #[must_use]
    pub fn display(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

fn default_command_timeout() -> u64 {
    DEFAULT_COMMAND_TIMEOUT_SECS
}

/// External commands invoked by the agent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct CommandsConfig {
    pub firmware_version: CommandSpec,
    pub uptime: CommandSpec,
    pub reboot: CommandSpec,
    pub net_test: CommandSpec,
    /// Service manager, invoked as `<program> <service> stop`.
    pub service_manager: CommandSpec,
}

impl Default for CommandsConfig {
    fn default() -> Self {
        Self {
            firmware_version: CommandSpec::new("/sbin/fwupdate", &["current"]),
            uptime: CommandSpec::new("cat", &["/proc/uptime"]),
            reboot: CommandSpec::new("/sbin/reboot", &[]),
            net_test: CommandSpec::new("/sbin/nettest", &[])
                .with_timeout(DEFAULT_NET_TEST_TIMEOUT_SECS),
            service_manager: CommandSpec::new("service", &[]),
        }
    }
}

/// Resource introspection targets.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ResourcesConfig {
    /// Volume whose usage is reported as storage.
    pub data_dir: PathBuf,
    /// Thermal sensor name; the first reading whose label starts with it wins.
    pub thermal_sensor: String,
}

impl Default for ResourcesConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("/data"),
            thermal_sensor: "cpu_thermal".to_string(),
        }
    }
}

/// Network-test parsing behaviour.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct DiagnosticsConfig {
    pub malformed_lines: MalformedLinePolicy,
}

/// Everything a factory reset stops or removes, in execution order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct FactoryResetConfig {
    /// Services stopped first, dependents before their dependencies.
    pub services: Vec<String>,
    /// Configuration files removed if present.
    pub config_files: Vec<PathBuf>,
    /// Network settings, as `<dir>/<prefix>*` patterns.
    pub network_globs: Vec<String>,
    /// Directory whose contents are purged (the directory itself stays).
    pub log_dir: PathBuf,
    /// Application data directory, removed entirely.
    pub data_dir: PathBuf,
    /// Lock file serialising reboot and factory reset across processes.
    pub lock_file: PathBuf,
}

impl Default for FactoryResetConfig {
    fn default() -> Self {
        Self {
            services: ["miner", "packetforwarder", "gatewayconfig", "connman"]
                .map(String::from)
                .to_vec(),
            config_files: [
                "/var/lib/reg.conf",
                "/data/etc/nat.conf",
                "/data/etc/packet_forwarder.conf",
                "/data/etc/ledstrip.conf",
            ]
            .map(PathBuf::from)
            .to_vec(),
            network_globs: ["/var/lib/connman/wifi_*", "/var/lib/connman/ethernet_*"]
                .map(String::from)
                .to_vec(),
            log_dir: PathBuf::from("/var/log"),
            data_dir: PathBuf::from("/var/lib/miner"),
            lock_file: PathBuf::from("/run/hotspot-agent/lifecycle.lock"),
        }
    }
}

// ── Validators ───────────────────────────────────────────────────────────────

impl AgentConfig {
    /// Check the invariants serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns the first offending key: an empty program, a zero timeout, or
    /// a relative factory-reset path.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let c = &self.commands;
        for (key, spec) in [
            ("commands.firmware_version", &c.firmware_version),
            ("commands.uptime", &c.uptime),
            ("commands.reboot", &c.reboot),
            ("commands.net_test", &c.net_test),
            ("commands.service_manager", &c.service_manager),
        ] {
            validate_command(key, spec)?;
        }

        let fr = &self.factory_reset;
        for path in &fr.config_files {
            require_absolute("factory_reset.config_files", path)?;
        }
        for pattern in &fr.network_globs {
            require_absolute("factory_reset.network_globs", Path::new(pattern))?;
        }
        require_absolute("factory_reset.log_dir", &fr.log_dir)?;
        require_absolute("factory_reset.data_dir", &fr.data_dir)?;
        require_absolute("factory_reset.lock_file", &fr.lock_file)?;
        if let Some(name) = fr.services.iter().find(|s| s.trim().is_empty()) {
            return Err(ConfigError::InvalidValue {
                key: "factory_reset.services".to_string(),
                value: format!("'{name}'"),
                expected: "a non-empty service name".to_string(),
            });
        }
        Ok(())
    }
}

fn validate_command(key: &str, spec: &CommandSpec) -> Result<(), ConfigError> {
    if spec.program.trim().is_empty() {
        return Err(ConfigError::InvalidValue {
            key: format!("{key}.program"),
            value: "''".to_string(),
            expected: "a program name or path".to_string(),
        });
    }
    if spec.timeout_secs == 0 {
        return Err(ConfigError::InvalidValue {
            key: format!("{key}.timeout_secs"),
            value: "0".to_string(),
            expected: "a timeout of at least 1 second".to_string(),
        });
    }
    Ok(())
}

fn require_absolute(key: &str, path: &Path) -> Result<(), ConfigError> {
    if path.is_absolute() {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue {
            key: key.to_string(),
            value: path.display().to_string(),
            expected: "an absolute path".to_string(),
        })
    }
}

// ── Unit tests ───────────────────────────────────────────────────────────────
