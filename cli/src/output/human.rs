//! Human-readable terminal renderer.

use owo_colors::OwoColorize as _;

use crate::domain::diagnostics::{DiagnosticsResult, Reading};
use crate::domain::identity::DeviceIdentity;
use crate::domain::lifecycle::{LifecycleKind, LifecycleReport};
use crate::domain::metrics::ResourceMetrics;
use crate::output::OutputContext;

/// Placeholder shown for an absent value.
const ABSENT: &str = "-";

/// Renders domain types as human-readable terminal output using `OutputContext`.
pub struct HumanRenderer<'a> {
    ctx: &'a OutputContext,
}

impl<'a> HumanRenderer<'a> {
    /// Create a new `HumanRenderer` wrapping the given output context.
    #[must_use]
    pub fn new(ctx: &'a OutputContext) -> Self {
        Self { ctx }
    }

    /// Render the device identity snapshot.
    pub fn render_identity(&self, identity: &DeviceIdentity) {
        self.ctx.header("Device:");
        self.ctx.kv("Serial:      ", &identity.serial_number);
        self.ctx.kv("Ethernet MAC:", or_absent(identity.eth_mac.as_deref()));
        self.ctx.kv("WiFi MAC:    ", or_absent(identity.wlan_mac.as_deref()));
        self.ctx
            .kv("Firmware:    ", or_absent(identity.firmware_version.as_deref()));
        let uptime = identity
            .uptime_seconds
            .map_or_else(|| ABSENT.to_string(), format_uptime);
        self.ctx.kv("Uptime:      ", &uptime);
    }

    /// Render the resource snapshot.
    pub fn render_metrics(&self, metrics: &ResourceMetrics) {
        self.ctx.header("Resources:");
        self.ctx
            .kv("CPU:        ", &format!("{:.1}%", metrics.cpu_usage_percent));
        self.ctx.kv(
            "Memory:     ",
            &format_used(metrics.memory_used_mb, metrics.memory_total_mb),
        );
        self.ctx.kv(
            "Storage:    ",
            &format_used(metrics.storage_used_mb, metrics.storage_total_mb),
        );
        self.ctx
            .kv("Temperature:", &format!("{} °C", metrics.temperature_celsius));
    }

    /// Render the network test result. Unknown keys are listed after the
    /// well-known ones.
    pub fn render_diagnostics(&self, result: &DiagnosticsResult) {
        self.ctx.header("Network:");
        self.ctx
            .kv("Download speed:", &format_reading(result.download_speed));
        self.ctx.kv("Latency:       ", &format_reading(result.latency));
        self.ctx
            .kv("Public IP:     ", or_absent(result.public_ip.as_deref()));
        for (key, value) in &result.extra {
            self.ctx.kv(&format!("{key}:"), value);
        }
    }

    /// Render the per-step audit of a lifecycle operation.
    pub fn render_lifecycle_report(&self, report: &LifecycleReport) {
        if self.ctx.quiet {
            return;
        }
        println!();
        let failed = report.failures().count();
        if failed == 0 {
            self.ctx.success(&format!("{} issued", capitalize(report.kind)));
            return;
        }
        self.ctx.warn(&format!(
            "{} issued with {failed} failed step{}:",
            capitalize(report.kind),
            if failed == 1 { "" } else { "s" }
        ));
        for outcome in report.failures() {
            let reason = outcome.error.as_deref().unwrap_or("unknown error");
            println!(
                "    {} {}: {}",
                "✗".style(self.ctx.styles.error),
                outcome.step,
                reason.style(self.ctx.styles.dim)
            );
        }
    }
}

fn or_absent(value: Option<&str>) -> &str {
    value.unwrap_or(ABSENT)
}

fn capitalize(kind: LifecycleKind) -> String {
    let text = kind.to_string();
    let mut chars = text.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

#[must_use]
pub fn format_uptime(seconds: u64) -> String {
    let days = seconds / 86_400;
    let hours = (seconds % 86_400) / 3600;
    let minutes = (seconds % 3600) / 60;
    if days > 0 {
        format!("{days}d {hours}h {minutes}m")
    } else if hours > 0 {
        format!("{hours}h {minutes}m")
    } else {
        format!("{minutes}m")
    }
}

#[must_use]
pub fn format_used(used_mb: u64, total_mb: u64) -> String {
    format!("{used_mb} / {total_mb} MB")
}

#[must_use]
pub fn format_reading(reading: Option<Reading>) -> String {
    reading.map_or_else(|| ABSENT.to_string(), |r| r.to_string())
}
