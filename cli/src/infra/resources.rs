//! Resource introspection: implements the `ResourceProbe` port with `sysinfo`.

use std::path::Path;

use sysinfo::{Components, Disks, System};

use crate::application::ports::ResourceProbe;
use crate::domain::{MetricsError, Usage};

/// Production `ResourceProbe` backed by `sysinfo`. Fresh readings per call.
#[derive(Default)]
pub struct SysinfoProbe;

impl ResourceProbe for SysinfoProbe {
    async fn cpu_usage_percent(&self) -> Result<f32, MetricsError> {
        // Usage is a delta between two refreshes; the first one only primes it.
        let mut sys = System::new();
        sys.refresh_cpu();
        tokio::time::sleep(sysinfo::MINIMUM_CPU_UPDATE_INTERVAL).await;
        sys.refresh_cpu();

        if sys.cpus().is_empty() {
            return Err(MetricsError::Cpu("no CPUs reported".to_string()));
        }
        let usage = sys.global_cpu_info().cpu_usage();
        if !usage.is_finite() {
            return Err(MetricsError::Cpu(format!("invalid reading {usage}")));
        }
        Ok(usage)
    }

    async fn memory(&self) -> Result<Usage, MetricsError> {
        let mut sys = System::new();
        sys.refresh_memory();
        let total_bytes = sys.total_memory();
        if total_bytes == 0 {
            return Err(MetricsError::Memory("total memory reported as zero".to_string()));
        }
        Ok(Usage {
            used_bytes: sys.used_memory(),
            total_bytes,
        })
    }

    async fn storage(&self, path: &Path) -> Result<Usage, MetricsError> {
        let missing = || MetricsError::StoragePathMissing(path.display().to_string());
        let path = tokio::fs::canonicalize(path).await.map_err(|_| missing())?;

        let disks = Disks::new_with_refreshed_list();
        let disk = disks
            .iter()
            .filter(|d| path.starts_with(d.mount_point()))
            .max_by_key(|d| d.mount_point().components().count())
            .ok_or_else(|| MetricsError::StorageUnmounted(path.display().to_string()))?;

        let total_bytes = disk.total_space();
        Ok(Usage {
            used_bytes: total_bytes.saturating_sub(disk.available_space()),
            total_bytes,
        })
    }

    async fn temperature(&self, sensor: &str) -> Result<f32, MetricsError> {
        let components = Components::new_with_refreshed_list();
        components
            .iter()
            .find(|c| c.label() == sensor || c.label().starts_with(sensor))
            .map(sysinfo::Component::temperature)
            .ok_or_else(|| MetricsError::SensorNotFound(sensor.to_string()))
    }
}
