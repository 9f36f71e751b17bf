//! Identity and resource-metrics service tests.

#![allow(clippy::expect_used)]

use hotspot_agent::application::services::system_query::{device_identity, resource_metrics};
use hotspot_agent::domain::{AgentConfig, MetricsError, PLACEHOLDER_SERIAL};

use crate::helpers::{
    FakeFs, FakeProbe, RecordingRunner, err_output, ok_output, unspawnable_runner,
};

const CPUINFO: &str = "\
processor\t: 0
model name\t: ARMv7 Processor rev 4 (v7l)
Hardware\t: BCM2835
Revision\t: a020d3
Serial\t\t: 00000000a1b2c3d4
Model\t\t: Raspberry Pi 3 Model B Plus Rev 1.3
";

fn device_fs() -> FakeFs {
    FakeFs::default()
        .with_file("/proc/cpuinfo", CPUINFO)
        .with_file("/sys/class/net/eth0/address", "b8:27:eb:00:00:01\n")
        .with_file("/sys/class/net/wlan0/address", "b8:27:eb:00:00:02\n")
}

#[tokio::test]
async fn test_device_identity_reads_every_source() {
    let runner = RecordingRunner::new(|program: &str, _: &[&str]| match program {
        "/sbin/fwupdate" => Ok(ok_output(b"2021.06.26.0\n")),
        "cat" => Ok(ok_output(b"4231.57 16211.80\n")),
        other => anyhow::bail!("unexpected {other}"),
    });
    let cfg = AgentConfig::default();

    let identity = device_identity(&runner, &device_fs(), &cfg).await;

    assert_eq!(identity.serial_number, "a1b2c3d4");
    assert_eq!(identity.eth_mac.as_deref(), Some("b8:27:eb:00:00:01"));
    assert_eq!(identity.wlan_mac.as_deref(), Some("b8:27:eb:00:00:02"));
    assert_eq!(identity.firmware_version.as_deref(), Some("2021.06.26.0"));
    assert_eq!(identity.uptime_seconds, Some(4231));
    assert_eq!(
        runner.calls(),
        vec!["/sbin/fwupdate current", "cat /proc/uptime"]
    );
}

#[tokio::test]
async fn test_device_identity_missing_marker_uses_placeholder() {
    let fs = FakeFs::default().with_file("/proc/cpuinfo", "processor\t: 0\nHardware\t: BCM2835\n");
    let runner = unspawnable_runner();

    let identity = device_identity(&runner, &fs, &AgentConfig::default()).await;

    assert_eq!(identity.serial_number, PLACEHOLDER_SERIAL);
}

#[tokio::test]
async fn test_device_identity_everything_unavailable() {
    let runner = unspawnable_runner();

    let identity = device_identity(&runner, &FakeFs::default(), &AgentConfig::default()).await;

    assert_eq!(identity.serial_number, "00000000");
    assert_eq!(identity.eth_mac, None);
    assert_eq!(identity.wlan_mac, None);
    assert_eq!(identity.firmware_version, None);
    assert_eq!(identity.uptime_seconds, None);
}

#[tokio::test]
async fn test_device_identity_failed_commands_are_absent() {
    let runner = RecordingRunner::new(|_: &str, _: &[&str]| Ok(err_output(127, b"not found")));

    let identity = device_identity(&runner, &device_fs(), &AgentConfig::default()).await;

    assert_eq!(identity.firmware_version, None);
    assert_eq!(identity.uptime_seconds, None);
    assert_eq!(identity.serial_number, "a1b2c3d4");
}

#[tokio::test]
async fn test_device_identity_unparsable_uptime_is_absent() {
    let runner = RecordingRunner::new(|_: &str, _: &[&str]| Ok(ok_output(b"up a while")));

    let identity = device_identity(&runner, &device_fs(), &AgentConfig::default()).await;

    assert_eq!(identity.uptime_seconds, None);
    assert_eq!(identity.firmware_version.as_deref(), Some("up a while"));
}

#[tokio::test]
async fn test_resource_metrics_converts_units() {
    let probe = FakeProbe::default();

    let metrics = resource_metrics(&probe, &AgentConfig::default().resources)
        .await
        .expect("readings available");

    assert!((metrics.cpu_usage_percent - 12.5).abs() < f32::EPSILON);
    assert_eq!(metrics.memory_used_mb, 300);
    assert_eq!(metrics.memory_total_mb, 1024);
    assert_eq!(metrics.storage_used_mb, 2_000);
    assert_eq!(metrics.storage_total_mb, 29_000);
    assert_eq!(metrics.temperature_celsius, 48);
}

#[tokio::test]
async fn test_resource_metrics_missing_sensor_propagates() {
    let probe = FakeProbe {
        missing_sensor: true,
        ..FakeProbe::default()
    };

    let err = resource_metrics(&probe, &AgentConfig::default().resources)
        .await
        .expect_err("sensor missing");

    assert!(matches!(err, MetricsError::SensorNotFound(ref s) if s == "cpu_thermal"));
}

#[tokio::test]
async fn test_resource_metrics_nan_temperature_is_an_error() {
    let probe = FakeProbe {
        temperature: f32::NAN,
        ..FakeProbe::default()
    };

    let err = resource_metrics(&probe, &AgentConfig::default().resources)
        .await
        .expect_err("invalid reading");

    assert!(matches!(err, MetricsError::InvalidTemperature { .. }));
}
