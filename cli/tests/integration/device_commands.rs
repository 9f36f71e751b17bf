//! Integration tests for `identity`, `diagnostics` and configuration loading.

#![allow(clippy::expect_used)]

use std::path::Path;

use predicates::prelude::*;
use tempfile::TempDir;

use crate::cli_tests::agent;

/// Write a config whose identity sources live in `dir` and whose commands
/// are harmless stand-ins.
fn write_config(dir: &Path, net_test: &str) -> std::path::PathBuf {
    std::fs::write(
        dir.join("cpuinfo"),
        "processor\t: 0\nHardware\t: BCM2835\nSerial\t\t: 00000000a1b2c3d4\n",
    )
    .expect("write cpuinfo");
    std::fs::write(dir.join("eth0"), "b8:27:eb:00:00:01\n").expect("write eth0");

    let config = format!(
        r#"identity:
  cpuinfo_path: {d}/cpuinfo
  eth_address_path: {d}/eth0
  wlan_address_path: {d}/wlan0-missing
commands:
  firmware_version:
    program: echo
    args: ["2021.06.26.0"]
  uptime:
    program: echo
    args: ["4231.57 16211.80"]
  net_test:
{net_test}
factory_reset:
  lock_file: {d}/lifecycle.lock
"#,
        d = dir.display()
    );
    let path = dir.join("config.yaml");
    std::fs::write(&path, config).expect("write config");
    path
}

const PRINTING_PROBE: &str = r"    program: printf
    args: ['Download Speed: 94.31 Mbit/s\nLatency: 3.2 ms\nPublic IP: 203.0.113.7\n']";

const FAILING_PROBE: &str = "    program: 'false'";

const MALFORMED_PROBE: &str = r"    program: printf
    args: ['latency: fast\n']";

#[test]
fn test_identity_json_reports_every_field() {
    let dir = TempDir::new().expect("tempdir");
    let config = write_config(dir.path(), FAILING_PROBE);

    let output = agent()
        .arg("--json")
        .arg("--config")
        .arg(&config)
        .arg("identity")
        .output()
        .expect("run");

    assert!(output.status.success(), "{output:?}");
    let v: serde_json::Value = serde_json::from_slice(&output.stdout).expect("valid json");
    assert_eq!(v["serial_number"], "a1b2c3d4");
    assert_eq!(v["eth_mac"], "b8:27:eb:00:00:01");
    assert!(v["wlan_mac"].is_null());
    assert_eq!(v["firmware_version"], "2021.06.26.0");
    assert_eq!(v["uptime_seconds"], 4231);
}

#[test]
fn test_identity_human_output() {
    let dir = TempDir::new().expect("tempdir");
    let config = write_config(dir.path(), FAILING_PROBE);

    agent()
        .arg("--config")
        .arg(&config)
        .arg("identity")
        .assert()
        .success()
        .stdout(predicate::str::contains("a1b2c3d4"))
        .stdout(predicate::str::contains("1h 10m"));
}

#[test]
fn test_config_from_environment_variable() {
    let dir = TempDir::new().expect("tempdir");
    let config = write_config(dir.path(), FAILING_PROBE);

    agent()
        .env("HOTSPOT_AGENT_CONFIG", &config)
        .args(["--json", "identity"])
        .assert()
        .success()
        .stdout(predicate::str::contains("a1b2c3d4"));
}

#[test]
fn test_diagnostics_json_decodes_probe() {
    let dir = TempDir::new().expect("tempdir");
    let config = write_config(dir.path(), PRINTING_PROBE);

    let output = agent()
        .arg("--json")
        .arg("--config")
        .arg(&config)
        .arg("diagnostics")
        .output()
        .expect("run");

    assert!(output.status.success(), "{output:?}");
    let v: serde_json::Value = serde_json::from_slice(&output.stdout).expect("valid json");
    assert_eq!(v["download_speed"], 94);
    assert_eq!(v["latency"], 3.2);
    assert_eq!(v["public_ip"], "203.0.113.7");
}

#[test]
fn test_diagnostics_failed_probe_is_all_absent() {
    let dir = TempDir::new().expect("tempdir");
    let config = write_config(dir.path(), FAILING_PROBE);

    let output = agent()
        .arg("--json")
        .arg("--config")
        .arg(&config)
        .arg("diagnostics")
        .output()
        .expect("run");

    assert!(output.status.success(), "{output:?}");
    let v: serde_json::Value = serde_json::from_slice(&output.stdout).expect("valid json");
    assert!(v["download_speed"].is_null());
    assert!(v["latency"].is_null());
    assert!(v["public_ip"].is_null());
}

#[test]
fn test_diagnostics_malformed_value_fails() {
    let dir = TempDir::new().expect("tempdir");
    let config = write_config(dir.path(), MALFORMED_PROBE);

    agent()
        .arg("--config")
        .arg(&config)
        .arg("diagnostics")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Error:"))
        .stderr(predicate::str::contains("latency"));
}

#[test]
fn test_diagnostics_malformed_value_json_error_object() {
    let dir = TempDir::new().expect("tempdir");
    let config = write_config(dir.path(), MALFORMED_PROBE);

    let output = agent()
        .arg("--json")
        .arg("--config")
        .arg(&config)
        .arg("diagnostics")
        .output()
        .expect("run");

    assert_eq!(output.status.code(), Some(1));
    let v: serde_json::Value = serde_json::from_slice(&output.stdout).expect("valid json");
    assert_eq!(v["error"], true);
    assert_eq!(v["code"], "DIAGNOSTICS_MALFORMED");
}

#[test]
fn test_invalid_config_is_a_hard_error() {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("config.yaml");
    std::fs::write(&path, "commands:\n  reboot:\n    program: ''\n").expect("write");

    let output = agent()
        .arg("--json")
        .arg("--config")
        .arg(&path)
        .arg("identity")
        .output()
        .expect("run");

    assert_eq!(output.status.code(), Some(1));
    let v: serde_json::Value = serde_json::from_slice(&output.stdout).expect("valid json");
    assert_eq!(v["code"], "CONFIG_INVALID");
    assert!(
        v["message"]
            .as_str()
            .is_some_and(|m| m.contains("commands.reboot.program")),
        "{v}"
    );
}

#[test]
fn test_unparsable_config_is_a_hard_error() {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("config.yaml");
    std::fs::write(&path, "identity: [not, a, mapping\n").expect("write");

    agent()
        .arg("--config")
        .arg(&path)
        .arg("identity")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("cannot parse"));
}
