use anyhow::Result;
use insta::assert_snapshot;
use pretty_assertions::assert_eq;

use crate::{CliTest, stderr, stdout};

const SORTED_IMAGES: &str = r#"["busybox:1.36","envoyproxy/envoy:v1.29","nginx:1.25","redis","registry.local:5000/redis-exporter:2.1"]"#;

#[test]
fn test_list_json_from_file() -> Result<()> {
    let test = CliTest::with_pods()?;

    let output = test.list_pods(&[])?;
    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert_snapshot!(stdout(&output), @r#"["busybox:1.36","envoyproxy/envoy:v1.29","nginx:1.25","redis","registry.local:5000/redis-exporter:2.1"]"#);
    assert_eq!(stderr(&output), "");

    Ok(())
}

#[test]
fn test_every_strategy_prints_the_same_list() -> Result<()> {
    let test = CliTest::with_pods()?;

    for strategy in ["sequential", "streaming", "fan-out"] {
        let output = test.list_pods(&["--strategy", strategy, "--page-size", "1"])?;
        assert_eq!(output.status.code(), Some(0), "strategy {}", strategy);
        assert_eq!(stdout(&output), SORTED_IMAGES, "strategy {}", strategy);
    }

    Ok(())
}

#[test]
fn test_list_raw() -> Result<()> {
    let test = CliTest::with_pods()?;

    let output = test.list_pods(&["-o", "raw"])?;
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(
        stdout(&output),
        "busybox:1.36\nenvoyproxy/envoy:v1.29\nnginx:1.25\nredis\nregistry.local:5000/redis-exporter:2.1"
    );

    Ok(())
}

#[test]
fn test_list_parsed_raw() -> Result<()> {
    let test = CliTest::with_pods()?;

    let output = test.list_pods(&["-o", "raw", "--parsed"])?;
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(
        stdout(&output),
        "busybox\t1.36\nenvoyproxy/envoy\tv1.29\nnginx\t1.25\nredis\tlatest\nregistry.local:5000/redis-exporter\t2.1"
    );

    Ok(())
}

#[test]
fn test_list_parsed_json() -> Result<()> {
    let test = CliTest::with_pods()?;

    let output = test.list_pods(&["--parsed", "-n", "infra"])?;
    assert_eq!(output.status.code(), Some(0));
    assert_snapshot!(stdout(&output), @r#"[{"repository":"redis","tag":"latest"},{"repository":"registry.local:5000/redis-exporter","tag":"2.1"}]"#);

    Ok(())
}

#[test]
fn test_list_uses_config_file() -> Result<()> {
    let test = CliTest::with_pods()?;
    test.write_file(
        ".kimagesrc.json",
        r#"{ "strategy": "fan-out", "output": "raw", "namespace": "infra" }"#,
    )?;

    let output = test.list_pods(&[])?;
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(
        stdout(&output),
        "redis\nregistry.local:5000/redis-exporter:2.1"
    );

    // Flags win over the file.
    let output = test.list_pods(&["-o", "json", "-n", "default"])?;
    assert_eq!(
        stdout(&output),
        r#"["busybox:1.36","envoyproxy/envoy:v1.29","nginx:1.25"]"#
    );

    Ok(())
}

#[test]
fn test_empty_pod_list() -> Result<()> {
    let test = CliTest::with_file("pods.json", r#"{ "items": [] }"#)?;

    for strategy in ["sequential", "streaming", "fan-out"] {
        let output = test.list_pods(&["-s", strategy])?;
        assert_eq!(output.status.code(), Some(0), "strategy {}", strategy);
        assert_eq!(stdout(&output), "[]", "strategy {}", strategy);
    }

    Ok(())
}

#[test]
fn test_invalid_config_is_an_error() -> Result<()> {
    let test = CliTest::with_pods()?;
    test.write_file(".kimagesrc.json", r#"{ "pageSize": 0 }"#)?;

    let output = test.list_pods(&[])?;
    assert_eq!(output.status.code(), Some(2));
    assert!(stdout(&output).is_empty());
    assert!(stderr(&output).contains("Invalid 'pageSize'"));

    Ok(())
}

#[test]
fn test_missing_pod_file_is_an_error() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.list_pods(&[])?;
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).starts_with("Error: "));
    assert!(stderr(&output).contains("pods.json"));

    Ok(())
}

#[test]
fn test_malformed_pod_file_is_an_error() -> Result<()> {
    let test = CliTest::with_file("pods.json", "not json")?;

    let output = test.list_pods(&[])?;
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("malformed"));

    Ok(())
}

#[test]
fn test_missing_kubeconfig_is_an_error() -> Result<()> {
    let test = CliTest::new()?;

    let output = test
        .list_command()
        .args(["--kubeconfig", "missing-kubeconfig"])
        .output()?;
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("kubeconfig not found"));

    Ok(())
}

#[test]
fn test_invalid_strategy_is_rejected() -> Result<()> {
    let test = CliTest::with_pods()?;

    let output = test.list_pods(&["--strategy", "parallel"])?;
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("invalid value 'parallel'"));

    Ok(())
}

#[test]
fn test_huge_timeout_runs_without_deadline() -> Result<()> {
    let test = CliTest::with_pods()?;

    let output = test.list_pods(&["--timeout", "18446744073709551615"])?;
    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), SORTED_IMAGES);

    test.write_file(".kimagesrc.json", r#"{ "timeoutSecs": 18446744073709551615 }"#)?;
    let output = test.list_pods(&["-s", "streaming"])?;
    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), SORTED_IMAGES);

    Ok(())
}
