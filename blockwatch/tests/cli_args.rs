//! CLI arg tests for blockwatch, run against the built binary.
use assert_cmd::Command;

fn output_text(out: &std::process::Output) -> String {
    format!(
        "{}{}",
        String::from_utf8_lossy(&out.stdout),
        String::from_utf8_lossy(&out.stderr)
    )
}

#[test]
fn test_help_mentions_short_and_long_flags() {
    let out = Command::cargo_bin("blockwatch")
        .unwrap()
        .arg("--help")
        .output()
        .expect("run blockwatch --help");
    assert!(out.status.success());
    let text = output_text(&out);
    assert!(
        text.contains("--profile")
            && text.contains("-P")
            && text.contains("--port")
            && text.contains("-p")
            && text.contains("--dry-run"),
        "help text missing expected flags\n{text}"
    );
}

#[test]
fn test_flags_with_help_still_succeed() {
    for args in [
        vec!["--port", "9001", "--help"],
        vec!["-p", "9001", "--help"],
        vec!["--profile", "dev", "--help"],
    ] {
        let out = Command::cargo_bin("blockwatch")
            .unwrap()
            .args(&args)
            .output()
            .expect("run blockwatch");
        assert!(out.status.success(), "{args:?} did not succeed");
        assert!(output_text(&out).contains("Usage:"));
    }
}

#[test]
fn test_dry_run_prints_resolved_url() {
    let td = tempfile::tempdir().unwrap();
    let out = Command::cargo_bin("blockwatch")
        .unwrap()
        .env("XDG_CONFIG_HOME", td.path())
        .args(["--dry-run", "192.168.1.20"])
        .output()
        .expect("run blockwatch");
    assert!(out.status.success());
    assert_eq!(String::from_utf8_lossy(&out.stdout).trim(), "ws://192.168.1.20:8002/");

    let out = Command::cargo_bin("blockwatch")
        .unwrap()
        .env("XDG_CONFIG_HOME", td.path())
        .args(["--dry-run", "-p", "9100", "pi.local"])
        .output()
        .expect("run blockwatch");
    assert_eq!(String::from_utf8_lossy(&out.stdout).trim(), "ws://pi.local:9100/");
}

#[test]
fn test_bad_scheme_fails() {
    let td = tempfile::tempdir().unwrap();
    Command::cargo_bin("blockwatch")
        .unwrap()
        .env("XDG_CONFIG_HOME", td.path())
        .args(["--dry-run", "http://host:8002"])
        .assert()
        .failure();
}
