//! CLI arg parsing tests for sysdash
use std::process::Command;

fn run(args: &[&str], config_home: &std::path::Path) -> (bool, String) {
    let output = Command::new(env!("CARGO_BIN_EXE_sysdash"))
        .args(args)
        .env("XDG_CONFIG_HOME", config_home)
        .env_remove("SYSDASH_URL")
        .output()
        .expect("run sysdash");
    let text = format!(
        "{}{}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
    (output.status.success(), text)
}

#[test]
fn test_help_mentions_short_and_long_flags() {
    let dir = tempfile::tempdir().unwrap();
    let (ok, text) = run(&["--help"], dir.path());
    assert!(ok, "sysdash --help failed\n{text}");
    assert!(
        text.contains("--interval-ms")
            && text.contains("-i")
            && text.contains("--theme")
            && text.contains("--url")
            && text.contains("--dry-run"),
        "help text missing expected flags\n{text}"
    );
}

#[test]
fn test_dry_run_prints_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let (ok, text) = run(&["--dry-run"], dir.path());
    assert!(ok, "{text}");
    assert!(text.contains("url: http://127.0.0.1:5000"), "{text}");
    assert!(text.contains("interval_ms: 2000"), "{text}");
    assert!(text.contains("theme: light"), "{text}");
    assert!(text.contains("sysdash.log"), "{text}");
}

#[test]
fn test_positional_url_and_short_interval() {
    let dir = tempfile::tempdir().unwrap();
    let (ok, text) = run(
        &["http://10.0.0.5:8080", "-i", "5000", "--theme", "dark", "--dry-run"],
        dir.path(),
    );
    assert!(ok, "{text}");
    assert!(text.contains("url: http://10.0.0.5:8080"), "{text}");
    assert!(text.contains("interval_ms: 5000"), "{text}");
    assert!(text.contains("theme: dark"), "{text}");
}

#[test]
fn test_url_from_env_and_saved_theme() {
    let dir = tempfile::tempdir().unwrap();
    let prefs_dir = dir.path().join("sysdash");
    std::fs::create_dir_all(&prefs_dir).unwrap();
    std::fs::write(prefs_dir.join("prefs.json"), r#"{"theme":"dark"}"#).unwrap();

    let out = assert_cmd::Command::cargo_bin("sysdash")
        .unwrap()
        .arg("--dry-run")
        .env("XDG_CONFIG_HOME", dir.path())
        .env("SYSDASH_URL", "http://monitor.local:5000")
        .assert()
        .success()
        .get_output()
        .clone();
    let text = String::from_utf8_lossy(&out.stdout);
    assert!(text.contains("url: http://monitor.local:5000"), "{text}");
    assert!(text.contains("theme: dark"), "{text}");
}

#[test]
fn test_bad_theme_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let (ok, text) = run(&["--theme", "neon", "--dry-run"], dir.path());
    assert!(!ok, "{text}");
}

#[test]
fn test_dry_run_shows_normalized_base_url() {
    let dir = tempfile::tempdir().unwrap();
    let (ok, text) = run(&["--url", "http://host:5000/monitor", "--dry-run"], dir.path());
    assert!(ok, "{text}");
    assert!(text.contains("url: http://host:5000/monitor/"), "{text}");

    let (ok, text) = run(&["not a url", "--dry-run"], dir.path());
    assert!(!ok, "{text}");
    assert!(text.contains("invalid backend url"), "{text}");
}
