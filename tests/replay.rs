//! The binary driven by replay scripts

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

/// Run keywarp with an isolated config directory
fn keywarp(home: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_keywarp"))
        .args(args)
        .env("XDG_CONFIG_HOME", home)
        .env("HOME", home)
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

#[test]
fn test_hint_oneshot_prints_position() {
    let home = tempfile::tempdir().unwrap();
    let config = home.path().join("custom.yaml");
    std::fs::write(&config, "hint_chars: ab\n").unwrap();
    let script = fixture("hint_then_move.txt");

    let output = keywarp(
        home.path(),
        &[
            "--hint",
            "--screen-size",
            "1000x800",
            "-c",
            config.to_str().unwrap(),
            "--replay",
            script.to_str().unwrap(),
        ],
    );

    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "250 600\n");
}

#[test]
fn test_normal_oneshot_exit_status_is_button() {
    let home = tempfile::tempdir().unwrap();
    let script = fixture("normal_click.txt");

    let output = keywarp(
        home.path(),
        &[
            "--normal",
            "--oneshot",
            "--screen-size",
            "1000x800",
            "--replay",
            script.to_str().unwrap(),
        ],
    );

    assert_eq!(output.status.code(), Some(3));
    assert_eq!(String::from_utf8_lossy(&output.stdout), "530 400\n");
    // The click was recorded in the config directory
    assert!(home.path().join("keywarp/history").exists());
}

#[test]
fn test_list_keys_shows_defaults() {
    let home = tempfile::tempdir().unwrap();
    let output = keywarp(home.path(), &["--list-keys"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout
        .lines()
        .any(|l| l.starts_with("activation_key") && l.ends_with("A-M-c")));
}

#[test]
fn test_bad_config_fails_to_start() {
    let home = tempfile::tempdir().unwrap();
    let config = home.path().join("bad.yaml");
    std::fs::write(&config, "no_such_option: 1\n").unwrap();

    let output = keywarp(home.path(), &["--dump-config", "-c", config.to_str().unwrap()]);

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
}

#[test]
fn test_oneshot_requires_normal() {
    let home = tempfile::tempdir().unwrap();
    let output = keywarp(home.path(), &["--hint", "--oneshot"]);
    assert!(!output.status.success());
}
