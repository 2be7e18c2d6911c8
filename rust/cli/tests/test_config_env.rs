//! Configuration layering through the real process environment.

mod helpers;

use std::io::Write;

use helpers::{EnvGuard, run_cli};
use serial_test::serial;

#[test]
#[serial]
fn cfg_reports_sources() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "threshold = 25\nplayers = 5").unwrap();
    let path = file.path().to_string_lossy().into_owned();
    let _env = EnvGuard::apply(&[("SEVENS_CONFIG", path.as_str()), ("SEVENS_PLAYERS", "3")]);

    let output = run_cli(&["cfg"]);
    assert_eq!(output.code, 0, "stderr: {}", output.stderr);
    let json: serde_json::Value = serde_json::from_str(&output.stdout).unwrap();
    assert_eq!(json["threshold"]["value"], 25);
    assert_eq!(json["threshold"]["source"], "file");
    assert_eq!(json["players"]["value"], 3);
    assert_eq!(json["players"]["source"], "env");
    assert_eq!(json["seed"]["source"], "default");
}

#[test]
#[serial]
fn invalid_environment_fails_cfg() {
    let _env = EnvGuard::apply(&[("SEVENS_THRESHOLD", "zero")]);
    let output = run_cli(&["cfg"]);
    assert_eq!(output.code, 2);
    assert_eq!(
        output.stderr,
        "Error: Configuration error: Invalid threshold: zero\n"
    );
}

#[test]
#[serial]
fn environment_players_apply_to_internal_mode() {
    let _env = EnvGuard::apply(&[("SEVENS_PLAYERS", "5"), ("SEVENS_SEED", "12")]);
    let output = run_cli(&["internal", "--strategy", "prudent"]);
    assert_eq!(output.code, 0, "stderr: {}", output.stderr);
    assert!(output.stdout.starts_with("Internal mode: 5 players\n"));
}

#[test]
#[serial]
fn flags_override_the_environment() {
    let _env = EnvGuard::apply(&[("SEVENS_PLAYERS", "5")]);
    let output = run_cli(&["internal", "--strategy", "prudent", "--players", "2"]);
    assert_eq!(output.code, 0, "stderr: {}", output.stderr);
    assert!(output.stdout.starts_with("Internal mode: 2 players\n"));
}

#[test]
#[serial]
fn environment_seed_makes_rounds_repeatable() {
    let _env = EnvGuard::apply(&[("SEVENS_SEED", "77")]);
    let args = ["competition", "builtin:prudent", "builtin:prudent"];
    let first = run_cli(&args);
    let second = run_cli(&args);
    assert_eq!(first.code, 0);
    assert_eq!(first.stdout, second.stdout);
}

#[test]
#[serial]
fn plugin_dir_is_used_for_default_modules() {
    let dir = tempfile::tempdir().unwrap();
    let dir_arg = dir.path().to_string_lossy().into_owned();
    let _env = EnvGuard::apply(&[("SEVENS_PLUGIN_DIR", dir_arg.as_str())]);
    let output = run_cli(&["internal", "--players", "2"]);
    assert_eq!(output.code, 2);
    assert!(output.stderr.contains("Strategy load error"));
    assert!(output.stderr.contains("sevens_random_aggressive"));
}

#[test]
#[serial]
fn environment_players_do_not_constrain_listed_seats() {
    let _env = EnvGuard::apply(&[("SEVENS_PLAYERS", "1"), ("SEVENS_SEED", "6")]);
    let output = run_cli(&[
        "competition",
        "builtin:prudent",
        "builtin:prudent",
        "builtin:prudent",
    ]);
    assert_eq!(output.code, 0, "stderr: {}", output.stderr);
    assert!(output.stdout.starts_with("Competition mode: 3 players\n"));

    let output = run_cli(&["internal", "--strategy", "prudent"]);
    assert_eq!(output.code, 2);
    assert!(output.stderr.contains("players must be between 2 and 52, got 1"));
}
