mod common;

use common::{run_board_minutes, TestEnv};

#[test]
fn help_shows_usage() {
    let output = run_board_minutes(&["--help"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(
        output.status.success(),
        "--help should succeed\nstdout:\n{}\nstderr:\n{}",
        stdout,
        stderr
    );
    assert!(stdout.contains("Usage:"));
    assert!(stdout.contains("generate"));
    assert!(stdout.contains("render"));
}

#[test]
fn version_shows_version() {
    let output = run_board_minutes(&["--version"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success());
    assert!(stdout.contains("board-minutes "));
}

#[test]
fn completions_bash_outputs_script() {
    let output = run_board_minutes(&["completions", "bash"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(
        output.status.success(),
        "completions bash should succeed\nstdout:\n{}\nstderr:\n{}",
        stdout,
        stderr
    );
    assert!(
        stdout.contains("board-minutes"),
        "expected completion output to reference command name\nstdout:\n{}",
        stdout
    );
}

#[test]
fn config_show_lists_defaults() {
    let output = run_board_minutes(&["config", "show"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(
        output.status.success(),
        "config show should succeed\nstdout:\n{}\nstderr:\n{}",
        stdout,
        stderr
    );
    assert!(stdout.contains("[llm]"));
    assert!(stdout.contains("gpt-4.1"));
    assert!(stdout.contains("[document]"));
}

#[test]
fn config_set_persists_and_show_masks_api_key() {
    let env = TestEnv::new();

    let output = env.run(&["config", "set", "llm.api_key", "sk-secret-value"]);
    assert!(
        output.status.success(),
        "config set should succeed\nstderr:\n{}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(!String::from_utf8_lossy(&output.stdout).contains("sk-secret-value"));

    let output = env.run(&["config", "set", "llm.max_tokens", "4000"]);
    assert!(output.status.success());

    let stored = std::fs::read_to_string(env.config_path()).expect("config file written");
    assert!(stored.contains("sk-secret-value"));
    assert!(stored.contains("max_tokens = 4000"));

    let output = env.run(&["config", "show"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    assert!(!stdout.contains("sk-secret-value"));
    assert!(stdout.contains("********"));
}

#[test]
fn config_set_rejects_unknown_key_and_bad_number() {
    let env = TestEnv::new();

    let output = env.run(&["config", "set", "llm.colour", "blue"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Unknown configuration key"));

    let output = env.run(&["config", "set", "llm.temperature", "warm"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("llm.temperature"));
}

#[test]
fn config_init_refuses_to_overwrite_without_force() {
    let env = TestEnv::new();

    assert!(env.run(&["config", "init"]).status.success());
    assert!(env.config_path().exists());

    let output = env.run(&["config", "init"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("--force"));

    assert!(env.run(&["config", "init", "--force"]).status.success());
}

#[test]
fn config_file_values_are_loaded() {
    let env = TestEnv::new();
    env.write_config(
        r#"
[llm]
model = "gpt-4o-mini"

[document]
title = "Finance Committee Minutes"
"#,
    );

    let output = env.run(&["config", "show"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    assert!(stdout.contains("gpt-4o-mini"));
    assert!(stdout.contains("Finance Committee Minutes"));
}
