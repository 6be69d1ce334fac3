mod common;

use common::{write_agenda, TestEnv, TRANSCRIPT_VTT};

#[test]
fn generate_without_agenda_fails_first() {
    let env = TestEnv::new();
    let output = env.run(&["generate", "--transcript", "meeting.vtt"]);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(!output.status.success());
    assert!(
        stderr.contains("Please select an agenda file."),
        "stderr:\n{}",
        stderr
    );
}

#[test]
fn generate_without_transcript_reports_transcript() {
    let env = TestEnv::new();
    let output = env.run(&["generate", "--agenda", "agenda.docx"]);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(!output.status.success());
    assert!(stderr.contains("Please select a transcript file."));
}

#[test]
fn generate_without_api_key_writes_nothing() {
    let env = TestEnv::new();
    let agenda = env.home().join("agenda.docx");
    let transcript = env.home().join("meeting.vtt");
    let out_dir = env.home().join("out");
    write_agenda(&agenda);
    std::fs::write(&transcript, TRANSCRIPT_VTT).unwrap();

    let output = env.run(&[
        "generate",
        "--agenda",
        agenda.to_str().unwrap(),
        "--transcript",
        transcript.to_str().unwrap(),
        "--output-dir",
        out_dir.to_str().unwrap(),
    ]);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(!output.status.success());
    assert!(stderr.contains("API key"), "stderr:\n{}", stderr);
    assert!(!out_dir.join("agenda_minutes.docx").exists());
}

#[test]
fn generate_help_lists_overrides() {
    let output = common::run_board_minutes(&["generate", "--help"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success());
    assert!(stdout.contains("--agenda"));
    assert!(stdout.contains("--transcript"));
    assert!(stdout.contains("--output-dir"));
    assert!(stdout.contains("--template"));
}
