use std::fs;
use std::process::Command;
use std::thread;
use std::time::{Duration, Instant};

/// Spawn the panel headless for a short scripted run and check the audit
/// trail it leaves behind.
#[test]
fn headless_run_writes_a_complete_audit_trail() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let audit_path = dir.path().join("audit.jsonl");
    let log_path = dir.path().join("panel.log");

    let started = Instant::now();
    let status = Command::new(env!("CARGO_BIN_EXE_turbine-panel"))
        .args([
            "--headless",
            "--run-seconds",
            "2",
            "--spin-up-ms",
            "100",
            "--spin-down-ms",
            "100",
            "--audit-log",
        ])
        .arg(&audit_path)
        .arg("--log-file")
        .arg(&log_path)
        .status()
        .expect("Failed to start turbine-panel");

    assert!(status.success(), "panel exited with {status}");
    assert!(
        started.elapsed() < Duration::from_secs(10),
        "headless run did not respect --run-seconds"
    );

    let content = fs::read_to_string(&audit_path).expect("Audit file missing");
    let entries: Vec<serde_json::Value> = content
        .lines()
        .map(|line| serde_json::from_str(line).expect("Malformed audit line"))
        .collect();

    let types: Vec<&str> = entries
        .iter()
        .map(|e| e["event_type"].as_str().unwrap_or(""))
        .collect();

    assert_eq!(types.first(), Some(&"system_start"));
    assert_eq!(types.last(), Some(&"system_shutdown"));
    assert!(
        types.contains(&"button_pressed"),
        "expected a button press in {types:?}"
    );
    assert!(
        types.contains(&"transition_completed"),
        "expected a completed transition in {types:?}"
    );

    // The scripted cycle starts and stops once: two presses, two timer edges.
    let shutdown = entries.last().expect("no entries");
    assert_eq!(shutdown["details"]["button_presses"], 2);
    assert_eq!(shutdown["details"]["transitions_completed"], 2);
}

/// An open-ended run (no --run-seconds) must still shut down through the
/// report path when interrupted.
#[cfg(unix)]
#[test]
fn open_ended_run_shuts_down_cleanly_on_interrupt() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let audit_path = dir.path().join("audit.jsonl");
    let log_path = dir.path().join("panel.log");

    let mut child = Command::new(env!("CARGO_BIN_EXE_turbine-panel"))
        .args(["--headless", "--spin-up-ms", "100", "--spin-down-ms", "100"])
        .arg("--audit-log")
        .arg(&audit_path)
        .arg("--log-file")
        .arg(&log_path)
        .spawn()
        .expect("Failed to start turbine-panel");

    // Let it come up and press start.
    thread::sleep(Duration::from_millis(500));
    let interrupted = Command::new("kill")
        .args(["-INT", &child.id().to_string()])
        .status()
        .expect("Failed to send SIGINT");
    assert!(interrupted.success());

    let deadline = Instant::now() + Duration::from_secs(5);
    let status = loop {
        if let Some(status) = child.try_wait().expect("Failed to poll child") {
            break status;
        }
        if Instant::now() > deadline {
            let _ = child.kill();
            panic!("panel did not exit after SIGINT");
        }
        thread::sleep(Duration::from_millis(50));
    };
    assert!(status.success(), "panel exited with {status}");

    let content = fs::read_to_string(&audit_path).expect("Audit file missing");
    let last: serde_json::Value = serde_json::from_str(
        content.lines().last().expect("empty audit trail"),
    )
    .expect("Malformed audit line");
    assert_eq!(last["event_type"], "system_shutdown");
}
