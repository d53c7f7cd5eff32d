use native_host::logger::LOG_FILE_NAME;

use std::process::Command;

use tempfile::tempdir;

/// **VALUE**: `scrapbee-backend init` creates the log file and exits 0 without
/// writing anything to stdout.
///
/// **WHY THIS MATTERS**: The installer runs `init` to verify the binary works;
/// any stdout output would be misread as a frame by a browser.
///
/// **BUG THIS CATCHES**: Would catch logs leaking to stdout or `init` falling
/// into the read loop and hanging.
#[test]
fn given_init_argument_when_binary_runs_then_exits_cleanly_with_log_file() {
    // GIVEN: An empty working directory (the default log location)
    let dir = tempdir().expect("tempdir");

    // WHEN
    let output = Command::new(env!("CARGO_BIN_EXE_scrapbee-backend"))
        .arg("init")
        .current_dir(dir.path())
        .env("XDG_CONFIG_HOME", dir.path())
        .output()
        .expect("binary runs");

    // THEN
    assert!(output.status.success(), "init should exit 0");
    assert!(output.stdout.is_empty(), "stdout must stay clean");
    assert!(dir.path().join(LOG_FILE_NAME).exists());
}
