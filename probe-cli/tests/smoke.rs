use std::process::{Command, Output};

const MISSING_LIBRARY: &str = "libdriver-probe-does-not-exist.so.0";

fn probe(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_driver-probe"))
        .args(args)
        .env_remove("DRIVER_PROBE_LIBRARY")
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

#[test]
pub fn missing_library_reports_failure() {
    let output = probe(&[MISSING_LIBRARY]);

    let stdout = String::from_utf8(output.stdout).unwrap();
    let diagnostic = stdout.trim().strip_prefix("Failed: ").unwrap();

    assert!(!diagnostic.is_empty());
    assert!(output.status.success());
}

#[test]
pub fn strict_mode_exits_with_failure() {
    let output = probe(&["--strict", MISSING_LIBRARY]);

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.starts_with("Failed: "), "{}", stdout);
    assert_eq!(output.status.code(), Some(1));
}

#[test]
pub fn library_from_environment() {
    let output = Command::new(env!("CARGO_BIN_EXE_driver-probe"))
        .env("DRIVER_PROBE_LIBRARY", MISSING_LIBRARY)
        .output()
        .unwrap();

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.starts_with("Failed: "), "{}", stdout);
}

#[test]
pub fn repeated_runs_agree() {
    let first = probe(&[MISSING_LIBRARY]);
    let second = probe(&[MISSING_LIBRARY]);

    assert_eq!(first.stdout, second.stdout);
    assert_eq!(first.status.code(), second.status.code());
}

#[cfg(all(target_os = "linux", target_env = "gnu"))]
#[test]
pub fn present_library_reports_success() {
    let output = probe(&["libc.so.6"]);

    let stdout = String::from_utf8(output.stdout).unwrap();
    let stderr = String::from_utf8(output.stderr).unwrap();

    assert_eq!(stdout.trim(), "Success!");
    assert_eq!(stderr.trim(), "");
}

#[cfg(all(target_os = "linux", target_env = "gnu"))]
#[test]
pub fn several_libraries_get_headers() {
    let output = probe(&["--strict", "--symbol", "malloc", "libc.so.6", MISSING_LIBRARY]);

    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();

    assert_eq!(lines[0], "libc.so.6:");
    assert_eq!(lines[1], "Success!");
    assert_eq!(lines[2], "Symbol malloc: resolved");
    assert_eq!(lines[3], format!("{}:", MISSING_LIBRARY));
    assert!(lines[4].starts_with("Failed: "));
    assert_eq!(output.status.code(), Some(1));
}


fn assert_default_library_report(output: &Output) {
    let stdout = String::from_utf8(output.stdout.clone()).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();

    assert_eq!(lines.len(), 1, "{}", stdout);
    if lines[0] != "Success!" {
        let diagnostic = lines[0].strip_prefix("Failed: ").unwrap();
        assert!(!diagnostic.trim().is_empty());
        #[cfg(target_os = "linux")]
        assert!(diagnostic.contains("libvulkan.so.1"), "{}", diagnostic);
    }
    assert_eq!(output.status.code(), Some(0));
}

#[test]
pub fn no_arguments_load_the_vulkan_loader() {
    let output = probe(&[]);
    assert_default_library_report(&output);
}

#[test]
pub fn empty_environment_falls_back_to_default() {
    let output = Command::new(env!("CARGO_BIN_EXE_driver-probe"))
        .env("DRIVER_PROBE_LIBRARY", "")
        .env_remove("RUST_LOG")
        .output()
        .unwrap();

    assert_default_library_report(&output);
    assert_eq!(output.stdout, probe(&[]).stdout);
}

#[test]
pub fn empty_argument_falls_back_to_default() {
    let output = probe(&[""]);

    assert_default_library_report(&output);
    assert_eq!(output.stdout, probe(&[]).stdout);
}

#[test]
pub fn version_is_named_after_the_binary() {
    let output = probe(&["--version"]);

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.starts_with("driver-probe "), "{}", stdout);
    assert!(output.status.success());
}
