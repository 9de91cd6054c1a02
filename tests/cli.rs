//! Integration tests driving the gridcalc binary.

use std::path::Path;
use std::process::Command;

fn run(args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_gridcalc"))
        // Tests must not depend on a user's ~/.config/gridcalc/config.toml.
        .arg("--no-config")
        .args(args)
        .env_remove("GRIDCALC_LOG")
        .output()
        .expect("Failed to execute gridcalc");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let exit_code = output.status.code().unwrap_or(-1);

    (stdout, stderr, exit_code)
}

fn row_fields(stdout: &str, line: usize) -> Vec<String> {
    stdout
        .lines()
        .nth(line)
        .unwrap_or_default()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

#[test]
fn test_empty_default_sheet() {
    let (stdout, _, code) = run(&[]);
    assert_eq!(code, 0);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 11);
    assert_eq!(
        row_fields(&stdout, 0),
        ["A", "B", "C", "D", "E", "F", "G", "H", "I", "J"]
    );
    assert_eq!(lines[10], "9");
}

#[test]
fn test_set_and_propagate() {
    let (stdout, _, code) = run(&[
        "-r", "2", "-c", "2", "-s", "A1=A0+B0", "-s", "A0=5", "-s", "B0=3",
    ]);
    assert_eq!(code, 0);
    assert_eq!(row_fields(&stdout, 1), ["0", "5.0", "3.0"]);
    assert_eq!(row_fields(&stdout, 2), ["1", "8.0"]);
}

#[test]
fn test_precision_flag() {
    let (stdout, _, code) = run(&["-r", "2", "-c", "2", "-p", "3", "-s", "A0=1/8"]);
    assert_eq!(code, 0);
    assert_eq!(row_fields(&stdout, 1), ["0", "0.125"]);
}

#[test]
fn test_precision_out_of_range_fails() {
    let (_, stderr, code) = run(&["-p", "9"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("precision"), "{stderr}");
}

#[test]
fn test_cycle_edit_is_rolled_back() {
    let (stdout, stderr, code) = run(&[
        "-r", "2", "-c", "2", "-s", "A0=4", "-s", "B0=A0+1", "-s", "A0=B0",
    ]);
    assert_eq!(code, 1);
    assert!(stderr.contains("Circular dependency"), "{stderr}");
    assert_eq!(row_fields(&stdout, 1), ["0", "4.0", "5.0"]);
}

#[test]
fn test_parse_error_keeps_later_edits() {
    let (stdout, stderr, code) = run(&["-r", "2", "-c", "2", "-s", "A0=(1+2", "-s", "B0=7"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("A0"), "{stderr}");
    assert_eq!(row_fields(&stdout, 1), ["0", "7.0"]);
}

#[test]
fn test_out_of_bounds_reference_is_rejected() {
    let (stdout, stderr, code) = run(&["-r", "2", "-c", "2", "-s", "A0=C5+1"]);
    assert_eq!(code, 1);
    assert!(!stderr.is_empty());
    assert_eq!(row_fields(&stdout, 1), ["0"]);
}

#[test]
fn test_bad_assignment_is_a_usage_error() {
    let (_, stderr, code) = run(&["-s", "A0"]);
    assert_eq!(code, 2);
    assert!(stderr.contains("ADDR=FORMULA"), "{stderr}");
}

#[test]
fn test_formulas_view() {
    let (stdout, _, code) = run(&["-r", "2", "-c", "2", "-s", "B1=(A0+1)*2", "--formulas"]);
    assert_eq!(code, 0);
    assert_eq!(row_fields(&stdout, 2), ["1", "(A0+1)*2"]);
}

#[test]
fn test_eval_prints_results() {
    let (stdout, _, code) = run(&["-s", "A0=6", "-e", "(1+2)*3", "-e", "A0^2/4"]);
    assert_eq!(code, 0);
    assert_eq!(stdout, "9.0\n9.0\n");
}

#[test]
fn test_eval_error_sets_exit_code() {
    let (stdout, stderr, code) = run(&["-e", "1 2", "-e", "2^3^2"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("malformed expression"), "{stderr}");
    assert_eq!(stdout, "64.0\n");
}

#[test]
fn test_output_then_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("budget.grid");
    let path_str = path.to_str().unwrap();

    let (_, stderr, code) = run(&[
        "-r", "3", "-c", "27", "-s", "AA2=(1+2)*3", "-s", "Z0=AA2/2", "-o", path_str,
    ]);
    assert_eq!(code, 0, "{stderr}");
    assert!(stderr.contains("Saved to"));
    assert_eq!(
        std::fs::read_to_string(&path).unwrap(),
        "3 27\nZ0 AA2/2\nAA2 (1+2)*3\n"
    );

    let (stdout, _, code) = run(&[path_str, "-e", "Z0+AA2"]);
    assert_eq!(code, 0);
    assert_eq!(stdout, "13.5\n");
}

#[test]
fn test_write_back_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sheet.grid");
    std::fs::write(&path, "2 2\nA0 1\nB1 A0*10\n").unwrap();
    let path_str = path.to_str().unwrap();

    let (_, stderr, code) = run(&[path_str, "--clear", "B1", "-s", "A1=A0+A0", "-w"]);
    assert_eq!(code, 0, "{stderr}");
    assert_eq!(
        std::fs::read_to_string(&path).unwrap(),
        "2 2\nA0 1\nA1 A0+A0\n"
    );
}

#[test]
fn test_write_without_file_fails() {
    let (_, stderr, code) = run(&["-w"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("--write needs a FILE"), "{stderr}");
}

#[test]
fn test_oversized_grid_is_rejected() {
    let (stdout, stderr, code) = run(&["-r", "100000000", "-c", "100000000"]);
    assert_eq!(code, 1);
    assert!(stdout.is_empty());
    assert!(stderr.contains("Dimension error"), "{stderr}");
}

#[test]
fn test_existing_file_ignores_size_flags() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("small.grid");
    std::fs::write(&path, "2 2\nB1 6*7\n").unwrap();

    let (stdout, stderr, code) = run(&[path.to_str().unwrap(), "-r", "1", "-c", "1"]);
    assert_eq!(code, 0, "{stderr}");
    assert_eq!(row_fields(&stdout, 0), ["A", "B"]);
    assert_eq!(row_fields(&stdout, 2), ["1", "42.0"]);
}

#[test]
fn test_missing_file_starts_new_sheet() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("new.grid");

    let (stdout, _, code) = run(&[path.to_str().unwrap(), "-r", "2", "-c", "3"]);
    assert_eq!(code, 0);
    assert_eq!(row_fields(&stdout, 0), ["A", "B", "C"]);
    assert!(!Path::new(&path).exists());
}

#[test]
fn test_corrupt_file_reports_line() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.grid");
    std::fs::write(&path, "2 2\nA0 1\nB0 1+\n").unwrap();

    let (stdout, stderr, code) = run(&[path.to_str().unwrap()]);
    assert_eq!(code, 1);
    assert!(stdout.is_empty());
    assert!(stderr.contains("Line 3"), "{stderr}");
}

#[test]
fn test_config_file_supplies_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.toml");
    std::fs::write(&config, "rows = 2\ncolumns = 2\nprecision = 2\n").unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_gridcalc"))
        .args(["--config", config.to_str().unwrap(), "-s", "B1=1/4"])
        .env_remove("GRIDCALC_LOG")
        .output()
        .unwrap();
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout.lines().count(), 3);
    assert_eq!(row_fields(&stdout, 2), ["1", "0.25"]);

    // Flags win over the config file.
    let output = Command::new(env!("CARGO_BIN_EXE_gridcalc"))
        .args(["--config", config.to_str().unwrap(), "-p", "0", "-e", "7/2"])
        .output()
        .unwrap();
    assert_eq!(String::from_utf8_lossy(&output.stdout), "4\n");
}
