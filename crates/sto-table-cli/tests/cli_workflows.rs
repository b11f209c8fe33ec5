#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::io;
use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

type TestResult = Result<(), Box<dyn std::error::Error>>;

const LEGACY_DOUBLE: &str = "\
Coordinates
version=1
nRows=2
nColumns=3
inDegrees=yes
endheader
time\tknee_angle_r\tankle_angle_r
0\t1.5\t-2
0.01\t1.75\t-2.25
";

const VEC3: &str = "\
markers
version=3
DataType=Vec3
nRows=1
nColumns=2
endheader
time\tRASI
0.5\t~[1,2,3]
";

fn cli_bin() -> &'static str {
    env!("CARGO_BIN_EXE_stotable")
}

fn run_cli(args: &[&str]) -> io::Result<Output> {
    Command::new(cli_bin()).args(args).output()
}

fn path_str(path: &Path) -> &str {
    path.to_str().expect("utf-8 temp path")
}

fn stdout_of(output: &Output) -> String {
    assert!(
        output.status.success(),
        "stdout:\n{}\nstderr:\n{}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn sniff_prints_declared_or_absent_tag() -> TestResult {
    let tmp = TempDir::new()?;
    let legacy = tmp.path().join("legacy.sto");
    let markers = tmp.path().join("markers.sto");
    std::fs::write(&legacy, LEGACY_DOUBLE)?;
    std::fs::write(&markers, VEC3)?;

    let out = stdout_of(&run_cli(&["sniff", "--file", path_str(&legacy)])?);
    assert_eq!(out.trim(), "<absent>");

    let out = stdout_of(&run_cli(&["sniff", "--file", path_str(&markers)])?);
    assert_eq!(out.trim(), "Vec3");
    Ok(())
}

#[test]
fn inspect_reports_type_shape_and_labels() -> TestResult {
    let tmp = TempDir::new()?;
    let legacy = tmp.path().join("legacy.sto");
    std::fs::write(&legacy, LEGACY_DOUBLE)?;

    let out = stdout_of(&run_cli(&["inspect", "--file", path_str(&legacy)])?);
    assert!(out.contains("DataType: double"), "{out}");
    assert!(out.contains("Rows: 2"), "{out}");
    assert!(out.contains("Columns: 2"), "{out}");
    assert!(out.contains("Labels: knee_angle_r, ankle_angle_r"), "{out}");
    assert!(out.contains("Metadata: inDegrees=yes"), "{out}");
    Ok(())
}

#[test]
fn rewrite_adds_a_data_type_declaration_to_legacy_files() -> TestResult {
    let tmp = TempDir::new()?;
    let input = tmp.path().join("legacy.sto");
    let output = tmp.path().join("out").join("rewritten.sto");
    std::fs::write(&input, LEGACY_DOUBLE)?;

    let out = stdout_of(&run_cli(&[
        "rewrite",
        "--input",
        path_str(&input),
        "--output",
        path_str(&output),
    ])?);
    assert!(out.contains("Wrote double table to"), "{out}");

    let out = stdout_of(&run_cli(&["sniff", "--file", path_str(&output)])?);
    assert_eq!(out.trim(), "double");

    let out = stdout_of(&run_cli(&["inspect", "--file", path_str(&output)])?);
    assert!(out.contains("Rows: 2"), "{out}");
    Ok(())
}

#[test]
fn rewrite_with_timing_reports_elapsed_time() -> TestResult {
    let tmp = TempDir::new()?;
    let input = tmp.path().join("markers.sto");
    let output = tmp.path().join("copy.sto");
    std::fs::write(&input, VEC3)?;

    let out = stdout_of(&run_cli(&[
        "rewrite",
        "--input",
        path_str(&input),
        "--output",
        path_str(&output),
        "--timing",
    ])?);
    assert!(out.contains("Wrote Vec3 table to"), "{out}");
    assert!(out.contains("elapsed_ms:"), "{out}");
    Ok(())
}

#[test]
fn unsupported_data_type_fails_with_message() -> TestResult {
    let tmp = TempDir::new()?;
    let input = tmp.path().join("vec13.sto");
    std::fs::write(&input, "DataType=Vec13\nendheader\ntime\ta\n")?;

    let output = run_cli(&["inspect", "--file", path_str(&input)])?;
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Vec13"), "{stderr}");
    assert!(stderr.contains("not supported"), "{stderr}");
    Ok(())
}

#[test]
fn missing_input_file_fails() -> TestResult {
    let tmp = TempDir::new()?;
    let missing = tmp.path().join("nope.sto");

    let output = run_cli(&["sniff", "--file", path_str(&missing)])?;
    assert!(!output.status.success());
    Ok(())
}
