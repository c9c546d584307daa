use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

fn get_binary_path() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_symcuts"))
}

fn run(args: &[&str]) -> Output {
    Command::new(get_binary_path())
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute symcuts")
}

fn assert_success(output: &Output) {
    if !output.status.success() {
        panic!(
            "Command failed with status: {:?}\nstderr: {}\nstdout: {}",
            output.status,
            String::from_utf8_lossy(&output.stderr),
            String::from_utf8_lossy(&output.stdout)
        );
    }
}

fn path_str(path: &Path) -> &str {
    path.to_str().expect("temp path is valid UTF-8")
}

const SOLVER_LOG: &str = "\
@01 /runs/instances/elec_N4_D3_sym0.cip ===========
SYMMETRY stats perms 5 signedperms 2
SYMMETRY use simplecut handling
SYMMETRY use orbitope dynamic handling: nrows 4 ncols 3
SYMMETRY use orbitope dynamic handling: nrows 4 ncols 3
@04 1700000000
@01 /runs/instances/packing_N3_D2_sym0.cip ===========
SYMMETRY stats perms 0 signedperms 0
@04 1700000001
";

#[test]
fn test_evaluate_aggregated() {
    let dir = tempfile::tempdir().unwrap();
    let log = dir.path().join("run.out");
    fs::write(&log, SOLVER_LOG).unwrap();

    let output = run(&["evaluate", path_str(&log), "my_set"]);
    assert_success(&output);

    let stdout = String::from_utf8_lossy(&output.stdout);
    let row = stdout.trim_end();
    assert!(row.contains("my\\_set"), "Should latexify the test set name");
    let counts: Vec<&str> = row
        .trim_end_matches("\\\\")
        .split('&')
        .skip(1)
        .map(str::trim)
        .collect();
    assert_eq!(counts, ["2", "1", "1", "1", "0", "0", "0", "1", "1"]);
}

#[test]
fn test_evaluate_full() {
    let dir = tempfile::tempdir().unwrap();
    let log = dir.path().join("run.out");
    fs::write(&log, SOLVER_LOG).unwrap();

    let output = run(&["evaluate", path_str(&log), "my_set", "--full"]);
    assert_success(&output);

    let stdout = String::from_utf8_lossy(&output.stdout);
    let rows: Vec<&str> = stdout.lines().collect();
    assert_eq!(rows.len(), 1, "Instances without structures get no row");
    assert!(rows[0].contains("elec\\_N4\\_D3\\_sym0 & "));
    assert!(rows[0].contains(r"\mbox{2$\cdot$C(4, 3)}"));
    assert!(rows[0].ends_with(r"\mbox{S(1)} \\"));
}

#[test]
fn test_evaluate_malformed_log_fails() {
    let dir = tempfile::tempdir().unwrap();
    let log = dir.path().join("broken.out");
    fs::write(&log, "@01 a.cip\nSYMMETRY use signedorbitope handling: nrows x\n@04\n").unwrap();

    let output = run(&["evaluate", path_str(&log), "broken"]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("line 2"), "Should report the offending line");
}

#[test]
fn test_instance_generation() {
    let dir = tempfile::tempdir().unwrap();

    let output = run(&[
        "instance",
        "packing",
        "-n",
        "3",
        "-d",
        "2",
        "--variant",
        "4",
        "--out-dir",
        path_str(dir.path()),
    ]);
    assert_success(&output);

    let path = dir.path().join("packing_N3_D2_sym4.cip");
    assert!(path.exists(), "Should write the packing instance");
    let text = fs::read_to_string(&path).unwrap();
    assert!(text.contains("<doublelex_nonnegative_col0_row0>"));
    assert!(text.ends_with("END\n\n"));
}

#[test]
fn test_instance_kissing_without_reformulation() {
    let dir = tempfile::tempdir().unwrap();

    let output = run(&[
        "instance",
        "kissing",
        "-n",
        "4",
        "-d",
        "2",
        "--no-reformulation",
        "--out-dir",
        path_str(dir.path()),
    ]);
    assert_success(&output);
    assert!(dir
        .path()
        .join("kissingnumber_N4_D2_reformFalse_sym0.cip")
        .exists());
}

#[test]
fn test_instance_rejects_unknown_variant() {
    let dir = tempfile::tempdir().unwrap();

    let output = run(&[
        "instance",
        "elec",
        "-n",
        "3",
        "-d",
        "2",
        "--variant",
        "7",
        "--out-dir",
        path_str(dir.path()),
    ]);
    assert!(!output.status.success());
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn test_instance_rejects_single_point() {
    let dir = tempfile::tempdir().unwrap();

    let output = run(&[
        "instance",
        "elec",
        "-n",
        "1",
        "-d",
        "2",
        "--out-dir",
        path_str(dir.path()),
    ]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Error generating instance"));
}

#[test]
fn test_maxcut_generation() {
    let dir = tempfile::tempdir().unwrap();
    let graph = dir.path().join("triangle.col");
    fs::write(&graph, "c small graph\np edge 3 3\ne 1 2\ne 2 3\ne 3 1\n").unwrap();

    let output = run(&[
        "maxcut",
        path_str(&graph),
        "--out-dir",
        path_str(dir.path()),
        "--weighted",
        "--seed",
        "7",
    ]);
    assert_success(&output);

    let path = dir.path().join("maxcut_triangle.cip");
    let text = fs::read_to_string(&path).unwrap();
    assert!(text.starts_with("STATISTICS\n"));
    assert!(text.ends_with("END\n\n"));
}

#[test]
fn test_maxcut_wrong_filetype() {
    let dir = tempfile::tempdir().unwrap();
    let graph = dir.path().join("triangle.txt");
    fs::write(&graph, "e 1 2\n").unwrap();

    let output = run(&["maxcut", path_str(&graph), "--out-dir", path_str(dir.path())]);
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_batch_generation() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("instances");

    let output = run(&[
        "batch",
        "--out-dir",
        path_str(&out),
        "--min-points",
        "3",
        "--max-points",
        "4",
        "--min-dim",
        "2",
        "--max-dim",
        "2",
        "--variants",
        "0,5",
    ]);
    assert_success(&output);

    let mut names: Vec<String> = fs::read_dir(&out)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    // 3 problems x 2 point counts x 1 dimension x 2 variants
    assert_eq!(names.len(), 12);
    assert!(names.contains(&"elec_N4_D2_sym5.cip".to_string()));
    assert!(names.contains(&"kissingnumber_N3_D2_reformTrue_sym0.cip".to_string()));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Generated 12 instances"));
}
