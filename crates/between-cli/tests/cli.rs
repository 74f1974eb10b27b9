//! E2E CLI tests: each test writes graph files into a temp directory and
//! runs the `between` binary as a subprocess there.

use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use tempfile::TempDir;

// ---------------------------------------------------------------------------
// Test Harness
// ---------------------------------------------------------------------------

const SAMPLE_JSON: &str = r#"{
  "name": "sample",
  "vertices": [1, 2, 3, 4, 5, 6],
  "edges": [[1, 2], [1, 5], [2, 3], [2, 5], [3, 4], [3, 6], [4, 5], [4, 6]]
}"#;

const SAMPLE_TOML: &str = r#"
name = "sample"
vertices = [1, 2, 3, 4, 5, 6]
edges = [[1, 2], [1, 5], [2, 3], [2, 5], [3, 4], [3, 6], [4, 5], [4, 6]]
"#;

/// Build a Command targeting the between binary, rooted in `dir`.
fn between_cmd(dir: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("between"));
    cmd.current_dir(dir);
    cmd.env("BETWEEN_LOG", "error");
    cmd.env_remove("FORMAT");
    cmd.env_remove("BETWEEN_THREADS");
    cmd.env_remove("BETWEEN_TIMING");
    cmd
}

fn workspace() -> TempDir {
    let dir = TempDir::new().expect("tempdir");
    std::fs::write(dir.path().join("sample.json"), SAMPLE_JSON).expect("write json");
    std::fs::write(dir.path().join("sample.toml"), SAMPLE_TOML).expect("write toml");
    std::fs::write(
        dir.path().join("split.json"),
        r#"{"vertices": [1, 2, 3, 4], "edges": [[1, 2], [2, 3]]}"#,
    )
    .expect("write split");
    dir
}

fn run_json(dir: &Path, args: &[&str]) -> Value {
    let output = between_cmd(dir)
        .args(args)
        .arg("--json")
        .output()
        .expect("between should not crash");
    assert!(
        output.status.success(),
        "between {args:?} failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("--json should produce valid JSON")
}

// ---------------------------------------------------------------------------
// Paths
// ---------------------------------------------------------------------------

#[test]
fn distance_text_output() {
    let dir = workspace();
    between_cmd(dir.path())
        .args(["--format", "text", "distance", "sample.json", "1", "6"])
        .assert()
        .success()
        .stdout("4\n");
}

#[test]
fn distance_json_includes_path() {
    let dir = workspace();
    let json = run_json(dir.path(), &["distance", "sample.json", "1", "6"]);
    assert_eq!(json["distance"], 4);
    assert_eq!(json["hops"], 3);
    assert_eq!(json["path"], serde_json::json!([1, 2, 3, 6]));
}

#[test]
fn paths_text_lists_each_path() {
    let dir = workspace();
    between_cmd(dir.path())
        .args(["--format", "text", "paths", "sample.json", "1", "6"])
        .assert()
        .success()
        .stdout("1 2 3 6\n1 5 4 6\n");
}

#[test]
fn paths_from_toml_file() {
    let dir = workspace();
    let json = run_json(dir.path(), &["paths", "sample.toml", "1", "6"]);
    assert_eq!(json["count"], 2);
    assert_eq!(
        json["paths"],
        serde_json::json!([[1, 2, 3, 6], [1, 5, 4, 6]])
    );
}

// ---------------------------------------------------------------------------
// Centrality
// ---------------------------------------------------------------------------

#[test]
fn centrality_raw_and_normalized() {
    let dir = workspace();
    between_cmd(dir.path())
        .args(["--format", "text", "centrality", "sample.json", "2"])
        .assert()
        .success()
        .stdout("2\n");

    between_cmd(dir.path())
        .args(["--format", "text", "centrality", "sample.json", "2", "--normalized"])
        .assert()
        .success()
        .stdout("0.2\n");

    let json = run_json(dir.path(), &["centrality", "sample.json", "1"]);
    assert_eq!(json["vertex"], 1);
    assert_eq!(json["betweenness"], 0.0);
}

#[test]
fn top_returns_all_tied_vertices() {
    let dir = workspace();
    between_cmd(dir.path())
        .args(["--format", "text", "top", "sample.json"])
        .assert()
        .success()
        .stdout("2 3 4 5\n");

    let json = run_json(
        dir.path(),
        &["top", "sample.json", "--method", "brandes", "--tie-tolerance", "1e-9"],
    );
    assert_eq!(json["vertices"], serde_json::json!([2, 3, 4, 5]));
}

#[test]
fn scores_cover_every_vertex() {
    let dir = workspace();
    let json = run_json(dir.path(), &["scores", "sample.json", "--sequential"]);
    let rows = json.as_array().expect("array of scores");
    assert_eq!(rows.len(), 6);
    assert_eq!(rows[0]["vertex"], 1);
    assert_eq!(rows[1]["score"], 2.0);

    let sorted = run_json(dir.path(), &["scores", "sample.json", "--sort", "--limit", "1"]);
    assert_eq!(sorted.as_array().map(Vec::len), Some(1));
    assert_eq!(sorted[0]["vertex"], 2);
}

#[test]
fn stats_reports_fingerprint() {
    let dir = workspace();
    let json = run_json(dir.path(), &["stats", "sample.json"]);
    assert_eq!(json["name"], "sample");
    assert_eq!(json["vertex_count"], 6);
    assert_eq!(json["edge_count"], 8);
    assert_eq!(json["component_count"], 1);
    assert!(
        json["fingerprint"]
            .as_str()
            .is_some_and(|f| f.starts_with("blake3:"))
    );
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

#[test]
fn config_file_sets_disconnected_policy() {
    let dir = workspace();
    between_cmd(dir.path())
        .args(["--format", "text", "centrality", "split.json", "2"])
        .assert()
        .success()
        .stdout("1\n");

    std::fs::write(dir.path().join("between.toml"), "disconnected = \"fail\"\n")
        .expect("write config");
    between_cmd(dir.path())
        .args(["--format", "text", "centrality", "split.json", "2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("E2003"));

    // Flags win over the file.
    between_cmd(dir.path())
        .args([
            "--format",
            "text",
            "--disconnected",
            "skip",
            "centrality",
            "split.json",
            "2",
        ])
        .assert()
        .success();
}

#[test]
fn invalid_config_value_fails() {
    let dir = workspace();
    between_cmd(dir.path())
        .args(["--tie-tolerance=-1", "top", "sample.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("E4001"));
}

#[test]
fn timing_report_goes_to_stderr() {
    let dir = workspace();
    between_cmd(dir.path())
        .args(["--format", "text", "--timing", "top", "sample.json"])
        .assert()
        .success()
        .stdout("2 3 4 5\n")
        .stderr(predicate::str::contains("cmd.top"));
}

#[test]
fn timing_report_is_json_in_json_mode() {
    let dir = workspace();
    let output = between_cmd(dir.path())
        .args(["--json", "--timing", "centrality", "sample.json", "2"])
        .output()
        .expect("run");
    assert!(output.status.success());
    let report: Value = serde_json::from_slice(&output.stderr).expect("json timing report");
    let names: Vec<&str> = report["stages"]
        .as_array()
        .expect("stages")
        .iter()
        .filter_map(|s| s["name"].as_str())
        .collect();
    assert_eq!(names, ["load", "betweenness", "cmd.centrality"]);
}

#[test]
fn zero_deadline_stops_enumeration() {
    let dir = workspace();
    for extra in [&[][..], &["--sequential"][..]] {
        between_cmd(dir.path())
            .args(["--method", "enumerate", "--deadline-ms", "0"])
            .args(extra)
            .args(["centrality", "sample.json", "2"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("E3002"));
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[test]
fn no_path_is_reported_with_code() {
    let dir = workspace();
    let output = between_cmd(dir.path())
        .args(["--json", "distance", "split.json", "1", "4"])
        .output()
        .expect("run");
    assert!(!output.status.success());
    let err: Value = serde_json::from_slice(&output.stderr).expect("json error");
    assert_eq!(err["error"]["code"], "E2002");
}

#[test]
fn invalid_graph_is_rejected() {
    let dir = workspace();
    std::fs::write(
        dir.path().join("dup.json"),
        r#"{"vertices": [1, 1, 2], "edges": []}"#,
    )
    .expect("write");
    std::fs::write(
        dir.path().join("dangling.json"),
        r#"{"vertices": [1, 2], "edges": [[1, 3]]}"#,
    )
    .expect("write");

    between_cmd(dir.path())
        .args(["stats", "dup.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("E1001"));
    between_cmd(dir.path())
        .args(["stats", "dangling.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("E1002"));
}

#[test]
fn unknown_vertex_and_missing_file() {
    let dir = workspace();
    between_cmd(dir.path())
        .args(["centrality", "sample.json", "42"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("vertex 42 is not in the graph"));
    between_cmd(dir.path())
        .args(["stats", "missing.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing.json"));
}

#[test]
fn graph_from_stdin() {
    let dir = workspace();
    between_cmd(dir.path())
        .args(["--format", "text", "distance", "-", "1", "6"])
        .write_stdin(SAMPLE_JSON)
        .assert()
        .success()
        .stdout("4\n");
}
