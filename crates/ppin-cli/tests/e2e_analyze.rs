//! E2E tests for `ppin analyze` and `ppin fetch`.
//!
//! Covers: JSON/text/pretty rendering of saved STRING and BioGRID
//! responses, the `--edges` interaction table, stdin input, config
//! overrides, and structured errors for schema, empty, degenerate,
//! non-converging and malformed input. No test touches the network.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::{Value, json};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

// ---------------------------------------------------------------------------
// Test harness helpers
// ---------------------------------------------------------------------------

/// Krackhardt kite: consensus top-5 is DIANE, FERNANDO, GARTH.
const KITE: &[(&str, &str)] = &[
    ("andre", "beverly"),
    ("andre", "carol"),
    ("andre", "diane"),
    ("andre", "fernando"),
    ("beverly", "diane"),
    ("beverly", "ed"),
    ("beverly", "garth"),
    ("carol", "diane"),
    ("carol", "fernando"),
    ("diane", "ed"),
    ("diane", "fernando"),
    ("diane", "garth"),
    ("ed", "garth"),
    ("fernando", "garth"),
    ("fernando", "heather"),
    ("garth", "heather"),
    ("heather", "ike"),
    ("ike", "jane"),
];

fn ppin_cmd(dir: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("ppin"));
    cmd.current_dir(dir);
    cmd.env("PPIN_LOG", "error");
    cmd.env("HOME", dir);
    cmd.env("XDG_CONFIG_HOME", dir.join(".config"));
    cmd.env_remove("FORMAT");
    cmd.env_remove("BIOGRID_ACCESS_KEY");
    cmd
}

fn string_body(pairs: &[(&str, &str)]) -> String {
    let rows: Vec<Value> = pairs
        .iter()
        .map(|(a, b)| {
            json!({
                "stringId_A": format!("9606.{a}"),
                "stringId_B": format!("9606.{b}"),
                "preferredName_A": a,
                "preferredName_B": b,
                "ncbiTaxonId": 9606,
                "score": 0.9
            })
        })
        .collect();
    Value::Array(rows).to_string()
}

fn biogrid_body(pairs: &[(&str, &str)]) -> String {
    let mut map = serde_json::Map::new();
    for (i, (a, b)) in pairs.iter().enumerate() {
        map.insert(
            (100_000 + i).to_string(),
            json!({
                "BIOGRID_INTERACTION_ID": 100_000 + i,
                "OFFICIAL_SYMBOL_A": a,
                "OFFICIAL_SYMBOL_B": b,
                "EXPERIMENTAL_SYSTEM": "Affinity Capture-MS",
                "ORGANISM_A": 9606,
                "ORGANISM_B": 9606
            }),
        );
    }
    Value::Object(map).to_string()
}

fn write_fixture(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, body).expect("write fixture");
    path
}

fn analyze_json(dir: &Path, args: &[&str]) -> Value {
    let output = ppin_cmd(dir)
        .arg("analyze")
        .args(args)
        .arg("--json")
        .output()
        .expect("analyze should not crash");
    assert!(
        output.status.success(),
        "analyze failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("valid JSON from analyze")
}

fn common(report: &Value) -> Vec<&str> {
    report["common"]
        .as_array()
        .expect("common must be an array")
        .iter()
        .filter_map(Value::as_str)
        .collect()
}

// ---------------------------------------------------------------------------
// Successful analysis
// ---------------------------------------------------------------------------

#[test]
fn string_kite_json_report() {
    let dir = TempDir::new().unwrap();
    let input = write_fixture(dir.path(), "kite.json", &string_body(KITE));

    let report = analyze_json(
        dir.path(),
        &["--provider", "string", "--input", input.to_str().unwrap()],
    );

    assert_eq!(report["provider"], "string");
    assert_eq!(report["network"]["node_count"], 10);
    assert_eq!(report["network"]["edge_count"], 18);
    assert_eq!(report["network"]["component_count"], 1);
    assert_eq!(report["top_k"], 5);
    assert_eq!(common(&report), ["DIANE", "FERNANDO", "GARTH"]);

    let measures = report["measures"].as_array().expect("measures array");
    assert_eq!(measures.len(), 5);
    for m in measures {
        assert_eq!(m["top"].as_array().map(Vec::len), Some(5), "{}", m["measure"]);
    }
    assert_eq!(measures[1]["measure"], "betweenness");
    assert_eq!(measures[1]["top"][0]["node"], "HEATHER");
}

#[test]
fn biogrid_object_body_text_output() {
    let dir = TempDir::new().unwrap();
    let pairs = [("tp53", "mdm2"), ("TP53", "ep300"), ("tp53", "ATM"), ("MDM2", "tp53")];
    let input = write_fixture(dir.path(), "tp53.json", &biogrid_body(&pairs));

    ppin_cmd(dir.path())
        .args(["analyze", "-p", "biogrid", "-i", input.to_str().unwrap()])
        .args(["--format", "text"])
        .assert()
        .success()
        .stdout(predicate::str::contains("provider\tBioGRID\n"))
        .stdout(predicate::str::contains("nodes\t4\n"))
        .stdout(predicate::str::contains("edges\t3\n"))
        .stdout(predicate::str::contains("rank\tdegree\t1\tTP53\t1.0000\n"))
        .stdout(predicate::str::contains("common\tTP53\n"));
}

#[test]
fn pretty_output_reports_missing_consensus() {
    let dir = TempDir::new().unwrap();
    let input = write_fixture(dir.path(), "kite.json", &string_body(KITE));

    // Top-1: degree picks DIANE, betweenness picks HEATHER.
    ppin_cmd(dir.path())
        .args(["analyze", "-p", "string", "-i", input.to_str().unwrap(), "-k", "1"])
        .args(["--format", "pretty"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Degree Centrality"))
        .stdout(predicate::str::contains("  1. DIANE"))
        .stdout(predicate::str::contains("  1. HEATHER"))
        .stdout(predicate::str::contains("No Common Top Nodes"));
}

#[test]
fn edges_flag_lists_interactions_in_response_order() {
    let dir = TempDir::new().unwrap();
    let pairs = [("tp53", "mdm2"), ("ATM", "tp53"), ("MDM2", "tp53")];
    let input = write_fixture(dir.path(), "tp53.json", &biogrid_body(&pairs));

    let report = analyze_json(
        dir.path(),
        &["-p", "biogrid", "-i", input.to_str().unwrap(), "--edges"],
    );
    assert_eq!(
        report["interactions"],
        json!([
            {"a": "TP53", "b": "MDM2"},
            {"a": "ATM", "b": "TP53"},
            {"a": "MDM2", "b": "TP53"}
        ])
    );
    assert_eq!(report["network"]["edge_count"], 2);

    ppin_cmd(dir.path())
        .args(["analyze", "-p", "biogrid", "-i", input.to_str().unwrap(), "--edges"])
        .args(["--format", "text"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "edge\tTP53\tMDM2\nedge\tATM\tTP53\nedge\tMDM2\tTP53\nnodes\t3\n",
        ));

    ppin_cmd(dir.path())
        .args(["analyze", "-p", "biogrid", "-i", input.to_str().unwrap(), "--edges"])
        .args(["--format", "pretty"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Interactions\n"));
}

#[test]
fn interactions_omitted_without_edges_flag() {
    let dir = TempDir::new().unwrap();
    let input = write_fixture(dir.path(), "kite.json", &string_body(KITE));

    let report = analyze_json(dir.path(), &["-p", "string", "-i", input.to_str().unwrap()]);
    assert!(report.get("interactions").is_none());
}

#[test]
fn stdin_input() {
    let dir = TempDir::new().unwrap();

    let output = ppin_cmd(dir.path())
        .args(["analyze", "-p", "string", "-i", "-", "--json"])
        .write_stdin(string_body(&[("A", "B"), ("B", "C")]))
        .output()
        .expect("analyze should not crash");
    assert!(output.status.success());

    let report: Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    assert_eq!(common(&report), ["A", "B", "C"]);
    assert_eq!(report["measures"][1]["top"][0]["node"], "B");
}

#[test]
fn config_file_sets_top_k() {
    let dir = TempDir::new().unwrap();
    let input = write_fixture(dir.path(), "kite.json", &string_body(KITE));
    write_fixture(dir.path(), "ppin.toml", "output = \"json\"\n\n[analysis]\ntop_k = 2\n");

    let output = ppin_cmd(dir.path())
        .args(["analyze", "-p", "string", "-i", input.to_str().unwrap()])
        .output()
        .expect("analyze should not crash");
    assert!(output.status.success());

    let report: Value = serde_json::from_slice(&output.stdout).expect("config selects JSON");
    assert_eq!(report["top_k"], 2);
    for m in report["measures"].as_array().expect("measures") {
        assert_eq!(m["top"].as_array().map(Vec::len), Some(2));
    }
}

#[test]
fn top_flag_overrides_config() {
    let dir = TempDir::new().unwrap();
    let input = write_fixture(dir.path(), "kite.json", &string_body(KITE));
    let config = write_fixture(dir.path(), "custom.toml", "[analysis]\ntop_k = 2\n");

    let report = analyze_json(
        dir.path(),
        &[
            "-p",
            "string",
            "-i",
            input.to_str().unwrap(),
            "--config",
            config.to_str().unwrap(),
            "--top",
            "3",
        ],
    );
    assert_eq!(report["top_k"], 3);
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[test]
fn wrong_provider_is_schema_mismatch() {
    let dir = TempDir::new().unwrap();
    let input = write_fixture(dir.path(), "kite.json", &string_body(KITE));

    let output = ppin_cmd(dir.path())
        .args(["analyze", "-p", "biogrid", "-i", input.to_str().unwrap(), "--json"])
        .output()
        .expect("analyze should not crash");
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());

    let err: Value = serde_json::from_slice(&output.stderr).expect("JSON error on stderr");
    assert_eq!(err["error"]["error_code"], "E1001");
    assert!(
        err["error"]["suggestion"]
            .as_str()
            .is_some_and(|s| s.contains("OFFICIAL_SYMBOL_A"))
    );
}

#[test]
fn empty_response_is_empty_graph() {
    let dir = TempDir::new().unwrap();
    let input = write_fixture(dir.path(), "empty.json", "[]");

    ppin_cmd(dir.path())
        .args(["analyze", "-p", "string", "-i", input.to_str().unwrap()])
        .args(["--format", "text"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("error: no interactions"))
        .stderr(predicate::str::contains("suggestion:"));
}

#[test]
fn lone_self_loop_is_degenerate_graph() {
    let dir = TempDir::new().unwrap();
    let input = write_fixture(dir.path(), "loop.json", &string_body(&[("tp53", "TP53")]));

    let output = ppin_cmd(dir.path())
        .args(["analyze", "-p", "string", "-i", input.to_str().unwrap(), "--json"])
        .output()
        .expect("analyze should not crash");
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());

    let err: Value = serde_json::from_slice(&output.stderr).expect("JSON error on stderr");
    assert_eq!(err["error"]["error_code"], "E2002");
}

#[test]
fn iteration_cap_is_convergence_failure() {
    let dir = TempDir::new().unwrap();
    let input = write_fixture(dir.path(), "kite.json", &string_body(KITE));
    let config = write_fixture(
        dir.path(),
        "tight.toml",
        "[analysis.eigenvector]\nmax_iter = 1\n",
    );

    let output = ppin_cmd(dir.path())
        .args(["analyze", "-p", "string", "-i", input.to_str().unwrap()])
        .args(["--config", config.to_str().unwrap(), "--json"])
        .output()
        .expect("analyze should not crash");
    assert_eq!(output.status.code(), Some(1));

    let err: Value = serde_json::from_slice(&output.stderr).expect("JSON error on stderr");
    assert_eq!(err["error"]["error_code"], "E3001");
    assert!(
        err["error"]["message"]
            .as_str()
            .is_some_and(|m| m.contains("did not converge within 1 iterations"))
    );
}

#[test]
fn malformed_response_is_reported() {
    let dir = TempDir::new().unwrap();
    let input = write_fixture(dir.path(), "bad.json", "\"Invalid access key\"");

    let output = ppin_cmd(dir.path())
        .args(["analyze", "-p", "biogrid", "-i", input.to_str().unwrap(), "--json"])
        .output()
        .expect("analyze should not crash");
    assert_eq!(output.status.code(), Some(1));

    let err: Value = serde_json::from_slice(&output.stderr).expect("JSON error on stderr");
    assert_eq!(err["error"]["error_code"], "E1002");
}

#[test]
fn missing_input_file_fails() {
    let dir = TempDir::new().unwrap();

    ppin_cmd(dir.path())
        .args(["analyze", "-p", "string", "-i", "nope.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("nope.json"));
}

#[test]
fn explicit_missing_config_fails() {
    let dir = TempDir::new().unwrap();
    let input = write_fixture(dir.path(), "kite.json", &string_body(KITE));

    ppin_cmd(dir.path())
        .args(["analyze", "-p", "string", "-i", input.to_str().unwrap()])
        .args(["--config", "absent.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("absent.toml"));
}

#[test]
fn config_errors_follow_json_mode() {
    let dir = TempDir::new().unwrap();
    let input = write_fixture(dir.path(), "kite.json", &string_body(KITE));
    let config = write_fixture(dir.path(), "broken.toml", "[analysis\ntop_k = ");

    let output = ppin_cmd(dir.path())
        .args(["analyze", "-p", "string", "-i", input.to_str().unwrap()])
        .args(["--config", config.to_str().unwrap(), "--json"])
        .output()
        .expect("analyze should not crash");
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());

    let err: Value = serde_json::from_slice(&output.stderr).expect("JSON error on stderr");
    assert!(
        err["error"]["message"]
            .as_str()
            .is_some_and(|m| m.contains("broken.toml"))
    );
}

#[test]
fn fetch_biogrid_without_key_fails_offline() {
    let dir = TempDir::new().unwrap();

    ppin_cmd(dir.path())
        .args(["fetch", "-p", "biogrid", "--protein", "TP53"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("BIOGRID_ACCESS_KEY"));
}
