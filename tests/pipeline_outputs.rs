use std::fs;
use std::path::Path;

use assert_cmd::Command;
use serde_json::Value;
use tempfile::TempDir;

fn run_sim(out: &Path, patients: &str, extra: &[&str]) {
    let mut cmd = Command::cargo_bin("cohortsim").unwrap();
    cmd.args([
        "run",
        "--out",
        out.to_str().unwrap(),
        "--patients",
        patients,
        "--seed",
        "7",
        "--json",
        "--tsv",
    ]);
    cmd.args(extra);
    cmd.assert().success();
}

#[test]
fn run_writes_tsv_with_exact_header() {
    let out = TempDir::new().unwrap();
    run_sim(out.path(), "12", &[]);

    let tsv = fs::read_to_string(out.path().join("cohortsim.tsv")).unwrap();
    let header = tsv.lines().next().unwrap();
    assert_eq!(header, "patient_id\ttreatment\tvisit\tpain\turgency\tfrequency");

    // 12 patients x 3 canonical visits, plus 2 diff rows per patient.
    assert_eq!(tsv.lines().count(), 1 + 12 * 3 + 12 * 2);
}

#[test]
fn run_report_carries_schema_and_counts() {
    let out = TempDir::new().unwrap();
    run_sim(out.path(), "12", &[]);

    let v: Value =
        serde_json::from_slice(&fs::read(out.path().join("cohortsim.json")).unwrap()).unwrap();
    assert_eq!(v["tool"], "cohortsim");
    assert_eq!(v["schema_version"], "v1");
    assert!(v["version"].is_string());
    assert_eq!(v["study"]["patients"], 12);
    assert_eq!(v["study"]["seed"], 7);
    assert_eq!(v["study"]["visits"].as_array().unwrap().len(), 3);
    assert_eq!(v["counts"]["rows_total"], 12 * 3 + 12 * 2);
    assert_eq!(v["counts"]["rows_derived"], 12 * 2);
    assert_eq!(v["counts"]["patients_excluded"], 0);
    assert_eq!(v["table_tsv_path"], "cohortsim.tsv");
    assert!(v["matching"].is_null());
}

#[test]
fn outputs_are_deterministic_for_a_seed() {
    let out1 = TempDir::new().unwrap();
    let out2 = TempDir::new().unwrap();
    run_sim(out1.path(), "12", &[]);
    run_sim(out2.path(), "12", &[]);

    for name in ["cohortsim.tsv", "cohortsim.json"] {
        let a = fs::read(out1.path().join(name)).unwrap();
        let b = fs::read(out2.path().join(name)).unwrap();
        assert_eq!(a, b, "mismatch in {}", name);
    }
}

#[test]
fn different_seeds_change_the_table() {
    let out1 = TempDir::new().unwrap();
    let out2 = TempDir::new().unwrap();
    run_sim(out1.path(), "12", &[]);

    let mut cmd = Command::cargo_bin("cohortsim").unwrap();
    cmd.args([
        "run",
        "--out",
        out2.path().to_str().unwrap(),
        "--patients",
        "12",
        "--seed",
        "8",
        "--tsv",
    ]);
    cmd.assert().success();

    let a = fs::read(out1.path().join("cohortsim.tsv")).unwrap();
    let b = fs::read(out2.path().join("cohortsim.tsv")).unwrap();
    assert_ne!(a, b);
}

#[test]
fn match_controls_populates_the_report() {
    let out = TempDir::new().unwrap();
    run_sim(out.path(), "30", &["--match-controls"]);

    let v: Value =
        serde_json::from_slice(&fs::read(out.path().join("cohortsim.json")).unwrap()).unwrap();
    let matching = &v["matching"];
    assert!(matching.is_object());
    let attempted = matching["attempted"].as_u64().unwrap();
    let matched = matching["matched"].as_u64().unwrap();
    let skipped = matching["skipped_no_pool"].as_u64().unwrap();
    assert_eq!(matched + skipped, attempted);
    assert_eq!(matching["pairs"].as_array().unwrap().len() as u64, matched);
}

#[test]
fn discrete_sampling_writes_integer_scores() {
    let out = TempDir::new().unwrap();
    run_sim(out.path(), "12", &["--sampling", "discrete"]);

    let tsv = fs::read_to_string(out.path().join("cohortsim.tsv")).unwrap();
    for line in tsv.lines().skip(1) {
        let fields: Vec<&str> = line.split('\t').collect();
        for field in &fields[3..] {
            let value: f64 = field.parse().unwrap();
            assert_eq!(value.fract(), 0.0, "non-integer score in {:?}", line);
        }
    }
}

#[test]
fn invalid_config_fails_the_run() {
    let out = TempDir::new().unwrap();
    let mut cmd = Command::cargo_bin("cohortsim").unwrap();
    cmd.args([
        "run",
        "--out",
        out.path().to_str().unwrap(),
        "--treated-ratio",
        "1.5",
    ]);
    cmd.assert().failure();
}
