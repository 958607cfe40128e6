//! Integration tests for the gamerec CLI
//!
//! These tests run the gamerec binary against temporary stores.

mod support;

use predicates::prelude::*;
use std::fs;
use support::{gamerec, setup_built_store, setup_test_dir, write_catalog};
use tempfile::tempdir;

// ============================================================================
// Help, version and global flags
// ============================================================================

#[test]
fn test_help_flag() {
    gamerec()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("recommend"))
        .stdout(predicate::str::contains("similarity"));
}

#[test]
fn test_version_flag() {
    gamerec()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("gamerec"));
}

#[test]
fn test_no_command_prints_banner() {
    gamerec()
        .assert()
        .success()
        .stdout(predicate::str::contains("gamerec --help"));
}

#[test]
fn test_invalid_format_is_usage_error() {
    gamerec()
        .args(["--format", "xml", "stages"])
        .assert()
        .code(2);
}

#[test]
fn test_invalid_metric_is_usage_error_with_json_envelope() {
    let dir = setup_test_dir();
    gamerec()
        .current_dir(dir.path())
        .args(["--format", "json", "recommend", "Tetris", "--metric", "euclidean"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("\"usage_error\""));
}

// ============================================================================
// Store lifecycle
// ============================================================================

#[test]
fn test_init_creates_store() {
    let dir = tempdir().unwrap();

    gamerec()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized gamerec store"));

    assert!(dir.path().join(".gamerec/config.toml").is_file());
    assert!(dir.path().join(".gamerec/gamerec.db").is_file());
}

#[test]
fn test_init_is_idempotent() {
    let dir = setup_test_dir();
    gamerec()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success();
}

#[test]
fn test_init_with_explicit_store() {
    let dir = tempdir().unwrap();

    gamerec()
        .current_dir(dir.path())
        .args(["--store", "data/recs", "init"])
        .assert()
        .success();
    assert!(dir.path().join("data/recs/config.toml").is_file());

    gamerec()
        .current_dir(dir.path())
        .args(["--store", "data/recs", "stages"])
        .assert()
        .success();
}

#[test]
fn test_missing_store_is_data_error() {
    let dir = tempdir().unwrap();
    gamerec()
        .current_dir(dir.path())
        .arg("stages")
        .assert()
        .code(3)
        .stderr(predicate::str::contains("store not found"));
}

#[test]
fn test_root_flag_discovers_store() {
    let dir = setup_built_store();
    let elsewhere = tempdir().unwrap();

    gamerec()
        .current_dir(elsewhere.path())
        .arg("--root")
        .arg(dir.path())
        .args(["recommend", "Tetris", "-k", "1", "-q"])
        .assert()
        .success()
        .stdout("Portal 2\n");
}

// ============================================================================
// Pipeline stages
// ============================================================================

#[test]
fn test_stage_before_input_is_data_error() {
    let dir = setup_test_dir();
    gamerec()
        .current_dir(dir.path())
        .arg("discretize")
        .assert()
        .code(3)
        .stderr(predicate::str::contains("gamerec import"));
}

#[test]
fn test_import_missing_catalog_is_usage_error() {
    let dir = setup_test_dir();
    gamerec()
        .current_dir(dir.path())
        .args(["import", "missing.csv"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("catalog file not found"));
}

#[test]
fn test_step_by_step_pipeline() {
    let dir = setup_test_dir();
    let catalog = write_catalog(&dir);

    gamerec()
        .current_dir(dir.path())
        .arg("import")
        .arg(&catalog)
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported 6 rows"));

    gamerec()
        .current_dir(dir.path())
        .arg("discretize")
        .assert()
        .success()
        .stdout(predicate::str::contains("Discretized 6 items"));

    gamerec()
        .current_dir(dir.path())
        .arg("combine")
        .assert()
        .success()
        .stdout(predicate::str::contains("Combined 5 items (1 without"));

    gamerec()
        .current_dir(dir.path())
        .args(["similarity", "--metric", "jaccard"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Computed jaccard similarity for 5 items"));

    gamerec()
        .current_dir(dir.path())
        .args(["recommend", "Skyrim", "--metric", "jaccard", "-q"])
        .assert()
        .success()
        .stdout("Witcher 3\nFallout 4\nPortal 2\n");

    // only the jaccard matrix exists
    gamerec()
        .current_dir(dir.path())
        .args(["recommend", "Skyrim", "--metric", "cosine"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("cosine similarity"));
}

#[test]
fn test_stages_lists_built_tables() {
    let dir = setup_built_store();

    let output = gamerec()
        .current_dir(dir.path())
        .args(["--format", "json", "stages"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let stages = json.as_array().unwrap();
    let names: Vec<&str> = stages
        .iter()
        .map(|s| s["stage"].as_str().unwrap())
        .collect();
    assert_eq!(
        names,
        vec![
            "raw",
            "discretized",
            "preprocessed",
            "cosine similarity",
            "jaccard similarity"
        ]
    );
    assert_eq!(stages[2]["rows"], 5);
}

#[test]
fn test_build_json_report() {
    let dir = setup_test_dir();
    let catalog = write_catalog(&dir);

    let output = gamerec()
        .current_dir(dir.path())
        .args(["--format", "json", "build"])
        .arg(&catalog)
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["import"]["rows"], 6);
    assert_eq!(json["combine"]["dropped"], 1);
    assert_eq!(json["similarity"].as_array().unwrap().len(), 2);
}

// ============================================================================
// Recommendations
// ============================================================================

#[test]
fn test_recommend_default_top_three() {
    let dir = setup_built_store();

    // Witcher 3 and Fallout 4 tie; the earlier catalog row ranks first
    gamerec()
        .current_dir(dir.path())
        .args(["recommend", "Skyrim"])
        .assert()
        .success()
        .stdout("Witcher 3 (0.750)\nFallout 4 (0.750)\nPortal 2 (0.289)\n");
}

#[test]
fn test_recommend_query_is_cleaned() {
    let dir = setup_built_store();

    gamerec()
        .current_dir(dir.path())
        .args(["recommend", "Skyrim\u{2122}", "-k", "1", "-q"])
        .assert()
        .success()
        .stdout("Witcher 3\n");
}

#[test]
fn test_recommend_k_larger_than_catalog() {
    let dir = setup_built_store();

    let output = gamerec()
        .current_dir(dir.path())
        .args(["recommend", "Portal 2", "-k", "50", "-q"])
        .output()
        .unwrap();
    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();

    assert_eq!(lines.len(), 4);
    assert_eq!(lines[0], "Tetris");
    assert!(!lines.contains(&"Portal 2"));
}

#[test]
fn test_recommend_unknown_prints_none() {
    let dir = setup_built_store();

    gamerec()
        .current_dir(dir.path())
        .args(["recommend", "Half-Life 3"])
        .assert()
        .code(3)
        .stdout("None\n")
        .stderr(predicate::str::contains("item not found: Half-Life 3"));
}

#[test]
fn test_recommend_dropped_item_is_unknown() {
    let dir = setup_built_store();

    gamerec()
        .current_dir(dir.path())
        .args(["recommend", "Untagged"])
        .assert()
        .code(3)
        .stdout("None\n");
}

#[test]
fn test_recommend_unknown_json_envelope() {
    let dir = setup_built_store();

    let output = gamerec()
        .current_dir(dir.path())
        .args(["--format", "json", "recommend", "Half-Life 3"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(3));

    let json: serde_json::Value = serde_json::from_slice(&output.stderr).unwrap();
    assert_eq!(json["error"]["type"], "unknown_item");
    assert_eq!(json["error"]["code"], 3);
}

#[test]
fn test_recommend_json() {
    let dir = setup_built_store();

    let output = gamerec()
        .current_dir(dir.path())
        .args(["--format", "json", "recommend", "Portal 2", "-k", "2"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["metric"], "cosine");
    let recs = json["recommendations"].as_array().unwrap();
    assert_eq!(recs.len(), 2);
    assert_eq!(recs[0]["id"], "Tetris");
    assert_eq!(recs[1]["id"], "Skyrim");
}

#[test]
fn test_recommend_records() {
    let dir = setup_built_store();

    gamerec()
        .current_dir(dir.path())
        .args(["--format", "records", "recommend", "Skyrim", "-k", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("H gamerec=1 command=recommend"))
        .stdout(predicate::str::contains("query=\"Skyrim\" metric=cosine k=2"))
        .stdout(predicate::str::contains("R 1 0.750000 \"Witcher 3\""))
        .stdout(predicate::str::contains("R 2 0.750000 \"Fallout 4\""));
}

#[test]
fn test_recommend_uses_configured_defaults() {
    let dir = setup_built_store();
    fs::write(
        dir.path().join(".gamerec/config.toml"),
        "[recommend]\ndefault_count = 1\n[similarity]\ndefault_metric = \"jaccard\"\n",
    )
    .unwrap();

    gamerec()
        .current_dir(dir.path())
        .args(["--format", "json", "recommend", "Tetris"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"metric\": \"jaccard\""))
        .stdout(predicate::str::contains("\"count\": 1"));
}

// ============================================================================
// Export
// ============================================================================

#[test]
fn test_export_preprocessed_csv() {
    let dir = setup_built_store();
    let out = dir.path().join("preprocessed.csv");

    gamerec()
        .current_dir(dir.path())
        .arg("export")
        .arg("preprocessed")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 5 preprocessed rows"));

    let text = fs::read_to_string(&out).unwrap();
    let mut lines = text.lines();
    let header = lines.next().unwrap();
    assert!(header.starts_with("Title,Genre1,Genre2,Genre3,Tag1"));
    assert!(header.ends_with("PosPercentDiscrete,TotalReviewsDiscrete,CombinedData"));
    assert!(text.contains("rpg openworld fantasy singleplayer"));
    assert!(!text.contains("Untagged"));
}

#[test]
fn test_export_discretized_keeps_attributeless_rows() {
    let dir = setup_built_store();
    let out = dir.path().join("discretized.csv");

    gamerec()
        .current_dir(dir.path())
        .arg("export")
        .arg("discretized")
        .arg(&out)
        .assert()
        .success();

    let text = fs::read_to_string(&out).unwrap();
    assert_eq!(text.lines().count(), 7);
    assert!(text.contains("Untagged"));
}

#[test]
fn test_export_missing_stage_creates_no_file() {
    let dir = setup_test_dir();
    let out = dir.path().join("out.csv");

    gamerec()
        .current_dir(dir.path())
        .arg("export")
        .arg("preprocessed")
        .arg(&out)
        .assert()
        .code(3);
    assert!(!out.exists());
}
