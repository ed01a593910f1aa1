//! End-to-end CLI integration tests
//!
//! These tests invoke the compiled binary as a subprocess to verify
//! that the CLI behaves correctly from a user's perspective.

use assert_cmd::Command;
use predicates::prelude::*;

/// Returns a Command configured to run our binary.
///
/// Note: `cargo_bin` is marked deprecated for edge cases involving custom
/// cargo build directories, but works correctly for standard project layouts.
#[allow(deprecated)]
fn cmd() -> Command {
    Command::cargo_bin(env!("CARGO_PKG_NAME")).unwrap()
}

// =============================================================================
// Help & Version
// =============================================================================

#[test]
fn help_flag_shows_usage() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("Commands:"))
        .stdout(predicate::str::contains("Options:"));
}

#[test]
fn short_help_flag_shows_usage() {
    cmd()
        .arg("-h")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"));
}

#[test]
fn version_flag_shows_version() {
    cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn short_version_flag_shows_version() {
    cmd()
        .arg("-V")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn version_only_prints_bare_version() {
    cmd()
        .arg("--version-only")
        .assert()
        .success()
        .stdout(predicate::str::diff(format!(
            "{}\n",
            env!("CARGO_PKG_VERSION")
        )));
}

// =============================================================================
// Info Command
// =============================================================================

#[test]
fn info_shows_package_name_and_version() {
    cmd()
        .arg("info")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_NAME")))
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn info_json_outputs_valid_json() {
    let output = cmd().arg("info").arg("--json").assert().success();

    let stdout = String::from_utf8_lossy(&output.get_output().stdout);
    let json: serde_json::Value =
        serde_json::from_str(&stdout).expect("info --json should output valid JSON");

    assert_eq!(json["name"], env!("CARGO_PKG_NAME"));
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
}

#[test]
fn info_json_contains_expected_fields() {
    cmd()
        .arg("info")
        .arg("--json")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"name\""))
        .stdout(predicate::str::contains("\"version\""));
}

#[test]
fn info_help_shows_command_options() {
    cmd()
        .args(["info", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--json"));
}

// =============================================================================
// Global Flags
// =============================================================================

#[test]
fn quiet_flag_accepted() {
    cmd().args(["--quiet", "info"]).assert().success();
}

#[test]
fn short_quiet_flag_accepted() {
    cmd().args(["-q", "info"]).assert().success();
}

#[test]
fn verbose_flag_accepted() {
    cmd().args(["--verbose", "info"]).assert().success();
}

#[test]
fn short_verbose_flag_accepted() {
    cmd().args(["-v", "info"]).assert().success();
}

#[test]
fn multiple_verbose_flags_accepted() {
    cmd().args(["-vv", "info"]).assert().success();
}

#[test]
fn color_auto_accepted() {
    cmd().args(["--color", "auto", "info"]).assert().success();
}

#[test]
fn color_always_accepted() {
    cmd().args(["--color", "always", "info"]).assert().success();
}

#[test]
fn color_never_accepted() {
    cmd().args(["--color", "never", "info"]).assert().success();
}

// =============================================================================
// Test Helpers
// =============================================================================

const STATEMENT: &str = "The no parking sign was hidden behind an overgrown tree. \
I checked the meter and it was broken, so I could not pay.";

const SHOUTING_DRAFT: &str = "THIS TICKET IS WRONG AND UNFAIR!!!! \
I WAS NOT EVEN PARKED THERE!!!! Fix it now!!!";

/// Write `content` to a temp file and return its handle.
fn draft(content: &str) -> tempfile::NamedTempFile {
    let tmp = tempfile::NamedTempFile::new().unwrap();
    std::fs::write(tmp.path(), content).unwrap();
    tmp
}

/// Run a command and parse its stdout as JSON.
fn json_output(args: &[&str]) -> serde_json::Value {
    let output = cmd().args(args).output().expect("failed to run command");
    assert!(
        output.status.success(),
        "command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("invalid JSON output")
}

// =============================================================================
// Analyze Command
// =============================================================================

#[test]
fn analyze_reports_probability_and_issues() {
    let tmp = draft(STATEMENT);
    cmd()
        .args([
            "analyze",
            tmp.path().to_str().unwrap(),
            "--violation",
            "parking",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Success probability"))
        .stdout(predicate::str::contains("Issues:"));
}

#[test]
fn analyze_json_lists_detected_categories() {
    let tmp = draft(STATEMENT);
    let json = json_output(&[
        "analyze",
        tmp.path().to_str().unwrap(),
        "--violation",
        "parking",
        "--json",
    ]);

    assert_eq!(json["violation_type"], "parking");
    let issues = json["issues"].as_array().unwrap();
    assert!(issues.iter().any(|i| i["category"] == "unclear_signage"));
    let probability = json["probability"].as_f64().unwrap();
    assert!(probability > 25.0 && probability <= 95.0);
}

#[test]
fn analyze_empty_statement_has_no_probability() {
    let tmp = draft("");
    let json = json_output(&["analyze", tmp.path().to_str().unwrap(), "--json"]);

    assert!(json["issues"].as_array().unwrap().is_empty());
    assert!(json["probability"].is_null());
}

#[test]
fn analyze_json_carries_advice_rule_ids() {
    let tmp = draft("I was there.");
    let json = json_output(&["analyze", tmp.path().to_str().unwrap(), "--json"]);

    assert_eq!(json["recommendation"]["rule"], "describe_more");
    assert_eq!(json["weaknesses"][0]["rule"], "no_grounds");
}

#[test]
fn analyze_spanish_locale_localizes_advice() {
    let tmp = draft("I was there.");
    cmd()
        .args(["--locale", "es", "analyze", tmp.path().to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("No se encontraron puntos impugnables"))
        .stdout(predicate::str::contains("La declaración no menciona"))
        .stdout(predicate::str::contains("No contestable issues").not());
}

#[test]
fn analyze_unknown_violation_type_falls_back_with_note() {
    let tmp = draft(STATEMENT);
    cmd()
        .args([
            "analyze",
            tmp.path().to_str().unwrap(),
            "--violation",
            "jaywalking",
        ])
        .assert()
        .success()
        .stderr(predicate::str::contains("note:"));
}

#[test]
fn analyze_min_probability_gate_fails() {
    let tmp = draft("I was parked there.");
    cmd()
        .args([
            "analyze",
            tmp.path().to_str().unwrap(),
            "--min-probability",
            "90",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("below minimum"));
}

#[test]
fn analyze_missing_file_fails() {
    cmd()
        .args(["analyze", "/nonexistent/statement.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read"));
}

// =============================================================================
// Predict Command
// =============================================================================

#[test]
fn predict_parking_with_signage() {
    let json = json_output(&[
        "predict",
        "--violation",
        "parking",
        "--factor",
        "signage",
        "--json",
    ]);

    assert!((json["probability"].as_f64().unwrap() - 0.9).abs() < 1e-9);
    assert_eq!(json["tier"], "high");
    assert_eq!(json["selections"]["evidence"], "none");
}

#[test]
fn predict_is_clamped_at_upper_bound() {
    let json = json_output(&[
        "predict",
        "--violation",
        "parking",
        "--factor",
        "signage,permit_displayed,meter_broken",
        "--dimension",
        "evidence=strong",
        "--json",
    ]);

    assert!((json["probability"].as_f64().unwrap() - 0.95).abs() < 1e-9);
}

#[test]
fn predict_spanish_locale_localizes_recommendation() {
    cmd()
        .args([
            "--locale",
            "es",
            "predict",
            "--violation",
            "parking",
            "--factor",
            "signage",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Probable éxito"));
}

#[test]
fn predict_text_output_shows_base_rate() {
    cmd()
        .args(["predict", "--violation", "parking", "--factor", "signage"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Base rate:"))
        .stdout(predicate::str::contains("Recommendation:"));
}

#[test]
fn predict_unknown_factor_is_noted() {
    cmd()
        .args(["predict", "--violation", "parking", "--factor", "moon_phase"])
        .assert()
        .success()
        .stderr(predicate::str::contains("note:"));
}

#[test]
fn predict_malformed_dimension_fails() {
    cmd()
        .args(["predict", "--dimension", "evidence"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("ID=VALUE"));
}

// =============================================================================
// Score Command
// =============================================================================

#[test]
fn score_shouting_draft_loses_professionalism() {
    let tmp = draft(SHOUTING_DRAFT);
    let json = json_output(&["score", tmp.path().to_str().unwrap(), "--json"]);

    assert_eq!(json["appeal_type"], "comprehensive");
    let metrics = &json["metrics"];
    assert!(metrics["professionalism"].as_f64().unwrap() < 3.0);
    assert!(metrics["signals"]["shouting"].as_bool().unwrap());
    let suggestions = metrics["suggestions"].as_array().unwrap();
    assert!(suggestions.len() <= 3);
    assert!(suggestions.iter().any(|s| s["rule"] == "avoid_capitals"));
}

#[test]
fn score_spanish_locale_localizes_suggestions() {
    let tmp = draft(SHOUTING_DRAFT);
    cmd()
        .args(["--locale", "es", "score", tmp.path().to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Evite escribir en mayúsculas"));
}

#[test]
fn score_min_gate_fails_for_weak_draft() {
    let tmp = draft(SHOUTING_DRAFT);
    cmd()
        .args(["score", tmp.path().to_str().unwrap(), "--min", "4.5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("min: 4.5"));
}

#[test]
fn score_empty_draft_without_gate_succeeds() {
    let tmp = draft("   \n");
    cmd()
        .args(["score", tmp.path().to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("empty draft"));
}

#[test]
fn score_empty_draft_with_gate_fails() {
    let tmp = draft("");
    cmd()
        .args(["score", tmp.path().to_str().unwrap(), "--min", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("nothing to score"));
}

#[test]
fn score_text_output_lists_sub_scores() {
    let tmp = draft(STATEMENT);
    cmd()
        .args([
            "score",
            tmp.path().to_str().unwrap(),
            "--appeal-type",
            "factual",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Overall:"))
        .stdout(predicate::str::contains("Professionalism:"));
}

// =============================================================================
// Diff Command
// =============================================================================

#[test]
fn diff_json_reports_runs_and_stats() {
    let original = draft("the sign was hidden");
    let modified = draft("the sign was clearly hidden");
    let json = json_output(&[
        "diff",
        original.path().to_str().unwrap(),
        modified.path().to_str().unwrap(),
        "--json",
    ]);

    assert_eq!(json["stats"]["unchanged"], 4);
    assert_eq!(json["stats"]["added"], 1);
    assert_eq!(json["stats"]["removed"], 0);
    let runs = json["runs"].as_array().unwrap();
    assert!(
        runs.iter()
            .any(|r| r["kind"] == "added" && r["text"] == "clearly")
    );
}

#[test]
fn diff_text_marks_changes() {
    let original = draft("the meter was working");
    let modified = draft("the meter was broken");
    cmd()
        .args([
            "--color",
            "never",
            "diff",
            original.path().to_str().unwrap(),
            modified.path().to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("[-working-]"))
        .stdout(predicate::str::contains("{+broken+}"));
}

#[test]
fn diff_stats_flag_prints_counts() {
    let original = draft("a b c");
    let modified = draft("a b c");
    cmd()
        .args([
            "--color",
            "never",
            "diff",
            original.path().to_str().unwrap(),
            modified.path().to_str().unwrap(),
            "--stats",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("3 unchanged"))
        .stdout(predicate::str::contains("removed"));
}

// =============================================================================
// Catalog Command
// =============================================================================

#[test]
fn catalog_json_lists_violation_types() {
    let json = json_output(&["catalog", "--json"]);
    let ids: Vec<&str> = json["violation_types"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|p| p["id"].as_str())
        .collect();
    assert!(ids.contains(&"parking"));
    assert!(ids.contains(&"general"));
}

#[test]
fn catalog_spanish_labels() {
    cmd()
        .args(["--locale", "es", "catalog", "--violation", "parking"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Estacionamiento"));
}

#[test]
fn catalog_unknown_violation_fails() {
    cmd()
        .args(["catalog", "--violation", "jaywalking"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown violation type"));
}

// =============================================================================
// Serve Command
// =============================================================================

#[cfg(feature = "mcp")]
#[test]
fn serve_help_shows_usage() {
    cmd()
        .args(["serve", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"));
}

// =============================================================================
// Error Cases
// =============================================================================

#[test]
fn no_subcommand_shows_help() {
    // arg_required_else_help makes clap print help to stderr and exit 2
    cmd()
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Usage:"));
}

#[test]
fn invalid_subcommand_shows_error() {
    cmd()
        .arg("not-a-command")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error:"));
}

#[test]
fn invalid_flag_shows_error() {
    cmd()
        .arg("--not-a-flag")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error:"));
}

// =============================================================================
// Chdir Flag
// =============================================================================

#[test]
fn chdir_flag_changes_directory() {
    // The -C flag should be accepted and work without error
    // We use a path that definitely exists
    cmd().args(["-C", "/tmp", "info"]).assert().success();
}

#[test]
fn chdir_nonexistent_fails() {
    cmd()
        .args(["-C", "/nonexistent/path/that/does/not/exist", "info"])
        .assert()
        .failure();
}
