//! CLI and command tests

mod common;

use common::{acme_parts, partforge, write_catalog, write_file};
use partforge::core::{Part, WeaponClass};
use predicates::prelude::*;
use tempfile::TempDir;

const NO_SOLUTION: &str = "No valid combinations found matching constraints.";

fn acme_setup() -> (TempDir, String) {
    let tmp = TempDir::new().unwrap();
    let path = write_catalog(&tmp, "acme.json", &acme_parts());
    (tmp, path.to_string_lossy().into_owned())
}

// ============================================================================
// CLI Basic Tests
// ============================================================================

#[test]
fn test_help_displays() {
    let tmp = TempDir::new().unwrap();
    partforge(&tmp)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Compose weapon parts"));
}

#[test]
fn test_version_displays() {
    let tmp = TempDir::new().unwrap();
    partforge(&tmp)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("partforge"));
}

#[test]
fn test_unknown_command_fails() {
    let tmp = TempDir::new().unwrap();
    partforge(&tmp)
        .arg("unknown-command")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}

// ============================================================================
// Generate Command Tests
// ============================================================================

#[test]
fn test_generate_finds_acme_build() {
    let (tmp, catalog) = acme_setup();
    partforge(&tmp)
        .args(["generate", "--class", "Pistol", "--min-damage", "5"])
        .args(["--catalog", &catalog])
        .assert()
        .success()
        .stdout(predicate::str::contains("Valid Combination Found!"))
        .stdout(predicate::str::contains("- Body: B1"))
        .stdout(predicate::str::contains("- Barrel: R1"))
        .stdout(predicate::str::contains("reloadTime     2.1"));
}

#[test]
fn test_generate_no_solution_exits_zero() {
    let (tmp, catalog) = acme_setup();
    partforge(&tmp)
        .args(["generate", "--class", "Pistol", "--min-damage", "20"])
        .args(["--catalog", &catalog])
        .assert()
        .success()
        .stdout(predicate::str::contains(NO_SOLUTION));
}

#[test]
fn test_generate_json_report() {
    let (tmp, catalog) = acme_setup();
    let output = partforge(&tmp)
        .args(["generate", "--class", "pistol", "--format", "json"])
        .args(["--catalog", &catalog])
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["found"], true);
    assert_eq!(report["class"], "Pistol");
    assert_eq!(report["typeOrder"], serde_json::json!(["body", "barrel"]));
    assert_eq!(report["build"]["parts"][1]["id"], "R1");
    assert_eq!(report["build"]["profile"]["magSize"], 12);
}

#[test]
fn test_generate_uses_config_thresholds() {
    let (tmp, catalog) = acme_setup();
    write_file(&tmp, "partforge.yaml", "thresholds:\n  weaponDamage: 20\n");

    partforge(&tmp)
        .args(["generate", "--class", "Pistol", "--catalog", &catalog])
        .assert()
        .success()
        .stdout(predicate::str::contains(NO_SOLUTION));

    // Flags take precedence over the config file
    partforge(&tmp)
        .args(["generate", "--class", "Pistol", "--catalog", &catalog])
        .args(["--min-damage", "5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Valid Combination Found!"));
}

#[test]
fn test_generate_catalog_from_config() {
    let tmp = TempDir::new().unwrap();
    std::fs::create_dir_all(tmp.path().join("parts")).unwrap();
    write_catalog(&tmp, "parts/acme.json", &acme_parts());
    write_file(&tmp, "partforge.yaml", "catalog_dir: parts\n");

    partforge(&tmp)
        .args(["generate", "--class", "Pistol"])
        .assert()
        .success()
        .stdout(predicate::str::contains("- Barrel: R1"));
}

#[test]
fn test_generate_with_embedded_catalog() {
    let tmp = TempDir::new().unwrap();
    partforge(&tmp)
        .args(["generate", "--class", "SMG", "--max-reload", "10"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Valid Combination Found!"))
        .stdout(predicate::str::contains("SMG build"));
}

#[test]
fn test_generate_match_manufacturer_requires_manufacturer() {
    let tmp = TempDir::new().unwrap();
    partforge(&tmp)
        .args(["generate", "--class", "Pistol", "--match-manufacturer"])
        .assert()
        .failure();
}

#[test]
fn test_generate_element_selection() {
    let tmp = TempDir::new().unwrap();
    let mut parts = acme_parts();
    parts.push(Part::new("Fire", WeaponClass::Pistol, "element"));
    parts.push(Part::new("Ice", WeaponClass::Pistol, "element"));
    let catalog = write_catalog(&tmp, "acme.json", &parts);

    partforge(&tmp)
        .args(["generate", "--class", "Pistol", "--element", "ice"])
        .arg("--catalog")
        .arg(&catalog)
        .assert()
        .success()
        .stdout(predicate::str::contains("- Element: Ice"));
}

// ============================================================================
// Catalog Commands
// ============================================================================

#[test]
fn test_parts_csv_listing() {
    let (tmp, catalog) = acme_setup();
    partforge(&tmp)
        .args(["parts", "--format", "csv", "--catalog", &catalog])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "id,class,type,manufacturer,modifiers\nB1,Pistol,body,Acme,\nR1,Pistol,barrel,Acme,weaponDamage=10\n",
        ));
}

#[test]
fn test_parts_filter_and_count() {
    let tmp = TempDir::new().unwrap();
    partforge(&tmp)
        .args(["parts", "--class", "Rifle", "--type", "body", "--count"])
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"^[1-9][0-9]*\n$").unwrap());
}

#[test]
fn test_parts_class_is_case_insensitive() {
    let (tmp, catalog) = acme_setup();
    partforge(&tmp)
        .args(["parts", "--class", "pistol", "--count", "--catalog", &catalog])
        .assert()
        .success()
        .stdout("2\n");
}

#[test]
fn test_stats_of_given_parts() {
    let (tmp, catalog) = acme_setup();
    let output = partforge(&tmp)
        .args(["stats", "B1", "R1", "--format", "json", "--catalog", &catalog])
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["profile"]["weaponDamage"], 10.0);
    assert_eq!(report["compatible"], true);
}

#[test]
fn test_stats_unknown_part_fails() {
    let (tmp, catalog) = acme_setup();
    partforge(&tmp)
        .args(["stats", "B1", "Nope", "--catalog", &catalog])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown part id: Nope"));
}

#[test]
fn test_graph_of_selected_parts() {
    let (tmp, catalog) = acme_setup();
    partforge(&tmp)
        .args(["graph", "B1", "R1", "--catalog", &catalog])
        .assert()
        .success()
        .stdout(predicate::str::contains("2 parts, 1 edges"));
}

#[test]
fn test_graph_dot_output() {
    let (tmp, catalog) = acme_setup();
    partforge(&tmp)
        .args(["graph", "--dot", "--catalog", &catalog])
        .write_stdin("")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("graph {"))
        .stdout(predicate::str::contains("--"));
}

#[test]
fn test_check_reports_counts() {
    let (tmp, catalog) = acme_setup();
    partforge(&tmp)
        .args(["check", "--catalog", &catalog])
        .assert()
        .success()
        .stdout(predicate::str::contains("Catalog OK: 2 parts"))
        .stdout(predicate::str::contains("1 compatibility edges"));
}

#[test]
fn test_check_strict_requires_body_per_class() {
    let tmp = TempDir::new().unwrap();
    let mut parts = acme_parts();
    parts.push(Part::new("Smg_Barrel", WeaponClass::Smg, "barrel"));
    let catalog = write_catalog(&tmp, "parts.json", &parts);

    partforge(&tmp)
        .arg("check")
        .arg("--catalog")
        .arg(&catalog)
        .assert()
        .success();

    partforge(&tmp)
        .args(["check", "--strict"])
        .arg("--catalog")
        .arg(&catalog)
        .assert()
        .failure()
        .stderr(predicate::str::contains("No body part for class(es): SMG"));
}

#[test]
fn test_check_rejects_duplicate_ids() {
    let tmp = TempDir::new().unwrap();
    let first = write_catalog(&tmp, "a.json", &acme_parts());
    let second = write_catalog(&tmp, "b.json", &acme_parts()[..1]);

    partforge(&tmp)
        .arg("check")
        .arg("--catalog")
        .arg(&first)
        .arg("--catalog")
        .arg(&second)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Duplicate part id: B1"));
}

#[test]
fn test_malformed_catalog_fails() {
    let tmp = TempDir::new().unwrap();
    let path = write_file(&tmp, "bad.json", "{ not json");
    partforge(&tmp)
        .arg("check")
        .arg("--catalog")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid part data"));
}

#[test]
fn test_completions_bash() {
    let tmp = TempDir::new().unwrap();
    partforge(&tmp)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("partforge"));
}
