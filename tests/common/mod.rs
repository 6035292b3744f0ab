//! Shared test helpers for integration tests
//!
//! This module provides common utilities used across all test files.

#![allow(dead_code)]

use assert_cmd::cargo;
use assert_cmd::Command;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

use partforge::core::{Part, PartCatalog, WeaponClass};

/// Helper to get a partforge command isolated from user config
pub fn partforge(tmp: &TempDir) -> Command {
    let mut cmd = Command::new(cargo::cargo_bin!("partforge"));
    cmd.current_dir(tmp.path())
        .env_remove("PARTFORGE_CONFIG")
        .env_remove("RUST_LOG")
        .env("XDG_CONFIG_HOME", tmp.path().join("xdg"))
        .env("NO_COLOR", "1");
    cmd
}

/// Two-part Pistol catalog: an Acme body and an Acme barrel adding 10 damage
pub fn acme_parts() -> Vec<Part> {
    vec![
        Part::new("B1", WeaponClass::Pistol, "body").with_manufacturer("Acme"),
        Part::new("R1", WeaponClass::Pistol, "barrel")
            .with_manufacturer("Acme")
            .with_modifier("weaponDamage", 10.0),
    ]
}

pub fn acme_catalog() -> PartCatalog {
    PartCatalog::new(acme_parts()).unwrap()
}

/// Write parts as a catalog JSON file in the temp directory
pub fn write_catalog(tmp: &TempDir, name: &str, parts: &[Part]) -> PathBuf {
    let path = tmp.path().join(name);
    fs::write(&path, serde_json::to_string_pretty(parts).unwrap()).unwrap();
    path
}

/// Write a raw file in the temp directory
pub fn write_file(tmp: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = tmp.path().join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, contents).unwrap();
    path
}
