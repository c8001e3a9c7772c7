//! CLI integration tests using the REAL aesthetics binary

mod common;

use common::{TestCard, aesthetics_cmd};
use predicates::prelude::*;

#[test]
fn test_help_output() {
    aesthetics_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("game-launcher SD cards"))
        .stdout(predicate::str::contains("decorations"))
        .stdout(predicate::str::contains("save"))
        .stdout(predicate::str::contains("apply"))
        .stdout(predicate::str::contains("reset"))
        .stdout(predicate::str::contains("themes"));
}

#[test]
fn test_version_output() {
    aesthetics_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("aesthetics"));
}

#[test]
fn test_completions_bash() {
    aesthetics_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("aesthetics"));
}

#[test]
fn test_completions_unknown_shell() {
    aesthetics_cmd()
        .args(["completions", "tcsh"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown shell"));
}

#[test]
fn test_decorations_empty_card() {
    let card = TestCard::new();
    card.cmd()
        .arg("decorations")
        .assert()
        .success()
        .stdout(predicate::str::contains("No decorations found"));
}

#[test]
fn test_decorations_grouped_by_console() {
    let card = TestCard::populated();
    card.cmd()
        .arg("decorations")
        .assert()
        .success()
        .stdout(predicate::str::contains("Decorations (2) by console"))
        .stdout(predicate::str::contains("(GB) Game Boy"))
        .stdout(predicate::str::contains("(SNES) Super Nintendo"))
        .stdout(predicate::str::contains("[list wallpaper]"));
}

#[test]
fn test_decorations_grouped_by_directory() {
    let card = TestCard::populated();
    card.cmd()
        .args(["decorations", "--by", "directory"])
        .assert()
        .success()
        .stdout(predicate::str::contains("by directory"))
        .stdout(predicate::str::contains("  Super Nintendo\n"));
}

#[test]
fn test_decorations_cycle_persists_grouping() {
    let card = TestCard::populated();
    card.cmd()
        .args(["decorations", "--cycle"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Default grouping is now directory"));

    let yaml = std::fs::read_to_string(card.config_path()).unwrap();
    assert!(yaml.contains("decoration_aggregation_type: directory"));

    card.cmd()
        .arg("decorations")
        .assert()
        .success()
        .stdout(predicate::str::contains("by directory"));
}

#[test]
fn test_numeric_aggregation_type_in_config() {
    let card = TestCard::populated();
    std::fs::write(card.config_path(), "decoration_aggregation_type: 1\n").unwrap();

    card.cmd()
        .arg("decorations")
        .assert()
        .success()
        .stdout(predicate::str::contains("by directory"));
}

#[test]
fn test_malformed_config_fails() {
    let card = TestCard::new();
    std::fs::write(card.config_path(), "decoration_aggregation_type: sideways\n").unwrap();

    card.cmd()
        .arg("decorations")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse configuration file"));
}

#[test]
fn test_sdcard_root_from_config() {
    let card = TestCard::populated();
    std::fs::write(
        card.config_path(),
        format!("sdcard_root: {}\n", card.root().display()),
    )
    .unwrap();

    let mut cmd = aesthetics_cmd();
    cmd.env_remove("AESTHETICS_ROOT")
        .arg("--config")
        .arg(card.config_path())
        .arg("decorations")
        .assert()
        .success()
        .stdout(predicate::str::contains("Decorations (2)"));
}

#[test]
fn test_components_on_card() {
    let card = TestCard::populated();
    card.cmd()
        .arg("components")
        .assert()
        .success()
        .stdout(predicate::str::contains("✓ SystemIcons"))
        .stdout(predicate::str::contains("✓ SystemWallpapers"))
        .stdout(predicate::str::contains("✓ SystemListWallpapers"))
        .stdout(predicate::str::contains("✓ CollectionIcons"))
        .stdout(predicate::str::contains("· ToolIcons"))
        .stdout(predicate::str::contains(" Wallpapers\n").not());
}

#[test]
fn test_components_of_unknown_theme() {
    let card = TestCard::new();
    card.cmd()
        .args(["components", "Nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Theme 'Nope' not found"))
        .stderr(predicate::str::contains("aesthetics themes list"));
}
