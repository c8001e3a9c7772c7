//! Common test utilities for Aesthetics integration tests

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::TempDir;

pub const THEMES: &str = ".userdata/shared/Aesthetics/Themes";

/// A fake SD card for integration tests
pub struct TestCard {
    /// Temporary directory
    #[allow(dead_code)]
    pub temp: TempDir,
    /// Card root
    pub path: PathBuf,
}

impl TestCard {
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let path = temp.path().join("SDCARD");
        std::fs::create_dir_all(&path).expect("Failed to create card root");
        Self { temp, path }
    }

    /// A card with two tagged ROM directories, one of them empty, plus meta images
    #[allow(dead_code)]
    pub fn populated() -> Self {
        let card = Self::new();
        card.write_file("Roms/Game Boy (GB)/tetris.gb", "rom");
        card.write_file("Roms/Game Boy (GB)/.media/bg.png", "gb wallpaper");
        card.write_file("Roms/.media/Game Boy (GB).png", "gb icon");
        card.create_dir("Roms/Super Nintendo (SNES)");
        card.write_file("Roms/Super Nintendo (SNES)/.media/bglist.png", "snes list");
        card.write_file("bg.png", "root wallpaper");
        card.write_file("Collections/Favourites.txt", "/Roms/Game Boy (GB)/tetris.gb");
        card.write_file("Collections/.media/Favourites.png", "fav icon");
        card
    }

    /// Write a file on the card
    pub fn write_file(&self, path: &str, content: &str) {
        let file_path = self.path.join(path);
        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&file_path, content).expect("Failed to write file");
    }

    #[allow(dead_code)]
    pub fn create_dir(&self, path: &str) -> PathBuf {
        let dir = self.path.join(path);
        std::fs::create_dir_all(&dir).expect("Failed to create directory");
        dir
    }

    /// Read a file from the card
    #[allow(dead_code)]
    pub fn read_file(&self, path: &str) -> String {
        std::fs::read_to_string(self.path.join(path)).expect("Failed to read file")
    }

    /// Check if a file exists on the card
    #[allow(dead_code)]
    pub fn file_exists(&self, path: &str) -> bool {
        self.path.join(path).exists()
    }

    /// Names of the themes saved on the card, sorted
    #[allow(dead_code)]
    pub fn theme_names(&self) -> Vec<String> {
        let Ok(entries) = std::fs::read_dir(self.path.join(THEMES)) else {
            return Vec::new();
        };
        let mut names: Vec<String> = entries
            .map(|e| e.expect("Failed to read theme entry"))
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    /// The aesthetics binary pointed at this card, with a config file that does not exist
    pub fn cmd(&self) -> Command {
        let mut cmd = aesthetics_cmd();
        cmd.env("AESTHETICS_ROOT", &self.path)
            .env_remove("RUST_LOG")
            .arg("--config")
            .arg(self.config_path());
        cmd
    }

    pub fn config_path(&self) -> PathBuf {
        self.temp.path().join("config.yml")
    }

    #[allow(dead_code)]
    pub fn root(&self) -> &Path {
        &self.path
    }
}

impl Default for TestCard {
    fn default() -> Self {
        Self::new()
    }
}

// Temporary fix for deprecated cargo_bin - will be updated when build-dir issues are resolved
#[allow(deprecated)]
pub fn aesthetics_cmd() -> Command {
    Command::cargo_bin("aesthetics").expect("Failed to find aesthetics binary")
}
