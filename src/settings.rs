//! User settings, stored as JSON next to the other config files:
//! - Linux: ~/.config/read-me/settings.json
//! - macOS: ~/Library/Application Support/read-me/settings.json
//! - Windows: %APPDATA%\read-me\settings.json
//!
//! A missing file means defaults. A file that doesn't parse is an error,
//! so a typo never silently resets someone's catalog location.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::cover::DEFAULT_COVER_SIZE;
use crate::error::{AppError, AppResult};
use crate::state::data::SortStyle;
use crate::state::library::Library;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// Catalog location (None = the platform data directory)
    pub database_path: Option<PathBuf>,
    /// Sort style the list starts in
    pub default_sort: SortStyle,
    /// Edge length of stored covers in pixels
    pub cover_size: u32,
    /// Fill an empty catalog with a few sample books on launch
    pub seed_sample_books: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            database_path: None,
            default_sort: SortStyle::ReadMe,
            cover_size: DEFAULT_COVER_SIZE,
            seed_sample_books: true,
        }
    }
}

impl Settings {
    /// Where the settings file lives on this platform
    pub fn default_path() -> AppResult<PathBuf> {
        let mut path = dirs::config_dir()
            .or_else(dirs::home_dir)
            .ok_or(AppError::NoDataDirectory)?;

        path.push("read-me");
        path.push("settings.json");
        Ok(path)
    }

    /// Load from the platform location, writing a default file on first launch
    pub fn load() -> AppResult<Self> {
        let path = Self::default_path()?;
        if !path.exists() {
            let settings = Self::default();
            settings.save_to(&path)?;
            info!("⚙️  Wrote default settings to {}", path.display());
            return Ok(settings);
        }
        Self::load_from(&path)
    }

    /// Load from `path`, falling back to defaults when the file doesn't exist
    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            info!("⚙️  No settings at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn save_to(&self, path: &Path) -> AppResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Convert to JSON string for the settings file
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Parse from JSON string (from the settings file)
    pub fn from_json(json: &str) -> AppResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// The catalog path these settings point at
    pub fn database_path(&self) -> AppResult<PathBuf> {
        match &self.database_path {
            Some(path) => Ok(path.clone()),
            None => Library::default_db_path(),
        }
    }
}
