use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{InvoiceError, Result};
use crate::models::Company;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Seller profile used when a request doesn't carry one.
    #[serde(default)]
    pub seller: Option<Company>,
}

fn default_page_size() -> usize {
    40
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            log_level: default_log_level(),
            seller: None,
        }
    }
}

impl Settings {
    /// The configured seller stands in only when the request names none.
    pub fn seller_for<'a>(&'a self, requested: &'a Company) -> &'a Company {
        match &self.seller {
            Some(seller) if requested.is_unset() => seller,
            _ => requested,
        }
    }
}

fn config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("gst-invoice")
}

pub fn settings_path() -> PathBuf {
    config_dir().join("settings.json")
}

pub fn load_settings() -> Settings {
    load_settings_from(&settings_path())
}

/// Missing or unreadable files fall back to defaults.
pub fn load_settings_from(path: &Path) -> Settings {
    if !path.exists() {
        return Settings::default();
    }
    let content = std::fs::read_to_string(path).unwrap_or_default();
    match serde_json::from_str(&content) {
        Ok(settings) => settings,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "ignoring unreadable settings file");
            Settings::default()
        }
    }
}

pub fn save_settings(settings: &Settings) -> Result<()> {
    save_settings_to(settings, &settings_path())
}

pub fn save_settings_to(settings: &Settings, path: &Path) -> Result<()> {
    if settings.page_size == 0 {
        return Err(InvoiceError::Settings("page_size must be at least 1".to_string()));
    }
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }
    let json = serde_json::to_string_pretty(settings)?;
    std::fs::write(path, format!("{json}\n"))?;
    Ok(())
}
