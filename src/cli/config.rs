use anyhow::{bail, Context, Result};

use gst_invoice::models::Company;
use gst_invoice::settings::{load_settings, save_settings, settings_path};

const LOG_LEVELS: &[&str] = &["error", "warn", "info", "debug", "trace"];

pub fn show() -> Result<()> {
    let settings = load_settings();
    println!("Settings:   {}", settings_path().display());
    println!("Page size:  {}", settings.page_size);
    println!("Log level:  {}", settings.log_level);
    match &settings.seller {
        Some(seller) => {
            println!("Seller:     {}", seller.name.as_deref().unwrap_or("(unnamed)"));
            println!("GSTIN:      {}", seller.gstin.as_deref().unwrap_or("(not set)"));
            println!("State:      {}", seller.state.as_deref().unwrap_or("(not set)"));
        }
        None => println!("Seller:     (not set)"),
    }
    Ok(())
}

pub fn set(page_size: Option<usize>, seller: Option<String>, log_level: Option<String>) -> Result<()> {
    let mut settings = load_settings();

    if let Some(size) = page_size {
        if size == 0 {
            bail!("--page-size must be at least 1");
        }
        settings.page_size = size;
    }
    if let Some(path) = seller {
        let content = std::fs::read_to_string(&path).with_context(|| format!("reading {path}"))?;
        let company: Company =
            serde_json::from_str(&content).with_context(|| format!("parsing seller profile {path}"))?;
        settings.seller = Some(company);
    }
    if let Some(level) = log_level {
        let level = level.to_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            bail!("unknown log level: {level} (expected one of {})", LOG_LEVELS.join(", "));
        }
        settings.log_level = level;
    }

    save_settings(&settings)?;
    println!("Saved {}", settings_path().display());
    Ok(())
}
