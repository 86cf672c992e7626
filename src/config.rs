//! Site configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. Stock defaults are
//! serialized to a TOML table and the user's file is merged on top of it, so
//! a config file only needs the keys it wants to change.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [site]
//! name = "Gorilla Business Group"
//! tagline = "Bricks, pavers and precast for Mpumalanga and Gauteng"
//!
//! [contact]
//! email = "info@gorillabricks.co.za"
//! phone = "+27 13 000 0000"
//! address = "Kings Park, KwaMhlanga"
//!
//! [submission]
//! endpoint = "https://formspree.io/f/YOUR_FORMSPREE_ID"
//! timeout_secs = 30         # Give up on the remote endpoint after this long
//! retries = 0               # Extra attempts before falling back to mail
//!
//! [listing]
//! preview_count = 4         # Services shown on the landing page
//!
//! [map]
//! enabled = true
//! latitude = -25.595
//! longitude = 29.155
//! zoom = 11
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::form::is_valid_email;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Business name and strapline.
    pub site: SiteInfo,
    /// Addresses shown on the site and used for the mail fallback.
    pub contact: ContactConfig,
    /// Remote form endpoint and its timeout/retry policy.
    pub submission: SubmissionConfig,
    /// Listing settings.
    pub listing: ListingConfig,
    /// Embedded map widget.
    pub map: MapConfig,
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let endpoint = reqwest::Url::parse(&self.submission.endpoint).map_err(|e| {
            ConfigError::Validation(format!("submission.endpoint is not a valid URL: {e}"))
        })?;
        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(ConfigError::Validation(
                "submission.endpoint must be an http or https URL".into(),
            ));
        }
        if self.submission.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "submission.timeout_secs must be greater than 0".into(),
            ));
        }
        if !is_valid_email(&self.contact.email) {
            return Err(ConfigError::Validation(format!(
                "contact.email is not a valid address: {}",
                self.contact.email
            )));
        }
        if self.listing.preview_count == 0 {
            return Err(ConfigError::Validation(
                "listing.preview_count must be at least 1".into(),
            ));
        }
        if self.map.zoom > 19 {
            return Err(ConfigError::Validation("map.zoom must be 0-19".into()));
        }
        if !(-90.0..=90.0).contains(&self.map.latitude)
            || !(-180.0..=180.0).contains(&self.map.longitude)
        {
            return Err(ConfigError::Validation(
                "map.latitude/longitude out of range".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteInfo {
    pub name: String,
    pub tagline: String,
}

impl Default for SiteInfo {
    fn default() -> Self {
        Self {
            name: "Gorilla Business Group".to_string(),
            tagline: "Bricks, pavers and precast for Mpumalanga and Gauteng".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ContactConfig {
    /// Recipient of mail fallbacks and the backup address named in messages.
    pub email: String,
    pub phone: String,
    pub address: String,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            email: "info@gorillabricks.co.za".to_string(),
            phone: "+27 13 000 0000".to_string(),
            address: "Kings Park, KwaMhlanga".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SubmissionConfig {
    /// Form endpoint. The placeholder must be replaced per deployment.
    pub endpoint: String,
    pub timeout_secs: u64,
    /// Extra attempts after the first failure. 0 means a single attempt.
    pub retries: u32,
}

impl SubmissionConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for SubmissionConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://formspree.io/f/YOUR_FORMSPREE_ID".to_string(),
            timeout_secs: 30,
            retries: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ListingConfig {
    /// Number of services in the landing-page preview.
    pub preview_count: usize,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self { preview_count: 4 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MapConfig {
    pub enabled: bool,
    pub latitude: f64,
    pub longitude: f64,
    pub zoom: u8,
    /// Tile server URL template with `{s}`, `{z}`, `{x}`, `{y}` placeholders.
    pub tile_url: String,
    pub attribution: String,
    /// Label of the single marker.
    pub popup: String,
    pub leaflet_css: String,
    pub leaflet_js: String,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            latitude: -25.5950,
            longitude: 29.1550,
            zoom: 11,
            tile_url: "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png".to_string(),
            attribution: "© OpenStreetMap contributors".to_string(),
            popup: "Gorilla Business Group — Kings Park, KwaMhlanga".to_string(),
            leaflet_css: "https://unpkg.com/leaflet@1.9.4/dist/leaflet.css".to_string(),
            leaflet_js: "https://unpkg.com/leaflet@1.9.4/dist/leaflet.js".to_string(),
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    toml::Value::try_from(SiteConfig::default())
        .map_err(|e| ConfigError::Validation(format!("default config must serialize: {e}")))
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `config.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if no `config.toml` exists in the directory.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = path.join("config.toml");
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<SiteConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in the given directory.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    let base = stock_defaults_value()?;
    let overlay = load_raw_config(root)?;
    if overlay.is_none() {
        tracing::debug!("no config.toml in {}, using stock defaults", root.display());
    }
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Brickyard Configuration
# =======================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Site identity
# ---------------------------------------------------------------------------
[site]
name = "Gorilla Business Group"
tagline = "Bricks, pavers and precast for Mpumalanga and Gauteng"

# ---------------------------------------------------------------------------
# Contact details
# ---------------------------------------------------------------------------
[contact]
# Receives mail-client fallbacks; also named as the backup address in
# submission messages.
email = "info@gorillabricks.co.za"
phone = "+27 13 000 0000"
address = "Kings Park, KwaMhlanga"

# ---------------------------------------------------------------------------
# Form submission
# ---------------------------------------------------------------------------
[submission]
# JSON endpoint receiving both forms. Replace the placeholder per deployment.
endpoint = "https://formspree.io/f/YOUR_FORMSPREE_ID"

# Seconds before a submission attempt is abandoned.
timeout_secs = 30

# Extra attempts after a failure before falling back to the mail client.
retries = 0

# ---------------------------------------------------------------------------
# Listings
# ---------------------------------------------------------------------------
[listing]
# Number of services shown on the landing page.
preview_count = 4

# ---------------------------------------------------------------------------
# Map widget (contact page)
# ---------------------------------------------------------------------------
[map]
enabled = true
latitude = -25.595
longitude = 29.155
zoom = 11
tile_url = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png"
attribution = "© OpenStreetMap contributors"
popup = "Gorilla Business Group — Kings Park, KwaMhlanga"
leaflet_css = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.css"
leaflet_js = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.js"
"##
}
