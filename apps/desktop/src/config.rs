use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::Context;
use devices::{Address, Coordinates};
use serde::Deserialize;

pub const DEFAULT_CONFIG_FILE: &str = "safe_street.toml";

/// Runtime settings for the terminal app. Platform grants and the simulated
/// device readings live here since there is no real camera or GPS.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub log_filter: String,
    pub camera_permission: bool,
    pub location_permission: bool,
    pub capture_dir: String,
    pub image_library: Vec<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub address: Option<Address>,
}

impl Default for Settings {
    fn default() -> Self {
        let capture_dir = dirs::picture_dir()
            .unwrap_or_else(std::env::temp_dir)
            .join("safe_street");
        Self {
            log_filter: "info".into(),
            camera_permission: true,
            location_permission: true,
            capture_dir: capture_dir.to_string_lossy().replace('\\', "/"),
            image_library: Vec::new(),
            latitude: Some(39.7817),
            longitude: Some(-89.6501),
            address: Some(Address {
                city: Some("Springfield".into()),
                region: Some("IL".into()),
                country: Some("USA".into()),
                ..Address::default()
            }),
        }
    }
}

impl Settings {
    pub fn coordinates(&self) -> Option<Coordinates> {
        Some(Coordinates {
            latitude: self.latitude?,
            longitude: self.longitude?,
        })
    }
}

/// Defaults, then the TOML file, then `APP__*` environment variables.
pub fn load_settings(config_path: Option<&Path>) -> anyhow::Result<Settings> {
    let mut settings = match resolve_config_path(config_path) {
        Some(path) => read_settings_file(&path)?,
        None => Settings::default(),
    };
    apply_env_overrides(&mut settings, |key| std::env::var(key).ok());
    Ok(settings)
}

fn resolve_config_path(config_path: Option<&Path>) -> Option<PathBuf> {
    match config_path {
        Some(path) => Some(path.to_path_buf()),
        None => {
            let fallback = PathBuf::from(DEFAULT_CONFIG_FILE);
            fallback.exists().then_some(fallback)
        }
    }
}

fn read_settings_file(path: &Path) -> anyhow::Result<Settings> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file '{}'", path.display()))?;
    parse_settings(&raw).with_context(|| format!("invalid config file '{}'", path.display()))
}

pub(crate) fn parse_settings(raw: &str) -> anyhow::Result<Settings> {
    Ok(toml::from_str::<Settings>(raw)?)
}

pub(crate) fn apply_env_overrides(settings: &mut Settings, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(v) = lookup("APP__LOG_FILTER") {
        settings.log_filter = v;
    }
    if let Some(v) = lookup("APP__CAMERA_PERMISSION").and_then(|v| parse_grant(&v)) {
        settings.camera_permission = v;
    }
    if let Some(v) = lookup("APP__LOCATION_PERMISSION").and_then(|v| parse_grant(&v)) {
        settings.location_permission = v;
    }
    if let Some(v) = lookup("APP__CAPTURE_DIR") {
        settings.capture_dir = v;
    }
    if let Some(v) = lookup("APP__IMAGE_LIBRARY") {
        settings.image_library = v
            .split(',')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .map(String::from)
            .collect();
    }
    if let Some(v) = lookup("APP__LATITUDE").and_then(|v| v.parse::<f64>().ok()) {
        settings.latitude = Some(v);
    }
    if let Some(v) = lookup("APP__LONGITUDE").and_then(|v| v.parse::<f64>().ok()) {
        settings.longitude = Some(v);
    }
}

fn parse_grant(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "granted" => Some(true),
        "0" | "false" | "no" | "denied" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
