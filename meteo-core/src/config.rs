use anyhow::{Context, Result, anyhow, bail};
use chrono::NaiveDate;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{
    provider::{Host, endpoints::CLIMATE_MODELS},
    workflow::PanelKind,
};

/// Geocoding search options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Maximum number of candidates to request (1-100).
    pub count: u8,
    /// Language for place names, e.g. "en" or "de".
    pub language: String,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self { count: 10, language: "en".to_string() }
    }
}

/// Date range and model set for climate projections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClimateConfig {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub models: Vec<String>,
}

impl Default for ClimateConfig {
    fn default() -> Self {
        Self {
            start_date: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap_or(NaiveDate::MIN),
            end_date: NaiveDate::from_ymd_opt(2035, 12, 31).unwrap_or(NaiveDate::MAX),
            models: CLIMATE_MODELS.iter().map(|m| m.to_string()).collect(),
        }
    }
}

/// Base URL for every Open-Meteo host, without a trailing path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Endpoints {
    pub geocoding: String,
    pub forecast: String,
    pub marine: String,
    pub air_quality: String,
    pub satellite: String,
    pub flood: String,
    pub climate: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            geocoding: "https://geocoding-api.open-meteo.com".to_string(),
            forecast: "https://api.open-meteo.com".to_string(),
            marine: "https://marine-api.open-meteo.com".to_string(),
            air_quality: "https://air-quality-api.open-meteo.com".to_string(),
            satellite: "https://satellite-api.open-meteo.com".to_string(),
            flood: "https://flood-api.open-meteo.com".to_string(),
            climate: "https://climate-api.open-meteo.com".to_string(),
        }
    }
}

impl Endpoints {
    /// Point every host at the same server (mirrors, tests).
    pub fn all_at(base_url: &str) -> Self {
        let base = base_url.trim_end_matches('/').to_string();
        Self {
            geocoding: base.clone(),
            forecast: base.clone(),
            marine: base.clone(),
            air_quality: base.clone(),
            satellite: base.clone(),
            flood: base.clone(),
            climate: base,
        }
    }

    pub fn base_url(&self, host: Host) -> &str {
        let url = match host {
            Host::Geocoding => &self.geocoding,
            Host::Forecast => &self.forecast,
            Host::Marine => &self.marine,
            Host::AirQuality => &self.air_quality,
            Host::Satellite => &self.satellite,
            Host::Flood => &self.flood,
            Host::Climate => &self.climate,
        };
        url.trim_end_matches('/')
    }
}

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// default_panel = "weather"
///
/// [search]
/// count = 5
/// language = "de"
///
/// [climate]
/// start_date = "2020-01-01"
/// end_date = "2050-12-31"
/// models = ["EC_Earth3P_HR"]
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Panel opened first by the dashboard, e.g. "geocoding" or "flood".
    pub default_panel: Option<String>,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub climate: ClimateConfig,
    #[serde(default)]
    pub endpoints: Endpoints,
}

impl Config {
    /// Return the default panel, if one is configured.
    pub fn default_panel_kind(&self) -> Result<Option<PanelKind>> {
        self.default_panel
            .as_deref()
            .map(PanelKind::try_from)
            .transpose()
    }

    pub fn set_default_panel(&mut self, panel: PanelKind) {
        self.default_panel = Some(panel.as_str().to_string());
    }

    /// Check values that would otherwise only fail once a request is sent.
    pub fn validate(&self) -> Result<()> {
        if !(1..=100).contains(&self.search.count) {
            bail!(
                "search.count must be between 1 and 100, got {}",
                self.search.count
            );
        }
        if self.search.language.trim().is_empty() {
            bail!("search.language must not be empty");
        }
        if self.climate.start_date > self.climate.end_date {
            bail!(
                "climate.start_date ({}) is after climate.end_date ({})",
                self.climate.start_date,
                self.climate.end_date
            );
        }
        if self.climate.models.is_empty() {
            bail!("climate.models must list at least one model");
        }
        self.default_panel_kind()?;
        Ok(())
    }

    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            // First run: no config file, return defaults.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("com", "open-meteo-dash", "meteo")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}
