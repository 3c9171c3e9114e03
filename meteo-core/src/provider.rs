use crate::{
    Config, DomainQuery, DomainResult, LocationCandidate, NetworkError,
    provider::openmeteo::OpenMeteoClient,
};
use async_trait::async_trait;
use std::{convert::TryFrom, fmt::Debug};

pub mod endpoints;
pub mod openmeteo;

pub use endpoints::{Endpoint, Host};

/// Which category of data a feature panel shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FeatureKind {
    Marine,
    Weather,
    AirQuality,
    Radiation,
    Elevation,
    Flood,
    Climate,
}

impl FeatureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FeatureKind::Marine => "marine",
            FeatureKind::Weather => "weather",
            FeatureKind::AirQuality => "air-quality",
            FeatureKind::Radiation => "radiation",
            FeatureKind::Elevation => "elevation",
            FeatureKind::Flood => "flood",
            FeatureKind::Climate => "climate",
        }
    }

    /// Heading used by panels and menus.
    pub fn title(&self) -> &'static str {
        match self {
            FeatureKind::Marine => "Marine Forecast",
            FeatureKind::Weather => "Weather Forecast",
            FeatureKind::AirQuality => "Air Quality",
            FeatureKind::Radiation => "Satellite Radiation",
            FeatureKind::Elevation => "Elevation",
            FeatureKind::Flood => "Flood",
            FeatureKind::Climate => "Climate Change",
        }
    }

    pub const fn all() -> &'static [FeatureKind] {
        &[
            FeatureKind::Marine,
            FeatureKind::Weather,
            FeatureKind::AirQuality,
            FeatureKind::Radiation,
            FeatureKind::Elevation,
            FeatureKind::Flood,
            FeatureKind::Climate,
        ]
    }
}

impl std::fmt::Display for FeatureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for FeatureKind {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.trim().to_lowercase();

        match lower.as_str() {
            "marine" => Ok(FeatureKind::Marine),
            "weather" | "forecast" => Ok(FeatureKind::Weather),
            "air-quality" | "airquality" | "air_quality" => Ok(FeatureKind::AirQuality),
            "radiation" | "satellite" => Ok(FeatureKind::Radiation),
            "elevation" => Ok(FeatureKind::Elevation),
            "flood" => Ok(FeatureKind::Flood),
            "climate" => Ok(FeatureKind::Climate),
            _ => Err(anyhow::anyhow!(
                "Unknown feature '{value}'. Supported features: marine, weather, air-quality, \
                 radiation, elevation, flood, climate."
            )),
        }
    }
}

/// Turns free text into candidate locations.
#[async_trait]
pub trait LocationResolver: Send + Sync + Debug {
    async fn search(&self, query: &str) -> Result<Vec<LocationCandidate>, NetworkError>;
}

/// Fetches the data behind one feature panel for a coordinate.
#[async_trait]
pub trait FeatureFetcher: Send + Sync + Debug {
    async fn fetch(&self, query: &DomainQuery) -> Result<DomainResult, NetworkError>;
}

/// Construct the Open-Meteo client described by `config`.
pub fn client_from_config(config: &Config) -> anyhow::Result<OpenMeteoClient> {
    config.validate()?;
    OpenMeteoClient::new(config.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feature_kind_as_str_roundtrip() {
        for kind in FeatureKind::all() {
            let parsed = FeatureKind::try_from(kind.as_str()).expect("roundtrip should succeed");
            assert_eq!(*kind, parsed);
        }
    }

    #[test]
    fn feature_kind_accepts_aliases() {
        assert_eq!(FeatureKind::try_from("AirQuality").unwrap(), FeatureKind::AirQuality);
        assert_eq!(FeatureKind::try_from(" Flood ").unwrap(), FeatureKind::Flood);
        assert_eq!(FeatureKind::try_from("satellite").unwrap(), FeatureKind::Radiation);
    }

    #[test]
    fn unknown_feature_error() {
        let err = FeatureKind::try_from("tides").unwrap_err();
        assert!(err.to_string().contains("Unknown feature"));
    }

    #[test]
    fn client_from_config_rejects_invalid_config() {
        let mut cfg = Config::default();
        cfg.search.count = 0;

        let err = client_from_config(&cfg).unwrap_err();
        assert!(err.to_string().contains("count"));
    }

    #[test]
    fn client_from_default_config_works() {
        assert!(client_from_config(&Config::default()).is_ok());
    }
}
