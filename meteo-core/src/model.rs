use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fmt};

use crate::{NetworkError, provider::FeatureKind};

pub mod air_quality;
pub mod climate;
pub mod elevation;
pub mod flood;
pub mod marine;
pub mod radiation;
pub mod weather;

pub use air_quality::{AirQualityCurrent, AirQualityForecast, AirQualityHourly};
pub use climate::{ClimateDaily, ClimateProjection};
pub use elevation::ElevationData;
pub use flood::{FloodDaily, FloodForecast};
pub use marine::{MarineCurrent, MarineForecast, MarineHourly};
pub use radiation::{RadiationArchive, RadiationDaily, RadiationHourly};
pub use weather::{WeatherCurrent, WeatherDaily, WeatherForecast};

/// One time-indexed series as returned upstream; gaps come through as `null`.
pub type Series = Vec<Option<f64>>;

/// A location returned by the geocoding search, not yet confirmed by the user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LocationCandidate {
    #[serde(default)]
    pub id: Option<u64>,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub elevation: Option<f64>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub country_code: Option<String>,
    /// First-level administrative area (state, region).
    #[serde(default)]
    pub admin1: Option<String>,
    #[serde(default)]
    pub population: Option<u64>,
    #[serde(default)]
    pub timezone: Option<String>,
}

impl LocationCandidate {
    /// Composite identity. The upstream `id` is optional, so it is never used here.
    pub fn key(&self) -> String {
        format!("{}@{},{}", self.name, self.latitude, self.longitude)
    }

    /// One-line description for result lists.
    pub fn label(&self) -> String {
        let mut parts = vec![self.name.as_str()];
        if let Some(admin1) = self.admin1.as_deref().filter(|a| *a != self.name) {
            parts.push(admin1);
        }
        if let Some(country) = self.country.as_deref() {
            parts.push(country);
        }

        format!("{} ({}, {})", parts.join(", "), self.latitude, self.longitude)
    }
}

impl fmt::Display for LocationCandidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

/// What to fetch and where.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DomainQuery {
    pub latitude: f64,
    pub longitude: f64,
    pub kind: FeatureKind,
}

impl DomainQuery {
    pub fn new(kind: FeatureKind, latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude, kind }
    }

    pub fn for_candidate(kind: FeatureKind, candidate: &LocationCandidate) -> Self {
        Self::new(kind, candidate.latitude, candidate.longitude)
    }
}

/// Decoded payload of one feature endpoint.
#[derive(Debug, Clone, PartialEq)]
pub enum DomainResult {
    Marine(MarineForecast),
    Weather(WeatherForecast),
    AirQuality(AirQualityForecast),
    Radiation(RadiationArchive),
    Elevation(ElevationData),
    Flood(FloodForecast),
    Climate(ClimateProjection),
}

impl DomainResult {
    pub fn kind(&self) -> FeatureKind {
        match self {
            DomainResult::Marine(_) => FeatureKind::Marine,
            DomainResult::Weather(_) => FeatureKind::Weather,
            DomainResult::AirQuality(_) => FeatureKind::AirQuality,
            DomainResult::Radiation(_) => FeatureKind::Radiation,
            DomainResult::Elevation(_) => FeatureKind::Elevation,
            DomainResult::Flood(_) => FeatureKind::Flood,
            DomainResult::Climate(_) => FeatureKind::Climate,
        }
    }

    /// Grid cell the upstream actually answered for, when it reports one.
    pub fn grid_point(&self) -> Option<&GridPoint> {
        match self {
            DomainResult::Marine(r) => Some(&r.grid),
            DomainResult::Weather(r) => Some(&r.grid),
            DomainResult::AirQuality(r) => Some(&r.grid),
            DomainResult::Radiation(r) => Some(&r.grid),
            DomainResult::Flood(r) => Some(&r.grid),
            DomainResult::Climate(r) => Some(&r.grid),
            DomainResult::Elevation(_) => None,
        }
    }

    /// Decode a response body for `kind`, checking series alignment.
    pub(crate) fn decode(kind: FeatureKind, body: &str) -> Result<Self, NetworkError> {
        let endpoint = kind.as_str();
        let json = |e: serde_json::Error| NetworkError::decode(endpoint, e.to_string());

        let result = match kind {
            FeatureKind::Marine => DomainResult::Marine(serde_json::from_str(body).map_err(json)?),
            FeatureKind::Weather => DomainResult::Weather(serde_json::from_str(body).map_err(json)?),
            FeatureKind::AirQuality => {
                DomainResult::AirQuality(serde_json::from_str(body).map_err(json)?)
            }
            FeatureKind::Radiation => {
                DomainResult::Radiation(serde_json::from_str(body).map_err(json)?)
            }
            FeatureKind::Elevation => {
                DomainResult::Elevation(serde_json::from_str(body).map_err(json)?)
            }
            FeatureKind::Flood => DomainResult::Flood(serde_json::from_str(body).map_err(json)?),
            FeatureKind::Climate => DomainResult::Climate(serde_json::from_str(body).map_err(json)?),
        };

        result.check().map_err(|detail| NetworkError::decode(endpoint, detail))?;
        Ok(result)
    }

    fn check(&self) -> Result<(), String> {
        match self {
            DomainResult::Marine(r) => r.check(),
            DomainResult::Weather(r) => r.check(),
            DomainResult::AirQuality(r) => r.check(),
            DomainResult::Radiation(r) => r.check(),
            DomainResult::Elevation(r) => r.check(),
            DomainResult::Flood(r) => r.check(),
            DomainResult::Climate(r) => r.check(),
        }
    }
}

/// Location metadata echoed back by every gridded endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridPoint {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub elevation: Option<f64>,
    #[serde(default)]
    pub timezone: Option<String>,
    #[serde(default)]
    pub utc_offset_seconds: Option<i32>,
}

/// Unit strings keyed by field name (`current_units`, `hourly_units`, ...).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Units(BTreeMap<String, String>);

impl Units {
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    /// Format `value` with the unit reported for `field`, or `fallback` when
    /// the upstream did not report one. `None` stays `None`.
    pub fn tag(&self, field: &str, value: Option<f64>, fallback: &str) -> Option<String> {
        let value = value?;
        let unit = self.get(field).unwrap_or(fallback);
        if unit.is_empty() {
            Some(value.to_string())
        } else {
            Some(format!("{value} {unit}"))
        }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Units {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Units(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Every named series in a block must be as long as the block's `time` array.
pub(crate) fn check_aligned(
    block: &str,
    time: &[String],
    series: &[(&str, Option<&Series>)],
) -> Result<(), String> {
    check_lengths(block, time.len(), series.iter().map(|(n, s)| (*n, s.map(Vec::len))))
}

/// Same as [`check_aligned`] for timestamp columns such as `sunrise`.
pub(crate) fn check_aligned_times(
    block: &str,
    time: &[String],
    columns: &[(&str, Option<&Vec<String>>)],
) -> Result<(), String> {
    check_lengths(block, time.len(), columns.iter().map(|(n, c)| (*n, c.map(Vec::len))))
}

fn check_lengths<'a>(
    block: &str,
    expected: usize,
    lengths: impl Iterator<Item = (&'a str, Option<usize>)>,
) -> Result<(), String> {
    for (name, len) in lengths {
        let Some(len) = len else { continue };
        if len != expected {
            return Err(format!(
                "{block}.{name} has {len} values but {block}.time has {expected}"
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn london() -> LocationCandidate {
        LocationCandidate {
            id: Some(2643743),
            name: "London".into(),
            latitude: 51.50853,
            longitude: -0.12574,
            elevation: Some(25.0),
            country: Some("United Kingdom".into()),
            country_code: Some("GB".into()),
            admin1: Some("England".into()),
            population: Some(8_961_989),
            timezone: Some("Europe/London".into()),
        }
    }

    #[test]
    fn candidate_label_includes_region_and_country() {
        assert_eq!(
            london().label(),
            "London, England, United Kingdom (51.50853, -0.12574)"
        );
    }

    #[test]
    fn candidate_key_ignores_id() {
        let a = london();
        let mut b = london();
        b.id = None;
        assert_eq!(a.key(), b.key());

        b.latitude = 42.98339;
        assert_ne!(a.key(), b.key());
    }

    #[test]
    fn candidate_decodes_with_only_required_fields() {
        let c: LocationCandidate =
            serde_json::from_str(r#"{"name":"Nowhere","latitude":1.5,"longitude":2.5}"#)
                .expect("minimal candidate should decode");
        assert_eq!(c.country, None);
        assert_eq!(c.label(), "Nowhere (1.5, 2.5)");
    }

    #[test]
    fn query_for_candidate_copies_coordinates() {
        let q = DomainQuery::for_candidate(FeatureKind::Flood, &london());
        assert_eq!(q, DomainQuery::new(FeatureKind::Flood, 51.50853, -0.12574));
    }

    #[test]
    fn units_tag_uses_reported_unit_then_fallback() {
        let units: Units = [("wave_height", "m"), ("uv_index", "")].into_iter().collect();

        assert_eq!(units.tag("wave_height", Some(1.2), "ft"), Some("1.2 m".into()));
        assert_eq!(units.tag("uv_index", Some(3.0), "x"), Some("3".into()));
        assert_eq!(
            units.tag("sea_surface_temperature", Some(14.5), "°C"),
            Some("14.5 °C".into())
        );
        assert_eq!(units.tag("wave_height", None, "m"), None);
    }

    #[test]
    fn misaligned_series_is_reported() {
        let time = vec!["2024-01-01".to_string(), "2024-01-02".to_string()];
        let ok: Series = vec![Some(1.0), None];
        let short: Series = vec![Some(1.0)];

        assert!(check_aligned("daily", &time, &[("a", Some(&ok)), ("b", None)]).is_ok());

        let err = check_aligned("daily", &time, &[("a", Some(&ok)), ("b", Some(&short))])
            .unwrap_err();
        assert_eq!(err, "daily.b has 1 values but daily.time has 2");
    }
}
