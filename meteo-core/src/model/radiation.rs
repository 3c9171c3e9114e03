use serde::{Deserialize, Serialize};

use super::{GridPoint, Series, Units, check_aligned, check_aligned_times};

/// Satellite-derived solar radiation archive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RadiationArchive {
    #[serde(flatten)]
    pub grid: GridPoint,
    #[serde(default)]
    pub daily: Option<RadiationDaily>,
    #[serde(default)]
    pub daily_units: Units,
    #[serde(default)]
    pub hourly: Option<RadiationHourly>,
    #[serde(default)]
    pub hourly_units: Units,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RadiationDaily {
    pub time: Vec<String>,
    #[serde(default)]
    pub sunrise: Option<Vec<String>>,
    #[serde(default)]
    pub sunset: Option<Vec<String>>,
    /// Seconds.
    #[serde(default)]
    pub daylight_duration: Option<Series>,
    /// Seconds.
    #[serde(default)]
    pub sunshine_duration: Option<Series>,
    #[serde(default)]
    pub shortwave_radiation_sum: Option<Series>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RadiationHourly {
    pub time: Vec<String>,
    #[serde(default)]
    pub shortwave_radiation: Option<Series>,
    #[serde(default)]
    pub direct_radiation: Option<Series>,
    #[serde(default)]
    pub diffuse_radiation: Option<Series>,
    #[serde(default)]
    pub direct_normal_irradiance: Option<Series>,
    #[serde(default)]
    pub global_tilted_irradiance: Option<Series>,
    #[serde(default)]
    pub terrestrial_radiation: Option<Series>,
}

impl RadiationArchive {
    pub(crate) fn check(&self) -> Result<(), String> {
        if let Some(d) = &self.daily {
            check_aligned_times(
                "daily",
                &d.time,
                &[("sunrise", d.sunrise.as_ref()), ("sunset", d.sunset.as_ref())],
            )?;

            check_aligned(
                "daily",
                &d.time,
                &[
                    ("daylight_duration", d.daylight_duration.as_ref()),
                    ("sunshine_duration", d.sunshine_duration.as_ref()),
                    ("shortwave_radiation_sum", d.shortwave_radiation_sum.as_ref()),
                ],
            )?;
        }

        if let Some(h) = &self.hourly {
            check_aligned(
                "hourly",
                &h.time,
                &[
                    ("shortwave_radiation", h.shortwave_radiation.as_ref()),
                    ("direct_radiation", h.direct_radiation.as_ref()),
                    ("diffuse_radiation", h.diffuse_radiation.as_ref()),
                    ("direct_normal_irradiance", h.direct_normal_irradiance.as_ref()),
                    ("global_tilted_irradiance", h.global_tilted_irradiance.as_ref()),
                    ("terrestrial_radiation", h.terrestrial_radiation.as_ref()),
                ],
            )?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn archive(body: serde_json::Value) -> RadiationArchive {
        serde_json::from_value(body).expect("archive should decode")
    }

    #[test]
    fn aligned_archive_passes() {
        let archive = archive(serde_json::json!({
            "latitude": 52.52,
            "longitude": 13.42,
            "daily": {
                "time": ["2026-02-05"],
                "sunrise": ["2026-02-05T07:41"],
                "sunset": ["2026-02-05T16:55"],
                "shortwave_radiation_sum": [2.1]
            },
            "hourly": {
                "time": ["2026-02-05T12:00", "2026-02-05T13:00"],
                "shortwave_radiation": [210.0, null]
            }
        }));

        assert_eq!(archive.check(), Ok(()));
    }

    #[test]
    fn misaligned_sunrise_is_reported() {
        let archive = archive(serde_json::json!({
            "latitude": 52.52,
            "longitude": 13.42,
            "daily": {
                "time": ["2026-02-05", "2026-02-06"],
                "sunrise": ["2026-02-05T07:41"],
                "sunset": ["2026-02-05T16:55", "2026-02-06T16:57"]
            }
        }));

        assert_eq!(
            archive.check().unwrap_err(),
            "daily.sunrise has 1 values but daily.time has 2"
        );
    }

    #[test]
    fn misaligned_hourly_column_is_reported() {
        let archive = archive(serde_json::json!({
            "latitude": 52.52,
            "longitude": 13.42,
            "hourly": {
                "time": ["2026-02-05T12:00", "2026-02-05T13:00"],
                "direct_radiation": [120.0]
            }
        }));

        assert_eq!(
            archive.check().unwrap_err(),
            "hourly.direct_radiation has 1 values but hourly.time has 2"
        );
    }
}
