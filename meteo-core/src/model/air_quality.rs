use serde::{Deserialize, Serialize};

use super::{GridPoint, Series, Units, check_aligned};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AirQualityForecast {
    #[serde(flatten)]
    pub grid: GridPoint,
    #[serde(default)]
    pub current: Option<AirQualityCurrent>,
    #[serde(default)]
    pub current_units: Units,
    #[serde(default)]
    pub hourly: Option<AirQualityHourly>,
    #[serde(default)]
    pub hourly_units: Units,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AirQualityCurrent {
    pub time: String,
    #[serde(default)]
    pub ozone: Option<f64>,
    #[serde(default)]
    pub uv_index: Option<f64>,
    #[serde(default)]
    pub uv_index_clear_sky: Option<f64>,
    #[serde(default)]
    pub european_aqi: Option<f64>,
    #[serde(default)]
    pub us_aqi: Option<f64>,
    #[serde(default)]
    pub carbon_monoxide: Option<f64>,
    #[serde(default)]
    pub nitrogen_dioxide: Option<f64>,
    #[serde(default)]
    pub sulphur_dioxide: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AirQualityHourly {
    pub time: Vec<String>,
    #[serde(default)]
    pub pm10: Option<Series>,
    #[serde(default)]
    pub pm2_5: Option<Series>,
}

impl AirQualityForecast {
    pub(crate) fn check(&self) -> Result<(), String> {
        let Some(h) = &self.hourly else { return Ok(()) };
        check_aligned(
            "hourly",
            &h.time,
            &[("pm10", h.pm10.as_ref()), ("pm2_5", h.pm2_5.as_ref())],
        )
    }
}
