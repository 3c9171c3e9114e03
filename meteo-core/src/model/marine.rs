use serde::{Deserialize, Serialize};

use super::{GridPoint, Series, Units, check_aligned};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarineForecast {
    #[serde(flatten)]
    pub grid: GridPoint,
    #[serde(default)]
    pub current: Option<MarineCurrent>,
    #[serde(default)]
    pub current_units: Units,
    #[serde(default)]
    pub hourly: Option<MarineHourly>,
    #[serde(default)]
    pub hourly_units: Units,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarineCurrent {
    pub time: String,
    #[serde(default)]
    pub wave_height: Option<f64>,
    #[serde(default)]
    pub sea_surface_temperature: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarineHourly {
    pub time: Vec<String>,
    #[serde(default)]
    pub wave_height: Option<Series>,
    #[serde(default)]
    pub wave_direction: Option<Series>,
    #[serde(default)]
    pub wind_wave_height: Option<Series>,
    #[serde(default)]
    pub wind_wave_direction: Option<Series>,
}

impl MarineForecast {
    pub(crate) fn check(&self) -> Result<(), String> {
        let Some(h) = &self.hourly else { return Ok(()) };
        check_aligned(
            "hourly",
            &h.time,
            &[
                ("wave_height", h.wave_height.as_ref()),
                ("wave_direction", h.wave_direction.as_ref()),
                ("wind_wave_height", h.wind_wave_height.as_ref()),
                ("wind_wave_direction", h.wind_wave_direction.as_ref()),
            ],
        )
    }
}
