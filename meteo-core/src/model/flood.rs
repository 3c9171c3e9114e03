use serde::{Deserialize, Serialize};

use super::{GridPoint, Series, Units, check_aligned};

/// River discharge forecast with ensemble statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FloodForecast {
    #[serde(flatten)]
    pub grid: GridPoint,
    #[serde(default)]
    pub daily: Option<FloodDaily>,
    #[serde(default)]
    pub daily_units: Units,
}

/// Discharge values are in m³/s.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FloodDaily {
    pub time: Vec<String>,
    #[serde(default)]
    pub river_discharge: Option<Series>,
    #[serde(default)]
    pub river_discharge_mean: Option<Series>,
    #[serde(default)]
    pub river_discharge_median: Option<Series>,
    #[serde(default)]
    pub river_discharge_max: Option<Series>,
    #[serde(default)]
    pub river_discharge_min: Option<Series>,
    #[serde(default)]
    pub river_discharge_p25: Option<Series>,
    #[serde(default)]
    pub river_discharge_p75: Option<Series>,
}

impl FloodDaily {
    /// All discharge columns in display order, paired with their field names.
    pub fn columns(&self) -> [(&'static str, Option<&Series>); 7] {
        [
            ("river_discharge", self.river_discharge.as_ref()),
            ("river_discharge_mean", self.river_discharge_mean.as_ref()),
            ("river_discharge_median", self.river_discharge_median.as_ref()),
            ("river_discharge_max", self.river_discharge_max.as_ref()),
            ("river_discharge_min", self.river_discharge_min.as_ref()),
            ("river_discharge_p25", self.river_discharge_p25.as_ref()),
            ("river_discharge_p75", self.river_discharge_p75.as_ref()),
        ]
    }
}

impl FloodForecast {
    pub(crate) fn check(&self) -> Result<(), String> {
        let Some(d) = &self.daily else { return Ok(()) };
        check_aligned("daily", &d.time, &d.columns())
    }
}
