use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{GridPoint, Series, Units, check_aligned};

/// Daily climate-model projections.
///
/// When several models are requested the upstream suffixes every variable
/// with the model name (`temperature_2m_mean_CMCC_CM2_VHR4`), so the daily
/// block is kept as a map and looked up through [`ClimateDaily::series`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClimateProjection {
    #[serde(flatten)]
    pub grid: GridPoint,
    #[serde(default)]
    pub daily: Option<ClimateDaily>,
    #[serde(default)]
    pub daily_units: Units,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClimateDaily {
    pub time: Vec<String>,
    #[serde(flatten)]
    pub values: BTreeMap<String, Series>,
}

impl ClimateDaily {
    /// Series of `variable` for `model`; falls back to the unsuffixed column,
    /// which is what the upstream returns for a single-model request.
    pub fn series(&self, variable: &str, model: &str) -> Option<&Series> {
        self.values
            .get(&format!("{variable}_{model}"))
            .or_else(|| self.values.get(variable))
    }

    /// Models that returned a column for `variable`, in key order.
    pub fn models_for(&self, variable: &str) -> Vec<&str> {
        let prefix = format!("{variable}_");
        self.values
            .keys()
            .filter_map(|k| k.strip_prefix(&prefix))
            .filter(|m| m.chars().next().is_some_and(|c| c.is_ascii_uppercase()))
            .collect()
    }
}

impl ClimateProjection {
    /// Unit for `variable`; unit maps are keyed per model like the values.
    pub fn unit(&self, variable: &str, model: &str) -> Option<&str> {
        self.daily_units
            .get(&format!("{variable}_{model}"))
            .or_else(|| self.daily_units.get(variable))
    }

    pub(crate) fn check(&self) -> Result<(), String> {
        let Some(d) = &self.daily else { return Ok(()) };
        let columns: Vec<_> = d.values.iter().map(|(k, v)| (k.as_str(), Some(v))).collect();
        check_aligned("daily", &d.time, &columns)
    }
}
