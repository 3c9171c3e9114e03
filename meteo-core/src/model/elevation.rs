use serde::{Deserialize, Serialize};

/// Digital elevation model lookup; one value per requested coordinate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElevationData {
    pub elevation: Vec<f64>,
}

impl ElevationData {
    /// Elevation in meters for the single coordinate that was queried.
    pub fn meters(&self) -> Option<f64> {
        self.elevation.first().copied()
    }

    pub(crate) fn check(&self) -> Result<(), String> {
        if self.elevation.is_empty() {
            return Err("Elevation data not available".to_string());
        }
        Ok(())
    }
}
