use serde::{Deserialize, Serialize};

use super::{GridPoint, Series, Units, check_aligned, check_aligned_times};

/// General forecast: current conditions plus a daily outlook.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherForecast {
    #[serde(flatten)]
    pub grid: GridPoint,
    #[serde(default)]
    pub current: Option<WeatherCurrent>,
    #[serde(default)]
    pub current_units: Units,
    #[serde(default)]
    pub daily: Option<WeatherDaily>,
    #[serde(default)]
    pub daily_units: Units,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherCurrent {
    pub time: String,
    #[serde(default)]
    pub temperature_2m: Option<f64>,
    #[serde(default)]
    pub relative_humidity_2m: Option<f64>,
    /// 1 during daylight, 0 at night.
    #[serde(default)]
    pub is_day: Option<u8>,
    #[serde(default)]
    pub wind_speed_10m: Option<f64>,
    #[serde(default)]
    pub wind_direction_10m: Option<f64>,
    #[serde(default)]
    pub rain: Option<f64>,
    #[serde(default)]
    pub precipitation: Option<f64>,
    #[serde(default)]
    pub pressure_msl: Option<f64>,
    #[serde(default)]
    pub surface_pressure: Option<f64>,
    #[serde(default)]
    pub cloud_cover: Option<f64>,
    /// WMO weather interpretation code.
    #[serde(default)]
    pub weather_code: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherDaily {
    pub time: Vec<String>,
    #[serde(default)]
    pub sunrise: Option<Vec<String>>,
    #[serde(default)]
    pub sunset: Option<Vec<String>>,
    #[serde(default)]
    pub weather_code: Option<Series>,
    #[serde(default)]
    pub temperature_2m_max: Option<Series>,
    #[serde(default)]
    pub temperature_2m_min: Option<Series>,
    #[serde(default)]
    pub uv_index_max: Option<Series>,
}

impl WeatherForecast {
    pub(crate) fn check(&self) -> Result<(), String> {
        let Some(d) = &self.daily else { return Ok(()) };

        check_aligned_times(
            "daily",
            &d.time,
            &[("sunrise", d.sunrise.as_ref()), ("sunset", d.sunset.as_ref())],
        )?;

        check_aligned(
            "daily",
            &d.time,
            &[
                ("weather_code", d.weather_code.as_ref()),
                ("temperature_2m_max", d.temperature_2m_max.as_ref()),
                ("temperature_2m_min", d.temperature_2m_min.as_ref()),
                ("uv_index_max", d.uv_index_max.as_ref()),
            ],
        )
    }
}

/// Plain-language reading of a WMO weather interpretation code.
pub fn describe_weather_code(code: f64) -> &'static str {
    if code.fract() != 0.0 || !(0.0..=99.0).contains(&code) {
        return "Unknown";
    }
    match code as u8 {
        0 => "Clear sky",
        1 => "Mainly clear",
        2 => "Partly cloudy",
        3 => "Overcast",
        45 | 48 => "Fog",
        51 | 53 | 55 => "Drizzle",
        56 | 57 => "Freezing drizzle",
        61 | 63 | 65 => "Rain",
        66 | 67 => "Freezing rain",
        71 | 73 | 75 => "Snow",
        77 => "Snow grains",
        80..=82 => "Rain showers",
        85 | 86 => "Snow showers",
        95 => "Thunderstorm",
        96 | 99 => "Thunderstorm with hail",
        _ => "Unknown",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weather_codes_map_to_descriptions() {
        assert_eq!(describe_weather_code(0.0), "Clear sky");
        assert_eq!(describe_weather_code(81.0), "Rain showers");
        assert_eq!(describe_weather_code(99.0), "Thunderstorm with hail");
        assert_eq!(describe_weather_code(42.0), "Unknown");
        assert_eq!(describe_weather_code(2.5), "Unknown");
        assert_eq!(describe_weather_code(-1.0), "Unknown");
    }

    #[test]
    fn misaligned_sunrise_is_reported() {
        let forecast: WeatherForecast = serde_json::from_value(serde_json::json!({
            "latitude": 52.52,
            "longitude": 13.42,
            "daily": {
                "time": ["2026-02-05", "2026-02-06"],
                "sunrise": ["2026-02-05T07:41"]
            }
        }))
        .expect("forecast should decode");

        assert_eq!(
            forecast.check().unwrap_err(),
            "daily.sunrise has 1 values but daily.time has 2"
        );
    }
}
