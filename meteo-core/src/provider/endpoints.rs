//! Static request table: which host, path and fixed parameters each feature uses.

use super::FeatureKind;
use crate::{DomainQuery, config::ClimateConfig};

/// Open-Meteo serves each product family from its own host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Host {
    Geocoding,
    Forecast,
    Marine,
    AirQuality,
    Satellite,
    Flood,
    Climate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Endpoint {
    pub host: Host,
    pub path: &'static str,
    /// Requested fields, sent as-is after the coordinates.
    pub params: &'static [(&'static str, &'static str)],
    /// Page under <https://open-meteo.com/en/docs> describing the endpoint.
    pub docs_page: &'static str,
}

pub const GEOCODING: Endpoint = Endpoint {
    host: Host::Geocoding,
    path: "/v1/search",
    params: &[("format", "json")],
    docs_page: "geocoding-api",
};

pub const CLIMATE_MODELS: &[&str] = &[
    "CMCC_CM2_VHR4",
    "FGOALS_f3_H",
    "HiRAM_SIT_HR",
    "MRI_AGCM3_2_S",
    "EC_Earth3P_HR",
    "MPI_ESM1_2_XR",
    "NICAM16_8S",
];

impl FeatureKind {
    pub fn endpoint(&self) -> Endpoint {
        match self {
            FeatureKind::Marine => Endpoint {
                host: Host::Marine,
                path: "/v1/marine",
                params: &[
                    ("current", "wave_height,sea_surface_temperature"),
                    (
                        "hourly",
                        "wave_height,wave_direction,wind_wave_height,wind_wave_direction",
                    ),
                ],
                docs_page: "marine-weather-api",
            },
            FeatureKind::Weather => Endpoint {
                host: Host::Forecast,
                path: "/v1/forecast",
                params: &[
                    (
                        "daily",
                        "sunrise,sunset,weather_code,temperature_2m_max,temperature_2m_min,\
                         uv_index_max",
                    ),
                    (
                        "current",
                        "temperature_2m,relative_humidity_2m,is_day,wind_speed_10m,\
                         wind_direction_10m,rain,precipitation,pressure_msl,surface_pressure,\
                         cloud_cover,weather_code",
                    ),
                ],
                docs_page: "",
            },
            FeatureKind::AirQuality => Endpoint {
                host: Host::AirQuality,
                path: "/v1/air-quality",
                params: &[
                    ("hourly", "pm10,pm2_5"),
                    (
                        "current",
                        "ozone,uv_index,uv_index_clear_sky,european_aqi,us_aqi,carbon_monoxide,\
                         nitrogen_dioxide,sulphur_dioxide",
                    ),
                ],
                docs_page: "air-quality-api",
            },
            FeatureKind::Radiation => Endpoint {
                host: Host::Satellite,
                path: "/v1/archive",
                params: &[
                    (
                        "daily",
                        "sunrise,sunset,daylight_duration,sunshine_duration,\
                         shortwave_radiation_sum",
                    ),
                    (
                        "hourly",
                        "shortwave_radiation,direct_radiation,diffuse_radiation,\
                         direct_normal_irradiance,global_tilted_irradiance,terrestrial_radiation",
                    ),
                    ("models", "satellite_radiation_seamless"),
                ],
                docs_page: "satellite-radiation-api",
            },
            FeatureKind::Elevation => Endpoint {
                host: Host::Forecast,
                path: "/v1/elevation",
                params: &[],
                docs_page: "elevation-api",
            },
            FeatureKind::Flood => Endpoint {
                host: Host::Flood,
                path: "/v1/flood",
                params: &[(
                    "daily",
                    "river_discharge,river_discharge_mean,river_discharge_median,\
                     river_discharge_max,river_discharge_min,river_discharge_p25,\
                     river_discharge_p75",
                )],
                docs_page: "flood-api",
            },
            // start_date, end_date and models come from configuration.
            FeatureKind::Climate => Endpoint {
                host: Host::Climate,
                path: "/v1/climate",
                params: &[(
                    "daily",
                    "temperature_2m_mean,wind_speed_10m_mean,cloud_cover_mean,\
                     shortwave_radiation_sum,relative_humidity_2m_mean,dew_point_2m_mean,\
                     rain_sum,soil_moisture_0_to_10cm_mean",
                )],
                docs_page: "climate-api",
            },
        }
    }
}

/// Query string for a feature request: coordinates, the climate range and
/// models from configuration, then the static field lists.
pub fn request_params(query: &DomainQuery, climate: &ClimateConfig) -> Vec<(&'static str, String)> {
    let mut params = vec![
        ("latitude", query.latitude.to_string()),
        ("longitude", query.longitude.to_string()),
    ];

    if query.kind == FeatureKind::Climate {
        params.push(("start_date", climate.start_date.format("%Y-%m-%d").to_string()));
        params.push(("end_date", climate.end_date.format("%Y-%m-%d").to_string()));
        params.push(("models", climate.models.join(",")));
    }

    params.extend(query.kind.endpoint().params.iter().map(|(k, v)| (*k, v.to_string())));
    params
}

/// Link to the Open-Meteo documentation page preloaded with the same request.
pub fn docs_url(query: &DomainQuery, climate: &ClimateConfig) -> String {
    let page = query.kind.endpoint().docs_page;
    let params = request_params(query, climate)
        .into_iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&");

    if page.is_empty() {
        format!("https://open-meteo.com/en/docs?{params}")
    } else {
        format!("https://open-meteo.com/en/docs/{page}?{params}")
    }
}
