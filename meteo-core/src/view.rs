//! Turns decoded results into what a panel shows: labeled cards, a chart
//! of the time series, a documentation link and a map marker.
//!
//! Nothing here draws anything; front ends decide how cards and charts look.

use chrono::{NaiveDate, NaiveDateTime};
use std::fmt;

use crate::{
    DomainQuery, DomainResult, LocationCandidate,
    config::ClimateConfig,
    model::{
        AirQualityForecast, ClimateProjection, ElevationData, FloodForecast, GridPoint,
        MarineForecast, RadiationArchive, Series, WeatherForecast, weather::describe_weather_code,
    },
    provider::{FeatureKind, endpoints},
    workflow::Detail,
};

/// Placeholder for a card whose value is absent.
pub const NO_DATA: &str = "No Data Found";

#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    pub label: String,
    pub value: Option<String>,
}

impl Card {
    pub fn new(label: impl Into<String>, value: Option<String>) -> Self {
        Self { label: label.into(), value }
    }

    pub fn number(label: impl Into<String>, value: Option<f64>) -> Self {
        Self::new(label, value.map(|v| v.to_string()))
    }

    pub fn text(label: impl Into<String>, value: Option<&str>) -> Self {
        Self::new(label, value.map(str::to_string))
    }

    pub fn display_value(&self) -> &str {
        self.value.as_deref().unwrap_or(NO_DATA)
    }
}

/// Average of a series for summary cards.
///
/// A series the upstream did not return at all is kept apart from one that
/// came back without any usable value. `null` entries are skipped, not
/// counted as zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SeriesSummary {
    Absent,
    Empty,
    Mean(f64),
}

impl SeriesSummary {
    pub fn of(series: Option<&Series>) -> Self {
        let Some(series) = series else {
            return SeriesSummary::Absent;
        };

        let values: Vec<f64> = series.iter().flatten().copied().collect();
        if values.is_empty() {
            return SeriesSummary::Empty;
        }
        SeriesSummary::Mean(values.iter().sum::<f64>() / values.len() as f64)
    }

    pub fn with_unit(&self, unit: &str) -> String {
        match self {
            SeriesSummary::Mean(_) if !unit.is_empty() => format!("{self} {unit}"),
            _ => self.to_string(),
        }
    }
}

impl fmt::Display for SeriesSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeriesSummary::Absent => f.write_str(NO_DATA),
            SeriesSummary::Empty => f.write_str("No Data"),
            SeriesSummary::Mean(mean) => write!(f, "{mean:.2}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub label: String,
    pub values: Series,
}

/// Line chart over one time axis. Every dataset has one value per label.
#[derive(Debug, Clone, PartialEq)]
pub struct Chart {
    pub title: String,
    pub x_title: String,
    pub y_title: String,
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

impl Chart {
    /// `None` when there is no time axis to plot against.
    fn build(
        title: &str,
        x_title: &str,
        y_title: &str,
        time: &[String],
        datasets: &[(&str, Option<&Series>)],
    ) -> Option<Self> {
        if time.is_empty() {
            return None;
        }

        Some(Chart {
            title: title.to_string(),
            x_title: x_title.to_string(),
            y_title: y_title.to_string(),
            labels: time.iter().map(|t| time_label(t)).collect(),
            datasets: datasets
                .iter()
                .filter_map(|(label, values)| {
                    values.map(|v| Dataset { label: label.to_string(), values: v.clone() })
                })
                .collect(),
        })
    }
}

/// Hourly stamps become `05 Feb 14:00`, daily stamps stay `2026-02-05`.
pub fn time_label(raw: &str) -> String {
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M") {
        return dt.format("%d %b %H:%M").to_string();
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.format("%Y-%m-%d").to_string();
    }
    raw.to_string()
}

#[derive(Debug, Clone, PartialEq)]
pub struct MapMarker {
    pub latitude: f64,
    pub longitude: f64,
    pub label: String,
}

impl MapMarker {
    pub fn osm_url(&self) -> String {
        format!(
            "https://www.openstreetmap.org/?mlat={lat}&mlon={lon}#map=12/{lat}/{lon}",
            lat = self.latitude,
            lon = self.longitude
        )
    }
}

/// Everything a detail panel renders for one selection.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailView {
    pub title: String,
    pub cards: Vec<Card>,
    /// Set instead of cards when the fetch failed.
    pub notice: Option<String>,
    /// Upstream reason for the failure, shown under the notice.
    pub reason: Option<String>,
    pub chart: Option<Chart>,
    pub docs_url: Option<String>,
    pub marker: MapMarker,
}

/// Fixed message shown in place of a failed fetch.
pub fn unavailable_message(kind: FeatureKind) -> &'static str {
    match kind {
        FeatureKind::Marine => "No Marine Weather Found.",
        FeatureKind::Weather => "No Weather Forecast Found.",
        FeatureKind::AirQuality => "No Air Quality Data Found.",
        FeatureKind::Radiation => "No Radiation Data Found.",
        FeatureKind::Elevation => "No Elevation Data Found.",
        FeatureKind::Flood => "No Flood Data Found.",
        FeatureKind::Climate => "No Climate Data Found.",
    }
}

fn title(kind: FeatureKind) -> &'static str {
    match kind {
        FeatureKind::Marine => "Marine Weather",
        FeatureKind::Weather => "Weather Forecast",
        FeatureKind::AirQuality => "Air Quality Details",
        FeatureKind::Radiation => "Satellite Radiation Summary",
        FeatureKind::Elevation => "Elevation Data",
        FeatureKind::Flood => "Flood Forecast Summary",
        FeatureKind::Climate => "Climate Change Summary",
    }
}

impl DetailView {
    pub fn for_feature(
        kind: FeatureKind,
        selected: &LocationCandidate,
        detail: &Detail<DomainResult>,
        climate: &ClimateConfig,
    ) -> Self {
        let result = match detail {
            Detail::Loaded(result) => result,
            Detail::Unavailable { reason } => {
                return DetailView {
                    title: title(kind).to_string(),
                    cards: Vec::new(),
                    notice: Some(unavailable_message(kind).to_string()),
                    reason: Some(reason.clone()),
                    chart: None,
                    docs_url: None,
                    marker: candidate_marker(selected),
                };
            }
        };
        debug_assert_eq!(kind, result.kind(), "detail belongs to another panel");

        let (cards, chart) = match result {
            DomainResult::Marine(r) => marine(r),
            DomainResult::Weather(r) => weather(r),
            DomainResult::AirQuality(r) => air_quality(r),
            DomainResult::Radiation(r) => radiation(r),
            DomainResult::Elevation(r) => (elevation(selected, r), None),
            DomainResult::Flood(r) => flood(r),
            DomainResult::Climate(r) => climate_projection(r, climate),
        };

        let marker = match result.grid_point() {
            Some(grid) => MapMarker {
                latitude: grid.latitude,
                longitude: grid.longitude,
                label: selected.name.clone(),
            },
            None => candidate_marker(selected),
        };

        DetailView {
            title: title(kind).to_string(),
            cards,
            notice: None,
            reason: None,
            chart,
            docs_url: Some(endpoints::docs_url(
                &DomainQuery::for_candidate(kind, selected),
                climate,
            )),
            marker,
        }
    }

    /// The geocoding panel's detail: the candidate's own metadata.
    pub fn for_location(candidate: &LocationCandidate) -> Self {
        DetailView {
            title: "Geocoding Details".to_string(),
            cards: vec![
                Card::new("ID", candidate.id.map(|id| id.to_string())),
                Card::text("Name", Some(&candidate.name)),
                Card::number("Latitude", Some(candidate.latitude)),
                Card::number("Longitude", Some(candidate.longitude)),
                Card::new("Elevation", candidate.elevation.map(|e| format!("{e} m"))),
                Card::text("Country", candidate.country.as_deref()),
                Card::text("Country Code", candidate.country_code.as_deref()),
                Card::text("Timezone", candidate.timezone.as_deref()),
                Card::new("Population", candidate.population.map(|p| p.to_string())),
            ],
            notice: None,
            reason: None,
            chart: None,
            docs_url: None,
            marker: candidate_marker(candidate),
        }
    }
}

fn candidate_marker(candidate: &LocationCandidate) -> MapMarker {
    MapMarker {
        latitude: candidate.latitude,
        longitude: candidate.longitude,
        label: candidate.name.clone(),
    }
}

fn grid_cards(grid: &GridPoint) -> Vec<Card> {
    vec![
        Card::number("Latitude", Some(grid.latitude)),
        Card::number("Longitude", Some(grid.longitude)),
        Card::text("Timezone", grid.timezone.as_deref()),
    ]
}

fn marine(r: &MarineForecast) -> (Vec<Card>, Option<Chart>) {
    let current = r.current.as_ref();
    let units = &r.current_units;

    let cards = vec![
        Card::new(
            "Wave Height",
            units.tag("wave_height", current.and_then(|c| c.wave_height), "m"),
        ),
        Card::new(
            "Sea Surface Temp",
            units.tag(
                "sea_surface_temperature",
                current.and_then(|c| c.sea_surface_temperature),
                "°C",
            ),
        ),
        Card::text("Time", current.map(|c| c.time.as_str())),
    ];

    let chart = r.hourly.as_ref().and_then(|h| {
        Chart::build(
            "Hourly Marine Forecast",
            "Time",
            "Values",
            &h.time,
            &[
                ("Wave Height (m)", h.wave_height.as_ref()),
                ("Wave Direction (°)", h.wave_direction.as_ref()),
                ("Wind Wave Height (m)", h.wind_wave_height.as_ref()),
                ("Wind Wave Direction (°)", h.wind_wave_direction.as_ref()),
            ],
        )
    });

    (cards, chart)
}

fn weather(r: &WeatherForecast) -> (Vec<Card>, Option<Chart>) {
    let c = r.current.as_ref();
    let units = &r.current_units;
    let tagged = |label: &str, field: &str, value: Option<f64>| {
        Card::new(label, units.tag(field, value, ""))
    };

    let mut cards = grid_cards(&r.grid);
    cards.extend([
        Card::text("Time", c.map(|c| c.time.as_str())),
        tagged("Temperature", "temperature_2m", c.and_then(|c| c.temperature_2m)),
        tagged("Humidity", "relative_humidity_2m", c.and_then(|c| c.relative_humidity_2m)),
        tagged("Wind Speed", "wind_speed_10m", c.and_then(|c| c.wind_speed_10m)),
        tagged("Wind Direction", "wind_direction_10m", c.and_then(|c| c.wind_direction_10m)),
        tagged("Rain", "rain", c.and_then(|c| c.rain)),
        tagged("Precipitation", "precipitation", c.and_then(|c| c.precipitation)),
        tagged("Pressure MSL", "pressure_msl", c.and_then(|c| c.pressure_msl)),
        tagged("Surface Pressure", "surface_pressure", c.and_then(|c| c.surface_pressure)),
        tagged("Cloud Cover", "cloud_cover", c.and_then(|c| c.cloud_cover)),
        tagged("Weather Code", "weather_code", c.and_then(|c| c.weather_code)),
        Card::text(
            "Conditions",
            c.and_then(|c| c.weather_code).map(describe_weather_code),
        ),
        Card::text(
            "Daylight",
            c.and_then(|c| c.is_day).map(|d| if d == 1 { "Day" } else { "Night" }),
        ),
    ]);

    let chart = r.daily.as_ref().and_then(|d| {
        Chart::build(
            "7-Day Weather Forecast",
            "Date",
            "Values",
            &d.time,
            &[
                ("Max Temp (°C)", d.temperature_2m_max.as_ref()),
                ("Min Temp (°C)", d.temperature_2m_min.as_ref()),
                ("UV Index", d.uv_index_max.as_ref()),
                ("Weather Code", d.weather_code.as_ref()),
            ],
        )
    });

    (cards, chart)
}

fn air_quality(r: &AirQualityForecast) -> (Vec<Card>, Option<Chart>) {
    let c = r.current.as_ref();
    let units = &r.current_units;
    let tagged = |label: &str, field: &str, value: Option<f64>| {
        Card::new(label, units.tag(field, value, ""))
    };

    let cards = vec![
        Card::number("Latitude", Some(r.grid.latitude)),
        Card::number("Longitude", Some(r.grid.longitude)),
        Card::text("Time", c.map(|c| c.time.as_str())),
        tagged("Ozone", "ozone", c.and_then(|c| c.ozone)),
        tagged("UV Index", "uv_index", c.and_then(|c| c.uv_index)),
        tagged("UV Index Clear Sky", "uv_index_clear_sky", c.and_then(|c| c.uv_index_clear_sky)),
        tagged("European AQI", "european_aqi", c.and_then(|c| c.european_aqi)),
        tagged("US AQI", "us_aqi", c.and_then(|c| c.us_aqi)),
        tagged("Carbon Monoxide", "carbon_monoxide", c.and_then(|c| c.carbon_monoxide)),
        tagged("Nitrogen Dioxide", "nitrogen_dioxide", c.and_then(|c| c.nitrogen_dioxide)),
        tagged("Sulphur Dioxide", "sulphur_dioxide", c.and_then(|c| c.sulphur_dioxide)),
    ];

    let chart = r.hourly.as_ref().and_then(|h| {
        Chart::build(
            "Air Quality Forecast",
            "Time",
            "Concentration (μg/m³)",
            &h.time,
            &[
                ("PM10 (μg/m³)", h.pm10.as_ref()),
                ("PM2.5 (μg/m³)", h.pm2_5.as_ref()),
            ],
        )
    });

    (cards, chart)
}

fn radiation(r: &RadiationArchive) -> (Vec<Card>, Option<Chart>) {
    let d = r.daily.as_ref();
    let first = |s: Option<&Series>| s.and_then(|s| s.first().copied().flatten());

    let cards = vec![
        Card::number("Latitude", Some(r.grid.latitude)),
        Card::number("Longitude", Some(r.grid.longitude)),
        Card::new("Elevation", r.grid.elevation.map(|e| format!("{e} m"))),
        Card::text("Timezone", r.grid.timezone.as_deref()),
        Card::text("Sunrise", first_time(d.and_then(|d| d.sunrise.as_ref()))),
        Card::text("Sunset", first_time(d.and_then(|d| d.sunset.as_ref()))),
        Card::new(
            "Daylight Duration",
            first(d.and_then(|d| d.daylight_duration.as_ref())).map(|v| format!("{v} s")),
        ),
        Card::new(
            "Sunshine Duration",
            first(d.and_then(|d| d.sunshine_duration.as_ref())).map(|v| format!("{v} s")),
        ),
        Card::new(
            "Shortwave Radiation Sum",
            first(d.and_then(|d| d.shortwave_radiation_sum.as_ref())).map(|v| format!("{v} MJ/m²")),
        ),
    ];

    let chart = r.hourly.as_ref().and_then(|h| {
        Chart::build(
            "Hourly Satellite Radiation",
            "Time",
            "Radiation (W/m²)",
            &h.time,
            &[
                ("Shortwave Radiation", h.shortwave_radiation.as_ref()),
                ("Direct Normal Irradiance", h.direct_normal_irradiance.as_ref()),
                ("Diffuse Radiation", h.diffuse_radiation.as_ref()),
                ("Terrestrial Radiation", h.terrestrial_radiation.as_ref()),
            ],
        )
    });

    (cards, chart)
}

fn first_time(column: Option<&Vec<String>>) -> Option<&str> {
    column.and_then(|c| c.first()).map(String::as_str)
}

fn elevation(selected: &LocationCandidate, r: &ElevationData) -> Vec<Card> {
    vec![
        Card::number("Latitude", Some(selected.latitude)),
        Card::number("Longitude", Some(selected.longitude)),
        Card::new("Elevation", r.meters().map(|m| format!("{m} m"))),
    ]
}

const FLOOD_LABELS: [&str; 7] = [
    "River Discharge",
    "Discharge Mean",
    "Discharge Median",
    "Discharge Max",
    "Discharge Min",
    "Discharge P25",
    "Discharge P75",
];

fn flood(r: &FloodForecast) -> (Vec<Card>, Option<Chart>) {
    let mut cards = grid_cards(&r.grid);

    let Some(d) = r.daily.as_ref() else {
        cards.extend(
            FLOOD_LABELS
                .iter()
                .map(|label| Card::new(*label, Some(SeriesSummary::Absent.to_string()))),
        );
        return (cards, None);
    };

    let columns = d.columns();
    for (label, (_, series)) in FLOOD_LABELS.iter().zip(columns.iter()) {
        cards.push(Card::new(*label, Some(SeriesSummary::of(*series).with_unit("m³/s"))));
    }

    let datasets: Vec<(&str, Option<&Series>)> = FLOOD_LABELS
        .iter()
        .zip(columns.iter())
        .map(|(label, (_, series))| (*label, *series))
        .collect();

    let chart = Chart::build("Daily River Discharge", "Date", "Discharge (m³/s)", &d.time, &datasets);
    (cards, chart)
}

/// Cards summarise the first two configured models, the chart compares mean
/// temperature across all of them.
fn climate_projection(r: &ClimateProjection, climate: &ClimateConfig) -> (Vec<Card>, Option<Chart>) {
    const VARIABLES: [(&str, &str, &str); 4] = [
        ("Temp Mean", "temperature_2m_mean", "°C"),
        ("Wind Mean", "wind_speed_10m_mean", "km/h"),
        ("Cloud Cover", "cloud_cover_mean", "%"),
        ("Humidity", "relative_humidity_2m_mean", "%"),
    ];

    let mut cards = grid_cards(&r.grid);
    cards.push(Card::new("Elevation", r.grid.elevation.map(|e| format!("{e} m"))));

    let daily = r.daily.as_ref();
    for model in climate.models.iter().take(2) {
        let short = model.split('_').next().unwrap_or(model.as_str());
        for (label, variable, fallback) in VARIABLES {
            let series = daily.and_then(|d| d.series(variable, model));
            let unit = r.unit(variable, model).unwrap_or(fallback);
            cards.push(Card::new(
                format!("{label} {short}"),
                Some(SeriesSummary::of(series).with_unit(unit)),
            ));
        }
    }

    let chart = daily.and_then(|d| {
        let datasets: Vec<(&str, Option<&Series>)> = climate
            .models
            .iter()
            .map(|m| (m.as_str(), d.series("temperature_2m_mean", m)))
            .collect();
        Chart::build(
            "Climate Model Temperature Trends",
            "Date",
            "Temperature (°C)",
            &d.time,
            &datasets,
        )
    });

    (cards, chart)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::NetworkError;

    fn berlin() -> LocationCandidate {
        serde_json::from_value(serde_json::json!({
            "id": 2950159,
            "name": "Berlin",
            "latitude": 52.52437,
            "longitude": 13.41053,
            "elevation": 74.0,
            "country_code": "DE",
            "country": "Germany",
            "timezone": "Europe/Berlin",
            "population": 3426354
        }))
        .expect("candidate should decode")
    }

    fn card<'a>(view: &'a DetailView, label: &str) -> &'a str {
        view.cards
            .iter()
            .find(|c| c.label == label)
            .map(Card::display_value)
            .unwrap_or_else(|| panic!("no card labeled {label}"))
    }

    fn decode(kind: FeatureKind, body: serde_json::Value) -> Detail<DomainResult> {
        Detail::Loaded(DomainResult::decode(kind, &body.to_string()).expect("body should decode"))
    }

    #[test]
    fn summary_distinguishes_absent_empty_and_values() {
        assert_eq!(SeriesSummary::of(None), SeriesSummary::Absent);
        assert_eq!(SeriesSummary::of(Some(&vec![])), SeriesSummary::Empty);
        assert_eq!(SeriesSummary::of(Some(&vec![None, None])), SeriesSummary::Empty);
        assert_eq!(
            SeriesSummary::of(Some(&vec![Some(1.0), None, Some(2.0)])),
            SeriesSummary::Mean(1.5)
        );

        assert_eq!(SeriesSummary::Absent.with_unit("m³/s"), "No Data Found");
        assert_eq!(SeriesSummary::Empty.with_unit("m³/s"), "No Data");
        assert_eq!(SeriesSummary::Mean(12.345).with_unit("m³/s"), "12.35 m³/s");
    }

    #[test]
    fn time_labels_follow_resolution() {
        assert_eq!(time_label("2026-02-05T14:00"), "05 Feb 14:00");
        assert_eq!(time_label("2026-02-05"), "2026-02-05");
        assert_eq!(time_label("soon"), "soon");
    }

    #[test]
    fn unavailable_detail_renders_fixed_message() {
        let detail = Detail::Unavailable { reason: "HTTP 500".into() };
        let view =
            DetailView::for_feature(FeatureKind::Marine, &berlin(), &detail, &ClimateConfig::default());

        assert_eq!(view.notice.as_deref(), Some("No Marine Weather Found."));
        assert_eq!(view.reason.as_deref(), Some("HTTP 500"));
        assert!(view.cards.is_empty());
        assert!(view.chart.is_none());
        assert_eq!(view.marker.label, "Berlin");
    }

    #[test]
    fn marine_cards_fall_back_to_default_units() {
        let detail = decode(
            FeatureKind::Marine,
            serde_json::json!({
                "latitude": 54.5,
                "longitude": 10.5,
                "current": {"time": "2026-02-05T14:00", "wave_height": 0.42},
                "hourly": {
                    "time": ["2026-02-05T14:00", "2026-02-05T15:00"],
                    "wave_height": [0.42, 0.5],
                    "wave_direction": [270, 265]
                }
            }),
        );
        let view =
            DetailView::for_feature(FeatureKind::Marine, &berlin(), &detail, &ClimateConfig::default());

        assert_eq!(card(&view, "Wave Height"), "0.42 m");
        assert_eq!(card(&view, "Sea Surface Temp"), NO_DATA);
        assert_eq!(card(&view, "Time"), "2026-02-05T14:00");

        let chart = view.chart.expect("hourly data gives a chart");
        assert_eq!(chart.labels, vec!["05 Feb 14:00", "05 Feb 15:00"]);
        let labels: Vec<_> = chart.datasets.iter().map(|d| d.label.as_str()).collect();
        assert_eq!(labels, vec!["Wave Height (m)", "Wave Direction (°)"]);
        assert_eq!(view.marker.latitude, 54.5);
    }

    #[test]
    fn weather_cards_are_unit_tagged() {
        let detail = decode(
            FeatureKind::Weather,
            serde_json::json!({
                "latitude": 52.52,
                "longitude": 13.42,
                "timezone": "GMT",
                "current_units": {"temperature_2m": "°C", "relative_humidity_2m": "%"},
                "current": {
                    "time": "2026-02-05T14:00",
                    "temperature_2m": 3.4,
                    "relative_humidity_2m": 81,
                    "is_day": 1,
                    "weather_code": 61
                },
                "daily": {
                    "time": ["2026-02-05", "2026-02-06"],
                    "temperature_2m_max": [4.0, 5.5],
                    "temperature_2m_min": [-1.0, 0.5]
                }
            }),
        );
        let view =
            DetailView::for_feature(FeatureKind::Weather, &berlin(), &detail, &ClimateConfig::default());

        assert_eq!(view.title, "Weather Forecast");
        assert_eq!(card(&view, "Temperature"), "3.4 °C");
        assert_eq!(card(&view, "Humidity"), "81 %");
        assert_eq!(card(&view, "Rain"), NO_DATA);
        assert_eq!(card(&view, "Conditions"), "Rain");
        assert_eq!(card(&view, "Daylight"), "Day");
        assert_eq!(card(&view, "Timezone"), "GMT");

        let chart = view.chart.expect("daily data gives a chart");
        assert_eq!(chart.title, "7-Day Weather Forecast");
        assert_eq!(chart.datasets.len(), 2);
        assert!(
            view.docs_url
                .expect("docs link")
                .starts_with("https://open-meteo.com/en/docs?latitude=52.52437")
        );
    }

    #[test]
    fn radiation_cards_take_first_day() {
        let detail = decode(
            FeatureKind::Radiation,
            serde_json::json!({
                "latitude": 52.52,
                "longitude": 13.42,
                "elevation": 38.0,
                "timezone": "Europe/Berlin",
                "daily_units": {"shortwave_radiation_sum": "MJ/m²"},
                "daily": {
                    "time": ["2026-02-05"],
                    "sunrise": ["2026-02-05T07:41"],
                    "sunset": ["2026-02-05T16:55"],
                    "daylight_duration": [33240.0],
                    "shortwave_radiation_sum": [2.1]
                },
                "hourly": {
                    "time": ["2026-02-05T12:00", "2026-02-05T13:00"],
                    "shortwave_radiation": [210.0, 180.0],
                    "diffuse_radiation": [90.0, null]
                }
            }),
        );
        let view = DetailView::for_feature(
            FeatureKind::Radiation,
            &berlin(),
            &detail,
            &ClimateConfig::default(),
        );

        assert_eq!(view.title, "Satellite Radiation Summary");
        assert_eq!(card(&view, "Elevation"), "38 m");
        assert_eq!(card(&view, "Timezone"), "Europe/Berlin");
        assert_eq!(card(&view, "Sunrise"), "2026-02-05T07:41");
        assert_eq!(card(&view, "Sunset"), "2026-02-05T16:55");
        assert_eq!(card(&view, "Daylight Duration"), "33240 s");
        assert_eq!(card(&view, "Sunshine Duration"), NO_DATA);
        assert_eq!(card(&view, "Shortwave Radiation Sum"), "2.1 MJ/m²");

        let chart = view.chart.expect("hourly data gives a chart");
        assert_eq!(chart.title, "Hourly Satellite Radiation");
        assert_eq!(chart.y_title, "Radiation (W/m²)");
        assert_eq!(chart.labels, vec!["05 Feb 12:00", "05 Feb 13:00"]);
        let labels: Vec<_> = chart.datasets.iter().map(|d| d.label.as_str()).collect();
        assert_eq!(labels, vec!["Shortwave Radiation", "Diffuse Radiation"]);

        let docs = view.docs_url.expect("docs link");
        assert!(docs.starts_with(
            "https://open-meteo.com/en/docs/satellite-radiation-api?latitude=52.52437&longitude=13.41053&daily="
        ));
        assert!(docs.ends_with("&models=satellite_radiation_seamless"));
    }

    #[test]
    fn air_quality_cards_use_reported_units() {
        let detail = decode(
            FeatureKind::AirQuality,
            serde_json::json!({
                "latitude": 52.5,
                "longitude": 13.4,
                "current_units": {"ozone": "μg/m³", "european_aqi": "EAQI", "us_aqi": "USAQI"},
                "current": {
                    "time": "2026-02-05T14:00",
                    "ozone": 55.0,
                    "uv_index": 0.4,
                    "european_aqi": 21
                },
                "hourly": {
                    "time": ["2026-02-05T14:00", "2026-02-05T15:00"],
                    "pm10": [12.5, 14.0],
                    "pm2_5": [8.1, 9.0]
                }
            }),
        );
        let view = DetailView::for_feature(
            FeatureKind::AirQuality,
            &berlin(),
            &detail,
            &ClimateConfig::default(),
        );

        assert_eq!(view.title, "Air Quality Details");
        assert_eq!(card(&view, "Latitude"), "52.5");
        assert_eq!(card(&view, "Time"), "2026-02-05T14:00");
        assert_eq!(card(&view, "Ozone"), "55 μg/m³");
        assert_eq!(card(&view, "European AQI"), "21 EAQI");
        assert_eq!(card(&view, "UV Index"), "0.4");
        assert_eq!(card(&view, "US AQI"), NO_DATA);
        assert_eq!(card(&view, "Carbon Monoxide"), NO_DATA);

        let chart = view.chart.expect("hourly data gives a chart");
        assert_eq!(chart.title, "Air Quality Forecast");
        assert_eq!(chart.y_title, "Concentration (μg/m³)");
        let labels: Vec<_> = chart.datasets.iter().map(|d| d.label.as_str()).collect();
        assert_eq!(labels, vec!["PM10 (μg/m³)", "PM2.5 (μg/m³)"]);
        assert_eq!(chart.datasets[1].values, vec![Some(8.1), Some(9.0)]);

        assert!(
            view.docs_url
                .expect("docs link")
                .starts_with("https://open-meteo.com/en/docs/air-quality-api?latitude=52.52437")
        );
    }

    #[cfg(debug_assertions)]
    #[test]
    #[should_panic(expected = "detail belongs to another panel")]
    fn detail_for_another_panel_is_rejected() {
        let detail = decode(FeatureKind::Elevation, serde_json::json!({"elevation": [38.0]}));
        DetailView::for_feature(FeatureKind::Flood, &berlin(), &detail, &ClimateConfig::default());
    }

    #[test]
    fn flood_cards_average_each_column() {
        let detail = decode(
            FeatureKind::Flood,
            serde_json::json!({
                "latitude": 59.9,
                "longitude": 10.75,
                "daily": {
                    "time": ["2026-02-05", "2026-02-06"],
                    "river_discharge": [10.0, 20.0],
                    "river_discharge_max": [null, null]
                }
            }),
        );
        let view =
            DetailView::for_feature(FeatureKind::Flood, &berlin(), &detail, &ClimateConfig::default());

        assert_eq!(card(&view, "River Discharge"), "15.00 m³/s");
        assert_eq!(card(&view, "Discharge Max"), "No Data");
        assert_eq!(card(&view, "Discharge Median"), NO_DATA);

        let chart = view.chart.expect("daily data gives a chart");
        assert_eq!(chart.datasets.len(), 2);
        assert_eq!(chart.y_title, "Discharge (m³/s)");
    }

    #[test]
    fn climate_cards_use_configured_models() {
        let detail = decode(
            FeatureKind::Climate,
            serde_json::json!({
                "latitude": 51.5,
                "longitude": -0.1,
                "elevation": 23.0,
                "daily": {
                    "time": ["2020-01-01", "2020-01-02"],
                    "temperature_2m_mean_CMCC_CM2_VHR4": [4.0, 6.0],
                    "temperature_2m_mean_FGOALS_f3_H": [5.0, 5.0],
                    "wind_speed_10m_mean_CMCC_CM2_VHR4": [10.0, 12.0]
                }
            }),
        );
        let view =
            DetailView::for_feature(FeatureKind::Climate, &berlin(), &detail, &ClimateConfig::default());

        assert_eq!(card(&view, "Elevation"), "23 m");
        assert_eq!(card(&view, "Temp Mean CMCC"), "5.00 °C");
        assert_eq!(card(&view, "Temp Mean FGOALS"), "5.00 °C");
        assert_eq!(card(&view, "Wind Mean CMCC"), "11.00 km/h");
        assert_eq!(card(&view, "Humidity FGOALS"), NO_DATA);

        let chart = view.chart.expect("daily data gives a chart");
        let labels: Vec<_> = chart.datasets.iter().map(|d| d.label.as_str()).collect();
        assert_eq!(labels, vec!["CMCC_CM2_VHR4", "FGOALS_f3_H"]);
        assert!(view.docs_url.expect("docs link").contains("start_date=2020-01-01"));
    }

    #[test]
    fn elevation_uses_selected_coordinates() {
        let detail = decode(FeatureKind::Elevation, serde_json::json!({"elevation": [38.0]}));
        let view = DetailView::for_feature(
            FeatureKind::Elevation,
            &berlin(),
            &detail,
            &ClimateConfig::default(),
        );

        assert_eq!(card(&view, "Elevation"), "38 m");
        assert_eq!(card(&view, "Latitude"), "52.52437");
        assert!(view.chart.is_none());
        assert_eq!(view.marker.longitude, 13.41053);
    }

    #[test]
    fn location_view_lists_geocoding_metadata() {
        let view = DetailView::for_location(&berlin());

        assert_eq!(card(&view, "ID"), "2950159");
        assert_eq!(card(&view, "Country Code"), "DE");
        assert_eq!(card(&view, "Population"), "3426354");
        assert_eq!(
            view.marker.osm_url(),
            "https://www.openstreetmap.org/?mlat=52.52437&mlon=13.41053#map=12/52.52437/13.41053"
        );
    }

    #[test]
    fn misaligned_flood_body_is_rejected() {
        let body = serde_json::json!({
            "latitude": 1.0,
            "longitude": 2.0,
            "daily": {"time": ["2026-02-05"], "river_discharge": [1.0, 2.0]}
        });
        let err = DomainResult::decode(FeatureKind::Flood, &body.to_string()).unwrap_err();

        assert!(matches!(err, NetworkError::Decode { endpoint: "flood", .. }));
        assert!(err.reason().contains("river_discharge"));
    }
}
