//! Plain-text rendering of candidate lists and detail views.

use meteo_core::{
    DetailView, LocationCandidate,
    model::Series,
    view::{Chart, NO_DATA},
};

const SPARK: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Widest sparkline drawn; longer series are averaged into buckets.
const CHART_WIDTH: usize = 60;

pub fn candidates(list: &[LocationCandidate]) -> String {
    if list.is_empty() {
        return "No locations found.".to_string();
    }

    list.iter()
        .enumerate()
        .map(|(i, c)| format!("{:>3}. {}", i + 1, c.label()))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn detail(view: &DetailView, show_map: bool) -> String {
    let mut lines = vec![view.title.clone(), "=".repeat(view.title.chars().count())];

    if let Some(notice) = &view.notice {
        lines.push(notice.clone());
    }
    if let Some(reason) = &view.reason {
        lines.push(format!("  {reason}"));
    }

    let width = view
        .cards
        .iter()
        .map(|c| c.label.chars().count())
        .max()
        .unwrap_or(0);
    for card in &view.cards {
        lines.push(format!("  {:<width$}  {}", card.label, card.display_value()));
    }

    if let Some(chart) = &view.chart {
        lines.push(String::new());
        lines.extend(chart_lines(chart));
    }

    if let Some(url) = &view.docs_url {
        lines.push(String::new());
        lines.push(format!("Docs: {url}"));
    }
    if show_map {
        lines.push(format!("Map:  {}", view.marker.osm_url()));
    }

    lines.join("\n")
}

fn chart_lines(chart: &Chart) -> Vec<String> {
    let mut lines = vec![format!("{} ({} by {})", chart.title, chart.y_title, chart.x_title)];

    if let (Some(first), Some(last)) = (chart.labels.first(), chart.labels.last()) {
        lines.push(format!("  {first} .. {last} ({} points)", chart.labels.len()));
    }

    let width = chart
        .datasets
        .iter()
        .map(|d| d.label.chars().count())
        .max()
        .unwrap_or(0);

    for dataset in &chart.datasets {
        let line = match (sparkline(&dataset.values, CHART_WIDTH), range(&dataset.values)) {
            (Some(spark), Some((min, max))) => format!("{spark}  min {min:.2}  max {max:.2}"),
            _ => NO_DATA.to_string(),
        };
        lines.push(format!("  {:<width$}  {line}", dataset.label));
    }

    lines
}

fn range(values: &Series) -> Option<(f64, f64)> {
    values.iter().flatten().fold(None, |acc, &v| match acc {
        None => Some((v, v)),
        Some((min, max)) => Some((min.min(v), max.max(v))),
    })
}

/// Bar per value (or bucket of values); gaps are drawn as spaces.
pub fn sparkline(values: &Series, max_width: usize) -> Option<String> {
    let (min, max) = range(values)?;

    let bucket = values.len().div_ceil(max_width.max(1)).max(1);
    let spark = values
        .chunks(bucket)
        .map(|chunk| {
            let present: Vec<f64> = chunk.iter().flatten().copied().collect();
            if present.is_empty() {
                return ' ';
            }
            let mean = present.iter().sum::<f64>() / present.len() as f64;
            if max == min {
                return SPARK[0];
            }
            let step = ((mean - min) / (max - min) * (SPARK.len() - 1) as f64).round() as usize;
            SPARK[step.min(SPARK.len() - 1)]
        })
        .collect();

    Some(spark)
}
