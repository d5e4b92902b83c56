//! Text model of the result panel, shared by every front-end.

use crate::{model::WeatherReport, widget::WidgetState};

pub const TITLE: &str = "Weather Widget";
pub const PLACEHOLDER: &str = "Search by city name...";
pub const NO_DATA: &str = "No data available";

/// What the result area shows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ResultView<'a> {
    Loading,
    Report(&'a WeatherReport),
    Empty,
}

impl<'a> ResultView<'a> {
    /// Loading hides any previous report until the lookup settles.
    pub fn of(state: &'a WidgetState) -> Self {
        if state.is_loading() {
            ResultView::Loading
        } else if let Some(report) = state.report() {
            ResultView::Report(report)
        } else {
            ResultView::Empty
        }
    }
}

/// Label / value rows for a report, in display order.
pub fn report_rows(report: &WeatherReport) -> Vec<(&'static str, String)> {
    let description = if report.description.is_empty() {
        "N/A".to_string()
    } else {
        report.description.clone()
    };

    let mut rows = vec![
        ("Current Temperature", format!("{}°C", report.temperature_c)),
        ("Feels Like", format!("{}°C", report.feels_like_c)),
        ("Max", format!("{}°C", report.temp_max_c)),
        ("Min", format!("{}°C", report.temp_min_c)),
        ("Humidity", format!("{}%", report.humidity_pct)),
        ("Weather", description),
    ];

    if let Some(sea_level) = report.sea_level_hpa {
        rows.push(("Sea Level", format!("{sea_level} hPa")));
    }
    if let Some(observed) = report.observed_at {
        rows.push(("Observed", observed.format("%Y-%m-%d %H:%M UTC").to_string()));
    }

    rows
}

/// Panel heading: location name when upstream reported one.
pub fn report_heading(report: &WeatherReport) -> String {
    if report.location_name.is_empty() {
        "Temperature".to_string()
    } else {
        format!("Temperature in {}", report.location_name)
    }
}
