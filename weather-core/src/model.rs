use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Current conditions for one resolved city.
///
/// Replaced wholesale on every successful lookup; fields are never merged
/// across responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    pub location_name: String,
    pub temperature_c: f64,
    pub feels_like_c: f64,
    pub temp_min_c: f64,
    pub temp_max_c: f64,
    pub humidity_pct: u8,
    pub sea_level_hpa: Option<f64>,
    /// First condition description reported upstream, empty if none.
    pub description: String,
    pub observed_at: Option<DateTime<Utc>>,
}
