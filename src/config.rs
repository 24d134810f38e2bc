use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::data::aggregate::LIST_DELIMITER;

/// Ratings shown on the title-length chart, in axis order.
pub const VALID_RATINGS: [&str; 13] = [
    "TV-MA", "R", "PG-13", "TV-14", "TV-PG", "NR", "PG", "G", "TV-G", "TV-Y7", "TV-Y", "NC-17",
    "TV-Y7-FV",
];

// ---------------------------------------------------------------------------
// Dashboard configuration
// ---------------------------------------------------------------------------

/// Limits and category lists used when building the dashboard tables.
/// Every field is optional in the JSON file; missing ones take the default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Separator inside the country, director and genre cells.
    pub delimiter: String,
    /// Countries shown on the map.
    pub top_countries: usize,
    /// Directors shown on the ranked bar.
    pub top_directors: usize,
    /// Ratings shown on the rating bar.
    pub top_ratings: usize,
    /// Heatmap rows.
    pub heatmap_countries: usize,
    /// Heatmap columns.
    pub heatmap_genres: usize,
    /// Placeholder values removed from country and director rankings.
    pub excluded_values: Vec<String>,
    /// Ratings kept for the title-length distribution, in display order.
    pub allowed_ratings: Vec<String>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            delimiter: LIST_DELIMITER.to_string(),
            top_countries: 15,
            top_directors: 10,
            top_ratings: 14,
            heatmap_countries: 10,
            heatmap_genres: 10,
            excluded_values: vec!["Unknown".to_string()],
            allowed_ratings: VALID_RATINGS.iter().map(|r| r.to_string()).collect(),
        }
    }
}

impl DashboardConfig {
    /// Read a JSON config file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
    }

    pub fn excluded(&self) -> Vec<&str> {
        self.excluded_values.iter().map(String::as_str).collect()
    }
}
