use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Record: column_name -> cell value (one parsed CSV row)
pub type Record = HashMap<String, String>;

/// A car variant joined onto its parent car by name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantRecord {
    pub name: String,
    pub price: String,
}

/// A car row with its variants attached
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarRecord {
    pub name: String,
    pub price: String,
    pub drive_type: String,
    pub fuel_tank_capacity: String,
    pub fuel_type: String,
    pub mileage: String,
    pub torque: String,
    pub image: String,
    pub variants: Vec<VariantRecord>,
}

/// Column names for both tables, remappable from config
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnConfig {
    pub car_name: String,
    pub price: String,
    pub drive_type: String,
    pub fuel_tank_capacity: String,
    pub fuel_type: String,
    pub mileage: String,
    pub torque: String,
    pub image: String,
    pub variant_car_name: String,
    pub variant_name: String,
    pub variant_price: String,
}

impl Default for ColumnConfig {
    fn default() -> Self {
        ColumnConfig {
            car_name: "car_name".to_string(),
            price: "price".to_string(),
            drive_type: "drive_type".to_string(),
            fuel_tank_capacity: "fuel_tank_capacity".to_string(),
            fuel_type: "fuel_type".to_string(),
            mileage: "mileage".to_string(),
            torque: "torque".to_string(),
            image: "image".to_string(),
            variant_car_name: "car_name".to_string(),
            variant_name: "variant_name".to_string(),
            variant_price: "price".to_string(),
        }
    }
}

/// Matcher settings. The search box and the detail page differ only here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatcherConfig {
    pub min_query_length: usize,
    pub max_results: usize,
    pub trim_query: bool,
}

impl MatcherConfig {
    pub const DEFAULT_MAX_RESULTS: usize = 5;

    /// Search page: at least 2 characters, trimmed input
    pub fn search_box() -> Self {
        MatcherConfig {
            min_query_length: 2,
            max_results: Self::DEFAULT_MAX_RESULTS,
            trim_query: true,
        }
    }

    /// Detail page header search: any non-empty input, taken as typed
    pub fn detail_page() -> Self {
        MatcherConfig {
            min_query_length: 0,
            max_results: Self::DEFAULT_MAX_RESULTS,
            trim_query: false,
        }
    }
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self::search_box()
    }
}

/// Top-level config passed in from JavaScript as JSON
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    pub columns: ColumnConfig,
    pub matcher: MatcherConfig,
    pub require_variants: bool,
    pub detail_page: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        CatalogConfig {
            columns: ColumnConfig::default(),
            matcher: MatcherConfig::default(),
            require_variants: false,
            detail_page: "car.html".to_string(),
        }
    }
}

/// Range [start, end) of a query occurrence inside a display string, in
/// JavaScript string indices (UTF-16 code units)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighlightSpan {
    pub start: usize,
    pub end: usize,
}

/// Piece of display text, emphasized or not
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub text: String,
    pub emphasized: bool,
}

/// One suggestion: the car name plus where the query occurs in it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    pub display_text: String,
    pub highlight_spans: Vec<HighlightSpan>,
    pub segments: Vec<Segment>,
}

/// What the suggestion list should show for a query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "results", rename_all = "camelCase")]
pub enum SuggestionOutcome {
    /// Query below threshold: hide the list
    Hidden,
    /// Store not loaded or load failed: "Error loading car data"
    Unavailable,
    /// "No results found"
    NoResults,
    Matches(Vec<MatchResult>),
}

impl SuggestionOutcome {
    /// Suggestions the navigator can move over (empty for every non-match state)
    pub fn matches(&self) -> &[MatchResult] {
        match self {
            SuggestionOutcome::Matches(results) => results,
            _ => &[],
        }
    }
}
