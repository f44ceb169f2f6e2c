use std::collections::{BTreeMap, HashSet};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::analytics::group_key;
use crate::error::{AppError, Result};

// ---------------------------------------------------------------------------
// Price entries
// ---------------------------------------------------------------------------

/// One stored submission, as returned by the report endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PriceEntry {
    pub id: i64,
    pub user_email: String,
    pub district: String,
    pub upazilla: String,
    pub product_id: i64,
    pub product_name: String,
    pub unit: String,
    pub price: f64,
    pub category: Option<String>,
    pub other_category: Option<String>,
    pub purchase_option: Option<String>,
    pub other_purchase_option: Option<String>,
    pub shop_type: Option<String>,
    pub other_shop_type: Option<String>,
    pub online_shop_name: Option<String>,
    pub notes: Option<String>,
    /// RFC 3339 UTC, assigned at insert.
    pub created_at: String,
}

/// Body of `POST /api/entries`. Product name and unit come from the catalog, not the client.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PriceSubmission {
    pub user_email: String,
    pub district: String,
    pub upazilla: String,
    pub product_id: i64,
    pub price: f64,
    pub category: Option<String>,
    pub other_category: Option<String>,
    pub purchase_option: Option<String>,
    pub other_purchase_option: Option<String>,
    pub shop_type: Option<String>,
    pub other_shop_type: Option<String>,
    pub online_shop_name: Option<String>,
    pub notes: Option<String>,
}

/// A submission that passed validation and is ready for insert.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPriceEntry {
    pub user_email: String,
    pub district: String,
    pub upazilla: String,
    pub product_id: i64,
    pub product_name: String,
    pub unit: String,
    pub price: f64,
    pub category: Option<String>,
    pub other_category: Option<String>,
    pub purchase_option: Option<String>,
    pub other_purchase_option: Option<String>,
    pub shop_type: Option<String>,
    pub other_shop_type: Option<String>,
    pub online_shop_name: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self { field, message: message.into() }
    }
}

/// The slice of a row every aggregator works on.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceObservation {
    pub product_name: String,
    pub district: String,
    pub upazilla: String,
    pub price: f64,
    pub unit: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl PriceObservation {
    pub fn date(&self) -> NaiveDate {
        self.created_at.date_naive()
    }
}

// ---------------------------------------------------------------------------
// Aggregation outputs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Up,
    Down,
    Stable,
}

impl std::fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            TrendDirection::Up => "up",
            TrendDirection::Down => "down",
            TrendDirection::Stable => "stable",
        };
        write!(f, "{s}")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceStats {
    pub product_name: String,
    pub min_price: f64,
    pub max_price: f64,
    pub avg_price: f64,
    pub median_price: f64,
    pub total_entries: usize,
    pub unit: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_change: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trend_direction: Option<TrendDirection>,
}

/// One row of the `timeseries` analytics view. Location is the district only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSeriesPoint {
    pub date: NaiveDate,
    pub price: f64,
    pub product: String,
    pub location: String,
}

/// One date of a multi-product chart series. Missing products serialize as `null`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesRecord {
    pub date: NaiveDate,
    #[serde(flatten)]
    pub values: BTreeMap<String, Option<f64>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionalPrice {
    pub district: String,
    pub avg_price: f64,
    pub sample_size: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DistrictProductSummary {
    pub product_name: String,
    pub min_price: f64,
    pub max_price: f64,
    pub avg_price: f64,
    pub submission_count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stability {
    High,
    Medium,
    Low,
}

impl std::fmt::Display for Stability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Stability::High => "high",
            Stability::Medium => "medium",
            Stability::Low => "low",
        };
        write!(f, "{s}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverallTrend {
    Increasing,
    Decreasing,
    Stable,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendAnalysis {
    pub product_name: String,
    pub overall_trend: OverallTrend,
    pub percentage_change: f64,
    pub volatility: f64,
    pub seasonal_patterns: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductComparison {
    pub product_name: String,
    pub avg_price: f64,
    pub price_range: PriceRange,
    pub relative_price_index: f64,
    pub price_stability: Stability,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorrelatedPair {
    pub product1: String,
    pub product2: String,
    pub correlation_strength: f64,
}

// ---------------------------------------------------------------------------
// Query filters
// ---------------------------------------------------------------------------

/// Inclusive calendar-date range compared against `created_at` truncated to a date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Parse `startDate`/`endDate` query values. Missing, unparseable or reversed bounds are 400s.
    pub fn parse(start: Option<&str>, end: Option<&str>) -> Result<Self> {
        let start = start.and_then(parse_date);
        let end = end.and_then(parse_date);
        match (start, end) {
            (Some(start), Some(end)) if start <= end => Ok(Self { start, end }),
            (Some(_), Some(_)) => Err(AppError::Validation(
                "startDate must not be after endDate".to_string(),
            )),
            _ => Err(AppError::Validation(
                "Invalid or missing date parameters".to_string(),
            )),
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Accepts `YYYY-MM-DD` or a full RFC 3339 timestamp (date part is kept).
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.with_timezone(&Utc).date_naive()))
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocationFilter {
    pub district: Option<String>,
    pub upazilla: Option<String>,
}

impl LocationFilter {
    /// Empty and whitespace-only values mean "no filter".
    pub fn new(district: Option<&str>, upazilla: Option<&str>) -> Self {
        Self {
            district: non_empty(district),
            upazilla: non_empty(upazilla),
        }
    }

    pub fn describe(&self) -> String {
        match (&self.district, &self.upazilla) {
            (Some(d), Some(u)) => format!("{u}, {d}"),
            (Some(d), None) => d.clone(),
            _ => "All Locations".to_string(),
        }
    }
}

pub fn non_empty(s: Option<&str>) -> Option<String> {
    s.map(str::trim).filter(|s| !s.is_empty()).map(str::to_string)
}

/// Split a comma-separated `products` parameter.
/// Comma-separated product names, first spelling kept when two names
/// share a grouping key.
pub fn parse_product_list(s: Option<&str>) -> Vec<String> {
    let mut seen = HashSet::new();
    s.unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .filter(|s| seen.insert(group_key(s)))
        .map(str::to_string)
        .collect()
}
