use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::analytics::comparison::{compare_products, ComparisonReport};
use crate::analytics::regional::{average_by_district, regional_comparison};
use crate::analytics::stats::aggregate_by_product;
use crate::analytics::timeseries::{assemble, points_from, series_by_product};
use crate::analytics::trends::analyze_trends;
use crate::api::auth::Caller;
use crate::api::routes::ApiState;
use crate::db::EntryFilter;
use crate::error::{AppError, Result};
use crate::types::{
    non_empty, parse_product_list, DateRange, LocationFilter, PriceObservation, PriceStats,
    RegionalPrice, SeriesRecord, TimeSeriesPoint, TrendAnalysis,
};

// ---------------------------------------------------------------------------
// Query param structs
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub district: Option<String>,
    pub upazilla: Option<String>,
    pub product: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

/// Shared by the series, trends and comparison endpoints.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductsQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub district: Option<String>,
    pub upazilla: Option<String>,
    /// Comma-separated product names.
    pub products: Option<String>,
}

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalyticsKind {
    Stats,
    TimeSeries,
    Districts,
}

impl AnalyticsKind {
    /// Missing or empty defaults to `Stats`; anything unrecognized is a 400.
    pub fn parse(s: Option<&str>) -> Result<Self> {
        match non_empty(s).as_deref() {
            None | Some("stats") => Ok(AnalyticsKind::Stats),
            Some("timeseries") => Ok(AnalyticsKind::TimeSeries),
            Some("districts") => Ok(AnalyticsKind::Districts),
            Some(other) => Err(AppError::Validation(format!("Unknown analytics type '{other}'"))),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum AnalyticsResponse {
    Stats(Vec<PriceStats>),
    TimeSeries(Vec<TimeSeriesPoint>),
    Districts(Vec<RegionalPrice>),
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

pub async fn get_analytics(
    State(state): State<ApiState>,
    caller: Caller,
    Query(params): Query<AnalyticsQuery>,
) -> Result<Json<AnalyticsResponse>> {
    caller.require()?;
    let range = DateRange::parse(params.start_date.as_deref(), params.end_date.as_deref())?;
    let kind = AnalyticsKind::parse(params.kind.as_deref())?;
    let location = LocationFilter::new(params.district.as_deref(), params.upazilla.as_deref());
    let product = non_empty(params.product.as_deref());

    let mut filter = EntryFilter::new().date_range(range).location(location);
    if let Some(p) = &product {
        filter = filter.product(p.as_str());
    }
    let observations = state.store.observations(&filter).await?;
    debug!(?kind, rows = observations.len(), "Analytics query");

    let body = match kind {
        AnalyticsKind::Stats => AnalyticsResponse::Stats(aggregate_by_product(&observations)),
        AnalyticsKind::TimeSeries => AnalyticsResponse::TimeSeries(points_from(&observations)),
        AnalyticsKind::Districts => AnalyticsResponse::Districts(match product {
            Some(p) => regional_comparison(&observations, &p, &range),
            None => average_by_district(&observations),
        }),
    };
    Ok(Json(body))
}

/// Chart-ready series, one record per date with a column per product.
/// Without `products`, every product in range gets a column.
pub async fn get_series(
    State(state): State<ApiState>,
    caller: Caller,
    Query(params): Query<ProductsQuery>,
) -> Result<Json<Vec<SeriesRecord>>> {
    caller.require()?;
    let (observations, requested) = load_products(&state, &params).await?;
    let points = points_from(&observations);
    let columns = if requested.is_empty() {
        series_by_product(&points).into_values().map(|s| s.label).collect()
    } else {
        requested
    };
    Ok(Json(assemble(&points, &columns)))
}

pub async fn get_trends(
    State(state): State<ApiState>,
    caller: Caller,
    Query(params): Query<ProductsQuery>,
) -> Result<Json<Vec<TrendAnalysis>>> {
    caller.require()?;
    let (observations, _) = load_products(&state, &params).await?;
    Ok(Json(analyze_trends(&points_from(&observations))))
}

pub async fn get_comparison(
    State(state): State<ApiState>,
    caller: Caller,
    Query(params): Query<ProductsQuery>,
) -> Result<Json<ComparisonReport>> {
    caller.require()?;
    let (observations, requested) = load_products(&state, &params).await?;
    if requested.len() < 2 {
        return Err(AppError::Validation(
            "Select at least two products to compare".to_string(),
        ));
    }
    let stats = aggregate_by_product(&observations);
    let points = points_from(&observations);
    Ok(Json(compare_products(&requested, &stats, &points)))
}

async fn load_products(
    state: &ApiState,
    params: &ProductsQuery,
) -> Result<(Vec<PriceObservation>, Vec<String>)> {
    let range = DateRange::parse(params.start_date.as_deref(), params.end_date.as_deref())?;
    let location = LocationFilter::new(params.district.as_deref(), params.upazilla.as_deref());
    let requested = parse_product_list(params.products.as_deref());
    let filter = EntryFilter::new()
        .date_range(range)
        .location(location)
        .products(&requested);
    let observations = state.store.observations(&filter).await?;
    Ok((observations, requested))
}
