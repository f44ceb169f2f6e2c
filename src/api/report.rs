use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::access::{date_only, AnonymizationLevel, Anonymize, Permission, MASKED};
use crate::analytics::regional::district_breakdown;
use crate::api::auth::Caller;
use crate::api::routes::ApiState;
use crate::catalog::ReferenceCatalog;
use crate::config::pagination::{DEFAULT_PAGE, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use crate::db::EntryFilter;
use crate::error::{AppError, Result};
use crate::types::{non_empty, DistrictProductSummary, LocationFilter, PriceEntry};

// ---------------------------------------------------------------------------
// Query param structs
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportQuery {
    pub page: Option<i64>,
    pub page_size: Option<i64>,
    pub search: Option<String>,
    pub district: Option<String>,
    pub view: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportView {
    Aggregate,
    Detailed,
}

impl ReportView {
    pub fn parse(s: Option<&str>) -> Result<Self> {
        match non_empty(s).as_deref() {
            None | Some("aggregate") => Ok(ReportView::Aggregate),
            Some("detailed") => Ok(ReportView::Detailed),
            Some(other) => Err(AppError::Validation(format!("Unknown report view '{other}'"))),
        }
    }
}

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

/// Columns served in the aggregate view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateRow {
    pub product_name: String,
    pub price: f64,
    pub district: String,
    pub upazilla: String,
    pub created_at: String,
}

impl From<PriceEntry> for AggregateRow {
    fn from(e: PriceEntry) -> Self {
        Self {
            product_name: e.product_name,
            price: e.price,
            district: e.district,
            upazilla: e.upazilla,
            created_at: e.created_at,
        }
    }
}

impl Anonymize for AggregateRow {
    fn anonymize(&mut self, level: AnonymizationLevel) {
        self.created_at = date_only(&self.created_at);
        if level == AnonymizationLevel::High {
            self.upazilla = MASKED.to_string();
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ReportRows {
    Aggregate(Vec<AggregateRow>),
    Detailed(Vec<PriceEntry>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: i64,
    pub page_size: i64,
    pub total_pages: i64,
    pub total_records: i64,
}

impl Pagination {
    pub fn new(page: i64, page_size: i64, total_records: i64) -> Self {
        let total_pages = (total_records + page_size - 1) / page_size;
        Self { page, page_size, total_pages, total_records }
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.page_size)
    }
}

#[derive(Debug, Serialize)]
pub struct ReportResponse {
    pub data: ReportRows,
    pub pagination: Pagination,
}

/// Validate `page`/`pageSize`, applying defaults.
pub fn page_bounds(page: Option<i64>, page_size: Option<i64>) -> Result<(i64, i64)> {
    let page = page.unwrap_or(DEFAULT_PAGE);
    let page_size = page_size.unwrap_or(DEFAULT_PAGE_SIZE);
    if page < 1 || !(1..=MAX_PAGE_SIZE).contains(&page_size) {
        return Err(AppError::Validation("Invalid pagination parameters".to_string()));
    }
    Ok((page, page_size))
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

pub async fn get_report(
    State(state): State<ApiState>,
    caller: Caller,
    Query(params): Query<ReportQuery>,
) -> Result<Json<ReportResponse>> {
    let (page, page_size) = page_bounds(params.page, params.page_size)?;
    let view = ReportView::parse(params.view.as_deref())?;
    if view == ReportView::Detailed {
        caller.require_permission(&state, Permission::ViewAllData).await?;
    }

    let filter = EntryFilter::new()
        .location(LocationFilter::new(params.district.as_deref(), None))
        .search(params.search.clone());
    let total = state.store.count(&filter).await?;
    let pagination = Pagination::new(page, page_size, total);
    let entries = state.store.page(&filter, page_size, pagination.offset()).await?;
    debug!(?view, page, page_size, total, rows = entries.len(), "Report page");

    let level = AnonymizationLevel::for_report(view == ReportView::Detailed, caller.is_authenticated());
    let data = match view {
        ReportView::Detailed => ReportRows::Detailed(anonymized(entries, level)),
        ReportView::Aggregate => {
            ReportRows::Aggregate(anonymized(entries.into_iter().map(AggregateRow::from), level))
        }
    };
    Ok(Json(ReportResponse { data, pagination }))
}

fn anonymized<T, I>(rows: I, level: AnonymizationLevel) -> Vec<T>
where
    T: Anonymize,
    I: IntoIterator<Item = T>,
{
    rows.into_iter()
        .map(|mut row| {
            row.anonymize(level);
            row
        })
        .collect()
}

/// Per-product summary for one district, busiest products first.
pub async fn get_district_report(
    State(state): State<ApiState>,
    Path(district): Path<String>,
) -> Result<Json<Vec<DistrictProductSummary>>> {
    let name = ReferenceCatalog::find_district(&district)
        .map(|d| d.name.to_string())
        .unwrap_or(district);
    let filter = EntryFilter::new().location(LocationFilter::new(Some(&name), None));
    let observations = state.store.observations(&filter).await?;
    Ok(Json(district_breakdown(&observations, &name)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pagination_defaults_and_bounds() {
        assert_eq!(page_bounds(None, None).unwrap(), (1, 10));
        assert_eq!(page_bounds(Some(3), Some(100)).unwrap(), (3, 100));
        assert!(page_bounds(Some(0), None).is_err());
        assert!(page_bounds(None, Some(0)).is_err());
        assert!(page_bounds(None, Some(101)).is_err());
    }

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(Pagination::new(1, 10, 0).total_pages, 0);
        assert_eq!(Pagination::new(1, 10, 10).total_pages, 1);
        assert_eq!(Pagination::new(2, 10, 11).total_pages, 2);
        assert_eq!(Pagination::new(3, 10, 25).offset(), 20);
    }

    #[test]
    fn huge_page_offset_saturates() {
        assert_eq!(Pagination::new(i64::MAX, 100, 5).offset(), i64::MAX);
    }

    #[test]
    fn aggregate_rows_carry_no_email_and_are_masked() {
        let mut row = AggregateRow {
            product_name: "Rice".into(),
            price: 70.0,
            district: "Dhaka".into(),
            upazilla: "Savar".into(),
            created_at: "2024-05-02T08:15:00Z".into(),
        };
        row.anonymize(AnonymizationLevel::High);
        assert_eq!(row.upazilla, "***");
        assert_eq!(row.created_at, "2024-05-02");
        let json = serde_json::to_value(&row).unwrap();
        assert!(json.get("user_email").is_none());
    }

    #[test]
    fn unknown_view_is_rejected() {
        assert_eq!(ReportView::parse(None).unwrap(), ReportView::Aggregate);
        assert!(ReportView::parse(Some("raw")).is_err());
    }
}
