use std::io;

use axum::{
    extract::{Query, State},
    http::header,
    response::IntoResponse,
};
use tracing::info;

use crate::access::Permission;
use crate::analytics::stats::aggregate_by_product;
use crate::api::analytics::AnalyticsQuery;
use crate::api::auth::Caller;
use crate::api::routes::ApiState;
use crate::db::EntryFilter;
use crate::error::Result;
use crate::types::{DateRange, LocationFilter, PriceStats, TrendDirection};

const HEADERS: [&str; 9] = [
    "Product",
    "Min Price (৳)",
    "Max Price (৳)",
    "Average Price (৳)",
    "Median Price (৳)",
    "Entries",
    "Unit",
    "Price Change (%)",
    "Trend",
];

/// Write one row per product, then a record describing the filters used.
pub fn write_stats_csv<W: io::Write>(
    out: W,
    stats: &[PriceStats],
    range: &DateRange,
    location: &LocationFilter,
) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new().flexible(true).from_writer(out);
    wtr.write_record(HEADERS)?;
    for s in stats {
        wtr.write_record([
            s.product_name.clone(),
            s.min_price.to_string(),
            s.max_price.to_string(),
            format!("{:.2}", s.avg_price),
            format!("{:.2}", s.median_price),
            s.total_entries.to_string(),
            s.unit.clone(),
            s.price_change.unwrap_or(0.0).to_string(),
            s.trend_direction.unwrap_or(TrendDirection::Stable).to_string(),
        ])?;
    }
    wtr.write_record([
        "Filters".to_string(),
        format!("{} to {}", range.start, range.end),
        location.describe(),
    ])?;
    wtr.flush()?;
    Ok(())
}

/// `GET /api/export/stats.csv`; takes the same filters as the stats view.
pub async fn get_stats_csv(
    State(state): State<ApiState>,
    caller: Caller,
    Query(params): Query<AnalyticsQuery>,
) -> Result<impl IntoResponse> {
    let user_id = caller.require_permission(&state, Permission::ExportData).await?;
    let range = DateRange::parse(params.start_date.as_deref(), params.end_date.as_deref())?;
    let location = LocationFilter::new(params.district.as_deref(), params.upazilla.as_deref());

    let filter = EntryFilter::new().date_range(range).location(location.clone());
    let stats = aggregate_by_product(&state.store.observations(&filter).await?);

    let mut body = Vec::new();
    write_stats_csv(&mut body, &stats, &range, &location)?;
    info!(event = "EXPORT", user_id, products = stats.len(), "Exported stats CSV");

    let disposition = format!("attachment; filename=\"price_report_{}.csv\"", range.end);
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    ))
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    #[test]
    fn csv_has_header_rows_and_filter_line() {
        let stats = vec![PriceStats {
            product_name: "Rice".into(),
            min_price: 80.0,
            max_price: 100.0,
            avg_price: 90.0,
            median_price: 90.0,
            total_entries: 2,
            unit: "kg".into(),
            price_change: Some(25.0),
            trend_direction: Some(TrendDirection::Up),
        }];
        let range = DateRange {
            start: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            end: NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
        };
        let mut out = Vec::new();
        write_stats_csv(&mut out, &stats, &range, &LocationFilter::new(Some("Dhaka"), None)).unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("Product,Min Price"));
        assert_eq!(lines[1], "Rice,80,100,90.00,90.00,2,kg,25,up");
        assert_eq!(lines[2], "Filters,2024-01-01 to 2024-01-31,Dhaka");
    }
}
