use chrono::{DateTime, Utc};

use crate::analytics::{group_by, mean, round2};
use crate::config::{trend_thresholds, DEFAULT_UNIT};
use crate::types::{PriceObservation, PriceStats, TrendDirection};

/// Descriptive statistics over a non-empty set of prices.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceSummary {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub median: f64,
    pub count: usize,
}

/// Returns `None` for an empty slice; never produces infinities or NaN from missing data.
pub fn summarize(prices: &[f64]) -> Option<PriceSummary> {
    let median = median(prices)?;
    let mean = mean(prices)?;
    let min = prices.iter().copied().fold(f64::INFINITY, f64::min);
    let max = prices.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    Some(PriceSummary { min, max, mean, median, count: prices.len() })
}

/// Middle value, or the mean of the two middle values for an even count.
pub fn median(prices: &[f64]) -> Option<f64> {
    if prices.is_empty() {
        return None;
    }
    let mut sorted = prices.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}

/// One `PriceStats` per product, alphabetical by normalized product name.
///
/// Every call site (stats cards, the analytics endpoint, CSV export) uses this
/// function, so ordering and grouping rules are the same everywhere.
pub fn aggregate_by_product(observations: &[PriceObservation]) -> Vec<PriceStats> {
    group_by(observations, |o| o.product_name.as_str())
        .into_values()
        .filter_map(|group| {
            let prices: Vec<f64> = group.items.iter().map(|o| o.price).collect();
            let summary = summarize(&prices)?;
            let unit = group
                .items
                .iter()
                .filter_map(|o| o.unit.as_deref())
                .map(str::trim)
                .find(|u| !u.is_empty())
                .unwrap_or(DEFAULT_UNIT)
                .to_string();
            let timed: Vec<(DateTime<Utc>, f64)> =
                group.items.iter().map(|o| (o.created_at, o.price)).collect();
            let (change, direction) = price_change(&timed);

            Some(PriceStats {
                product_name: group.label,
                min_price: summary.min,
                max_price: summary.max,
                avg_price: summary.mean,
                median_price: summary.median,
                total_entries: summary.count,
                unit,
                price_change: Some(change),
                trend_direction: Some(direction),
            })
        })
        .collect()
}

/// Percent change between the early and late sub-windows of a series.
///
/// Spans of up to 30 days compare the first and last third of the points,
/// longer spans compare quarters. Each window holds at least one point.
pub fn price_change(points: &[(DateTime<Utc>, f64)]) -> (f64, TrendDirection) {
    if points.len() < 2 {
        return (0.0, TrendDirection::Stable);
    }
    let mut sorted = points.to_vec();
    sorted.sort_by_key(|(t, _)| *t);

    let (first, last) = (sorted[0].0, sorted[sorted.len() - 1].0);
    let span_days = (last - first).num_seconds() as f64 / 86_400.0;
    let divisor = if span_days <= trend_thresholds::SHORT_SPAN_DAYS { 3 } else { 4 };
    let window = (sorted.len() / divisor).max(1);

    let prices: Vec<f64> = sorted.iter().map(|(_, p)| *p).collect();
    let (Some(early), Some(late)) = (
        mean(&prices[..window]),
        mean(&prices[prices.len() - window..]),
    ) else {
        return (0.0, TrendDirection::Stable);
    };
    if early == 0.0 {
        return (0.0, TrendDirection::Stable);
    }

    let pct = round2((late - early) / early * 100.0);
    let direction = if pct > trend_thresholds::DIRECTION_PCT {
        TrendDirection::Up
    } else if pct < -trend_thresholds::DIRECTION_PCT {
        TrendDirection::Down
    } else {
        TrendDirection::Stable
    };
    (pct, direction)
}
