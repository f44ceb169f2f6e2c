use serde::Serialize;

use crate::analytics::correlation::correlated_pairs;
use crate::analytics::timeseries::series_by_product;
use crate::analytics::{group_key, mean, round2, stability};
use crate::types::{CorrelatedPair, PriceRange, PriceStats, ProductComparison, TimeSeriesPoint};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonReport {
    pub price_comparisons: Vec<ProductComparison>,
    pub correlated_products: Vec<CorrelatedPair>,
}

/// Side-by-side comparison of at least two products.
///
/// `stats` supplies price levels, `points` supplies the series used for
/// stability and pairwise correlation. Requested products absent from
/// `stats` are left out of the comparison list.
pub fn compare_products(
    requested: &[String],
    stats: &[PriceStats],
    points: &[TimeSeriesPoint],
) -> ComparisonReport {
    if requested.len() < 2 {
        return ComparisonReport::default();
    }
    let wanted: Vec<String> = requested.iter().map(|p| group_key(p)).collect();
    let selected: Vec<&PriceStats> = stats
        .iter()
        .filter(|s| wanted.contains(&group_key(&s.product_name)))
        .collect();

    let avgs: Vec<f64> = selected.iter().map(|s| s.avg_price).collect();
    let Some(overall) = mean(&avgs) else {
        return ComparisonReport::default();
    };

    let series = series_by_product(points);
    let price_comparisons = selected
        .iter()
        .map(|s| {
            let prices = series
                .get(&group_key(&s.product_name))
                .map(|p| p.prices())
                .unwrap_or_default();
            let relative_price_index = if overall > 0.0 { round2(s.avg_price / overall) } else { 0.0 };
            ProductComparison {
                product_name: s.product_name.clone(),
                avg_price: s.avg_price,
                price_range: PriceRange { min: s.min_price, max: s.max_price },
                relative_price_index,
                price_stability: stability::classify(&prices),
            }
        })
        .collect();

    ComparisonReport {
        price_comparisons,
        correlated_products: correlated_pairs(requested, points),
    }
}
