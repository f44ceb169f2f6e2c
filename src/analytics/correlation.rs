use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::analytics::timeseries::series_by_product;
use crate::analytics::{group_key, mean, round2};
use crate::config::{seasonal, MIN_CORRELATION_POINTS};
use crate::types::{CorrelatedPair, TimeSeriesPoint};

/// Pearson correlation coefficient.
///
/// Returns 0 when the inputs differ in length, are empty, or either side has
/// zero variance.
pub fn pearson(a: &[f64], b: &[f64]) -> f64 {
    if a.len() != b.len() {
        return 0.0;
    }
    let (Some(mean_a), Some(mean_b)) = (mean(a), mean(b)) else {
        return 0.0;
    };

    let mut cov = 0.0;
    let mut var_a = 0.0;
    let mut var_b = 0.0;
    for (x, y) in a.iter().zip(b) {
        let dx = x - mean_a;
        let dy = y - mean_b;
        cov += dx * dy;
        var_a += dx * dx;
        var_b += dy * dy;
    }

    if var_a == 0.0 || var_b == 0.0 {
        return 0.0;
    }
    cov / (var_a * var_b).sqrt()
}

/// Pair up two dated series on the dates they share, in date order.
/// Multiple values on one date within a series are averaged first.
pub fn align_by_date(a: &[(NaiveDate, f64)], b: &[(NaiveDate, f64)]) -> (Vec<f64>, Vec<f64>) {
    let daily_a = daily_means(a);
    let daily_b = daily_means(b);

    daily_a
        .iter()
        .filter_map(|(date, pa)| daily_b.get(date).map(|pb| (*pa, *pb)))
        .unzip()
}

fn daily_means(series: &[(NaiveDate, f64)]) -> BTreeMap<NaiveDate, f64> {
    let mut acc: BTreeMap<NaiveDate, (f64, u32)> = BTreeMap::new();
    for (date, price) in series {
        let e = acc.entry(*date).or_insert((0.0, 0));
        e.0 += price;
        e.1 += 1;
    }
    acc.into_iter()
        .map(|(d, (sum, n))| (d, sum / f64::from(n)))
        .collect()
}

/// Split-half repetition heuristic.
///
/// The date-sorted series is cut at its midpoint and the first half is
/// correlated against the same number of leading points of the second half.
/// A correlation above the configured threshold flags a possible repeating
/// pattern. This is a rough signal, not a seasonal decomposition; short
/// series are never flagged.
pub fn seasonal_pattern(series: &[(NaiveDate, f64)]) -> bool {
    if series.len() < seasonal::MIN_SERIES_LEN {
        return false;
    }
    let mut sorted = series.to_vec();
    sorted.sort_by_key(|(d, _)| *d);
    let prices: Vec<f64> = sorted.iter().map(|(_, p)| *p).collect();

    let half = prices.len() / 2;
    let first = &prices[..half];
    let second = &prices[half..half * 2];
    pearson(first, second) > seasonal::CORRELATION_THRESHOLD
}

/// Correlation for every unordered pair of requested products, strongest first.
///
/// Pairs where either product has fewer than three points, or where fewer
/// than three dates are shared, are skipped.
pub fn correlated_pairs(products: &[String], points: &[TimeSeriesPoint]) -> Vec<CorrelatedPair> {
    let series = series_by_product(points);
    let mut pairs = Vec::new();

    for (i, p1) in products.iter().enumerate() {
        for p2 in &products[i + 1..] {
            let (Some(s1), Some(s2)) = (series.get(&group_key(p1)), series.get(&group_key(p2)))
            else {
                continue;
            };
            if s1.points.len() < MIN_CORRELATION_POINTS || s2.points.len() < MIN_CORRELATION_POINTS {
                continue;
            }
            let (a, b) = align_by_date(&s1.points, &s2.points);
            if a.len() < MIN_CORRELATION_POINTS {
                continue;
            }
            pairs.push(CorrelatedPair {
                product1: p1.clone(),
                product2: p2.clone(),
                correlation_strength: round2(pearson(&a, &b)),
            });
        }
    }

    pairs.sort_by(|x, y| {
        y.correlation_strength
            .abs()
            .total_cmp(&x.correlation_strength.abs())
    });
    pairs
}
