use crate::analytics::correlation::seasonal_pattern;
use crate::analytics::timeseries::series_by_product;
use crate::analytics::{round2, std_dev};
use crate::config::trend_thresholds::OVERALL_PCT;
use crate::types::{OverallTrend, TimeSeriesPoint, TrendAnalysis};

/// Long-run trend per product over the points' date span, alphabetical by product.
///
/// `percentage_change` compares the first and last observation; `volatility`
/// is the standard deviation of consecutive price differences.
pub fn analyze_trends(points: &[TimeSeriesPoint]) -> Vec<TrendAnalysis> {
    series_by_product(points)
        .into_values()
        .map(|series| {
            let prices = series.prices();
            let first = prices.first().copied().unwrap_or(0.0);
            let last = prices.last().copied().unwrap_or(0.0);
            let pct = if first > 0.0 { (last - first) / first * 100.0 } else { 0.0 };

            let overall_trend = if pct > OVERALL_PCT {
                OverallTrend::Increasing
            } else if pct < -OVERALL_PCT {
                OverallTrend::Decreasing
            } else {
                OverallTrend::Stable
            };

            let diffs: Vec<f64> = prices.windows(2).map(|w| w[1] - w[0]).collect();
            let volatility = std_dev(&diffs).unwrap_or(0.0);

            TrendAnalysis {
                product_name: series.label.clone(),
                overall_trend,
                percentage_change: round2(pct),
                volatility: round2(volatility),
                seasonal_patterns: seasonal_pattern(&series.points),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn tp(product: &str, d: u32, price: f64) -> TimeSeriesPoint {
        TimeSeriesPoint {
            date: NaiveDate::from_ymd_opt(2024, 6, d).unwrap(),
            price,
            product: product.into(),
            location: "Rajshahi".into(),
        }
    }

    #[test]
    fn classifies_direction_from_first_and_last() {
        let points = vec![
            tp("Rice", 1, 100.0),
            tp("Onion", 1, 80.0),
            tp("Rice", 2, 104.0),
            tp("Onion", 3, 70.0),
            tp("Egg", 1, 45.0),
            tp("Egg", 2, 46.0),
            tp("Rice", 3, 110.0),
        ];
        let out = analyze_trends(&points);
        let names: Vec<_> = out.iter().map(|t| t.product_name.as_str()).collect();
        assert_eq!(names, vec!["Egg", "Onion", "Rice"]);

        assert_eq!(out[0].overall_trend, OverallTrend::Stable);
        assert_eq!(out[0].percentage_change, 2.22);
        assert_eq!(out[1].overall_trend, OverallTrend::Decreasing);
        assert_eq!(out[1].percentage_change, -12.5);
        assert_eq!(out[2].overall_trend, OverallTrend::Increasing);
        assert_eq!(out[2].percentage_change, 10.0);
    }

    #[test]
    fn volatility_is_spread_of_daily_moves() {
        // moves: +10, -10, +10, -10 -> mean 0, sd 10
        let points: Vec<_> = [100.0, 110.0, 100.0, 110.0, 100.0]
            .iter()
            .enumerate()
            .map(|(i, p)| tp("Sugar", i as u32 + 1, *p))
            .collect();
        let out = analyze_trends(&points);
        assert_eq!(out[0].volatility, 10.0);
        assert_eq!(out[0].overall_trend, OverallTrend::Stable);
        assert!(!out[0].seasonal_patterns);
    }

    #[test]
    fn single_point_has_no_change_or_volatility() {
        let out = analyze_trends(&[tp("Salt", 1, 40.0)]);
        assert_eq!(out[0].percentage_change, 0.0);
        assert_eq!(out[0].volatility, 0.0);
    }

    #[test]
    fn empty_points_give_empty_analysis() {
        assert!(analyze_trends(&[]).is_empty());
    }
}
