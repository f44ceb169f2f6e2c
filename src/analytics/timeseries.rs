use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;

use crate::analytics::{group_by, group_key};
use crate::types::{PriceObservation, SeriesRecord, TimeSeriesPoint};

/// Flatten observations into chart points, oldest first. Location is the district only.
pub fn points_from(observations: &[PriceObservation]) -> Vec<TimeSeriesPoint> {
    let mut sorted: Vec<&PriceObservation> = observations.iter().collect();
    sorted.sort_by_key(|o| o.created_at);
    sorted
        .into_iter()
        .map(|o| TimeSeriesPoint {
            date: o.date(),
            price: o.price,
            product: o.product_name.clone(),
            location: o.district.clone(),
        })
        .collect()
}

/// Reshape points into one record per date with a column per selected product.
///
/// Several observations of one product on one date collapse to their mean.
/// A product with no observation on a date is `None`, so charts can skip the
/// gap instead of plotting zero. Records are in ascending date order.
pub fn assemble(points: &[TimeSeriesPoint], selected: &[String]) -> Vec<SeriesRecord> {
    // key -> output column name, first spelling wins
    let mut columns: Vec<(String, String)> = Vec::new();
    for name in selected {
        let key = group_key(name);
        if !key.is_empty() && !columns.iter().any(|(k, _)| *k == key) {
            columns.push((key, name.trim().to_string()));
        }
    }
    if columns.is_empty() {
        return Vec::new();
    }

    let mut sums: BTreeMap<NaiveDate, HashMap<String, (f64, u32)>> = BTreeMap::new();
    for point in points {
        let key = group_key(&point.product);
        if !columns.iter().any(|(k, _)| *k == key) {
            continue;
        }
        let acc = sums.entry(point.date).or_default().entry(key).or_insert((0.0, 0));
        acc.0 += point.price;
        acc.1 += 1;
    }

    sums.into_iter()
        .map(|(date, per_product)| {
            let values = columns
                .iter()
                .map(|(key, column)| {
                    let value = per_product.get(key).map(|(sum, n)| sum / f64::from(*n));
                    (column.clone(), value)
                })
                .collect();
            SeriesRecord { date, values }
        })
        .collect()
}

/// A single product's observations in date order.
#[derive(Debug, Clone)]
pub struct ProductSeries {
    pub label: String,
    pub points: Vec<(NaiveDate, f64)>,
}

impl ProductSeries {
    pub fn prices(&self) -> Vec<f64> {
        self.points.iter().map(|(_, p)| *p).collect()
    }
}

/// Split points per product (normalized key), each series sorted by date.
/// Same-date points keep their encounter order.
pub fn series_by_product(points: &[TimeSeriesPoint]) -> BTreeMap<String, ProductSeries> {
    group_by(points, |p| p.product.as_str())
        .into_iter()
        .map(|(key, group)| {
            let mut series: Vec<(NaiveDate, f64)> =
                group.items.iter().map(|p| (p.date, p.price)).collect();
            series.sort_by_key(|(d, _)| *d);
            (key, ProductSeries { label: group.label, points: series })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 2, d).unwrap()
    }

    fn point(product: &str, d: u32, price: f64) -> TimeSeriesPoint {
        TimeSeriesPoint { date: day(d), price, product: product.to_string(), location: "Dhaka".into() }
    }

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn gaps_are_none_not_zero() {
        let points = vec![point("A", 1, 50.0), point("B", 2, 70.0)];
        let series = assemble(&points, &names(&["A", "B"]));
        assert_eq!(series.len(), 2);

        assert_eq!(series[0].date, day(1));
        assert_eq!(series[0].values["A"], Some(50.0));
        assert_eq!(series[0].values["B"], None);

        assert_eq!(series[1].date, day(2));
        assert_eq!(series[1].values["A"], None);
        assert_eq!(series[1].values["B"], Some(70.0));
    }

    #[test]
    fn same_day_duplicates_use_true_mean() {
        // Pairwise averaging would give ((10+20)/2+60)/2 = 37.5; the mean is 30.
        let points = vec![point("A", 1, 10.0), point("A", 1, 20.0), point("A", 1, 60.0)];
        let series = assemble(&points, &names(&["A"]));
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].values["A"], Some(30.0));
    }

    #[test]
    fn output_is_chronological_regardless_of_input_order() {
        let points = vec![point("A", 20, 1.0), point("A", 3, 2.0), point("A", 11, 3.0)];
        let dates: Vec<_> = assemble(&points, &names(&["A"])).iter().map(|r| r.date).collect();
        assert_eq!(dates, vec![day(3), day(11), day(20)]);
    }

    #[test]
    fn unselected_products_are_ignored_and_names_normalized() {
        let points = vec![point("rice", 1, 80.0), point("Onion", 1, 60.0), point("Egg", 2, 45.0)];
        let series = assemble(&points, &names(&["Rice ", "onion"]));
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].values.len(), 2);
        assert_eq!(series[0].values["Rice"], Some(80.0));
        assert_eq!(series[0].values["onion"], Some(60.0));
    }

    #[test]
    fn nothing_selected_means_nothing_assembled() {
        assert!(assemble(&[point("A", 1, 1.0)], &[]).is_empty());
    }

    #[test]
    fn series_are_split_and_sorted() {
        let points = vec![point("A", 5, 3.0), point("B", 1, 9.0), point("a", 2, 1.0)];
        let by_product = series_by_product(&points);
        assert_eq!(by_product.len(), 2);
        assert_eq!(by_product["a"].points, vec![(day(2), 1.0), (day(5), 3.0)]);
        assert_eq!(by_product["a"].label, "A");
        assert_eq!(by_product["b"].prices(), vec![9.0]);
    }
}
