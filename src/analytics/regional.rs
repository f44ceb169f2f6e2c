use crate::analytics::{group_by, group_key};
use crate::analytics::stats::summarize;
use crate::types::{DateRange, DistrictProductSummary, PriceObservation, RegionalPrice};

/// Average price and sample size per district for one product within a date range,
/// cheapest district first.
pub fn regional_comparison(
    observations: &[PriceObservation],
    product: &str,
    range: &DateRange,
) -> Vec<RegionalPrice> {
    let product = group_key(product);
    let matching: Vec<&PriceObservation> = observations
        .iter()
        .filter(|o| group_key(&o.product_name) == product && range.contains(o.date()))
        .collect();
    average_by_district(matching)
}

/// Group already-filtered observations by district, ascending by average price.
/// Equal averages are ordered by district name.
pub fn average_by_district<'a, I>(observations: I) -> Vec<RegionalPrice>
where
    I: IntoIterator<Item = &'a PriceObservation>,
{
    let mut out: Vec<(String, RegionalPrice)> = group_by(observations, |o| o.district.as_str())
        .into_iter()
        .map(|(key, group)| {
            let sum: f64 = group.items.iter().map(|o| o.price).sum();
            let n = group.items.len();
            (
                key,
                RegionalPrice {
                    district: group.label,
                    avg_price: sum / n as f64,
                    sample_size: n,
                },
            )
        })
        .collect();

    out.sort_by(|(ka, a), (kb, b)| a.avg_price.total_cmp(&b.avg_price).then_with(|| ka.cmp(kb)));
    out.into_iter().map(|(_, r)| r).collect()
}

/// Per-product price summary inside one district, most-reported product first.
pub fn district_breakdown(
    observations: &[PriceObservation],
    district: &str,
) -> Vec<DistrictProductSummary> {
    let district = group_key(district);
    let in_district = observations
        .iter()
        .filter(|o| group_key(&o.district) == district);

    let mut out: Vec<(String, DistrictProductSummary)> =
        group_by(in_district, |o| o.product_name.as_str())
            .into_iter()
            .filter_map(|(key, group)| {
                let prices: Vec<f64> = group.items.iter().map(|o| o.price).collect();
                let s = summarize(&prices)?;
                Some((
                    key,
                    DistrictProductSummary {
                        product_name: group.label,
                        min_price: s.min,
                        max_price: s.max,
                        avg_price: s.mean,
                        submission_count: s.count,
                    },
                ))
            })
            .collect();

    out.sort_by(|(ka, a), (kb, b)| {
        b.submission_count
            .cmp(&a.submission_count)
            .then_with(|| ka.cmp(kb))
    });
    out.into_iter().map(|(_, s)| s).collect()
}
