//! Pure aggregation over price observations.
//!
//! Every grouping in this module goes through [`group_key`]: names are
//! trimmed and case-folded before comparison, so `"Rice"`, `" rice"` and
//! `"RICE"` form one group. The label reported for a group is the first
//! spelling seen. Grouped output is ordered alphabetically by key unless an
//! aggregator documents a different order.

pub mod comparison;
pub mod correlation;
pub mod regional;
pub mod stability;
pub mod stats;
pub mod timeseries;
pub mod trends;

use std::collections::BTreeMap;

/// Normalized grouping key for product and district names.
pub fn group_key(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Items bucketed under one normalized key.
#[derive(Debug, Clone)]
pub struct Group<T> {
    pub label: String,
    pub items: Vec<T>,
}

/// Bucket items by normalized name, keeping encounter order inside each bucket.
pub fn group_by<T, I, F>(items: I, name: F) -> BTreeMap<String, Group<T>>
where
    I: IntoIterator<Item = T>,
    F: Fn(&T) -> &str,
{
    let mut groups: BTreeMap<String, Group<T>> = BTreeMap::new();
    for item in items {
        let raw = name(&item);
        let key = group_key(raw);
        let label = raw.trim().to_string();
        groups
            .entry(key)
            .or_insert_with(|| Group { label, items: Vec::new() })
            .items
            .push(item);
    }
    groups
}

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Population standard deviation.
pub fn std_dev(values: &[f64]) -> Option<f64> {
    let m = mean(values)?;
    let var = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64;
    Some(var.sqrt())
}

/// Two-decimal rounding used for reported percentages and indices.
pub fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}
