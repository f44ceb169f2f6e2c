use crate::analytics::{mean, std_dev};
use crate::config::stability_thresholds::{HIGH_MAX_CV, MEDIUM_MAX_CV, MIN_SERIES_LEN};
use crate::types::Stability;

/// stdDev / mean, or `None` for an empty series or a zero mean.
pub fn coefficient_of_variation(prices: &[f64]) -> Option<f64> {
    let m = mean(prices)?;
    if m == 0.0 {
        return None;
    }
    Some(std_dev(prices)? / m)
}

pub fn classify_cv(cv: f64) -> Stability {
    if cv < HIGH_MAX_CV {
        Stability::High
    } else if cv < MEDIUM_MAX_CV {
        Stability::Medium
    } else {
        Stability::Low
    }
}

/// Too-short series and zero-mean series default to `Medium`.
pub fn classify(prices: &[f64]) -> Stability {
    if prices.len() < MIN_SERIES_LEN {
        return Stability::Medium;
    }
    coefficient_of_variation(prices).map_or(Stability::Medium, classify_cv)
}
