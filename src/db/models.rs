/// Database row types matching `migrations/`.
/// Used by sqlx for typed queries.
use chrono::{DateTime, NaiveDateTime, Utc};

use crate::types::{PriceEntry, PriceObservation};

#[derive(Debug, sqlx::FromRow)]
pub struct PriceEntryRow {
    pub id: i64,
    pub user_email: String,
    pub district: String,
    pub upazilla: String,
    pub product_id: i64,
    pub product_name: String,
    pub unit: String,
    pub price: f64,
    pub category: Option<String>,
    pub other_category: Option<String>,
    pub purchase_option: Option<String>,
    pub other_purchase_option: Option<String>,
    pub shop_type: Option<String>,
    pub other_shop_type: Option<String>,
    pub online_shop_name: Option<String>,
    pub notes: Option<String>,
    pub created_at: String,
}

impl From<PriceEntryRow> for PriceEntry {
    fn from(r: PriceEntryRow) -> Self {
        PriceEntry {
            id: r.id,
            user_email: r.user_email,
            district: r.district,
            upazilla: r.upazilla,
            product_id: r.product_id,
            product_name: r.product_name,
            unit: r.unit,
            price: r.price,
            category: r.category,
            other_category: r.other_category,
            purchase_option: r.purchase_option,
            other_purchase_option: r.other_purchase_option,
            shop_type: r.shop_type,
            other_shop_type: r.other_shop_type,
            online_shop_name: r.online_shop_name,
            notes: r.notes,
            created_at: r.created_at,
        }
    }
}

/// Columns the aggregators need.
#[derive(Debug, sqlx::FromRow)]
pub struct ObservationRow {
    pub product_name: String,
    pub district: String,
    pub upazilla: String,
    pub price: f64,
    pub unit: Option<String>,
    pub created_at: String,
}

impl ObservationRow {
    /// `None` when the stored timestamp cannot be read.
    pub fn into_observation(self) -> Option<PriceObservation> {
        let created_at = parse_timestamp(&self.created_at)?;
        Some(PriceObservation {
            product_name: self.product_name,
            district: self.district,
            upazilla: self.upazilla,
            price: self.price,
            unit: self.unit,
            created_at,
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
pub struct UserRoleRow {
    pub role: Option<String>,
}

/// RFC 3339 as written by the store, falling back to SQLite's `datetime()` layout.
pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
                .ok()
                .map(|naive| naive.and_utc())
        })
}
