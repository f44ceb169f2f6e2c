use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use tracing::{debug, warn};

use crate::db::filter::EntryFilter;
use crate::db::models::{ObservationRow, PriceEntryRow, UserRoleRow};
use crate::error::Result;
use crate::types::{NewPriceEntry, PriceEntry, PriceObservation};

/// Distinct locations that appear in submitted data.
///
/// Distinct from the static reference catalog: it only lists places someone
/// has actually reported from, spelled the way they were stored.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ObservedLocations {
    pub districts: Vec<String>,
    /// Upazillas of the requested district; empty when no district was given.
    pub upazillas: Vec<String>,
}

/// All reads and writes against `price_entries` and `users`.
#[derive(Clone)]
pub struct PriceStore {
    pool: SqlitePool,
}

const ENTRY_COLUMNS: &str = "id, user_email, district, upazilla, product_id, product_name, unit, \
     price, category, other_category, purchase_option, other_purchase_option, shop_type, \
     other_shop_type, online_shop_name, notes, created_at";

impl PriceStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn insert(&self, entry: &NewPriceEntry) -> Result<PriceEntry> {
        self.insert_at(entry, Utc::now()).await
    }

    /// Insert with an explicit submission time.
    pub async fn insert_at(&self, entry: &NewPriceEntry, at: DateTime<Utc>) -> Result<PriceEntry> {
        let created_at = at.to_rfc3339_opts(SecondsFormat::Secs, true);

        let row: PriceEntryRow = sqlx::query_as(&format!(
            r#"
            INSERT INTO price_entries (
                user_email, district, upazilla, product_id, product_name, unit, price,
                category, other_category, purchase_option, other_purchase_option,
                shop_type, other_shop_type, online_shop_name, notes, created_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING {ENTRY_COLUMNS}
            "#
        ))
        .bind(&entry.user_email)
        .bind(&entry.district)
        .bind(&entry.upazilla)
        .bind(entry.product_id)
        .bind(&entry.product_name)
        .bind(&entry.unit)
        .bind(entry.price)
        .bind(&entry.category)
        .bind(&entry.other_category)
        .bind(&entry.purchase_option)
        .bind(&entry.other_purchase_option)
        .bind(&entry.shop_type)
        .bind(&entry.other_shop_type)
        .bind(&entry.online_shop_name)
        .bind(&entry.notes)
        .bind(created_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    /// Rows matching `filter`, oldest first, reduced to what the aggregators read.
    pub async fn observations(&self, filter: &EntryFilter) -> Result<Vec<PriceObservation>> {
        let mut qb = QueryBuilder::<Sqlite>::new(
            "SELECT product_name, district, upazilla, price, unit, created_at FROM price_entries",
        );
        filter.push_where(&mut qb);
        qb.push(" ORDER BY created_at ASC, id ASC");

        let rows: Vec<ObservationRow> = qb.build_query_as().fetch_all(&self.pool).await?;
        let total = rows.len();
        let observations: Vec<PriceObservation> = rows
            .into_iter()
            .filter_map(ObservationRow::into_observation)
            .collect();
        if observations.len() < total {
            warn!(
                skipped = total - observations.len(),
                "Skipped price rows with unreadable timestamps"
            );
        }
        debug!(rows = observations.len(), "Loaded price observations");
        Ok(observations)
    }

    /// One page of full rows, newest first.
    pub async fn page(&self, filter: &EntryFilter, limit: i64, offset: i64) -> Result<Vec<PriceEntry>> {
        let mut qb = QueryBuilder::<Sqlite>::new(format!("SELECT {ENTRY_COLUMNS} FROM price_entries"));
        filter.push_where(&mut qb);
        qb.push(" ORDER BY created_at DESC, id DESC LIMIT ")
            .push_bind(limit)
            .push(" OFFSET ")
            .push_bind(offset);

        let rows: Vec<PriceEntryRow> = qb.build_query_as().fetch_all(&self.pool).await?;
        Ok(rows.into_iter().map(PriceEntry::from).collect())
    }

    pub async fn count(&self, filter: &EntryFilter) -> Result<i64> {
        let mut qb = QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM price_entries");
        filter.push_where(&mut qb);
        let count: i64 = qb.build_query_scalar().fetch_one(&self.pool).await?;
        Ok(count)
    }

    pub async fn observed_locations(&self, district: Option<&str>) -> Result<ObservedLocations> {
        let districts: Vec<String> = sqlx::query_scalar(
            "SELECT DISTINCT district FROM price_entries WHERE trim(district) != '' ORDER BY district",
        )
        .fetch_all(&self.pool)
        .await?;

        let upazillas = match district {
            Some(d) => {
                sqlx::query_scalar(
                    r#"
                    SELECT DISTINCT upazilla FROM price_entries
                    WHERE lower(trim(district)) = ? AND trim(upazilla) != ''
                    ORDER BY upazilla
                    "#,
                )
                .bind(crate::analytics::group_key(d))
                .fetch_all(&self.pool)
                .await?
            }
            None => Vec::new(),
        };

        Ok(ObservedLocations { districts, upazillas })
    }

    /// Distinct product names present in the store, sorted.
    pub async fn observed_products(&self) -> Result<Vec<String>> {
        let products = sqlx::query_scalar(
            "SELECT DISTINCT product_name FROM price_entries WHERE trim(product_name) != '' ORDER BY product_name",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(products)
    }

    /// The stored role for a caller, if any.
    pub async fn user_role(&self, user_id: &str) -> Result<Option<String>> {
        let row: Option<UserRoleRow> = sqlx::query_as("SELECT role FROM users WHERE user_id = ?")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.and_then(|r| r.role))
    }

    pub async fn set_user_role(&self, user_id: &str, role: &str) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO users (user_id, role) VALUES (?, ?)
            ON CONFLICT(user_id) DO UPDATE SET role = excluded.role
            "#,
        )
        .bind(user_id)
        .bind(role)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub async fn ping(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.pool).await.is_ok()
    }
}
