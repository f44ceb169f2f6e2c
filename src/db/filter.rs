//! WHERE-clause construction for price-entry queries.
//!
//! Values are always bound, never interpolated. Name comparisons use the
//! same trim + lowercase normalization as the aggregators.

use chrono::Days;
use sqlx::{QueryBuilder, Sqlite};

use crate::analytics::group_key;
use crate::types::{DateRange, LocationFilter};

#[derive(Debug, Clone, Default)]
pub struct EntryFilter {
    pub date_range: Option<DateRange>,
    pub location: LocationFilter,
    /// Restrict to these products (normalized match). Empty means all products.
    pub products: Vec<String>,
    /// Case-insensitive substring over product, district and upazilla.
    pub search: Option<String>,
}

impl EntryFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn date_range(mut self, range: DateRange) -> Self {
        self.date_range = Some(range);
        self
    }

    pub fn location(mut self, location: LocationFilter) -> Self {
        self.location = location;
        self
    }

    pub fn product(mut self, product: impl Into<String>) -> Self {
        self.products.push(product.into());
        self
    }

    pub fn products(mut self, products: &[String]) -> Self {
        self.products.extend(products.iter().cloned());
        self
    }

    pub fn search(mut self, term: Option<String>) -> Self {
        self.search = term.filter(|t| !t.trim().is_empty());
        self
    }

    /// Append ` WHERE ...` (or nothing) to `qb`.
    pub fn push_where<'a>(&'a self, qb: &mut QueryBuilder<'a, Sqlite>) {
        let mut first = true;
        let mut and = |qb: &mut QueryBuilder<'a, Sqlite>| {
            qb.push(if first { " WHERE " } else { " AND " });
            first = false;
        };

        if let Some(range) = &self.date_range {
            // created_at is RFC 3339 text, so date bounds compare lexically
            let end_exclusive = range
                .end
                .checked_add_days(Days::new(1))
                .unwrap_or(range.end);
            and(qb);
            qb.push("created_at >= ")
                .push_bind(range.start.format("%Y-%m-%d").to_string())
                .push(" AND created_at < ")
                .push_bind(end_exclusive.format("%Y-%m-%d").to_string());
        }
        if let Some(district) = &self.location.district {
            and(qb);
            qb.push("lower(trim(district)) = ").push_bind(group_key(district));
        }
        if let Some(upazilla) = &self.location.upazilla {
            and(qb);
            qb.push("lower(trim(upazilla)) = ").push_bind(group_key(upazilla));
        }
        if !self.products.is_empty() {
            and(qb);
            qb.push("lower(trim(product_name)) IN (");
            let mut list = qb.separated(", ");
            for product in &self.products {
                list.push_bind(group_key(product));
            }
            list.push_unseparated(")");
        }
        if let Some(term) = &self.search {
            let pattern = format!("%{}%", escape_like(term.trim()));
            and(qb);
            qb.push("(product_name LIKE ")
                .push_bind(pattern.clone())
                .push(" ESCAPE '\\' OR district LIKE ")
                .push_bind(pattern.clone())
                .push(" ESCAPE '\\' OR upazilla LIKE ")
                .push_bind(pattern)
                .push(" ESCAPE '\\')");
        }
    }
}

fn escape_like(term: &str) -> String {
    term.replace('\\', "\\\\").replace('%', "\\%").replace('_', "\\_")
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn sql(filter: &EntryFilter) -> String {
        let mut qb = QueryBuilder::<Sqlite>::new("SELECT * FROM price_entries");
        filter.push_where(&mut qb);
        qb.sql().to_string()
    }

    #[test]
    fn empty_filter_adds_nothing() {
        assert_eq!(sql(&EntryFilter::new()), "SELECT * FROM price_entries");
    }

    #[test]
    fn clauses_are_joined_with_and_and_bound() {
        let filter = EntryFilter::new()
            .date_range(DateRange {
                start: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                end: NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
            })
            .location(LocationFilter::new(Some("Dhaka"), None))
            .product("Rice")
            .product("Onion");
        assert_eq!(
            sql(&filter),
            "SELECT * FROM price_entries WHERE created_at >= ? AND created_at < ? \
             AND lower(trim(district)) = ? AND lower(trim(product_name)) IN (?, ?)"
        );
    }

    #[test]
    fn blank_search_is_dropped() {
        let filter = EntryFilter::new().search(Some("   ".to_string()));
        assert!(filter.search.is_none());
    }

    #[test]
    fn like_wildcards_are_escaped() {
        assert_eq!(escape_like("50%_off\\"), "50\\%\\_off\\\\");
    }
}
