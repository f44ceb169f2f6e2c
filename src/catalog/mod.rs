//! Static reference catalog: administrative locations and the product list.
//!
//! This is the *reference* catalog used to validate submissions. The set of
//! locations that actually appear in submitted data is a separate,
//! data-driven list (`db::store::ObservedLocations`) and is never merged
//! into these tables.

pub mod districts;
pub mod products;

use serde::Serialize;

pub use districts::DISTRICTS;
pub use products::{Product, PRODUCTS, SHOP_ONLINE, SHOP_TYPES};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Division {
    Barishal,
    Chattogram,
    Dhaka,
    Khulna,
    Mymensingh,
    Rajshahi,
    Rangpur,
    Sylhet,
}

impl Division {
    pub const ALL: [Division; 8] = [
        Division::Barishal,
        Division::Chattogram,
        Division::Dhaka,
        Division::Khulna,
        Division::Mymensingh,
        Division::Rajshahi,
        Division::Rangpur,
        Division::Sylhet,
    ];

    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|d| d.to_string().eq_ignore_ascii_case(s))
    }
}

impl std::fmt::Display for Division {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Division::Barishal => "Barishal",
            Division::Chattogram => "Chattogram",
            Division::Dhaka => "Dhaka",
            Division::Khulna => "Khulna",
            Division::Mymensingh => "Mymensingh",
            Division::Rajshahi => "Rajshahi",
            Division::Rangpur => "Rangpur",
            Division::Sylhet => "Sylhet",
        };
        write!(f, "{s}")
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct District {
    pub id: u32,
    pub name: &'static str,
    pub division: Division,
    pub upazillas: &'static [&'static str],
}

impl District {
    /// Canonical spelling of `upazilla` within this district, matched case-insensitively.
    pub fn find_upazilla(&self, upazilla: &str) -> Option<&'static str> {
        let upazilla = upazilla.trim();
        self.upazillas
            .iter()
            .copied()
            .find(|u| u.eq_ignore_ascii_case(upazilla))
    }
}

/// Read-only view over the static tables.
pub struct ReferenceCatalog;

impl ReferenceCatalog {
    pub fn districts() -> &'static [District] {
        DISTRICTS
    }

    pub fn districts_in(division: Division) -> impl Iterator<Item = &'static District> {
        DISTRICTS.iter().filter(move |d| d.division == division)
    }

    pub fn find_district(name: &str) -> Option<&'static District> {
        let name = name.trim();
        DISTRICTS.iter().find(|d| d.name.eq_ignore_ascii_case(name))
    }

    pub fn products() -> &'static [Product] {
        PRODUCTS
    }

    pub fn find_product(id: i64) -> Option<&'static Product> {
        PRODUCTS.iter().find(|p| i64::from(p.id) == id)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn sixty_four_districts_in_eight_divisions() {
        assert_eq!(DISTRICTS.len(), 64);
        let divisions: HashSet<Division> = DISTRICTS.iter().map(|d| d.division).collect();
        assert_eq!(divisions.len(), 8);
        let ids: HashSet<u32> = DISTRICTS.iter().map(|d| d.id).collect();
        assert_eq!(ids.len(), 64);
        assert!(DISTRICTS.iter().all(|d| !d.upazillas.is_empty()));
    }

    #[test]
    fn division_counts_match_administrative_layout() {
        let count = |d| ReferenceCatalog::districts_in(d).count();
        assert_eq!(count(Division::Dhaka), 13);
        assert_eq!(count(Division::Chattogram), 11);
        assert_eq!(count(Division::Sylhet), 4);
        assert_eq!(count(Division::Mymensingh), 4);
    }

    #[test]
    fn lookups_are_case_insensitive_and_return_canonical_names() {
        let d = ReferenceCatalog::find_district("  dhaka ").unwrap();
        assert_eq!(d.name, "Dhaka");
        let cumilla = ReferenceCatalog::find_district("Cumilla").unwrap();
        assert_eq!(cumilla.find_upazilla("laksam"), Some("Laksam"));
        assert_eq!(cumilla.find_upazilla("Savar"), None);
        assert!(ReferenceCatalog::find_district("Atlantis").is_none());
        assert_eq!(Division::parse("rangpur"), Some(Division::Rangpur));
    }
}
