//! Validation of incoming price submissions against the reference catalog.
//!
//! All field problems are collected before rejecting, so the client can mark
//! every bad input at once.

use crate::catalog::{Product, ReferenceCatalog, SHOP_ONLINE, SHOP_TYPES};
use crate::error::{AppError, Result};
use crate::types::{non_empty, FieldError, NewPriceEntry, PriceSubmission};

/// True for the free-text sentinel used by every selector ("Other"/"Others").
pub fn is_other(value: &str) -> bool {
    let v = value.trim();
    v.eq_ignore_ascii_case("other") || v.eq_ignore_ascii_case("others")
}

fn valid_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && !domain.is_empty() && !domain.contains('@'),
        None => false,
    }
}

/// Canonical spelling of `value` within `options`.
fn pick(options: &'static [&'static str], value: &str) -> Option<&'static str> {
    let value = value.trim();
    options.iter().copied().find(|o| o.eq_ignore_ascii_case(value))
}

/// Resolve one selector and its free-text companion.
///
/// Returns the canonical selector value and the companion, which is kept only
/// when the selector is the "Other" sentinel.
fn selector(
    errors: &mut Vec<FieldError>,
    field: &'static str,
    other_field: &'static str,
    options: &'static [&'static str],
    value: Option<String>,
    other: Option<String>,
) -> (Option<String>, Option<String>) {
    let Some(value) = value else {
        return (None, None);
    };
    let Some(canonical) = pick(options, &value) else {
        errors.push(FieldError::new(field, format!("'{value}' is not a valid option")));
        return (None, None);
    };
    if !is_other(canonical) {
        return (Some(canonical.to_string()), None);
    }
    if other.is_none() {
        errors.push(FieldError::new(other_field, "Please specify when selecting Other"));
    }
    (Some(canonical.to_string()), other)
}

/// Check a submission and resolve catalog names. `product_name` and `unit`
/// are taken from the catalog, never from the client.
pub fn validate(submission: PriceSubmission) -> Result<NewPriceEntry> {
    let mut errors = Vec::new();

    let user_email = submission.user_email.trim().to_string();
    if !valid_email(&user_email) {
        errors.push(FieldError::new("userEmail", "A valid email address is required"));
    }

    let district = ReferenceCatalog::find_district(&submission.district);
    let upazilla = match district {
        Some(d) => {
            let found = d.find_upazilla(&submission.upazilla);
            if found.is_none() {
                errors.push(FieldError::new(
                    "upazilla",
                    format!("'{}' is not an upazilla of {}", submission.upazilla.trim(), d.name),
                ));
            }
            found
        }
        None if submission.district.trim().is_empty() => {
            errors.push(FieldError::new("district", "District is required"));
            None
        }
        None => {
            errors.push(FieldError::new(
                "district",
                format!("'{}' is not a known district", submission.district.trim()),
            ));
            None
        }
    };

    let product: Option<&Product> = ReferenceCatalog::find_product(submission.product_id);
    if product.is_none() {
        errors.push(FieldError::new("productId", "Unknown product"));
    }

    if !submission.price.is_finite() || submission.price <= 0.0 {
        errors.push(FieldError::new("price", "Price must be a positive number"));
    }

    let (category, other_category, purchase_option, other_purchase_option) = match product {
        Some(p) => {
            let category = non_empty(submission.category.as_deref());
            if p.has_categories() && category.is_none() {
                errors.push(FieldError::new("category", format!("{} requires a category", p.name)));
            }
            let (category, other_category) = if p.has_categories() {
                selector(
                    &mut errors,
                    "category",
                    "otherCategory",
                    p.categories,
                    category,
                    non_empty(submission.other_category.as_deref()),
                )
            } else {
                (None, None)
            };
            let (purchase_option, other_purchase_option) = selector(
                &mut errors,
                "purchaseOption",
                "otherPurchaseOption",
                p.purchase_options,
                non_empty(submission.purchase_option.as_deref()),
                non_empty(submission.other_purchase_option.as_deref()),
            );
            (category, other_category, purchase_option, other_purchase_option)
        }
        None => (None, None, None, None),
    };

    let (shop_type, other_shop_type) = selector(
        &mut errors,
        "shopType",
        "otherShopType",
        SHOP_TYPES,
        non_empty(submission.shop_type.as_deref()),
        non_empty(submission.other_shop_type.as_deref()),
    );

    let online_shop_name = match (shop_type.as_deref(), product) {
        (Some(SHOP_ONLINE), Some(p)) => {
            let shop = non_empty(submission.online_shop_name.as_deref())
                .and_then(|name| pick(p.online_shops, &name));
            if shop.is_none() {
                errors.push(FieldError::new(
                    "onlineShopName",
                    "Choose an online shop from the list",
                ));
            }
            shop.map(str::to_string)
        }
        _ => None,
    };

    let (Some(district), Some(upazilla), Some(product)) = (district, upazilla, product) else {
        return Err(AppError::InvalidFields(errors));
    };
    if !errors.is_empty() {
        return Err(AppError::InvalidFields(errors));
    }

    Ok(NewPriceEntry {
        user_email,
        district: district.name.to_string(),
        upazilla: upazilla.to_string(),
        product_id: i64::from(product.id),
        product_name: product.name.to_string(),
        unit: product.unit.to_string(),
        price: submission.price,
        category,
        other_category,
        purchase_option,
        other_purchase_option,
        shop_type,
        other_shop_type,
        online_shop_name,
        notes: non_empty(submission.notes.as_deref()),
    })
}
