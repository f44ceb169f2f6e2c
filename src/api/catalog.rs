use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::api::routes::ApiState;
use crate::catalog::{District, Division, Product, ReferenceCatalog, SHOP_TYPES};
use crate::db::ObservedLocations;
use crate::error::{AppError, Result};
use crate::types::non_empty;

#[derive(Debug, Default, Deserialize)]
pub struct DivisionQuery {
    pub division: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct DistrictQuery {
    pub district: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductCatalogResponse {
    pub products: &'static [Product],
    pub shop_types: &'static [&'static str],
}

/// Reference districts, optionally limited to one division.
pub async fn get_districts(Query(params): Query<DivisionQuery>) -> Result<Json<Vec<District>>> {
    let districts = match non_empty(params.division.as_deref()) {
        Some(name) => {
            let division = Division::parse(&name)
                .ok_or_else(|| AppError::Validation(format!("Unknown division '{name}'")))?;
            ReferenceCatalog::districts_in(division).copied().collect()
        }
        None => ReferenceCatalog::districts().to_vec(),
    };
    Ok(Json(districts))
}

pub async fn get_products() -> Json<ProductCatalogResponse> {
    Json(ProductCatalogResponse {
        products: ReferenceCatalog::products(),
        shop_types: SHOP_TYPES,
    })
}

/// Locations that appear in submitted data, as stored.
pub async fn get_observed_locations(
    State(state): State<ApiState>,
    Query(params): Query<DistrictQuery>,
) -> Result<Json<ObservedLocations>> {
    let district = non_empty(params.district.as_deref());
    Ok(Json(state.store.observed_locations(district.as_deref()).await?))
}

pub async fn get_observed_products(State(state): State<ApiState>) -> Result<Json<Vec<String>>> {
    Ok(Json(state.store.observed_products().await?))
}
