use axum::{extract::State, http::StatusCode, Json};
use tracing::{info, warn};

use crate::api::auth::Caller;
use crate::api::routes::ApiState;
use crate::error::{AppError, Result};
use crate::submission::validate;
use crate::types::{PriceEntry, PriceSubmission};

/// Record one observed price. The caller must be authenticated.
pub async fn post_entry(
    State(state): State<ApiState>,
    caller: Caller,
    Json(submission): Json<PriceSubmission>,
) -> Result<(StatusCode, Json<PriceEntry>)> {
    let user_id = caller.require()?;

    let entry = match validate(submission) {
        Ok(entry) => entry,
        Err(AppError::InvalidFields(fields)) => {
            let names: Vec<&str> = fields.iter().map(|f| f.field).collect();
            warn!(user_id, fields = ?names, "Rejected price submission");
            return Err(AppError::InvalidFields(fields));
        }
        Err(e) => return Err(e),
    };

    let saved = state.store.insert(&entry).await?;
    info!(
        event = "ENTRY_CREATED",
        id = saved.id,
        user_id,
        product = %saved.product_name,
        district = %saved.district,
        price = saved.price,
        "Price entry saved",
    );
    Ok((StatusCode::CREATED, Json(saved)))
}
