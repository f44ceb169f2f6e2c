use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::access::{Permission, Role};
use crate::api::auth::Caller;
use crate::api::routes::ApiState;
use crate::error::{AppError, Result};

#[derive(Debug, Deserialize)]
pub struct RoleUpdate {
    pub role: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleAssignment {
    pub user_id: String,
    pub role: Role,
}

/// Assign a role to a user. Admins only.
pub async fn put_user_role(
    State(state): State<ApiState>,
    caller: Caller,
    Path(user_id): Path<String>,
    Json(body): Json<RoleUpdate>,
) -> Result<Json<RoleAssignment>> {
    let admin = caller.require_permission(&state, Permission::ManageUsers).await?;
    let role = match body.role.trim().to_ascii_lowercase().as_str() {
        "admin" => Role::Admin,
        "manager" => Role::Manager,
        "user" => Role::User,
        other => {
            return Err(AppError::Validation(format!(
                "Unknown role '{other}', expected admin, manager or user"
            )))
        }
    };
    let name = role.as_str();
    state.store.set_user_role(&user_id, name).await?;
    info!(event = "ROLE_ASSIGNED", by = admin, user_id = %user_id, role = name);
    Ok(Json(RoleAssignment { user_id, role }))
}
