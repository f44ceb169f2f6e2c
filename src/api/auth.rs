//! Caller identity from the trusted header set by the identity proxy.

use std::convert::Infallible;

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};

use crate::access::{has_permission, Permission};
use crate::api::routes::ApiState;
use crate::error::{AppError, Result};

/// The authenticated caller id, if the request carried one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller(pub Option<String>);

impl Caller {
    pub fn is_authenticated(&self) -> bool {
        self.0.is_some()
    }

    /// The caller id, or 401.
    pub fn require(&self) -> Result<&str> {
        self.0.as_deref().ok_or(AppError::Unauthorized)
    }

    /// The caller id if its role grants `permission`; 401 when anonymous, 403 otherwise.
    pub async fn require_permission(&self, state: &ApiState, permission: Permission) -> Result<&str> {
        let user_id = self.require()?;
        if !has_permission(&state.store, user_id, permission).await {
            tracing::warn!(user_id, %permission, "Permission denied");
            return Err(AppError::Forbidden);
        }
        Ok(user_id)
    }
}

#[async_trait]
impl FromRequestParts<ApiState> for Caller {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &ApiState,
    ) -> std::result::Result<Self, Self::Rejection> {
        let id = parts
            .headers
            .get(state.config.auth_header.as_str())
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string);
        Ok(Caller(id))
    }
}
