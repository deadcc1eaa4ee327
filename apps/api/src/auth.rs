//! Request principal consumption.
//!
//! Authentication itself happens upstream: the gateway validates the session
//! and forwards the caller's identity as `x-user-id` / `x-user-role` headers.
//! This module only models that pre-validated principal and the ownership
//! predicate used by the export handlers.

use async_trait::async_trait;
use axum::{extract::FromRequestParts, http::request::Parts};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Member,
    Admin,
}

impl Role {
    pub fn is_elevated(self) -> bool {
        matches!(self, Role::Admin)
    }

    fn parse(value: &str) -> Role {
        match value {
            "admin" => Role::Admin,
            _ => Role::Member,
        }
    }
}

/// The authenticated caller, as validated by the upstream gateway.
#[derive(Debug, Clone, Copy)]
pub struct AuthPrincipal {
    pub user_id: Uuid,
    pub role: Role,
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthPrincipal
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user_id = parts
            .headers
            .get("x-user-id")
            .and_then(|value| value.to_str().ok())
            .and_then(|value| Uuid::parse_str(value).ok())
            .ok_or(AppError::Unauthorized)?;

        let role = parts
            .headers
            .get("x-user-role")
            .and_then(|value| value.to_str().ok())
            .map(Role::parse)
            .unwrap_or(Role::Member);

        Ok(AuthPrincipal { user_id, role })
    }
}

/// True when the principal owns the resource or carries an elevated role.
pub fn is_owner_or_elevated(owner_id: Uuid, principal: &AuthPrincipal) -> bool {
    owner_id == principal.user_id || principal.role.is_elevated()
}
