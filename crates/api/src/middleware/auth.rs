//! # Authentication Module
//!
//! Validates the caller's bearer token against the identity service and
//! attaches the resulting [`AuthenticatedUser`] to the request. Handlers read
//! it back with `Extension<AuthenticatedUser>` and hand it to the service
//! explicitly.
//!
//! Tokens are taken from the `Authorization: Bearer <token>` header, falling
//! back to the `access_token` cookie.

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    extract::{Request, State},
    http::{HeaderMap, header},
    middleware::Next,
    response::Response,
};
use eyre::{Result, WrapErr, eyre};
use meets_core::{
    errors::MeetError,
    models::identity::{AuthenticatedUser, Role},
};
use serde::Deserialize;

use crate::{ApiState, middleware::error_handling::AppError};

/// Resolves a bearer token into the subject it was issued to.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn authenticate(&self, token: &str) -> Result<AuthenticatedUser>;
}

/// Identity service client calling `GET {base_url}/me`.
#[derive(Debug, Clone)]
pub struct RemoteIdentityProvider {
    client: reqwest::Client,
    base_url: String,
    elevated_role: String,
}

impl RemoteIdentityProvider {
    pub fn new(base_url: impl Into<String>, elevated_role: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            elevated_role: elevated_role.into(),
        }
    }
}

/// Shape of the identity service's `/me` response. Field names are matched
/// in both the service's capitalized form and snake case.
#[derive(Debug, Deserialize)]
struct IdentityResponse {
    #[serde(default, alias = "ID")]
    id: String,
    #[serde(default, alias = "Uuid")]
    uuid: String,
    #[serde(default, alias = "Email")]
    email: String,
    #[serde(default, alias = "Roles")]
    roles: Vec<String>,
}

impl IdentityResponse {
    fn into_user(self, elevated_role: &str) -> AuthenticatedUser {
        AuthenticatedUser {
            id: self.id,
            uuid: self.uuid,
            email: self.email,
            roles: self
                .roles
                .iter()
                .map(|name| Role::from_name(name, elevated_role))
                .collect(),
        }
    }
}

#[async_trait]
impl IdentityProvider for RemoteIdentityProvider {
    async fn authenticate(&self, token: &str) -> Result<AuthenticatedUser> {
        let url = format!("{}/me", self.base_url.trim_end_matches('/'));

        let response = self
            .client
            .get(&url)
            .bearer_auth(token)
            .send()
            .await
            .wrap_err("identity service unreachable")?;

        if !response.status().is_success() {
            return Err(eyre!("invalid token, status: {}", response.status().as_u16()));
        }

        let identity: IdentityResponse = response
            .json()
            .await
            .wrap_err("malformed identity response")?;

        Ok(identity.into_user(&self.elevated_role))
    }
}

/// Pulls the access token from the bearer header or the `access_token` cookie.
pub fn extract_token(headers: &HeaderMap) -> Option<String> {
    let bearer = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty());
    if let Some(token) = bearer {
        return Some(token.to_string());
    }

    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|cookies| cookies.split(';'))
        .filter_map(|cookie| cookie.trim().strip_prefix("access_token="))
        .find(|token| !token.is_empty())
        .map(str::to_string)
}

/// Rejects unauthenticated requests and stores the caller's identity in the
/// request extensions.
pub async fn require_auth(
    State(state): State<Arc<ApiState>>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = extract_token(request.headers()).ok_or_else(|| {
        AppError(MeetError::Authentication("missing access token".to_string()))
    })?;

    let user = state.identity.authenticate(&token).await.map_err(|err| {
        tracing::warn!(error = %err, "rejected access token");
        AppError(MeetError::Authentication("invalid access token".to_string()))
    })?;

    tracing::debug!(user_uuid = %user.uuid, elevated = user.is_elevated(), "authenticated request");
    request.extensions_mut().insert(user);

    Ok(next.run(request).await)
}
