//! Session-cookie authentication.
//!
//! Sessions are issued elsewhere; this layer only resolves the
//! `catalog_session` cookie to the [`Identity`] it was issued for.

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Context;
use axum::extract::{FromRef, FromRequestParts};
use axum::http::{header, request::Parts, HeaderMap};
use tokio::sync::RwLock;

use catalog_authz::{Identity, Role};
use catalog_kernel::settings::AuthSettings;

use crate::error::AppError;

pub const SESSION_COOKIE: &str = "catalog_session";

/// Shared map from session token to identity.
#[derive(Clone, Default)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<String, Identity>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the store from configured sessions, rejecting unknown roles.
    pub fn from_settings(settings: &AuthSettings) -> anyhow::Result<Self> {
        let mut sessions = HashMap::with_capacity(settings.sessions.len());
        for seed in &settings.sessions {
            let roles = seed
                .roles
                .iter()
                .map(|role| role.parse::<Role>())
                .collect::<Result<Vec<_>, _>>()
                .with_context(|| format!("invalid roles for session user '{}'", seed.user_id))?;
            sessions.insert(seed.token.clone(), Identity::new(seed.user_id.clone(), roles));
        }

        tracing::info!(count = sessions.len(), "loaded configured sessions");
        Ok(Self {
            sessions: Arc::new(RwLock::new(sessions)),
        })
    }

    pub async fn insert(&self, token: impl Into<String>, identity: Identity) {
        self.sessions.write().await.insert(token.into(), identity);
    }

    pub async fn revoke(&self, token: &str) -> bool {
        self.sessions.write().await.remove(token).is_some()
    }

    pub async fn resolve(&self, token: &str) -> Option<Identity> {
        self.sessions.read().await.get(token).cloned()
    }
}

/// Value of cookie `name` across all `Cookie` headers.
pub fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.trim().to_string())
}

/// Extractor for the authenticated identity of the request.
///
/// Rejects with 401 when the session cookie is missing or unknown.
#[derive(Debug, Clone)]
pub struct CurrentIdentity(pub Identity);

impl<S> FromRequestParts<S> for CurrentIdentity
where
    S: Send + Sync,
    SessionStore: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let token = cookie_value(&parts.headers, SESSION_COOKIE)
            .filter(|token| !token.is_empty())
            .ok_or_else(|| AppError::unauthorized("Unauthenticated."))?;

        let sessions = SessionStore::from_ref(state);
        match sessions.resolve(&token).await {
            Some(identity) => Ok(CurrentIdentity(identity)),
            None => {
                tracing::warn!("request carried an unknown session token");
                Err(AppError::unauthorized("Unauthenticated."))
            }
        }
    }
}
