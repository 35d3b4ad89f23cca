//! Double-submit CSRF protection.
//!
//! `GET /api/csrf-cookie` hands out a random token in the `XSRF-TOKEN`
//! cookie. Mutating requests must echo that value in `X-XSRF-TOKEN`; the
//! cookie and header have to match.

use axum::extract::FromRequestParts;
use axum::http::{header, request::Parts, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use uuid::Uuid;

use crate::error::AppError;
use crate::session::cookie_value;

pub const CSRF_COOKIE: &str = "XSRF-TOKEN";
pub const CSRF_HEADER: &str = "X-XSRF-TOKEN";
pub const CSRF_COOKIE_PATH: &str = "/api/csrf-cookie";

/// Issue a fresh CSRF token cookie.
pub async fn issue_csrf_cookie() -> Response {
    let token = Uuid::new_v4().simple().to_string();
    let cookie = format!("{CSRF_COOKIE}={token}; Path=/; SameSite=Lax");

    match HeaderValue::from_str(&cookie) {
        Ok(value) => (StatusCode::NO_CONTENT, [(header::SET_COOKIE, value)]).into_response(),
        Err(err) => AppError::Internal(err.into()).into_response(),
    }
}

/// Extractor that only succeeds when the request's CSRF header matches its cookie.
#[derive(Debug, Clone, Copy)]
pub struct CsrfVerified;

impl<S> FromRequestParts<S> for CsrfVerified
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let cookie = cookie_value(&parts.headers, CSRF_COOKIE).filter(|token| !token.is_empty());
        let header = parts
            .headers
            .get(CSRF_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::trim);

        match (cookie, header) {
            (Some(cookie), Some(header)) if cookie == header => Ok(CsrfVerified),
            _ => {
                tracing::warn!(uri = %parts.uri, "rejected request with missing or mismatched CSRF token");
                Err(AppError::csrf_mismatch())
            }
        }
    }
}
