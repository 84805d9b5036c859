//! Bearer-credential resolution and the `Identity` extractor.

use axum::extract::FromRequestParts;
use axum_extra::extract::CookieJar;
use http::request::Parts;
use uuid::Uuid;

use relaya_core::error::AppError;

use crate::token::validate_bearer_token;

/// Cookie carrying the bearer token for browser-initiated flows.
pub const SESSION_COOKIE: &str = "relaya_session";

/// Query parameter carrying the bearer token.
pub const TOKEN_QUERY_PARAM: &str = "token";

/// Authenticated caller identity, resolved from a bearer token found in the
/// `token` query parameter, the `relaya_session` cookie, or the
/// `Authorization: Bearer` header — checked in that priority order.
///
/// Returns 401 if no source yields a token or the token fails validation.
/// This check runs before any OAuth state is issued or any dispatch starts.
#[derive(Debug, Clone)]
pub struct Identity {
    pub user_id: Uuid,
    pub client_id: Uuid,
}

/// Pull the raw bearer value out of the request, honoring the source
/// priority. Returns the first token found, valid or not — a garbage token
/// in the query parameter is not rescued by a good cookie.
pub fn resolve_bearer(parts: &Parts) -> Option<String> {
    if let Some(query) = parts.uri.query() {
        for pair in query.split('&') {
            if let Some(value) = pair.strip_prefix("token=") {
                if !value.is_empty() {
                    return Some(value.to_owned());
                }
            }
        }
    }

    let jar = CookieJar::from_headers(&parts.headers);
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        return Some(cookie.value().to_owned());
    }

    parts
        .headers
        .get(http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::to_owned)
}

/// State that can hand the extractor its JWT secret. Implemented by each
/// service's `AppState`.
pub trait JwtSecretSource {
    fn jwt_secret(&self) -> &str;
}

impl<S> FromRequestParts<S> for Identity
where
    S: JwtSecretSource + Send + Sync,
{
    type Rejection = AppError;

    // axum-core 0.5 defines this as `fn -> impl Future + Send` (not `async fn`).
    // In Rust 1.82+ precise capturing, `async fn` captures lifetimes differently,
    // causing E0195. Fix: extract values synchronously, return a 'static async move block.
    fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let token = resolve_bearer(parts);
        let info = token.and_then(|t| validate_bearer_token(&t, state.jwt_secret()).ok());

        async move {
            let info = info.ok_or(AppError::Unauthorized)?;
            Ok(Self {
                user_id: info.user_id,
                client_id: info.client_id,
            })
        }
    }
}
