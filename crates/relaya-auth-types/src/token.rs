//! JWT bearer-token validation.

use jsonwebtoken::{DecodingKey, Validation, decode};
use serde::Deserialize;
#[cfg(any(feature = "issuer", test))]
use serde::Serialize;
use uuid::Uuid;

/// Identity extracted from a validated bearer token.
#[derive(Debug, Clone)]
pub struct TokenInfo {
    pub user_id: Uuid,
    pub client_id: Uuid,
    pub exp: u64,
}

/// Errors returned by [`validate_bearer_token`].
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("invalid signature")]
    InvalidSignature,
    #[error("token expired")]
    Expired,
    #[error("malformed token")]
    Malformed,
}

/// JWT claims payload.
///
/// `sub` is the acting user's id, `cid` the client (workspace) the token is
/// scoped to — every campaign, post, and credential row is keyed by `cid`.
/// [`Serialize`] requires the `issuer` feature; services only validate.
#[derive(Debug, Deserialize)]
#[cfg_attr(any(feature = "issuer", test), derive(Serialize))]
pub struct JwtClaims {
    /// Acting user id (UUID string).
    pub sub: String,
    /// Client / workspace id (UUID string).
    pub cid: String,
    /// Expiration timestamp (seconds since UNIX epoch).
    pub exp: u64,
}

/// Decode and validate a bearer token, returning parsed identity.
///
/// Validation: HS256, exp checked, required claims `exp` + `sub`.
/// Default leeway = 60s — tolerates clock skew between services.
pub fn validate_bearer_token(token: &str, secret: &str) -> Result<TokenInfo, AuthError> {
    let mut validation = Validation::new(jsonwebtoken::Algorithm::HS256);
    validation.validate_exp = true;
    validation.required_spec_claims.clear();
    validation.set_required_spec_claims(&["exp", "sub"]);

    let data = decode::<JwtClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::Expired,
        jsonwebtoken::errors::ErrorKind::InvalidSignature
        | jsonwebtoken::errors::ErrorKind::InvalidEcdsaKey
        | jsonwebtoken::errors::ErrorKind::InvalidRsaKey(_) => AuthError::InvalidSignature,
        _ => AuthError::Malformed,
    })?;

    let user_id = data
        .claims
        .sub
        .parse::<Uuid>()
        .map_err(|_| AuthError::Malformed)?;
    let client_id = data
        .claims
        .cid
        .parse::<Uuid>()
        .map_err(|_| AuthError::Malformed)?;

    Ok(TokenInfo {
        user_id,
        client_id,
        exp: data.claims.exp,
    })
}

/// Sign a bearer token for the given user + client.
///
/// Requires the `issuer` feature — only the operator tooling and tests
/// create tokens; services never do.
#[cfg(any(feature = "issuer", test))]
pub fn issue_bearer_token(
    user_id: Uuid,
    client_id: Uuid,
    exp: u64,
    secret: &str,
) -> Result<String, AuthError> {
    let claims = JwtClaims {
        sub: user_id.to_string(),
        cid: client_id.to_string(),
        exp,
    };
    jsonwebtoken::encode(
        &jsonwebtoken::Header::default(),
        &claims,
        &jsonwebtoken::EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|_| AuthError::Malformed)
}
