use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
};
use tracing::warn;

use crate::auth::jwt::{Claims, TokenKeys};
use crate::error::AppError;

/// Why a request was turned away before reaching a handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// No `Authorization: Bearer <token>` header. Maps to 401.
    MissingToken,
    /// A token was presented but failed verification. Maps to 403.
    InvalidToken,
}

/// The single authorization check: extract the bearer token and verify it.
/// Coarse-grained — a token is either valid or it is not; no roles.
pub fn authorize(headers: &HeaderMap, keys: &TokenKeys) -> Result<Claims, Rejection> {
    let token = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .ok_or(Rejection::MissingToken)?;
    keys.verify(token).map_err(|e| {
        warn!(error = %e, "token rejected");
        Rejection::InvalidToken
    })
}

/// Extractor gating protected routes; hands the verified claims to the
/// handler.
pub struct AuthUser(pub Claims);

#[axum::async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    TokenKeys: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let keys = TokenKeys::from_ref(state);
        match authorize(&parts.headers, &keys) {
            Ok(claims) => Ok(AuthUser(claims)),
            Err(Rejection::MissingToken) => Err(AppError::Unauthenticated),
            Err(Rejection::InvalidToken) => Err(AppError::InvalidToken),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn bearer_headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, value.parse().unwrap());
        headers
    }

    #[test]
    fn no_header_is_missing_token() {
        let keys = TokenKeys::from_secret("dev-secret");
        let headers = HeaderMap::new();
        assert_eq!(authorize(&headers, &keys), Err(Rejection::MissingToken));
    }

    #[test]
    fn wrong_scheme_is_missing_token() {
        let keys = TokenKeys::from_secret("dev-secret");
        let headers = bearer_headers("Basic dXNlcjpwYXNz");
        assert_eq!(authorize(&headers, &keys), Err(Rejection::MissingToken));
    }

    #[test]
    fn bad_token_is_invalid_token() {
        let keys = TokenKeys::from_secret("dev-secret");
        let headers = bearer_headers("Bearer not-a-token");
        assert_eq!(authorize(&headers, &keys), Err(Rejection::InvalidToken));
    }

    #[test]
    fn token_signed_elsewhere_is_invalid_token() {
        let keys = TokenKeys::from_secret("dev-secret");
        let foreign = TokenKeys::from_secret("other-secret");
        let token = foreign.sign(Uuid::new_v4(), "a@b.com").expect("sign");
        let headers = bearer_headers(&format!("Bearer {token}"));
        assert_eq!(authorize(&headers, &keys), Err(Rejection::InvalidToken));
    }

    #[test]
    fn valid_token_yields_claims() {
        let keys = TokenKeys::from_secret("dev-secret");
        let user_id = Uuid::new_v4();
        let token = keys.sign(user_id, "a@b.com").expect("sign");
        let headers = bearer_headers(&format!("Bearer {token}"));
        let claims = authorize(&headers, &keys).expect("authorized");
        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.email, "a@b.com");
    }
}
