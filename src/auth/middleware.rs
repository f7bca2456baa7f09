use crate::auth::jwt::{TokenCodec, TokenError};
use crate::types::AppError;
use axum::{
    extract::{FromRequestParts, Request, State},
    http::{request::Parts, HeaderMap, header},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

/// Outcome of a failed authentication attempt.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// No bearer token on the request.
    #[error("no bearer token supplied")]
    Unauthenticated,

    /// Token failed signature/structure checks or lacks an expiry.
    #[error("invalid token")]
    InvalidToken,

    /// Token is genuine but past its expiry.
    #[error("token expired")]
    TokenExpired,
}

impl From<TokenError> for AuthError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Malformed(_) | TokenError::MissingClaim => AuthError::InvalidToken,
            TokenError::Expired => AuthError::TokenExpired,
        }
    }
}

/// The authenticated identity for the current request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subject(pub String);

/// Resolves a raw bearer token to the subject it was issued for.
pub fn authenticate(codec: &TokenCodec, token: Option<&str>) -> Result<String, AuthError> {
    let token = match token {
        Some(t) if !t.is_empty() => t,
        _ => return Err(AuthError::Unauthenticated),
    };

    let claims = codec.verify(token).map_err(|e| {
        tracing::warn!(reason = %e, "rejected bearer token");
        AuthError::from(e)
    })?;

    tracing::debug!(subject = %claims.sub, "request authenticated");
    Ok(claims.sub)
}

/// Pulls the token out of an `Authorization: Bearer <token>` header.
///
/// Any other scheme, or a header that is not valid ASCII, counts as no token.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;

    if scheme.eq_ignore_ascii_case("bearer") {
        Some(token.trim())
    } else {
        None
    }
}

/// Runs [`authenticate`] before dispatch and stores the [`Subject`] in the
/// request extensions.
pub async fn auth_middleware(
    State(codec): State<Arc<TokenCodec>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let subject = authenticate(&codec, bearer_token(req.headers()))?;

    req.extensions_mut().insert(Subject(subject));

    Ok(next.run(req).await)
}

/// Extractor for the authenticated subject.
pub struct AuthUser(pub String);

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Subject>()
            .map(|subject| AuthUser(subject.0.clone()))
            .ok_or(AppError::Unauthenticated)
    }
}
