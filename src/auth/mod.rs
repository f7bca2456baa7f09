//! Authentication and Authorization
//!
//! This module holds the security core of the Planner API: credential
//! hashing, bearer token issuance and verification, the per-request
//! authentication gate, and the owner check applied to mutations.
//!
//! # Module Structure
//!
//! - [`auth::password`](crate::auth::password) - Argon2id credential hashing
//! - [`auth::jwt`](crate::auth::jwt) - HS256 token codec and signing secret
//! - [`auth::middleware`](crate::auth::middleware) - Axum layer and extractor for authentication
//! - [`auth::ownership`](crate::auth::ownership) - Owner check for update/delete
//!
//! # Failure Modes
//!
//! | Situation | Error | HTTP |
//! |-----------|-------|------|
//! | No `Authorization: Bearer` header | `AuthError::Unauthenticated` | 403 |
//! | Bad signature, wrong algorithm, garbage | `AuthError::InvalidToken` | 403 |
//! | Signed but no `exp` claim | `AuthError::InvalidToken` | 403 |
//! | `exp` reached | `AuthError::TokenExpired` | 403 |
//! | Authenticated, not the owner | `Forbidden` | 403 |
//!
//! # Usage
//!
//! ```ignore
//! use planner::auth::middleware::auth_middleware;
//!
//! let protected = Router::new()
//!     .route("/event/new", post(create_event))
//!     .layer(middleware::from_fn_with_state(token_codec, auth_middleware));
//! ```
//!
//! Handlers receive the subject through [`AuthUser`](crate::auth::middleware::AuthUser):
//!
//! ```ignore
//! async fn create_event(AuthUser(subject): AuthUser) -> impl IntoResponse {
//!     format!("Hello, {}!", subject)
//! }
//! ```

/// HS256 token issuance and verification.
pub mod jwt;
/// Authentication middleware and extractors for protected routes.
pub mod middleware;
/// Ownership checks for mutating operations.
pub mod ownership;
/// Argon2id password hashing.
pub mod password;
