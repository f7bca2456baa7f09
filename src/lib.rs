//! # Planner
//!
//! An event planning API: users sign up, sign in for a bearer token, and
//! manage the events they create.
//!
//! ## Overview
//!
//! Planner can be used in two ways:
//!
//! 1. **As a standalone server** - Run the `planner-server` binary
//! 2. **As a library** - Mount [`api::routes::create_app`] in your own binary,
//!    or use the [`auth`] components directly
//!
//! ### Basic Example
//!
//! ```rust,ignore
//! use planner::{AppState, PlannerConfig};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let (config, _defaulted) = PlannerConfig::read_or_default("planner.toml")?;
//!     config.validate()?;
//!     let state = AppState::from_config(&config).await?;
//!     let app = planner::api::routes::create_app(state);
//!
//!     let listener = tokio::net::TcpListener::bind("127.0.0.1:3000").await?;
//!     axum::serve(listener, app).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! - [`api`] - REST API handlers and routes
//! - [`auth`] - Password hashing, token codec, auth middleware, ownership checks
//! - [`db`] - libsql storage for users and events
//! - [`types`] - Request/response types and error handling
//! - [`utils`] - TOML configuration
//!
//! ## Security Model
//!
//! Tokens are stateless HS256 JWTs carrying the account email as `sub` and a
//! numeric `exp`. The signing secret is loaded once at startup and injected
//! into [`auth::jwt::TokenCodec`]; it is never read from the environment
//! afterwards. Only an event's creator may update or delete it.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

/// HTTP API handlers and routes.
pub mod api;
/// Authentication and authorization.
pub mod auth;
/// Command-line interface.
pub mod cli;
/// Database client (libsql/SQLite).
pub mod db;
/// Core types (requests, responses, errors).
#[allow(missing_docs)]
pub mod types;
/// Configuration utilities (TOML).
#[allow(missing_docs)]
pub mod utils;

// Re-export commonly used types
pub use db::TursoClient;
pub use types::{AppError, Result};
pub use utils::toml_config::{ConfigError, PlannerConfig};

use crate::auth::{jwt::TokenCodec, password::PasswordHasher};
use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Database client
    pub turso: Arc<TursoClient>,
    /// Token issuance and verification, holding the signing secret
    pub token_codec: Arc<TokenCodec>,
    /// Credential hashing
    pub password_hasher: Arc<PasswordHasher>,
}

impl AppState {
    /// Builds the state from a configuration: resolves the signing secret,
    /// sets up the hasher and opens the database.
    pub async fn from_config(config: &PlannerConfig) -> anyhow::Result<Self> {
        let token_codec = config.token_codec()?;
        let password_hasher = config.password_hasher()?;
        let turso = config.database_provider().create_client().await?;

        Ok(Self {
            turso: Arc::new(turso),
            token_codec: Arc::new(token_codec),
            password_hasher: Arc::new(password_hasher),
        })
    }
}
