//! HTTP API Handlers and Routes
//!
//! This module provides the REST API layer for Planner, built on the Axum web framework.
//!
//! # Module Structure
//!
//! - [`api::handlers`](crate::api::handlers) - Request handlers for each endpoint
//! - [`api::routes`](crate::api::routes) - Route definitions and router configuration
//!
//! # API Endpoints
//!
//! ## Users (`/user`)
//! - `POST /user/signup` - Register with JSON `{email, password}`
//! - `POST /user/signin` - Form-encoded `username`/`password`, returns a bearer token
//!
//! ## Events (`/event`)
//! - `GET /event/` - List all events
//! - `GET /event/{id}` - Get one event
//! - `POST /event/new` - Create an event owned by the caller
//! - `PATCH /event/edit/{id}` - Update an event (creator only)
//! - `DELETE /event/delete/{id}` - Delete an event (creator only)
//!
//! ## Health
//! - `GET /health` - Health check endpoint
//!
//! # Authentication
//!
//! Event endpoints require a valid token in the `Authorization` header:
//! ```text
//! Authorization: Bearer <token>
//! ```
//! A missing, invalid or expired token is answered with `403 Forbidden`.
//!
//! # OpenAPI Documentation
//!
//! The document is served at `/api-docs/openapi.json`. When the `swagger-ui`
//! feature is enabled, interactive documentation is available at `/swagger-ui/`.

use crate::types::{
    Event, EventCreate, EventCreatedResponse, EventUpdate, MessageResponse, SignInForm,
    SignUpRequest, TokenResponse,
};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Request and response handlers for all API endpoints.
pub mod handlers;
/// Router configuration and route definitions.
pub mod routes;

/// OpenAPI description of the Planner API.
#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::auth::sign_up,
        handlers::auth::sign_in,
        handlers::events::list_events,
        handlers::events::get_event,
        handlers::events::create_event,
        handlers::events::update_event,
        handlers::events::delete_event,
    ),
    components(schemas(
        SignUpRequest,
        SignInForm,
        TokenResponse,
        MessageResponse,
        Event,
        EventCreate,
        EventUpdate,
        EventCreatedResponse,
    )),
    modifiers(&BearerSecurity),
    tags(
        (name = "user", description = "Sign-up and sign-in"),
        (name = "events", description = "Event management")
    )
)]
pub struct ApiDoc;

struct BearerSecurity;

impl Modify for BearerSecurity {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}
