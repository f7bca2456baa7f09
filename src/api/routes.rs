use crate::api::{handlers, ApiDoc};
use crate::auth::{jwt::TokenCodec, middleware::auth_middleware};
use crate::AppState;
use axum::{
    middleware,
    routing::{delete, get, patch, post},
    Json, Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;

/// Sign-up/sign-in and event routes. Event routes run behind the auth gate.
pub fn create_router(token_codec: Arc<TokenCodec>) -> Router<AppState> {
    let public_routes = Router::new()
        // Public routes (no auth required)
        .route("/user/signup", post(handlers::auth::sign_up))
        .route("/user/signin", post(handlers::auth::sign_in));

    let protected_routes = Router::new()
        // Protected routes (auth required)
        .route("/event", get(handlers::events::list_events))
        .route("/event/", get(handlers::events::list_events))
        .route("/event/new", post(handlers::events::create_event))
        .route("/event/{id}", get(handlers::events::get_event))
        .route("/event/edit/{id}", patch(handlers::events::update_event))
        .route("/event/delete/{id}", delete(handlers::events::delete_event))
        .layer(middleware::from_fn_with_state(token_codec, auth_middleware));

    public_routes.merge(protected_routes)
}

/// The complete application: API routes, health check, OpenAPI document,
/// request tracing and CORS, bound to `state`.
pub fn create_app(state: AppState) -> Router {
    let router = Router::new()
        .route("/health", get(|| async { "OK" }))
        .merge(create_router(state.token_codec.clone()));

    #[cfg(feature = "swagger-ui")]
    let router = router.merge(
        utoipa_swagger_ui::SwaggerUi::new("/swagger-ui")
            .url("/api-docs/openapi.json", ApiDoc::openapi()),
    );

    #[cfg(not(feature = "swagger-ui"))]
    let router = router.route(
        "/api-docs/openapi.json",
        get(|| async { Json(ApiDoc::openapi()) }),
    );

    router
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
