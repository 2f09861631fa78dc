//! Application route configuration.

use axum::{middleware, routing::get, Router};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::handlers::{health, member_routes, trainer_routes};
use super::middleware::authenticate;
use super::openapi::ApiDoc;
use super::AppState;

/// Create the application router with all routes configured
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        // OpenAPI Swagger UI documentation
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .nest(
            "/members",
            member_routes().route_layer(middleware::from_fn_with_state(
                state.clone(),
                authenticate,
            )),
        )
        .nest(
            "/trainers",
            trainer_routes().route_layer(middleware::from_fn_with_state(
                state.clone(),
                authenticate,
            )),
        )
        // Global middleware
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
