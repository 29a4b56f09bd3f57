use std::path::Path;

use axum::http::HeaderName;
use axum::Router;
use tower_http::{
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::errors::ApiError;
use crate::extract::CSRF_HEADER;
use crate::openapi::ApiDoc;
use crate::state::ServerState;

pub mod health;
pub mod hours;
pub mod login;
pub mod reservations;
pub mod services;
pub mod users;

async fn unknown_endpoint() -> ApiError {
    ApiError::NotFound("unknown endpoint".into())
}

/// Credentialed CORS that lets the SPA read the CSRF header.
pub fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive().expose_headers([HeaderName::from_static(CSRF_HEADER)])
}

/// `/api/*` routes only, with a JSON 404 for anything unknown below `/api`.
pub fn api_router() -> Router<ServerState> {
    Router::new()
        .route("/health", axum::routing::get(health::health))
        .nest("/login", login::router())
        .nest("/users", users::router())
        .nest("/services", services::router())
        .nest("/hours", hours::router())
        .nest("/reservations", reservations::router())
        .fallback(unknown_endpoint)
}

/// Build the full application: API, docs, SPA bundle, CORS and access logs.
pub fn build_router(state: ServerState, static_dir: &str) -> Router {
    let index = Path::new(static_dir).join("index.html");
    let spa = ServeDir::new(static_dir).fallback(ServeFile::new(index));

    Router::new()
        .nest("/api", api_router())
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .fallback_service(spa)
        .with_state(state)
        .layer(build_cors())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
