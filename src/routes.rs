use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::services::ServeDir;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;
use axum::http::header::{CACHE_CONTROL, CONTENT_TYPE};
use axum::http::HeaderValue;

use crate::handlers;
use crate::models::AppState;

// Embed the default stylesheet in the binary
pub const DEFAULT_STYLESHEET: &str = include_str!("../static/styles.css");

pub fn build_app(state: AppState) -> Router {
    let stylesheet_content = state.custom_css.clone().unwrap_or_else(|| DEFAULT_STYLESHEET.to_string());

    let api_routes = Router::new()
        .route("/hello", get(handlers::api::hello))
        .route("/logs", post(handlers::api::ingest_logs))
        .route("/search", post(handlers::api::search));

    Router::new()
        .route("/", get(handlers::form::search_page_get).post(handlers::form::search_page_post))
        .route("/static/styles.css", get(move || {
            let css = stylesheet_content.clone();
            async move {
                (
                    [(CONTENT_TYPE, "text/css")],
                    css
                )
            }
        }))
        .nest("/api", api_routes)
        .nest_service(
            "/static",
            ServiceBuilder::new()
                .layer(SetResponseHeaderLayer::if_not_present(
                    CACHE_CONTROL,
                    HeaderValue::from_static("public, max-age=31536000, immutable"),
                ))
                .service(ServeDir::new("static")),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
