// src/routes.rs

use axum::{routing::get, Router};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{config::AppState, docs::ApiDoc, handlers};

pub fn build_router(app_state: AppState) -> Router {
    let analytics_routes = Router::new()
        .route("/report", get(handlers::analytics::get_report))
        .route("/forecast", get(handlers::analytics::get_forecast))
        .route("/combos", get(handlers::analytics::get_combos))
        .route("/quadrants", get(handlers::analytics::get_quadrants));

    let dashboard_routes = Router::new()
        .route("/summary", get(handlers::dashboard::get_summary));

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api/analytics", analytics_routes)
        .nest("/api/dashboard", dashboard_routes)
        .with_state(app_state)
}
