use std::sync::Arc;

use axum::{Json, Router, middleware::from_fn_with_state, routing::get};
use error::InternalError;
use middleware::auth::auth_middleware;
use middleware::error_reporting::error_reporting_middleware;
use serde_json::Value;
use state::{AppState, State};
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, decompression::RequestDecompressionLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub mod entity;
mod middleware;
mod routes;

pub mod error;
pub mod openapi;
pub mod state;

pub use axum;
pub mod auth {
    use crate::middleware;
    pub use middleware::auth::AppUser;
}

pub use sea_orm;

pub fn construct_router(state: Arc<State>) -> Router {
    let router = Router::new()
        .route("/", get(store_info))
        .nest("/health", routes::health::routes())
        .nest("/auth", routes::auth::routes())
        .nest("/books", routes::book::routes())
        .nest("/students", routes::student::routes())
        .nest("/sales", routes::sale::routes())
        .nest("/suppliers", routes::supplier::routes())
        .nest("/settings", routes::setting::routes())
        .with_state(state.clone())
        .route("/version", get(|| async { "0.1.0" }))
        .layer(from_fn_with_state(state.clone(), error_reporting_middleware))
        .layer(from_fn_with_state(state.clone(), auth_middleware))
        .layer(CorsLayer::permissive())
        .layer(
            ServiceBuilder::new()
                .layer(RequestDecompressionLayer::new())
                .layer(CompressionLayer::new()),
        );

    Router::new()
        .nest("/api/v1", router)
        .merge(SwaggerUi::new("/docs").url("/api/v1/openapi.json", openapi::ApiDoc::openapi()))
}

#[tracing::instrument(name = "GET /", skip(state))]
async fn store_info(
    axum::extract::State(state): axum::extract::State<AppState>,
) -> Result<Json<Value>, InternalError> {
    let settings = state.settings().await?;

    Ok(Json(serde_json::json!({
        "store_name": settings.store_name.clone(),
        "currency": settings.currency.clone(),
        "low_stock_threshold": settings.low_stock_threshold,
    })))
}
