use crate::{
    entity::book,
    error::ApiError,
    middleware::auth::AppUser,
    state::AppState,
};
use axum::{Extension, Json, extract::State};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct LowStockResponse {
    /// The threshold applied, from settings
    pub threshold: i32,
    #[schema(value_type = Vec<Object>)]
    pub books: Vec<book::Model>,
}

/// GET /books/low-stock - books running out, derived on each read
#[utoipa::path(
    get,
    path = "/books/low-stock",
    tag = "books",
    responses(
        (status = 200, description = "Books with stock below the configured threshold", body = LowStockResponse),
        (status = 401, description = "Missing or invalid credential")
    )
)]
#[tracing::instrument(name = "GET /books/low-stock", skip(state, user))]
pub async fn low_stock(
    State(state): State<AppState>,
    Extension(user): Extension<AppUser>,
) -> Result<Json<LowStockResponse>, ApiError> {
    user.sub()?;

    let threshold = state.settings().await?.low_stock_threshold;

    let books = book::Entity::find()
        .filter(book::Column::Stock.lt(threshold))
        .order_by_asc(book::Column::Stock)
        .all(&state.db)
        .await?;

    Ok(Json(LowStockResponse { threshold, books }))
}
