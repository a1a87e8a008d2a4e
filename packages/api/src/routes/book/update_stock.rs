use crate::{
    entity::book,
    error::ApiError,
    middleware::auth::AppUser,
    state::AppState,
};
use axum::{
    Extension, Json,
    extract::{Path, State},
};
use sea_orm::{ActiveModelTrait, ActiveValue::Set, EntityTrait};
use serde::Deserialize;
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateStockRequest {
    /// New shelf count (must be >= 0)
    pub stock: i32,
}

/// PATCH /books/{book_id}/stock - set the shelf count
#[utoipa::path(
    patch,
    path = "/books/{book_id}/stock",
    tag = "books",
    request_body = UpdateStockRequest,
    responses(
        (status = 200, description = "Updated book"),
        (status = 400, description = "Negative stock"),
        (status = 404, description = "Book not found")
    )
)]
#[tracing::instrument(name = "PATCH /books/{book_id}/stock", skip(state, user))]
pub async fn update_stock(
    State(state): State<AppState>,
    Extension(user): Extension<AppUser>,
    Path(book_id): Path<String>,
    Json(body): Json<UpdateStockRequest>,
) -> Result<Json<book::Model>, ApiError> {
    user.sub()?;

    if body.stock < 0 {
        return Err(ApiError::bad_request("Stock cannot be negative".to_string()));
    }

    let existing = book::Entity::find_by_id(&book_id)
        .one(&state.db)
        .await?
        .ok_or(ApiError::NOT_FOUND)?;

    let mut active: book::ActiveModel = existing.into();
    active.stock = Set(body.stock);
    active.updated_at = Set(chrono::Utc::now().naive_utc());

    let book = active.update(&state.db).await?;

    tracing::info!(book_id = %book.id, new_stock = book.stock, "Book stock updated");

    Ok(Json(book))
}
