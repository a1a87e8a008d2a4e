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
pub struct UpdatePriceRequest {
    /// New unit price in minor units (must be > 0)
    pub price: i64,
}

/// PATCH /books/{book_id}/price - reprice a book.
/// Past sales keep their `price_at_sale` snapshot and are unaffected.
#[utoipa::path(
    patch,
    path = "/books/{book_id}/price",
    tag = "books",
    request_body = UpdatePriceRequest,
    responses(
        (status = 200, description = "Updated book"),
        (status = 400, description = "Non-positive price"),
        (status = 404, description = "Book not found")
    )
)]
#[tracing::instrument(name = "PATCH /books/{book_id}/price", skip(state, user))]
pub async fn update_price(
    State(state): State<AppState>,
    Extension(user): Extension<AppUser>,
    Path(book_id): Path<String>,
    Json(body): Json<UpdatePriceRequest>,
) -> Result<Json<book::Model>, ApiError> {
    user.sub()?;

    if body.price <= 0 {
        return Err(ApiError::bad_request("Price must be positive".to_string()));
    }

    let existing = book::Entity::find_by_id(&book_id)
        .one(&state.db)
        .await?
        .ok_or(ApiError::NOT_FOUND)?;

    let mut active: book::ActiveModel = existing.into();
    active.price = Set(body.price);
    active.updated_at = Set(chrono::Utc::now().naive_utc());

    let book = active.update(&state.db).await?;

    tracing::info!(book_id = %book.id, new_price = book.price, "Book price updated");

    Ok(Json(book))
}
