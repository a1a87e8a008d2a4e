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
use sea_orm::EntityTrait;
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct DeleteBookResponse {
    pub message: String,
}

/// DELETE /books/{book_id} - remove a book from the catalog.
/// Historical sale items keep their book_id and snapshots, so the ledger
/// and reports are untouched.
#[utoipa::path(
    delete,
    path = "/books/{book_id}",
    tag = "books",
    responses(
        (status = 200, description = "Book deleted", body = DeleteBookResponse),
        (status = 404, description = "Book not found")
    )
)]
#[tracing::instrument(name = "DELETE /books/{book_id}", skip(state, user))]
pub async fn delete_book(
    State(state): State<AppState>,
    Extension(user): Extension<AppUser>,
    Path(book_id): Path<String>,
) -> Result<Json<DeleteBookResponse>, ApiError> {
    user.sub()?;

    let result = book::Entity::delete_by_id(&book_id).exec(&state.db).await?;
    if result.rows_affected == 0 {
        return Err(ApiError::NOT_FOUND);
    }

    tracing::info!(book_id = %book_id, "Book removed from catalog");

    Ok(Json(DeleteBookResponse {
        message: "Book deleted successfully".to_string(),
    }))
}
