use crate::{
    entity::book, error::ApiError, middleware::auth::AppUser, routes::PaginationParams,
    state::AppState,
};
use axum::{
    Extension, Json,
    extract::{Query, State},
};
use sea_orm::{EntityTrait, QueryOrder, QuerySelect};

/// GET /books - the whole catalog, newest first
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    responses(
        (status = 200, description = "All books, newest first"),
        (status = 401, description = "Missing or invalid credential")
    )
)]
#[tracing::instrument(name = "GET /books", skip(state, user))]
pub async fn get_books(
    State(state): State<AppState>,
    Extension(user): Extension<AppUser>,
    Query(pagination): Query<PaginationParams>,
) -> Result<Json<Vec<book::Model>>, ApiError> {
    user.sub()?;

    let mut query = book::Entity::find().order_by_desc(book::Column::CreatedAt);
    if let Some(offset) = pagination.offset {
        query = query.offset(offset);
    }
    if let Some(limit) = pagination.limit {
        query = query.limit(limit);
    }

    let books = query.all(&state.db).await?;
    Ok(Json(books))
}
