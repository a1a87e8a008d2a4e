use crate::{
    entity::{book, sea_orm_active_enums::ClassLevel},
    error::ApiError,
    middleware::auth::AppUser,
    state::AppState,
};
use axum::{Extension, Json, extract::State, http::StatusCode};
use chrono::Utc;
use sea_orm::{ActiveModelTrait, Set};
use serde::Deserialize;
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateBookRequest {
    pub title: String,
    pub subject: String,
    /// One of "Basic 1" through "Basic 6"
    #[schema(value_type = String)]
    pub class_level: ClassLevel,
    /// Unit price in minor currency units
    pub price: i64,
    pub stock: i32,
}

/// POST /books - add a book to the catalog
#[utoipa::path(
    post,
    path = "/books",
    tag = "books",
    request_body = CreateBookRequest,
    responses(
        (status = 201, description = "Book created"),
        (status = 400, description = "Missing or invalid fields"),
        (status = 401, description = "Missing or invalid credential")
    )
)]
#[tracing::instrument(name = "POST /books", skip(state, user, req))]
pub async fn create_book(
    State(state): State<AppState>,
    Extension(user): Extension<AppUser>,
    Json(req): Json<CreateBookRequest>,
) -> Result<(StatusCode, Json<book::Model>), ApiError> {
    user.sub()?;

    let title = req.title.trim();
    let subject = req.subject.trim();
    if title.is_empty() || subject.is_empty() {
        return Err(ApiError::bad_request(
            "title and subject are required".to_string(),
        ));
    }
    if req.price < 0 {
        return Err(ApiError::bad_request("Price cannot be negative".to_string()));
    }
    if req.stock < 0 {
        return Err(ApiError::bad_request("Stock cannot be negative".to_string()));
    }

    let now = Utc::now().naive_utc();
    let book = book::ActiveModel {
        id: Set(cuid2::create_id()),
        title: Set(title.to_string()),
        subject: Set(subject.to_string()),
        class_level: Set(req.class_level),
        price: Set(req.price),
        stock: Set(req.stock),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(&state.db)
    .await?;

    tracing::info!(book_id = %book.id, title = %book.title, "Book added to catalog");

    Ok((StatusCode::CREATED, Json(book)))
}
