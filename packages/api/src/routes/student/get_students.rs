use crate::{
    entity::student, error::ApiError, middleware::auth::AppUser, routes::PaginationParams,
    state::AppState,
};
use axum::{
    Extension, Json,
    extract::{Query, State},
};
use sea_orm::{EntityTrait, QueryOrder, QuerySelect};

/// GET /students - the directory, newest first
#[utoipa::path(
    get,
    path = "/students",
    tag = "students",
    responses(
        (status = 200, description = "All students, newest first"),
        (status = 401, description = "Missing or invalid credential")
    )
)]
#[tracing::instrument(name = "GET /students", skip(state, user))]
pub async fn get_students(
    State(state): State<AppState>,
    Extension(user): Extension<AppUser>,
    Query(pagination): Query<PaginationParams>,
) -> Result<Json<Vec<student::Model>>, ApiError> {
    user.sub()?;

    let mut query = student::Entity::find().order_by_desc(student::Column::CreatedAt);
    if let Some(offset) = pagination.offset {
        query = query.offset(offset);
    }
    if let Some(limit) = pagination.limit {
        query = query.limit(limit);
    }

    let students = query.all(&state.db).await?;
    Ok(Json(students))
}
