use crate::{
    entity::{sea_orm_active_enums::ClassLevel, student},
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
pub struct CreateStudentRequest {
    pub name: String,
    /// One of "Basic 1" through "Basic 6"
    #[schema(value_type = String)]
    pub class_level: ClassLevel,
}

/// POST /students - add a student to the directory
#[utoipa::path(
    post,
    path = "/students",
    tag = "students",
    request_body = CreateStudentRequest,
    responses(
        (status = 201, description = "Student created"),
        (status = 400, description = "Blank name"),
        (status = 401, description = "Missing or invalid credential")
    )
)]
#[tracing::instrument(name = "POST /students", skip(state, user, req))]
pub async fn create_student(
    State(state): State<AppState>,
    Extension(user): Extension<AppUser>,
    Json(req): Json<CreateStudentRequest>,
) -> Result<(StatusCode, Json<student::Model>), ApiError> {
    user.sub()?;

    let name = req.name.trim();
    if name.is_empty() {
        return Err(ApiError::bad_request("name is required".to_string()));
    }

    let now = Utc::now().naive_utc();
    let student = student::ActiveModel {
        id: Set(cuid2::create_id()),
        name: Set(name.to_string()),
        class_level: Set(req.class_level),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(&state.db)
    .await?;

    Ok((StatusCode::CREATED, Json(student)))
}
