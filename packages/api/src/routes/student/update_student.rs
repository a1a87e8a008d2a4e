use crate::{
    entity::{sea_orm_active_enums::ClassLevel, student},
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
pub struct UpdateStudentRequest {
    pub name: String,
    #[schema(value_type = String)]
    pub class_level: ClassLevel,
}

/// PUT /students/{student_id} - correct a directory entry
#[utoipa::path(
    put,
    path = "/students/{student_id}",
    tag = "students",
    request_body = UpdateStudentRequest,
    responses(
        (status = 200, description = "Updated student"),
        (status = 400, description = "Blank name"),
        (status = 404, description = "Student not found")
    )
)]
#[tracing::instrument(name = "PUT /students/{student_id}", skip(state, user, req))]
pub async fn update_student(
    State(state): State<AppState>,
    Extension(user): Extension<AppUser>,
    Path(student_id): Path<String>,
    Json(req): Json<UpdateStudentRequest>,
) -> Result<Json<student::Model>, ApiError> {
    user.sub()?;

    let name = req.name.trim();
    if name.is_empty() {
        return Err(ApiError::bad_request("name is required".to_string()));
    }

    let existing = student::Entity::find_by_id(&student_id)
        .one(&state.db)
        .await?
        .ok_or(ApiError::NOT_FOUND)?;

    let mut active: student::ActiveModel = existing.into();
    active.name = Set(name.to_string());
    active.class_level = Set(req.class_level);
    active.updated_at = Set(chrono::Utc::now().naive_utc());

    let student = active.update(&state.db).await?;
    Ok(Json(student))
}
