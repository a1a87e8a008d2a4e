use crate::{
    entity::supplier,
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
pub struct CreateSupplierRequest {
    pub name: String,
    /// Opening debt in minor units (defaults to 0)
    pub total_debt: Option<i64>,
}

/// POST /suppliers - register a supplier
#[utoipa::path(
    post,
    path = "/suppliers",
    tag = "suppliers",
    request_body = CreateSupplierRequest,
    responses(
        (status = 201, description = "Supplier created"),
        (status = 400, description = "Blank name or negative debt"),
        (status = 401, description = "Missing or invalid credential")
    )
)]
#[tracing::instrument(name = "POST /suppliers", skip(state, user, req))]
pub async fn create_supplier(
    State(state): State<AppState>,
    Extension(user): Extension<AppUser>,
    Json(req): Json<CreateSupplierRequest>,
) -> Result<(StatusCode, Json<supplier::Model>), ApiError> {
    user.sub()?;

    let name = req.name.trim();
    if name.is_empty() {
        return Err(ApiError::bad_request("name is required".to_string()));
    }
    let total_debt = req.total_debt.unwrap_or(0);
    if total_debt < 0 {
        return Err(ApiError::bad_request("Debt cannot be negative".to_string()));
    }

    let now = Utc::now().naive_utc();
    let supplier = supplier::ActiveModel {
        id: Set(cuid2::create_id()),
        name: Set(name.to_string()),
        total_debt: Set(total_debt),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(&state.db)
    .await?;

    Ok((StatusCode::CREATED, Json(supplier)))
}
