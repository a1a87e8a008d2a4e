use crate::{
    entity::{sea_orm_active_enums::Currency, setting},
    error::ApiError,
    middleware::auth::AppUser,
    state::AppState,
};
use axum::{Extension, Json, extract::State};
use sea_orm::{ActiveModelTrait, ActiveValue::Set, EntityTrait};
use serde::Deserialize;
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateSettingsRequest {
    pub store_name: String,
    /// One of "GHS", "USD", "EUR"
    #[schema(value_type = String)]
    pub currency: Currency,
    pub low_stock_threshold: i32,
}

/// PUT /settings - replace the shop settings and drop the cached copy
#[utoipa::path(
    put,
    path = "/settings",
    tag = "settings",
    request_body = UpdateSettingsRequest,
    responses(
        (status = 200, description = "Updated settings"),
        (status = 400, description = "Blank store name or negative threshold"),
        (status = 401, description = "Missing or invalid credential")
    )
)]
#[tracing::instrument(name = "PUT /settings", skip(state, user, req))]
pub async fn update_settings(
    State(state): State<AppState>,
    Extension(user): Extension<AppUser>,
    Json(req): Json<UpdateSettingsRequest>,
) -> Result<Json<setting::Model>, ApiError> {
    user.sub()?;

    let store_name = req.store_name.trim();
    if store_name.is_empty() {
        return Err(ApiError::bad_request("store_name is required".to_string()));
    }
    if req.low_stock_threshold < 0 {
        return Err(ApiError::bad_request(
            "low_stock_threshold cannot be negative".to_string(),
        ));
    }

    // Create-on-first-read lives in State::settings; reuse it so the
    // update path always has a row to work on.
    let current = state.settings().await?;

    let existing = setting::Entity::find_by_id(&current.id)
        .one(&state.db)
        .await?
        .ok_or(ApiError::NOT_FOUND)?;

    let mut active: setting::ActiveModel = existing.into();
    active.store_name = Set(store_name.to_string());
    active.currency = Set(req.currency);
    active.low_stock_threshold = Set(req.low_stock_threshold);
    active.updated_at = Set(chrono::Utc::now().naive_utc());

    let settings = active.update(&state.db).await?;
    state.invalidate_settings();

    tracing::info!(
        store_name = %settings.store_name,
        low_stock_threshold = settings.low_stock_threshold,
        "Settings updated"
    );

    Ok(Json(settings))
}
