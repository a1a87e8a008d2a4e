use crate::{
    entity::setting,
    error::ApiError,
    middleware::auth::AppUser,
    state::AppState,
};
use axum::{Extension, Json, extract::State};

/// GET /settings - the shop settings, created with defaults on first read
#[utoipa::path(
    get,
    path = "/settings",
    tag = "settings",
    responses(
        (status = 200, description = "Current settings"),
        (status = 401, description = "Missing or invalid credential")
    )
)]
#[tracing::instrument(name = "GET /settings", skip(state, user))]
pub async fn get_settings(
    State(state): State<AppState>,
    Extension(user): Extension<AppUser>,
) -> Result<Json<setting::Model>, ApiError> {
    user.sub()?;

    let settings = state.settings().await?;
    Ok(Json(settings.as_ref().clone()))
}
