use crate::{
    entity::sale,
    error::ApiError,
    middleware::auth::AppUser,
    state::AppState,
};
use axum::{Extension, Json, extract::State};
use chrono::Utc;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QuerySelect};
use serde::Serialize;
use utoipa::ToSchema;

use super::report::day_bounds;

#[derive(Debug, Serialize, ToSchema)]
pub struct TotalsResponse {
    /// Revenue committed today (UTC day), in minor units
    pub today: i64,
    /// Lifetime revenue, in minor units
    pub all_time: i64,
}

/// GET /sales/totals - today's and all-time revenue
#[utoipa::path(
    get,
    path = "/sales/totals",
    tag = "sales",
    responses(
        (status = 200, description = "Aggregate revenue", body = TotalsResponse),
        (status = 401, description = "Missing or invalid credential")
    )
)]
#[tracing::instrument(name = "GET /sales/totals", skip(state, user))]
pub async fn get_totals(
    State(state): State<AppState>,
    Extension(user): Extension<AppUser>,
) -> Result<Json<TotalsResponse>, ApiError> {
    user.sub()?;

    let (start, end) = day_bounds(Utc::now().date_naive());

    let today_amounts: Vec<i64> = sale::Entity::find()
        .select_only()
        .column(sale::Column::TotalAmount)
        .filter(sale::Column::CreatedAt.gte(start))
        .filter(sale::Column::CreatedAt.lte(end))
        .into_tuple()
        .all(&state.db)
        .await?;

    let all_amounts: Vec<i64> = sale::Entity::find()
        .select_only()
        .column(sale::Column::TotalAmount)
        .into_tuple()
        .all(&state.db)
        .await?;

    Ok(Json(TotalsResponse {
        today: today_amounts.iter().sum(),
        all_time: all_amounts.iter().sum(),
    }))
}
