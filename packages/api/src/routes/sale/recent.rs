use crate::{
    entity::sale,
    error::ApiError,
    middleware::auth::AppUser,
    state::AppState,
};
use axum::{
    Extension, Json,
    extract::{Query, State},
};
use sea_orm::{EntityTrait, QueryOrder, QuerySelect};
use serde::Deserialize;
use utoipa::ToSchema;

use super::report::{PopulatedSale, populate_sales};

const DEFAULT_LIMIT: u64 = 5;
const MAX_LIMIT: u64 = 50;

#[derive(Debug, Deserialize, ToSchema)]
pub struct RecentQuery {
    /// Number of sales to return (default 5, max 50)
    pub limit: Option<u64>,
}

/// GET /sales/recent - the latest transactions for the dashboard
#[utoipa::path(
    get,
    path = "/sales/recent",
    tag = "sales",
    params(
        ("limit" = Option<u64>, Query, description = "Number of sales (default 5, max 50)")
    ),
    responses(
        (status = 200, description = "Most recent sales, newest first", body = [PopulatedSale]),
        (status = 401, description = "Missing or invalid credential")
    )
)]
#[tracing::instrument(name = "GET /sales/recent", skip(state, user))]
pub async fn get_recent(
    State(state): State<AppState>,
    Extension(user): Extension<AppUser>,
    Query(query): Query<RecentQuery>,
) -> Result<Json<Vec<PopulatedSale>>, ApiError> {
    user.sub()?;

    let limit = query.limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT);

    let sales = sale::Entity::find()
        .order_by_desc(sale::Column::CreatedAt)
        .limit(limit)
        .all(&state.db)
        .await?;

    let populated = populate_sales(&state.db, sales).await?;
    Ok(Json(populated))
}
