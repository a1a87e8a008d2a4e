use std::collections::HashMap;

use crate::{
    entity::{supplier, supplier_payment},
    error::ApiError,
    middleware::auth::AppUser,
    state::AppState,
};
use axum::{Extension, Json, extract::State};
use sea_orm::{EntityTrait, QueryOrder};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct SupplierWithPayments {
    pub id: String,
    pub name: String,
    pub total_debt: i64,
    #[schema(value_type = Vec<Object>)]
    pub payments: Vec<supplier_payment::Model>,
    pub created_at: chrono::NaiveDateTime,
    pub updated_at: chrono::NaiveDateTime,
}

/// GET /suppliers - all suppliers with their payment history, newest first
#[utoipa::path(
    get,
    path = "/suppliers",
    tag = "suppliers",
    responses(
        (status = 200, description = "Suppliers with embedded payments", body = [SupplierWithPayments]),
        (status = 401, description = "Missing or invalid credential")
    )
)]
#[tracing::instrument(name = "GET /suppliers", skip(state, user))]
pub async fn get_suppliers(
    State(state): State<AppState>,
    Extension(user): Extension<AppUser>,
) -> Result<Json<Vec<SupplierWithPayments>>, ApiError> {
    user.sub()?;

    let suppliers = supplier::Entity::find()
        .order_by_desc(supplier::Column::CreatedAt)
        .all(&state.db)
        .await?;

    let mut payments_by_supplier: HashMap<String, Vec<supplier_payment::Model>> = HashMap::new();
    for payment in supplier_payment::Entity::find()
        .order_by_asc(supplier_payment::Column::PaymentDate)
        .all(&state.db)
        .await?
    {
        payments_by_supplier
            .entry(payment.supplier_id.clone())
            .or_default()
            .push(payment);
    }

    let populated = suppliers
        .into_iter()
        .map(|s| SupplierWithPayments {
            payments: payments_by_supplier.remove(&s.id).unwrap_or_default(),
            id: s.id,
            name: s.name,
            total_debt: s.total_debt,
            created_at: s.created_at,
            updated_at: s.updated_at,
        })
        .collect();

    Ok(Json(populated))
}
