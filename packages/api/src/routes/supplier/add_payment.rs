use crate::{
    entity::{supplier, supplier_payment},
    error::ApiError,
    middleware::auth::AppUser,
    not_found,
    state::AppState,
};
use axum::{
    Extension, Json,
    extract::{Path, State},
};
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue::Set, EntityTrait, TransactionTrait};
use serde::Deserialize;
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
pub struct AddPaymentRequest {
    /// Amount paid in minor units (must be > 0)
    pub amount: i64,
}

/// POST /suppliers/{supplier_id}/payments - record a payment.
///
/// Appends the payment and decrements the outstanding debt, floored at
/// zero, in one transaction.
#[utoipa::path(
    post,
    path = "/suppliers/{supplier_id}/payments",
    tag = "suppliers",
    request_body = AddPaymentRequest,
    responses(
        (status = 200, description = "Updated supplier"),
        (status = 400, description = "Non-positive amount"),
        (status = 404, description = "Supplier not found")
    )
)]
#[tracing::instrument(name = "POST /suppliers/{supplier_id}/payments", skip(state, user))]
pub async fn add_payment(
    State(state): State<AppState>,
    Extension(user): Extension<AppUser>,
    Path(supplier_id): Path<String>,
    Json(body): Json<AddPaymentRequest>,
) -> Result<Json<supplier::Model>, ApiError> {
    user.sub()?;

    if body.amount <= 0 {
        return Err(ApiError::bad_request(
            "Payment amount must be positive".to_string(),
        ));
    }

    let now = Utc::now().naive_utc();
    let txn = state.db.begin().await?;

    let existing = supplier::Entity::find_by_id(&supplier_id)
        .one(&txn)
        .await?
        .ok_or_else(|| not_found!("Supplier with ID {} not found", supplier_id))?;

    supplier_payment::ActiveModel {
        id: Set(cuid2::create_id()),
        supplier_id: Set(existing.id.clone()),
        amount: Set(body.amount),
        payment_date: Set(now),
    }
    .insert(&txn)
    .await?;

    let new_debt = (existing.total_debt - body.amount).max(0);
    let mut active: supplier::ActiveModel = existing.into();
    active.total_debt = Set(new_debt);
    active.updated_at = Set(now);
    let supplier = active.update(&txn).await?;

    txn.commit().await?;

    tracing::info!(
        supplier_id = %supplier.id,
        amount = body.amount,
        remaining_debt = supplier.total_debt,
        "Supplier payment recorded"
    );

    Ok(Json(supplier))
}
