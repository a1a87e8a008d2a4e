use std::collections::HashMap;

use crate::{
    entity::{book, sale, sale_item, sea_orm_active_enums::ClassLevel, student},
    error::ApiError,
    internal, not_found,
    middleware::auth::AppUser,
    state::AppState,
};
use axum::{Extension, Json, extract::State, http::StatusCode};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set, TransactionTrait,
    prelude::Expr,
};
use serde::Deserialize;
use utoipa::ToSchema;

use super::report::{PopulatedSale, populate_sales};

#[derive(Debug, Deserialize, ToSchema)]
pub struct CartItem {
    pub book_id: String,
    pub quantity: i32,
}

/// The cart: either an existing student id or the fields to record a new
/// student with, plus the line items.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateSaleRequest {
    pub student_id: Option<String>,
    pub student_name: Option<String>,
    #[schema(value_type = Option<String>)]
    pub student_class: Option<ClassLevel>,
    pub items: Vec<CartItem>,
}

/// POST /sales - record a sale.
///
/// Stock validation, stock decrement, student resolution and the ledger
/// write all happen in one transaction; any failure leaves catalog and
/// ledger exactly as they were. The per-item decrement is conditional on
/// `stock >= quantity`, which is what serializes concurrent sales of the
/// same book.
#[utoipa::path(
    post,
    path = "/sales",
    tag = "sales",
    request_body = CreateSaleRequest,
    responses(
        (status = 201, description = "Committed sale with student and book detail", body = PopulatedSale),
        (status = 400, description = "Empty cart, bad quantity or missing student identity"),
        (status = 404, description = "Referenced book or student does not exist"),
        (status = 409, description = "Insufficient stock for a line item"),
        (status = 401, description = "Missing or invalid credential")
    )
)]
#[tracing::instrument(name = "POST /sales", skip(state, user, req))]
pub async fn create_sale(
    State(state): State<AppState>,
    Extension(user): Extension<AppUser>,
    Json(req): Json<CreateSaleRequest>,
) -> Result<(StatusCode, Json<PopulatedSale>), ApiError> {
    let sub = user.sub()?;

    // All shape validation happens before any write
    if req.items.is_empty() {
        return Err(ApiError::bad_request(
            "Cart must contain at least one item".to_string(),
        ));
    }
    for item in &req.items {
        if item.quantity < 1 {
            return Err(ApiError::bad_request(format!(
                "Quantity for book {} must be at least 1",
                item.book_id
            )));
        }
    }

    let student_name = req.student_name.as_deref().map(str::trim);
    if req.student_id.is_none()
        && (student_name.is_none_or(str::is_empty) || req.student_class.is_none())
    {
        return Err(ApiError::bad_request(
            "Either student_id or student_name and student_class are required".to_string(),
        ));
    }

    let now = Utc::now().naive_utc();
    let txn = state.db.begin().await?;

    // Resolve the student. New students are inserted inside the transaction
    // so a failed sale leaves no record behind. Note: no dedup by
    // name+class; repeat buyers get a fresh row per sale.
    let student = match &req.student_id {
        Some(id) => student::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or_else(|| not_found!("Student with ID {} not found", id))?,
        None => {
            let model = student::ActiveModel {
                id: Set(cuid2::create_id()),
                // Both checked above
                name: Set(student_name.unwrap_or_default().to_string()),
                class_level: Set(req.student_class.clone().unwrap_or(ClassLevel::Basic1)),
                created_at: Set(now),
                updated_at: Set(now),
            };
            model.insert(&txn).await?
        }
    };

    // Every referenced book must exist before anything is decremented
    let book_ids: Vec<String> = req.items.iter().map(|i| i.book_id.clone()).collect();
    let book_map: HashMap<String, book::Model> = book::Entity::find()
        .filter(book::Column::Id.is_in(book_ids))
        .all(&txn)
        .await?
        .into_iter()
        .map(|b| (b.id.clone(), b))
        .collect();

    for item in &req.items {
        if !book_map.contains_key(&item.book_id) {
            return Err(not_found!("Book with ID {} not found", item.book_id));
        }
    }

    // Conditional decrement: `stock = stock - q where id = ? and stock >= q`.
    // Zero rows affected means another sale got there first (or the cart
    // outgrew the shelf) and the whole transaction rolls back.
    for item in &req.items {
        let result = book::Entity::update_many()
            .col_expr(
                book::Column::Stock,
                Expr::col(book::Column::Stock).sub(item.quantity),
            )
            .col_expr(book::Column::UpdatedAt, Expr::value(now))
            .filter(book::Column::Id.eq(&item.book_id))
            .filter(book::Column::Stock.gte(item.quantity))
            .exec(&txn)
            .await?;

        if result.rows_affected == 0 {
            let available = book::Entity::find_by_id(&item.book_id)
                .one(&txn)
                .await?
                .map(|b| b.stock)
                .unwrap_or(0);
            let title = &book_map[&item.book_id].title;
            return Err(ApiError::insufficient_stock(title, item.quantity, available));
        }
    }

    // Prices come from the catalog, never from the client
    let total_amount: i64 = req
        .items
        .iter()
        .map(|i| book_map[&i.book_id].price * i64::from(i.quantity))
        .sum();

    let sale = sale::ActiveModel {
        id: Set(cuid2::create_id()),
        student_id: Set(student.id.clone()),
        total_amount: Set(total_amount),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(&txn)
    .await?;

    for item in &req.items {
        let book = &book_map[&item.book_id];
        sale_item::ActiveModel {
            id: Set(cuid2::create_id()),
            sale_id: Set(sale.id.clone()),
            book_id: Set(item.book_id.clone()),
            book_title: Set(book.title.clone()),
            quantity: Set(item.quantity),
            price_at_sale: Set(book.price),
        }
        .insert(&txn)
        .await?;
    }

    txn.commit().await?;

    tracing::info!(
        sale_id = %sale.id,
        student_id = %student.id,
        total_amount,
        cashier = %sub,
        "Sale committed"
    );

    let populated = populate_sales(&state.db, vec![sale])
        .await?
        .into_iter()
        .next()
        .ok_or_else(|| internal!("Committed sale vanished during populate"))?;

    Ok((StatusCode::CREATED, Json(populated)))
}
