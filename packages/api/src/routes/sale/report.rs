use std::collections::HashMap;

use crate::{
    entity::{book, sale, sale_item, student},
    error::ApiError,
    middleware::auth::AppUser,
    state::AppState,
};
use axum::{
    Extension, Json,
    extract::{Query, State},
};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
pub struct ReportQuery {
    /// Start of the range (YYYY-MM-DD), widened to 00:00:00
    pub start_date: Option<String>,
    /// End of the range (YYYY-MM-DD), widened to 23:59:59.999
    pub end_date: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PopulatedSaleItem {
    pub book_id: String,
    /// Title snapshot from transaction time; survives catalog deletes
    pub book_title: String,
    pub quantity: i32,
    pub price_at_sale: i64,
    /// Current catalog entry, absent when the book was deleted
    #[schema(value_type = Option<Object>)]
    pub book: Option<book::Model>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PopulatedSale {
    pub id: String,
    #[schema(value_type = Option<Object>)]
    pub student: Option<student::Model>,
    pub items: Vec<PopulatedSaleItem>,
    pub total_amount: i64,
    pub created_at: NaiveDateTime,
}

/// Widen a calendar date to its full-day timestamp bounds (UTC)
pub(crate) fn day_bounds(date: NaiveDate) -> (NaiveDateTime, NaiveDateTime) {
    let start = date.and_time(NaiveTime::MIN);
    let end = date
        .and_hms_milli_opt(23, 59, 59, 999)
        .expect("valid end-of-day time");
    (start, end)
}

fn parse_date(raw: &str, param: &str) -> Result<NaiveDate, ApiError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| ApiError::bad_request(format!("Invalid {}: expected YYYY-MM-DD", param)))
}

/// Resolve student and book detail for a page of sales.
///
/// Book lookups go through the live catalog; a deleted book degrades to the
/// line item's snapshot fields instead of erroring.
pub(crate) async fn populate_sales<C: ConnectionTrait>(
    db: &C,
    sales: Vec<sale::Model>,
) -> Result<Vec<PopulatedSale>, ApiError> {
    if sales.is_empty() {
        return Ok(Vec::new());
    }

    let sale_ids: Vec<String> = sales.iter().map(|s| s.id.clone()).collect();
    let items = sale_item::Entity::find()
        .filter(sale_item::Column::SaleId.is_in(sale_ids))
        .all(db)
        .await?;

    let student_ids: Vec<String> = sales.iter().map(|s| s.student_id.clone()).collect();
    let students: HashMap<String, student::Model> = student::Entity::find()
        .filter(student::Column::Id.is_in(student_ids))
        .all(db)
        .await?
        .into_iter()
        .map(|s| (s.id.clone(), s))
        .collect();

    let book_ids: Vec<String> = items.iter().map(|i| i.book_id.clone()).collect();
    let books: HashMap<String, book::Model> = book::Entity::find()
        .filter(book::Column::Id.is_in(book_ids))
        .all(db)
        .await?
        .into_iter()
        .map(|b| (b.id.clone(), b))
        .collect();

    let mut items_by_sale: HashMap<String, Vec<sale_item::Model>> = HashMap::new();
    for item in items {
        items_by_sale.entry(item.sale_id.clone()).or_default().push(item);
    }

    let populated = sales
        .into_iter()
        .map(|s| PopulatedSale {
            student: students.get(&s.student_id).cloned(),
            items: items_by_sale
                .remove(&s.id)
                .unwrap_or_default()
                .into_iter()
                .map(|i| PopulatedSaleItem {
                    book: books.get(&i.book_id).cloned(),
                    book_id: i.book_id,
                    book_title: i.book_title,
                    quantity: i.quantity,
                    price_at_sale: i.price_at_sale,
                })
                .collect(),
            id: s.id,
            total_amount: s.total_amount,
            created_at: s.created_at,
        })
        .collect();

    Ok(populated)
}

/// GET /sales/report - sales in the given date range, newest first
#[utoipa::path(
    get,
    path = "/sales/report",
    tag = "sales",
    params(
        ("start_date" = Option<String>, Query, description = "YYYY-MM-DD"),
        ("end_date" = Option<String>, Query, description = "YYYY-MM-DD")
    ),
    responses(
        (status = 200, description = "Populated sales, newest first", body = [PopulatedSale]),
        (status = 400, description = "Malformed date"),
        (status = 401, description = "Missing or invalid credential")
    )
)]
#[tracing::instrument(name = "GET /sales/report", skip(state, user))]
pub async fn get_report(
    State(state): State<AppState>,
    Extension(user): Extension<AppUser>,
    Query(query): Query<ReportQuery>,
) -> Result<Json<Vec<PopulatedSale>>, ApiError> {
    user.sub()?;

    let mut select = sale::Entity::find();
    if let Some(raw) = query.start_date.as_deref() {
        let (start, _) = day_bounds(parse_date(raw, "start_date")?);
        select = select.filter(sale::Column::CreatedAt.gte(start));
    }
    if let Some(raw) = query.end_date.as_deref() {
        let (_, end) = day_bounds(parse_date(raw, "end_date")?);
        select = select.filter(sale::Column::CreatedAt.lte(end));
    }

    let sales = select
        .order_by_desc(sale::Column::CreatedAt)
        .all(&state.db)
        .await?;

    let populated = populate_sales(&state.db, sales).await?;
    Ok(Json(populated))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_day_bounds_cover_the_whole_day() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        let (start, end) = day_bounds(date);

        assert_eq!(start.to_string(), "2024-03-15 00:00:00");

        let last_second = date.and_hms_opt(23, 59, 59).unwrap();
        assert!(last_second <= end);

        let next_midnight = NaiveDate::from_ymd_opt(2024, 3, 16)
            .unwrap()
            .and_time(NaiveTime::MIN);
        assert!(next_midnight > end);
    }

    #[test]
    fn test_parse_date_rejects_garbage() {
        assert!(parse_date("2024-03-15", "start_date").is_ok());
        assert!(parse_date("15/03/2024", "start_date").is_err());
        assert!(parse_date("yesterday", "end_date").is_err());
    }
}
