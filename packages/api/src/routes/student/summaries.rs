use std::collections::HashMap;

use crate::{
    entity::{sale, sale_item, sea_orm_active_enums::ClassLevel, student},
    error::ApiError,
    middleware::auth::AppUser,
    state::AppState,
};
use axum::{Extension, Json, extract::State};
use chrono::NaiveDateTime;
use sea_orm::EntityTrait;
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct StudentSummary {
    pub student_name: String,
    #[schema(value_type = String)]
    pub class_level: ClassLevel,
    /// Total spent across all purchases, in minor units
    pub total_spent: i64,
    pub purchase_count: i64,
    /// Total number of books across all purchases
    pub book_count: i64,
    pub last_purchase: NaiveDateTime,
}

/// GET /students/summaries - purchase history grouped per student.
///
/// Groups by (name, class) pair rather than student id: implicit creation
/// during sales inserts a fresh row per sale, and this is where those rows
/// collapse back into one line per actual student.
#[utoipa::path(
    get,
    path = "/students/summaries",
    tag = "students",
    responses(
        (status = 200, description = "Per-student purchase summaries, most recent buyer first", body = [StudentSummary]),
        (status = 401, description = "Missing or invalid credential")
    )
)]
#[tracing::instrument(name = "GET /students/summaries", skip(state, user))]
pub async fn get_summaries(
    State(state): State<AppState>,
    Extension(user): Extension<AppUser>,
) -> Result<Json<Vec<StudentSummary>>, ApiError> {
    user.sub()?;

    let sales = sale::Entity::find().all(&state.db).await?;
    if sales.is_empty() {
        return Ok(Json(Vec::new()));
    }

    let students: HashMap<String, student::Model> = student::Entity::find()
        .all(&state.db)
        .await?
        .into_iter()
        .map(|s| (s.id.clone(), s))
        .collect();

    let mut quantity_by_sale: HashMap<String, i64> = HashMap::new();
    for item in sale_item::Entity::find().all(&state.db).await? {
        *quantity_by_sale.entry(item.sale_id).or_default() += i64::from(item.quantity);
    }

    let mut groups: HashMap<(String, ClassLevel), StudentSummary> = HashMap::new();
    for sale in &sales {
        let Some(student) = students.get(&sale.student_id) else {
            continue;
        };

        let key = (student.name.clone(), student.class_level.clone());
        let entry = groups.entry(key).or_insert_with(|| StudentSummary {
            student_name: student.name.clone(),
            class_level: student.class_level.clone(),
            total_spent: 0,
            purchase_count: 0,
            book_count: 0,
            last_purchase: sale.created_at,
        });

        entry.total_spent += sale.total_amount;
        entry.purchase_count += 1;
        entry.book_count += quantity_by_sale.get(&sale.id).copied().unwrap_or(0);
        if sale.created_at > entry.last_purchase {
            entry.last_purchase = sale.created_at;
        }
    }

    let mut summaries: Vec<StudentSummary> = groups.into_values().collect();
    summaries.sort_by(|a, b| b.last_purchase.cmp(&a.last_purchase));

    Ok(Json(summaries))
}
