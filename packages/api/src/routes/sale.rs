use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

pub mod create_sale;
pub mod recent;
pub mod report;
pub mod totals;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_sale::create_sale))
        .route("/report", get(report::get_report))
        .route("/recent", get(recent::get_recent))
        .route("/totals", get(totals::get_totals))
}
