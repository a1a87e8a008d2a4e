use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

pub mod add_payment;
pub mod create_supplier;
pub mod get_suppliers;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(get_suppliers::get_suppliers).post(create_supplier::create_supplier),
        )
        .route("/{supplier_id}/payments", post(add_payment::add_payment))
}
