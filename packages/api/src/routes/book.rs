use axum::{
    Router,
    routing::{delete, get, patch},
};

use crate::state::AppState;

pub mod create_book;
pub mod delete_book;
pub mod get_books;
pub mod low_stock;
pub mod update_price;
pub mod update_stock;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(get_books::get_books).post(create_book::create_book),
        )
        .route("/low-stock", get(low_stock::low_stock))
        .route("/{book_id}/stock", patch(update_stock::update_stock))
        .route("/{book_id}/price", patch(update_price::update_price))
        .route("/{book_id}", delete(delete_book::delete_book))
}
