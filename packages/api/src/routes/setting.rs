use axum::{
    Router,
    routing::get,
};

use crate::state::AppState;

pub mod get_settings;
pub mod update_settings;

pub fn routes() -> Router<AppState> {
    Router::new().route(
        "/",
        get(get_settings::get_settings).put(update_settings::update_settings),
    )
}
