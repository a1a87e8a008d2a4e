use axum::{
    Router,
    routing::{get, put},
};

use crate::state::AppState;

pub mod create_student;
pub mod get_students;
pub mod summaries;
pub mod update_student;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(get_students::get_students).post(create_student::create_student),
        )
        .route("/summaries", get(summaries::get_summaries))
        .route("/{student_id}", put(update_student::update_student))
}
