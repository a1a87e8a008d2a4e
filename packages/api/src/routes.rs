use serde::{Deserialize, Serialize};

pub mod auth;
pub mod book;
pub mod health;
pub mod sale;
pub mod setting;
pub mod student;
pub mod supplier;

#[derive(Clone, Deserialize, Serialize, Debug)]
pub struct PaginationParams {
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}
