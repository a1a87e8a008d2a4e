pub mod prelude;

pub mod book;
pub mod error_report;
pub mod sale;
pub mod sale_item;
pub mod sea_orm_active_enums;
pub mod setting;
pub mod student;
pub mod supplier;
pub mod supplier_payment;
pub mod user;
