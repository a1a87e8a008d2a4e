pub mod auth;
pub mod error_reporting;
