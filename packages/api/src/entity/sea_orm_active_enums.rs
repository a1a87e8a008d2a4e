//! String-valued active enums shared by the entities

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// School class level a book or student belongs to
#[derive(Debug, Clone, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum ClassLevel {
    #[sea_orm(string_value = "Basic 1")]
    #[serde(rename = "Basic 1")]
    Basic1,
    #[sea_orm(string_value = "Basic 2")]
    #[serde(rename = "Basic 2")]
    Basic2,
    #[sea_orm(string_value = "Basic 3")]
    #[serde(rename = "Basic 3")]
    Basic3,
    #[sea_orm(string_value = "Basic 4")]
    #[serde(rename = "Basic 4")]
    Basic4,
    #[sea_orm(string_value = "Basic 5")]
    #[serde(rename = "Basic 5")]
    Basic5,
    #[sea_orm(string_value = "Basic 6")]
    #[serde(rename = "Basic 6")]
    Basic6,
}

/// Currency the shop reports amounts in
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum Currency {
    #[sea_orm(string_value = "GHS")]
    #[serde(rename = "GHS")]
    Ghs,
    #[sea_orm(string_value = "USD")]
    #[serde(rename = "USD")]
    Usd,
    #[sea_orm(string_value = "EUR")]
    #[serde(rename = "EUR")]
    Eur,
}
