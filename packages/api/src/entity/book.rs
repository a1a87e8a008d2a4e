//! `SeaORM` Entity for the textbook catalog

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A textbook tracked by the shop
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "book")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false, column_type = "Text")]
    pub id: String,
    #[sea_orm(column_type = "Text")]
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub subject: String,
    pub class_level: super::sea_orm_active_enums::ClassLevel,
    /// Unit price in minor currency units (e.g. pesewas)
    pub price: i64,
    /// Units currently on the shelf; only ever decremented by committed sales
    pub stock: i32,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
