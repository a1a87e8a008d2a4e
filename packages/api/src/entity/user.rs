//! `SeaORM` Entity for shop staff accounts

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A staff account that can sign in to the shop
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false, column_type = "Text")]
    pub id: String,
    #[sea_orm(unique, column_type = "Text")]
    pub name: String,
    #[sea_orm(unique, column_type = "Text")]
    pub email: String,
    /// bcrypt hash; never serialized back to clients
    #[serde(skip_serializing)]
    #[sea_orm(column_type = "Text")]
    pub password_hash: String,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
