//! `SeaORM` Entity for the student directory

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A student a sale was recorded against.
///
/// Rows are inserted explicitly via the directory routes or implicitly by the
/// sale transaction; repeat buyers get a fresh row per sale (no dedup).
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "student")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false, column_type = "Text")]
    pub id: String,
    #[sea_orm(column_type = "Text")]
    pub name: String,
    pub class_level: super::sea_orm_active_enums::ClassLevel,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::sale::Entity")]
    Sale,
}

impl Related<super::sale::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Sale.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
