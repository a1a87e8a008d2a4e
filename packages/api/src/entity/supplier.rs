//! `SeaORM` Entity for supplier debt tracking

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A supplier the shop owes money to
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "supplier")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false, column_type = "Text")]
    pub id: String,
    #[sea_orm(column_type = "Text")]
    pub name: String,
    /// Outstanding debt in minor units; floored at zero by payments
    pub total_debt: i64,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::supplier_payment::Entity")]
    SupplierPayment,
}

impl Related<super::supplier_payment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SupplierPayment.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
