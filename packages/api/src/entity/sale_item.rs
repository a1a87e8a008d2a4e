//! `SeaORM` Entity for sale line items

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// One line of a sale.
///
/// `book_id` is a soft reference: no foreign key, so deleting a book from the
/// catalog neither cascades into nor is blocked by the ledger. `book_title`
/// and `price_at_sale` are snapshots taken at transaction time and are the
/// source of truth for historical reporting.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "sale_item")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false, column_type = "Text")]
    pub id: String,
    #[sea_orm(column_type = "Text")]
    pub sale_id: String,
    #[sea_orm(column_type = "Text")]
    pub book_id: String,
    /// Title of the book at transaction time
    #[sea_orm(column_type = "Text")]
    pub book_title: String,
    pub quantity: i32,
    /// Unit price at transaction time, in minor units
    pub price_at_sale: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::sale::Entity",
        from = "Column::SaleId",
        to = "super::sale::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Sale,
}

impl Related<super::sale::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Sale.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
