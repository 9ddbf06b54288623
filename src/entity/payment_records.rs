//! 缴费流水实体（只追加）

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "payment_records")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub payment_id: i64,
    pub amount: i64,
    pub paid_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::payments::Entity",
        from = "Column::PaymentId",
        to = "super::payments::Column::Id"
    )]
    Payment,
}

impl Related<super::payments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Payment.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_payment_record(self) -> crate::models::payments::entities::PaymentRecord {
        use crate::models::payments::entities::PaymentRecord;
        use chrono::{DateTime, Utc};

        PaymentRecord {
            id: self.id,
            payment_id: self.payment_id,
            amount: self.amount,
            paid_at: DateTime::<Utc>::from_timestamp(self.paid_at, 0).unwrap_or_default(),
        }
    }
}
