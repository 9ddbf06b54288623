//! 学费账单实体
//!
//! (student_id, class_id, month, year) 上有唯一索引。

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "payments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub student_id: i64,
    pub class_id: i64,
    pub month: i32,
    pub year: i32,
    pub total_lessons: i32,
    pub attended_lessons: i32,
    pub absent_lessons: i32,
    pub discount_percentage: f64,
    pub original_amount: i64,
    pub after_discount_amount: i64,
    pub amount_due: i64,
    pub amount_paid: i64,
    pub is_withdrawn: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::StudentId",
        to = "super::users::Column::Id"
    )]
    Student,
    #[sea_orm(
        belongs_to = "super::classes::Entity",
        from = "Column::ClassId",
        to = "super::classes::Column::Id"
    )]
    Class,
    #[sea_orm(has_many = "super::payment_records::Entity")]
    PaymentRecords,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl Related<super::classes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Class.def()
    }
}

impl Related<super::payment_records::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PaymentRecords.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型（缴费流水另行查询后填充）
impl Model {
    pub fn into_payment(
        self,
        payment_history: Vec<crate::models::payments::entities::PaymentRecord>,
    ) -> crate::models::payments::entities::Payment {
        use crate::models::payments::entities::Payment;
        use chrono::{DateTime, Utc};

        Payment {
            id: self.id,
            student_id: self.student_id,
            class_id: self.class_id,
            month: self.month,
            year: self.year,
            total_lessons: self.total_lessons,
            attended_lessons: self.attended_lessons,
            absent_lessons: self.absent_lessons,
            discount_percentage: self.discount_percentage,
            original_amount: self.original_amount,
            after_discount_amount: self.after_discount_amount,
            amount_due: self.amount_due,
            amount_paid: self.amount_paid,
            is_withdrawn: self.is_withdrawn,
            payment_history,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
            updated_at: DateTime::<Utc>::from_timestamp(self.updated_at, 0).unwrap_or_default(),
        }
    }
}
