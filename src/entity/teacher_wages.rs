//! 教师工资实体
//!
//! (teacher_id, class_id, month, year) 上有唯一索引。

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "teacher_wages")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub teacher_id: i64,
    pub class_id: i64,
    pub month: i32,
    pub year: i32,
    pub wage_per_lesson: i64,
    pub amount: i64,
    pub lesson_taught: i32,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::TeacherId",
        to = "super::users::Column::Id"
    )]
    Teacher,
    #[sea_orm(
        belongs_to = "super::classes::Entity",
        from = "Column::ClassId",
        to = "super::classes::Column::Id"
    )]
    Class,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Teacher.def()
    }
}

impl Related<super::classes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Class.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_teacher_wage(self) -> crate::models::wages::entities::TeacherWage {
        use crate::models::wages::entities::TeacherWage;
        use chrono::{DateTime, Utc};

        TeacherWage {
            id: self.id,
            teacher_id: self.teacher_id,
            class_id: self.class_id,
            month: self.month,
            year: self.year,
            wage_per_lesson: self.wage_per_lesson,
            amount: self.amount,
            lesson_taught: self.lesson_taught,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
            updated_at: DateTime::<Utc>::from_timestamp(self.updated_at, 0).unwrap_or_default(),
        }
    }
}
