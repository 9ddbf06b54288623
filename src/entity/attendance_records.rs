//! 点名记录实体
//!
//! lesson_date 存 UTC 零点时间戳；(class_id, lesson_date) 上有唯一索引，
//! 应用层的"先查再建"只是减少冲突的优化，重复插入由索引兜底。

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "attendance_records")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub class_id: i64,
    pub lesson_date: i64,
    pub lesson_number: i32,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::classes::Entity",
        from = "Column::ClassId",
        to = "super::classes::Column::Id"
    )]
    Class,
    #[sea_orm(has_many = "super::attendance_students::Entity")]
    AttendanceStudents,
}

impl Related<super::classes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Class.def()
    }
}

impl Related<super::attendance_students::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AttendanceStudents.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型（明细行另行查询后填充）
impl Model {
    pub fn into_attendance_record(
        self,
        students: Vec<crate::models::attendance::entities::StudentAttendance>,
    ) -> crate::models::attendance::entities::AttendanceRecord {
        use crate::models::attendance::entities::AttendanceRecord;
        use chrono::{DateTime, Utc};

        AttendanceRecord {
            id: self.id,
            class_id: self.class_id,
            lesson_date: DateTime::<Utc>::from_timestamp(self.lesson_date, 0).unwrap_or_default(),
            lesson_number: self.lesson_number,
            students,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
            updated_at: DateTime::<Utc>::from_timestamp(self.updated_at, 0).unwrap_or_default(),
        }
    }
}
