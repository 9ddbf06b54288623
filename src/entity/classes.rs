//! 班级实体
//!
//! 课表以三个可空列内嵌存储；三列中起止日期都存在才算设置了课表，
//! 否则该班对任意点名日期放行。

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "classes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub class_name: String,
    pub teacher_id: Option<i64>,
    pub fee_per_lesson: i64,
    pub wage_per_lesson: i64,
    pub max_students: i64,
    pub is_available: bool,
    pub schedule_start_date: Option<i64>,
    pub schedule_end_date: Option<i64>,
    // JSON 数组，如 "[1,3,5]"，周日为 0
    pub schedule_days: Option<String>,
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
    #[sea_orm(has_many = "super::class_students::Entity")]
    ClassStudents,
    #[sea_orm(has_many = "super::attendance_records::Entity")]
    AttendanceRecords,
    #[sea_orm(has_many = "super::payments::Entity")]
    Payments,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Teacher.def()
    }
}

impl Related<super::class_students::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ClassStudents.def()
    }
}

impl Related<super::attendance_records::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AttendanceRecords.def()
    }
}

impl Related<super::payments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Payments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_class(self) -> crate::models::classes::entities::Class {
        use crate::models::classes::entities::{Class, ClassSchedule};
        use chrono::{DateTime, Utc};

        let schedule = match (self.schedule_start_date, self.schedule_end_date) {
            (Some(start), Some(end)) => Some(ClassSchedule {
                start_date: DateTime::<Utc>::from_timestamp(start, 0)
                    .unwrap_or_default()
                    .date_naive(),
                end_date: DateTime::<Utc>::from_timestamp(end, 0)
                    .unwrap_or_default()
                    .date_naive(),
                days_of_lesson_in_week: self
                    .schedule_days
                    .as_deref()
                    .and_then(|days| serde_json::from_str(days).ok())
                    .unwrap_or_default(),
            }),
            _ => None,
        };

        Class {
            id: self.id,
            class_name: self.class_name,
            teacher_id: self.teacher_id,
            fee_per_lesson: self.fee_per_lesson,
            wage_per_lesson: self.wage_per_lesson,
            max_students: self.max_students,
            is_available: self.is_available,
            schedule,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
            updated_at: DateTime::<Utc>::from_timestamp(self.updated_at, 0).unwrap_or_default(),
        }
    }
}
