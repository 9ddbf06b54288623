//! 教师工资存储操作（Wage Ledger）
//!
//! 工资记录按 (teacher_id, class_id, month, year) 唯一。`amount` 在
//! 创建时种为一节课的工资，之后只递增 `lesson_taught`；应发工资由
//! 调用方按 lesson_taught * wage_per_lesson 计算。字段语义沿用旧
//! 系统，改动会导致对账数字不一致。

use super::SeaOrmStorage;
use crate::entity::teacher_wages::{
    ActiveModel, Column, Entity as TeacherWages, Model as TeacherWageModel,
};
use crate::errors::{Result, TuitionError};
use crate::models::wages::{entities::TeacherWage, requests::WageListQuery};
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, QueryFilter,
    QueryOrder, Set,
};

use crate::utils::month_year_of;

/// 查找或创建某教师某班某月的工资记录
///
/// 新建时 lesson_taught 为 0、amount 种为一节课工资。
pub(super) async fn ensure_wage_record<C: ConnectionTrait>(
    conn: &C,
    teacher_id: i64,
    class_id: i64,
    month: i32,
    year: i32,
    wage_per_lesson: i64,
) -> Result<TeacherWageModel> {
    let existing = TeacherWages::find()
        .filter(
            Condition::all()
                .add(Column::TeacherId.eq(teacher_id))
                .add(Column::ClassId.eq(class_id))
                .add(Column::Month.eq(month))
                .add(Column::Year.eq(year)),
        )
        .one(conn)
        .await
        .map_err(|e| TuitionError::database_operation(format!("查询工资记录失败: {e}")))?;

    if let Some(wage) = existing {
        return Ok(wage);
    }

    let now = chrono::Utc::now().timestamp();
    let model = ActiveModel {
        teacher_id: Set(teacher_id),
        class_id: Set(class_id),
        month: Set(month),
        year: Set(year),
        wage_per_lesson: Set(wage_per_lesson),
        amount: Set(wage_per_lesson),
        lesson_taught: Set(0),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    model
        .insert(conn)
        .await
        .map_err(|e| TuitionError::database_operation(format!("创建工资记录失败: {e}")))
}

/// 记一次开课：lesson_taught +1
///
/// 只在点名记录新建时调用；修改已有记录的学生状态不计课。
pub(super) async fn record_lesson_taught<C: ConnectionTrait>(
    conn: &C,
    teacher_id: i64,
    class_id: i64,
    lesson_day: DateTime<Utc>,
    wage_per_lesson: i64,
) -> Result<()> {
    let (month, year) = month_year_of(lesson_day);
    let wage = ensure_wage_record(conn, teacher_id, class_id, month, year, wage_per_lesson).await?;

    let model = ActiveModel {
        id: Set(wage.id),
        lesson_taught: Set(wage.lesson_taught + 1),
        updated_at: Set(chrono::Utc::now().timestamp()),
        ..Default::default()
    };

    model
        .update(conn)
        .await
        .map_err(|e| TuitionError::database_operation(format!("更新工资记录失败: {e}")))?;

    Ok(())
}

impl SeaOrmStorage {
    /// 列出教师工资记录，可按月份/年份过滤
    pub async fn list_teacher_wages_impl(
        &self,
        teacher_id: i64,
        query: WageListQuery,
    ) -> Result<Vec<TeacherWage>> {
        let mut condition = Condition::all().add(Column::TeacherId.eq(teacher_id));
        if let Some(month) = query.month {
            condition = condition.add(Column::Month.eq(month));
        }
        if let Some(year) = query.year {
            condition = condition.add(Column::Year.eq(year));
        }

        let wages = TeacherWages::find()
            .filter(condition)
            .order_by_asc(Column::Year)
            .order_by_asc(Column::Month)
            .all(&self.db)
            .await
            .map_err(|e| TuitionError::database_operation(format!("查询教师工资失败: {e}")))?;

        Ok(wages.into_iter().map(|m| m.into_teacher_wage()).collect())
    }
}
