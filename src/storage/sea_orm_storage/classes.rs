//! 班级存储操作

use super::SeaOrmStorage;
use crate::entity::class_students::{Column as ClassStudentColumn, Entity as ClassStudents};
use crate::entity::classes::{ActiveModel, Column, Entity as Classes};
use crate::entity::users::Entity as Users;
use crate::errors::{Result, TuitionError};
use crate::models::classes::{
    entities::Class,
    requests::{CreateClassRequest, UpdateClassRequest},
    responses::ClassDetailResponse,
};
use crate::models::users::entities::UserRole;
use crate::utils::parse_utc_day;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, PaginatorTrait,
    QueryFilter, Set, TransactionTrait,
};

/// 同一教师同时在带的班级数量上限
const MAX_CLASSES_PER_TEACHER: u64 = 5;

/// 校验并规范化课表字段：起止日期要么都给要么都不给，且 start < end
fn normalize_schedule_fields(
    start: &Option<String>,
    end: &Option<String>,
    days: &Option<Vec<u32>>,
) -> Result<(Option<i64>, Option<i64>, Option<String>)> {
    let (start, end) = match (start, end) {
        (None, None) => return Ok((None, None, None)),
        (Some(start), Some(end)) => (parse_utc_day(start)?, parse_utc_day(end)?),
        _ => {
            return Err(TuitionError::validation(
                "课表起止日期必须同时提供或同时省略",
            ));
        }
    };

    if start >= end {
        return Err(TuitionError::validation("课表开课日必须早于结课日"));
    }

    let days = days.clone().unwrap_or_default();
    if days.iter().any(|d| *d > 6) {
        return Err(TuitionError::validation("每周上课日必须在 0-6 之间（周日为 0）"));
    }

    Ok((
        Some(start.timestamp()),
        Some(end.timestamp()),
        Some(serde_json::to_string(&days)?),
    ))
}

impl SeaOrmStorage {
    /// 创建班级
    pub async fn create_class_impl(&self, class: CreateClassRequest) -> Result<Class> {
        if class.fee_per_lesson < 0 || class.wage_per_lesson < 0 {
            return Err(TuitionError::validation("课时费不能为负数"));
        }
        if class.max_students <= 0 {
            return Err(TuitionError::validation("班级容量必须为正数"));
        }

        let (start, end, days) = normalize_schedule_fields(
            &class.schedule_start_date,
            &class.schedule_end_date,
            &class.days_of_lesson_in_week,
        )?;

        let txn = self.db.begin().await?;

        if let Some(teacher_id) = class.teacher_id {
            Self::check_teacher_assignable(&txn, teacher_id, None).await?;
        }

        let now = chrono::Utc::now().timestamp();
        let model = ActiveModel {
            class_name: Set(class.class_name),
            teacher_id: Set(class.teacher_id),
            fee_per_lesson: Set(class.fee_per_lesson),
            wage_per_lesson: Set(class.wage_per_lesson),
            max_students: Set(class.max_students),
            is_available: Set(true),
            schedule_start_date: Set(start),
            schedule_end_date: Set(end),
            schedule_days: Set(days),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&txn)
            .await
            .map_err(|e| TuitionError::database_operation(format!("创建班级失败: {e}")))?;

        txn.commit().await?;

        Ok(result.into_class())
    }

    /// 通过ID获取班级信息
    pub async fn get_class_by_id_impl(&self, class_id: i64) -> Result<Option<Class>> {
        let result = Classes::find_by_id(class_id)
            .one(&self.db)
            .await
            .map_err(|e| TuitionError::database_operation(format!("查询班级失败: {e}")))?;

        Ok(result.map(|m| m.into_class()))
    }

    /// 获取班级详情（含在读学生ID列表）
    pub async fn get_class_detail_impl(&self, class_id: i64) -> Result<Option<ClassDetailResponse>> {
        let class = match self.get_class_by_id_impl(class_id).await? {
            Some(class) => class,
            None => return Ok(None),
        };

        let student_ids = ClassStudents::find()
            .filter(ClassStudentColumn::ClassId.eq(class_id))
            .all(&self.db)
            .await
            .map_err(|e| TuitionError::database_operation(format!("查询班级学生失败: {e}")))?
            .into_iter()
            .map(|m| m.student_id)
            .collect();

        Ok(Some(ClassDetailResponse { class, student_ids }))
    }

    /// 更新班级信息
    pub async fn update_class_impl(
        &self,
        class_id: i64,
        update: UpdateClassRequest,
    ) -> Result<Option<Class>> {
        // 先检查班级是否存在
        let existing = Classes::find_by_id(class_id)
            .one(&self.db)
            .await
            .map_err(|e| TuitionError::database_operation(format!("查询班级失败: {e}")))?;

        if existing.is_none() {
            return Ok(None);
        }

        let mut model = ActiveModel {
            id: Set(class_id),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        if let Some(class_name) = update.class_name {
            model.class_name = Set(class_name);
        }
        if let Some(fee) = update.fee_per_lesson {
            if fee < 0 {
                return Err(TuitionError::validation("课时费不能为负数"));
            }
            model.fee_per_lesson = Set(fee);
        }
        if let Some(wage) = update.wage_per_lesson {
            if wage < 0 {
                return Err(TuitionError::validation("课时费不能为负数"));
            }
            model.wage_per_lesson = Set(wage);
        }
        if let Some(max_students) = update.max_students {
            if max_students <= 0 {
                return Err(TuitionError::validation("班级容量必须为正数"));
            }
            model.max_students = Set(max_students);
        }
        if let Some(is_available) = update.is_available {
            model.is_available = Set(is_available);
        }

        // 课表字段整体更新；已有点名记录的班级改课表不做限制（历史行为）
        if update.schedule_start_date.is_some() || update.schedule_end_date.is_some() {
            let (start, end, days) = normalize_schedule_fields(
                &update.schedule_start_date,
                &update.schedule_end_date,
                &update.days_of_lesson_in_week,
            )?;
            model.schedule_start_date = Set(start);
            model.schedule_end_date = Set(end);
            model.schedule_days = Set(days);
        }

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| TuitionError::database_operation(format!("更新班级失败: {e}")))?;

        Ok(Some(result.into_class()))
    }

    /// 结课（软删除）
    pub async fn close_class_impl(&self, class_id: i64) -> Result<bool> {
        let existing = Classes::find_by_id(class_id)
            .one(&self.db)
            .await
            .map_err(|e| TuitionError::database_operation(format!("查询班级失败: {e}")))?;

        if existing.is_none() {
            return Ok(false);
        }

        let model = ActiveModel {
            id: Set(class_id),
            is_available: Set(false),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        model
            .update(&self.db)
            .await
            .map_err(|e| TuitionError::database_operation(format!("结课失败: {e}")))?;

        Ok(true)
    }

    /// 指派授课教师
    pub async fn assign_teacher_impl(&self, class_id: i64, teacher_id: i64) -> Result<Class> {
        let txn = self.db.begin().await?;

        let class = Classes::find_by_id(class_id)
            .one(&txn)
            .await
            .map_err(|e| TuitionError::database_operation(format!("查询班级失败: {e}")))?
            .ok_or_else(|| TuitionError::class_not_found(format!("班级不存在: {class_id}")))?;

        Self::check_teacher_assignable(&txn, teacher_id, Some(class_id)).await?;

        let model = ActiveModel {
            id: Set(class.id),
            teacher_id: Set(Some(teacher_id)),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .update(&txn)
            .await
            .map_err(|e| TuitionError::database_operation(format!("指派教师失败: {e}")))?;

        txn.commit().await?;

        Ok(result.into_class())
    }

    /// 校验教师可被指派：存在、角色为教师、在带班级未到上限
    async fn check_teacher_assignable<C: ConnectionTrait>(
        conn: &C,
        teacher_id: i64,
        exclude_class_id: Option<i64>,
    ) -> Result<()> {
        let teacher = Users::find_by_id(teacher_id)
            .one(conn)
            .await
            .map_err(|e| TuitionError::database_operation(format!("查询教师失败: {e}")))?
            .ok_or_else(|| TuitionError::user_not_found(format!("教师不存在: {teacher_id}")))?;

        if teacher.role.parse::<UserRole>().ok() != Some(UserRole::Teacher) {
            return Err(TuitionError::validation(format!(
                "用户 {teacher_id} 不是教师，无法指派"
            )));
        }

        let mut condition = Condition::all()
            .add(Column::TeacherId.eq(teacher_id))
            .add(Column::IsAvailable.eq(true));
        if let Some(class_id) = exclude_class_id {
            condition = condition.add(Column::Id.ne(class_id));
        }

        let active_classes = Classes::find()
            .filter(condition)
            .count(conn)
            .await
            .map_err(|e| TuitionError::database_operation(format!("查询教师在带班级数失败: {e}")))?;

        if active_classes >= MAX_CLASSES_PER_TEACHER {
            return Err(TuitionError::conflict(format!(
                "教师 {teacher_id} 已同时在带 {MAX_CLASSES_PER_TEACHER} 个班级，无法继续指派"
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_absent_schedule() {
        let result = normalize_schedule_fields(&None, &None, &None).unwrap();
        assert_eq!(result, (None, None, None));
    }

    #[test]
    fn test_normalize_full_schedule() {
        let (start, end, days) = normalize_schedule_fields(
            &Some("2025-08-01".to_string()),
            &Some("2025-09-30".to_string()),
            &Some(vec![1, 3, 5]),
        )
        .unwrap();
        assert!(start.unwrap() < end.unwrap());
        assert_eq!(days.as_deref(), Some("[1,3,5]"));
    }

    #[test]
    fn test_normalize_rejects_half_schedule() {
        let result =
            normalize_schedule_fields(&Some("2025-08-01".to_string()), &None, &None);
        assert!(result.is_err());
    }

    #[test]
    fn test_normalize_rejects_inverted_dates() {
        let result = normalize_schedule_fields(
            &Some("2025-09-30".to_string()),
            &Some("2025-08-01".to_string()),
            &None,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_normalize_rejects_bad_weekday() {
        let result = normalize_schedule_fields(
            &Some("2025-08-01".to_string()),
            &Some("2025-09-30".to_string()),
            &Some(vec![7]),
        );
        assert!(result.is_err());
    }
}
