//! 考勤存储操作（Attendance Engine）
//!
//! 点名是整个计费链路的入口：一次点名在单个事务里完成点名记录的
//! 创建/修改、学费账单课时联动和教师工资计课。事务内任何一步失败，
//! 已做的账单/工资写入一并回滚。
//!
//! 幂等性：同一 (class_id, 日历日) 重复点名会命中已有记录；学生状态
//! 与上次相同时不会再次触碰账单。因此同样入参的请求整体重放对两本
//! 账都是空操作，事务失败后调用方可以安全重试。

use super::SeaOrmStorage;
use super::{payments, wages};
use crate::entity::attendance_records::{
    ActiveModel, Column, Entity as AttendanceRecords, Model as AttendanceRecordModel,
};
use crate::entity::attendance_students::{
    ActiveModel as AttendanceStudentActiveModel, Column as AttendanceStudentColumn,
    Entity as AttendanceStudents,
};
use crate::entity::class_students::{Column as ClassStudentColumn, Entity as ClassStudents};
use crate::entity::classes::Entity as Classes;
use crate::errors::{Result, TuitionError};
use crate::models::attendance::{
    entities::{AttendanceRecord, StudentAttendance},
    requests::{AttendanceListQuery, MarkAttendanceRequest},
};
use crate::utils::{day_bounds, parse_utc_day};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use std::collections::HashMap;

/// 按 UTC 日历日范围查找某班的点名记录
///
/// 存量数据的 lesson_date 可能带时分秒，所以用 [当天零点, 当天末秒]
/// 的闭区间匹配"同一天"，而不是等值比较。
async fn find_attendance_by_day<C: ConnectionTrait>(
    conn: &C,
    class_id: i64,
    day_start: i64,
    day_end: i64,
) -> Result<Option<AttendanceRecordModel>> {
    AttendanceRecords::find()
        .filter(
            Condition::all()
                .add(Column::ClassId.eq(class_id))
                .add(Column::LessonDate.gte(day_start))
                .add(Column::LessonDate.lte(day_end)),
        )
        .one(conn)
        .await
        .map_err(|e| TuitionError::database_operation(format!("查询点名记录失败: {e}")))
}

/// 加载一条点名记录的学生明细
async fn load_attendance_students<C: ConnectionTrait>(
    conn: &C,
    attendance_id: i64,
) -> Result<Vec<StudentAttendance>> {
    let rows = AttendanceStudents::find()
        .filter(AttendanceStudentColumn::AttendanceId.eq(attendance_id))
        .all(conn)
        .await
        .map_err(|e| TuitionError::database_operation(format!("查询点名明细失败: {e}")))?;

    Ok(rows.into_iter().map(|m| m.into_student_attendance()).collect())
}

impl SeaOrmStorage {
    /// 点名：创建或修改 (class_id, 日历日) 的点名记录并联动两本账
    pub async fn mark_class_attendance_impl(
        &self,
        class_id: i64,
        mark: MarkAttendanceRequest,
    ) -> Result<AttendanceRecord> {
        let day = parse_utc_day(&mark.date)?;

        let txn = self.db.begin().await?;

        // 1. 班级必须存在且在开放状态
        let class = Classes::find_by_id(class_id)
            .one(&txn)
            .await
            .map_err(|e| TuitionError::database_operation(format!("查询班级失败: {e}")))?
            .ok_or_else(|| TuitionError::class_not_found(format!("班级不存在: {class_id}")))?
            .into_class();

        if !class.is_available {
            return Err(TuitionError::class_closed(format!(
                "班级 {class_id} 已结课，无法点名"
            )));
        }

        // 2. 课表校验；未设置课表的班级对任意日期放行（历史行为）
        if let Some(schedule) = &class.schedule {
            if !schedule.is_legal_lesson_date(day.date_naive()) {
                return Err(TuitionError::schedule_violation(format!(
                    "{} 不是班级 {class_id} 的合法上课日",
                    day.format("%Y-%m-%d")
                )));
            }
        }

        // 3. 在读学生花名册
        let roster: Vec<i64> = ClassStudents::find()
            .filter(ClassStudentColumn::ClassId.eq(class_id))
            .all(&txn)
            .await
            .map_err(|e| TuitionError::database_operation(format!("查询班级学生失败: {e}")))?
            .into_iter()
            .map(|m| m.student_id)
            .collect();

        // 4. 找当天已有记录，没有则新建
        let (day_start, day_end) = day_bounds(day);
        let existing = find_attendance_by_day(&txn, class_id, day_start, day_end).await?;
        let is_new_attendance = existing.is_none();

        let now = chrono::Utc::now().timestamp();
        let record = match existing {
            Some(record) => {
                let model = ActiveModel {
                    id: Set(record.id),
                    lesson_number: Set(mark.lesson_number),
                    updated_at: Set(now),
                    ..Default::default()
                };
                model.update(&txn).await.map_err(|e| {
                    TuitionError::database_operation(format!("更新点名记录失败: {e}"))
                })?
            }
            None => {
                let model = ActiveModel {
                    class_id: Set(class_id),
                    lesson_date: Set(day_start),
                    lesson_number: Set(mark.lesson_number),
                    created_at: Set(now),
                    updated_at: Set(now),
                    ..Default::default()
                };
                model.insert(&txn).await.map_err(|e| {
                    TuitionError::database_operation(format!("创建点名记录失败: {e}"))
                })?
            }
        };

        // 5. 已有明细行，按学生索引
        let existing_rows: HashMap<i64, _> = AttendanceStudents::find()
            .filter(AttendanceStudentColumn::AttendanceId.eq(record.id))
            .all(&txn)
            .await
            .map_err(|e| TuitionError::database_operation(format!("查询点名明细失败: {e}")))?
            .into_iter()
            .map(|m| (m.student_id, m))
            .collect();

        // 6. 点名名单必须都在花名册内
        for status in &mark.students_attendance {
            if !roster.contains(&status.student_id) {
                return Err(TuitionError::not_enrolled(format!(
                    "学生 {} 未报名班级 {class_id}，无法点名",
                    status.student_id
                )));
            }
        }

        // 新建记录按花名册补全：请求没点到的在读学生默认记缺勤，
        // 请求里给出的状态视为覆盖；修改已有记录只动请求点到的学生
        let requested: HashMap<i64, bool> = mark
            .students_attendance
            .iter()
            .map(|s| (s.student_id, s.is_absent))
            .collect();
        let statuses: Vec<(i64, bool)> = if is_new_attendance {
            roster
                .iter()
                .map(|&student_id| {
                    (student_id, requested.get(&student_id).copied().unwrap_or(true))
                })
                .collect()
        } else {
            mark.students_attendance
                .iter()
                .map(|s| (s.student_id, s.is_absent))
                .collect()
        };

        // 7. 逐个学生落状态；只有状态实际变化才触碰学费账单
        for (student_id, is_absent) in statuses {
            let previous = existing_rows.get(&student_id).map(|row| row.is_absent);

            match existing_rows.get(&student_id) {
                Some(row) if row.is_absent == is_absent => {}
                Some(row) => {
                    let model = AttendanceStudentActiveModel {
                        id: Set(row.id),
                        is_absent: Set(is_absent),
                        ..Default::default()
                    };
                    model.update(&txn).await.map_err(|e| {
                        TuitionError::database_operation(format!("更新点名明细失败: {e}"))
                    })?;
                }
                None => {
                    let model = AttendanceStudentActiveModel {
                        attendance_id: Set(record.id),
                        student_id: Set(student_id),
                        is_absent: Set(is_absent),
                        ..Default::default()
                    };
                    model.insert(&txn).await.map_err(|e| {
                        TuitionError::database_operation(format!("写入点名明细失败: {e}"))
                    })?;
                }
            }

            if is_new_attendance || previous != Some(is_absent) {
                payments::apply_attendance_change(
                    &txn,
                    student_id,
                    class_id,
                    day,
                    previous,
                    is_absent,
                )
                .await?;
            }
        }

        // 8. 只有新开课才给教师计课；改已有记录不重复计
        if is_new_attendance {
            if let Some(teacher_id) = class.teacher_id {
                wages::record_lesson_taught(&txn, teacher_id, class_id, day, class.wage_per_lesson)
                    .await?;
            }
        }

        let students = load_attendance_students(&txn, record.id).await?;

        txn.commit().await?;

        Ok(record.into_attendance_record(students))
    }

    /// 列出班级点名记录，可限定某个日历日
    pub async fn list_class_attendance_impl(
        &self,
        class_id: i64,
        query: AttendanceListQuery,
    ) -> Result<Vec<AttendanceRecord>> {
        let mut condition = Condition::all().add(Column::ClassId.eq(class_id));
        if let Some(date) = &query.date {
            let (day_start, day_end) = day_bounds(parse_utc_day(date)?);
            condition = condition
                .add(Column::LessonDate.gte(day_start))
                .add(Column::LessonDate.lte(day_end));
        }

        let models = AttendanceRecords::find()
            .filter(condition)
            .order_by_asc(Column::LessonDate)
            .all(&self.db)
            .await
            .map_err(|e| TuitionError::database_operation(format!("查询点名记录失败: {e}")))?;

        let mut records = Vec::with_capacity(models.len());
        for model in models {
            let students = load_attendance_students(&self.db, model.id).await?;
            records.push(model.into_attendance_record(students));
        }
        Ok(records)
    }

    /// 管理员显式删除点名记录
    ///
    /// 明细行级联删除；已经产生的学费账单和教师工资不回滚
    /// （已知限制，与旧系统一致）。
    pub async fn delete_attendance_impl(&self, attendance_id: i64) -> Result<bool> {
        let result = AttendanceRecords::delete_by_id(attendance_id)
            .exec(&self.db)
            .await
            .map_err(|e| TuitionError::database_operation(format!("删除点名记录失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{
        create_scheduled_class, create_student, create_teacher, memory_storage,
    };
    use super::*;
    use crate::models::attendance::requests::StudentStatus;
    use crate::models::enrollments::requests::EnrollStudentRequest;
    use crate::models::payments::requests::PaymentListQuery;
    use crate::models::wages::requests::WageListQuery;

    fn mark_request(date: &str, statuses: Vec<(i64, bool)>) -> MarkAttendanceRequest {
        MarkAttendanceRequest {
            date: date.to_string(),
            lesson_number: 1,
            students_attendance: statuses
                .into_iter()
                .map(|(student_id, is_absent)| StudentStatus {
                    student_id,
                    is_absent,
                })
                .collect(),
        }
    }

    async fn enroll(storage: &SeaOrmStorage, class_id: i64, student_id: i64) {
        storage
            .enroll_student_impl(
                class_id,
                EnrollStudentRequest {
                    student_id,
                    discount_percentage: 0.0,
                },
            )
            .await
            .expect("enroll student");
    }

    async fn month_bill(
        storage: &SeaOrmStorage,
        student_id: i64,
        class_id: i64,
        month: i32,
    ) -> crate::models::payments::entities::Payment {
        storage
            .list_student_payments_impl(
                student_id,
                PaymentListQuery {
                    class_id: Some(class_id),
                    include_withdrawn: false,
                },
            )
            .await
            .expect("list bills")
            .into_iter()
            .find(|p| p.month == month)
            .expect("month bill")
    }

    #[tokio::test]
    async fn test_new_record_covers_full_roster() {
        let storage = memory_storage().await;
        let class_id = create_scheduled_class(&storage, None, "2030-04-30").await;
        let present = create_student(&storage, "小明").await;
        let unlisted = create_student(&storage, "小红").await;
        enroll(&storage, class_id, present).await;
        enroll(&storage, class_id, unlisted).await;

        // 只点到一个学生；另一个在读学生也要进表，默认记缺勤
        let record = storage
            .mark_class_attendance_impl(class_id, mark_request("2030-03-04", vec![(present, false)]))
            .await
            .expect("mark attendance");

        assert_eq!(record.students.len(), 2);
        let row = record
            .students
            .iter()
            .find(|s| s.student_id == unlisted)
            .expect("row for unlisted student");
        assert!(row.is_absent);

        let bill = month_bill(&storage, unlisted, class_id, 3).await;
        assert_eq!(bill.attended_lessons, 0);
        assert_eq!(bill.absent_lessons, 1);
        assert_eq!(bill.total_lessons, 1);
    }

    #[tokio::test]
    async fn test_remark_same_status_leaves_counters() {
        let storage = memory_storage().await;
        let class_id = create_scheduled_class(&storage, None, "2030-04-30").await;
        let student = create_student(&storage, "小明").await;
        enroll(&storage, class_id, student).await;

        let request = mark_request("2030-03-04", vec![(student, false)]);
        storage
            .mark_class_attendance_impl(class_id, request.clone())
            .await
            .expect("first mark");
        storage
            .mark_class_attendance_impl(class_id, request)
            .await
            .expect("second mark");

        let bill = month_bill(&storage, student, class_id, 3).await;
        assert_eq!(bill.attended_lessons, 1);
        assert_eq!(bill.absent_lessons, 0);
        assert_eq!(bill.total_lessons, 1);
    }

    #[tokio::test]
    async fn test_lesson_taught_counts_new_sessions_only() {
        let storage = memory_storage().await;
        let teacher = create_teacher(&storage, "王老师").await;
        let class_id = create_scheduled_class(&storage, Some(teacher), "2030-04-30").await;
        let student = create_student(&storage, "小明").await;
        enroll(&storage, class_id, student).await;

        storage
            .mark_class_attendance_impl(class_id, mark_request("2030-03-04", vec![(student, false)]))
            .await
            .expect("first session");
        // 改已有记录（翻转状态）不给教师重复计课
        storage
            .mark_class_attendance_impl(class_id, mark_request("2030-03-04", vec![(student, true)]))
            .await
            .expect("edit session");
        storage
            .mark_class_attendance_impl(class_id, mark_request("2030-03-06", vec![(student, false)]))
            .await
            .expect("second session");

        let wages = storage
            .list_teacher_wages_impl(
                teacher,
                WageListQuery {
                    month: Some(3),
                    year: Some(2030),
                },
            )
            .await
            .expect("list wages");
        assert_eq!(wages.len(), 1);
        assert_eq!(wages[0].lesson_taught, 2);
        assert_eq!(wages[0].amount, 150_000);
        assert_eq!(wages[0].total_owed(), 300_000);
    }

    #[tokio::test]
    async fn test_mark_rejects_unenrolled_student() {
        let storage = memory_storage().await;
        let class_id = create_scheduled_class(&storage, None, "2030-04-30").await;
        let outsider = create_student(&storage, "小刚").await;

        let result = storage
            .mark_class_attendance_impl(class_id, mark_request("2030-03-04", vec![(outsider, false)]))
            .await;
        assert!(matches!(result, Err(TuitionError::NotEnrolled(_))));
    }
}
