//! 报名/退班存储操作（Enrollment Manager）
//!
//! 报名在单个事务里写花名册并按课表跨越的月份预生成学费账单；
//! 退班按学生逐个开事务，单个学生失败不影响其他学生的处理结果。

use super::SeaOrmStorage;
use super::payments;
use crate::entity::class_students::{
    ActiveModel as ClassStudentActiveModel, Column as ClassStudentColumn, Entity as ClassStudents,
};
use crate::entity::classes::Entity as Classes;
use crate::entity::payment_records::{Column as PaymentRecordColumn, Entity as PaymentRecords};
use crate::entity::payments::{ActiveModel as PaymentActiveModel, Entity as Payments};
use crate::entity::users::Entity as Users;
use crate::errors::{Result, TuitionError};
use crate::models::enrollments::{
    requests::EnrollStudentRequest,
    responses::{EnrollmentSummary, WithdrawSummary},
};
use crate::models::payments::entities::apply_discount;
use crate::models::users::entities::UserRole;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, ModelTrait, PaginatorTrait,
    QueryFilter, Set, TransactionTrait,
};

impl SeaOrmStorage {
    /// 报名：写花名册并按课表为每个跨越的月份预生成学费账单
    ///
    /// 没有课表的班级只写花名册，不预生成账单；后续账单由点名
    /// 路径兜底创建（从 0 起步）。
    pub async fn enroll_student_impl(
        &self,
        class_id: i64,
        enroll: EnrollStudentRequest,
    ) -> Result<EnrollmentSummary> {
        if !(0.0..=100.0).contains(&enroll.discount_percentage) {
            return Err(TuitionError::discount_range(format!(
                "折扣百分比必须在 0-100 之间: {}",
                enroll.discount_percentage
            )));
        }

        let txn = self.db.begin().await?;

        let class = Classes::find_by_id(class_id)
            .one(&txn)
            .await
            .map_err(|e| TuitionError::database_operation(format!("查询班级失败: {e}")))?
            .ok_or_else(|| TuitionError::class_not_found(format!("班级不存在: {class_id}")))?
            .into_class();

        if !class.is_available {
            return Err(TuitionError::class_closed(format!(
                "班级 {class_id} 已结课，无法报名"
            )));
        }

        // 课表已经整体结束的班级不再接收报名
        if let Some(schedule) = &class.schedule {
            if schedule.end_date < chrono::Utc::now().date_naive() {
                return Err(TuitionError::class_closed(format!(
                    "班级 {class_id} 课表已于 {} 结束，无法报名",
                    schedule.end_date
                )));
            }
        }

        let student = Users::find_by_id(enroll.student_id)
            .one(&txn)
            .await
            .map_err(|e| TuitionError::database_operation(format!("查询学生失败: {e}")))?
            .ok_or_else(|| {
                TuitionError::user_not_found(format!("学生不存在: {}", enroll.student_id))
            })?;

        if student.role.parse::<UserRole>().ok() != Some(UserRole::Student) {
            return Err(TuitionError::validation(format!(
                "用户 {} 不是学生，无法报名",
                enroll.student_id
            )));
        }

        let already_enrolled = ClassStudents::find()
            .filter(
                Condition::all()
                    .add(ClassStudentColumn::ClassId.eq(class_id))
                    .add(ClassStudentColumn::StudentId.eq(enroll.student_id)),
            )
            .count(&txn)
            .await
            .map_err(|e| TuitionError::database_operation(format!("查询报名记录失败: {e}")))?;

        if already_enrolled > 0 {
            return Err(TuitionError::conflict(format!(
                "学生 {} 已报名班级 {class_id}",
                enroll.student_id
            )));
        }

        let enrolled = ClassStudents::find()
            .filter(ClassStudentColumn::ClassId.eq(class_id))
            .count(&txn)
            .await
            .map_err(|e| TuitionError::database_operation(format!("查询班级人数失败: {e}")))?;

        if enrolled >= class.max_students as u64 {
            return Err(TuitionError::class_full(format!(
                "班级 {class_id} 已满员（容量 {}）",
                class.max_students
            )));
        }

        let now = chrono::Utc::now().timestamp();
        let link = ClassStudentActiveModel {
            class_id: Set(class_id),
            student_id: Set(enroll.student_id),
            joined_at: Set(now),
            ..Default::default()
        };
        link.insert(&txn)
            .await
            .map_err(|e| TuitionError::database_operation(format!("写入报名记录失败: {e}")))?;

        // 按课表跨越的月份预生成账单；某月已有账单时跳过不覆盖
        let mut payment_months = Vec::new();
        if let Some(schedule) = &class.schedule {
            for (month, year) in schedule.months_spanned() {
                let existing = payments::find_payment(
                    &txn,
                    enroll.student_id,
                    class_id,
                    month as i32,
                    year,
                )
                .await?;
                if existing.is_some() {
                    continue;
                }

                let total_lessons = schedule.estimate_lessons_in_month(month, year);
                let original_amount = total_lessons as i64 * class.fee_per_lesson;
                let after_discount_amount =
                    apply_discount(original_amount, enroll.discount_percentage);

                let payment = PaymentActiveModel {
                    student_id: Set(enroll.student_id),
                    class_id: Set(class_id),
                    month: Set(month as i32),
                    year: Set(year),
                    total_lessons: Set(total_lessons as i32),
                    attended_lessons: Set(0),
                    absent_lessons: Set(0),
                    discount_percentage: Set(enroll.discount_percentage),
                    original_amount: Set(original_amount),
                    after_discount_amount: Set(after_discount_amount),
                    amount_due: Set(after_discount_amount),
                    amount_paid: Set(0),
                    is_withdrawn: Set(false),
                    created_at: Set(now),
                    updated_at: Set(now),
                    ..Default::default()
                };
                payment.insert(&txn).await.map_err(|e| {
                    TuitionError::database_operation(format!("预生成学费账单失败: {e}"))
                })?;

                payment_months.push(format!("{month}/{year}"));
            }
        }

        txn.commit().await?;

        Ok(EnrollmentSummary {
            payments_created: payment_months.len() as i32,
            payment_months,
        })
    }

    /// 批量退班：每个学生一个事务，失败互不影响
    ///
    /// 账单处置规则：未缴过钱的账单直接删除；缴了一部分的保留并打
    /// 退班标记；已缴足的原样保留。
    pub async fn withdraw_students_impl(
        &self,
        class_id: i64,
        student_ids: Vec<i64>,
    ) -> Result<WithdrawSummary> {
        let mut summary = WithdrawSummary {
            withdrawn: 0,
            not_enrolled: 0,
            errors: 0,
        };

        for student_id in student_ids {
            match self.withdraw_one_student(class_id, student_id).await {
                Ok(true) => summary.withdrawn += 1,
                Ok(false) => summary.not_enrolled += 1,
                Err(e) => {
                    tracing::warn!("学生 {student_id} 退班班级 {class_id} 失败: {e}");
                    summary.errors += 1;
                }
            }
        }

        Ok(summary)
    }

    /// 单个学生退班；返回 false 表示本来就没有报名
    async fn withdraw_one_student(&self, class_id: i64, student_id: i64) -> Result<bool> {
        let txn = self.db.begin().await?;

        let link = ClassStudents::find()
            .filter(
                Condition::all()
                    .add(ClassStudentColumn::ClassId.eq(class_id))
                    .add(ClassStudentColumn::StudentId.eq(student_id)),
            )
            .one(&txn)
            .await
            .map_err(|e| TuitionError::database_operation(format!("查询报名记录失败: {e}")))?;

        let link = match link {
            Some(link) => link,
            None => return Ok(false),
        };

        link.delete(&txn)
            .await
            .map_err(|e| TuitionError::database_operation(format!("删除报名记录失败: {e}")))?;

        let bills = Payments::find()
            .filter(
                Condition::all()
                    .add(crate::entity::payments::Column::ClassId.eq(class_id))
                    .add(crate::entity::payments::Column::StudentId.eq(student_id)),
            )
            .all(&txn)
            .await
            .map_err(|e| TuitionError::database_operation(format!("查询学生账单失败: {e}")))?;

        for bill in bills {
            if bill.amount_paid == 0 {
                // 一分钱没缴过的账单连同流水直接删掉
                PaymentRecords::delete_many()
                    .filter(PaymentRecordColumn::PaymentId.eq(bill.id))
                    .exec(&txn)
                    .await
                    .map_err(|e| {
                        TuitionError::database_operation(format!("删除缴费流水失败: {e}"))
                    })?;
                Payments::delete_by_id(bill.id)
                    .exec(&txn)
                    .await
                    .map_err(|e| {
                        TuitionError::database_operation(format!("删除学费账单失败: {e}"))
                    })?;
            } else if bill.amount_paid < bill.amount_due {
                let model = PaymentActiveModel {
                    id: Set(bill.id),
                    is_withdrawn: Set(true),
                    updated_at: Set(chrono::Utc::now().timestamp()),
                    ..Default::default()
                };
                model.update(&txn).await.map_err(|e| {
                    TuitionError::database_operation(format!("标记退班账单失败: {e}"))
                })?;
            }
            // 已缴足的账单原样保留
        }

        txn.commit().await?;

        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{create_scheduled_class, create_student, memory_storage};
    use super::*;
    use crate::models::payments::requests::PaymentListQuery;

    fn enroll_request(student_id: i64) -> EnrollStudentRequest {
        EnrollStudentRequest {
            student_id,
            discount_percentage: 0.0,
        }
    }

    async fn all_bills(
        storage: &SeaOrmStorage,
        student_id: i64,
        class_id: i64,
    ) -> Vec<crate::models::payments::entities::Payment> {
        storage
            .list_student_payments_impl(
                student_id,
                PaymentListQuery {
                    class_id: Some(class_id),
                    include_withdrawn: true,
                },
            )
            .await
            .expect("list bills")
    }

    #[tokio::test]
    async fn test_enroll_provisions_bill_per_month() {
        let storage = memory_storage().await;
        let class_id = create_scheduled_class(&storage, None, "2030-04-30").await;
        let student = create_student(&storage, "小明").await;

        let summary = storage
            .enroll_student_impl(class_id, enroll_request(student))
            .await
            .expect("enroll");
        assert_eq!(summary.payments_created, 2);

        let bills = all_bills(&storage, student, class_id).await;
        assert_eq!(bills.len(), 2);
        // 2030 年 3 月周一三五共 13 节，课时费 100_000
        assert_eq!(bills[0].month, 3);
        assert_eq!(bills[0].total_lessons, 13);
        assert_eq!(bills[0].amount_due, 1_300_000);
        assert_eq!(bills[0].amount_paid, 0);
    }

    #[tokio::test]
    async fn test_reenroll_skips_months_with_existing_bills() {
        let storage = memory_storage().await;
        let class_id = create_scheduled_class(&storage, None, "2030-04-30").await;
        let student = create_student(&storage, "小明").await;

        storage
            .enroll_student_impl(class_id, enroll_request(student))
            .await
            .expect("enroll");
        let bills = all_bills(&storage, student, class_id).await;
        let march_id = bills[0].id;

        // 3 月账单缴一部分后退班：3 月保留打标，4 月未缴被删除
        storage
            .record_payment_impl(march_id, 500_000)
            .await
            .expect("record payment");
        let summary = storage
            .withdraw_students_impl(class_id, vec![student])
            .await
            .expect("withdraw");
        assert_eq!(summary.withdrawn, 1);

        // 重新报名只补缺失的 4 月账单，3 月旧账单原样保留
        let summary = storage
            .enroll_student_impl(class_id, enroll_request(student))
            .await
            .expect("re-enroll");
        assert_eq!(summary.payments_created, 1);
        assert_eq!(summary.payment_months, vec!["4/2030".to_string()]);

        let bills = all_bills(&storage, student, class_id).await;
        assert_eq!(bills.len(), 2);
        assert_eq!(bills[0].month, 3);
        assert_eq!(bills[0].amount_paid, 500_000);
        assert!(bills[0].is_withdrawn);
    }

    #[tokio::test]
    async fn test_withdraw_bill_disposition() {
        let storage = memory_storage().await;
        let class_id = create_scheduled_class(&storage, None, "2030-05-31").await;
        let student = create_student(&storage, "小红").await;

        storage
            .enroll_student_impl(class_id, enroll_request(student))
            .await
            .expect("enroll");
        let bills = all_bills(&storage, student, class_id).await;
        assert_eq!(bills.len(), 3);

        // 3 月缴足、4 月缴一部分、5 月一分未缴
        storage
            .record_payment_impl(bills[0].id, bills[0].amount_due)
            .await
            .expect("pay march in full");
        storage
            .record_payment_impl(bills[1].id, 100_000)
            .await
            .expect("pay april partially");

        let summary = storage
            .withdraw_students_impl(class_id, vec![student])
            .await
            .expect("withdraw");
        assert_eq!(summary.withdrawn, 1);

        let bills = all_bills(&storage, student, class_id).await;
        assert_eq!(bills.len(), 2);
        assert_eq!(bills[0].month, 3);
        assert!(!bills[0].is_withdrawn);
        assert_eq!(bills[0].amount_paid, bills[0].amount_due);
        assert_eq!(bills[1].month, 4);
        assert!(bills[1].is_withdrawn);

        // 再退一次：已经不在班上
        let summary = storage
            .withdraw_students_impl(class_id, vec![student])
            .await
            .expect("withdraw again");
        assert_eq!(summary.not_enrolled, 1);
    }

    #[tokio::test]
    async fn test_duplicate_enrollment_rejected() {
        let storage = memory_storage().await;
        let class_id = create_scheduled_class(&storage, None, "2030-04-30").await;
        let student = create_student(&storage, "小明").await;

        storage
            .enroll_student_impl(class_id, enroll_request(student))
            .await
            .expect("enroll");
        let result = storage
            .enroll_student_impl(class_id, enroll_request(student))
            .await;
        assert!(matches!(result, Err(TuitionError::Conflict(_))));
    }
}
