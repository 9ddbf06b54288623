//! 学费账单存储操作（Payment Ledger）
//!
//! 账单按 (student_id, class_id, month, year) 唯一。报名路径按课时
//! 估算预生成整月金额；点名路径缺单时从 0 起步逐课累加。两条创建
//! 路径的金额语义刻意不同，调用方依赖这一差异，不要统一。

use super::SeaOrmStorage;
use crate::entity::payment_records::{
    ActiveModel as PaymentRecordActiveModel, Column as PaymentRecordColumn,
    Entity as PaymentRecords,
};
use crate::entity::payments::{ActiveModel, Column, Entity as Payments, Model as PaymentModel};
use crate::errors::{Result, TuitionError};
use crate::models::payments::{
    entities::{LessonCounters, Payment},
    requests::PaymentListQuery,
};
use crate::utils::month_year_of;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};

/// 查找某学生某班某月的账单
pub(super) async fn find_payment<C: ConnectionTrait>(
    conn: &C,
    student_id: i64,
    class_id: i64,
    month: i32,
    year: i32,
) -> Result<Option<PaymentModel>> {
    Payments::find()
        .filter(
            Condition::all()
                .add(Column::StudentId.eq(student_id))
                .add(Column::ClassId.eq(class_id))
                .add(Column::Month.eq(month))
                .add(Column::Year.eq(year)),
        )
        .one(conn)
        .await
        .map_err(|e| TuitionError::database_operation(format!("查询学费账单失败: {e}")))
}

/// 点名路径的账单兜底创建：金额从 0 起步，只随课时计数器增长
///
/// 与报名路径不同，这里不做课时估算、不预填金额（历史行为，保留）。
pub(super) async fn ensure_payment_record<C: ConnectionTrait>(
    conn: &C,
    student_id: i64,
    class_id: i64,
    month: i32,
    year: i32,
) -> Result<PaymentModel> {
    if let Some(payment) = find_payment(conn, student_id, class_id, month, year).await? {
        return Ok(payment);
    }

    let now = chrono::Utc::now().timestamp();
    let model = ActiveModel {
        student_id: Set(student_id),
        class_id: Set(class_id),
        month: Set(month),
        year: Set(year),
        total_lessons: Set(0),
        attended_lessons: Set(0),
        absent_lessons: Set(0),
        discount_percentage: Set(0.0),
        original_amount: Set(0),
        after_discount_amount: Set(0),
        amount_due: Set(0),
        amount_paid: Set(0),
        is_withdrawn: Set(false),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    model
        .insert(conn)
        .await
        .map_err(|e| TuitionError::database_operation(format!("创建学费账单失败: {e}")))
}

/// 把一次出勤状态变更落到对应月份的账单上
///
/// `previous` 为该学生此前在这节课上的状态；与新状态相同时整个调用
/// 是空操作，保证点名幂等。
pub(super) async fn apply_attendance_change<C: ConnectionTrait>(
    conn: &C,
    student_id: i64,
    class_id: i64,
    lesson_day: DateTime<Utc>,
    previous: Option<bool>,
    is_absent: bool,
) -> Result<()> {
    let (month, year) = month_year_of(lesson_day);
    let payment = ensure_payment_record(conn, student_id, class_id, month, year).await?;

    let mut counters = LessonCounters::new(payment.attended_lessons, payment.absent_lessons);
    if !counters.apply_status_change(previous, is_absent) {
        return Ok(());
    }

    let model = ActiveModel {
        id: Set(payment.id),
        attended_lessons: Set(counters.attended_lessons),
        absent_lessons: Set(counters.absent_lessons),
        total_lessons: Set(counters.total_lessons),
        updated_at: Set(chrono::Utc::now().timestamp()),
        ..Default::default()
    };

    model
        .update(conn)
        .await
        .map_err(|e| TuitionError::database_operation(format!("更新学费账单课时失败: {e}")))?;

    Ok(())
}

/// 加载账单的缴费流水并组装业务模型
async fn load_payment<C: ConnectionTrait>(conn: &C, model: PaymentModel) -> Result<Payment> {
    let history = PaymentRecords::find()
        .filter(PaymentRecordColumn::PaymentId.eq(model.id))
        .order_by_asc(PaymentRecordColumn::PaidAt)
        .all(conn)
        .await
        .map_err(|e| TuitionError::database_operation(format!("查询缴费流水失败: {e}")))?
        .into_iter()
        .map(|m| m.into_payment_record())
        .collect();

    Ok(model.into_payment(history))
}

impl SeaOrmStorage {
    /// 登记缴费：追加一条流水并累加已缴金额
    ///
    /// 金额必须为正；不按应缴金额封顶，多缴表现为剩余应缴为负
    /// （历史行为，保留）。
    pub async fn record_payment_impl(&self, payment_id: i64, amount: i64) -> Result<Payment> {
        if amount <= 0 {
            return Err(TuitionError::validation(format!(
                "缴费金额必须为正数: {amount}"
            )));
        }

        let txn = self.db.begin().await?;

        let payment = Payments::find_by_id(payment_id)
            .one(&txn)
            .await
            .map_err(|e| TuitionError::database_operation(format!("查询学费账单失败: {e}")))?
            .ok_or_else(|| TuitionError::not_found(format!("学费账单不存在: {payment_id}")))?;

        let now = chrono::Utc::now().timestamp();

        let record = PaymentRecordActiveModel {
            payment_id: Set(payment.id),
            amount: Set(amount),
            paid_at: Set(now),
            ..Default::default()
        };
        record
            .insert(&txn)
            .await
            .map_err(|e| TuitionError::database_operation(format!("写入缴费流水失败: {e}")))?;

        let model = ActiveModel {
            id: Set(payment.id),
            amount_paid: Set(payment.amount_paid + amount),
            updated_at: Set(now),
            ..Default::default()
        };
        let updated = model
            .update(&txn)
            .await
            .map_err(|e| TuitionError::database_operation(format!("更新已缴金额失败: {e}")))?;

        let payment = load_payment(&txn, updated).await?;

        txn.commit().await?;

        Ok(payment)
    }

    /// 通过ID获取账单（含缴费流水）
    pub async fn get_payment_by_id_impl(&self, payment_id: i64) -> Result<Option<Payment>> {
        let model = Payments::find_by_id(payment_id)
            .one(&self.db)
            .await
            .map_err(|e| TuitionError::database_operation(format!("查询学费账单失败: {e}")))?;

        match model {
            Some(model) => Ok(Some(load_payment(&self.db, model).await?)),
            None => Ok(None),
        }
    }

    /// 列出学生账单，默认排除已退班打标的记录
    pub async fn list_student_payments_impl(
        &self,
        student_id: i64,
        query: PaymentListQuery,
    ) -> Result<Vec<Payment>> {
        let mut condition = Condition::all().add(Column::StudentId.eq(student_id));
        if let Some(class_id) = query.class_id {
            condition = condition.add(Column::ClassId.eq(class_id));
        }
        if !query.include_withdrawn {
            condition = condition.add(Column::IsWithdrawn.eq(false));
        }

        let models = Payments::find()
            .filter(condition)
            .order_by_asc(Column::Year)
            .order_by_asc(Column::Month)
            .all(&self.db)
            .await
            .map_err(|e| TuitionError::database_operation(format!("查询学生账单失败: {e}")))?;

        let mut payments = Vec::with_capacity(models.len());
        for model in models {
            payments.push(load_payment(&self.db, model).await?);
        }
        Ok(payments)
    }
}
