use serde::{Deserialize, Serialize};

/// 学费账单：每个学生每个班每个日历月一条
///
/// 金额字段在创建时一次性计算（报名时按课时估算，点名触发时从 0 起步），
/// 之后只有课时计数器随出勤变动，金额不做追溯性重算。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payment {
    pub id: i64,
    pub student_id: i64,
    pub class_id: i64,
    pub month: i32,
    pub year: i32,
    pub total_lessons: i32,
    pub attended_lessons: i32,
    pub absent_lessons: i32,
    pub discount_percentage: f64,
    // 折扣前应缴（VND）
    pub original_amount: i64,
    // 折扣后应缴（VND）
    pub after_discount_amount: i64,
    pub amount_due: i64,
    // 已缴金额，只增不减；不设上限（多缴表现为剩余应缴为负）
    pub amount_paid: i64,
    // 学生退班时部分缴费的账单保留并打标，不再计入在读余额
    pub is_withdrawn: bool,
    pub payment_history: Vec<PaymentRecord>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl Payment {
    /// 家长端看到的剩余应缴金额（多缴时为负）
    pub fn outstanding_balance(&self) -> i64 {
        self.amount_due - self.amount_paid
    }
}

/// 缴费流水（只追加）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentRecord {
    pub id: i64,
    pub payment_id: i64,
    pub amount: i64,
    pub paid_at: chrono::DateTime<chrono::Utc>,
}

/// 按百分比折扣后的应缴金额，四舍五入到整 VND
pub fn apply_discount(original_amount: i64, discount_percentage: f64) -> i64 {
    (original_amount as f64 * (1.0 - discount_percentage / 100.0)).round() as i64
}

/// 出勤/缺勤课时计数器
///
/// 承载账单上的核心不变量：attended + absent == total 在任何一次
/// 变更之后都成立。状态翻转时对侧计数器对称递减，下限为 0。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LessonCounters {
    pub attended_lessons: i32,
    pub absent_lessons: i32,
    pub total_lessons: i32,
}

impl LessonCounters {
    pub fn new(attended_lessons: i32, absent_lessons: i32) -> Self {
        Self {
            attended_lessons,
            absent_lessons,
            total_lessons: attended_lessons + absent_lessons,
        }
    }

    /// 应用一次出勤状态变更，返回是否发生了实际变化
    ///
    /// `previous` 为该学生此前在这节课上记录过的状态（没有则为 None）。
    /// 与已有状态相同的重复提交是空操作，保证点名接口幂等。
    pub fn apply_status_change(&mut self, previous: Option<bool>, is_absent: bool) -> bool {
        if previous == Some(is_absent) {
            return false;
        }

        if is_absent {
            self.absent_lessons += 1;
        } else {
            self.attended_lessons += 1;
        }

        // 从另一种状态翻转过来时，对侧计数器对称递减
        if let Some(prev_absent) = previous {
            if prev_absent {
                self.absent_lessons = (self.absent_lessons - 1).max(0);
            } else {
                self.attended_lessons = (self.attended_lessons - 1).max(0);
            }
        }

        self.total_lessons = self.attended_lessons + self.absent_lessons;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_mark_present() {
        let mut counters = LessonCounters::default();
        assert!(counters.apply_status_change(None, false));
        assert_eq!(counters, LessonCounters::new(1, 0));
    }

    #[test]
    fn test_first_mark_absent() {
        let mut counters = LessonCounters::default();
        assert!(counters.apply_status_change(None, true));
        assert_eq!(counters, LessonCounters::new(0, 1));
    }

    #[test]
    fn test_flip_present_to_absent() {
        let mut counters = LessonCounters::new(1, 0);
        assert!(counters.apply_status_change(Some(false), true));
        assert_eq!(counters, LessonCounters::new(0, 1));
        // 总数不变
        assert_eq!(counters.total_lessons, 1);
    }

    #[test]
    fn test_same_status_is_noop() {
        let mut counters = LessonCounters::new(3, 1);
        assert!(!counters.apply_status_change(Some(true), true));
        assert_eq!(counters, LessonCounters::new(3, 1));
    }

    #[test]
    fn test_counters_floor_at_zero() {
        // 对侧计数器已经为 0 时翻转不会变成负数
        let mut counters = LessonCounters::new(0, 0);
        assert!(counters.apply_status_change(Some(false), true));
        assert_eq!(counters.attended_lessons, 0);
        assert_eq!(counters.absent_lessons, 1);
        assert_eq!(counters.total_lessons, 1);
    }

    #[test]
    fn test_invariant_holds_over_sequence() {
        let mut counters = LessonCounters::default();
        counters.apply_status_change(None, false);
        counters.apply_status_change(None, false);
        counters.apply_status_change(Some(false), true);
        counters.apply_status_change(None, true);
        counters.apply_status_change(Some(true), false);
        assert_eq!(
            counters.total_lessons,
            counters.attended_lessons + counters.absent_lessons
        );
    }

    #[test]
    fn test_apply_discount() {
        assert_eq!(apply_discount(800_000, 20.0), 640_000);
        assert_eq!(apply_discount(800_000, 0.0), 800_000);
        assert_eq!(apply_discount(800_000, 100.0), 0);
    }

    #[test]
    fn test_outstanding_balance_can_go_negative() {
        let payment = Payment {
            id: 1,
            student_id: 1,
            class_id: 1,
            month: 8,
            year: 2025,
            total_lessons: 8,
            attended_lessons: 0,
            absent_lessons: 0,
            discount_percentage: 0.0,
            original_amount: 800_000,
            after_discount_amount: 800_000,
            amount_due: 800_000,
            amount_paid: 900_000,
            is_withdrawn: false,
            payment_history: vec![],
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        };
        // 多缴不设上限，余额允许为负
        assert_eq!(payment.outstanding_balance(), -100_000);
    }
}
