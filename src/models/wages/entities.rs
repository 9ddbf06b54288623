use serde::{Deserialize, Serialize};

/// 教师工资记录：每个教师每个班每个日历月一条
///
/// 字段语义沿用旧系统：`amount` 在创建时就被种为一节课的工资，
/// 之后每新开一次课只递增 `lesson_taught`；实际应发工资由调用方
/// 按 `lesson_taught * wage_per_lesson` 计算，不预先乘好存库。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeacherWage {
    pub id: i64,
    pub teacher_id: i64,
    pub class_id: i64,
    pub month: i32,
    pub year: i32,
    pub wage_per_lesson: i64,
    pub amount: i64,
    // 本月实际开课次数：只在新建点名记录时 +1，改已有记录不计
    pub lesson_taught: i32,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl TeacherWage {
    /// 本月应发工资
    pub fn total_owed(&self) -> i64 {
        self.lesson_taught as i64 * self.wage_per_lesson
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_owed() {
        let wage = TeacherWage {
            id: 1,
            teacher_id: 2,
            class_id: 3,
            month: 8,
            year: 2025,
            wage_per_lesson: 150_000,
            amount: 150_000,
            lesson_taught: 13,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        };
        assert_eq!(wage.total_owed(), 1_950_000);
    }
}
