use serde::{Deserialize, Serialize};

/// 点名记录：一个班级在一个日历日的全员出勤表
///
/// 每个 (class_id, lesson_date) 最多一条；重复点名会修改已有记录
/// 而不是新建。记录永远可改，只有管理员显式删除才会消失，且删除
/// 不回滚已产生的账单/工资。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttendanceRecord {
    pub id: i64,
    pub class_id: i64,
    // 上课日（UTC 零点）
    pub lesson_date: chrono::DateTime<chrono::Utc>,
    pub lesson_number: i32,
    pub students: Vec<StudentAttendance>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// 单个学生在一次课上的出勤状态
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentAttendance {
    pub student_id: i64,
    pub is_absent: bool,
}
