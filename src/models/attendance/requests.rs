use serde::Deserialize;

/// 点名请求
#[derive(Debug, Clone, Deserialize)]
pub struct MarkAttendanceRequest {
    // ISO 日期（"2025-08-04" 或完整 RFC3339，均按 UTC 日历日处理）
    pub date: String,
    #[serde(default = "default_lesson_number")]
    pub lesson_number: i32,
    pub students_attendance: Vec<StudentStatus>,
}

fn default_lesson_number() -> i32 {
    1
}

/// 点名请求中的单个学生状态
#[derive(Debug, Clone, Deserialize)]
pub struct StudentStatus {
    pub student_id: i64,
    pub is_absent: bool,
}

/// 点名记录列表查询参数
#[derive(Debug, Clone, Deserialize)]
pub struct AttendanceListQuery {
    // 仅返回该日历日的记录
    pub date: Option<String>,
}
