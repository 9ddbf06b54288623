use serde::Deserialize;

/// 创建班级请求
///
/// 课表字段可以整体缺省：未设置课表的班级对任意日期放行（历史行为）。
#[derive(Debug, Clone, Deserialize)]
pub struct CreateClassRequest {
    pub class_name: String,
    pub teacher_id: Option<i64>,
    pub fee_per_lesson: i64,
    pub wage_per_lesson: i64,
    #[serde(default = "default_max_students")]
    pub max_students: i64,
    pub schedule_start_date: Option<String>,
    pub schedule_end_date: Option<String>,
    pub days_of_lesson_in_week: Option<Vec<u32>>,
}

fn default_max_students() -> i64 {
    30
}

/// 更新班级请求（仅更新提供的字段）
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateClassRequest {
    pub class_name: Option<String>,
    pub fee_per_lesson: Option<i64>,
    pub wage_per_lesson: Option<i64>,
    pub max_students: Option<i64>,
    pub is_available: Option<bool>,
    pub schedule_start_date: Option<String>,
    pub schedule_end_date: Option<String>,
    pub days_of_lesson_in_week: Option<Vec<u32>>,
}

/// 指派授课教师请求
#[derive(Debug, Clone, Deserialize)]
pub struct AssignTeacherRequest {
    pub teacher_id: i64,
}
