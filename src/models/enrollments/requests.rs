use serde::Deserialize;

/// 学生报名请求
#[derive(Debug, Clone, Deserialize)]
pub struct EnrollStudentRequest {
    pub student_id: i64,
    // 折扣百分比，0-100
    #[serde(default)]
    pub discount_percentage: f64,
}

/// 学生退班请求（支持批量）
#[derive(Debug, Clone, Deserialize)]
pub struct WithdrawStudentsRequest {
    pub student_ids: Vec<i64>,
}
