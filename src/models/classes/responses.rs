use serde::{Deserialize, Serialize};

use super::entities::Class;

/// 班级详情：班级信息 + 当前在读学生ID列表
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassDetailResponse {
    #[serde(flatten)]
    pub class: Class,
    pub student_ids: Vec<i64>,
}
