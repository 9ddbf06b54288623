use serde::Deserialize;

/// 教师工资列表查询参数
#[derive(Debug, Clone, Deserialize)]
pub struct WageListQuery {
    pub month: Option<i32>,
    pub year: Option<i32>,
}
