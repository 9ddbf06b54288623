use serde::{Deserialize, Serialize};

/// 报名结果：预生成的学费账单数量及其所属月份（"M/YYYY"）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrollmentSummary {
    pub payments_created: i32,
    pub payment_months: Vec<String>,
}

/// 批量退班结果
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WithdrawSummary {
    pub withdrawn: i32,
    pub not_enrolled: i32,
    pub errors: i32,
}
