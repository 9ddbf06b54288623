use serde::Deserialize;

/// 缴费请求
#[derive(Debug, Clone, Deserialize)]
pub struct RecordPaymentRequest {
    // 缴费金额（VND），必须为正
    pub amount: i64,
}

/// 学生账单列表查询参数
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentListQuery {
    pub class_id: Option<i64>,
    // 默认排除已退班打标的账单
    #[serde(default)]
    pub include_withdrawn: bool,
}
