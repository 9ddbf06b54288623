use serde::{Deserialize, Serialize};

use super::entities::TeacherWage;

/// 工资列表项：工资记录 + 按实际开课数算出的应发金额
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeacherWageResponse {
    #[serde(flatten)]
    pub wage: TeacherWage,
    pub total_owed: i64,
}

impl From<TeacherWage> for TeacherWageResponse {
    fn from(wage: TeacherWage) -> Self {
        let total_owed = wage.total_owed();
        Self { wage, total_owed }
    }
}
