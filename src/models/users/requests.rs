use serde::Deserialize;

use super::entities::UserRole;

/// 创建用户请求
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUserRequest {
    pub display_name: String,
    pub role: UserRole,
}
