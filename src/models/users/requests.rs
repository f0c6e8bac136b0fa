use super::entities::UserRole;
use serde::Deserialize;
use ts_rs::TS;

// 用户创建请求（存储层使用，password 字段已为哈希值）
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub struct CreateUserRequest {
    pub username: String,
    pub password: String,
    pub role: UserRole,
    pub year: Option<i32>,
}
