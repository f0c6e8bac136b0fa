use crate::models::users::entities::UserRole;
use serde::Deserialize;
use ts_rs::TS;

/// 注册请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/auth.ts")]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub role: UserRole,
    /// 年级，仅学生需要
    pub year: Option<i32>,
}

/// 登录请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/auth.ts")]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}
