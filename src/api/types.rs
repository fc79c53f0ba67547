//! HTTP API 请求/响应类型
//!
//! 服务端 handler 与客户端 [`LoginClient`](crate::services::LoginClient) 共用。

use serde::{Deserialize, Serialize};

/// 登录请求
///
/// 字段缺省时反序列化为空字符串，由 handler 统一返回 400
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// 对外暴露的用户资料（不含密码哈希）
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct UserProfile {
    pub id: i32,
    pub email: String,
    pub name: String,
}

/// 登录成功响应
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct LoginResponse {
    pub success: bool,
    pub token: String,
    pub user: UserProfile,
}

/// 错误响应
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ErrorResponse {
    #[serde(default)]
    pub success: bool,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

/// 健康检查响应
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct HealthResponse {
    pub status: String,
    pub uptime_secs: u64,
}
