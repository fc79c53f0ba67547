//! HTTP API
//!
//! - `POST /api/login`：邮箱 + 密码登录，返回 JWT 与用户资料
//! - `GET /api/health`：存活检查

pub mod jwt;
pub mod services;
pub mod types;

pub use jwt::JwtService;
