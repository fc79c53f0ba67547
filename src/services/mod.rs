//! 业务服务层
//!
//! - `geoip`：地理位置查询客户端
//! - `session`：客户端登录状态与登录接口调用
//! - `seeder`：数据库初始化与测试用户

pub mod geoip;
pub mod seeder;
pub mod session;

pub use geoip::{GeoIpProvider, GeoLookup, GeoResult, IpInfoClient};
pub use seeder::{SeedReport, SeedUser, seed_users, setup_database};
pub use session::{LoginClient, SessionStore, interpret_login_response};
