//! 数据库初始化与测试用户种子

use tracing::info;

use crate::errors::{GeoLookupError, Result};
use crate::storage::backend::{NewUser, UserRepository, run_migrations};
use crate::utils::password::hash_password;
use sea_orm::DatabaseConnection;

/// 默认测试账号
pub const SEED_EMAIL: &str = "test@example.com";
pub const SEED_PASSWORD: &str = "password123";
pub const SEED_NAME: &str = "Test User";

/// 待写入的种子用户（明文密码）
#[derive(Debug, Clone)]
pub struct SeedUser {
    pub email: String,
    pub password: String,
    pub name: String,
}

impl Default for SeedUser {
    fn default() -> Self {
        Self {
            email: SEED_EMAIL.to_string(),
            password: SEED_PASSWORD.to_string(),
            name: SEED_NAME.to_string(),
        }
    }
}

/// 种子执行结果
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SeedReport {
    pub created: Vec<String>,
    /// 邮箱已存在，未做任何修改
    pub skipped: Vec<String>,
}

/// 创建/校验用户表
pub async fn setup_database(db: &DatabaseConnection) -> Result<()> {
    info!("Setting up database...");
    run_migrations(db).await?;
    info!("Users table created/verified successfully");
    Ok(())
}

/// 写入种子用户，已存在的邮箱保持原样
pub async fn seed_users(repo: &dyn UserRepository, users: &[SeedUser]) -> Result<SeedReport> {
    let mut report = SeedReport::default();

    for user in users {
        let password_hash = hash_password(&user.password).map_err(|e| {
            GeoLookupError::database_operation(format!(
                "Failed to hash password for {}: {}",
                user.email, e
            ))
        })?;

        let inserted = repo
            .insert_if_absent(NewUser {
                email: user.email.clone(),
                password_hash,
                name: user.name.clone(),
            })
            .await?;

        if inserted {
            info!("Seed user created: {}", user.email);
            report.created.push(user.email.clone());
        } else {
            info!("Seed user already exists, skipped: {}", user.email);
            report.skipped.push(user.email.clone());
        }
    }

    Ok(report)
}
