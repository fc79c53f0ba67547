//! SeaORM 数据库后端
//!
//! 用户表的连接、迁移与访问，支持 SQLite、MySQL/MariaDB 和 PostgreSQL。

mod connection;
mod users;

use sea_orm::DatabaseConnection;
use tracing::info;

use crate::config::DatabaseConfig;
use crate::errors::{GeoLookupError, Result};

pub use connection::{connect_generic, connect_sqlite, run_migrations};
pub use users::{NewUser, SeaOrmUserRepository, UserRecord, UserRepository};

/// 从数据库 URL 推断数据库类型
pub fn infer_backend_from_url(database_url: &str) -> Result<&'static str> {
    if database_url.starts_with("sqlite:")
        || database_url.ends_with(".db")
        || database_url.ends_with(".sqlite")
    {
        Ok("sqlite")
    } else if database_url.starts_with("mysql://") || database_url.starts_with("mariadb://") {
        Ok("mysql")
    } else if database_url.starts_with("postgres://") || database_url.starts_with("postgresql://") {
        Ok("postgres")
    } else {
        Err(GeoLookupError::database_config(format!(
            "Cannot infer database type from URL: {}. Supported: sqlite://, mysql://, mariadb://, postgres://",
            database_url
        )))
    }
}

/// 按配置连接数据库
pub async fn connect(config: &DatabaseConfig) -> Result<DatabaseConnection> {
    let backend = infer_backend_from_url(&config.database_url)?;
    info!("Connecting to {} database", backend);

    match backend {
        "sqlite" => connect_sqlite(&config.database_url).await,
        other => {
            connect_generic(&config.database_url, other, config.pool_size, config.timeout).await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_infer_backend_from_url() {
        assert_eq!(infer_backend_from_url("sqlite://app.db?mode=rwc").unwrap(), "sqlite");
        assert_eq!(infer_backend_from_url("data/app.sqlite").unwrap(), "sqlite");
        assert_eq!(infer_backend_from_url("mysql://u:p@h/db").unwrap(), "mysql");
        assert_eq!(infer_backend_from_url("mariadb://u:p@h/db").unwrap(), "mysql");
        assert_eq!(
            infer_backend_from_url("postgres://u:p@localhost/geo").unwrap(),
            "postgres"
        );
        assert!(infer_backend_from_url("redis://localhost").is_err());
    }
}
