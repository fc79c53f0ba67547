use std::sync::Arc;

use anyhow::{Context, Result};
use sea_orm::DatabaseConnection;
use tracing::{debug, info};

use crate::api::jwt::JwtService;
use crate::api::services::AuthService;
use crate::config::StaticConfig;
use crate::controller::LookupController;
use crate::history::HistoryStore;
use crate::services::{GeoIpProvider, GeoLookup, SessionStore};
use crate::storage::backend::{self, SeaOrmUserRepository, UserRepository};
use crate::storage::{KeyValueStore, StorageFactory};

/// 服务端启动上下文
pub struct ServerContext {
    pub db: DatabaseConnection,
    pub auth: AuthService,
}

/// 连接数据库、建表，并准备登录服务
pub async fn prepare_server_startup(config: &StaticConfig) -> Result<ServerContext> {
    let start_time = std::time::Instant::now();
    debug!("Starting pre-startup processing...");

    let db = backend::connect(&config.database)
        .await
        .context("Failed to connect to database")?;
    backend::run_migrations(&db)
        .await
        .context("Failed to run database migrations")?;

    let users: Arc<dyn UserRepository> = Arc::new(SeaOrmUserRepository::new(db.clone()));
    let jwt = Arc::new(JwtService::from_config(&config.auth));
    info!("Login tokens valid for {} minutes", jwt.token_minutes());

    debug!(
        "Pre-startup processing completed in {} ms",
        start_time.elapsed().as_millis()
    );
    Ok(ServerContext {
        db,
        auth: AuthService::new(users, jwt),
    })
}

/// CLI / TUI 共用的客户端上下文
pub struct ClientContext {
    pub store: Arc<dyn KeyValueStore>,
    pub session: SessionStore,
    pub controller: Arc<LookupController>,
}

impl ClientContext {
    /// 打开本地存储并创建查询控制器
    pub fn open(config: &StaticConfig) -> Result<Self> {
        let store = StorageFactory::open_client_store(&config.client)
            .with_context(|| format!("Failed to open client data dir {}", config.client.data_dir))?;
        let geo: Arc<dyn GeoLookup> = Arc::new(GeoIpProvider::new(&config.geoip));
        Ok(Self::with_parts(store, geo))
    }

    pub fn with_parts(store: Arc<dyn KeyValueStore>, geo: Arc<dyn GeoLookup>) -> Self {
        let history = HistoryStore::new(Arc::clone(&store));
        Self {
            session: SessionStore::new(Arc::clone(&store)),
            controller: Arc::new(LookupController::new(geo, history)),
            store,
        }
    }
}
