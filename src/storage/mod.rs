//! 存储层
//!
//! - `kv` / `slot`：客户端本地 key-value 槽位（搜索历史、token、用户资料）
//! - `backend`：服务端用户表（SeaORM）

pub mod backend;
pub mod kv;
pub mod slot;

use std::sync::Arc;

pub use kv::{FileKeyValueStore, KeyValueStore, MemoryKeyValueStore};
pub use slot::{HISTORY_SLOT, Slot, TOKEN_SLOT, USER_SLOT};

use crate::config::ClientConfig;
use crate::errors::Result;

pub struct StorageFactory;

impl StorageFactory {
    /// 按客户端配置打开本地 key-value 存储
    pub fn open_client_store(config: &ClientConfig) -> Result<Arc<dyn KeyValueStore>> {
        let store = FileKeyValueStore::open(&config.data_dir)?;
        Ok(Arc::new(store))
    }
}
