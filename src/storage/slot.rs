//! 类型化槽位
//!
//! 把 key-value 存储中的单个 key 包装成 `get / set / clear` 仓库接口，
//! 调用方依赖的是抽象而不是直接读写全局存储。

use std::marker::PhantomData;
use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::kv::KeyValueStore;
use crate::errors::{GeoLookupError, Result};

/// 搜索历史槽位
pub const HISTORY_SLOT: &str = "geo_history";
/// 登录 token 槽位
pub const TOKEN_SLOT: &str = "token";
/// 当前用户资料槽位
pub const USER_SLOT: &str = "user";

/// 单个 JSON 槽位
pub struct Slot<T> {
    store: Arc<dyn KeyValueStore>,
    key: &'static str,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Clone for Slot<T> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            key: self.key,
            _marker: PhantomData,
        }
    }
}

impl<T> Slot<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(store: Arc<dyn KeyValueStore>, key: &'static str) -> Self {
        Self {
            store,
            key,
            _marker: PhantomData,
        }
    }

    pub fn key(&self) -> &'static str {
        self.key
    }

    /// 读取并反序列化
    ///
    /// 槽位不存在返回 `Ok(None)`；内容无法解析返回 `StorageParse`
    pub fn get(&self) -> Result<Option<T>> {
        let Some(raw) = self.store.get(self.key)? else {
            return Ok(None);
        };

        serde_json::from_str(&raw).map(Some).map_err(|e| {
            GeoLookupError::storage_parse(format!("Slot '{}' is corrupt: {}", self.key, e))
        })
    }

    /// 序列化并写入
    pub fn set(&self, value: &T) -> Result<()> {
        let json = serde_json::to_string(value)?;
        self.store.set(self.key, &json)
    }

    /// 删除槽位
    pub fn clear(&self) -> Result<()> {
        self.store.remove(self.key)
    }
}
