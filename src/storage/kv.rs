//! 客户端 key-value 存储
//!
//! 每个槽位保存一段 JSON 文本。写入同步完成，调用返回即已落盘。

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use parking_lot::RwLock;
use tracing::{debug, trace};

use crate::errors::{GeoLookupError, Result};

/// 扁平的 key-value 存储抽象
pub trait KeyValueStore: Send + Sync {
    /// 读取槽位原始内容，不存在时返回 None
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// 覆盖写入槽位
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// 删除槽位，不存在时为 no-op
    fn remove(&self, key: &str) -> Result<()>;

    /// 存储名称（用于日志）
    fn name(&self) -> &'static str;
}

/// 基于目录的文件存储：每个槽位一个 `<key>.json` 文件
pub struct FileKeyValueStore {
    dir: PathBuf,
}

impl FileKeyValueStore {
    /// 打开（必要时创建）存储目录
    pub fn open<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir).map_err(|e| {
            GeoLookupError::file_operation(format!(
                "Failed to create data directory {}: {}",
                dir.display(),
                e
            ))
        })?;
        debug!("FileKeyValueStore opened at {}", dir.display());
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn slot_path(&self, key: &str) -> Result<PathBuf> {
        if key.is_empty()
            || !key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            return Err(GeoLookupError::validation(format!(
                "Invalid storage key: {:?}",
                key
            )));
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.slot_path(key)?;
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(GeoLookupError::file_operation(format!(
                "Failed to read {}: {}",
                path.display(),
                e
            ))),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.slot_path(key)?;
        // 先写临时文件再 rename，避免中途崩溃留下半个 JSON
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        trace!("Slot {} written ({} bytes)", key, value.len());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let path = self.slot_path(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn name(&self) -> &'static str {
        "file"
    }
}

/// 内存存储，用于测试和不需要持久化的场景
#[derive(Default)]
pub struct MemoryKeyValueStore {
    slots: RwLock<HashMap<String, String>>,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 当前槽位数量
    pub fn len(&self) -> usize {
        self.slots.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.read().is_empty()
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.slots.read().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.slots.write().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.slots.write().remove(key);
        Ok(())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}
