use std::collections::HashSet;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tracing::{debug, warn};

use super::entry::HistoryList;
use crate::errors::Result;
use crate::storage::{HISTORY_SLOT, KeyValueStore, Slot};

type Clock = fn() -> DateTime<Utc>;

/// 持久化的搜索历史
///
/// 每次修改先同步写入槽位，成功后再发布给订阅者；
/// 下拉预览和历史抽屉都通过 [`HistoryStore::subscribe`] 读取同一份数据。
pub struct HistoryStore {
    slot: Slot<HistoryList>,
    current: watch::Sender<HistoryList>,
    clock: Clock,
}

impl HistoryStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self::with_clock(store, Utc::now)
    }

    pub fn with_clock(store: Arc<dyn KeyValueStore>, clock: Clock) -> Self {
        let (current, _) = watch::channel(HistoryList::new());
        Self {
            slot: Slot::new(store, HISTORY_SLOT),
            current,
            clock,
        }
    }

    /// 读取持久化的历史
    ///
    /// 槽位不存在或内容损坏时返回空列表；损坏只记录日志，不上报给用户
    pub fn load(&self) -> HistoryList {
        let list = match self.slot.get() {
            Ok(Some(list)) => HistoryList::from_entries(list.entries().to_vec()),
            Ok(None) => HistoryList::new(),
            Err(e) => {
                warn!("Discarding unreadable search history: {}", e);
                HistoryList::new()
            }
        };

        debug!("Search history loaded with {} entries", list.len());
        self.current.send_replace(list.clone());
        list
    }

    /// 当前历史快照
    pub fn current(&self) -> HistoryList {
        self.current.borrow().clone()
    }

    /// 订阅历史变化
    pub fn subscribe(&self) -> watch::Receiver<HistoryList> {
        self.current.subscribe()
    }

    /// 记录一次成功的查询
    pub fn upsert(&self, ip: &str) -> Result<HistoryList> {
        let next = self.current().with_upsert(ip, (self.clock)());
        self.commit(next)
    }

    /// 删除一条，不存在时为 no-op
    pub fn remove(&self, ip: &str) -> Result<HistoryList> {
        let next = self.current().without(ip);
        self.commit(next)
    }

    /// 批量删除
    pub fn remove_many(&self, ips: &HashSet<String>) -> Result<HistoryList> {
        let next = self.current().without_many(ips);
        self.commit(next)
    }

    /// 清空历史并删除槽位
    pub fn clear(&self) -> Result<HistoryList> {
        self.slot.clear()?;
        let empty = HistoryList::new();
        self.current.send_replace(empty.clone());
        debug!("Search history cleared");
        Ok(empty)
    }

    fn commit(&self, next: HistoryList) -> Result<HistoryList> {
        self.slot.set(&next)?;
        self.current.send_replace(next.clone());
        Ok(next)
    }
}
