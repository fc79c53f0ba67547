//! 搜索历史
//!
//! - [`HistoryList`]：最近优先、按 ip 去重、最多 10 条
//! - [`HistoryStore`]：持久化到 key-value 槽位，并作为可订阅的单一数据源
//! - [`SelectionSet`] / [`HistoryDrawer`]：抽屉多选状态（不持久化）

mod entry;
mod selection;
mod store;

pub use entry::{HistoryEntry, HistoryList, MAX_HISTORY_ENTRIES};
pub use selection::{HistoryDrawer, SelectionSet};
pub use store::HistoryStore;
