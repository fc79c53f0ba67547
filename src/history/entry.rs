use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 历史记录上限
pub const MAX_HISTORY_ENTRIES: usize = 10;

/// 一条历史记录
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// 校验通过的地址原文
    pub ip: String,
    /// 最近一次（重新）插入的时间，序列化为 RFC 3339
    pub timestamp: DateTime<Utc>,
}

/// 搜索历史列表
///
/// 不变量：
/// - 最近一次搜索在最前，显示顺序即插入顺序
/// - 同一个 `ip`（大小写敏感精确匹配）最多出现一次
/// - 长度不超过 [`MAX_HISTORY_ENTRIES`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HistoryList {
    entries: Vec<HistoryEntry>,
}

impl HistoryList {
    pub fn new() -> Self {
        Self::default()
    }

    /// 从任意条目构建，重新建立去重与上限不变量（保留每个 ip 的第一次出现）
    pub fn from_entries(entries: Vec<HistoryEntry>) -> Self {
        let mut seen = HashSet::new();
        let entries = entries
            .into_iter()
            .filter(|entry| seen.insert(entry.ip.clone()))
            .take(MAX_HISTORY_ENTRIES)
            .collect();
        Self { entries }
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, HistoryEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn first(&self) -> Option<&HistoryEntry> {
        self.entries.first()
    }

    pub fn get(&self, ip: &str) -> Option<&HistoryEntry> {
        self.entries.iter().find(|entry| entry.ip == ip)
    }

    pub fn contains(&self, ip: &str) -> bool {
        self.get(ip).is_some()
    }

    pub fn position(&self, ip: &str) -> Option<usize> {
        self.entries.iter().position(|entry| entry.ip == ip)
    }

    /// 下拉预览：前 `limit` 条
    pub fn preview(&self, limit: usize) -> &[HistoryEntry] {
        &self.entries[..self.entries.len().min(limit)]
    }

    /// 移除同 ip 旧记录，在最前插入新记录，截断到上限
    pub fn with_upsert(&self, ip: &str, timestamp: DateTime<Utc>) -> Self {
        let mut entries = Vec::with_capacity(MAX_HISTORY_ENTRIES);
        entries.push(HistoryEntry {
            ip: ip.to_string(),
            timestamp,
        });
        entries.extend(
            self.entries
                .iter()
                .filter(|entry| entry.ip != ip)
                .take(MAX_HISTORY_ENTRIES - 1)
                .cloned(),
        );
        Self { entries }
    }

    /// 移除指定 ip，不存在时原样返回
    pub fn without(&self, ip: &str) -> Self {
        Self {
            entries: self
                .entries
                .iter()
                .filter(|entry| entry.ip != ip)
                .cloned()
                .collect(),
        }
    }

    /// 移除集合中的所有 ip
    pub fn without_many(&self, ips: &HashSet<String>) -> Self {
        Self {
            entries: self
                .entries
                .iter()
                .filter(|entry| !ips.contains(&entry.ip))
                .cloned()
                .collect(),
        }
    }
}

impl<'a> IntoIterator for &'a HistoryList {
    type Item = &'a HistoryEntry;
    type IntoIter = std::slice::Iter<'a, HistoryEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn t(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
    }

    fn ips(list: &HistoryList) -> Vec<&str> {
        list.iter().map(|e| e.ip.as_str()).collect()
    }

    #[test]
    fn test_upsert_prepends() {
        let list = HistoryList::new()
            .with_upsert("1.1.1.1", t(0))
            .with_upsert("8.8.8.8", t(1));

        assert_eq!(ips(&list), vec!["8.8.8.8", "1.1.1.1"]);
        assert_eq!(list.first().unwrap().timestamp, t(1));
    }

    #[test]
    fn test_upsert_existing_moves_to_front_and_refreshes_timestamp() {
        let list = HistoryList::new()
            .with_upsert("1.1.1.1", t(0))
            .with_upsert("8.8.8.8", t(1))
            .with_upsert("9.9.9.9", t(2))
            .with_upsert("1.1.1.1", t(3));

        assert_eq!(ips(&list), vec!["1.1.1.1", "9.9.9.9", "8.8.8.8"]);
        assert_eq!(list.get("1.1.1.1").unwrap().timestamp, t(3));
    }

    #[test]
    fn test_upsert_caps_at_ten_and_drops_oldest() {
        let mut list = HistoryList::new();
        for i in 0..10 {
            list = list.with_upsert(&format!("10.0.0.{}", i), t(i));
        }
        assert_eq!(list.len(), 10);
        // 最旧的在末尾
        assert_eq!(list.entries()[9].ip, "10.0.0.0");

        let list = list.with_upsert("10.0.0.10", t(10));
        assert_eq!(list.len(), MAX_HISTORY_ENTRIES);
        assert_eq!(list.first().unwrap().ip, "10.0.0.10");
        assert!(!list.contains("10.0.0.0"));
        assert!(list.contains("10.0.0.1"));
    }

    #[test]
    fn test_upsert_existing_in_full_list_keeps_length() {
        let mut list = HistoryList::new();
        for i in 0..10 {
            list = list.with_upsert(&format!("10.0.0.{}", i), t(i));
        }
        let list = list.with_upsert("10.0.0.0", t(20));

        assert_eq!(list.len(), 10);
        assert_eq!(list.position("10.0.0.0"), Some(0));
        assert_eq!(list.iter().filter(|e| e.ip == "10.0.0.0").count(), 1);
    }

    #[test]
    fn test_ip_match_is_case_sensitive() {
        let list = HistoryList::new()
            .with_upsert("2001:db8:0:0:0:0:0:abcd", t(0))
            .with_upsert("2001:db8:0:0:0:0:0:ABCD", t(1));
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn test_without_is_idempotent() {
        let list = HistoryList::new()
            .with_upsert("1.1.1.1", t(0))
            .with_upsert("8.8.8.8", t(1));

        let once = list.without("1.1.1.1");
        let twice = once.without("1.1.1.1");
        assert_eq!(ips(&once), vec!["8.8.8.8"]);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_without_many() {
        let list = HistoryList::new()
            .with_upsert("1.1.1.1", t(0))
            .with_upsert("8.8.8.8", t(1))
            .with_upsert("9.9.9.9", t(2));

        let targets: HashSet<String> = ["1.1.1.1", "9.9.9.9", "4.4.4.4"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(ips(&list.without_many(&targets)), vec!["8.8.8.8"]);
    }

    #[test]
    fn test_preview() {
        let mut list = HistoryList::new();
        for i in 0..7 {
            list = list.with_upsert(&format!("10.0.0.{}", i), t(i));
        }
        assert_eq!(list.preview(5).len(), 5);
        assert_eq!(list.preview(5)[0].ip, "10.0.0.6");
        assert_eq!(HistoryList::new().preview(5).len(), 0);
    }

    #[test]
    fn test_from_entries_restores_invariants() {
        let mut entries = Vec::new();
        for i in 0..12 {
            entries.push(HistoryEntry {
                ip: format!("10.0.0.{}", i % 11),
                timestamp: t(0) + Duration::seconds(i),
            });
        }
        let list = HistoryList::from_entries(entries);
        assert_eq!(list.len(), 10);
        assert_eq!(list.iter().filter(|e| e.ip == "10.0.0.0").count(), 1);
    }

    #[test]
    fn test_serialized_shape() {
        let list = HistoryList::new().with_upsert("8.8.8.8", t(0));
        let json = serde_json::to_value(&list).unwrap();

        let entries = json.as_array().expect("list serializes as a JSON array");
        assert_eq!(entries[0]["ip"], "8.8.8.8");
        assert_eq!(entries[0]["timestamp"], "2023-11-14T22:13:20Z");
    }
}
