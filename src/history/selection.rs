use std::collections::HashSet;

use super::entry::HistoryList;

/// 抽屉中被勾选的 ip 集合，不持久化
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    selected: HashSet<String>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, ip: &str) -> bool {
        self.selected.contains(ip)
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn as_set(&self) -> &HashSet<String> {
        &self.selected
    }

    /// 切换勾选状态，返回切换后是否处于勾选
    pub fn toggle(&mut self, ip: &str) -> bool {
        if self.selected.remove(ip) {
            false
        } else {
            self.selected.insert(ip.to_string());
            true
        }
    }

    pub fn select_all(&mut self, history: &HistoryList) {
        self.selected = history.iter().map(|entry| entry.ip.clone()).collect();
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    /// 历史非空且每一条都被勾选
    pub fn is_all_selected(&self, history: &HistoryList) -> bool {
        !history.is_empty() && history.iter().all(|entry| self.selected.contains(&entry.ip))
    }

    /// 全选 / 全不选切换
    pub fn toggle_all(&mut self, history: &HistoryList) {
        if self.is_all_selected(history) {
            self.clear();
        } else {
            self.select_all(history);
        }
    }

    /// 丢弃已不在历史中的勾选项
    pub fn retain_existing(&mut self, history: &HistoryList) {
        self.selected.retain(|ip| history.contains(ip));
    }
}

/// 历史抽屉状态：开关 + 多选
///
/// 关闭抽屉时清空勾选
#[derive(Debug, Clone, Default)]
pub struct HistoryDrawer {
    open: bool,
    selection: SelectionSet,
}

impl HistoryDrawer {
    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
        self.selection.clear();
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    pub fn selection_mut(&mut self) -> &mut SelectionSet {
        &mut self.selection
    }
}
