//! App state
//!
//! 查询相关的状态全部在 [`LookupController`] 中；这里只保存输入框、
//! 焦点与光标位置等纯界面状态。

use std::sync::Arc;

use tracing::{debug, warn};

use crate::controller::{ControllerView, LookupController};
use crate::history::HistoryList;
use crate::interfaces::tui::constants::DROPDOWN_PREVIEW_LEN;
use crate::services::SessionStore;

/// 当前屏幕
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurrentScreen {
    Main,
    Drawer,
    ClearConfirm,
    Exiting,
}

/// 主屏幕焦点
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    /// 搜索框
    Search,
    /// 下拉历史预览
    Dropdown,
}

pub struct App {
    pub controller: Arc<LookupController>,
    pub session: SessionStore,
    pub current_screen: CurrentScreen,
    pub focus: Focus,

    pub search_input: String,
    pub dropdown_index: usize,
    pub drawer_index: usize,

    pub status_message: String,
    pub user_name: String,

    /// 每帧刷新的控制器快照
    pub view: ControllerView,
}

impl App {
    pub fn new(controller: Arc<LookupController>, session: SessionStore) -> Self {
        let user_name = match session.user() {
            Ok(Some(user)) => user.name,
            _ => String::new(),
        };
        let view = controller.view();

        Self {
            controller,
            session,
            current_screen: CurrentScreen::Main,
            focus: Focus::Search,
            search_input: String::new(),
            dropdown_index: 0,
            drawer_index: 0,
            status_message: String::new(),
            user_name,
            view,
        }
    }

    /// 从控制器拉取最新快照，并修正越界的光标
    pub fn refresh(&mut self) {
        self.view = self.controller.view();

        let preview_len = self.preview().len();
        if preview_len == 0 {
            self.focus = Focus::Search;
            self.dropdown_index = 0;
        } else if self.dropdown_index >= preview_len {
            self.dropdown_index = preview_len - 1;
        }

        let history_len = self.view.history.len();
        if self.drawer_index >= history_len {
            self.drawer_index = history_len.saturating_sub(1);
        }
    }

    pub fn history(&self) -> &HistoryList {
        &self.view.history
    }

    /// 下拉预览（最近 5 条）
    pub fn preview(&self) -> &[crate::history::HistoryEntry] {
        self.view.history.preview(DROPDOWN_PREVIEW_LEN)
    }

    pub fn clear_messages(&mut self) {
        self.status_message.clear();
        self.controller.dismiss_error();
    }

    // ---- 查询 ----

    /// 挂载：加载历史并查询自身地址
    pub fn mount(&self) {
        let controller = Arc::clone(&self.controller);
        tokio::spawn(async move {
            controller.mount().await;
        });
    }

    /// 提交搜索框内容；查询在途时忽略
    pub fn submit_search(&mut self) {
        if self.view.searching {
            debug!("Search in flight, submit ignored");
            return;
        }
        self.status_message.clear();

        let controller = Arc::clone(&self.controller);
        let input = self.search_input.clone();
        tokio::spawn(async move {
            controller.submit(&input).await;
        });
    }

    /// 清空搜索框并重新查询自身地址
    pub fn clear_search(&mut self) {
        self.search_input.clear();
        self.status_message.clear();

        let controller = Arc::clone(&self.controller);
        tokio::spawn(async move {
            controller.clear_search().await;
        });
    }

    /// 重新查询一条历史记录
    pub fn select_history(&mut self, ip: String) {
        self.search_input = ip.clone();
        self.status_message.clear();

        let controller = Arc::clone(&self.controller);
        tokio::spawn(async move {
            controller.select_history(&ip).await;
        });
    }

    pub fn select_dropdown_entry(&mut self) {
        if let Some(entry) = self.preview().get(self.dropdown_index) {
            let ip = entry.ip.clone();
            self.focus = Focus::Search;
            self.select_history(ip);
        }
    }

    pub fn move_dropdown(&mut self, down: bool) {
        let len = self.preview().len();
        if len == 0 {
            return;
        }
        match (self.focus, down) {
            (Focus::Search, true) => {
                self.focus = Focus::Dropdown;
                self.dropdown_index = 0;
            }
            (Focus::Search, false) => {}
            (Focus::Dropdown, true) => {
                self.dropdown_index = (self.dropdown_index + 1).min(len - 1);
            }
            (Focus::Dropdown, false) => {
                if self.dropdown_index == 0 {
                    self.focus = Focus::Search;
                } else {
                    self.dropdown_index -= 1;
                }
            }
        }
    }

    // ---- 抽屉 ----

    pub fn open_drawer(&mut self) {
        self.controller.open_drawer();
        self.drawer_index = 0;
        self.current_screen = CurrentScreen::Drawer;
    }

    /// 关闭抽屉，勾选随之清空
    pub fn close_drawer(&mut self) {
        self.controller.close_drawer();
        self.current_screen = CurrentScreen::Main;
    }

    pub fn drawer_up(&mut self) {
        self.drawer_index = self.drawer_index.saturating_sub(1);
    }

    pub fn drawer_down(&mut self) {
        let len = self.view.history.len();
        if len > 0 {
            self.drawer_index = (self.drawer_index + 1).min(len - 1);
        }
    }

    fn drawer_current_ip(&self) -> Option<String> {
        self.view
            .history
            .entries()
            .get(self.drawer_index)
            .map(|entry| entry.ip.clone())
    }

    pub fn toggle_current(&mut self) {
        if let Some(ip) = self.drawer_current_ip() {
            self.controller.toggle_selection(&ip);
        }
    }

    pub fn toggle_all(&mut self) {
        self.controller.toggle_all();
    }

    /// 重新查询抽屉中当前行
    pub fn select_current(&mut self) {
        if let Some(ip) = self.drawer_current_ip() {
            self.select_history(ip);
        }
    }

    pub fn delete_current(&mut self) {
        if let Some(ip) = self.drawer_current_ip() {
            match self.controller.delete_entry(&ip) {
                Ok(_) => self.status_message = format!("Removed {}", ip),
                Err(e) => warn!("Delete of {} failed: {}", ip, e),
            }
        }
    }

    pub fn delete_selected(&mut self) {
        let count = self.view.selection.len();
        if count == 0 {
            return;
        }
        match self.controller.delete_selected() {
            Ok(_) => self.status_message = format!("Removed {} entries", count),
            Err(e) => warn!("Batch delete failed: {}", e),
        }
    }

    pub fn clear_history(&mut self) {
        match self.controller.clear_history() {
            Ok(_) => self.status_message = "Search history cleared".to_string(),
            Err(e) => warn!("Clear history failed: {}", e),
        }
        self.current_screen = if self.view.drawer_open {
            CurrentScreen::Drawer
        } else {
            CurrentScreen::Main
        };
    }

    /// 登出并退出界面
    pub fn logout(&mut self) -> bool {
        match self.session.logout() {
            Ok(()) => true,
            Err(e) => {
                warn!("Logout failed: {}", e);
                self.status_message.clear();
                false
            }
        }
    }
}
