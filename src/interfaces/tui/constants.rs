//! TUI 常量定义

use std::time::Duration;

/// 下拉预览显示的历史条数
pub const DROPDOWN_PREVIEW_LEN: usize = 5;

/// 事件轮询间隔，期间让出运行时给后台查询
pub const EVENT_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// 弹窗尺寸配置
#[derive(Debug, Clone, Copy)]
pub struct PopupSize {
    /// 宽度百分比 (0-100)
    pub width: u16,
    /// 高度百分比 (0-100)
    pub height: u16,
}

impl PopupSize {
    pub const fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// 各弹窗的尺寸配置
pub mod popup {
    use super::PopupSize;

    /// 历史抽屉
    pub const HISTORY_DRAWER: PopupSize = PopupSize::new(60, 70);
    /// 清空确认
    pub const CLEAR_CONFIRM: PopupSize = PopupSize::new(50, 25);
    /// 退出确认
    pub const EXITING: PopupSize = PopupSize::new(50, 25);
}

/// 颜色主题
pub mod colors {
    use ratatui::style::Color;

    pub const PRIMARY: Color = Color::Cyan;
    pub const SUCCESS: Color = Color::Green;
    pub const WARNING: Color = Color::Yellow;
    pub const ERROR: Color = Color::Red;
    pub const MUTED: Color = Color::DarkGray;
    pub const HIGHLIGHT_BG: Color = Color::Yellow;
    pub const HIGHLIGHT_FG: Color = Color::Black;
}
