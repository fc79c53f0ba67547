use strum::{AsRefStr, Display};

use crate::errors::GeoLookupError;
use crate::history::{HistoryList, SelectionSet};
use crate::services::GeoResult;

pub const INVALID_ADDRESS_MESSAGE: &str = "Please enter a valid IP address";
pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch geolocation data";
pub const NO_LOCATION_MESSAGE: &str = "No location data available for this IP address";
pub const HISTORY_SAVE_FAILED_MESSAGE: &str = "Failed to save search history";

/// 查询阶段
///
/// 每次查询结束都回到 `Idle`；结束时的 `Invalid` / `Succeeded` / `Failed`
/// 记录在 [`ControllerView::last_outcome`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum LookupPhase {
    #[default]
    Idle,
    Validating,
    Invalid,
    Fetching,
    Succeeded,
    Failed,
}

impl LookupPhase {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Invalid | Self::Succeeded | Self::Failed)
    }
}

/// 一次查询调用的结果
#[derive(Debug, Clone, PartialEq)]
pub enum LookupOutcome {
    /// 结果已显示
    Applied(GeoResult),
    /// 失败，错误信息已设置，之前的结果保持显示
    Failed(GeoLookupError),
    /// 等待期间发出了更新的查询，本次响应被丢弃
    Superseded,
    /// 搜索框已有查询在途，本次提交被忽略
    Ignored,
}

impl LookupOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied(_))
    }
}

/// 展示层读取的状态快照
#[derive(Debug, Clone, Default)]
pub struct ControllerView {
    pub result: Option<GeoResult>,
    pub error: Option<String>,
    /// 自身地址的首次查询尚未完成，地图显示占位
    pub initial_loading: bool,
    /// 搜索框的查询在途，提交按钮禁用
    pub searching: bool,
    /// 当前阶段，空闲时为 `Idle`
    pub phase: LookupPhase,
    /// 最近一次完成的查询结果阶段
    pub last_outcome: Option<LookupPhase>,
    pub drawer_open: bool,
    pub selection: SelectionSet,
    pub history: HistoryList,
}
