//! 查询控制器
//!
//! 校验输入 → 调用 GeoIP 服务 → 更新显示结果 → 写入搜索历史 → 更新错误/加载状态。
//! CLI 与 TUI 都只通过 [`LookupController`] 驱动查询与历史操作。

mod lookup;
mod view;

pub use lookup::LookupController;
pub use view::{
    ControllerView, FETCH_FAILED_MESSAGE, HISTORY_SAVE_FAILED_MESSAGE, INVALID_ADDRESS_MESSAGE,
    LookupOutcome, LookupPhase, NO_LOCATION_MESSAGE,
};
