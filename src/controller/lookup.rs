use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;
use tokio::sync::watch;
use tracing::{debug, error, info, warn};

use super::view::{
    ControllerView, FETCH_FAILED_MESSAGE, HISTORY_SAVE_FAILED_MESSAGE, INVALID_ADDRESS_MESSAGE,
    LookupOutcome, LookupPhase, NO_LOCATION_MESSAGE,
};
use crate::errors::{GeoLookupError, Result};
use crate::history::{HistoryDrawer, HistoryList, HistoryStore};
use crate::services::{GeoLookup, GeoResult};
use crate::utils::is_valid_address;

#[derive(Default)]
struct ControllerState {
    result: Option<GeoResult>,
    error: Option<String>,
    initial_loading: bool,
    search_in_flight: bool,
    phase: LookupPhase,
    last_outcome: Option<LookupPhase>,
    drawer: HistoryDrawer,
}

impl ControllerState {
    /// 记录本次结果并回到 `Idle`
    fn finish(&mut self, outcome: LookupPhase) {
        debug_assert!(outcome.is_terminal());
        self.last_outcome = Some(outcome);
        self.phase = LookupPhase::Idle;
    }
}

/// 查询控制器
///
/// 每次发出的查询都带一个单调递增的序号，响应返回时只有序号仍是最新的
/// 才会被应用（最后一次用户意图生效），旧响应直接丢弃，不更新显示也不写历史。
///
/// 状态锁不会跨 `.await` 持有。
pub struct LookupController {
    geo: Arc<dyn GeoLookup>,
    history: HistoryStore,
    state: Mutex<ControllerState>,
    seq: AtomicU64,
}

impl LookupController {
    pub fn new(geo: Arc<dyn GeoLookup>, history: HistoryStore) -> Self {
        Self {
            geo,
            history,
            state: Mutex::new(ControllerState::default()),
            seq: AtomicU64::new(0),
        }
    }

    /// 加载历史并查询调用方自身地址
    pub async fn mount(&self) -> LookupOutcome {
        let history = self.history.load();
        debug!("Controller mounted with {} history entries", history.len());

        self.state.lock().initial_loading = true;
        let outcome = self.run_lookup(None, false).await;
        self.state.lock().initial_loading = false;
        outcome
    }

    /// 只加载历史，不发起查询（单次命令使用）
    pub fn load_history(&self) -> HistoryList {
        self.history.load()
    }

    /// 搜索框提交
    ///
    /// 输入先去掉首尾空白再校验；校验失败不发请求。
    /// 搜索框已有查询在途时直接返回 [`LookupOutcome::Ignored`]。
    pub async fn submit(&self, input: &str) -> LookupOutcome {
        let ip = input.trim();
        {
            let mut state = self.state.lock();
            if state.search_in_flight {
                debug!("Search already in flight, ignoring submit of {:?}", ip);
                return LookupOutcome::Ignored;
            }

            state.phase = LookupPhase::Validating;
            if !is_valid_address(ip) {
                state.finish(LookupPhase::Invalid);
                state.error = Some(INVALID_ADDRESS_MESSAGE.to_string());
                return LookupOutcome::Failed(GeoLookupError::validation(format!(
                    "'{}' is not a valid IPv4 or IPv6 address",
                    ip
                )));
            }

            state.search_in_flight = true;
        }

        let outcome = self.run_lookup(Some(ip), true).await;
        self.state.lock().search_in_flight = false;
        outcome
    }

    /// 清空搜索框：重新查询自身地址，不清空地图
    pub async fn clear_search(&self) -> LookupOutcome {
        self.run_lookup(None, false).await
    }

    /// 重新查询一条历史记录，成功后移到最前
    pub async fn select_history(&self, ip: &str) -> LookupOutcome {
        self.run_lookup(Some(ip), true).await
    }

    async fn run_lookup(&self, ip: Option<&str>, record: bool) -> LookupOutcome {
        let seq = self.seq.fetch_add(1, Ordering::SeqCst) + 1;
        self.state.lock().phase = LookupPhase::Fetching;
        debug!(
            "Lookup #{} issued for {}",
            seq,
            ip.unwrap_or("own address")
        );

        let response = self.geo.lookup(ip).await;

        let mut state = self.state.lock();
        if self.seq.load(Ordering::SeqCst) != seq {
            debug!("Lookup #{} superseded, response discarded", seq);
            return LookupOutcome::Superseded;
        }

        match response {
            Ok(geo) if geo.is_bogon() => {
                info!("No location data for {}", geo.ip);
                state.finish(LookupPhase::Failed);
                state.error = Some(NO_LOCATION_MESSAGE.to_string());
                LookupOutcome::Failed(GeoLookupError::no_location(format!(
                    "{} is a reserved or private address",
                    ip.unwrap_or(&geo.ip)
                )))
            }
            Ok(geo) => {
                state.finish(LookupPhase::Succeeded);
                state.result = Some(geo.clone());
                state.error = None;
                state.initial_loading = false;

                if record && let Some(ip) = ip {
                    match self.history.upsert(ip) {
                        Ok(list) => state.drawer.selection_mut().retain_existing(&list),
                        Err(e) => {
                            error!("Failed to persist search history: {}", e);
                            state.error = Some(HISTORY_SAVE_FAILED_MESSAGE.to_string());
                        }
                    }
                }
                LookupOutcome::Applied(geo)
            }
            Err(e) => {
                warn!("Lookup #{} failed: {}", seq, e);
                state.finish(LookupPhase::Failed);
                state.error = Some(FETCH_FAILED_MESSAGE.to_string());
                LookupOutcome::Failed(e)
            }
        }
    }

    /// 删除一条历史
    pub fn delete_entry(&self, ip: &str) -> Result<HistoryList> {
        let mut state = self.state.lock();
        let list = self.persist(&mut state, |history| history.remove(ip))?;
        state.drawer.selection_mut().retain_existing(&list);
        Ok(list)
    }

    /// 删除所有勾选的历史，完成后清空勾选
    pub fn delete_selected(&self) -> Result<HistoryList> {
        let mut state = self.state.lock();
        if state.drawer.selection().is_empty() {
            return Ok(self.history.current());
        }

        let targets = state.drawer.selection().as_set().clone();
        let list = self.persist(&mut state, |history| history.remove_many(&targets))?;
        state.drawer.selection_mut().clear();
        info!("Deleted {} selected history entries", targets.len());
        Ok(list)
    }

    /// 清空全部历史与勾选
    pub fn clear_history(&self) -> Result<HistoryList> {
        let mut state = self.state.lock();
        let list = self.persist(&mut state, |history| history.clear())?;
        state.drawer.selection_mut().clear();
        Ok(list)
    }

    fn persist<F>(&self, state: &mut ControllerState, op: F) -> Result<HistoryList>
    where
        F: FnOnce(&HistoryStore) -> Result<HistoryList>,
    {
        op(&self.history).inspect_err(|e| {
            error!("Failed to persist search history: {}", e);
            state.error = Some(HISTORY_SAVE_FAILED_MESSAGE.to_string());
        })
    }

    /// 切换一条的勾选状态，返回切换后是否勾选
    pub fn toggle_selection(&self, ip: &str) -> bool {
        self.state.lock().drawer.selection_mut().toggle(ip)
    }

    pub fn select_all(&self) {
        let history = self.history.current();
        self.state.lock().drawer.selection_mut().select_all(&history);
    }

    /// 全部已勾选时全不选，否则全选
    pub fn toggle_all(&self) {
        let history = self.history.current();
        self.state.lock().drawer.selection_mut().toggle_all(&history);
    }

    pub fn deselect_all(&self) {
        self.state.lock().drawer.selection_mut().clear();
    }

    pub fn open_drawer(&self) {
        self.state.lock().drawer.open();
    }

    /// 关闭抽屉，同时清空勾选
    pub fn close_drawer(&self) {
        self.state.lock().drawer.close();
    }

    pub fn dismiss_error(&self) {
        self.state.lock().error = None;
    }

    pub fn history(&self) -> HistoryList {
        self.history.current()
    }

    /// 订阅历史变化（下拉预览、抽屉共用）
    pub fn subscribe_history(&self) -> watch::Receiver<HistoryList> {
        self.history.subscribe()
    }

    pub fn view(&self) -> ControllerView {
        let state = self.state.lock();
        ControllerView {
            result: state.result.clone(),
            error: state.error.clone(),
            initial_loading: state.initial_loading,
            searching: state.search_in_flight,
            phase: state.phase,
            last_outcome: state.last_outcome,
            drawer_open: state.drawer.is_open(),
            selection: state.drawer.selection().clone(),
            history: self.history.current(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{HISTORY_SLOT, KeyValueStore, MemoryKeyValueStore};
    use async_trait::async_trait;
    use chrono::{DateTime, TimeZone, Utc};
    use std::collections::HashMap;
    use tokio::sync::oneshot;

    const OWN: &str = "own";

    #[derive(Default)]
    struct FakeGeo {
        responses: Mutex<HashMap<String, Result<GeoResult>>>,
        gates: Mutex<HashMap<String, oneshot::Receiver<()>>>,
        calls: Mutex<Vec<Option<String>>>,
    }

    impl FakeGeo {
        fn respond(&self, key: &str, response: Result<GeoResult>) {
            self.responses.lock().insert(key.to_string(), response);
        }

        /// 响应挂起，直到返回的 sender 被触发
        fn gate(&self, key: &str) -> oneshot::Sender<()> {
            let (tx, rx) = oneshot::channel();
            self.gates.lock().insert(key.to_string(), rx);
            tx
        }

        fn calls(&self) -> Vec<Option<String>> {
            self.calls.lock().clone()
        }
    }

    #[async_trait]
    impl GeoLookup for FakeGeo {
        async fn lookup(&self, ip: Option<&str>) -> Result<GeoResult> {
            self.calls.lock().push(ip.map(String::from));
            let key = ip.unwrap_or(OWN).to_string();

            let gate = self.gates.lock().remove(&key);
            if let Some(gate) = gate {
                let _ = gate.await;
            }

            self.responses
                .lock()
                .get(&key)
                .cloned()
                .unwrap_or_else(|| Err(GeoLookupError::transport("connection refused")))
        }

        fn name(&self) -> &'static str {
            "fake"
        }
    }

    fn geo(ip: &str, city: &str, loc: &str) -> GeoResult {
        GeoResult {
            ip: ip.to_string(),
            city: city.to_string(),
            loc: loc.to_string(),
            ..Default::default()
        }
    }

    fn bogon(ip: &str) -> GeoResult {
        GeoResult {
            ip: ip.to_string(),
            bogon: Some(true),
            ..Default::default()
        }
    }

    fn fixed_clock() -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000, 0).unwrap()
    }

    fn setup() -> (Arc<FakeGeo>, Arc<MemoryKeyValueStore>, LookupController) {
        let fake = Arc::new(FakeGeo::default());
        fake.respond(OWN, Ok(geo("203.0.113.7", "Sydney", "-33.8688,151.2093")));
        fake.respond(
            "8.8.8.8",
            Ok(geo("8.8.8.8", "Mountain View", "37.4056,-122.0775")),
        );
        fake.respond("1.1.1.1", Ok(geo("1.1.1.1", "Brisbane", "-27.4816,153.0175")));
        fake.respond("9.9.9.9", Ok(geo("9.9.9.9", "Berkeley", "37.8716,-122.2727")));
        fake.respond("127.0.0.1", Ok(bogon("127.0.0.1")));

        let kv = Arc::new(MemoryKeyValueStore::new());
        let history = HistoryStore::with_clock(kv.clone(), fixed_clock);
        let controller = LookupController::new(fake.clone(), history);
        (fake, kv, controller)
    }

    fn history_ips(controller: &LookupController) -> Vec<String> {
        controller.history().iter().map(|e| e.ip.clone()).collect()
    }

    #[tokio::test]
    async fn test_mount_looks_up_own_address_without_recording() {
        let (fake, _, controller) = setup();
        assert!(controller.mount().await.is_applied());

        let view = controller.view();
        assert_eq!(view.result.unwrap().city, "Sydney");
        assert!(!view.initial_loading);
        assert!(view.history.is_empty());
        assert_eq!(fake.calls(), vec![None]);
    }

    #[tokio::test]
    async fn test_initial_loading_while_mount_in_flight() {
        let (fake, _, controller) = setup();
        let release = fake.gate(OWN);

        let (outcome, loading) = tokio::join!(controller.mount(), async {
            let loading = controller.view().initial_loading;
            release.send(()).unwrap();
            loading
        });

        assert!(loading);
        assert!(outcome.is_applied());
        assert!(!controller.view().initial_loading);
    }

    #[tokio::test]
    async fn test_submit_valid_address() {
        let (_, kv, controller) = setup();
        controller.mount().await;

        let outcome = controller.submit("8.8.8.8").await;
        assert!(outcome.is_applied());

        let view = controller.view();
        assert_eq!(view.result.unwrap().city, "Mountain View");
        assert_eq!(view.error, None);
        assert_eq!(view.phase, LookupPhase::Idle);
        assert_eq!(view.last_outcome, Some(LookupPhase::Succeeded));
        assert_eq!(
            kv.get(HISTORY_SLOT).unwrap().unwrap(),
            r#"[{"ip":"8.8.8.8","timestamp":"2023-11-14T22:13:20Z"}]"#
        );
    }

    #[tokio::test]
    async fn test_submit_trims_input() {
        let (fake, _, controller) = setup();
        assert!(controller.submit("  8.8.8.8 ").await.is_applied());
        assert_eq!(fake.calls(), vec![Some("8.8.8.8".to_string())]);
        assert_eq!(history_ips(&controller), vec!["8.8.8.8"]);
    }

    #[tokio::test]
    async fn test_phase_returns_to_idle_after_each_lookup() {
        let (fake, _, controller) = setup();
        assert_eq!(controller.view().phase, LookupPhase::Idle);
        assert_eq!(controller.view().last_outcome, None);

        let release = fake.gate("8.8.8.8");
        let (_, in_flight) = tokio::join!(controller.submit("8.8.8.8"), async {
            let phase = controller.view().phase;
            release.send(()).unwrap();
            phase
        });
        assert_eq!(in_flight, LookupPhase::Fetching);
        assert_eq!(controller.view().phase, LookupPhase::Idle);
        assert_eq!(controller.view().last_outcome, Some(LookupPhase::Succeeded));

        // 无响应配置的地址走传输失败
        controller.submit("4.4.4.4").await;
        let view = controller.view();
        assert_eq!(view.phase, LookupPhase::Idle);
        assert_eq!(view.last_outcome, Some(LookupPhase::Failed));

        controller.submit("127.0.0.1").await;
        assert_eq!(controller.view().phase, LookupPhase::Idle);
        assert_eq!(controller.view().last_outcome, Some(LookupPhase::Failed));
    }

    #[tokio::test]
    async fn test_submit_invalid_address_makes_no_request() {
        let (fake, _, controller) = setup();
        controller.mount().await;
        controller.submit("8.8.8.8").await;
        let calls_before = fake.calls().len();

        let outcome = controller.submit("999.1.1.1").await;
        assert!(matches!(
            outcome,
            LookupOutcome::Failed(GeoLookupError::Validation(_))
        ));

        let view = controller.view();
        assert_eq!(view.error.as_deref(), Some(INVALID_ADDRESS_MESSAGE));
        assert_eq!(view.phase, LookupPhase::Idle);
        assert_eq!(view.last_outcome, Some(LookupPhase::Invalid));
        // 之前的结果仍然显示
        assert_eq!(view.result.unwrap().ip, "8.8.8.8");
        assert_eq!(fake.calls().len(), calls_before);
        assert_eq!(history_ips(&controller), vec!["8.8.8.8"]);
    }

    #[tokio::test]
    async fn test_submit_empty_input() {
        let (fake, _, controller) = setup();
        let outcome = controller.submit("   ").await;
        assert!(matches!(outcome, LookupOutcome::Failed(_)));
        assert!(fake.calls().is_empty());
    }

    #[tokio::test]
    async fn test_bogon_keeps_previous_result() {
        let (_, _, controller) = setup();
        controller.mount().await;

        let outcome = controller.submit("127.0.0.1").await;
        assert!(matches!(
            outcome,
            LookupOutcome::Failed(GeoLookupError::NoLocation(_))
        ));

        let view = controller.view();
        assert_eq!(view.error.as_deref(), Some(NO_LOCATION_MESSAGE));
        assert_eq!(view.result.unwrap().city, "Sydney");
        assert!(view.history.is_empty());
    }

    #[tokio::test]
    async fn test_transport_failure_sets_fetch_message() {
        let (_, _, controller) = setup();
        controller.mount().await;

        // 未配置响应的地址返回传输错误
        let outcome = controller.submit("4.4.4.4").await;
        assert!(matches!(
            outcome,
            LookupOutcome::Failed(GeoLookupError::Transport(_))
        ));

        let view = controller.view();
        assert_eq!(view.error.as_deref(), Some(FETCH_FAILED_MESSAGE));
        assert_eq!(view.result.unwrap().city, "Sydney");
        assert!(view.history.is_empty());

        // 失败后仍接受下一次输入
        assert!(controller.submit("8.8.8.8").await.is_applied());
        assert_eq!(controller.view().error, None);
    }

    #[tokio::test]
    async fn test_failed_mount_stops_initial_loading() {
        let (fake, _, controller) = setup();
        fake.respond(OWN, Err(GeoLookupError::transport("offline")));

        assert!(matches!(controller.mount().await, LookupOutcome::Failed(_)));
        let view = controller.view();
        assert!(!view.initial_loading);
        assert!(view.result.is_none());
        assert_eq!(view.error.as_deref(), Some(FETCH_FAILED_MESSAGE));
    }

    #[tokio::test]
    async fn test_clear_search_requeries_own_address() {
        let (fake, _, controller) = setup();
        controller.submit("8.8.8.8").await;

        assert!(controller.clear_search().await.is_applied());
        assert_eq!(controller.view().result.unwrap().city, "Sydney");
        assert_eq!(history_ips(&controller), vec!["8.8.8.8"]);
        assert_eq!(fake.calls().last().unwrap(), &None);
    }

    #[tokio::test]
    async fn test_select_history_first_entry_refreshes_timestamp() {
        let fake = Arc::new(FakeGeo::default());
        fake.respond("8.8.8.8", Ok(geo("8.8.8.8", "Mountain View", "37.4056,-122.0775")));
        fake.respond("1.1.1.1", Ok(geo("1.1.1.1", "Brisbane", "-27.4816,153.0175")));

        let kv = Arc::new(MemoryKeyValueStore::new());
        fn early() -> DateTime<Utc> {
            Utc.timestamp_opt(1_600_000_000, 0).unwrap()
        }
        let seeded = HistoryStore::with_clock(kv.clone(), early);
        seeded.upsert("1.1.1.1").unwrap();
        seeded.upsert("8.8.8.8").unwrap();

        let controller =
            LookupController::new(fake.clone(), HistoryStore::with_clock(kv, fixed_clock));
        controller.history.load();

        assert!(controller.select_history("8.8.8.8").await.is_applied());
        let history = controller.history();
        assert_eq!(history.len(), 2);
        assert_eq!(history.first().unwrap().ip, "8.8.8.8");
        assert_eq!(history.first().unwrap().timestamp, fixed_clock());
        assert_eq!(fake.calls(), vec![Some("8.8.8.8".to_string())]);
    }

    #[tokio::test]
    async fn test_select_history_moves_entry_to_front() {
        let (_, _, controller) = setup();
        for ip in ["1.1.1.1", "8.8.8.8", "9.9.9.9"] {
            controller.submit(ip).await;
        }

        controller.select_history("1.1.1.1").await;
        assert_eq!(history_ips(&controller), vec!["1.1.1.1", "9.9.9.9", "8.8.8.8"]);
        assert_eq!(controller.view().result.unwrap().city, "Brisbane");
    }

    #[tokio::test]
    async fn test_later_search_wins_over_slow_mount() {
        let (fake, _, controller) = setup();
        let release = fake.gate(OWN);

        let (mount, search) = tokio::join!(controller.mount(), async {
            let outcome = controller.submit("8.8.8.8").await;
            release.send(()).unwrap();
            outcome
        });

        assert!(search.is_applied());
        assert_eq!(mount, LookupOutcome::Superseded);

        let view = controller.view();
        assert_eq!(view.result.unwrap().ip, "8.8.8.8");
        assert!(!view.initial_loading);
        assert_eq!(history_ips(&controller), vec!["8.8.8.8"]);
    }

    #[tokio::test]
    async fn test_superseded_history_selection_is_not_recorded() {
        let (fake, _, controller) = setup();
        let release = fake.gate("1.1.1.1");

        let (first, second) = tokio::join!(controller.select_history("1.1.1.1"), async {
            let outcome = controller.select_history("9.9.9.9").await;
            release.send(()).unwrap();
            outcome
        });

        assert_eq!(first, LookupOutcome::Superseded);
        assert!(second.is_applied());
        assert_eq!(controller.view().result.unwrap().ip, "9.9.9.9");
        assert_eq!(history_ips(&controller), vec!["9.9.9.9"]);
    }

    #[tokio::test]
    async fn test_duplicate_submit_is_ignored() {
        let (fake, _, controller) = setup();
        let release = fake.gate("8.8.8.8");

        let (first, second) = tokio::join!(controller.submit("8.8.8.8"), async {
            assert!(controller.view().searching);
            let outcome = controller.submit("1.1.1.1").await;
            release.send(()).unwrap();
            outcome
        });

        assert!(first.is_applied());
        assert_eq!(second, LookupOutcome::Ignored);
        assert_eq!(fake.calls(), vec![Some("8.8.8.8".to_string())]);
        assert!(!controller.view().searching);
    }

    #[tokio::test]
    async fn test_history_selection_not_blocked_by_search() {
        let (fake, _, controller) = setup();
        let release = fake.gate("8.8.8.8");

        let (search, selection) = tokio::join!(controller.submit("8.8.8.8"), async {
            let outcome = controller.select_history("1.1.1.1").await;
            release.send(()).unwrap();
            outcome
        });

        // 历史选择发出得更晚，搜索结果被丢弃
        assert!(selection.is_applied());
        assert_eq!(search, LookupOutcome::Superseded);
        assert_eq!(history_ips(&controller), vec!["1.1.1.1"]);
    }

    #[tokio::test]
    async fn test_eleventh_address_drops_oldest() {
        let fake = Arc::new(FakeGeo::default());
        for i in 0..11 {
            let ip = format!("10.0.0.{}", i);
            fake.respond(&ip, Ok(geo(&ip, "Somewhere", "1.0,1.0")));
        }
        let controller = LookupController::new(
            fake,
            HistoryStore::new(Arc::new(MemoryKeyValueStore::new())),
        );

        for i in 0..11 {
            controller.submit(&format!("10.0.0.{}", i)).await;
        }

        let history = controller.history();
        assert_eq!(history.len(), 10);
        assert_eq!(history.first().unwrap().ip, "10.0.0.10");
        assert!(!history.contains("10.0.0.0"));
    }

    #[tokio::test]
    async fn test_select_all_then_delete_selected() {
        let (_, kv, controller) = setup();
        for ip in ["1.1.1.1", "8.8.8.8", "9.9.9.9"] {
            controller.submit(ip).await;
        }

        controller.open_drawer();
        controller.select_all();
        assert_eq!(controller.view().selection.len(), 3);

        let list = controller.delete_selected().unwrap();
        assert!(list.is_empty());
        assert!(controller.view().selection.is_empty());
        assert_eq!(kv.get(HISTORY_SLOT).unwrap().unwrap(), "[]");
    }

    #[tokio::test]
    async fn test_delete_selected_with_nothing_selected_is_noop() {
        let (_, _, controller) = setup();
        controller.submit("8.8.8.8").await;
        assert_eq!(controller.delete_selected().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_delete_entry_drops_its_selection() {
        let (_, _, controller) = setup();
        controller.submit("1.1.1.1").await;
        controller.submit("8.8.8.8").await;

        controller.toggle_selection("1.1.1.1");
        controller.toggle_selection("8.8.8.8");
        controller.delete_entry("1.1.1.1").unwrap();

        let view = controller.view();
        assert_eq!(history_ips(&controller), vec!["8.8.8.8"]);
        assert_eq!(view.selection.len(), 1);
        assert!(view.selection.contains("8.8.8.8"));

        // 再删一次是 no-op
        assert_eq!(controller.delete_entry("1.1.1.1").unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_toggle_all_and_close_drawer() {
        let (_, _, controller) = setup();
        controller.submit("1.1.1.1").await;
        controller.submit("8.8.8.8").await;

        controller.open_drawer();
        controller.toggle_all();
        assert_eq!(controller.view().selection.len(), 2);
        controller.toggle_all();
        assert!(controller.view().selection.is_empty());

        controller.toggle_selection("1.1.1.1");
        controller.close_drawer();
        let view = controller.view();
        assert!(!view.drawer_open);
        assert!(view.selection.is_empty());
    }

    #[tokio::test]
    async fn test_clear_history() {
        let (_, kv, controller) = setup();
        controller.submit("1.1.1.1").await;
        controller.toggle_selection("1.1.1.1");

        assert!(controller.clear_history().unwrap().is_empty());
        assert!(controller.view().selection.is_empty());
        assert!(kv.get(HISTORY_SLOT).unwrap().is_none());
    }

    #[tokio::test]
    async fn test_subscribers_follow_mutations() {
        let (_, _, controller) = setup();
        let preview = controller.subscribe_history();
        let drawer = controller.subscribe_history();

        controller.submit("8.8.8.8").await;
        assert_eq!(preview.borrow().len(), 1);
        assert_eq!(drawer.borrow().len(), 1);

        controller.clear_history().unwrap();
        assert!(preview.borrow().is_empty());
    }

    struct ReadOnlyStore(MemoryKeyValueStore);

    impl KeyValueStore for ReadOnlyStore {
        fn get(&self, key: &str) -> Result<Option<String>> {
            self.0.get(key)
        }

        fn set(&self, _key: &str, _value: &str) -> Result<()> {
            Err(GeoLookupError::file_operation("disk full"))
        }

        fn remove(&self, _key: &str) -> Result<()> {
            Err(GeoLookupError::file_operation("disk full"))
        }

        fn name(&self) -> &'static str {
            "read-only"
        }
    }

    #[tokio::test]
    async fn test_persist_failure_still_displays_result() {
        let fake = Arc::new(FakeGeo::default());
        fake.respond("8.8.8.8", Ok(geo("8.8.8.8", "Mountain View", "37.4056,-122.0775")));
        let store = Arc::new(ReadOnlyStore(MemoryKeyValueStore::new()));
        let controller = LookupController::new(fake, HistoryStore::new(store));

        assert!(controller.submit("8.8.8.8").await.is_applied());
        let view = controller.view();
        assert_eq!(view.result.unwrap().ip, "8.8.8.8");
        assert_eq!(view.error.as_deref(), Some(HISTORY_SAVE_FAILED_MESSAGE));
        assert!(view.history.is_empty());

        assert!(controller.clear_history().is_err());
    }
}
