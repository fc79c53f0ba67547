//! Lookup controller tests over the file-backed client store
//!
//! The geolocation service is replaced with an in-process fake so the tests
//! exercise validation, history persistence and reload without a network.

use std::sync::Arc;

use async_trait::async_trait;
use tempfile::TempDir;

use geolookup::controller::{
    FETCH_FAILED_MESSAGE, INVALID_ADDRESS_MESSAGE, LookupController, LookupOutcome,
    NO_LOCATION_MESSAGE,
};
use geolookup::errors::{GeoLookupError, Result};
use geolookup::history::{HistoryStore, MAX_HISTORY_ENTRIES};
use geolookup::runtime::lifetime::startup::ClientContext;
use geolookup::services::{GeoLookup, GeoResult};
use geolookup::storage::{FileKeyValueStore, HISTORY_SLOT, KeyValueStore};

/// 按地址返回固定结果：`10.*` 为 bogon，`192.0.2.*` 为传输失败
struct TableGeo;

#[async_trait]
impl GeoLookup for TableGeo {
    async fn lookup(&self, ip: Option<&str>) -> Result<GeoResult> {
        let ip = ip.unwrap_or("203.0.113.7");
        if ip.starts_with("192.0.2.") {
            return Err(GeoLookupError::transport("connection refused"));
        }
        Ok(GeoResult {
            ip: ip.to_string(),
            city: "Mountain View".to_string(),
            country: "US".to_string(),
            loc: "37.4056,-122.0775".to_string(),
            bogon: ip.starts_with("10.").then_some(true),
            ..Default::default()
        })
    }

    fn name(&self) -> &'static str {
        "table"
    }
}

fn open_controller(dir: &TempDir) -> (Arc<dyn KeyValueStore>, LookupController) {
    let store: Arc<dyn KeyValueStore> = Arc::new(FileKeyValueStore::open(dir.path()).unwrap());
    let controller = LookupController::new(Arc::new(TableGeo), HistoryStore::new(store.clone()));
    (store, controller)
}

fn ips(controller: &LookupController) -> Vec<String> {
    controller.history().iter().map(|e| e.ip.clone()).collect()
}

#[tokio::test]
async fn test_history_survives_reopen() {
    let dir = TempDir::new().unwrap();
    {
        let (_, controller) = open_controller(&dir);
        controller.mount().await;
        assert!(controller.submit("8.8.8.8").await.is_applied());
        assert!(controller.submit("1.1.1.1").await.is_applied());
    }

    let (_, controller) = open_controller(&dir);
    let history = controller.load_history();
    assert_eq!(ips(&controller), vec!["1.1.1.1", "8.8.8.8"]);
    assert!(history.first().unwrap().timestamp >= history.entries()[1].timestamp);
}

#[tokio::test]
async fn test_mount_shows_own_address_without_recording() {
    let dir = TempDir::new().unwrap();
    let (_, controller) = open_controller(&dir);

    let outcome = controller.mount().await;
    assert!(outcome.is_applied());

    let view = controller.view();
    assert_eq!(view.result.unwrap().ip, "203.0.113.7");
    assert!(!view.initial_loading);
    assert!(view.history.is_empty());
}

#[tokio::test]
async fn test_failures_keep_previous_result() {
    let dir = TempDir::new().unwrap();
    let (_, controller) = open_controller(&dir);
    controller.mount().await;
    controller.submit("8.8.8.8").await;

    // 无效输入不发请求
    let outcome = controller.submit("999.1.1.1").await;
    assert!(matches!(
        outcome,
        LookupOutcome::Failed(GeoLookupError::Validation(_))
    ));
    assert_eq!(controller.view().error.as_deref(), Some(INVALID_ADDRESS_MESSAGE));

    controller.submit("10.0.0.1").await;
    assert_eq!(controller.view().error.as_deref(), Some(NO_LOCATION_MESSAGE));

    controller.submit("192.0.2.1").await;
    let view = controller.view();
    assert_eq!(view.error.as_deref(), Some(FETCH_FAILED_MESSAGE));
    assert_eq!(view.result.unwrap().ip, "8.8.8.8");
    assert_eq!(ips(&controller), vec!["8.8.8.8"]);
}

#[tokio::test]
async fn test_cap_and_dedup_on_disk() {
    let dir = TempDir::new().unwrap();
    let (store, controller) = open_controller(&dir);

    for i in 1..=MAX_HISTORY_ENTRIES + 1 {
        controller.submit(&format!("8.8.8.{}", i)).await;
    }
    controller.submit("8.8.8.5").await;

    let expected: Vec<String> = std::iter::once("8.8.8.5".to_string())
        .chain(
            (2..=MAX_HISTORY_ENTRIES + 1)
                .rev()
                .map(|i| format!("8.8.8.{}", i))
                .filter(|ip| ip != "8.8.8.5"),
        )
        .collect();
    assert_eq!(ips(&controller), expected);

    let raw = store.get(HISTORY_SLOT).unwrap().unwrap();
    let on_disk: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let arr = on_disk.as_array().unwrap();
    assert_eq!(arr.len(), MAX_HISTORY_ENTRIES);
    assert_eq!(arr[0]["ip"], "8.8.8.5");
    assert!(arr[0]["timestamp"].as_str().is_some());
}

#[tokio::test]
async fn test_corrupt_history_file_starts_empty() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join(format!("{}.json", HISTORY_SLOT)), "{broken").unwrap();

    let (_, controller) = open_controller(&dir);
    assert!(controller.load_history().is_empty());

    // 下一次成功查询覆盖损坏内容
    controller.submit("1.1.1.1").await;
    let (_, reopened) = open_controller(&dir);
    reopened.load_history();
    assert_eq!(ips(&reopened), vec!["1.1.1.1"]);
}

#[tokio::test]
async fn test_delete_selected_and_clear_persist() {
    let dir = TempDir::new().unwrap();
    let (store, controller) = open_controller(&dir);
    for ip in ["1.1.1.1", "2.2.2.2", "3.3.3.3"] {
        controller.submit(ip).await;
    }

    controller.open_drawer();
    controller.toggle_selection("1.1.1.1");
    controller.toggle_selection("3.3.3.3");
    controller.delete_selected().unwrap();
    assert!(controller.view().selection.is_empty());

    let (_, reopened) = open_controller(&dir);
    reopened.load_history();
    assert_eq!(ips(&reopened), vec!["2.2.2.2"]);

    controller.clear_history().unwrap();
    assert!(store.get(HISTORY_SLOT).unwrap().is_none());
}

#[tokio::test]
async fn test_client_context_shares_one_store() {
    let dir = TempDir::new().unwrap();
    let store: Arc<dyn KeyValueStore> = Arc::new(FileKeyValueStore::open(dir.path()).unwrap());
    let ctx = ClientContext::with_parts(store, Arc::new(TableGeo));

    assert!(ctx.session.require_token().is_err());
    ctx.controller.submit("8.8.4.4").await;
    assert!(ctx.store.get(HISTORY_SLOT).unwrap().is_some());
}
