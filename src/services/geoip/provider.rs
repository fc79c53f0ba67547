//! GeoIP 查询抽象层
//!
//! 控制器只依赖 [`GeoLookup`] trait，具体实现（ipinfo 风格的外部 API）
//! 在启动时根据配置创建。

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::ipinfo::IpInfoClient;
use crate::config::GeoIpConfig;
use crate::errors::Result;

/// 地理位置查询结果
///
/// 除 `bogon` 检查外原样透传，不做任何加工
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeoResult {
    #[serde(default)]
    pub ip: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub postal: String,
    /// "lat,lon"
    #[serde(default)]
    pub loc: String,
    #[serde(default)]
    pub timezone: String,
    #[serde(default)]
    pub org: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bogon: Option<bool>,
}

impl GeoResult {
    /// 保留/私有地址，没有位置数据
    pub fn is_bogon(&self) -> bool {
        self.bogon.unwrap_or(false)
    }

    /// 解析 `loc` 为 (纬度, 经度)
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        let (lat, lon) = self.loc.split_once(',')?;
        let lat: f64 = lat.trim().parse().ok()?;
        let lon: f64 = lon.trim().parse().ok()?;
        if (-90.0..=90.0).contains(&lat) && (-180.0..=180.0).contains(&lon) {
            Some((lat, lon))
        } else {
            None
        }
    }
}

/// GeoIP 查询 trait
#[async_trait]
pub trait GeoLookup: Send + Sync {
    /// 查询地址的地理位置；`None` 表示查询调用方自身的出口地址
    ///
    /// 网络失败、非 2xx、响应无法解析都返回 `Transport` 错误；
    /// bogon 结果照常返回，由调用方判断
    async fn lookup(&self, ip: Option<&str>) -> Result<GeoResult>;

    /// 获取 provider 名称（用于日志）
    fn name(&self) -> &'static str;
}

/// 统一 GeoIP Provider
#[derive(Clone)]
pub struct GeoIpProvider {
    inner: Arc<dyn GeoLookup>,
}

impl GeoIpProvider {
    /// 根据配置初始化
    pub fn new(config: &GeoIpConfig) -> Self {
        let inner: Arc<dyn GeoLookup> = Arc::new(IpInfoClient::from_config(config));
        info!(
            "GeoIP: Initialized with {} provider at {}",
            inner.name(),
            config.api_base
        );
        Self { inner }
    }
}

#[async_trait]
impl GeoLookup for GeoIpProvider {
    async fn lookup(&self, ip: Option<&str>) -> Result<GeoResult> {
        self.inner.lookup(ip).await
    }

    fn name(&self) -> &'static str {
        self.inner.name()
    }
}
