//! ipinfo 风格的外部 GeoIP API
//!
//! - 自身地址：`GET {api_base}/json`
//! - 指定地址：`GET {api_base}/{ip}/json`
//!
//! 每次调用只发一次请求，不缓存、不重试。

use std::time::Duration;

use async_trait::async_trait;
use tracing::{trace, warn};
use ureq::Agent;

use super::provider::{GeoLookup, GeoResult};
use crate::config::GeoIpConfig;
use crate::errors::{GeoLookupError, Result};

/// 外部 API 客户端
pub struct IpInfoClient {
    api_base: String,
    token: Option<String>,
    agent: Agent,
}

impl IpInfoClient {
    pub fn new(api_base: &str, token: Option<String>, timeout: Duration) -> Self {
        // 非 2xx 不作为 ureq 错误，由 parse_response 统一处理
        let agent: Agent = Agent::config_builder()
            .timeout_global(Some(timeout))
            .http_status_as_error(false)
            .build()
            .into();

        Self {
            api_base: api_base.trim_end_matches('/').to_string(),
            token: token.filter(|t| !t.is_empty()),
            agent,
        }
    }

    pub fn from_config(config: &GeoIpConfig) -> Self {
        Self::new(
            &config.api_base,
            config.token.clone(),
            Duration::from_secs(config.timeout_secs),
        )
    }

    /// 构造请求 URL
    pub fn endpoint(&self, ip: Option<&str>) -> String {
        let mut url = match ip {
            Some(ip) => format!("{}/{}/json", self.api_base, ip),
            None => format!("{}/json", self.api_base),
        };
        if let Some(ref token) = self.token {
            url.push_str("?token=");
            url.push_str(token);
        }
        url
    }

    /// 同步请求（在 spawn_blocking 中调用）
    fn fetch_sync(agent: Agent, url: String) -> Result<GeoResult> {
        let resp = agent.get(&url).call().map_err(|e| {
            warn!("GeoIP request failed: {}", e);
            GeoLookupError::transport(format!("Request failed: {}", e))
        })?;

        let status = resp.status().as_u16();
        let body = resp.into_body().read_to_string().map_err(|e| {
            warn!("GeoIP response body could not be read: {}", e);
            GeoLookupError::transport(format!("Failed to read response: {}", e))
        })?;

        parse_response(status, &body)
    }
}

/// 解析 API 响应
///
/// 非 2xx 与无法解析的 JSON 都视为传输失败
pub fn parse_response(status: u16, body: &str) -> Result<GeoResult> {
    if !(200..300).contains(&status) {
        return Err(GeoLookupError::transport(format!(
            "GeoIP service responded with HTTP {}",
            status
        )));
    }

    let result: GeoResult = serde_json::from_str(body).map_err(|e| {
        GeoLookupError::transport(format!("Malformed GeoIP response: {}", e))
    })?;

    trace!(
        "GeoIP lookup: ip={}, city={}, loc={}, bogon={}",
        result.ip,
        result.city,
        result.loc,
        result.is_bogon()
    );
    Ok(result)
}

#[async_trait]
impl GeoLookup for IpInfoClient {
    async fn lookup(&self, ip: Option<&str>) -> Result<GeoResult> {
        let url = self.endpoint(ip);
        let agent = self.agent.clone();

        // ureq 是阻塞客户端，放到阻塞线程池执行
        tokio::task::spawn_blocking(move || Self::fetch_sync(agent, url))
            .await
            .unwrap_or_else(|e| {
                warn!("GeoIP spawn_blocking failed: {}", e);
                Err(GeoLookupError::transport("Lookup task failed"))
            })
    }

    fn name(&self) -> &'static str {
        "ipinfo"
    }
}
