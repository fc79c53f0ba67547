//! GeoIP 服务模块
//!
//! 通过 ipinfo 风格的外部 API 查询地址的地理位置：
//! - `GET {api_base}/json` 查询调用方自身地址
//! - `GET {api_base}/{ip}/json` 查询指定地址

mod ipinfo;
mod provider;

pub use ipinfo::{IpInfoClient, parse_response};
pub use provider::{GeoIpProvider, GeoLookup, GeoResult};
