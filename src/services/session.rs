//! 客户端会话
//!
//! 登录成功后 token 与用户资料分别写入 `token` / `user` 槽位，
//! 需要登录的命令通过 [`SessionStore::require_token`] 守卫。

use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;
use tracing::{debug, info, warn};
use ureq::Agent;

use crate::api::types::{ErrorResponse, LoginRequest, LoginResponse, UserProfile};
use crate::config::ClientConfig;
use crate::errors::{GeoLookupError, Result};
use crate::storage::{KeyValueStore, Slot, TOKEN_SLOT, USER_SLOT};

const LOGIN_TIMEOUT_SECS: u64 = 10;

/// 登录状态存储
#[derive(Clone)]
pub struct SessionStore {
    token: Slot<String>,
    user: Slot<UserProfile>,
}

impl SessionStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            token: Slot::new(Arc::clone(&store), TOKEN_SLOT),
            user: Slot::new(store, USER_SLOT),
        }
    }

    /// 保存登录结果
    pub fn save(&self, login: &LoginResponse) -> Result<()> {
        self.token.set(&login.token)?;
        self.user.set(&login.user)?;
        info!("Session saved for {}", login.user.email);
        Ok(())
    }

    pub fn token(&self) -> Result<Option<String>> {
        self.token.get()
    }

    pub fn user(&self) -> Result<Option<UserProfile>> {
        self.user.get()
    }

    /// 未登录时返回 `Unauthenticated`
    pub fn require_token(&self) -> Result<String> {
        match self.token.get() {
            Ok(Some(token)) if !token.is_empty() => Ok(token),
            Ok(_) => Err(GeoLookupError::unauthenticated(
                "Please log in first (geolookup login)",
            )),
            Err(e) => {
                warn!("Stored session token is unreadable: {}", e);
                Err(GeoLookupError::unauthenticated(
                    "Stored session is invalid, please log in again",
                ))
            }
        }
    }

    pub fn is_logged_in(&self) -> bool {
        self.require_token().is_ok()
    }

    /// 删除 token 与用户资料
    pub fn logout(&self) -> Result<()> {
        self.token.clear()?;
        self.user.clear()?;
        debug!("Session cleared");
        Ok(())
    }
}

/// 登录接口客户端
pub struct LoginClient {
    api_base: String,
    agent: Agent,
}

impl LoginClient {
    pub fn new(api_base: &str, timeout: Duration) -> Self {
        let agent: Agent = Agent::config_builder()
            .timeout_global(Some(timeout))
            .http_status_as_error(false)
            .build()
            .into();

        Self {
            api_base: api_base.trim_end_matches('/').to_string(),
            agent,
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(&config.api_base, Duration::from_secs(LOGIN_TIMEOUT_SECS))
    }

    pub fn endpoint(&self) -> String {
        format!("{}/api/login", self.api_base)
    }

    /// 调用 `POST /api/login`
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse> {
        let url = self.endpoint();
        let agent = self.agent.clone();
        let body = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };

        tokio::task::spawn_blocking(move || Self::post_sync(agent, url, body))
            .await
            .unwrap_or_else(|e| {
                warn!("Login spawn_blocking failed: {}", e);
                Err(GeoLookupError::transport("Login task failed"))
            })
    }

    fn post_sync(agent: Agent, url: String, body: LoginRequest) -> Result<LoginResponse> {
        let resp = agent.post(&url).send_json(&body).map_err(|e| {
            warn!("Login request to {} failed: {}", url, e);
            GeoLookupError::transport(format!("Could not reach server: {}", e))
        })?;

        let status = resp.status().as_u16();
        let text = resp
            .into_body()
            .read_to_string()
            .map_err(|e| GeoLookupError::transport(format!("Failed to read response: {}", e)))?;

        interpret_login_response(status, &text)
    }
}

/// 2xx 响应体：`success: false` 时 token / user 可能缺失
#[derive(Deserialize)]
struct LoginReply {
    #[serde(default)]
    success: bool,
    token: Option<String>,
    user: Option<UserProfile>,
    message: Option<String>,
}

/// 解析登录响应
///
/// 失败时原样透传服务端给出的 `message`
pub fn interpret_login_response(status: u16, body: &str) -> Result<LoginResponse> {
    if (200..300).contains(&status) {
        let reply: LoginReply = serde_json::from_str(body)
            .map_err(|e| GeoLookupError::transport(format!("Malformed login response: {}", e)))?;
        if !reply.success {
            let message = reply.message.unwrap_or_else(|| "Login failed".to_string());
            return Err(GeoLookupError::authentication(message));
        }
        return match (reply.token, reply.user) {
            (Some(token), Some(user)) => Ok(LoginResponse {
                success: true,
                token,
                user,
            }),
            _ => Err(GeoLookupError::transport(
                "Malformed login response: missing token or user",
            )),
        };
    }

    let message = serde_json::from_str::<ErrorResponse>(body)
        .map(|err| err.message)
        .unwrap_or_else(|_| format!("Login failed with HTTP {}", status));

    if (400..500).contains(&status) {
        Err(GeoLookupError::authentication(message))
    } else {
        Err(GeoLookupError::transport(message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryKeyValueStore;

    fn login_response() -> LoginResponse {
        LoginResponse {
            success: true,
            token: "header.payload.signature".to_string(),
            user: UserProfile {
                id: 1,
                email: "test@example.com".to_string(),
                name: "Test User".to_string(),
            },
        }
    }

    #[test]
    fn test_require_token_when_logged_out() {
        let session = SessionStore::new(Arc::new(MemoryKeyValueStore::new()));
        let err = session.require_token().unwrap_err();
        assert!(matches!(err, GeoLookupError::Unauthenticated(_)));
        assert!(!session.is_logged_in());
    }

    #[test]
    fn test_save_then_logout() {
        let kv = Arc::new(MemoryKeyValueStore::new());
        let session = SessionStore::new(kv.clone());

        session.save(&login_response()).unwrap();
        assert_eq!(session.require_token().unwrap(), "header.payload.signature");
        assert_eq!(session.user().unwrap().unwrap().name, "Test User");
        assert!(kv.get(TOKEN_SLOT).unwrap().is_some());

        session.logout().unwrap();
        assert!(session.token().unwrap().is_none());
        assert!(session.user().unwrap().is_none());
        // 重复登出不报错
        session.logout().unwrap();
    }

    #[test]
    fn test_corrupt_token_requires_login() {
        let kv = Arc::new(MemoryKeyValueStore::new());
        kv.set(TOKEN_SLOT, "not json").unwrap();

        let session = SessionStore::new(kv);
        assert!(matches!(
            session.require_token(),
            Err(GeoLookupError::Unauthenticated(_))
        ));
    }

    #[test]
    fn test_interpret_success() {
        let body = serde_json::to_string(&login_response()).unwrap();
        assert_eq!(interpret_login_response(200, &body).unwrap(), login_response());
    }

    #[test]
    fn test_interpret_server_message_passes_through() {
        let err =
            interpret_login_response(401, r#"{"message":"Invalid email or password"}"#).unwrap_err();
        assert_eq!(err, GeoLookupError::authentication("Invalid email or password"));

        let err = interpret_login_response(500, r#"{"message":"Server error"}"#).unwrap_err();
        assert_eq!(err, GeoLookupError::transport("Server error"));
    }

    #[test]
    fn test_interpret_success_false_passes_message() {
        let err = interpret_login_response(200, r#"{"success":false,"message":"Account locked"}"#)
            .unwrap_err();
        assert_eq!(err, GeoLookupError::authentication("Account locked"));

        let err = interpret_login_response(200, r#"{"success":false}"#).unwrap_err();
        assert_eq!(err, GeoLookupError::authentication("Login failed"));

        let err = interpret_login_response(200, r#"{"success":true,"token":"t"}"#).unwrap_err();
        assert!(matches!(err, GeoLookupError::Transport(_)));
    }

    #[test]
    fn test_interpret_unparsable_error_body() {
        let err = interpret_login_response(502, "Bad Gateway").unwrap_err();
        assert_eq!(err.message(), "Login failed with HTTP 502");
    }

    #[test]
    fn test_endpoint() {
        let client = LoginClient::new("http://127.0.0.1:5000/", Duration::from_secs(1));
        assert_eq!(client.endpoint(), "http://127.0.0.1:5000/api/login");
    }
}
