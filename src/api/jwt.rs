use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::config::AuthConfig;

/// 登录 token claims
#[derive(Debug, Serialize, Deserialize)]
pub struct UserClaims {
    /// 用户 id
    pub sub: String,
    pub email: String,
    pub iat: i64,
    pub exp: i64,
    pub jti: String,
}

/// JWT 签发与校验（HS256）
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    token_minutes: u64,
}

impl JwtService {
    pub fn new(secret: &str, token_minutes: u64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            token_minutes,
        }
    }

    /// Create JwtService from config
    pub fn from_config(config: &AuthConfig) -> Self {
        // secret 为空时生成随机值，重启后旧 token 全部失效
        let secret = if config.jwt_secret.is_empty() {
            warn!("JWT secret not configured or empty, generating secure random token");
            crate::utils::generate_secure_token(32)
        } else {
            config.jwt_secret.clone()
        };

        Self::new(&secret, config.token_minutes)
    }

    pub fn token_minutes(&self) -> u64 {
        self.token_minutes
    }

    /// 为用户签发 token
    pub fn generate_token(
        &self,
        user_id: i32,
        email: &str,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let now = Utc::now();
        let claims = UserClaims {
            sub: user_id.to_string(),
            email: email.to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::minutes(self.token_minutes as i64)).timestamp(),
            jti: uuid::Uuid::new_v4().to_string(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
    }

    pub fn validate_token(&self, token: &str) -> Result<UserClaims, jsonwebtoken::errors::Error> {
        decode::<UserClaims>(token, &self.decoding_key, &Validation::default())
            .map(|data| data.claims)
    }
}
