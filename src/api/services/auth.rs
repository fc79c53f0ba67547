//! 登录端点

use std::sync::Arc;

use actix_governor::{Governor, GovernorConfigBuilder, KeyExtractor, SimpleKeyExtractionError};
use actix_web::dev::ServiceRequest;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, Responder, Result as ActixResult, error, web};
use governor::middleware::NoOpMiddleware;
use tracing::{debug, error, info, warn};

use crate::api::jwt::JwtService;
use crate::api::types::{ErrorResponse, LoginRequest, LoginResponse, UserProfile};
use crate::storage::backend::UserRepository;
use crate::utils::password::verify_password;

pub const MISSING_CREDENTIALS_MESSAGE: &str = "Email and password are required";
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid email or password";
pub const SERVER_ERROR_MESSAGE: &str = "Server error";

/// 登录服务依赖
#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    jwt: Arc<JwtService>,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserRepository>, jwt: Arc<JwtService>) -> Self {
        Self { users, jwt }
    }

    /// `POST /api/login`
    pub async fn login(
        service: web::Data<AuthService>,
        body: web::Json<LoginRequest>,
    ) -> ActixResult<impl Responder> {
        let LoginRequest { email, password } = body.into_inner();

        if email.is_empty() || password.is_empty() {
            debug!("Login rejected: missing credentials");
            return Ok(error_response(
                StatusCode::BAD_REQUEST,
                MISSING_CREDENTIALS_MESSAGE,
            ));
        }

        let user = match service.users.find_by_email(&email).await {
            Ok(Some(user)) => user,
            Ok(None) => {
                warn!("Login failed: unknown email {}", email);
                return Ok(error_response(
                    StatusCode::UNAUTHORIZED,
                    INVALID_CREDENTIALS_MESSAGE,
                ));
            }
            Err(e) => {
                error!("Login: user lookup failed: {}", e);
                return Ok(error_response(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    SERVER_ERROR_MESSAGE,
                ));
            }
        };

        match verify_password(&password, &user.password_hash) {
            Ok(true) => {}
            Ok(false) => {
                warn!("Login failed: wrong password for {}", email);
                return Ok(error_response(
                    StatusCode::UNAUTHORIZED,
                    INVALID_CREDENTIALS_MESSAGE,
                ));
            }
            Err(e) => {
                error!("Login: password verification error: {}", e);
                return Ok(error_response(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    SERVER_ERROR_MESSAGE,
                ));
            }
        }

        let token = match service.jwt.generate_token(user.id, &user.email) {
            Ok(token) => token,
            Err(e) => {
                error!("Login: failed to generate token: {}", e);
                return Ok(error_response(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    SERVER_ERROR_MESSAGE,
                ));
            }
        };

        info!("Login successful for {}", user.email);
        Ok(HttpResponse::Ok().json(LoginResponse {
            success: true,
            token,
            user: UserProfile {
                id: user.id,
                email: user.email,
                name: user.name,
            },
        }))
    }
}

fn error_response(status: StatusCode, message: &str) -> HttpResponse {
    HttpResponse::build(status).json(ErrorResponse::new(message))
}

/// 请求体不是合法 JSON 时同样返回 400 + 统一提示
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(16 * 1024)
        .error_handler(|err, _req| {
            debug!("Login rejected: malformed body: {}", err);
            error::InternalError::from_response(
                err,
                error_response(StatusCode::BAD_REQUEST, MISSING_CREDENTIALS_MESSAGE),
            )
            .into()
        })
}

/// 基于连接 IP 的限流 key
#[derive(Clone, Copy)]
pub struct LoginKeyExtractor;

impl KeyExtractor for LoginKeyExtractor {
    type Key = String;
    type KeyExtractionError = SimpleKeyExtractionError<&'static str>;

    fn extract(&self, req: &ServiceRequest) -> Result<Self::Key, Self::KeyExtractionError> {
        req.peer_addr()
            .map(|addr| addr.ip().to_string())
            .ok_or_else(|| SimpleKeyExtractionError::new("Unable to extract peer IP"))
    }
}

/// 创建登录限流器
///
/// 每秒补充 1 个令牌，突发最多 5 次请求，超限返回 429
pub fn login_rate_limiter() -> Governor<LoginKeyExtractor, NoOpMiddleware> {
    let config = GovernorConfigBuilder::default()
        .seconds_per_request(1)
        .burst_size(5)
        .key_extractor(LoginKeyExtractor)
        .finish()
        .expect("Invalid rate limit config");

    debug!("Login rate limiter created: 1 req/s, burst 5");
    Governor::new(&config)
}

/// 认证路由（挂在 `/api` 下）
pub fn auth_routes() -> actix_web::Resource {
    web::resource("/login").app_data(json_config()).route(
        web::post()
            .to(AuthService::login)
            .wrap(login_rate_limiter()),
    )
}
